//! Admin panel: form validation and catalog writes.
//!
//! Forms carry raw text as typed by the admin. Validation turns them into
//! records for the backing store; [`AdminService`] performs the writes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tom_db::{Db, Order};

use crate::catalog::{Category, ProductRow, CATEGORIES_TABLE, PRODUCTS_TABLE};
use crate::error::CommerceError;

/// Storage bucket for product images.
pub const IMAGE_BUCKET: &str = "products";
/// Folder inside [`IMAGE_BUCKET`] for uploaded images.
pub const IMAGE_FOLDER: &str = "product-images";

/// Product form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub stock_quantity: String,
}

/// A validated product, ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub description: Option<String>,
    /// Major units, as the table stores it.
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub stock_quantity: i64,
}

impl ProductForm {
    /// Prefill the form from a stored row (for editing).
    pub fn from_row(row: &ProductRow) -> Self {
        Self {
            name: row.name.clone(),
            description: row.description.clone().unwrap_or_default(),
            price: row.price.to_string(),
            category: row.category.clone(),
            image_url: row.image_url.clone().unwrap_or_default(),
            stock_quantity: row.stock_quantity.unwrap_or(0).to_string(),
        }
    }

    /// Check required fields and parse numbers.
    ///
    /// Empty description and image become null; empty stock becomes 0.
    pub fn validate(&self) -> Result<ProductRecord, CommerceError> {
        let name = required("name", &self.name)?;
        let category = required("category", &self.category)?;
        let price_text = required("price", &self.price)?;

        let price: f64 = price_text
            .parse()
            .map_err(|_| invalid(format!("price is not a number: {price_text}")))?;
        if !price.is_finite() || price < 0.0 {
            return Err(invalid(format!("price must be zero or more: {price_text}")));
        }

        let stock_text = self.stock_quantity.trim();
        let stock_quantity = if stock_text.is_empty() {
            0
        } else {
            stock_text
                .parse()
                .map_err(|_| invalid(format!("stock quantity is not a whole number: {stock_text}")))?
        };

        Ok(ProductRecord {
            name,
            description: optional(&self.description),
            price,
            category,
            image_url: optional(&self.image_url),
            stock_quantity,
        })
    }
}

/// Category form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// A validated category, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<CategoryRecord, CommerceError> {
        let name = required("name", &self.name)?;
        let slug = required("slug", &self.slug)?;
        if !is_valid_slug(&slug) {
            return Err(invalid(format!(
                "slug may only contain lowercase letters, digits and hyphens: {slug}"
            )));
        }
        Ok(CategoryRecord {
            name,
            slug,
            description: optional(&self.description),
        })
    }
}

/// Lowercase ASCII letters, digits and hyphens; not empty.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Suggest a slug for a display name ("Baby Crochet!" becomes "baby-crochet").
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn required(field: &str, value: &str) -> Result<String, CommerceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn invalid(message: String) -> CommerceError {
    CommerceError::ValidationError(message)
}

/// Storage path for an uploaded image: `product-images/<random>.<ext>`.
///
/// The extension is whatever follows the last dot of the original name.
pub fn image_path(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    let stem: u64 = rand::thread_rng().gen();
    format!("{IMAGE_FOLDER}/{stem:016x}.{ext}")
}

/// Catalog writes on behalf of the admin panel.
#[derive(Debug, Clone)]
pub struct AdminService {
    db: Db,
}

impl AdminService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// All product rows, newest first.
    pub async fn list_products(&self) -> Result<Vec<ProductRow>, CommerceError> {
        Ok(self
            .db
            .select_as(PRODUCTS_TABLE, Some(&Order::desc("created_at")))
            .await?)
    }

    pub async fn get_product(&self, id: &str) -> Result<ProductRow, CommerceError> {
        self.db
            .get_as(PRODUCTS_TABLE, id)
            .await?
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    pub async fn create_product(&self, form: &ProductForm) -> Result<ProductRow, CommerceError> {
        let record = form.validate()?;
        let row: ProductRow = self.db.insert_as(PRODUCTS_TABLE, &record).await?;
        tracing::info!(id = %row.id, name = %row.name, "product added");
        Ok(row)
    }

    pub async fn update_product(&self, id: &str, form: &ProductForm) -> Result<ProductRow, CommerceError> {
        let record = form.validate()?;
        self.get_product(id).await?;
        let row: ProductRow = self.db.update_as(PRODUCTS_TABLE, id, &record).await?;
        tracing::info!(id, name = %row.name, "product updated");
        Ok(row)
    }

    /// Returns whether the product existed.
    pub async fn delete_product(&self, id: &str) -> Result<bool, CommerceError> {
        let removed = self.db.delete(PRODUCTS_TABLE, id).await?;
        if removed {
            tracing::info!(id, "product deleted");
        }
        Ok(removed)
    }

    /// All categories, oldest first.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CommerceError> {
        Ok(self
            .db
            .select_as(CATEGORIES_TABLE, Some(&Order::asc("created_at")))
            .await?)
    }

    pub async fn get_category(&self, id: &str) -> Result<Category, CommerceError> {
        self.db
            .get_as(CATEGORIES_TABLE, id)
            .await?
            .ok_or_else(|| CommerceError::CategoryNotFound(id.to_string()))
    }

    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, CommerceError> {
        let record = form.validate()?;
        let category: Category = self.db.insert_as(CATEGORIES_TABLE, &record).await?;
        tracing::info!(id = %category.id, slug = %category.slug, "category added");
        Ok(category)
    }

    pub async fn update_category(&self, id: &str, form: &CategoryForm) -> Result<Category, CommerceError> {
        let record = form.validate()?;
        self.get_category(id).await?;
        let category: Category = self.db.update_as(CATEGORIES_TABLE, id, &record).await?;
        tracing::info!(id, slug = %category.slug, "category updated");
        Ok(category)
    }

    /// Products keep their category slug; they are not touched here.
    pub async fn delete_category(&self, id: &str) -> Result<bool, CommerceError> {
        let removed = self.db.delete(CATEGORIES_TABLE, id).await?;
        if removed {
            tracing::info!(id, "category deleted");
        }
        Ok(removed)
    }

    /// Store an image under a random name and return its public URL.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, CommerceError> {
        if bytes.is_empty() {
            return Err(invalid("image file is empty".to_string()));
        }
        let path = image_path(file_name);
        let url = self.db.upload(IMAGE_BUCKET, &path, bytes).await?;
        tracing::info!(%path, "image uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: " Chunky Knit Beret ".into(),
            price: "22.50".into(),
            category: "crochet-accessories".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_product_form_defaults() {
        let record = form().validate().unwrap();
        assert_eq!(record.name, "Chunky Knit Beret");
        assert_eq!(record.price, 22.5);
        assert_eq!(record.stock_quantity, 0);
        assert_eq!(record.description, None);
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn test_product_form_rejects_bad_input() {
        for broken in [
            ProductForm { name: "".into(), ..form() },
            ProductForm { category: " ".into(), ..form() },
            ProductForm { price: "".into(), ..form() },
            ProductForm { price: "cheap".into(), ..form() },
            ProductForm { price: "-1".into(), ..form() },
            ProductForm { stock_quantity: "2.5".into(), ..form() },
        ] {
            assert!(
                matches!(broken.validate(), Err(CommerceError::ValidationError(_))),
                "{broken:?}"
            );
        }
    }

    #[test]
    fn test_category_form() {
        let ok = CategoryForm {
            name: "Baby Crochet".into(),
            slug: "baby-crochet".into(),
            description: String::new(),
        };
        assert_eq!(ok.validate().unwrap().description, None);

        let bad = CategoryForm { slug: "Baby Crochet".into(), ..ok.clone() };
        assert!(bad.validate().is_err());
        assert_eq!(slugify("Baby Crochet!"), "baby-crochet");
        assert!(is_valid_slug(&slugify("  Crochet & Accessories ")));
    }

    #[test]
    fn test_image_path() {
        let path = image_path("beret.photo.PNG");
        assert!(path.starts_with("product-images/"));
        assert!(path.ends_with(".PNG"));
        assert_ne!(image_path("a.png"), image_path("a.png"));
    }

    #[tokio::test]
    async fn test_product_crud() {
        let admin = AdminService::new(Db::memory());
        let created = admin.create_product(&form()).await.unwrap();
        assert_eq!(created.stock_quantity, Some(0));
        assert!(created.created_at.is_some());

        let mut edit = ProductForm::from_row(&created);
        edit.price = "24".into();
        let updated = admin.update_product(&created.id, &edit).await.unwrap();
        assert_eq!(updated.price, 24.0);
        assert_eq!(updated.name, "Chunky Knit Beret");

        assert_eq!(admin.list_products().await.unwrap().len(), 1);
        assert!(admin.delete_product(&created.id).await.unwrap());
        assert!(!admin.delete_product(&created.id).await.unwrap());
        assert!(matches!(
            admin.update_product(&created.id, &edit).await,
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_category_crud_and_upload() {
        let admin = AdminService::new(Db::memory());
        let created = admin
            .create_category(&CategoryForm {
                name: "Slides".into(),
                slug: "slides".into(),
                description: "Summer footwear".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.description.as_deref(), Some("Summer footwear"));

        let mut edit = CategoryForm::from_category(&created);
        edit.name = "Summer Slides".into();
        let updated = admin.update_category(created.id.as_str(), &edit).await.unwrap();
        assert_eq!(updated.name, "Summer Slides");
        assert!(admin.delete_category(created.id.as_str()).await.unwrap());

        let url = admin.upload_image("beret.png", b"png".to_vec()).await.unwrap();
        assert!(url.starts_with("memory://products/product-images/"));
        assert!(admin.upload_image("empty.png", Vec::new()).await.is_err());
    }
}
