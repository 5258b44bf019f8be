//! Row and ordering types.

use crate::DbError;
use chrono::{DateTime, FixedOffset};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::cmp::Ordering;

/// Name of the primary-key column every table carries.
pub const ID_COLUMN: &str = "id";

/// A single table row: a JSON object keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(serde_json::Map<String, serde_json::Value>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from any serializable struct.
    ///
    /// Fails if the value does not serialize to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, DbError> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(Self(map)),
            other => Err(DbError::DeserializeError(format!(
                "expected an object, got {other}"
            ))),
        }
    }

    /// Set a column, returning the row for chaining.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Get a value by column name.
    pub fn get(&self, column: &str) -> Option<&serde_json::Value> {
        self.0.get(column)
    }

    /// The row id, if it has a string or integer `id` column.
    pub fn id(&self) -> Option<String> {
        match self.0.get(ID_COLUMN)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Get the column names.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Copy every column of `patch` over this row.
    pub fn merge(&mut self, patch: Row) {
        for (k, v) in patch.0 {
            self.0.insert(k, v);
        }
    }

    /// Try to deserialize the row into a type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        serde_json::from_value(serde_json::Value::Object(self.0.clone()))
            .map_err(|e| DbError::DeserializeError(e.to_string()))
    }
}

/// Build a [`Row`] from column/value pairs.
///
/// ```rust
/// use tom_db::row;
///
/// let row = row! { "name" => "Orange Crochet Beret", "price" => 22.0 };
/// assert_eq!(row.get("price"), Some(&serde_json::json!(22.0)));
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {
        $crate::Row::new()$(.with($column, $value))+
    };
}

/// Sort order for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Column to sort on.
    pub column: String,
    /// Ascending when true.
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// Compare two rows on this order's column. Missing or null values sort last
    /// regardless of direction.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let left = a.get(&self.column).filter(|v| !v.is_null());
        let right = b.get(&self.column).filter(|v| !v.is_null());
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = compare_values(l, r);
                if self.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }
        }
    }
}

fn compare_values(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
    use serde_json::Value;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => match (parse_timestamp(x), parse_timestamp(y)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x.cmp(y),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// RFC 3339 timestamps compare by instant, whatever their offset or precision.
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_id() {
        assert_eq!(row! { "id" => "abc" }.id(), Some("abc".to_string()));
        assert_eq!(row! { "id" => 7 }.id(), Some("7".to_string()));
        assert_eq!(row! { "id" => "" }.id(), None);
        assert_eq!(row! { "name" => "x" }.id(), None);
    }

    #[test]
    fn test_row_roundtrip_struct() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Category {
            name: String,
            slug: String,
        }

        let cat = Category {
            name: "Slides".into(),
            slug: "slides".into(),
        };
        let row = Row::from_serialize(&cat).unwrap();
        assert_eq!(row.get("slug"), Some(&json!("slides")));
        assert_eq!(row.deserialize::<Category>().unwrap(), cat);
        assert!(Row::from_serialize(&42).is_err());
    }

    #[test]
    fn test_merge_overwrites_columns() {
        let mut row = row! { "id" => "1", "price" => 28.0 };
        row.merge(row! { "price" => 30.0, "name" => "Slides" });
        assert_eq!(row.get("price"), Some(&json!(30.0)));
        assert_eq!(row.get("name"), Some(&json!("Slides")));
        assert_eq!(row.id(), Some("1".to_string()));
    }

    #[test]
    fn test_order_puts_nulls_last() {
        let a = row! { "created_at" => "2026-01-02T00:00:00Z" };
        let b = row! { "created_at" => "2026-01-01T00:00:00Z" };
        let c = row! { "created_at" => serde_json::Value::Null };

        let mut rows = vec![c.clone(), b.clone(), a.clone()];
        rows.sort_by(|x, y| Order::desc("created_at").compare(x, y));
        assert_eq!(rows, vec![a.clone(), b.clone(), c.clone()]);

        rows.sort_by(|x, y| Order::asc("created_at").compare(x, y));
        assert_eq!(rows, vec![b, a, c]);
    }

    #[test]
    fn test_order_compares_timestamps_as_instants() {
        // 12:00+05:00 is 07:00Z, older than 10:00Z.
        let offset = row! { "id" => "a", "created_at" => "2026-03-10T12:00:00+05:00" };
        let utc = row! { "id" => "b", "created_at" => "2026-03-10T10:00:00Z" };
        let mut rows = vec![offset.clone(), utc.clone()];
        rows.sort_by(|x, y| Order::desc("created_at").compare(x, y));
        assert_eq!(rows, vec![utc, offset]);

        // Whole seconds against milliseconds within the same second.
        let whole = row! { "created_at" => "2026-03-10T10:00:00Z" };
        let millis = row! { "created_at" => "2026-03-10T10:00:00.500Z" };
        assert_eq!(Order::asc("created_at").compare(&whole, &millis), Ordering::Less);

        let text = row! { "created_at" => "yesterday" };
        assert_eq!(Order::asc("created_at").compare(&whole, &text), Ordering::Less);
    }
}
