//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use tom_cache::{Cache, SessionId};
use tom_commerce::admin::AdminService;
use tom_commerce::cart::{Cart, CartStore};
use tom_commerce::catalog::{fetch_products, seed_if_empty, seed_store, CatalogStore, IngestOptions};
use tom_commerce::contact::WhatsApp;
use tom_commerce::session::ShopSession;
use tom_commerce::Currency;
use tom_db::Db;

use crate::config::{ShopConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (ShopConfig::load(path)?, Some(cwd.join(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            }
        };
        // Fail early on a bad currency code.
        config.currency()?;

        let base_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());
        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Result<Option<(ShopConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    let path_str = config_path.to_string_lossy().into_owned();
                    return Ok(Some((ShopConfig::load(&path_str)?, config_path)));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Resolve a config path against the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn currency(&self) -> Currency {
        self.config.currency().unwrap_or_default()
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::new(self.currency()).with_new_arrival_days(self.config.store.new_arrival_days)
    }

    pub fn whatsapp(&self) -> WhatsApp {
        WhatsApp::new(&self.config.store.whatsapp_phone)
    }

    /// Open the configured backing store, if there is one.
    pub async fn db(&self) -> Result<Option<Db>> {
        let Some(path) = &self.config.data.path else {
            return Ok(None);
        };
        let path = self.resolve_path(path);
        let db = Db::open_file(&path)
            .await
            .with_context(|| format!("Failed to open data file: {}", path.display()))?;
        Ok(Some(db))
    }

    /// Admin access requires a backing store.
    pub async fn admin(&self) -> Result<AdminService> {
        match self.db().await? {
            Some(db) => Ok(AdminService::new(db)),
            None => bail!("No data file configured. Set [data] path in tom.toml (see `tom config init`)."),
        }
    }

    /// Load the catalog for this session.
    pub async fn load_catalog(&self) -> Result<CatalogStore> {
        let spinner = self.output.spinner("Loading catalog...");
        let result = self.fetch_catalog().await;
        spinner.finish_and_clear();
        result
    }

    async fn fetch_catalog(&self) -> Result<CatalogStore> {
        let opts = self.ingest_options();
        match self.db().await? {
            Some(db) => {
                if self.config.data.seed_if_empty {
                    let seeded = seed_if_empty(&db, &opts).await?;
                    if seeded > 0 {
                        self.output.info(&format!("Seeded the store with {} products", seeded));
                    }
                }
                Ok(fetch_products(&db, &opts).await.context("Failed to load products")?)
            }
            None => Ok(seed_store(opts.currency)?),
        }
    }

    /// Saved carts.
    pub fn cart_store(&self) -> Result<CartStore> {
        let dir = self.resolve_path(&self.config.cart.state_dir);
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open state directory: {}", dir.display()))?;
        Ok(CartStore::new(cache))
    }

    fn session_id(&self, store: &CartStore) -> Result<SessionId> {
        match &self.config.cart.session_id {
            Some(id) => Ok(SessionId::new(id.clone())),
            None => Ok(store.current_session()?),
        }
    }

    /// Load the catalog and the saved cart together.
    pub async fn open_session(&self) -> Result<SavedSession> {
        let catalog = self.load_catalog().await?;
        let store = self.cart_store()?;
        let id = self.session_id(&store)?;
        let cart = store.load(&id, catalog.currency())?;
        let before = cart.unique_item_count();

        let session = ShopSession::with_cart(catalog, cart)
            .context("Saved cart does not match the store currency; run `tom cart clear`")?;
        let dropped = before - session.cart().unique_item_count();
        if dropped > 0 {
            self.output
                .warn(&format!("{} cart line(s) removed: product no longer available", dropped));
        }
        Ok(SavedSession { store, id, session })
    }

    /// Clear the saved cart without loading the catalog.
    pub fn discard_cart(&self) -> Result<()> {
        let store = self.cart_store()?;
        let id = self.session_id(&store)?;
        store.discard(&id)?;
        Ok(())
    }
}

/// A shop session tied to its saved cart.
pub struct SavedSession {
    store: CartStore,
    id: SessionId,
    pub session: ShopSession,
}

impl SavedSession {
    pub fn cart(&self) -> &Cart {
        self.session.cart()
    }

    /// Write the cart back.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.id, self.session.cart())?;
        Ok(())
    }
}
