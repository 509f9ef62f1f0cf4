//! RecipeBox Core - Recipe sharing and meal planning
//!
//! This crate provides the core functionality behind the RecipeBox demo
//! application: a quota-aware upload pipeline over a local key-value store,
//! a recipe catalog with meal planning, and pluggable authentication.

pub mod auth;
pub mod catalog;
pub mod store;
pub mod upload;

use thiserror::Error;

/// Main error type for RecipeBox operations
#[derive(Error, Debug)]
pub enum RecipeBoxError {
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),

    #[error("Storage error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Upload error: {0}")]
    Upload(#[from] upload::UploadError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecipeBoxError>;

/// Install the global tracing subscriber, honoring `RUST_LOG`.
///
/// Call once at application startup. Safe to call again; later calls are
/// ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Core configuration for a RecipeBox instance
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecipeBoxConfig {
    /// Local storage path for upload data (None = in-memory only)
    pub data_path: Option<String>,

    /// Storage budget for uploads (bytes)
    pub storage_budget_bytes: u64,

    /// Maximum chunk size for uploads (bytes)
    pub chunk_size_bytes: u64,

    /// Seed the catalog with demo recipes
    pub seed_demo_data: bool,
}

impl Default for RecipeBoxConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            storage_budget_bytes: 5 * 1024 * 1024, // 5 MiB
            chunk_size_bytes: 1024 * 1024,         // 1 MiB
            seed_demo_data: true,
        }
    }
}

/// Top-level handle wiring the catalog, planner, and upload manager together.
pub struct RecipeBox {
    pub catalog: catalog::RecipeCatalog,
    pub planner: catalog::MealPlanner,
    pub uploads: upload::UploadManager,
}

impl RecipeBox {
    /// Build an instance from configuration: open (or fall back past) the
    /// store, apply the quota policy, and optionally seed demo recipes.
    pub fn new(config: RecipeBoxConfig) -> Result<Self> {
        let store_config = store::StoreConfig {
            data_path: config.data_path.as_ref().map(Into::into),
            capacity: None,
        };
        let handle = store::StoreHandle::new(store_config);
        let kv = handle.connect_or_reuse()?;

        let policy = upload::QuotaPolicy {
            storage_budget: config.storage_budget_bytes,
            chunk_size: config.chunk_size_bytes,
            ..upload::QuotaPolicy::default()
        };

        let catalog = if config.seed_demo_data {
            catalog::RecipeCatalog::with_demo_data()
        } else {
            catalog::RecipeCatalog::new()
        };

        Ok(Self {
            catalog,
            planner: catalog::MealPlanner::new(),
            uploads: upload::UploadManager::new(kv).with_policy(policy),
        })
    }
}
