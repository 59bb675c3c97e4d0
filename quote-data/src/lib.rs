//! Loading of price catalogs from CSV configuration files.

pub mod loader;

pub use loader::{
    CatalogLoader, CatalogLoaderError, FEATURES_FILE, INDUSTRIES_FILE, SERVICES_FILE,
    TIMELINES_FILE,
};
