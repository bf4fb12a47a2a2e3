//! Catalog module
//!
//! Where the product list comes from.
//!
//! - `HttpCatalogSource` - one GET against the configured endpoint
//! - `FileCatalogSource` - the same payload read from disk
//! - `StaticCatalogSource` - a catalog already in memory

mod source;

pub use source::{
    decode_catalog, CatalogSource, FileCatalogSource, HttpCatalogSource, StaticCatalogSource,
};
