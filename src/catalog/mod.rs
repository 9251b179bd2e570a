//! Catalog Module
//!
//! Access to the remote API catalog: typed records, the origin port with its
//! HTTP adapter, and the cached service used by the API layer.

mod records;
mod service;
mod source;

pub use records::{
    CatalogValue, Category, InterfaceDetail, InterfacePage, InterfaceSummary, Param,
};
pub use service::{CatalogService, PreloadSummary, ALL_INTERFACES_LIMIT};
pub use source::{CatalogSource, HttpCatalogSource};
