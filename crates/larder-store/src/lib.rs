//! Data model and in-memory stores for larder: the recipe catalog and the
//! pantry registry.

pub mod catalog;
pub mod config;
pub mod models;
pub mod pantry;

pub use catalog::{Catalog, CatalogError};
pub use config::StoreConfig;
pub use pantry::PantryRegistry;
