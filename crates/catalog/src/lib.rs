//! Catalog collaborator (read-only).
//!
//! This crate describes what the storefront sells: products with their
//! filterable attributes and the facet configuration that enumerates legal
//! filter values. The listing engine only ever reads from it.

pub mod catalog;
pub mod facets;
pub mod product;

pub use catalog::{Catalog, CatalogError};
pub use facets::{ColourOption, Facet, FacetConfig, FacetOption, PriceRange};
pub use product::{Fit, Product, ProductRecord};
