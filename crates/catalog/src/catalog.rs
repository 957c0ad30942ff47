//! Catalog loading and validation.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use storefront_core::{DomainError, Entity};

use crate::facets::FacetConfig;
use crate::product::{Product, ProductRecord};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<ProductRecord>,
    #[serde(default)]
    facets: Option<FacetConfig>,
}

/// An immutable product snapshot plus its facet configuration.
///
/// Products keep the order they were published in; that order is the
/// "featured" order of every listing.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    facets: FacetConfig,
}

impl Catalog {
    /// Build a catalog, validating id uniqueness and price bounds.
    pub fn new(products: Vec<Product>, facets: FacetConfig) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id().clone()) {
                return Err(DomainError::invariant(format!("duplicate product id: {}", p.id())).into());
            }
        }
        let bounds = facets.price_range;
        if bounds.min > bounds.max {
            return Err(DomainError::invariant(format!(
                "facet price bounds are inverted (min={}, max={})",
                bounds.min, bounds.max
            ))
            .into());
        }
        Ok(Self {
            products: products.into(),
            facets,
        })
    }

    /// Parse `{ "products": [...], "facets": {...} }`. When `facets` is absent
    /// the configuration is derived from the products.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        let products = doc
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let derived = doc.facets.is_none();
        let facets = doc.facets.unwrap_or_else(|| FacetConfig::from_products(&products));

        let catalog = Self::new(products, facets)?;
        tracing::info!(
            products = catalog.products.len(),
            derived_facets = derived,
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Shared handle to the product snapshot.
    pub fn shared_products(&self) -> Arc<[Product]> {
        Arc::clone(&self.products)
    }

    pub fn facets(&self) -> &FacetConfig {
        &self.facets
    }
}
