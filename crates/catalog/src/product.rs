use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Currency, DomainError, Entity, Money, ProductId};

/// Fit classification of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Mens,
    Womens,
    #[default]
    Unisex,
    Kids,
}

impl Fit {
    pub const ALL: [Fit; 4] = [Fit::Mens, Fit::Womens, Fit::Unisex, Fit::Kids];

    /// Code used in facet configuration and URLs.
    pub fn code(&self) -> &'static str {
        match self {
            Fit::Mens => "mens",
            Fit::Womens => "womens",
            Fit::Unisex => "unisex",
            Fit::Kids => "kids",
        }
    }

    /// Shopper-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Fit::Mens => "Men's",
            Fit::Womens => "Women's",
            Fit::Unisex => "Unisex",
            Fit::Kids => "Kids",
        }
    }

    pub fn from_code(code: &str) -> Option<Fit> {
        Fit::ALL.into_iter().find(|f| f.code() == code)
    }
}

/// Catalog record as published by the catalog collaborator (camelCase JSON).
///
/// Convert into a [`Product`] with `try_into`, which validates ids and prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub price: f64,
    pub employee_price: Option<f64>,
    pub currency: Currency,
    pub category: String,
    pub subcategory: String,
    pub brand: String,
    pub fit: Fit,
    pub material: String,
    pub colours: Vec<String>,
    pub sizes: Vec<String>,
    pub is_premium: bool,
    pub is_eco_friendly: bool,
    pub in_stock: bool,
    pub rating: Option<f64>,
    pub sold_count: Option<u64>,
    pub created_at: String,
}

/// A catalog product, read-only to the listing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    slug: String,
    name: String,
    price: Money,
    employee_price: Option<Money>,
    category: String,
    subcategory: String,
    brand: String,
    fit: Fit,
    material: String,
    colours: Vec<String>,
    sizes: Vec<String>,
    is_premium: bool,
    is_eco_friendly: bool,
    in_stock: bool,
    rating: Option<f64>,
    sold_count: Option<u64>,
    created_at: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let id: ProductId = r.id.parse()?;
        if r.name.trim().is_empty() {
            return Err(DomainError::validation(format!("product {id}: name cannot be empty")));
        }
        let price = Money::from_decimal(r.price, r.currency)
            .map_err(|e| DomainError::validation(format!("product {id}: {e}")))?;
        let employee_price = r
            .employee_price
            .map(|p| Money::from_decimal(p, r.currency))
            .transpose()
            .map_err(|e| DomainError::validation(format!("product {id}: employee {e}")))?;

        Ok(Self {
            slug: if r.slug.is_empty() { id.to_string() } else { r.slug },
            id,
            name: r.name,
            price,
            employee_price,
            category: r.category,
            subcategory: r.subcategory,
            brand: r.brand,
            fit: r.fit,
            material: r.material,
            colours: r.colours,
            sizes: r.sizes,
            is_premium: r.is_premium,
            is_eco_friendly: r.is_eco_friendly,
            in_stock: r.in_stock,
            rating: r.rating,
            sold_count: r.sold_count,
            created_at: r.created_at,
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Staff price, consumed by the pricing layer (never by filtering).
    pub fn employee_price(&self) -> Option<Money> {
        self.employee_price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn fit(&self) -> Fit {
        self.fit
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn colours(&self) -> &[String] {
        &self.colours
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn is_eco_friendly(&self) -> bool {
        self.is_eco_friendly
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn sold_count(&self) -> Option<u64> {
        self.sold_count
    }

    /// Raw creation timestamp as published.
    pub fn created_at_raw(&self) -> &str {
        &self.created_at
    }

    /// Creation timestamp, or `None` when the catalog value is not RFC 3339.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
