//! Sort comparator registry.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use storefront_catalog::Product;

/// Listing sort modes. The serialized names are the URL values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Featured,
    Newest,
    PriceLowHigh,
    PriceHighLow,
    #[serde(rename = "name-a-z")]
    NameAZ,
    #[serde(rename = "name-z-a")]
    NameZA,
    BestSelling,
    TopRated,
}

impl SortBy {
    /// Sort menu order.
    pub const ALL: [SortBy; 8] = [
        SortBy::Featured,
        SortBy::BestSelling,
        SortBy::Newest,
        SortBy::PriceLowHigh,
        SortBy::PriceHighLow,
        SortBy::NameAZ,
        SortBy::NameZA,
        SortBy::TopRated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Featured => "featured",
            SortBy::Newest => "newest",
            SortBy::PriceLowHigh => "price-low-high",
            SortBy::PriceHighLow => "price-high-low",
            SortBy::NameAZ => "name-a-z",
            SortBy::NameZA => "name-z-a",
            SortBy::BestSelling => "best-selling",
            SortBy::TopRated => "top-rated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Featured => "Featured",
            SortBy::Newest => "Newest Arrivals",
            SortBy::PriceLowHigh => "Price: Low to High",
            SortBy::PriceHighLow => "Price: High to Low",
            SortBy::NameAZ => "Name: A to Z",
            SortBy::NameZA => "Name: Z to A",
            SortBy::BestSelling => "Best Selling",
            SortBy::TopRated => "Top Rated",
        }
    }
}

impl core::fmt::Display for SortBy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort mode: {0:?}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortBy {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

pub type Comparator = fn(&Product, &Product) -> Ordering;

/// The comparator for a sort mode; `None` means catalog order (featured).
pub fn comparator(mode: SortBy) -> Option<Comparator> {
    let cmp: Comparator = match mode {
        SortBy::Featured => return None,
        SortBy::Newest => newest_first,
        SortBy::PriceLowHigh => cheapest_first,
        SortBy::PriceHighLow => priciest_first,
        SortBy::NameAZ => name_ascending,
        SortBy::NameZA => name_descending,
        SortBy::BestSelling => best_selling_first,
        SortBy::TopRated => top_rated_first,
    };
    Some(cmp)
}

/// Order `products` in place. `sort_by` is stable, so ties keep their
/// incoming (catalog) order.
pub fn sort_products(products: &mut [&Product], mode: SortBy) {
    if let Some(cmp) = comparator(mode) {
        products.sort_by(|a, b| cmp(a, b));
    }
}

fn newest_first(a: &Product, b: &Product) -> Ordering {
    match (a.created_at(), b.created_at()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cheapest_first(a: &Product, b: &Product) -> Ordering {
    a.price().minor().cmp(&b.price().minor())
}

fn priciest_first(a: &Product, b: &Product) -> Ordering {
    cheapest_first(b, a)
}

fn name_ascending(a: &Product, b: &Product) -> Ordering {
    collate(a.name(), b.name())
}

fn name_descending(a: &Product, b: &Product) -> Ordering {
    collate(b.name(), a.name())
}

fn best_selling_first(a: &Product, b: &Product) -> Ordering {
    b.sold_count().unwrap_or(0).cmp(&a.sold_count().unwrap_or(0))
}

fn top_rated_first(a: &Product, b: &Product) -> Ordering {
    b.rating().unwrap_or(0.0).total_cmp(&a.rating().unwrap_or(0.0))
}

/// Case- and accent-insensitive comparison, falling back to the raw strings
/// so that distinct names never compare equal.
fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}
