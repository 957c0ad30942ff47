//! Facet configuration: the legal values, labels and counts for every
//! filterable dimension, plus the absolute price bounds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use storefront_core::{Money, ValueObject};

use crate::product::Product;

/// A multi-value filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Categories,
    Subcategories,
    Colours,
    Sizes,
    Fit,
    Material,
    Brands,
}

impl Facet {
    /// Every facet, in display order.
    pub const ALL: [Facet; 7] = [
        Facet::Categories,
        Facet::Subcategories,
        Facet::Colours,
        Facet::Sizes,
        Facet::Fit,
        Facet::Material,
        Facet::Brands,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Categories => "categories",
            Facet::Subcategories => "subcategories",
            Facet::Colours => "colours",
            Facet::Sizes => "sizes",
            Facet::Fit => "fit",
            Facet::Material => "material",
            Facet::Brands => "brands",
        }
    }
}

impl core::fmt::Display for Facet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds in whole currency units.
///
/// Invariant: `min <= max`. Constructors normalise inverted input by swapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl ValueObject for PriceRange {}

impl Default for PriceRange {
    /// The storefront's stock bounds when no catalog configuration says otherwise.
    fn default() -> Self {
        Self { min: 0, max: 500 }
    }
}

impl PriceRange {
    /// Build a range, swapping inverted bounds.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }

    /// Normalise and clamp into `bounds`. Inverted bounds are swapped first.
    pub fn clamped_to(&self, bounds: &PriceRange) -> Self {
        let r = Self::new(self.min, self.max);
        let b = Self::new(bounds.min, bounds.max);
        Self {
            min: r.min.clamp(b.min, b.max),
            max: r.max.clamp(b.min, b.max),
        }
    }

    /// Inclusive containment; `min`/`max` are whole units, `price` is in cents.
    pub fn contains(&self, price: Money) -> bool {
        let cents = price.minor();
        u64::from(self.min) * 100 <= cents && cents <= u64::from(self.max) * 100
    }

    /// True when `self` lies within `other`.
    pub fn is_within(&self, other: &PriceRange) -> bool {
        other.min <= self.min && self.max <= other.max
    }
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub count: u32,
}

impl FacetOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, count: u32) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count,
        }
    }
}

/// A colour swatch; the name is the filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourOption {
    pub name: String,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub count: u32,
}

impl ColourOption {
    /// Whether the swatch is light enough to need a dark check mark
    /// (relative luminance above 0.6). Missing or malformed hex is dark.
    pub fn is_light(&self) -> bool {
        let Some(hex) = self.hex.as_deref().and_then(|h| h.strip_prefix('#')) else {
            return false;
        };
        if hex.len() != 6 || !hex.is_ascii() {
            return false;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) else {
            return false;
        };
        let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
        luminance > 0.6
    }
}

/// Facet configuration, immutable for a page visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacetConfig {
    pub categories: Vec<FacetOption>,
    /// Subcategory options keyed by their parent category value.
    pub subcategories: BTreeMap<String, Vec<FacetOption>>,
    pub colours: Vec<ColourOption>,
    pub sizes: Vec<FacetOption>,
    pub fits: Vec<FacetOption>,
    pub materials: Vec<FacetOption>,
    pub brands: Vec<FacetOption>,
    pub price_range: PriceRange,
}

impl FacetConfig {
    /// Absolute price bounds; the default price filter. Always ordered, even
    /// when the configuration was deserialized with inverted bounds.
    pub fn price_bounds(&self) -> PriceRange {
        PriceRange::new(self.price_range.min, self.price_range.max)
    }

    /// Whether `value` is a legal selection for `facet`.
    pub fn allows(&self, facet: Facet, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let has = |opts: &[FacetOption]| opts.iter().any(|o| o.value == value);
        match facet {
            Facet::Categories => has(&self.categories),
            Facet::Subcategories => self.subcategories.values().any(|opts| has(opts)),
            Facet::Colours => self.colours.iter().any(|c| c.name == value),
            Facet::Sizes => has(&self.sizes),
            Facet::Fit => has(&self.fits),
            Facet::Material => has(&self.materials),
            Facet::Brands => has(&self.brands),
        }
    }

    /// Derive a configuration from the products themselves: options in
    /// first-seen order with per-option product counts, and price bounds from
    /// zero to the most expensive product rounded up to a whole unit.
    pub fn from_products(products: &[Product]) -> Self {
        let mut cfg = FacetConfig::default();

        for p in products {
            bump(&mut cfg.categories, p.category(), p.category());
            let subs = cfg.subcategories.entry(p.category().to_string()).or_default();
            bump(subs, p.subcategory(), p.subcategory());
            bump(&mut cfg.fits, p.fit().code(), p.fit().label());
            bump(&mut cfg.materials, p.material(), p.material());
            bump(&mut cfg.brands, p.brand(), p.brand());
            for size in dedup(p.sizes()) {
                bump(&mut cfg.sizes, size, size);
            }
            for colour in dedup(p.colours()).into_iter().filter(|c| !c.is_empty()) {
                match cfg.colours.iter_mut().find(|c| c.name == *colour) {
                    Some(c) => c.count += 1,
                    None => cfg.colours.push(ColourOption {
                        name: colour.clone(),
                        hex: None,
                        count: 1,
                    }),
                }
            }
        }
        cfg.subcategories.retain(|_, opts| !opts.is_empty());

        let max = products.iter().map(|p| p.price().ceil_major()).max().unwrap_or(0);
        cfg.price_range = PriceRange::new(0, u32::try_from(max).unwrap_or(u32::MAX));
        cfg
    }
}

fn bump(opts: &mut Vec<FacetOption>, value: &str, label: &str) {
    if value.is_empty() {
        return;
    }
    match opts.iter_mut().find(|o| o.value == value) {
        Some(o) => o.count += 1,
        None => opts.push(FacetOption::new(value, label, 1)),
    }
}

fn dedup(values: &[String]) -> Vec<&String> {
    let mut seen: Vec<&String> = Vec::with_capacity(values.len());
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}
