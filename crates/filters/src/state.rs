//! The filter state model: what the shopper currently wants to see.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_catalog::{Facet, FacetConfig, PriceRange};
use storefront_core::ValueObject;

use crate::sort::SortBy;

/// A boolean constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Flag {
    Premium,
    EcoFriendly,
    InStock,
    /// Pass-through for the pricing layer; never filters products here.
    EmployeePricing,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Premium, Flag::EcoFriendly, Flag::InStock, Flag::EmployeePricing];

    pub fn label(&self) -> &'static str {
        match self {
            Flag::Premium => "Premium",
            Flag::EcoFriendly => "Eco-Friendly",
            Flag::InStock => "In Stock",
            Flag::EmployeePricing => "Employee Pricing",
        }
    }
}

/// Closed set of filter-state fields. Using this instead of string keys makes
/// an unknown field a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Facet(Facet),
    PriceRange,
    Flag(Flag),
    SortBy,
}

impl From<Facet> for FilterField {
    fn from(f: Facet) -> Self {
        FilterField::Facet(f)
    }
}

impl From<Flag> for FilterField {
    fn from(f: Flag) -> Self {
        FilterField::Flag(f)
    }
}

/// The shopper's current constraints.
///
/// Set fields use "empty = unconstrained" semantics and are `BTreeSet`s, so
/// selection order never matters and duplicates collapse. The price range is
/// inclusive and always applied. Values are replaced wholesale by the
/// mutation functions; nothing patches a state in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub categories: BTreeSet<String>,
    pub subcategories: BTreeSet<String>,
    pub price_range: PriceRange,
    pub colours: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub fit: BTreeSet<String>,
    pub material: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub is_premium: bool,
    pub is_eco_friendly: bool,
    pub in_stock: bool,
    pub employee_pricing_only: bool,
    pub sort_by: SortBy,
}

impl ValueObject for FilterState {}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_price_bounds(PriceRange::default())
    }
}

impl FilterState {
    /// The all-default state for a catalog: no constraints, full price range.
    pub fn defaults(facets: &FacetConfig) -> Self {
        Self::with_price_bounds(facets.price_bounds())
    }

    fn with_price_bounds(price_range: PriceRange) -> Self {
        Self {
            categories: BTreeSet::new(),
            subcategories: BTreeSet::new(),
            price_range,
            colours: BTreeSet::new(),
            sizes: BTreeSet::new(),
            fit: BTreeSet::new(),
            material: BTreeSet::new(),
            brands: BTreeSet::new(),
            is_premium: false,
            is_eco_friendly: false,
            in_stock: false,
            employee_pricing_only: false,
            sort_by: SortBy::Featured,
        }
    }

    pub fn facet(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Categories => &self.categories,
            Facet::Subcategories => &self.subcategories,
            Facet::Colours => &self.colours,
            Facet::Sizes => &self.sizes,
            Facet::Fit => &self.fit,
            Facet::Material => &self.material,
            Facet::Brands => &self.brands,
        }
    }

    pub(crate) fn facet_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Categories => &mut self.categories,
            Facet::Subcategories => &mut self.subcategories,
            Facet::Colours => &mut self.colours,
            Facet::Sizes => &mut self.sizes,
            Facet::Fit => &mut self.fit,
            Facet::Material => &mut self.material,
            Facet::Brands => &mut self.brands,
        }
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Premium => self.is_premium,
            Flag::EcoFriendly => self.is_eco_friendly,
            Flag::InStock => self.in_stock,
            Flag::EmployeePricing => self.employee_pricing_only,
        }
    }

    pub(crate) fn set_flag(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::Premium => self.is_premium = on,
            Flag::EcoFriendly => self.is_eco_friendly = on,
            Flag::InStock => self.in_stock = on,
            Flag::EmployeePricing => self.employee_pricing_only = on,
        }
    }

    /// Every field, sort included, equals its default.
    pub fn is_default(&self, facets: &FacetConfig) -> bool {
        *self == Self::defaults(facets)
    }

    /// No constraint is active. Sort order is not a constraint.
    pub fn is_unfiltered(&self, facets: &FacetConfig) -> bool {
        Self {
            sort_by: SortBy::Featured,
            ..self.clone()
        }
        .is_default(facets)
    }

    /// Whether every product `self` admits is also admitted by `wider`.
    ///
    /// A non-empty selection is narrower than an empty one (unconstrained) and
    /// narrower than any superset selection; a set flag is narrower than an
    /// unset one; a contained price range is narrower than its container.
    pub fn is_narrower_than(&self, wider: &FilterState) -> bool {
        let facets_narrower = Facet::ALL.iter().all(|&f| {
            let (mine, theirs) = (self.facet(f), wider.facet(f));
            theirs.is_empty() || (!mine.is_empty() && mine.is_subset(theirs))
        });
        let flags_narrower = Flag::ALL.iter().all(|&f| !wider.flag(f) || self.flag(f));
        facets_narrower && flags_narrower && self.price_range.is_within(&wider.price_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn defaults_follow_facet_bounds() {
        let facets = FacetConfig {
            price_range: PriceRange::new(10, 250),
            ..Default::default()
        };
        let state = FilterState::defaults(&facets);
        assert_eq!(state.price_range, PriceRange::new(10, 250));
        assert_eq!(state.sort_by, SortBy::Featured);
        assert!(state.is_default(&facets));
        assert_eq!(FilterState::default().price_range, PriceRange::new(0, 500));
    }

    #[test]
    fn sort_alone_is_not_a_constraint() {
        let facets = FacetConfig::default();
        let state = FilterState {
            sort_by: SortBy::Newest,
            ..FilterState::defaults(&facets)
        };
        assert!(!state.is_default(&facets));
        assert!(state.is_unfiltered(&facets));
    }

    #[test]
    fn set_equality_ignores_selection_order() {
        let mut a = FilterState::default();
        a.facet_mut(Facet::Colours).insert("Navy".into());
        a.facet_mut(Facet::Colours).insert("Black".into());
        let mut b = FilterState::default();
        b.facet_mut(Facet::Colours).insert("Black".into());
        b.facet_mut(Facet::Colours).insert("Navy".into());
        b.facet_mut(Facet::Colours).insert("Navy".into());
        assert_eq!(a, b);
    }

    #[test]
    fn narrower_relation() {
        let wide = FilterState {
            colours: set(&["Navy", "Red"]),
            ..FilterState::default()
        };
        let narrow = FilterState {
            colours: set(&["Navy"]),
            is_premium: true,
            price_range: PriceRange::new(30, 100),
            ..FilterState::default()
        };
        assert!(narrow.is_narrower_than(&wide));
        assert!(!wide.is_narrower_than(&narrow));
        assert!(narrow.is_narrower_than(&FilterState::default()));
        // Clearing a selection widens the view.
        assert!(!FilterState::default().is_narrower_than(&wide));
    }

    #[test]
    fn flags_round_trip_through_accessors() {
        let mut s = FilterState::default();
        for flag in Flag::ALL {
            assert!(!s.flag(flag));
            s.set_flag(flag, true);
            assert!(s.flag(flag));
        }
        assert!(s.employee_pricing_only);
    }
}
