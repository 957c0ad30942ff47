//! Active-filter chips: one removable entry per active constraint.

use serde::Serialize;

use storefront_catalog::{Facet, FacetConfig, Fit};

use crate::state::{FilterField, FilterState, Flag};

/// A removable summary of one active constraint. Derived, never stored.
///
/// `value` names the member to remove for set fields and is `None` for the
/// price range and flags, which are removed as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub field: FilterField,
    pub label: String,
    pub value: Option<String>,
}

impl Chip {
    fn member(facet: Facet, value: &str, label: String) -> Self {
        Self {
            field: FilterField::Facet(facet),
            label,
            value: Some(value.to_string()),
        }
    }

    fn whole(field: FilterField, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
            value: None,
        }
    }
}

/// Chips in display order, prices shown with a `$` symbol.
pub fn project(state: &FilterState, facets: &FacetConfig) -> Vec<Chip> {
    project_with_symbol(state, facets, "$")
}

pub fn project_with_symbol(state: &FilterState, facets: &FacetConfig, symbol: &str) -> Vec<Chip> {
    let mut chips = Vec::new();

    for facet in [Facet::Categories, Facet::Subcategories] {
        push_members(&mut chips, state, facet);
    }

    let (range, bounds) = (state.price_range, facets.price_bounds());
    if range != bounds {
        chips.push(Chip::whole(
            FilterField::PriceRange,
            format!("{symbol}{} - {symbol}{}", range.min, range.max),
        ));
    }

    for facet in [Facet::Colours, Facet::Sizes, Facet::Fit, Facet::Material, Facet::Brands] {
        push_members(&mut chips, state, facet);
    }

    chips.extend(
        Flag::ALL
            .into_iter()
            .filter(|&f| state.flag(f))
            .map(|f| Chip::whole(FilterField::Flag(f), f.label())),
    );
    chips
}

fn push_members(chips: &mut Vec<Chip>, state: &FilterState, facet: Facet) {
    for value in state.facet(facet) {
        chips.push(Chip::member(facet, value, member_label(facet, value)));
    }
}

fn member_label(facet: Facet, value: &str) -> String {
    match facet {
        Facet::Sizes => format!("Size: {value}"),
        Facet::Fit => Fit::from_code(value).map_or_else(|| value.to_string(), |fit| fit.label().to_string()),
        _ => value.to_string(),
    }
}

pub fn has_active_filters(chips: &[Chip]) -> bool {
    !chips.is_empty()
}
