//! Filter state ⇄ query string.
//!
//! `decode` is total: unknown facet values are dropped, non-numeric prices
//! fall back to the facet bounds, inverted bounds are swapped, and anything
//! but a literal `true` is false. `encode` is minimal: fields equal to their
//! default are omitted, so an unconstrained view encodes to an empty string.

use std::collections::BTreeSet;

use storefront_catalog::{Facet, FacetConfig, PriceRange};

use crate::query::QueryParams;
use crate::sort::SortBy;
use crate::state::{FilterState, Flag};

pub const MIN_PRICE: &str = "minPrice";
pub const MAX_PRICE: &str = "maxPrice";
pub const SORT: &str = "sort";

/// Query parameter carrying a facet's selection.
pub fn facet_param(facet: Facet) -> &'static str {
    match facet {
        Facet::Categories => "categories",
        Facet::Subcategories => "subcategories",
        Facet::Colours => "colours",
        Facet::Sizes => "sizes",
        Facet::Fit => "fit",
        Facet::Material => "material",
        Facet::Brands => "brands",
    }
}

/// Query parameter carrying a boolean flag.
pub fn flag_param(flag: Flag) -> &'static str {
    match flag {
        Flag::Premium => "premium",
        Flag::EcoFriendly => "eco",
        Flag::InStock => "inStock",
        Flag::EmployeePricing => "employee",
    }
}

/// Parameter order of the canonical encoding; price sits after subcategories.
const FACETS_BEFORE_PRICE: [Facet; 2] = [Facet::Categories, Facet::Subcategories];
const FACETS_AFTER_PRICE: [Facet; 5] = [Facet::Colours, Facet::Sizes, Facet::Fit, Facet::Material, Facet::Brands];

pub fn decode(params: &QueryParams, facets: &FacetConfig) -> FilterState {
    let mut state = FilterState::defaults(facets);

    for facet in Facet::ALL {
        let requested = params.get_list(facet_param(facet));
        let total = requested.len();
        let selected: BTreeSet<String> = requested
            .into_iter()
            .filter(|v| facets.allows(facet, v))
            .collect();
        if selected.len() < total {
            tracing::debug!(facet = %facet, requested = total, kept = selected.len(), "dropped unknown or duplicate facet values");
        }
        *state.facet_mut(facet) = selected;
    }

    state.price_range = decode_price(params, facets.price_bounds());

    for flag in Flag::ALL {
        let on = params.get(flag_param(flag)).is_some_and(|v| v == "true");
        state.set_flag(flag, on);
    }

    state.sort_by = match params.get(SORT) {
        None => SortBy::Featured,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "falling back to featured sort");
            SortBy::Featured
        }),
    };

    state
}

/// Parse and decode in one step.
pub fn decode_str(query: &str, facets: &FacetConfig) -> FilterState {
    decode(&QueryParams::parse(query), facets)
}

fn decode_price(params: &QueryParams, bounds: PriceRange) -> PriceRange {
    let bound = |key: &str, fallback: u32| -> u32 {
        match params.get(key) {
            None => fallback,
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                tracing::debug!(param = key, value = %raw, "non-numeric price bound, using facet default");
                fallback
            }),
        }
    };
    let (min, max) = (bound(MIN_PRICE, bounds.min), bound(MAX_PRICE, bounds.max));
    if min > max {
        tracing::debug!(min, max, "swapping inverted price bounds");
    }
    PriceRange { min, max }.clamped_to(&bounds)
}

pub fn encode(state: &FilterState, facets: &FacetConfig) -> QueryParams {
    let mut params = QueryParams::new();
    let bounds = facets.price_bounds();

    for facet in FACETS_BEFORE_PRICE {
        push_facet(&mut params, state, facet);
    }
    if state.price_range.min != bounds.min {
        params.push(MIN_PRICE, &state.price_range.min.to_string());
    }
    if state.price_range.max != bounds.max {
        params.push(MAX_PRICE, &state.price_range.max.to_string());
    }
    for facet in FACETS_AFTER_PRICE {
        push_facet(&mut params, state, facet);
    }
    for flag in Flag::ALL {
        if state.flag(flag) {
            params.push(flag_param(flag), "true");
        }
    }
    if state.sort_by != SortBy::Featured {
        params.push(SORT, state.sort_by.as_str());
    }

    params
}

/// Encode and render in one step.
pub fn encode_string(state: &FilterState, facets: &FacetConfig) -> String {
    encode(state, facets).to_query_string()
}

fn push_facet(params: &mut QueryParams, state: &FilterState, facet: Facet) {
    let values = state.facet(facet);
    if !values.is_empty() {
        params.push_list(facet_param(facet), values);
    }
}
