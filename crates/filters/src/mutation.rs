//! Shopper intents as pure state transitions.
//!
//! Every operation takes the current state and returns a new one; callers
//! never patch a `FilterState` field by field. Results always satisfy the
//! state invariants: set fields hold only legal facet values and the price
//! range is ordered and inside the facet bounds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_catalog::{Facet, FacetConfig, PriceRange};

use crate::sort::SortBy;
use crate::state::{FilterField, FilterState, Flag};

/// A whole-field replacement value, tagged by the field it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    Facet(Facet, BTreeSet<String>),
    PriceRange(PriceRange),
    Flag(Flag, bool),
    SortBy(SortBy),
}

impl FieldValue {
    pub fn field(&self) -> FilterField {
        match self {
            FieldValue::Facet(f, _) => FilterField::Facet(*f),
            FieldValue::PriceRange(_) => FilterField::PriceRange,
            FieldValue::Flag(f, _) => FilterField::Flag(*f),
            FieldValue::SortBy(_) => FilterField::SortBy,
        }
    }
}

/// Replace exactly one field. Illegal facet values are dropped and the price
/// range is normalised into the facet bounds.
pub fn set_field(state: &FilterState, facets: &FacetConfig, value: FieldValue) -> FilterState {
    let mut next = state.clone();
    match value {
        FieldValue::Facet(facet, values) => {
            *next.facet_mut(facet) = values.into_iter().filter(|v| facets.allows(facet, v)).collect();
        }
        FieldValue::PriceRange(range) => {
            next.price_range = range.clamped_to(&facets.price_bounds());
        }
        FieldValue::Flag(flag, on) => next.set_flag(flag, on),
        FieldValue::SortBy(mode) => next.sort_by = mode,
    }
    next
}

/// Remove one member of a set field, or reset a field to its default.
///
/// For set fields `None` clears the whole selection. Price resets to the
/// facet bounds, flags to false and sort to featured. Removing something
/// absent returns an equal state.
pub fn remove_value(state: &FilterState, facets: &FacetConfig, field: FilterField, value: Option<&str>) -> FilterState {
    let mut next = state.clone();
    match field {
        FilterField::Facet(facet) => match value {
            Some(v) => {
                next.facet_mut(facet).remove(v);
            }
            None => next.facet_mut(facet).clear(),
        },
        FilterField::PriceRange => next.price_range = facets.price_bounds(),
        FilterField::Flag(flag) => next.set_flag(flag, false),
        FilterField::SortBy => next.sort_by = SortBy::Featured,
    }
    next
}

/// Checkbox/swatch toggle: remove when selected, add when absent and legal.
pub fn toggle_value(state: &FilterState, facets: &FacetConfig, facet: Facet, value: &str) -> FilterState {
    if state.facet(facet).contains(value) {
        return remove_value(state, facets, FilterField::Facet(facet), Some(value));
    }
    let mut next = state.clone();
    if facets.allows(facet, value) {
        next.facet_mut(facet).insert(value.to_string());
    }
    next
}

/// Every field back to its default, sort included.
pub fn clear_all(_state: &FilterState, facets: &FacetConfig) -> FilterState {
    FilterState::defaults(facets)
}

/// A shopper intent, dispatched against the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterMutation {
    Set { value: FieldValue },
    Remove { field: FilterField, value: Option<String> },
    Toggle { facet: Facet, value: String },
    ClearAll,
}

impl FilterMutation {
    pub fn set(value: FieldValue) -> Self {
        FilterMutation::Set { value }
    }

    pub fn remove(field: impl Into<FilterField>, value: Option<&str>) -> Self {
        FilterMutation::Remove {
            field: field.into(),
            value: value.map(str::to_string),
        }
    }

    pub fn toggle(facet: Facet, value: impl Into<String>) -> Self {
        FilterMutation::Toggle {
            facet,
            value: value.into(),
        }
    }

    pub fn apply(&self, state: &FilterState, facets: &FacetConfig) -> FilterState {
        tracing::debug!(mutation = ?self, "applying filter mutation");
        match self {
            FilterMutation::Set { value } => set_field(state, facets, value.clone()),
            FilterMutation::Remove { field, value } => remove_value(state, facets, *field, value.as_deref()),
            FilterMutation::Toggle { facet, value } => toggle_value(state, facets, *facet, value),
            FilterMutation::ClearAll => clear_all(state, facets),
        }
    }

    /// Whether this mutation touches the price range.
    pub fn targets_price(&self) -> bool {
        match self {
            FilterMutation::Set { value } => value.field() == FilterField::PriceRange,
            FilterMutation::Remove { field, .. } => *field == FilterField::PriceRange,
            FilterMutation::Toggle { .. } => false,
            FilterMutation::ClearAll => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::{ColourOption, FacetOption};

    fn facets() -> FacetConfig {
        FacetConfig {
            colours: ["Navy", "Black", "Red"]
                .iter()
                .map(|c| ColourOption { name: c.to_string(), hex: None, count: 0 })
                .collect(),
            sizes: ["S", "M", "L"].iter().map(|s| FacetOption::new(*s, *s, 0)).collect(),
            price_range: PriceRange::new(0, 200),
            ..Default::default()
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn set_field_replaces_one_field_and_drops_illegal_values() {
        let f = facets();
        let base = FilterState::defaults(&f);
        let next = set_field(&base, &f, FieldValue::Facet(Facet::Colours, set(&["Navy", "Plaid"])));
        assert_eq!(next.colours, set(&["Navy"]));
        assert_eq!(FilterState { colours: BTreeSet::new(), ..next }, base);
    }

    #[test]
    fn set_field_normalises_price() {
        let f = facets();
        let next = set_field(&FilterState::defaults(&f), &f, FieldValue::PriceRange(PriceRange { min: 900, max: 40 }));
        assert_eq!(next.price_range, PriceRange::new(40, 200));
    }

    #[test]
    fn remove_value_handles_members_and_whole_fields() {
        let f = facets();
        let state = FilterState {
            colours: set(&["Navy", "Black"]),
            price_range: PriceRange::new(10, 20),
            in_stock: true,
            sort_by: SortBy::Newest,
            ..FilterState::defaults(&f)
        };
        let next = remove_value(&state, &f, Facet::Colours.into(), Some("Navy"));
        assert_eq!(next.colours, set(&["Black"]));
        assert!(remove_value(&state, &f, Facet::Colours.into(), None).colours.is_empty());
        assert_eq!(remove_value(&state, &f, FilterField::PriceRange, None).price_range, f.price_bounds());
        assert!(!remove_value(&state, &f, Flag::InStock.into(), None).in_stock);
        assert_eq!(remove_value(&state, &f, FilterField::SortBy, None).sort_by, SortBy::Featured);
        // Absent member: no-op.
        assert_eq!(remove_value(&state, &f, Facet::Colours.into(), Some("Red")), state);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let f = facets();
        let base = FilterState::defaults(&f);
        let on = toggle_value(&base, &f, Facet::Sizes, "M");
        assert_eq!(on.sizes, set(&["M"]));
        assert_eq!(toggle_value(&on, &f, Facet::Sizes, "M"), base);
        assert_eq!(toggle_value(&base, &f, Facet::Sizes, "XXL"), base);
    }

    #[test]
    fn empty_values_cannot_be_selected() {
        let f = facets();
        let base = FilterState::defaults(&f);
        let toggled = toggle_value(&base, &f, Facet::Colours, "");
        assert_eq!(toggled, base);
        let selected = set_field(&base, &f, FieldValue::Facet(Facet::Colours, set(&["", "Navy"])));
        assert_eq!(selected.colours, set(&["Navy"]));
        assert_eq!(crate::codec::decode_str(&crate::codec::encode_string(&selected, &f), &f), selected);
    }

    #[test]
    fn clear_all_resets_everything() {
        let f = facets();
        let state = FilterState {
            sizes: set(&["S"]),
            is_premium: true,
            sort_by: SortBy::PriceHighLow,
            ..FilterState::defaults(&f)
        };
        assert!(clear_all(&state, &f).is_default(&f));
    }

    #[test]
    fn mutations_dispatch_and_report_price_targets() {
        let f = facets();
        let base = FilterState::defaults(&f);
        let next = FilterMutation::toggle(Facet::Colours, "Red").apply(&base, &f);
        assert_eq!(next.colours, set(&["Red"]));
        assert!(FilterMutation::remove(FilterField::PriceRange, None).targets_price());
        assert!(FilterMutation::ClearAll.targets_price());
        assert!(!FilterMutation::set(FieldValue::Flag(Flag::Premium, true)).targets_price());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_value() -> impl Strategy<Value = FieldValue> {
            prop_oneof![
                prop::collection::btree_set(prop::sample::select(vec!["Navy", "Black", "Red", "Plaid"]), 0..4)
                    .prop_map(|s| FieldValue::Facet(Facet::Colours, s.into_iter().map(String::from).collect())),
                (0u32..400, 0u32..400).prop_map(|(a, b)| FieldValue::PriceRange(PriceRange { min: a, max: b })),
                any::<bool>().prop_map(|on| FieldValue::Flag(Flag::EcoFriendly, on)),
                prop::sample::select(SortBy::ALL.to_vec()).prop_map(FieldValue::SortBy),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: applying the same set twice equals applying it once.
            #[test]
            fn set_field_is_idempotent(value in any_value()) {
                let f = facets();
                let once = set_field(&FilterState::defaults(&f), &f, value.clone());
                let twice = set_field(&once, &f, value);
                prop_assert_eq!(once, twice);
            }

            /// Property: removing an absent member changes nothing.
            #[test]
            fn removing_absent_member_is_noop(value in "[a-z]{1,6}") {
                let f = facets();
                let state = FilterState { colours: set(&["Navy"]), ..FilterState::defaults(&f) };
                prop_assume!(value != "Navy");
                prop_assert_eq!(remove_value(&state, &f, Facet::Colours.into(), Some(&value)), state);
            }
        }
    }
}
