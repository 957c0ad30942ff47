//! Lowering a filter state to product predicates.

use std::collections::BTreeSet;

use storefront_catalog::{PriceRange, Product};

use crate::state::{FilterState, Flag};

/// One active constraint. Set-valued predicates borrow their selection from
/// the state they were compiled from.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<'s> {
    Category(&'s BTreeSet<String>),
    Subcategory(&'s BTreeSet<String>),
    Price(PriceRange),
    /// Any of the product's colours is selected.
    Colours(&'s BTreeSet<String>),
    /// Any of the product's sizes is selected.
    Sizes(&'s BTreeSet<String>),
    Fit(&'s BTreeSet<String>),
    Material(&'s BTreeSet<String>),
    Brand(&'s BTreeSet<String>),
    Flag(Flag),
}

impl Predicate<'_> {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Predicate::Category(set) => set.contains(product.category()),
            Predicate::Subcategory(set) => set.contains(product.subcategory()),
            Predicate::Price(range) => range.contains(product.price()),
            Predicate::Colours(set) => overlaps(set, product.colours()),
            Predicate::Sizes(set) => overlaps(set, product.sizes()),
            Predicate::Fit(set) => set.contains(product.fit().code()),
            Predicate::Material(set) => set.contains(product.material()),
            Predicate::Brand(set) => set.contains(product.brand()),
            Predicate::Flag(flag) => match flag {
                Flag::Premium => product.is_premium(),
                Flag::EcoFriendly => product.is_eco_friendly(),
                Flag::InStock => product.in_stock(),
                Flag::EmployeePricing => true,
            },
        }
    }
}

fn overlaps(selected: &BTreeSet<String>, values: &[String]) -> bool {
    values.iter().any(|v| selected.contains(v))
}

/// The active predicates of `state`. Empty sets and false flags contribute
/// nothing; the price range is always present. Employee pricing is a pricing
/// concern and never becomes a predicate.
pub fn compile(state: &FilterState) -> Vec<Predicate<'_>> {
    let mut predicates = Vec::new();
    if !state.categories.is_empty() {
        predicates.push(Predicate::Category(&state.categories));
    }
    if !state.subcategories.is_empty() {
        predicates.push(Predicate::Subcategory(&state.subcategories));
    }
    predicates.push(Predicate::Price(state.price_range));
    if !state.colours.is_empty() {
        predicates.push(Predicate::Colours(&state.colours));
    }
    if !state.sizes.is_empty() {
        predicates.push(Predicate::Sizes(&state.sizes));
    }
    if !state.fit.is_empty() {
        predicates.push(Predicate::Fit(&state.fit));
    }
    if !state.material.is_empty() {
        predicates.push(Predicate::Material(&state.material));
    }
    if !state.brands.is_empty() {
        predicates.push(Predicate::Brand(&state.brands));
    }
    predicates.extend(
        [Flag::Premium, Flag::EcoFriendly, Flag::InStock]
            .into_iter()
            .filter(|&f| state.flag(f))
            .map(Predicate::Flag),
    );
    predicates
}

/// Products admitted by every active predicate, in catalog order.
pub fn apply<'p>(products: &'p [Product], state: &FilterState) -> Vec<&'p Product> {
    let predicates = compile(state);
    products
        .iter()
        .filter(|p| predicates.iter().all(|pred| pred.matches(p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::{Fit, ProductRecord};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn catalog() -> Vec<Product> {
        let rec = |id: &str, price: f64, colours: &[&str], fit: Fit, premium: bool| ProductRecord {
            id: id.to_string(),
            name: id.to_string(),
            price,
            category: "apparel".to_string(),
            subcategory: "tshirts".to_string(),
            brand: "Gil-Son".to_string(),
            fit,
            material: "Cotton".to_string(),
            colours: colours.iter().map(|c| c.to_string()).collect(),
            sizes: vec!["M".to_string()],
            is_premium: premium,
            in_stock: true,
            ..Default::default()
        };
        [
            rec("p1", 20.0, &["Navy"], Fit::Mens, false),
            rec("p2", 80.0, &["Black"], Fit::Womens, false),
            rec("p3", 50.0, &["Navy", "Black"], Fit::Unisex, true),
        ]
        .into_iter()
        .map(|r| r.try_into().unwrap())
        .collect()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.slug().to_string()).collect()
    }

    #[test]
    fn default_state_admits_everything_in_order() {
        let products = catalog();
        assert_eq!(ids(&apply(&products, &FilterState::default())), ["p1", "p2", "p3"]);
    }

    #[test]
    fn compile_emits_only_active_predicates() {
        let state = FilterState {
            colours: set(&["Navy"]),
            in_stock: true,
            employee_pricing_only: true,
            ..FilterState::default()
        };
        let predicates = compile(&state);
        assert_eq!(predicates.len(), 3);
        assert!(matches!(predicates[0], Predicate::Price(_)));
        assert!(matches!(predicates[1], Predicate::Colours(_)));
        assert_eq!(predicates[2], Predicate::Flag(Flag::InStock));
    }

    #[test]
    fn colour_overlap_and_price_bounds_are_inclusive() {
        let products = catalog();
        let state = FilterState {
            colours: set(&["Navy", "Red"]),
            price_range: PriceRange::new(20, 50),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&products, &state)), ["p1", "p3"]);
    }

    #[test]
    fn fit_matches_codes_and_flags_only_when_set() {
        let products = catalog();
        let state = FilterState {
            fit: set(&["mens", "unisex"]),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&products, &state)), ["p1", "p3"]);
        let premium = FilterState { is_premium: true, ..state };
        assert_eq!(ids(&apply(&products, &premium)), ["p3"]);
    }

    #[test]
    fn unmatched_value_yields_empty_listing() {
        let products = catalog();
        let state = FilterState {
            brands: set(&["YETI"]),
            ..FilterState::default()
        };
        assert!(apply(&products, &state).is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: adding a constraint never grows the result.
            #[test]
            fn extra_constraint_never_grows_result(
                min in 0u32..100,
                span in 0u32..100,
                colour in prop::sample::select(vec!["Navy", "Black", "Red"]),
                premium in any::<bool>(),
            ) {
                let products = catalog();
                let base = FilterState {
                    price_range: PriceRange::new(min, min + span),
                    ..FilterState::default()
                };
                let narrowed = FilterState {
                    colours: set(&[colour]),
                    is_premium: premium,
                    ..base.clone()
                };
                let wide = apply(&products, &base);
                let narrow = apply(&products, &narrowed);
                prop_assert!(narrow.iter().all(|p| wide.iter().any(|w| w.slug() == p.slug())));
            }
        }
    }
}
