//! A listing page visit: URL in, mutations through, URL and view out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_catalog::{FacetConfig, PriceRange, Product};

use crate::chips::{has_active_filters, project_with_symbol, Chip};
use crate::codec::{decode_str, encode_string};
use crate::config::EngineConfig;
use crate::debounce::{PriceDebouncer, PriceDraft};
use crate::mutation::{set_field, FieldValue, FilterMutation};
use crate::predicate::apply;
use crate::sort::sort_products;
use crate::state::FilterState;

/// Where the encoded filter state is written. Implementations replace the
/// current history entry; they never push a new one.
pub trait QuerySink {
    fn replace_query(&mut self, query: &str);
}

impl<S: QuerySink + ?Sized> QuerySink for &mut S {
    fn replace_query(&mut self, query: &str) {
        (**self).replace_query(query);
    }
}

/// A location held in memory, counting replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLocation {
    query: String,
    replacements: usize,
}

impl InMemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            replacements: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl QuerySink for InMemoryLocation {
    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.replacements += 1;
    }
}

/// Everything a listing page renders for one state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView<'a> {
    #[serde(skip)]
    pub products: Vec<&'a Product>,
    pub chips: Vec<Chip>,
    pub any_active: bool,
    pub result_count: usize,
    pub query: String,
}

impl ListingView<'_> {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Filter, sort and project in one pass.
pub fn listing<'p>(
    products: &'p [Product],
    state: &FilterState,
    facets: &FacetConfig,
    config: &EngineConfig,
) -> ListingView<'p> {
    let mut matched = apply(products, state);
    sort_products(&mut matched, state.sort_by);
    let chips = project_with_symbol(state, facets, &config.currency_symbol);
    ListingView {
        result_count: matched.len(),
        any_active: has_active_filters(&chips),
        products: matched,
        chips,
        query: encode_string(state, facets),
    }
}

pub struct ListingSession<S> {
    products: Arc<[Product]>,
    facets: FacetConfig,
    config: EngineConfig,
    state: FilterState,
    query: String,
    draft: PriceDraft,
    debouncer: PriceDebouncer,
    sink: S,
}

impl<S: QuerySink> ListingSession<S> {
    /// Decode `query` into the initial state. The sink is not written until
    /// the first mutation.
    pub fn open(products: Arc<[Product]>, facets: FacetConfig, query: &str, sink: S, config: EngineConfig) -> Self {
        let state = decode_str(query, &facets);
        let canonical = encode_string(&state, &facets);
        tracing::debug!(products = products.len(), query = %canonical, "listing session opened");
        Self {
            draft: PriceDraft::new(facets.price_bounds(), state.price_range),
            debouncer: PriceDebouncer::new(config.price_debounce),
            products,
            facets,
            config,
            state,
            query: canonical,
            sink,
        }
    }

    /// Apply a shopper intent. Any pending price input is dropped when the
    /// mutation resets or replaces the price range.
    pub fn dispatch(&mut self, mutation: FilterMutation) -> &FilterState {
        if mutation.targets_price() {
            self.debouncer.cancel();
        }
        let next = mutation.apply(&self.state, &self.facets);
        let resync = mutation.targets_price() || next.price_range != self.state.price_range;
        self.commit(next, resync);
        &self.state
    }

    /// Move the minimum thumb; the value is committed after the quiet period.
    pub fn drag_min(&mut self, min: u32, now: DateTime<Utc>) -> PriceRange {
        let range = self.draft.set_min(min);
        self.debouncer.input(range, now);
        range
    }

    /// Move the maximum thumb; the value is committed after the quiet period.
    pub fn drag_max(&mut self, max: u32, now: DateTime<Utc>) -> PriceRange {
        let range = self.draft.set_max(max);
        self.debouncer.input(range, now);
        range
    }

    /// Raw price input from a host that does its own thumb handling.
    pub fn price_input(&mut self, range: PriceRange, now: DateTime<Utc>) {
        self.debouncer.input(range.clamped_to(&self.facets.price_bounds()), now);
    }

    /// Commit pending price input whose quiet period has elapsed. Returns
    /// whether anything was committed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let Some(range) = self.debouncer.poll(now) else {
            return false;
        };
        let next = set_field(&self.state, &self.facets, FieldValue::PriceRange(range));
        self.commit(next, true);
        true
    }

    /// Install `next`. The slider draft follows the committed range only when
    /// the price was touched, so an in-flight drag survives other mutations.
    fn commit(&mut self, next: FilterState, resync_draft: bool) {
        if resync_draft {
            self.draft.sync(next.price_range);
        }
        self.state = next;
        let query = encode_string(&self.state, &self.facets);
        if query != self.query {
            tracing::info!(query = %query, "filter state committed");
            self.sink.replace_query(&query);
            self.query = query;
        }
    }

    pub fn view(&self) -> ListingView<'_> {
        listing(&self.products, &self.state, &self.facets, &self.config)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// The canonical encoding of the current state.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn draft(&self) -> PriceRange {
        self.draft.value()
    }

    pub fn pending_price(&self) -> Option<PriceRange> {
        self.debouncer.pending()
    }

    pub fn facets(&self) -> &FacetConfig {
        &self.facets
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
