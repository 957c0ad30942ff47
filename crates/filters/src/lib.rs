//! Faceted filtering and sorting engine for catalog listings.
//!
//! The shopper's constraints live in a single immutable [`FilterState`]. The
//! query string is its durable form ([`codec`]), the [`predicate`] engine and
//! [`sort`] registry reduce the catalog to a listing, [`chips`] describes the
//! active constraints, and [`mutation`] is the only way a state changes.
//! Everything here is synchronous and infallible: malformed input is
//! normalised, never rejected.

pub mod chips;
pub mod codec;
pub mod config;
pub mod debounce;
pub mod mutation;
pub mod predicate;
pub mod query;
pub mod session;
pub mod sort;
pub mod state;

pub use chips::{has_active_filters, project, project_with_symbol, Chip};
pub use codec::{decode, decode_str, encode, encode_string};
pub use config::EngineConfig;
pub use debounce::{PriceDebouncer, PriceDraft};
pub use mutation::{clear_all, remove_value, set_field, toggle_value, FieldValue, FilterMutation};
pub use predicate::{apply, compile, Predicate};
pub use query::QueryParams;
pub use session::{listing, InMemoryLocation, ListingSession, ListingView, QuerySink};
pub use sort::{comparator, sort_products, SortBy};
pub use state::{FilterField, FilterState, Flag};

pub use storefront_catalog::{Facet, FacetConfig, PriceRange, Product};
