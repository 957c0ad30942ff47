//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog products are entities: two products with the same id are the same
/// product even if a later catalog load changes their price.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
