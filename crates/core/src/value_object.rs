//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Money amounts, price ranges and the shopper's filter
//! state are all value objects.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. The filter state follows this rule: every mutation returns
/// a fresh state and leaves its input untouched.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (two values with the same fields are equal)
/// - **Entity**: has identity (two products with the same id are the same product)
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceRange { min: u32, max: u32 }
///
/// impl ValueObject for PriceRange {}
///
/// assert_eq!(PriceRange { min: 0, max: 500 }, PriceRange { min: 0, max: 500 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
