//! `storefront-core`: domain building blocks shared by the catalog and the listing engine.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use money::{Currency, Money};
pub use value_object::ValueObject;
