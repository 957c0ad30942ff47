//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product.
///
/// Catalog ids are opaque strings supplied by the catalog collaborator
/// (e.g. `"hoodie-classic-navy"`). They must be non-empty and free of
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_id(format!("ProductId: contains whitespace: {s:?}")));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_slug() {
        let id: ProductId = "tee-classic-black".parse().unwrap();
        assert_eq!(id.as_str(), "tee-classic-black");
        assert_eq!(id.to_string(), "tee-classic-black");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!("".parse::<ProductId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("a b".parse::<ProductId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn deserializes_through_validation() {
        let id: ProductId = serde_json::from_str("\"cap-01\"").unwrap();
        assert_eq!(id.as_str(), "cap-01");
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }
}
