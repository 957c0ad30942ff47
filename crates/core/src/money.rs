//! Currency-tagged money amounts.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// ISO currency codes the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Cad,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Usd => "USD",
        }
    }
}

/// A non-negative amount in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor: u64,
    currency: Currency,
}

impl ValueObject for Money {}

impl Money {
    pub fn new(minor: u64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Whole currency units, e.g. `Money::from_major(25, Cad)` is $25.00.
    pub fn from_major(major: u32, currency: Currency) -> Self {
        Self::new(u64::from(major) * 100, currency)
    }

    /// Convert a decimal price (as catalogs publish them, e.g. `24.99`) to
    /// cents, rounding half away from zero.
    pub fn from_decimal(amount: f64, currency: Currency) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation(format!("price is not finite: {amount}")));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(format!("price is negative: {amount}")));
        }
        let minor = (amount * 100.0).round();
        if minor > u64::MAX as f64 {
            return Err(DomainError::validation(format!("price out of range: {amount}")));
        }
        Ok(Self::new(minor as u64, currency))
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Smallest whole unit not below this amount (`24.01` → `25`).
    pub fn ceil_major(&self) -> u64 {
        self.minor.div_ceil(100)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02} {}", self.minor / 100, self.minor % 100, self.currency.code())
    }
}
