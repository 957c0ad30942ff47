//! Engine configuration from the environment.

use std::time::Duration;

pub const PRICE_DEBOUNCE_ENV: &str = "STOREFRONT_PRICE_DEBOUNCE_MS";
pub const CURRENCY_SYMBOL_ENV: &str = "STOREFRONT_CURRENCY_SYMBOL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Quiet period before a dragged price range is committed.
    pub price_debounce: Duration,
    /// Prefix for price chip labels.
    pub currency_symbol: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            price_debounce: Duration::from_millis(300),
            currency_symbol: "$".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys use the defaults; invalid values
    /// are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(PRICE_DEBOUNCE_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.price_debounce = Duration::from_millis(ms),
                Err(_) => tracing::warn!(
                    value = %raw,
                    "{PRICE_DEBOUNCE_ENV} is not a whole number of milliseconds; using 300"
                ),
            }
        }

        if let Some(raw) = lookup(CURRENCY_SYMBOL_ENV) {
            if raw.trim().is_empty() {
                tracing::warn!("{CURRENCY_SYMBOL_ENV} is empty; using \"$\"");
            } else {
                config.currency_symbol = raw;
            }
        }

        config
    }
}
