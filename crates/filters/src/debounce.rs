//! Coalescing of rapid price-slider input.
//!
//! While the shopper drags, only the last value of a burst is committed: each
//! input restarts the quiet period, and a value is handed out once the window
//! has elapsed without further input. Time is passed in explicitly so hosts
//! drive it from their own clock or timer.

use chrono::{DateTime, Duration, Utc};

use storefront_catalog::PriceRange;

/// Uncommitted slider bounds.
///
/// Moving the minimum clamps it to `[bounds.min, max - 1]` and moving the
/// maximum clamps it to `[min + 1, bounds.max]`, so the two thumbs never
/// cross. When the bounds span a single value the draft is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDraft {
    bounds: PriceRange,
    value: PriceRange,
}

impl PriceDraft {
    pub fn new(bounds: PriceRange, committed: PriceRange) -> Self {
        Self {
            bounds,
            value: committed.clamped_to(&bounds),
        }
    }

    pub fn set_min(&mut self, min: u32) -> PriceRange {
        let upper = self.value.max.saturating_sub(1).max(self.bounds.min);
        self.value.min = min.clamp(self.bounds.min, upper);
        self.value
    }

    pub fn set_max(&mut self, max: u32) -> PriceRange {
        let lower = self.value.min.saturating_add(1).min(self.bounds.max);
        self.value.max = max.clamp(lower, self.bounds.max);
        self.value
    }

    pub fn value(&self) -> PriceRange {
        self.value
    }

    /// Follow an externally committed range (URL change, chip removal).
    pub fn sync(&mut self, committed: PriceRange) {
        self.value = committed.clamped_to(&self.bounds);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDebouncer {
    window: Duration,
    pending: Option<(PriceRange, DateTime<Utc>)>,
}

impl PriceDebouncer {
    pub fn new(window: std::time::Duration) -> Self {
        Self {
            window: Duration::from_std(window).unwrap_or(Duration::milliseconds(300)),
            pending: None,
        }
    }

    /// Record an input, replacing any pending value and restarting the window.
    pub fn input(&mut self, range: PriceRange, now: DateTime<Utc>) {
        self.pending = Some((range, now + self.window));
    }

    /// The value to commit, exactly once, when the quiet period has elapsed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<PriceRange> {
        match self.pending {
            Some((range, deadline)) if now >= deadline => {
                self.pending = None;
                Some(range)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<PriceRange> {
        self.pending.map(|(range, _)| range)
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.map(|(_, deadline)| deadline)
    }
}

impl Default for PriceDebouncer {
    fn default() -> Self {
        Self::new(std::time::Duration::from_millis(300))
    }
}
