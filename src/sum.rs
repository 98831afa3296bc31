//! Debounced summation of the selected cells.
//!
//! Computing the sum on every pointer move is wasteful, so a request only stores a
//! snapshot of the selected texts and arms a [`Debouncer`]. The quiet period runs
//! from the first request of a burst, so a long drag still gets a sum; the newest
//! snapshot wins when it is computed.

use std::time::Duration;

use crate::numfmt::{extract_number, format_grouped};
use crate::schedule::Debouncer;
use crate::types::SumState;

/// Default quiet period before the sum is recomputed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Sum of every text that contains a number. Texts without one are skipped.
pub fn sum_texts<I, S>(texts: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .filter_map(|t| extract_number(t.as_ref()))
        .sum()
}

/// Display form of a sum, e.g. `1,500.5`.
pub fn format_sum(value: f64) -> String {
    format_grouped(value)
}

#[derive(Debug, Clone)]
pub struct SumAggregator {
    debouncer: Debouncer,
    snapshot: Option<Vec<String>>,
    state: SumState,
}

impl Default for SumAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SumAggregator {
    pub fn new(quiet: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(quiet),
            snapshot: None,
            state: SumState::default(),
        }
    }

    /// Replace the pending snapshot. Starts the quiet period unless one is running.
    pub fn schedule_recompute(&mut self, now: Duration, texts: Vec<String>) {
        self.snapshot = Some(texts);
        if self.debouncer.request(now) {
            tracing::trace!(?now, "sum burst started");
        }
        self.state.pending = self.debouncer.is_pending();
    }

    /// Run the pending computation if its quiet period has passed.
    ///
    /// Returns the new state when a computation ran.
    pub fn poll(&mut self, now: Duration) -> Option<SumState> {
        if !self.debouncer.fire(now) {
            return None;
        }
        let texts = self.snapshot.take().unwrap_or_default();
        self.state = SumState {
            value: sum_texts(&texts),
            pending: false,
        };
        tracing::debug!(cells = texts.len(), sum = self.state.value, "recomputed sum");
        Some(self.state)
    }

    pub fn state(&self) -> SumState {
        self.state
    }

    /// Last computed sum, formatted.
    pub fn text(&self) -> String {
        format_sum(self.state.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_sum_texts_duck_types_numbers() {
        assert_eq!(sum_texts(["$1,200", "abc", "300.50"]), 1500.5);
        assert_eq!(sum_texts(["-5", "10 kg", "n/a", "1.2.3"]), 5.0);
        assert_eq!(sum_texts(Vec::<String>::new()), 0.0);
    }

    #[test]
    fn test_format_sum() {
        assert_eq!(format_sum(1500.5), "1,500.5");
        assert_eq!(format_sum(-1234.0), "-1,234");
    }

    #[test]
    fn test_newest_snapshot_wins() {
        let mut agg = SumAggregator::new(MS * 500);
        agg.schedule_recompute(Duration::ZERO, texts(&["1"]));
        agg.schedule_recompute(MS * 100, texts(&["2", "3"]));
        assert!(agg.state().pending);

        assert_eq!(agg.poll(MS * 499), None);
        let state = agg.poll(MS * 500).unwrap();
        assert_eq!(state.value, 5.0);
        assert!(!state.pending);
        assert_eq!(agg.text(), "5");
    }

    #[test]
    fn test_one_computation_per_burst() {
        let mut agg = SumAggregator::default();
        agg.schedule_recompute(Duration::ZERO, texts(&["7"]));
        assert!(agg.poll(MS * 500).is_some());
        assert!(agg.poll(MS * 1000).is_none());
        assert_eq!(agg.state().value, 7.0);
    }
}
