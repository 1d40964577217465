//! Tuning parameters for the reconciliation engine

use serde::{Deserialize, Serialize};

use crate::types::{ReconcileError, ReconcileResult};

/// Default tolerance window for date-slippage matching, in days
pub const DEFAULT_DATE_SLIPPAGE_DAYS: i64 = 5;

/// Default similarity threshold for fuzzy description matching
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Configuration for a reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How many days a book entry may trail or lead its bank clearing date
    /// and still be considered the same transaction (inclusive, either
    /// direction)
    pub date_slippage_days: i64,
    /// Minimum normalized description similarity in [0, 1] for the fuzzy
    /// pass to accept a candidate
    pub fuzzy_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            date_slippage_days: DEFAULT_DATE_SLIPPAGE_DAYS,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with explicit values
    pub fn new(date_slippage_days: i64, fuzzy_threshold: f64) -> Self {
        Self {
            date_slippage_days,
            fuzzy_threshold,
        }
    }

    /// Validate the configuration
    ///
    /// Rejected before any matching begins, so a bad configuration never
    /// produces a partial result.
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.date_slippage_days < 0 {
            return Err(ReconcileError::InvalidConfiguration(format!(
                "date_slippage_days cannot be negative: {}",
                self.date_slippage_days
            )));
        }

        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ReconcileError::InvalidConfiguration(format!(
                "fuzzy_threshold must be within [0, 1]: {}",
                self.fuzzy_threshold
            )));
        }

        Ok(())
    }
}
