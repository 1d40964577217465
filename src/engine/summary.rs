//! Aggregate statistics over a reconciliation run

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{MatchResult, MatchType};

/// Summary statistics computed from a [`MatchResult`]
///
/// This is what a forensic dashboard consumes: totals per side, residual
/// counts, and the share of bank records that found independent proof in the
/// books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Bank-side input size
    pub bank_total: usize,
    /// Book-side input size
    pub book_total: usize,
    /// Number of accepted matches
    pub matched: usize,
    /// Bank records left unmatched
    pub unmatched_bank: usize,
    /// Book records left unmatched
    pub unmatched_book: usize,
    /// Matched share of the bank side, as a percentage rounded to two
    /// decimals; 0.0 when the bank side is empty
    pub match_rate_percent: f64,
    /// Accepted matches broken down by match type
    pub matches_by_type: HashMap<MatchType, usize>,
}

impl ReconciliationSummary {
    /// Compute summary statistics from a match result
    pub fn from_result(result: &MatchResult) -> Self {
        let bank_total = result.bank_total();
        let matched = result.match_count();

        let match_rate_percent = if bank_total > 0 {
            let rate = matched as f64 / bank_total as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        let mut matches_by_type: HashMap<MatchType, usize> = HashMap::new();
        for candidate in &result.matches {
            *matches_by_type.entry(candidate.match_type).or_default() += 1;
        }

        Self {
            bank_total,
            book_total: result.book_total(),
            matched,
            unmatched_bank: result.unmatched_bank.len(),
            unmatched_book: result.unmatched_book.len(),
            match_rate_percent,
            matches_by_type,
        }
    }
}
