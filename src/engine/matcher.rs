//! Tiered greedy matching of bank-side records against book-side records

use crate::engine::config::EngineConfig;
use crate::engine::distance::description_similarity;
use crate::types::{MatchCandidate, MatchResult, MatchType, ReconcileResult, TransactionRecord};

/// Reconciliation engine
///
/// Runs three passes in strictly decreasing confidence order, so a weaker
/// pass never consumes a record a stronger pass could have matched:
///
/// 1. Exact: identical amount and identical date, confidence 1.0
/// 2. Date slippage: identical amount, dates within the configured window in
///    either direction, confidence falling linearly with day distance
/// 3. Fuzzy description: identical amount and description similarity at or
///    above the configured threshold, confidence equal to the similarity
///
/// Records are processed in identifier order regardless of how the caller
/// ordered the input, and ties always resolve to the lowest identifier, so
/// repeated runs over the same records produce identical results.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    config: EngineConfig,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration
    ///
    /// The configuration is validated on each [`reconcile`](Self::reconcile)
    /// call, not here.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Match bank-side records against book-side records
    ///
    /// Inputs are read-only; consumed records are tracked in parallel
    /// markers rather than removed. Empty inputs produce an all-residual
    /// result without error.
    pub fn reconcile(
        &self,
        bank: &[TransactionRecord],
        book: &[TransactionRecord],
    ) -> ReconcileResult<MatchResult> {
        self.config.validate()?;

        let mut pool = MatchPool::new(bank, book);
        pool.exact_pass();
        pool.slippage_pass(self.config.date_slippage_days);
        pool.fuzzy_pass(self.config.fuzzy_threshold);

        Ok(pool.into_result())
    }
}

/// Working state for one reconciliation run
///
/// Both sides are addressed through identifier-ordered index lists, which
/// makes the greedy passes independent of caller ordering and gives every
/// tie-break a stable winner. Consumption markers replace in-place deletion.
struct MatchPool<'a> {
    bank: &'a [TransactionRecord],
    book: &'a [TransactionRecord],
    bank_order: Vec<usize>,
    book_order: Vec<usize>,
    bank_used: Vec<bool>,
    book_used: Vec<bool>,
    matches: Vec<MatchCandidate>,
}

impl<'a> MatchPool<'a> {
    fn new(bank: &'a [TransactionRecord], book: &'a [TransactionRecord]) -> Self {
        Self {
            bank,
            book,
            bank_order: id_ordered_indices(bank),
            book_order: id_ordered_indices(book),
            bank_used: vec![false; bank.len()],
            book_used: vec![false; book.len()],
            matches: Vec::new(),
        }
    }

    fn accept(&mut self, bi: usize, ki: usize, match_type: MatchType, confidence: f64) {
        self.matches.push(MatchCandidate {
            bank_id: self.bank[bi].id.clone(),
            book_id: self.book[ki].id.clone(),
            match_type,
            confidence,
        });
        self.bank_used[bi] = true;
        self.book_used[ki] = true;
    }

    /// Pass 1: identical amount and identical date
    fn exact_pass(&mut self) {
        let bank = self.bank;
        let book = self.book;

        for pos in 0..self.bank_order.len() {
            let bi = self.bank_order[pos];
            if self.bank_used[bi] {
                continue;
            }

            // book_order is id-sorted, so the first hit is the lowest id
            let hit = self
                .book_order
                .iter()
                .copied()
                .find(|&ki| {
                    !self.book_used[ki]
                        && bank[bi].amount == book[ki].amount
                        && bank[bi].date == book[ki].date
                });
            if let Some(ki) = hit {
                self.accept(bi, ki, MatchType::Exact, 1.0);
            }
        }
    }

    /// Pass 2: identical amount, dates within the slippage window
    fn slippage_pass(&mut self, window: i64) {
        let bank = self.bank;
        let book = self.book;

        for pos in 0..self.bank_order.len() {
            let bi = self.bank_order[pos];
            if self.bank_used[bi] {
                continue;
            }

            // Prefer the smallest day distance; the strict comparison keeps
            // the lowest-id candidate on ties.
            let mut best: Option<(usize, i64)> = None;
            for &ki in &self.book_order {
                if self.book_used[ki] || bank[bi].amount != book[ki].amount {
                    continue;
                }

                let day_diff = bank[bi]
                    .date
                    .signed_duration_since(book[ki].date)
                    .num_days()
                    .abs();
                if day_diff > window {
                    continue;
                }

                match best {
                    Some((_, best_diff)) if day_diff >= best_diff => {}
                    _ => best = Some((ki, day_diff)),
                }
            }

            if let Some((ki, day_diff)) = best {
                let confidence = 1.0 - day_diff as f64 / (window as f64 + 1.0);
                self.accept(bi, ki, MatchType::DateSlippage, confidence);
            }
        }
    }

    /// Pass 3: identical amount, description similarity above the threshold
    ///
    /// Description fuzziness alone is not enough evidence; the amount must
    /// still match exactly.
    fn fuzzy_pass(&mut self, threshold: f64) {
        let bank = self.bank;
        let book = self.book;

        for pos in 0..self.bank_order.len() {
            let bi = self.bank_order[pos];
            if self.bank_used[bi] {
                continue;
            }

            let mut best: Option<(usize, f64)> = None;
            for &ki in &self.book_order {
                if self.book_used[ki] || bank[bi].amount != book[ki].amount {
                    continue;
                }

                let similarity =
                    description_similarity(&bank[bi].description, &book[ki].description);
                if similarity < threshold {
                    continue;
                }

                match best {
                    Some((_, best_sim)) if similarity <= best_sim => {}
                    _ => best = Some((ki, similarity)),
                }
            }

            if let Some((ki, similarity)) = best {
                self.accept(bi, ki, MatchType::FuzzyDescription, similarity);
            }
        }
    }

    fn into_result(self) -> MatchResult {
        let unmatched_bank = residuals(self.bank, &self.bank_order, &self.bank_used);
        let unmatched_book = residuals(self.book, &self.book_order, &self.book_used);

        MatchResult {
            matches: self.matches,
            unmatched_bank,
            unmatched_book,
        }
    }
}

/// Indices of `records` sorted by record id
fn id_ordered_indices(records: &[TransactionRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| records[a].id.cmp(&records[b].id));
    order
}

/// Unconsumed records in id order
fn residuals(
    records: &[TransactionRecord],
    order: &[usize],
    used: &[bool],
) -> Vec<TransactionRecord> {
    order
        .iter()
        .filter(|&&i| !used[i])
        .map(|&i| records[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReconcileError, TransactionSide};
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn bank_record(
        id: &str,
        amount: &str,
        date: (i32, u32, u32),
        description: &str,
    ) -> TransactionRecord {
        record(id, TransactionSide::Bank, amount, date, description)
    }

    fn book_record(
        id: &str,
        amount: &str,
        date: (i32, u32, u32),
        description: &str,
    ) -> TransactionRecord {
        record(id, TransactionSide::Book, amount, date, description)
    }

    fn record(
        id: &str,
        side: TransactionSide,
        amount: &str,
        date: (i32, u32, u32),
        description: &str,
    ) -> TransactionRecord {
        TransactionRecord::new(
            id.to_string(),
            side,
            BigDecimal::from_str(amount).unwrap(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description.to_string(),
            "test.csv".to_string(),
        )
    }

    #[test]
    fn exact_match_has_full_confidence() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record("b1", "100.00", (2024, 1, 10), "VENDOR PAYMENT")];
        let book = vec![book_record("k1", "100.00", (2024, 1, 10), "Vendor payment")];

        let result = engine.reconcile(&bank, &book).unwrap();

        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].match_type, MatchType::Exact);
        assert!((result.matches[0].confidence - 1.0).abs() < f64::EPSILON);
        assert!(result.is_fully_matched());
    }

    #[test]
    fn slippage_confidence_falls_linearly_with_day_distance() {
        let engine = ReconciliationEngine::with_config(EngineConfig::new(5, 0.8));
        let bank = vec![bank_record("b1", "50.00", (2024, 1, 10), "TRANSFER")];
        let book = vec![book_record("k1", "50.00", (2024, 1, 13), "Transfer out")];

        let result = engine.reconcile(&bank, &book).unwrap();

        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].match_type, MatchType::DateSlippage);
        // 1 - 3/6
        assert!((result.matches[0].confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn slippage_accepts_either_direction() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record("b1", "50.00", (2024, 1, 13), "TRANSFER")];
        let book = vec![book_record("k1", "50.00", (2024, 1, 15), "Transfer")];

        let result = engine.reconcile(&bank, &book).unwrap();
        assert_eq!(result.matches[0].match_type, MatchType::DateSlippage);
    }

    #[test]
    fn slippage_outside_window_does_not_match() {
        let engine = ReconciliationEngine::with_config(EngineConfig::new(5, 0.99));
        let bank = vec![bank_record("b1", "50.00", (2024, 1, 10), "A")];
        let book = vec![book_record("k1", "50.00", (2024, 1, 16), "B")];

        let result = engine.reconcile(&bank, &book).unwrap();
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.unmatched_bank.len(), 1);
        assert_eq!(result.unmatched_book.len(), 1);
    }

    #[test]
    fn slippage_prefers_closest_date() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record("b1", "75.00", (2024, 3, 10), "RENT")];
        let book = vec![
            book_record("k1", "75.00", (2024, 3, 6), "Rent accrual"),
            book_record("k2", "75.00", (2024, 3, 9), "Rent paid"),
        ];

        let result = engine.reconcile(&bank, &book).unwrap();

        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].book_id, "k2");
        assert_eq!(result.unmatched_book[0].id, "k1");
    }

    #[test]
    fn exact_pass_wins_before_slippage() {
        let engine = ReconciliationEngine::new();
        let bank = vec![
            bank_record("b1", "100.00", (2024, 1, 12), "PAYMENT"),
            bank_record("b2", "100.00", (2024, 1, 10), "PAYMENT"),
        ];
        // k1 is an exact match for b2; b1 must not steal it in the slippage
        // pass even though b1 sorts first.
        let book = vec![book_record("k1", "100.00", (2024, 1, 10), "Payment")];

        let result = engine.reconcile(&bank, &book).unwrap();

        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].match_type, MatchType::Exact);
        assert_eq!(result.matches[0].bank_id, "b2");
        assert_eq!(result.unmatched_bank[0].id, "b1");
    }

    #[test]
    fn fuzzy_match_requires_equal_amounts() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record(
            "b1",
            "120.00",
            (2024, 2, 1),
            "AMAZON WEB SERVICES",
        )];
        let book = vec![book_record(
            "k1",
            "125.00",
            (2024, 3, 1),
            "AMAZON WEB SERVICES",
        )];

        let result = engine.reconcile(&bank, &book).unwrap();
        assert_eq!(result.match_count(), 0);
    }

    #[test]
    fn fuzzy_match_respects_threshold() {
        let bank = vec![bank_record(
            "b1",
            "120.00",
            (2024, 2, 1),
            "AMAZON WEB SERVICES",
        )];
        let book = vec![book_record("k1", "120.00", (2024, 3, 1), "AMAZON WEB SVCS")];

        let lenient = ReconciliationEngine::with_config(EngineConfig::new(5, 0.8));
        let result = lenient.reconcile(&bank, &book).unwrap();
        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].match_type, MatchType::FuzzyDescription);
        assert!(result.matches[0].confidence >= 0.8);

        let strict = ReconciliationEngine::with_config(EngineConfig::new(5, 0.95));
        let result = strict.reconcile(&bank, &book).unwrap();
        assert_eq!(result.match_count(), 0);
    }

    #[test]
    fn every_record_used_at_most_once() {
        let engine = ReconciliationEngine::new();
        let bank = vec![
            bank_record("b1", "10.00", (2024, 1, 1), "COFFEE"),
            bank_record("b2", "10.00", (2024, 1, 1), "COFFEE"),
        ];
        let book = vec![book_record("k1", "10.00", (2024, 1, 1), "Coffee")];

        let result = engine.reconcile(&bank, &book).unwrap();

        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].bank_id, "b1");
        assert_eq!(result.unmatched_bank.len(), 1);
        assert_eq!(result.bank_total(), 2);
        assert_eq!(result.book_total(), 1);
    }

    #[test]
    fn result_is_independent_of_input_order() {
        let engine = ReconciliationEngine::new();
        let mut bank = vec![
            bank_record("b1", "10.00", (2024, 1, 1), "COFFEE SHOP"),
            bank_record("b2", "20.00", (2024, 1, 3), "BOOKSTORE"),
            bank_record("b3", "20.00", (2024, 1, 5), "BOOKSTORE"),
        ];
        let mut book = vec![
            book_record("k1", "20.00", (2024, 1, 3), "Bookstore"),
            book_record("k2", "10.00", (2024, 1, 2), "Coffee shop"),
            book_record("k3", "20.00", (2024, 1, 6), "Bookstore"),
        ];

        let first = engine.reconcile(&bank, &book).unwrap();
        bank.reverse();
        book.reverse();
        let second = engine.reconcile(&bank, &book).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_inputs_yield_all_residuals() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record("b1", "10.00", (2024, 1, 1), "COFFEE")];

        let result = engine.reconcile(&bank, &[]).unwrap();
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.unmatched_bank.len(), 1);

        let result = engine.reconcile(&[], &bank).unwrap();
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.unmatched_book.len(), 1);

        let result = engine.reconcile(&[], &[]).unwrap();
        assert_eq!(result.match_count(), 0);
        assert!(result.is_fully_matched());
    }

    #[test]
    fn invalid_configuration_fails_before_matching() {
        let engine = ReconciliationEngine::with_config(EngineConfig::new(-1, 0.8));
        let bank = vec![bank_record("b1", "10.00", (2024, 1, 1), "COFFEE")];
        let book = vec![book_record("k1", "10.00", (2024, 1, 1), "Coffee")];

        let err = engine.reconcile(&bank, &book).unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidConfiguration(_)));
    }

    #[test]
    fn ties_resolve_to_lowest_identifier() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record("b1", "40.00", (2024, 5, 1), "UTILITIES")];
        let book = vec![
            book_record("k2", "40.00", (2024, 5, 1), "Utilities"),
            book_record("k1", "40.00", (2024, 5, 1), "Utilities"),
        ];

        let result = engine.reconcile(&bank, &book).unwrap();
        assert_eq!(result.matches[0].book_id, "k1");
    }

    #[test]
    fn inputs_are_not_mutated() {
        let engine = ReconciliationEngine::new();
        let bank = vec![bank_record("b1", "10.00", (2024, 1, 1), "COFFEE")];
        let book = vec![book_record("k1", "10.00", (2024, 1, 1), "Coffee")];
        let bank_before = bank.clone();
        let book_before = book.clone();

        engine.reconcile(&bank, &book).unwrap();

        assert_eq!(bank, bank_before);
        assert_eq!(book, book_before);
    }
}
