//! Orchestration layer that runs the engine over stored records

use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, ReconciliationEngine, ReconciliationSummary};
use crate::traits::*;
use crate::types::*;

/// Outcome of an automated verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Number of matches created and persisted
    pub matches_created: usize,
    /// Bank-side records considered
    pub bank_records: usize,
    /// Book-side records considered
    pub book_records: usize,
    /// Matched share of the bank side, 0.0 when the bank side was empty
    pub match_rate_percent: f64,
    /// The full match result, for callers that want residual detail
    pub result: MatchResult,
}

/// Coordinates record storage and the reconciliation engine
///
/// The engine itself is pure; this type owns the storage round trips: load
/// both sides, match, persist the accepted matches.
pub struct Reconciler<S: MatchStorage> {
    storage: S,
    validator: Box<dyn RecordValidator>,
}

impl<S: MatchStorage> Reconciler<S> {
    /// Create a new reconciler with the default record validator
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultRecordValidator),
        }
    }

    /// Create a new reconciler with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn RecordValidator>) -> Self {
        Self { storage, validator }
    }

    /// Validate and store a transaction record
    pub async fn add_record(&mut self, record: TransactionRecord) -> ReconcileResult<()> {
        self.validator.validate_record(&record)?;

        if self.storage.get_record(&record.id).await?.is_some() {
            return Err(ReconcileError::Validation(format!(
                "Record with ID '{}' already exists",
                record.id
            )));
        }

        self.storage.save_record(&record).await
    }

    /// Get a record by ID
    pub async fn get_record(&self, record_id: &str) -> ReconcileResult<Option<TransactionRecord>> {
        self.storage.get_record(record_id).await
    }

    /// Get a record by ID, returning an error if not found
    pub async fn get_record_required(&self, record_id: &str) -> ReconcileResult<TransactionRecord> {
        self.storage
            .get_record(record_id)
            .await?
            .ok_or_else(|| ReconcileError::RecordNotFound(record_id.to_string()))
    }

    /// Run automated reconciliation over all stored records
    ///
    /// Loads both sides, runs the tiered matcher, and replaces any previously
    /// persisted matches with the new result in a single
    /// [`MatchStorage::replace_matches`] call, so a failed run leaves the
    /// previous matches untouched.
    pub async fn run_auto_verification(
        &mut self,
        config: &EngineConfig,
    ) -> ReconcileResult<VerificationOutcome> {
        let bank = self
            .storage
            .list_records(Some(TransactionSide::Bank), None, None)
            .await?;
        let book = self
            .storage
            .list_records(Some(TransactionSide::Book), None, None)
            .await?;

        let engine = ReconciliationEngine::with_config(config.clone());
        let result = engine.reconcile(&bank, &book)?;

        self.storage.replace_matches(&result.matches).await?;

        let match_rate_percent = ReconciliationSummary::from_result(&result).match_rate_percent;

        Ok(VerificationOutcome {
            matches_created: result.match_count(),
            bank_records: bank.len(),
            book_records: book.len(),
            match_rate_percent,
            result,
        })
    }

    /// Records on the given side that no persisted match references
    pub async fn unmatched_records(
        &self,
        side: TransactionSide,
    ) -> ReconcileResult<Vec<TransactionRecord>> {
        self.storage.unmatched_records(side).await
    }

    /// Summary statistics over the persisted matches and records
    pub async fn summary(&self) -> ReconcileResult<ReconciliationSummary> {
        let result = MatchResult {
            matches: self.storage.list_matches().await?,
            unmatched_bank: self.storage.unmatched_records(TransactionSide::Bank).await?,
            unmatched_book: self.storage.unmatched_records(TransactionSide::Book).await?,
        };
        Ok(ReconciliationSummary::from_result(&result))
    }
}
