//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for transaction records and match decisions
///
/// This trait allows the reconciliation core to work with any backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these
/// methods. The engine itself never touches storage; only the orchestration
/// layer does.
#[async_trait]
pub trait MatchStorage: Send + Sync {
    /// Save a transaction record to storage
    async fn save_record(&mut self, record: &TransactionRecord) -> ReconcileResult<()>;

    /// Get a record by ID
    async fn get_record(&self, record_id: &str) -> ReconcileResult<Option<TransactionRecord>>;

    /// List records, optionally filtered by side and date range
    async fn list_records(
        &self,
        side: Option<TransactionSide>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconcileResult<Vec<TransactionRecord>>;

    /// Delete a record
    async fn delete_record(&mut self, record_id: &str) -> ReconcileResult<()>;

    /// Persist an accepted match
    async fn save_match(&mut self, candidate: &MatchCandidate) -> ReconcileResult<()>;

    /// Replace all persisted matches with the given set
    ///
    /// Must be all-or-nothing: on failure the previously persisted matches
    /// remain intact. Backends with transactions should wrap the swap in
    /// one.
    async fn replace_matches(&mut self, candidates: &[MatchCandidate]) -> ReconcileResult<()>;

    /// List all persisted matches
    async fn list_matches(&self) -> ReconcileResult<Vec<MatchCandidate>>;

    /// List records on the given side that appear in no persisted match
    async fn unmatched_records(
        &self,
        side: TransactionSide,
    ) -> ReconcileResult<Vec<TransactionRecord>>;

    /// Remove all persisted matches (records are kept)
    async fn clear_matches(&mut self) -> ReconcileResult<()>;
}

/// Trait for implementing custom record validation rules
pub trait RecordValidator: Send + Sync {
    /// Validate a record before it is stored
    fn validate_record(&self, record: &TransactionRecord) -> ReconcileResult<()>;
}

/// Default record validator with basic rules
pub struct DefaultRecordValidator;

impl RecordValidator for DefaultRecordValidator {
    fn validate_record(&self, record: &TransactionRecord) -> ReconcileResult<()> {
        if record.id.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Record ID cannot be empty".to_string(),
            ));
        }

        if record.description.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Record description cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
