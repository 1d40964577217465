//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of the reconciliation a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionSide {
    /// Sourced from a bank statement - external evidence
    Bank,
    /// Sourced from the internal ledger/books
    Book,
}

impl TransactionSide {
    /// Returns true for records sourced outside the organization's books
    pub fn is_external(&self) -> bool {
        matches!(self, TransactionSide::Bank)
    }
}

/// A single transaction line item from either a bank statement or the books
///
/// Records are immutable once created; the engine never modifies them and the
/// caller owns the collections they are loaded into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier for the record
    pub id: String,
    /// Which side of the reconciliation this record belongs to
    pub side: TransactionSide,
    /// Signed amount - negative for outflow, positive for inflow
    pub amount: BigDecimal,
    /// Date the transaction occurred (no time component)
    pub date: NaiveDate,
    /// Free-text description as it appeared in the source
    pub description: String,
    /// Which file or batch the record came from (e.g. "Chase_Dec_2023.pdf")
    pub source: String,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    /// When the record was loaded
    pub created_at: NaiveDateTime,
}

impl TransactionRecord {
    /// Create a new transaction record
    pub fn new(
        id: String,
        side: TransactionSide,
        amount: BigDecimal,
        date: NaiveDate,
        description: String,
        source: String,
    ) -> Self {
        Self {
            id,
            side,
            amount,
            date,
            description,
            source,
            metadata: HashMap::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Start building a record for the given side
    pub fn builder(side: TransactionSide) -> RecordBuilder {
        RecordBuilder::new(side)
    }
}

/// Builder for transaction records
///
/// Generates a UUID v4 identifier when none is supplied.
#[derive(Debug)]
pub struct RecordBuilder {
    id: Option<String>,
    side: TransactionSide,
    amount: Option<BigDecimal>,
    date: Option<NaiveDate>,
    description: String,
    source: String,
    metadata: HashMap<String, String>,
}

impl RecordBuilder {
    /// Create a new builder for the given side
    pub fn new(side: TransactionSide) -> Self {
        Self {
            id: None,
            side,
            amount: None,
            date: None,
            description: String::new(),
            source: String::new(),
            metadata: HashMap::new(),
        }
    }

    /// Set an explicit identifier
    pub fn id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the signed amount
    pub fn amount(mut self, amount: BigDecimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the transaction date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the description
    pub fn description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Set the source file or batch identifier
    pub fn source(mut self, source: String) -> Self {
        self.source = source;
        self
    }

    /// Add a metadata entry
    pub fn metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Build the record
    pub fn build(self) -> ReconcileResult<TransactionRecord> {
        let amount = self
            .amount
            .ok_or_else(|| ReconcileError::Validation("Record must have an amount".to_string()))?;
        let date = self
            .date
            .ok_or_else(|| ReconcileError::Validation("Record must have a date".to_string()))?;

        let mut record = TransactionRecord::new(
            self.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            self.side,
            amount,
            date,
            self.description,
            self.source,
        );
        record.metadata = self.metadata;
        Ok(record)
    }
}

/// How a match between a bank record and a book record was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Same amount and same date
    Exact,
    /// Same amount, dates within the slippage window
    DateSlippage,
    /// Same amount, descriptions similar above the fuzzy threshold
    FuzzyDescription,
}

/// A pairing of one bank record with one book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Identifier of the bank-side record
    pub bank_id: String,
    /// Identifier of the book-side record
    pub book_id: String,
    /// How the match was established
    pub match_type: MatchType,
    /// Match certainty in [0, 1] - 1.0 for exact matches
    pub confidence: f64,
}

/// Output of a reconciliation run
///
/// Accepted matches form a bijection: every record id appears in at most one
/// match, and `matches.len() + unmatched_bank.len()` equals the bank input
/// size (likewise for the book side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Accepted matches, strongest pass first
    pub matches: Vec<MatchCandidate>,
    /// Bank records no pass could match
    pub unmatched_bank: Vec<TransactionRecord>,
    /// Book records no pass could match
    pub unmatched_book: Vec<TransactionRecord>,
}

impl MatchResult {
    /// Number of accepted matches
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// True when neither side has residual records
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched_bank.is_empty() && self.unmatched_book.is_empty()
    }

    /// Number of bank-side input records this result was produced from
    pub fn bank_total(&self) -> usize {
        self.matches.len() + self.unmatched_bank.len()
    }

    /// Number of book-side input records this result was produced from
    pub fn book_total(&self) -> usize {
        self.matches.len() + self.unmatched_book.len()
    }
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
