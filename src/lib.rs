//! # Reconciliation Core
//!
//! A transaction reconciliation library for forensic accounting: match
//! bank-statement records (external evidence) against internal book records
//! and score each match with a confidence in [0, 1].
//!
//! ## Features
//!
//! - **Tiered matching**: exact amount+date, date-slippage, and fuzzy
//!   description passes run in strictly decreasing confidence order
//! - **Deterministic output**: identifier-ordered processing and tie-breaks
//!   make results independent of input ordering
//! - **Confidence scoring**: 1.0 for exact matches, linear decay over the
//!   slippage window, normalized edit-distance similarity for fuzzy matches
//! - **Storage abstraction**: database-agnostic design with a trait-based
//!   storage seam and an in-memory implementation for tests
//! - **Summary statistics**: match rates and per-type counts for dashboards
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{EngineConfig, ReconciliationEngine, TransactionRecord, TransactionSide};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let bank = vec![TransactionRecord::new(
//!     "b1".to_string(),
//!     TransactionSide::Bank,
//!     BigDecimal::from(100),
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     "VENDOR PAYMENT".to_string(),
//!     "Chase_Jan_2024.csv".to_string(),
//! )];
//! let book = vec![TransactionRecord::new(
//!     "k1".to_string(),
//!     TransactionSide::Book,
//!     BigDecimal::from(100),
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     "Vendor payment".to_string(),
//!     "GL_2024.xlsx".to_string(),
//! )];
//!
//! let engine = ReconciliationEngine::with_config(EngineConfig::default());
//! let result = engine.reconcile(&bank, &book).unwrap();
//! assert_eq!(result.match_count(), 1);
//! ```

pub mod engine;
pub mod reconciler;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use engine::*;
pub use reconciler::*;
pub use traits::*;
pub use types::*;
