//! Validation utilities

use crate::traits::*;
use crate::types::*;

/// Validate that a record ID is valid
pub fn validate_record_id(record_id: &str) -> ReconcileResult<()> {
    if record_id.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Record ID cannot be empty".to_string(),
        ));
    }

    if record_id.len() > 64 {
        return Err(ReconcileError::Validation(
            "Record ID cannot exceed 64 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !record_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ReconcileError::Validation(
            "Record ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that a record description is valid
pub fn validate_description(description: &str) -> ReconcileResult<()> {
    if description.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Record description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(ReconcileError::Validation(
            "Record description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a source identifier is valid
pub fn validate_source(source: &str) -> ReconcileResult<()> {
    if source.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Record source cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced record validator with detailed checks
pub struct EnhancedRecordValidator;

impl RecordValidator for EnhancedRecordValidator {
    fn validate_record(&self, record: &TransactionRecord) -> ReconcileResult<()> {
        validate_record_id(&record.id)?;
        validate_description(&record.description)?;
        validate_source(&record.source)?;
        Ok(())
    }
}

/// Check a batch of records for duplicate identifiers before loading
pub fn validate_unique_ids(records: &[TransactionRecord]) -> ReconcileResult<()> {
    let mut seen = std::collections::HashSet::new();
    for record in records {
        if !seen.insert(&record.id) {
            return Err(ReconcileError::Validation(format!(
                "Duplicate record ID in batch: '{}'",
                record.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn record(id: &str) -> TransactionRecord {
        TransactionRecord::new(
            id.to_string(),
            TransactionSide::Bank,
            BigDecimal::from(10),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "DESCRIPTION".to_string(),
            "test.csv".to_string(),
        )
    }

    #[test]
    fn valid_ids_pass() {
        assert!(validate_record_id("txn-001").is_ok());
        assert!(validate_record_id("a_b_c").is_ok());
    }

    #[test]
    fn bad_ids_fail() {
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("has space").is_err());
        assert!(validate_record_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn enhanced_validator_rejects_empty_source() {
        let mut r = record("txn-001");
        r.source = String::new();
        assert!(EnhancedRecordValidator.validate_record(&r).is_err());
    }

    #[test]
    fn duplicate_ids_in_batch_fail() {
        let records = vec![record("a"), record("b"), record("a")];
        assert!(validate_unique_ids(&records).is_err());
        assert!(validate_unique_ids(&records[..2]).is_ok());
    }
}
