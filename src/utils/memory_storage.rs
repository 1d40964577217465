//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    records: Arc<RwLock<HashMap<String, TransactionRecord>>>,
    matches: Arc<RwLock<Vec<MatchCandidate>>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            matches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
        self.matches.write().unwrap().clear();
    }
}

#[async_trait]
impl MatchStorage for MemoryStorage {
    async fn save_record(&mut self, record: &TransactionRecord) -> ReconcileResult<()> {
        self.records
            .write()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_record(&self, record_id: &str) -> ReconcileResult<Option<TransactionRecord>> {
        Ok(self.records.read().unwrap().get(record_id).cloned())
    }

    async fn list_records(
        &self,
        side: Option<TransactionSide>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconcileResult<Vec<TransactionRecord>> {
        let records = self.records.read().unwrap();
        let mut filtered: Vec<TransactionRecord> = records
            .values()
            .filter(|record| {
                if let Some(side) = side {
                    if record.side != side {
                        return false;
                    }
                }
                if let Some(start) = start_date {
                    if record.date < start {
                        return false;
                    }
                }
                if let Some(end) = end_date {
                    if record.date > end {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary
        filtered.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(filtered)
    }

    async fn delete_record(&mut self, record_id: &str) -> ReconcileResult<()> {
        if self.records.write().unwrap().remove(record_id).is_some() {
            Ok(())
        } else {
            Err(ReconcileError::RecordNotFound(record_id.to_string()))
        }
    }

    async fn save_match(&mut self, candidate: &MatchCandidate) -> ReconcileResult<()> {
        self.matches.write().unwrap().push(candidate.clone());
        Ok(())
    }

    async fn replace_matches(&mut self, candidates: &[MatchCandidate]) -> ReconcileResult<()> {
        // Single swap under the lock, so the old set survives any earlier
        // failure and no reader observes a partial set.
        *self.matches.write().unwrap() = candidates.to_vec();
        Ok(())
    }

    async fn list_matches(&self) -> ReconcileResult<Vec<MatchCandidate>> {
        Ok(self.matches.read().unwrap().clone())
    }

    async fn unmatched_records(
        &self,
        side: TransactionSide,
    ) -> ReconcileResult<Vec<TransactionRecord>> {
        let matched_ids: HashSet<String> = {
            let matches = self.matches.read().unwrap();
            matches
                .iter()
                .map(|m| match side {
                    TransactionSide::Bank => m.bank_id.clone(),
                    TransactionSide::Book => m.book_id.clone(),
                })
                .collect()
        };

        let records = self.records.read().unwrap();
        let mut unmatched: Vec<TransactionRecord> = records
            .values()
            .filter(|record| record.side == side && !matched_ids.contains(&record.id))
            .cloned()
            .collect();
        unmatched.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(unmatched)
    }

    async fn clear_matches(&mut self) -> ReconcileResult<()> {
        self.matches.write().unwrap().clear();
        Ok(())
    }
}
