use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::record::TransactionRecord;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(pub u64);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct StoredTransaction {
    id: TransactionId,
    record: TransactionRecord,
}

/// Flat list of all imported transactions, in import order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct DatabaseV1 {
    transactions: Vec<StoredTransaction>,
}

impl DatabaseV1 {
    pub fn new() -> Self {
        Self {
            transactions: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions.iter().map(|stored| &stored.record)
    }

    pub fn has_transaction(&self, record: &TransactionRecord) -> bool {
        self.records().any(|existing| existing.is_same_booking(record))
    }

    pub fn add_transaction(&mut self, record: TransactionRecord) -> TransactionId {
        let id = TransactionId(self.next_id());
        self.transactions.push(StoredTransaction { id, record });
        id
    }

    /// Adds all of `records` or, if any of them is already stored, none of them.
    ///
    /// Records repeating within `records` count as already stored as well.
    pub fn add_batch(&mut self, records: Vec<TransactionRecord>) -> Result<Vec<TransactionId>> {
        let mut staged = self.clone();
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            if staged.has_transaction(&record) {
                bail!(
                    "Transaction already exists: {} {} {} \"{}\"",
                    record.value_date,
                    record.amount,
                    record.beneficiary,
                    record.purpose,
                );
            }
            ids.push(staged.add_transaction(record));
        }
        *self = staged;
        Ok(ids)
    }

    fn next_id(&self) -> u64 {
        self.transactions
            .last()
            .map(|stored| stored.id.0 + 1)
            .unwrap_or(1)
    }
}
