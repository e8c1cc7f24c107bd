use std::sync::Arc;

use super::record::Record;

/// The in-memory list a screen renders from.
///
/// Every mutation builds a fresh slice and swaps it in, so snapshots handed out earlier
/// (an export in progress, a rendered page) never observe a partial update.
#[derive(Debug, Clone)]
pub struct RecordSource {
    records: Arc<[Record]>,
}

impl Default for RecordSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecordSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records: records.into() }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<[Record]> {
        Arc::clone(&self.records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id().as_deref() == Some(id))
    }

    /// Replace everything (initial load or re-fetch)
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records.into();
    }

    pub fn prepend(&mut self, record: Record) {
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.records = next.into();
    }

    pub fn append(&mut self, record: Record) {
        let mut next = self.records.to_vec();
        next.push(record);
        self.records = next.into();
    }

    /// Swap the record sharing `record`'s id; returns false when no such id is present
    pub fn replace_by_id(&mut self, record: Record) -> bool {
        let Some(id) = record.id() else {
            return false;
        };
        if self.find(&id).is_none() {
            return false;
        }

        let next: Vec<Record> = self
            .records
            .iter()
            .map(|r| if r.id().as_deref() == Some(id.as_str()) { record.clone() } else { r.clone() })
            .collect();
        self.records = next.into();
        true
    }

    /// Drop the record with `id`; returns false when nothing matched
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.records.len();
        let next: Vec<Record> =
            self.records.iter().filter(|r| r.id().as_deref() != Some(id)).cloned().collect();
        if next.len() == before {
            return false;
        }
        self.records = next.into();
        true
    }
}
