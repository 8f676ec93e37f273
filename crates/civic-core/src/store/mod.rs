//! RecordStore - the loaded record collection
//!
//! Holds records in load order. Malformed records and duplicate ids are
//! skipped at ingestion rather than failing the batch; the
//! [`IngestReport`] says how many were dropped and why.

use ahash::AHasher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

use crate::record::{Record, RecordError, RecordId};

/// Counts from one ingestion batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub malformed: usize,
    pub duplicates: usize,
}

impl IngestReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.duplicates
    }
}

/// In-memory record collection with unique ids.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    ids: HashSet<RecordId>,
    generation: u64,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            ids: HashSet::new(),
            generation: 0,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an initial batch.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let mut store = Self::new();
        store.append(records);
        store
    }

    /// Replace every record. Bumps the generation.
    pub fn replace(&mut self, records: impl IntoIterator<Item = R>) -> IngestReport {
        self.records.clear();
        self.ids.clear();
        self.generation += 1;
        self.append(records)
    }

    /// Add records after the existing ones. Ids already present are skipped.
    pub fn append(&mut self, records: impl IntoIterator<Item = R>) -> IngestReport {
        let mut report = IngestReport::default();
        for record in records {
            self.admit(record, &mut report);
        }
        log_report(&report, self.records.len());
        report
    }

    /// Replace every record from raw JSON values.
    ///
    /// Each value is decoded on its own so one bad entry does not drop the
    /// batch.
    pub fn ingest_json(&mut self, values: Vec<serde_json::Value>) -> IngestReport {
        self.records.clear();
        self.ids.clear();
        self.generation += 1;
        self.append_json(values)
    }

    pub fn append_json(&mut self, values: Vec<serde_json::Value>) -> IngestReport {
        let mut report = IngestReport::default();
        for value in values {
            match serde_json::from_value::<R>(value) {
                Ok(record) => self.admit(record, &mut report),
                Err(e) => {
                    let error = RecordError::Decode(e.to_string());
                    warn!(error = %error, "skipping malformed record");
                    report.malformed += 1;
                }
            }
        }
        log_report(&report, self.records.len());
        report
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
        self.generation += 1;
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        if !self.ids.contains(&id) {
            return None;
        }
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented on every replace or clear, not on append
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Hash of the ids in load order
    pub fn fingerprint(&self) -> String {
        fingerprint_ids(self.records.iter().map(Record::id))
    }

    fn admit(&mut self, record: R, report: &mut IngestReport) {
        if let Err(error) = record.validate() {
            warn!(error = %error, "skipping malformed record");
            report.malformed += 1;
            return;
        }
        let id = record.id();
        if !self.ids.insert(id) {
            warn!(id, "skipping duplicate record");
            report.duplicates += 1;
            return;
        }
        self.records.push(record);
        report.accepted += 1;
    }
}

/// Order-sensitive hash over record ids
pub(crate) fn fingerprint_ids(ids: impl IntoIterator<Item = RecordId>) -> String {
    let mut hasher = AHasher::default();
    let mut count = 0usize;
    for id in ids {
        id.hash(&mut hasher);
        count += 1;
    }
    count.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn log_report(report: &IngestReport, total: usize) {
    debug!(
        accepted = report.accepted,
        malformed = report.malformed,
        duplicates = report.duplicates,
        total,
        "records ingested"
    );
}
