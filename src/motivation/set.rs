use std::collections::HashSet;

use thiserror::Error;

use crate::models::{SessionPatch, StudySession};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("a session with id `{0}` already exists")]
    DuplicateId(String),
    #[error("no session with id `{0}`")]
    NotFound(String),
}

/// The ordered, id-unique collection of study sessions held by one app
/// instance. Order is first-seen: locally known records keep their
/// positions, newly merged remote records append, and a user-logged session
/// goes to the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSet {
    records: Vec<StudySession>,
}

impl SessionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from already-ordered records (the cache seed), keeping
    /// the first occurrence of any repeated id.
    pub fn from_records(records: Vec<StudySession>) -> Self {
        let mut set = Self::new();
        let mut seen = HashSet::new();
        for record in records {
            if seen.insert(record.id.clone()) {
                set.records.push(record);
            }
        }
        set
    }

    pub fn records(&self) -> &[StudySession] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&StudySession> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Folds a remotely fetched list into the set. Records whose id is
    /// already present (locally, or earlier in the same remote list) are
    /// skipped; the rest append in remote order. Local records are never
    /// overwritten, so an optimistically-added session survives the fetch
    /// that has not seen it yet. Returns how many records were appended;
    /// merging the same list again appends nothing.
    pub fn merge(&mut self, remote: Vec<StudySession>) -> usize {
        let mut seen: HashSet<String> =
            self.records.iter().map(|record| record.id.clone()).collect();
        let mut appended = 0;
        for record in remote {
            if seen.insert(record.id.clone()) {
                self.records.push(record);
                appended += 1;
            }
        }
        appended
    }

    /// Prepends a freshly logged session (newest-first). The set is left
    /// unchanged when the id is already taken.
    pub fn add(&mut self, session: StudySession) -> Result<(), ReconcileError> {
        if self.contains(&session.id) {
            return Err(ReconcileError::DuplicateId(session.id));
        }
        self.records.insert(0, session);
        Ok(())
    }

    /// Patches the mutable fields of a session in place. Position,
    /// `occurred_at`, and `owner_id` are preserved.
    pub fn edit(&mut self, id: &str, patch: SessionPatch) -> Result<(), ReconcileError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ReconcileError::NotFound(id.to_string()))?;

        if let Some(subject) = patch.subject {
            record.subject = subject;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            record.duration_minutes = duration_minutes;
        }
        Ok(())
    }

    /// Removes the session with `id`. Deleting an absent id is a no-op so a
    /// retried delete stays idempotent; returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }
}
