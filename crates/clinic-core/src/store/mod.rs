//! In-memory clinical store.
//!
//! The store is the only owner of the patient roster and the consultation
//! history. Mutation requires `&mut self`, so a single coordinator applies
//! changes one at a time; readers get slices or cloned snapshots.

mod consultations;
mod patients;
mod seed;

pub use seed::seed_patients;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{ConsultationRecord, Patient, PatientStatus};

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate patient id: {0}")]
    DuplicatePatient(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a status update.
///
/// Updates never fail outward; the variants say what actually happened so
/// callers and tests can tell a no-op from a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Status moved forward
    Applied { from: PatientStatus, to: PatientStatus },
    /// Patient already had the requested status
    Unchanged,
    /// Backward move refused; roster untouched
    Regression { from: PatientStatus, to: PatientStatus },
    /// No patient with that id; roster untouched
    UnknownPatient,
}

impl StatusChange {
    /// Whether the roster was modified.
    pub fn is_applied(&self) -> bool {
        matches!(self, StatusChange::Applied { .. })
    }
}

/// Read-only copy of the store contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Most-recent-first
    pub patients: Vec<Patient>,
    /// Most-recent-first
    pub consultations: Vec<ConsultationRecord>,
}

impl StoreSnapshot {
    /// SHA-256 over the canonical JSON form, hex encoded.
    ///
    /// Two snapshots with equal fingerprints are field-for-field identical.
    pub fn fingerprint(&self) -> String {
        // Serializing plain structs of strings and enums cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&json);
        hex::encode(hasher.finalize())
    }
}

/// Process-wide holder of the roster and consultation history.
#[derive(Debug, Clone)]
pub struct ClinicalStore {
    /// Most-recent-first
    patients: Vec<Patient>,
    /// Most-recent-first
    consultations: Vec<ConsultationRecord>,
    /// Fixed at construction so every reset yields the same seed roster
    seed_anchor: DateTime<Utc>,
}

impl ClinicalStore {
    /// Create a store holding the seed roster and no consultations.
    pub fn new() -> Self {
        Self::with_seed_anchor(Utc::now())
    }

    /// Create a seeded store whose seed timestamps are relative to `anchor`.
    pub fn with_seed_anchor(anchor: DateTime<Utc>) -> Self {
        Self {
            patients: seed_patients(anchor),
            consultations: Vec::new(),
            seed_anchor: anchor,
        }
    }

    /// Create a store with no patients at all.
    pub fn empty() -> Self {
        Self {
            patients: Vec::new(),
            consultations: Vec::new(),
            seed_anchor: Utc::now(),
        }
    }

    /// Replace the roster with the seed set and clear the history.
    ///
    /// This is a wholesale replacement, not a status transition.
    pub fn reset_data(&mut self) {
        self.patients = seed_patients(self.seed_anchor);
        self.consultations.clear();
        tracing::info!(patients = self.patients.len(), "clinical store reset to seed data");
    }

    /// Clone the current contents.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            patients: self.patients.clone(),
            consultations: self.consultations.clone(),
        }
    }
}

impl Default for ClinicalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_seeded() {
        let store = ClinicalStore::new();
        assert_eq!(store.patients().len(), 3);
        assert!(store.consultations().is_empty());
    }

    #[test]
    fn test_empty_store() {
        let store = ClinicalStore::empty();
        assert!(store.patients().is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let mut store = ClinicalStore::new();
        let before = store.snapshot().fingerprint();
        assert_eq!(before, store.snapshot().fingerprint());
        assert_eq!(before.len(), 64);

        store.update_patient_status("P-1001", PatientStatus::InConsultation);
        assert_ne!(before, store.snapshot().fingerprint());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = ClinicalStore::new();
        store.reset_data();
        let first = store.snapshot();
        store.reset_data();
        let second = store.snapshot();

        assert_eq!(first, second);
        assert_eq!(first.patients.len(), 3);
        assert!(first.consultations.is_empty());
    }

    #[test]
    fn test_reset_restores_seed_after_changes() {
        let mut store = ClinicalStore::new();
        let seeded = store.snapshot();

        store.update_patient_status("P-1001", PatientStatus::Discharged);
        store.add_consultation(ConsultationRecord::new(
            "P-1002".into(),
            "Dr. House".into(),
            "".into(),
            "".into(),
            "".into(),
        ));
        assert_ne!(seeded, store.snapshot());

        store.reset_data();
        assert_eq!(seeded, store.snapshot());
    }
}
