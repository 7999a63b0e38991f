//! Roster operations.

use std::collections::HashSet;

use super::{ClinicalStore, StatusChange, StoreError, StoreResult};
use crate::models::{Patient, PatientStatus};

impl ClinicalStore {
    /// Insert a patient at the front of the roster.
    ///
    /// Rejects an id already on the roster and leaves the roster untouched.
    pub fn add_patient(&mut self, patient: Patient) -> StoreResult<()> {
        if self.contains_patient(&patient.id) {
            tracing::warn!(patient_id = %patient.id, "rejected duplicate patient id");
            return Err(StoreError::DuplicatePatient(patient.id));
        }

        tracing::debug!(patient_id = %patient.id, status = %patient.status, "patient added");
        self.patients.insert(0, patient);
        Ok(())
    }

    /// Set the status of the patient with `id`.
    ///
    /// Unknown ids and backward moves are no-ops. Every other field is left
    /// as it was.
    pub fn update_patient_status(&mut self, id: &str, status: PatientStatus) -> StatusChange {
        let Some(patient) = self.patients.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(patient_id = %id, "status update for unknown patient ignored");
            return StatusChange::UnknownPatient;
        };

        let from = patient.status;
        if from == status {
            return StatusChange::Unchanged;
        }
        if !from.can_transition_to(status) {
            tracing::warn!(patient_id = %id, %from, to = %status, "refused status regression");
            return StatusChange::Regression { from, to: status };
        }

        patient.status = status;
        tracing::debug!(patient_id = %id, %from, to = %status, "patient status changed");
        StatusChange::Applied { from, to: status }
    }

    /// The roster, most-recent-first.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Look up a patient by id.
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn contains_patient(&self, id: &str) -> bool {
        self.patient(id).is_some()
    }

    /// Ids appearing more than once on the roster, in roster order.
    ///
    /// Always empty while every insert goes through `add_patient`.
    pub fn duplicate_patient_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for patient in &self.patients {
            if !seen.insert(patient.id.as_str()) && !duplicates.contains(&patient.id) {
                duplicates.push(patient.id.clone());
            }
        }
        duplicates
    }

    /// Patients still waiting for or in a consultation.
    pub fn active_patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter().filter(|p| p.status.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn make_patient(id: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: format!("Patient {}", id),
            age: 40,
            gender: Gender::Other,
            contact: "555-0000".into(),
            history: "None".into(),
            status: PatientStatus::Registered,
            registered_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_add_patient_goes_to_front() {
        let mut store = ClinicalStore::new();
        store.add_patient(make_patient("P-2000")).unwrap();

        assert_eq!(store.patients().len(), 4);
        assert_eq!(store.patients()[0].id, "P-2000");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut store = ClinicalStore::new();
        let before = store.snapshot();

        let result = store.add_patient(make_patient("P-1001"));

        assert_eq!(result, Err(StoreError::DuplicatePatient("P-1001".into())));
        assert_eq!(before, store.snapshot());
        assert!(store.duplicate_patient_ids().is_empty());
    }

    #[test]
    fn test_update_status_forward() {
        let mut store = ClinicalStore::new();
        let change = store.update_patient_status("P-1001", PatientStatus::InConsultation);

        assert_eq!(
            change,
            StatusChange::Applied {
                from: PatientStatus::Registered,
                to: PatientStatus::InConsultation
            }
        );
        assert_eq!(
            store.patient("P-1001").unwrap().status,
            PatientStatus::InConsultation
        );
    }

    #[test]
    fn test_update_status_only_touches_status() {
        let mut store = ClinicalStore::new();
        let mut expected = store.patient("P-1001").unwrap().clone();

        store.update_patient_status("P-1001", PatientStatus::Discharged);

        expected.status = PatientStatus::Discharged;
        assert_eq!(store.patient("P-1001"), Some(&expected));
    }

    #[test]
    fn test_update_status_same_value() {
        let mut store = ClinicalStore::new();
        let change = store.update_patient_status("P-1002", PatientStatus::InConsultation);
        assert_eq!(change, StatusChange::Unchanged);
    }

    #[test]
    fn test_update_unknown_patient_is_noop() {
        let mut store = ClinicalStore::new();
        let before = store.snapshot();

        let change = store.update_patient_status("P-9999", PatientStatus::Discharged);

        assert_eq!(change, StatusChange::UnknownPatient);
        assert_eq!(before, store.snapshot());
    }

    #[test]
    fn test_discharged_cannot_regress() {
        let mut store = ClinicalStore::new();
        let before = store.snapshot();

        let change = store.update_patient_status("P-1003", PatientStatus::Registered);

        assert_eq!(
            change,
            StatusChange::Regression {
                from: PatientStatus::Discharged,
                to: PatientStatus::Registered
            }
        );
        assert!(!change.is_applied());
        assert_eq!(before, store.snapshot());
    }

    #[test]
    fn test_active_patients() {
        let store = ClinicalStore::new();
        let ids: Vec<_> = store.active_patients().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P-1001", "P-1002"]);
    }

    #[test]
    fn test_duplicate_detection_reports_each_id_once() {
        let mut store = ClinicalStore::empty();
        store.patients = vec![
            make_patient("A"),
            make_patient("B"),
            make_patient("A"),
            make_patient("A"),
        ];
        assert_eq!(store.duplicate_patient_ids(), vec!["A".to_string()]);
    }
}
