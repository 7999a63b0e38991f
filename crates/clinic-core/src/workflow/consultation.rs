//! Doctor consultation desk.

use serde::{Deserialize, Serialize};

use crate::models::{ConsultationRecord, Patient, PatientStatus};
use crate::store::{ClinicalStore, StatusChange};

/// Doctor name used when none is configured.
pub const DEFAULT_DOCTOR: &str = "Dr. House";

/// What the doctor writes down while seeing a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsultationNotes {
    pub diagnosis: String,
    pub prescription: String,
    pub notes: String,
}

/// Consultation workflow for a single doctor.
#[derive(Debug, Clone)]
pub struct ConsultationDesk {
    doctor_name: String,
}

impl ConsultationDesk {
    pub fn new(doctor_name: impl Into<String>) -> Self {
        Self {
            doctor_name: doctor_name.into(),
        }
    }

    pub fn doctor_name(&self) -> &str {
        &self.doctor_name
    }

    /// Patients waiting for or already in a consultation.
    pub fn active_patients<'a>(&self, store: &'a ClinicalStore) -> Vec<&'a Patient> {
        store.active_patients().collect()
    }

    /// Open a patient's chart; a waiting patient moves into consultation.
    pub fn select_patient(&self, store: &mut ClinicalStore, patient_id: &str) -> StatusChange {
        match store.patient(patient_id).map(|p| p.status) {
            Some(PatientStatus::Registered) => {
                store.update_patient_status(patient_id, PatientStatus::InConsultation)
            }
            Some(_) => StatusChange::Unchanged,
            None => StatusChange::UnknownPatient,
        }
    }

    /// Sign off the consultation; the patient is discharged with the record.
    ///
    /// Returns `None` without touching the store if the patient is unknown.
    pub fn complete(
        &self,
        store: &mut ClinicalStore,
        patient_id: &str,
        notes: ConsultationNotes,
    ) -> Option<ConsultationRecord> {
        if !store.contains_patient(patient_id) {
            tracing::warn!(%patient_id, "cannot complete consultation for unknown patient");
            return None;
        }

        let record = ConsultationRecord::new(
            patient_id.to_string(),
            self.doctor_name.clone(),
            notes.diagnosis,
            notes.prescription,
            notes.notes,
        );
        store.add_consultation(record.clone());
        Some(record)
    }
}

impl Default for ConsultationDesk {
    fn default() -> Self {
        Self::new(DEFAULT_DOCTOR)
    }
}
