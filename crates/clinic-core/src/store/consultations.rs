//! Consultation history operations.

use super::{ClinicalStore, StatusChange};
use crate::models::{ConsultationRecord, PatientStatus};

impl ClinicalStore {
    /// Record a consultation and discharge its patient.
    ///
    /// Both effects land in the same `&mut self` call, so no reader can see
    /// the new record while the patient is still active. A record for an
    /// unknown patient is still kept; the returned change says so.
    pub fn add_consultation(&mut self, record: ConsultationRecord) -> StatusChange {
        let patient_id = record.patient_id.clone();
        tracing::debug!(consultation_id = %record.id, %patient_id, "consultation recorded");
        self.consultations.insert(0, record);
        self.update_patient_status(&patient_id, PatientStatus::Discharged)
    }

    /// Consultation history, most-recent-first.
    pub fn consultations(&self) -> &[ConsultationRecord] {
        &self.consultations
    }

    /// Consultations for one patient, most-recent-first.
    pub fn consultations_for<'a>(
        &'a self,
        patient_id: &'a str,
    ) -> impl Iterator<Item = &'a ConsultationRecord> + 'a {
        self.consultations
            .iter()
            .filter(move |c| c.patient_id == patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: &str, patient_id: &str) -> ConsultationRecord {
        ConsultationRecord {
            id: id.to_string(),
            patient_id: patient_id.to_string(),
            doctor_name: "Dr. House".into(),
            diagnosis: "Migraine".into(),
            prescription: "Rest".into(),
            notes: "Headache since morning".into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_consultation_discharges_patient() {
        let mut store = ClinicalStore::new();
        let p1001 = store.patient("P-1001").unwrap().clone();
        let p1003 = store.patient("P-1003").unwrap().clone();

        let change = store.add_consultation(make_record("C-1", "P-1002"));

        assert_eq!(
            change,
            StatusChange::Applied {
                from: PatientStatus::InConsultation,
                to: PatientStatus::Discharged
            }
        );
        let ids: Vec<_> = store.consultations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C-1"]);
        assert_eq!(
            store.patient("P-1002").unwrap().status,
            PatientStatus::Discharged
        );
        assert_eq!(store.patient("P-1001"), Some(&p1001));
        assert_eq!(store.patient("P-1003"), Some(&p1003));
    }

    #[test]
    fn test_newest_consultation_first() {
        let mut store = ClinicalStore::new();
        store.add_consultation(make_record("C-1", "P-1001"));
        store.add_consultation(make_record("C-2", "P-1002"));

        assert_eq!(store.consultations()[0].id, "C-2");
        assert_eq!(store.consultations()[1].id, "C-1");
    }

    #[test]
    fn test_consultation_for_unknown_patient_is_kept() {
        let mut store = ClinicalStore::new();
        let roster = store.patients().to_vec();

        let change = store.add_consultation(make_record("C-1", "P-9999"));

        assert_eq!(change, StatusChange::UnknownPatient);
        assert_eq!(store.consultations().len(), 1);
        assert_eq!(store.patients(), roster.as_slice());
    }

    #[test]
    fn test_consultations_for_patient() {
        let mut store = ClinicalStore::new();
        store.add_consultation(make_record("C-1", "P-1001"));
        store.add_consultation(make_record("C-2", "P-1002"));
        store.add_consultation(make_record("C-3", "P-1001"));

        let ids: Vec<_> = store
            .consultations_for("P-1001")
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["C-3", "C-1"]);
    }
}
