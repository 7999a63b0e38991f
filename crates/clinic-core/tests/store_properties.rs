//! Property tests for the clinical store.

use clinic_core::models::{Gender, Patient, PatientStatus};
use clinic_core::store::ClinicalStore;
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = PatientStatus> {
    prop_oneof![
        Just(PatientStatus::Registered),
        Just(PatientStatus::InConsultation),
        Just(PatientStatus::Discharged),
    ]
}

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)]
}

fn patient_strategy(id: String) -> impl Strategy<Value = Patient> {
    (
        "[A-Za-z ]{1,20}",
        0u32..120,
        gender_strategy(),
        "[0-9-]{7,12}",
        ".{0,40}",
        status_strategy(),
    )
        .prop_map(move |(name, age, gender, contact, history, status)| Patient {
            id: id.clone(),
            name,
            age,
            gender,
            contact,
            history,
            status,
            registered_at: "2026-01-01T00:00:00+00:00".into(),
        })
}

fn patients_with_distinct_ids(max: usize) -> impl Strategy<Value = Vec<Patient>> {
    prop::collection::hash_set("[A-Z]{2}-[0-9]{4}", 0..max).prop_flat_map(|ids| {
        ids.into_iter()
            .map(patient_strategy)
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn distinct_inserts_are_all_retrievable(patients in patients_with_distinct_ids(25)) {
        let mut store = ClinicalStore::empty();
        for patient in &patients {
            store.add_patient(patient.clone()).unwrap();
        }

        prop_assert_eq!(store.patients().len(), patients.len());
        for patient in &patients {
            prop_assert_eq!(store.patient(&patient.id), Some(patient));
        }
        prop_assert!(store.duplicate_patient_ids().is_empty());
    }

    #[test]
    fn unknown_id_update_leaves_roster_identical(
        id in "[a-z]{3,12}",
        status in status_strategy(),
    ) {
        let mut store = ClinicalStore::new();
        let before = store.snapshot();

        store.update_patient_status(&id, status);

        prop_assert_eq!(before.fingerprint(), store.snapshot().fingerprint());
        prop_assert_eq!(before, store.snapshot());
    }

    #[test]
    fn status_never_regresses(
        updates in prop::collection::vec((0usize..3, status_strategy()), 0..60)
    ) {
        let mut store = ClinicalStore::new();
        let ids = ["P-1001", "P-1002", "P-1003"];

        for (index, status) in updates {
            let id = ids[index];
            let before = store.patient(id).unwrap().status;

            store.update_patient_status(id, status);

            let after = store.patient(id).unwrap().status;
            prop_assert!(after >= before, "{} moved from {} to {}", id, before, after);
            if before == PatientStatus::Discharged {
                prop_assert_eq!(after, PatientStatus::Discharged);
            }
        }
    }

    #[test]
    fn duplicate_insert_never_changes_roster(index in 0usize..3) {
        let mut store = ClinicalStore::new();
        let before = store.snapshot();
        let mut duplicate = before.patients[index].clone();
        duplicate.name = "Someone Else".into();

        prop_assert!(store.add_patient(duplicate).is_err());
        prop_assert_eq!(before, store.snapshot());
    }
}
