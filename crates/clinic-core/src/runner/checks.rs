//! The canned checks replayed by the runner.

use std::thread;
use std::time::Duration;

use crate::models::{Gender, Patient, PatientStatus, TestCase};
use crate::store::{ClinicalStore, StatusChange, StoreError};
use crate::workflow::{register, RegistrationError, RegistrationForm};

/// Patient inserted by the integrity, transition and duplicate checks.
pub const TEST_PATIENT_ID: &str = "TEST-USER";

/// Patients inserted by the load check.
pub const LOAD_PATIENT_COUNT: usize = 50;

/// Pass message on success, failure message otherwise.
pub(crate) type CheckResult = Result<String, String>;

pub(crate) type Check = fn(&mut ClinicalStore, &mut Step<'_>) -> CheckResult;

/// Handle a check uses to log progress and pace itself.
pub(crate) struct Step<'a> {
    pub(crate) case: &'a mut TestCase,
    pub(crate) pace: Duration,
}

impl Step<'_> {
    pub(crate) fn log(&mut self, message: &str) {
        tracing::info!(case = %self.case.id, "{}", message);
        self.case.log(message);
    }

    /// Cosmetic delay so a human can follow the log.
    pub(crate) fn pause(&self) {
        if !self.pace.is_zero() {
            thread::sleep(self.pace);
        }
    }
}

/// (id, name, description, check) for every scripted case, in run order.
pub(crate) const SUITE: [(&str, &str, &str, Check); 5] = [
    (
        "T1",
        "Validate Patient Registration Form",
        "Checks if mandatory fields are enforced.",
        check_registration_validation,
    ),
    (
        "T2",
        "Data Integrity Check",
        "Ensures patient data is stored correctly in memory.",
        check_data_integrity,
    ),
    (
        "T3",
        "Workflow Logic: Status Transition",
        "Verifies status changes from Registered to Consult.",
        check_status_transition,
    ),
    (
        "T4",
        "Duplicate Record Prevention",
        "Attempts to add a duplicate ID.",
        check_duplicate_prevention,
    ),
    (
        "T5",
        "System Load Simulation",
        "Adds 50 dummy patients to stress the roster.",
        check_load,
    ),
];

pub(crate) fn test_patient() -> Patient {
    Patient {
        id: TEST_PATIENT_ID.into(),
        name: "Automated Test User".into(),
        age: 99,
        gender: Gender::Other,
        contact: "000-000".into(),
        history: "None".into(),
        status: PatientStatus::Registered,
        registered_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn check_registration_validation(store: &mut ClinicalStore, step: &mut Step<'_>) -> CheckResult {
    step.log("Starting validation check...");
    step.pause();
    step.log("Attempting submit with empty fields...");

    let before = store.snapshot().fingerprint();
    let outcome = register(store, &RegistrationForm::default());
    step.pause();

    match outcome {
        Err(RegistrationError::MissingFields(fields)) => {
            if store.snapshot().fingerprint() != before {
                return Err("Rejected form still changed the store.".into());
            }
            Ok(format!(
                "Validation errors triggered correctly ({}).",
                fields.join(", ")
            ))
        }
        Err(e) => Err(format!("Unexpected validation error: {}", e)),
        Ok(patient) => Err(format!("Empty form was accepted as {}.", patient.id)),
    }
}

fn check_data_integrity(store: &mut ClinicalStore, step: &mut Step<'_>) -> CheckResult {
    step.log("Creating Test Patient...");
    let before = store.snapshot().fingerprint();
    let patient = test_patient();
    store
        .add_patient(patient.clone())
        .map_err(|e| format!("Insert failed: {}", e))?;
    step.pause();

    match store.patient(TEST_PATIENT_ID) {
        None => Err("Test patient not found after insert.".into()),
        Some(stored) if *stored != patient => {
            Err("Stored patient differs from the inserted one.".into())
        }
        Some(_) if store.snapshot().fingerprint() == before => {
            Err("Store fingerprint did not change after insert.".into())
        }
        Some(_) => Ok("Patient created and retrieved successfully.".into()),
    }
}

fn check_status_transition(store: &mut ClinicalStore, step: &mut Step<'_>) -> CheckResult {
    step.log("Moving TEST-USER to Consultation...");
    let change = store.update_patient_status(TEST_PATIENT_ID, PatientStatus::InConsultation);
    step.pause();

    if !change.is_applied() {
        return Err(format!("Transition not applied: {:?}", change));
    }
    let status = store.patient(TEST_PATIENT_ID).map(|p| p.status);
    if status != Some(PatientStatus::InConsultation) {
        return Err(format!("Expected In Consultation, found {:?}", status));
    }

    step.log("Checking that a discharged patient cannot be reopened...");
    let discharged = store
        .patients()
        .iter()
        .find(|p| p.status == PatientStatus::Discharged)
        .map(|p| p.id.clone())
        .ok_or_else(|| "No discharged patient to check against.".to_string())?;
    match store.update_patient_status(&discharged, PatientStatus::Registered) {
        StatusChange::Regression { .. } => Ok("Status transition validated.".into()),
        other => Err(format!("Discharged patient moved backwards: {:?}", other)),
    }
}

fn check_duplicate_prevention(store: &mut ClinicalStore, step: &mut Step<'_>) -> CheckResult {
    step.log("Checking duplicate ID logic...");
    let before = store.snapshot().fingerprint();
    let outcome = store.add_patient(test_patient());
    step.pause();

    match outcome {
        Err(StoreError::DuplicatePatient(id)) => {
            if store.snapshot().fingerprint() != before {
                return Err("Rejected duplicate still changed the store.".into());
            }
            let duplicates = store.duplicate_patient_ids();
            if !duplicates.is_empty() {
                return Err(format!("Roster holds duplicate ids: {}", duplicates.join(", ")));
            }
            Ok(format!("Duplicate ID {} rejected; roster unchanged.", id))
        }
        Ok(()) => Err("Duplicate ID was accepted.".into()),
    }
}

fn check_load(store: &mut ClinicalStore, step: &mut Step<'_>) -> CheckResult {
    step.log("Generating bulk data...");
    let before = store.patients().len();

    for i in 0..LOAD_PATIENT_COUNT {
        store
            .add_patient(Patient {
                id: format!("LOAD-{}", i),
                name: format!("Load User {}", i),
                age: 20 + i as u32,
                gender: Gender::Male,
                contact: "N/A".into(),
                history: "Load Test".into(),
                status: PatientStatus::Registered,
                registered_at: chrono::Utc::now().to_rfc3339(),
            })
            .map_err(|e| format!("Bulk insert failed: {}", e))?;
    }
    step.pause();

    let added = store.patients().len() - before;
    if added != LOAD_PATIENT_COUNT {
        return Err(format!(
            "Expected {} new patients, found {}.",
            LOAD_PATIENT_COUNT, added
        ));
    }
    Ok(format!("Batch insertion of {} patients complete.", added))
}
