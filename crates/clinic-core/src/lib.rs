//! Clinic Core Library
//!
//! In-memory patient lifecycle and consultation records for a small clinic.
//!
//! # Architecture
//!
//! ```text
//!   Registration ──► add_patient ──┐
//!                                  │
//!                          ┌───────▼────────┐
//!   Consultation desk ───► │ ClinicalStore  │ ◄─── Dashboard (read only)
//!   select / complete      │ roster +       │
//!                          │ consultations  │ ◄─── Scripted suite (reset + replay)
//!                          └────────────────┘
//!
//!   Registered ──► In Consultation ──► Discharged   (never backwards)
//! ```
//!
//! # Core Principle
//!
//! **Recording a consultation discharges the patient in the same step.**
//! No reader ever sees the record without the discharge.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, ConsultationRecord, TestCase)
//! - [`store`]: The clinical store and its seed data
//! - [`workflow`]: Registration form and consultation desk
//! - [`dashboard`]: Status counts and recent activity
//! - [`runner`]: Scripted self-test suite

pub mod dashboard;
pub mod models;
pub mod runner;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use dashboard::{recent_activity, DashboardSummary, StatusBucket};
pub use models::{ConsultationRecord, Gender, Patient, PatientStatus, TestCase, TestStatus};
pub use runner::{RunSummary, TestRunner};
pub use store::{ClinicalStore, StatusChange, StoreError, StoreSnapshot};
pub use workflow::{ConsultationDesk, ConsultationNotes, RegistrationError, RegistrationForm};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ClinicError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate patient: {0}")]
    DuplicatePatient(String),

    #[error("Busy: {0}")]
    Busy(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ClinicError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicatePatient(id) => ClinicError::DuplicatePatient(id),
        }
    }
}

impl From<RegistrationError> for ClinicError {
    fn from(e: RegistrationError) -> Self {
        match e {
            RegistrationError::Store(e) => e.into(),
            other => ClinicError::InvalidInput(other.to_string()),
        }
    }
}

impl From<models::UnknownLabel> for ClinicError {
    fn from(e: models::UnknownLabel) -> Self {
        ClinicError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a clinic seeded with mock data.
///
/// `step_pace_ms` is the delay between scripted suite steps.
#[uniffi::export]
pub fn open_clinic(step_pace_ms: u32) -> Arc<ClinicCore> {
    Arc::new(ClinicCore {
        store: Arc::new(Mutex::new(ClinicalStore::new())),
        runner: Arc::new(Mutex::new(TestRunner::new(Duration::from_millis(
            u64::from(step_pace_ms),
        )))),
        desk: ConsultationDesk::default(),
        suite_running: AtomicBool::new(false),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic wrapper for FFI.
///
/// Every store mutation happens under the store lock, so compound mutations
/// are observed all-or-nothing. A paced suite run releases both locks while
/// it sleeps between cases.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    store: Arc<Mutex<ClinicalStore>>,
    runner: Arc<Mutex<TestRunner>>,
    desk: ConsultationDesk,
    suite_running: AtomicBool,
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Roster Operations
    // =========================================================================

    /// Current roster, most-recent-first.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ClinicError> {
        let store = self.store.lock()?;
        Ok(store.patients().iter().cloned().map(Into::into).collect())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, ClinicError> {
        let store = self.store.lock()?;
        Ok(store.patient(&id).cloned().map(Into::into))
    }

    /// Insert a fully formed patient record.
    pub fn add_patient(&self, patient: FfiPatient) -> Result<(), ClinicError> {
        let patient = Patient::try_from(patient)?;
        let mut store = self.store.lock()?;
        store.add_patient(patient)?;
        Ok(())
    }

    /// Validate a registration form and register the patient.
    pub fn register_patient(&self, form: FfiRegistrationForm) -> Result<FfiPatient, ClinicError> {
        let form = RegistrationForm::try_from(form)?;
        let mut store = self.store.lock()?;
        let patient = workflow::register(&mut store, &form)?;
        Ok(patient.into())
    }

    /// Update a patient's status. Returns whether anything changed.
    pub fn update_patient_status(&self, id: String, status: String) -> Result<bool, ClinicError> {
        let status: PatientStatus = status.parse()?;
        let mut store = self.store.lock()?;
        Ok(store.update_patient_status(&id, status).is_applied())
    }

    /// Replace the roster with seed data and clear consultations.
    pub fn reset_data(&self) -> Result<(), ClinicError> {
        let mut store = self.store.lock()?;
        store.reset_data();
        Ok(())
    }

    // =========================================================================
    // Consultation Operations
    // =========================================================================

    /// Consultation history, most-recent-first.
    pub fn list_consultations(&self) -> Result<Vec<FfiConsultation>, ClinicError> {
        let store = self.store.lock()?;
        Ok(store.consultations().iter().cloned().map(Into::into).collect())
    }

    /// Patients waiting for or in a consultation.
    pub fn active_patients(&self) -> Result<Vec<FfiPatient>, ClinicError> {
        let store = self.store.lock()?;
        Ok(self
            .desk
            .active_patients(&store)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Open a patient's chart, moving a waiting patient into consultation.
    pub fn select_patient(&self, patient_id: String) -> Result<bool, ClinicError> {
        let mut store = self.store.lock()?;
        Ok(self.desk.select_patient(&mut store, &patient_id).is_applied())
    }

    /// Record a consultation and discharge the patient.
    ///
    /// The record is always stored. Returns whether the patient's status
    /// changed; false for an unknown or already discharged patient.
    pub fn add_consultation(&self, record: FfiConsultation) -> Result<bool, ClinicError> {
        let mut store = self.store.lock()?;
        Ok(store.add_consultation(record.into()).is_applied())
    }

    /// Sign off a consultation for a patient on the roster.
    pub fn complete_consultation(
        &self,
        patient_id: String,
        diagnosis: String,
        prescription: String,
        notes: String,
    ) -> Result<FfiConsultation, ClinicError> {
        let mut store = self.store.lock()?;
        let record = self
            .desk
            .complete(
                &mut store,
                &patient_id,
                ConsultationNotes {
                    diagnosis,
                    prescription,
                    notes,
                },
            )
            .ok_or(ClinicError::NotFound(patient_id))?;
        Ok(record.into())
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Status counts and the most recent roster entries.
    pub fn dashboard(&self) -> Result<FfiDashboard, ClinicError> {
        let store = self.store.lock()?;
        let summary = DashboardSummary::from_patients(store.patients());
        Ok(FfiDashboard {
            total: summary.total as u32,
            waiting: summary.waiting as u32,
            in_consultation: summary.in_consultation as u32,
            discharged: summary.discharged as u32,
            recent: recent_activity(store.patients(), dashboard::RECENT_ACTIVITY_LIMIT)
                .iter()
                .cloned()
                .map(Into::into)
                .collect(),
        })
    }

    // =========================================================================
    // Scripted Suite
    // =========================================================================

    /// Reset the store and run every scripted case.
    ///
    /// Locks are taken per case; the pace delay is slept with none held, so
    /// `test_cases` and the roster stay readable while a run is in progress.
    pub fn run_test_suite(&self) -> Result<FfiRunSummary, ClinicError> {
        if self.suite_running.swap(true, Ordering::SeqCst) {
            return Err(ClinicError::Busy("scripted suite already running".into()));
        }
        let result = self.run_cases();
        self.suite_running.store(false, Ordering::SeqCst);
        let summary = result?;
        Ok(FfiRunSummary {
            passed: summary.passed as u32,
            failed: summary.failed as u32,
        })
    }

    /// Id of the scripted case currently executing, if any.
    pub fn active_test_case(&self) -> Result<Option<String>, ClinicError> {
        let runner = self.runner.lock()?;
        Ok(runner.active_case().map(str::to_string))
    }

    /// Current state and logs of every scripted case.
    pub fn test_cases(&self) -> Result<Vec<FfiTestCase>, ClinicError> {
        let runner = self.runner.lock()?;
        Ok(runner.cases().iter().map(Into::into).collect())
    }

    /// Restore pending cases and reset the store.
    pub fn reset_test_suite(&self) -> Result<(), ClinicError> {
        if self.suite_running.load(Ordering::SeqCst) {
            return Err(ClinicError::Busy("scripted suite is running".into()));
        }
        let mut runner = self.runner.lock()?;
        let mut store = self.store.lock()?;
        runner.reset(&mut store);
        Ok(())
    }
}

impl ClinicCore {
    fn run_cases(&self) -> Result<RunSummary, ClinicError> {
        let (pace, count) = {
            let mut runner = self.runner.lock()?;
            let mut store = self.store.lock()?;
            runner.start(&mut store);
            (runner.pace(), runner.cases().len())
        };

        for index in 0..count {
            self.runner.lock()?.begin_case(index);
            if !pace.is_zero() {
                thread::sleep(pace);
            }
            let mut runner = self.runner.lock()?;
            let mut store = self.store.lock()?;
            runner.execute_case(index, &mut store, Duration::ZERO);
        }

        Ok(self.runner.lock()?.finish())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub history: String,
    pub status: String,
    pub registered_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.to_string(),
            contact: patient.contact,
            history: patient.history,
            status: patient.status.to_string(),
            registered_at: patient.registered_at,
        }
    }
}

impl TryFrom<FfiPatient> for Patient {
    type Error = ClinicError;

    fn try_from(patient: FfiPatient) -> Result<Self, Self::Error> {
        Ok(Patient {
            id: patient.id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.parse()?,
            contact: patient.contact,
            history: patient.history,
            status: patient.status.parse()?,
            registered_at: patient.registered_at,
        })
    }
}

/// FFI-safe registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistrationForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub contact: String,
    pub history: String,
}

impl TryFrom<FfiRegistrationForm> for RegistrationForm {
    type Error = ClinicError;

    fn try_from(form: FfiRegistrationForm) -> Result<Self, Self::Error> {
        Ok(RegistrationForm {
            name: form.name,
            age: form.age,
            gender: form.gender.parse()?,
            contact: form.contact,
            history: form.history,
        })
    }
}

/// FFI-safe consultation record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsultation {
    pub id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub diagnosis: String,
    pub prescription: String,
    pub notes: String,
    pub timestamp: String,
}

impl From<ConsultationRecord> for FfiConsultation {
    fn from(record: ConsultationRecord) -> Self {
        Self {
            id: record.id,
            patient_id: record.patient_id,
            doctor_name: record.doctor_name,
            diagnosis: record.diagnosis,
            prescription: record.prescription,
            notes: record.notes,
            timestamp: record.timestamp,
        }
    }
}

impl From<FfiConsultation> for ConsultationRecord {
    fn from(record: FfiConsultation) -> Self {
        ConsultationRecord {
            id: record.id,
            patient_id: record.patient_id,
            doctor_name: record.doctor_name,
            diagnosis: record.diagnosis,
            prescription: record.prescription,
            notes: record.notes,
            timestamp: record.timestamp,
        }
    }
}

/// FFI-safe dashboard view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboard {
    pub total: u32,
    pub waiting: u32,
    pub in_consultation: u32,
    pub discharged: u32,
    pub recent: Vec<FfiPatient>,
}

/// FFI-safe scripted case.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTestCase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub logs: Vec<String>,
}

impl From<&TestCase> for FfiTestCase {
    fn from(case: &TestCase) -> Self {
        Self {
            id: case.id.clone(),
            name: case.name.clone(),
            description: case.description.clone(),
            status: case.status.as_str().to_string(),
            logs: case.logs().to_vec(),
        }
    }
}

/// FFI-safe suite outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRunSummary {
    pub passed: u32,
    pub failed: u32,
}
