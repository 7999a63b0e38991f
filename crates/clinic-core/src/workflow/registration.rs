//! Patient registration form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Gender, Patient};
use crate::store::{ClinicalStore, StoreError};

/// Registration failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid age: {0}")]
    InvalidAge(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Raw form state as typed by the user (age is still text).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
    pub gender: Gender,
    pub contact: String,
    pub history: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: Gender::Male,
            contact: String::new(),
            history: String::new(),
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub history: String,
}

impl RegistrationForm {
    /// Check required fields (name, age, contact) and parse the age.
    pub fn validate(&self) -> RegistrationResult<ValidRegistration> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.age.trim().is_empty() {
            missing.push("age");
        }
        if self.contact.trim().is_empty() {
            missing.push("contact");
        }
        if !missing.is_empty() {
            return Err(RegistrationError::MissingFields(missing));
        }

        let age = self
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| RegistrationError::InvalidAge(self.age.clone()))?;

        Ok(ValidRegistration {
            name: self.name.trim().to_string(),
            age,
            gender: self.gender,
            contact: self.contact.trim().to_string(),
            history: self.history.clone(),
        })
    }

    /// Clear the form back to its initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl ValidRegistration {
    /// Build a freshly registered patient.
    pub fn into_patient(self) -> Patient {
        Patient::register(self.name, self.age, self.gender, self.contact, self.history)
    }
}

/// Validate the form and add the resulting patient to the store.
pub fn register(store: &mut ClinicalStore, form: &RegistrationForm) -> RegistrationResult<Patient> {
    let patient = form.validate()?.into_patient();
    store.add_patient(patient.clone())?;
    tracing::info!(patient_id = %patient.id, "patient registered");
    Ok(patient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientStatus;

    fn filled_form() -> RegistrationForm {
        RegistrationForm {
            name: "Maria Lopez".into(),
            age: "29".into(),
            gender: Gender::Female,
            contact: "555-0142".into(),
            history: "Asthma".into(),
        }
    }

    #[test]
    fn test_empty_form_reports_all_required_fields() {
        let err = RegistrationForm::default().validate().unwrap_err();
        assert_eq!(
            err,
            RegistrationError::MissingFields(vec!["name", "age", "contact"])
        );
        assert_eq!(err.to_string(), "Missing required fields: name, age, contact");
    }

    #[test]
    fn test_history_is_optional() {
        let mut form = filled_form();
        form.history.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let mut form = filled_form();
        form.age = "twenty".into();
        assert_eq!(
            form.validate(),
            Err(RegistrationError::InvalidAge("twenty".into()))
        );

        form.age = "-4".into();
        assert!(matches!(form.validate(), Err(RegistrationError::InvalidAge(_))));
    }

    #[test]
    fn test_register_adds_to_front() {
        let mut store = ClinicalStore::new();
        let patient = register(&mut store, &filled_form()).unwrap();

        assert_eq!(patient.status, PatientStatus::Registered);
        assert_eq!(patient.age, 29);
        assert_eq!(store.patients()[0], patient);
        assert_eq!(store.patients().len(), 4);
    }

    #[test]
    fn test_invalid_form_leaves_store_untouched() {
        let mut store = ClinicalStore::new();
        let before = store.snapshot();

        assert!(register(&mut store, &RegistrationForm::default()).is_err());
        assert_eq!(before, store.snapshot());
    }

    #[test]
    fn test_clear_resets_form() {
        let mut form = filled_form();
        form.clear();
        assert_eq!(form, RegistrationForm::default());
    }
}
