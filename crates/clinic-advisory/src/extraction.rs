//! Synthetic patient extraction from model output.

use clinic_core::models::Gender;
use clinic_core::workflow::RegistrationForm;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// A generated patient profile, shaped like the registration form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyntheticPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub history: String,
}

impl SyntheticPatient {
    /// Overwrite every field of `form` with this profile.
    pub fn fill(self, form: &mut RegistrationForm) {
        *form = self.into();
    }
}

impl From<SyntheticPatient> for RegistrationForm {
    fn from(patient: SyntheticPatient) -> Self {
        RegistrationForm {
            name: patient.name,
            age: patient.age.to_string(),
            gender: patient.gender,
            contact: patient.contact,
            history: patient.history,
        }
    }
}

/// Parse model output into a synthetic patient.
///
/// Text around the outermost JSON object is ignored. Missing fields, a
/// non-integer or negative age, or a gender outside the three known values
/// are all schema violations.
pub fn parse_synthetic_patient(text: &str) -> ExtractionResult<SyntheticPatient> {
    let json_start = text.find('{').ok_or_else(|| {
        ExtractionError::InvalidFormat("No JSON object found in response".into())
    })?;
    let json_end = text.rfind('}').ok_or_else(|| {
        ExtractionError::InvalidFormat("No closing brace found in response".into())
    })?;
    if json_end < json_start {
        return Err(ExtractionError::InvalidFormat(
            "Closing brace precedes opening brace".into(),
        ));
    }

    let patient = serde_json::from_str(&text[json_start..=json_end])?;
    Ok(patient)
}
