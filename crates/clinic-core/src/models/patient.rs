//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gender as captured at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Where a patient sits in the visit lifecycle.
///
/// Variants are declared in lifecycle order; the derived `Ord` is the
/// direction of travel. Discharged is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatientStatus {
    /// Waiting to be seen
    Registered,
    /// Currently with a doctor
    #[serde(rename = "In Consultation")]
    InConsultation,
    /// Consultation recorded, visit closed
    Discharged,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 3] = [
        PatientStatus::Registered,
        PatientStatus::InConsultation,
        PatientStatus::Discharged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Registered => "Registered",
            PatientStatus::InConsultation => "In Consultation",
            PatientStatus::Discharged => "Discharged",
        }
    }

    /// Whether moving to `next` keeps the lifecycle monotonic.
    pub fn can_transition_to(&self, next: PatientStatus) -> bool {
        next >= *self
    }

    /// Patients still in the consultation queue.
    pub fn is_active(&self) -> bool {
        matches!(self, PatientStatus::Registered | PatientStatus::InConsultation)
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatientStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// A string that names no known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

/// A patient on the clinic roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Roster-unique identifier, never changes after creation
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Phone or other contact detail
    pub contact: String,
    /// Free-form medical history
    pub history: String,
    pub status: PatientStatus,
    /// Registration timestamp (RFC 3339)
    pub registered_at: String,
}

impl Patient {
    /// Register a new patient with a generated id, stamped now.
    pub fn register(
        name: String,
        age: u32,
        gender: Gender,
        contact: String,
        history: String,
    ) -> Self {
        Self {
            id: generate_patient_id(),
            name,
            age,
            gender,
            contact,
            history,
            status: PatientStatus::Registered,
            registered_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// `P-` followed by eight uppercase hex digits.
pub fn generate_patient_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("P-{}", uuid[..8].to_uppercase())
}
