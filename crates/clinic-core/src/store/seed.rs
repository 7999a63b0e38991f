//! Fixed seed roster used at startup and on reset.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Gender, Patient, PatientStatus};

/// The three seed patients, one per lifecycle state.
///
/// Registration times are offsets from `anchor` (one day back, now, two days
/// back), so the same anchor always produces the same roster.
pub fn seed_patients(anchor: DateTime<Utc>) -> Vec<Patient> {
    vec![
        Patient {
            id: "P-1001".into(),
            name: "John Doe".into(),
            age: 45,
            gender: Gender::Male,
            contact: "555-0101".into(),
            history: "Hypertension, Seasonal Allergies".into(),
            status: PatientStatus::Registered,
            registered_at: (anchor - Duration::days(1)).to_rfc3339(),
        },
        Patient {
            id: "P-1002".into(),
            name: "Jane Smith".into(),
            age: 32,
            gender: Gender::Female,
            contact: "555-0102".into(),
            history: "None".into(),
            status: PatientStatus::InConsultation,
            registered_at: anchor.to_rfc3339(),
        },
        Patient {
            id: "P-1003".into(),
            name: "Robert Brown".into(),
            age: 68,
            gender: Gender::Male,
            contact: "555-0103".into(),
            history: "Type 2 Diabetes".into(),
            status: PatientStatus::Discharged,
            registered_at: (anchor - Duration::days(2)).to_rfc3339(),
        },
    ]
}
