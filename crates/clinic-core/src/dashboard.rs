//! Dashboard aggregates over the roster.

use serde::{Deserialize, Serialize};

use crate::models::{Patient, PatientStatus};

/// Number of roster entries shown as recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Headline patient counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    /// Registered, not yet seen
    pub waiting: usize,
    pub in_consultation: usize,
    pub discharged: usize,
}

/// One bar of the status distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusBucket {
    pub name: String,
    pub value: usize,
}

impl DashboardSummary {
    /// Count patients by status.
    pub fn from_patients(patients: &[Patient]) -> Self {
        patients.iter().fold(
            Self {
                total: patients.len(),
                ..Self::default()
            },
            |mut summary, patient| {
                match patient.status {
                    PatientStatus::Registered => summary.waiting += 1,
                    PatientStatus::InConsultation => summary.in_consultation += 1,
                    PatientStatus::Discharged => summary.discharged += 1,
                }
                summary
            },
        )
    }

    /// Chart buckets in lifecycle order.
    pub fn status_distribution(&self) -> Vec<StatusBucket> {
        [
            ("Waiting", self.waiting),
            ("In Consult", self.in_consultation),
            ("Discharged", self.discharged),
        ]
        .into_iter()
        .map(|(name, value)| StatusBucket {
            name: name.to_string(),
            value,
        })
        .collect()
    }
}

/// The most recent `limit` roster entries (the roster is newest-first).
pub fn recent_activity(patients: &[Patient], limit: usize) -> &[Patient] {
    &patients[..patients.len().min(limit)]
}
