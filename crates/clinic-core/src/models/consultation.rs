//! Consultation records.

use serde::{Deserialize, Serialize};

/// A completed consultation.
///
/// `patient_id` is a reference only; the patient may be discharged (or gone
/// after a reset) by the time the record is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRecord {
    /// Unique record ID
    pub id: String,
    /// Patient the consultation was for
    pub patient_id: String,
    /// Doctor who signed the record
    pub doctor_name: String,
    pub diagnosis: String,
    pub prescription: String,
    pub notes: String,
    /// Creation timestamp (RFC 3339)
    pub timestamp: String,
}

impl ConsultationRecord {
    /// Create a new record stamped now.
    pub fn new(
        patient_id: String,
        doctor_name: String,
        diagnosis: String,
        prescription: String,
        notes: String,
    ) -> Self {
        Self {
            id: format!("C-{}", uuid::Uuid::new_v4().simple()),
            patient_id,
            doctor_name,
            diagnosis,
            prescription,
            notes,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
