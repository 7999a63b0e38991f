//! Prompts and response schemas for the advisory requests.

use serde_json::{json, Value};

/// Prompt for a synthetic patient profile (structured JSON reply).
pub const SYNTHETIC_PATIENT_PROMPT: &str =
    "Generate a realistic dummy patient profile for a medical software test. Return JSON only.";

/// Stand-in when the doctor has not typed any notes yet.
pub const DEFAULT_NOTES: &str = "Routine checkup";

/// Response schema constraining the synthetic patient reply.
pub fn synthetic_patient_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "age": { "type": "INTEGER" },
            "gender": { "type": "STRING", "enum": ["Male", "Female", "Other"] },
            "contact": { "type": "STRING" },
            "history": { "type": "STRING", "description": "Brief medical history summary" }
        },
        "required": ["name", "age", "gender", "contact", "history"]
    })
}

/// Prompt asking for a structured clinical suggestion.
///
/// The length limit is an instruction to the model only.
pub fn make_clinical_note_prompt(notes: &str, history: &str) -> String {
    let notes = if notes.is_empty() {
        DEFAULT_NOTES
    } else {
        notes
    };

    format!(
        r#"Act as a senior clinical assistant.
Patient History: {}
Current Symptoms/Notes: {}

Provide a brief, structured suggestion including:
1. Potential Diagnosis
2. Recommended Tests
3. Suggested Treatment Plan (Generic)

Keep it professional and concise (under 200 words)."#,
        history, notes
    )
}
