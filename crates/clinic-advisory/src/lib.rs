//! Generative-AI advisory client for the clinic.
//!
//! Two optional features sit on top of an external text-generation service:
//! autofilling a registration form with a synthetic patient, and suggesting a
//! clinical note from the doctor's notes and the patient's history. Neither
//! ever fails outward; see [`client`] for the sentinel values.

pub mod client;
pub mod config;
pub mod extraction;
pub mod gemini;
pub mod prompts;

pub use client::*;
pub use config::AdvisoryConfig;
pub use extraction::*;
pub use gemini::GeminiBackend;
pub use prompts::*;
