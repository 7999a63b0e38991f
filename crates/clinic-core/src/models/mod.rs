//! Domain models for the clinic system.

mod consultation;
mod patient;
mod test_case;

pub use consultation::*;
pub use patient::*;
pub use test_case::*;
