//! Caller-side workflows over the clinical store.

mod consultation;
mod registration;

pub use consultation::*;
pub use registration::*;
