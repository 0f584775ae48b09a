//! Domain models for the patient dashboard.

mod form;
mod patient;

pub use form::*;
pub use patient::*;
