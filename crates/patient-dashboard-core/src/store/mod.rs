//! In-memory patient store.
//!
//! Owns the one patient list for the session. Nothing is written back to the
//! source; the list is gone when the store is dropped.

mod patients;

use std::collections::HashSet;

use thiserror::Error;

use crate::models::Patient;

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Patient not found: {0}")]
    NotFound(i64),

    #[error("No patient id left after {0}")]
    IdSpaceExhausted(i64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The session's patient list.
#[derive(Debug, Clone, Default)]
pub struct PatientStore {
    patients: Vec<Patient>,
}

impl PatientStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from an initial load.
    ///
    /// Ids must be unique; a later record reusing an id is dropped with a warning.
    pub fn from_patients(patients: Vec<Patient>) -> Self {
        let mut seen = HashSet::with_capacity(patients.len());
        let patients = patients
            .into_iter()
            .filter(|patient| {
                let fresh = seen.insert(patient.id);
                if !fresh {
                    tracing::warn!(id = patient.id, "dropping record with duplicate id");
                }
                fresh
            })
            .collect();
        Self { patients }
    }

    /// Current list, in storage order (most recently added first).
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
