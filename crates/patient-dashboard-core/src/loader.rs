//! Initial load of the patient list.

use patient_dashboard_source::UserSource;
use serde::Serialize;

use crate::models::Patient;
use crate::transform::transform_all;

/// Result of the one-time startup fetch.
///
/// On failure `patients` is empty and `error` holds a message for the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InitialPatientData {
    pub patients: Vec<Patient>,
    pub error: Option<String>,
}

impl InitialPatientData {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Fetch once from `source` and transform. Never fails and never retries.
pub fn load_initial_patients(source: &dyn UserSource) -> InitialPatientData {
    match source.fetch_users() {
        Ok(raws) => {
            let patients = transform_all(&raws);
            tracing::info!(source = %source.describe(), count = patients.len(), "patients loaded");
            InitialPatientData {
                patients,
                error: None,
            }
        }
        Err(err) => {
            tracing::error!(source = %source.describe(), error = %err, "failed to fetch patients");
            InitialPatientData {
                patients: Vec::new(),
                error: Some(err.user_message()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patient_dashboard_source::{FixtureUserSource, SourceError};

    #[test]
    fn test_load_success() {
        let source = FixtureUserSource::from_payload(
            r#"{"users":[{"id":1,"firstName":"Zoe","lastName":"Hart","age":19,"gender":"female","email":"zoe@hart.io","phone":"6175550100","birthDate":"2005-05-05","bloodGroup":"A-","height":160.1,"weight":52.3,"address":{"address":"9 Elm","city":"Salem"}}]}"#,
        );
        let data = load_initial_patients(&source);
        assert!(!data.is_error());
        assert_eq!(data.patients.len(), 1);
        assert_eq!(data.patients[0].admission_department, "N/A");
    }

    #[test]
    fn test_load_failure_gives_empty_list_and_message() {
        let source = FixtureUserSource::failing(|| SourceError::Status {
            status: 404,
            reason: "Not Found".into(),
        });
        let data = load_initial_patients(&source);
        assert!(data.patients.is_empty());
        assert_eq!(
            data.error.as_deref(),
            Some("Failed to fetch patients: 404 Not Found")
        );
    }

    #[test]
    fn test_load_malformed_payload() {
        let source = FixtureUserSource::from_payload(r#"{"users": null}"#);
        let data = load_initial_patients(&source);
        assert!(data.patients.is_empty());
        assert_eq!(
            data.error.as_deref(),
            Some("Received malformed patient data from the server.")
        );
    }
}
