//! Form models for the create/edit dialog.

use serde::{Deserialize, Serialize};

use super::patient::{image_or_placeholder, Address, Gender, Patient};

/// Raw values of the patient form, as typed by the user.
///
/// Nothing here is trusted: the only way into the store is through
/// [`crate::validation::validate_form`], which produces a [`ValidatedForm`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientFormData {
    /// Set when editing an existing record
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    /// Select value: "male", "female" or "other"
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub blood_group: String,
    pub height: f64,
    pub weight: f64,
    pub address_city: String,
    pub admission_department: String,
    /// Empty means "use the placeholder"
    pub image: String,
}

impl PatientFormData {
    /// Prefill the form from an existing record.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            id: Some(patient.id),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            age: i64::from(patient.age),
            gender: patient.gender.as_str().to_string(),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            birth_date: patient.birth_date.clone(),
            blood_group: patient.blood_group.clone(),
            height: patient.height,
            weight: patient.weight,
            address_city: patient.address.city.clone(),
            admission_department: patient.admission_department.clone(),
            image: patient.image.clone(),
        }
    }
}

/// Form values that passed validation, with typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub(crate) id: Option<i64>,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) age: u32,
    pub(crate) gender: Gender,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) birth_date: String,
    pub(crate) blood_group: String,
    pub(crate) height: f64,
    pub(crate) weight: f64,
    pub(crate) address_city: String,
    pub(crate) admission_department: String,
    pub(crate) image: String,
}

impl ValidatedForm {
    /// Id carried by the form, if any. Never used to pick an id on write.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Build a fresh record with the given id.
    pub fn to_patient(&self, id: i64) -> Patient {
        Patient {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age,
            gender: self.gender,
            email: self.email.clone(),
            phone: self.phone.clone(),
            birth_date: self.birth_date.clone(),
            blood_group: self.blood_group.clone(),
            height: self.height,
            weight: self.weight,
            address: Address {
                city: self.address_city.clone(),
                street: None,
            },
            admission_department: self.admission_department.clone(),
            image: image_or_placeholder(Some(&self.image)),
        }
    }

    /// Overlay the form values on an existing record.
    ///
    /// The id and the street (not part of the form) come from `existing`.
    pub fn merge_into(&self, existing: &Patient) -> Patient {
        let mut merged = self.to_patient(existing.id);
        merged.address.street = existing.address.street.clone();
        merged
    }
}
