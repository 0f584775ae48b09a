//! Patient add/edit/delete operations.

use super::{PatientStore, StoreError, StoreResult};
use crate::models::{Patient, ValidatedForm};

impl PatientStore {
    /// Id the next added patient will get: one past the largest id, or 1.
    ///
    /// Client-side placeholder only; a real backend would issue ids.
    pub fn next_id(&self) -> StoreResult<i64> {
        match self.patients.iter().map(|p| p.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(StoreError::IdSpaceExhausted(max)),
        }
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Add a new patient at the front of the list.
    ///
    /// Any id carried by the form is ignored. Fails without touching the list
    /// when no id is left above the current maximum.
    pub fn add_patient(&mut self, form: &ValidatedForm) -> StoreResult<Patient> {
        let patient = form.to_patient(self.next_id()?);
        self.patients.insert(0, patient.clone());
        tracing::info!(id = patient.id, "patient added");
        Ok(patient)
    }

    /// Replace the patient with `id` by the merge of its record and the form.
    ///
    /// The id is never changed, whatever the form carries.
    pub fn update_patient(&mut self, id: i64, form: &ValidatedForm) -> StoreResult<Patient> {
        let slot = self
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        *slot = form.merge_into(slot);
        tracing::info!(id, "patient updated");
        Ok(slot.clone())
    }

    /// Remove the patient with `id`. Returns false if it was already gone.
    pub fn delete_patient(&mut self, id: i64) -> bool {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        let removed = self.patients.len() != before;
        if removed {
            tracing::info!(id, "patient deleted");
        } else {
            tracing::debug!(id, "delete of unknown patient ignored");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Gender, PatientFormData};
    use crate::validation::validate_form;

    fn make(id: i64) -> Patient {
        Patient {
            id,
            first_name: format!("Name{}", id),
            last_name: "Lee".into(),
            age: 22,
            gender: Gender::Male,
            email: format!("n{}@lee.dev", id),
            phone: "2125550199".into(),
            birth_date: "2002-02-02".into(),
            blood_group: "O+".into(),
            height: 181.0,
            weight: 75.0,
            address: Address {
                city: "New York".into(),
                street: Some("5th Ave".into()),
            },
            admission_department: "Orthopedics".into(),
            image: "https://img.example/lee.png".into(),
        }
    }

    fn form(first: &str) -> ValidatedForm {
        validate_form(&PatientFormData {
            id: None,
            first_name: first.into(),
            last_name: "Novak".into(),
            age: 41,
            gender: "other".into(),
            email: "novak@example.com".into(),
            phone: "3865551234".into(),
            birth_date: "1983-07-21".into(),
            blood_group: "AB-".into(),
            height: 172.0,
            weight: 68.0,
            address_city: "Ljubljana".into(),
            admission_department: "Dermatology".into(),
            image: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_add_to_empty_gets_id_1() {
        let mut store = PatientStore::new();
        let added = store.add_patient(&form("Tea")).unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(store.len(), 1);
        assert!(added.has_placeholder_image());
    }

    #[test]
    fn test_add_uses_max_plus_one_and_prepends() {
        let mut store = PatientStore::from_patients(vec![make(3), make(7), make(2)]);
        let added = store.add_patient(&form("Tea")).unwrap();
        assert_eq!(added.id, 8);
        assert_eq!(store.patients()[0].id, 8);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_add_after_max_id_is_error() {
        let mut store = PatientStore::from_patients(vec![make(i64::MAX), make(1)]);
        let err = store.add_patient(&form("Tea")).unwrap_err();
        assert_eq!(err, StoreError::IdSpaceExhausted(i64::MAX));
        assert_eq!(store.len(), 2);
        assert_eq!(store.patients()[0].id, i64::MAX);
    }

    #[test]
    fn test_add_ignores_form_id() {
        let mut store = PatientStore::from_patients(vec![make(4)]);
        let mut data = PatientFormData::from_patient(&make(4));
        data.id = Some(4);
        let valid = validate_form(&data).unwrap();
        assert_eq!(store.add_patient(&valid).unwrap().id, 5);
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let mut store = PatientStore::from_patients(vec![make(1), make(2)]);
        let mut data = PatientFormData::from_patient(&make(2));
        data.id = Some(99);
        data.first_name = "Renamed".into();
        let valid = validate_form(&data).unwrap();

        let updated = store.update_patient(2, &valid).unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(updated.first_name, "Renamed");
        assert_eq!(updated.address.street.as_deref(), Some("5th Ave"));
        assert_eq!(store.get_patient(2).unwrap().first_name, "Renamed");
        assert!(store.get_patient(99).is_none());
        // Position in the list is unchanged.
        assert_eq!(store.patients()[1].id, 2);
    }

    #[test]
    fn test_update_missing_is_error() {
        let mut store = PatientStore::from_patients(vec![make(1)]);
        let err = store.update_patient(42, &form("Tea")).unwrap_err();
        assert_eq!(err, StoreError::NotFound(42));
        assert_eq!(store.get_patient(1).unwrap().first_name, "Name1");
    }

    #[test]
    fn test_delete() {
        let mut store = PatientStore::from_patients(vec![make(1), make(2), make(3)]);
        assert!(store.delete_patient(2));
        let ids: Vec<i64> = store.patients().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_missing_leaves_list_unchanged() {
        let mut store = PatientStore::from_patients(vec![make(1), make(2)]);
        let before = store.patients().to_vec();
        assert!(!store.delete_patient(9));
        assert_eq!(store.patients(), before.as_slice());
    }

    #[test]
    fn test_delete_does_not_renumber_and_ids_stay_unique() {
        let mut store = PatientStore::from_patients(vec![make(1), make(2), make(3)]);
        store.delete_patient(3);
        // Max is now 2, so the next add reuses 3; no live record holds it.
        assert_eq!(store.add_patient(&form("Tea")).unwrap().id, 3);
        assert_eq!(store.get_patient(1).unwrap().id, 1);
    }
}
