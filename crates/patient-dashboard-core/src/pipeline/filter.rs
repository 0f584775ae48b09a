//! Search and gender filtering.

use crate::models::Patient;

use super::GenderFilter;

/// Case-insensitive substring search over name, email, department and city.
///
/// An empty term matches everything.
pub fn matches_search(patient: &Patient, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();

    [
        patient.first_name.as_str(),
        patient.last_name.as_str(),
        patient.email.as_str(),
        patient.admission_department.as_str(),
        patient.address.city.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

/// Apply the search term, then the gender filter. Input order is kept.
pub fn filter_patients<'a>(
    patients: &'a [Patient],
    term: &str,
    gender: GenderFilter,
) -> Vec<&'a Patient> {
    patients
        .iter()
        .filter(|p| matches_search(p, term))
        .filter(|p| gender.matches(p.gender))
        .collect()
}
