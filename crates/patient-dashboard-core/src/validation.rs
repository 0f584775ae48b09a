//! Patient form validation.
//!
//! Every rule is checked and all failures are reported together, keyed by
//! form field, so the dialog can show a message beside each input. Nothing
//! that fails here reaches the store.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{Gender, PatientFormData, ValidatedForm};

/// Youngest accepted age.
pub const MIN_AGE: i64 = 0;
/// Oldest accepted age.
pub const MAX_AGE: i64 = 120;
/// Shortest accepted phone number, in characters.
pub const MIN_PHONE_LEN: usize = 10;
/// Shortest accepted name, city or department, in characters.
pub const MIN_TEXT_LEN: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

static BIRTH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("birth date regex is valid"));

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("url regex is valid")
});

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Form field name, camelCase as in the form
    pub field: &'static str,
    pub message: String,
}

/// All failed rules for one submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "invalid form: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a field, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validate the form and produce typed values.
pub fn validate_form(form: &PatientFormData) -> Result<ValidatedForm, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if char_len(&form.first_name) < MIN_TEXT_LEN {
        errors.push("firstName", "First name must be at least 2 characters.");
    }
    if char_len(&form.last_name) < MIN_TEXT_LEN {
        errors.push("lastName", "Last name must be at least 2 characters.");
    }

    if form.age < MIN_AGE {
        errors.push("age", "Age must be a positive number.");
    } else if form.age > MAX_AGE {
        errors.push("age", "Age must be at most 120.");
    }

    let gender = form.gender.parse::<Gender>().ok();
    if gender.is_none() {
        errors.push("gender", "Gender is required.");
    }

    if !EMAIL_RE.is_match(&form.email) {
        errors.push("email", "Invalid email address.");
    }
    if char_len(&form.phone) < MIN_PHONE_LEN {
        errors.push("phone", "Phone number seems too short.");
    }
    if !BIRTH_DATE_RE.is_match(&form.birth_date) {
        errors.push("birthDate", "Birth date must be YYYY-MM-DD.");
    }
    if form.blood_group.is_empty() {
        errors.push("bloodGroup", "Blood group is required.");
    }

    // NaN fails both comparisons and is rejected too.
    if !(form.height >= 1.0) {
        errors.push("height", "Height must be positive.");
    }
    if !(form.weight >= 1.0) {
        errors.push("weight", "Weight must be positive.");
    }

    if char_len(&form.address_city) < MIN_TEXT_LEN {
        errors.push("addressCity", "City is required.");
    }
    if char_len(&form.admission_department) < MIN_TEXT_LEN {
        errors.push("admissionDepartment", "Admission department is required.");
    }
    if !form.image.is_empty() && !URL_RE.is_match(&form.image) {
        errors.push("image", "Image URL must be valid.");
    }

    match gender {
        Some(gender) if errors.is_empty() => Ok(ValidatedForm {
            id: form.id,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            age: form.age as u32,
            gender,
            email: form.email.clone(),
            phone: form.phone.clone(),
            birth_date: form.birth_date.clone(),
            blood_group: form.blood_group.clone(),
            height: form.height,
            weight: form.weight,
            address_city: form.address_city.clone(),
            admission_department: form.admission_department.clone(),
            image: form.image.clone(),
        }),
        _ => {
            tracing::warn!(failed = errors.errors.len(), "patient form rejected");
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PatientFormData {
        PatientFormData {
            id: None,
            first_name: "Sofia".into(),
            last_name: "Rossi".into(),
            age: 34,
            gender: "female".into(),
            email: "sofia.rossi@example.com".into(),
            phone: "+39 055 123 4567".into(),
            birth_date: "1990-03-15".into(),
            blood_group: "O+".into(),
            height: 168.0,
            weight: 61.5,
            address_city: "Florence".into(),
            admission_department: "Neurology".into(),
            image: String::new(),
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = validate_form(&valid_form()).unwrap();
        assert_eq!(valid.gender(), Gender::Female);
        assert_eq!(valid.full_name(), "Sofia Rossi");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut form = valid_form();
        form.first_name = "S".into();
        form.email = "not-an-email".into();
        form.birth_date = "15/03/1990".into();
        form.height = 0.0;

        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.errors.len(), 4);
        assert_eq!(
            errors.message_for("firstName"),
            Some("First name must be at least 2 characters.")
        );
        assert_eq!(errors.message_for("email"), Some("Invalid email address."));
        assert_eq!(
            errors.message_for("birthDate"),
            Some("Birth date must be YYYY-MM-DD.")
        );
        assert_eq!(errors.message_for("height"), Some("Height must be positive."));
        assert_eq!(errors.message_for("weight"), None);
    }

    #[test]
    fn test_age_bounds() {
        let mut form = valid_form();
        for age in [0, 120] {
            form.age = age;
            assert!(validate_form(&form).is_ok(), "age {} should pass", age);
        }
        for age in [-1, 121] {
            form.age = age;
            let errors = validate_form(&form).unwrap_err();
            assert!(errors.message_for("age").is_some(), "age {} should fail", age);
        }
    }

    #[test]
    fn test_gender_must_be_known() {
        let mut form = valid_form();
        form.gender = "other".into();
        assert_eq!(validate_form(&form).unwrap().gender(), Gender::Other);

        form.gender = String::new();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.message_for("gender"), Some("Gender is required."));
    }

    #[test]
    fn test_phone_length() {
        let mut form = valid_form();
        form.phone = "555-1234".into();
        assert!(validate_form(&form).unwrap_err().message_for("phone").is_some());
        form.phone = "5551234567".into();
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_image_empty_or_url() {
        let mut form = valid_form();
        form.image = "https://placehold.co/100x100.png".into();
        assert!(validate_form(&form).is_ok());

        form.image = "not a url".into();
        assert_eq!(
            validate_form(&form).unwrap_err().message_for("image"),
            Some("Image URL must be valid.")
        );
    }

    #[test]
    fn test_image_needs_scheme_and_authority() {
        let mut form = valid_form();
        for rejected in ["mailto:a@b.co", "data:image/png;base64,AAAA", "//cdn.example/a.png", "https://"] {
            form.image = rejected.into();
            assert!(
                validate_form(&form).unwrap_err().message_for("image").is_some(),
                "{} should be rejected",
                rejected
            );
        }
        for accepted in ["http://localhost:8080/a.png", "ftp://files.example/img"] {
            form.image = accepted.into();
            assert!(validate_form(&form).is_ok(), "{} should pass", accepted);
        }
    }

    #[test]
    fn test_nan_weight_rejected() {
        let mut form = valid_form();
        form.weight = f64::NAN;
        assert!(validate_form(&form).unwrap_err().message_for("weight").is_some());
    }

    #[test]
    fn test_short_city_and_department() {
        let mut form = valid_form();
        form.address_city = "X".into();
        form.admission_department = "".into();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.message_for("addressCity"), Some("City is required."));
        assert_eq!(
            errors.message_for("admissionDepartment"),
            Some("Admission department is required.")
        );
    }

    #[test]
    fn test_display_lists_fields() {
        let mut form = valid_form();
        form.blood_group = String::new();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "invalid form: bloodGroup: Blood group is required."
        );
    }
}
