//! Raw user → patient mapping.
//!
//! This is the only place that knows the external record shape.

use patient_dashboard_source::{RawGender, RawUser};

use crate::models::{image_or_placeholder, Address, Gender, Patient, UNKNOWN_DEPARTMENT};

impl From<RawGender> for Gender {
    fn from(gender: RawGender) -> Self {
        match gender {
            RawGender::Male => Gender::Male,
            RawGender::Female => Gender::Female,
        }
    }
}

/// Map one raw user to a patient. Total: every well-formed raw user maps.
pub fn transform_raw_user(raw: &RawUser) -> Patient {
    let admission_department = raw
        .company
        .as_ref()
        .and_then(|company| company.department.as_deref())
        .filter(|department| !department.is_empty())
        .unwrap_or(UNKNOWN_DEPARTMENT)
        .to_string();

    Patient {
        id: raw.id,
        first_name: raw.first_name.clone(),
        last_name: raw.last_name.clone(),
        age: raw.age,
        gender: raw.gender.into(),
        email: raw.email.clone(),
        phone: raw.phone.clone(),
        birth_date: raw.birth_date.clone(),
        blood_group: raw.blood_group.clone(),
        height: raw.height,
        weight: raw.weight,
        address: Address {
            city: raw.address.city.clone(),
            street: raw.address.address.clone(),
        },
        admission_department,
        image: image_or_placeholder(raw.image.as_deref()),
    }
}

/// Map a batch, keeping source order.
pub fn transform_all(raws: &[RawUser]) -> Vec<Patient> {
    raws.iter().map(transform_raw_user).collect()
}
