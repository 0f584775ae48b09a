//! Typed per-column comparators.

use std::cmp::Ordering;

use crate::models::Patient;

use super::{SortKey, SortOrder};

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Ascending comparison of two patients on one column.
pub fn compare_by(key: SortKey, a: &Patient, b: &Patient) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::FirstName => cmp_text(&a.first_name, &b.first_name),
        SortKey::LastName => cmp_text(&a.last_name, &b.last_name),
        SortKey::Age => a.age.cmp(&b.age),
        SortKey::Gender => a.gender.as_str().cmp(b.gender.as_str()),
        SortKey::Email => cmp_text(&a.email, &b.email),
        SortKey::Phone => cmp_text(&a.phone, &b.phone),
        SortKey::BirthDate => cmp_text(&a.birth_date, &b.birth_date),
        SortKey::BloodGroup => cmp_text(&a.blood_group, &b.blood_group),
        SortKey::Height => a.height.total_cmp(&b.height),
        SortKey::Weight => a.weight.total_cmp(&b.weight),
        SortKey::Address => cmp_text(&a.address.city, &b.address.city),
        SortKey::AdmissionDepartment => {
            cmp_text(&a.admission_department, &b.admission_department)
        }
        SortKey::Image => cmp_text(&a.image, &b.image),
    }
}

/// Stable sort in place. Equal keys keep their relative order in both
/// directions; no secondary key is applied.
pub fn sort_patients(rows: &mut [&Patient], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = compare_by(key, a, b);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
