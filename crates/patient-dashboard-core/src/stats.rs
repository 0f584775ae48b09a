//! Summaries behind the two dashboard charts.
//!
//! Both are computed over the full list, not the filtered table view.

use serde::Serialize;

use crate::models::{Gender, Patient};

/// One age bucket; `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeGroup {
    pub name: &'static str,
    pub min: u32,
    pub max: Option<u32>,
}

impl AgeGroup {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.map_or(true, |max| age <= max)
    }
}

/// Age buckets, in chart order.
pub const AGE_GROUPS: [AgeGroup; 5] = [
    AgeGroup { name: "0-18", min: 0, max: Some(18) },
    AgeGroup { name: "19-35", min: 19, max: Some(35) },
    AgeGroup { name: "36-50", min: 36, max: Some(50) },
    AgeGroup { name: "51-65", min: 51, max: Some(65) },
    AgeGroup { name: "65+", min: 66, max: None },
];

/// Bar of the age histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGroupCount {
    pub name: String,
    pub count: usize,
}

/// Slice of the gender pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderSlice {
    pub gender: Gender,
    /// Capitalized, e.g. "Female"
    pub label: String,
    pub count: usize,
    /// Whole-number share of the total
    pub percent: u32,
}

/// Patients per age bucket. Always five entries, in [`AGE_GROUPS`] order.
pub fn age_group_histogram(patients: &[Patient]) -> Vec<AgeGroupCount> {
    AGE_GROUPS
        .iter()
        .map(|group| AgeGroupCount {
            name: group.name.to_string(),
            count: patients.iter().filter(|p| group.contains(p.age)).count(),
        })
        .collect()
}

/// Patients per gender, in order of first appearance. Genders with no
/// patients are left out, so an empty list gives an empty chart.
pub fn gender_distribution(patients: &[Patient]) -> Vec<GenderSlice> {
    let mut counts: Vec<(Gender, usize)> = Vec::with_capacity(Gender::ALL.len());
    for patient in patients {
        match counts.iter_mut().find(|(g, _)| *g == patient.gender) {
            Some((_, count)) => *count += 1,
            None => counts.push((patient.gender, 1)),
        }
    }

    let total = patients.len();
    counts
        .into_iter()
        .map(|(gender, count)| GenderSlice {
            gender,
            label: gender.label().to_string(),
            count,
            percent: ((count as f64 * 100.0) / total as f64).round() as u32,
        })
        .collect()
}
