//! Inputs of the list pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Gender;

use super::{PipelineError, PAGE_SIZE};

/// Columns the table can be sorted by.
///
/// `Address` sorts by city.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    FirstName,
    LastName,
    Age,
    Gender,
    Email,
    Phone,
    BirthDate,
    BloodGroup,
    Height,
    Weight,
    Address,
    AdmissionDepartment,
    Image,
}

impl SortKey {
    pub const ALL: [SortKey; 14] = [
        SortKey::Id,
        SortKey::FirstName,
        SortKey::LastName,
        SortKey::Age,
        SortKey::Gender,
        SortKey::Email,
        SortKey::Phone,
        SortKey::BirthDate,
        SortKey::BloodGroup,
        SortKey::Height,
        SortKey::Weight,
        SortKey::Address,
        SortKey::AdmissionDepartment,
        SortKey::Image,
    ];

    /// Field name as used by the view layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::FirstName => "firstName",
            SortKey::LastName => "lastName",
            SortKey::Age => "age",
            SortKey::Gender => "gender",
            SortKey::Email => "email",
            SortKey::Phone => "phone",
            SortKey::BirthDate => "birthDate",
            SortKey::BloodGroup => "bloodGroup",
            SortKey::Height => "height",
            SortKey::Weight => "weight",
            SortKey::Address => "address",
            SortKey::AdmissionDepartment => "admissionDepartment",
            SortKey::Image => "image",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PipelineError::UnknownSortKey(s.to_string()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PipelineError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Gender dropdown value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
    Other,
}

impl GenderFilter {
    pub const ALL: [GenderFilter; 4] = [
        GenderFilter::All,
        GenderFilter::Male,
        GenderFilter::Female,
        GenderFilter::Other,
    ];

    pub fn matches(&self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Male => gender == Gender::Male,
            GenderFilter::Female => gender == Gender::Female,
            GenderFilter::Other => gender == Gender::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenderFilter::All => "all",
            GenderFilter::Male => "male",
            GenderFilter::Female => "female",
            GenderFilter::Other => "other",
        }
    }

    /// Dropdown label ("Filter by Gender: Male").
    pub fn label(&self) -> &'static str {
        match self {
            GenderFilter::All => "All",
            GenderFilter::Male => "Male",
            GenderFilter::Female => "Female",
            GenderFilter::Other => "Other",
        }
    }
}

impl From<Gender> for GenderFilter {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => GenderFilter::Male,
            Gender::Female => GenderFilter::Female,
            Gender::Other => GenderFilter::Other,
        }
    }
}

impl FromStr for GenderFilter {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenderFilter::ALL
            .iter()
            .copied()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| PipelineError::UnknownGenderFilter(s.to_string()))
    }
}

/// Everything the pipeline needs besides the list itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub search_term: String,
    pub gender_filter: GenderFilter,
    pub sort_key: Option<SortKey>,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            gender_filter: GenderFilter::All,
            sort_key: None,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl ViewQuery {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_gender(mut self, filter: GenderFilter) -> Self {
        self.gender_filter = filter;
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = Some(key);
        self.sort_order = order;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}
