//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Image shown when a record has none.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/100x100.png";

/// Admission department used when the source has none.
pub const UNKNOWN_DEPARTMENT: &str = "N/A";

/// Patient gender. The user source only produces `Male`/`Female`; `Other`
/// comes from records entered through the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Capitalized label for display ("Male").
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a gender string outside the closed set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown gender: {0}")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

/// Patient address. Only the city is shown; the street comes from the source
/// and is kept through edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

/// A patient record as held in the in-memory list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique within the list, never reassigned
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    /// YYYY-MM-DD
    pub birth_date: String,
    pub blood_group: String,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    pub address: Address,
    pub admission_department: String,
    pub image: String,
}

impl Patient {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the record is showing the placeholder image.
    pub fn has_placeholder_image(&self) -> bool {
        self.image == PLACEHOLDER_IMAGE_URL
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Image URL or the placeholder when blank.
pub(crate) fn image_or_placeholder(image: Option<&str>) -> String {
    match image.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}
