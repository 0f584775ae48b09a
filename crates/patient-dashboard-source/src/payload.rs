//! Wire shape of the user API and payload parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{SourceError, SourceResult};

/// Gender as reported by the user API. The source only ever sends these two.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RawGender {
    Male,
    Female,
}

/// Address block of a raw user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawAddress {
    /// Street line
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
}

/// Company block of a raw user. Only the department is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCompany {
    #[serde(default)]
    pub department: Option<String>,
}

/// A user record as returned by the API. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: RawGender,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    #[serde(default)]
    pub image: Option<String>,
    pub blood_group: String,
    pub height: f64,
    pub weight: f64,
    pub address: RawAddress,
    #[serde(default)]
    pub company: Option<RawCompany>,
}

/// Parse a response body into raw users.
///
/// The body must be a JSON object carrying a `users` array; anything else is
/// rejected as an invalid payload.
pub fn parse_users_payload(json: &str) -> SourceResult<Vec<RawUser>> {
    let mut body: Value = serde_json::from_str(json)?;

    let users = match body.get_mut("users") {
        Some(users) if users.is_array() => users.take(),
        Some(_) => {
            return Err(SourceError::InvalidPayload(
                "`users` field is not an array".into(),
            ))
        }
        None => {
            return Err(SourceError::InvalidPayload(
                "response has no `users` field".into(),
            ))
        }
    };

    Ok(serde_json::from_value(users)?)
}
