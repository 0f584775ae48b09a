//! Clients that produce raw users.

use crate::payload::{parse_users_payload, RawUser};
use crate::{SourceError, SourceResult};

#[cfg(feature = "http")]
use crate::config::SourceConfig;

/// Anything that can hand over a batch of raw users once at startup.
pub trait UserSource {
    /// Fetch the users. Called once; failures are not retried.
    fn fetch_users(&self) -> SourceResult<Vec<RawUser>>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// HTTP source backed by a blocking reqwest client.
#[cfg(feature = "http")]
pub struct HttpUserSource {
    config: SourceConfig,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpUserSource {
    /// Build a client honouring the configured timeout.
    pub fn new(config: SourceConfig) -> SourceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[cfg(feature = "http")]
impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> SourceResult<Vec<RawUser>> {
        let url = self.config.request_url();
        tracing::debug!(url = %url, "fetching users");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        let users = parse_users_payload(&body)?;

        tracing::debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.config.base_url())
    }
}

enum Fixture {
    Users(Vec<RawUser>),
    Payload(String),
    Failure(fn() -> SourceError),
}

/// In-memory source for tests and offline runs.
pub struct FixtureUserSource {
    fixture: Fixture,
}

impl FixtureUserSource {
    /// Serve an explicit list of users.
    pub fn from_users(users: Vec<RawUser>) -> Self {
        Self {
            fixture: Fixture::Users(users),
        }
    }

    /// Serve users parsed from a response body on every fetch.
    pub fn from_payload(json: impl Into<String>) -> Self {
        Self {
            fixture: Fixture::Payload(json.into()),
        }
    }

    /// Always fail with the error built by `make_error`.
    pub fn failing(make_error: fn() -> SourceError) -> Self {
        Self {
            fixture: Fixture::Failure(make_error),
        }
    }
}

impl UserSource for FixtureUserSource {
    fn fetch_users(&self) -> SourceResult<Vec<RawUser>> {
        match &self.fixture {
            Fixture::Users(users) => Ok(users.clone()),
            Fixture::Payload(json) => parse_users_payload(json),
            Fixture::Failure(make_error) => Err(make_error()),
        }
    }

    fn describe(&self) -> String {
        match &self.fixture {
            Fixture::Users(users) => format!("fixture:{} users", users.len()),
            Fixture::Payload(json) => format!("fixture:{} bytes", json.len()),
            Fixture::Failure(_) => "fixture:failing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{RawAddress, RawGender};

    fn make_user(id: i64) -> RawUser {
        RawUser {
            id,
            first_name: "Test".into(),
            last_name: "User".into(),
            age: 30,
            gender: RawGender::Male,
            email: "test@example.com".into(),
            phone: "5551234567".into(),
            birth_date: "1994-02-03".into(),
            image: None,
            blood_group: "B+".into(),
            height: 170.0,
            weight: 70.0,
            address: RawAddress {
                address: None,
                city: "Denver".into(),
            },
            company: None,
        }
    }

    #[test]
    fn test_fixture_users() {
        let source = FixtureUserSource::from_users(vec![make_user(1), make_user(2)]);
        let users = source.fetch_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(source.describe(), "fixture:2 users");
    }

    #[test]
    fn test_fixture_payload_is_parsed() {
        let source = FixtureUserSource::from_payload(r#"{"users": "nope"}"#);
        assert!(matches!(
            source.fetch_users(),
            Err(SourceError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_fixture_failure() {
        let source = FixtureUserSource::failing(|| SourceError::Status {
            status: 500,
            reason: "Internal Server Error".into(),
        });
        assert!(matches!(
            source.fetch_users(),
            Err(SourceError::Status { status: 500, .. })
        ));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_source_describe() {
        let source = HttpUserSource::new(SourceConfig::default()).unwrap();
        assert_eq!(source.describe(), "http:https://dummyjson.com/users");
    }
}
