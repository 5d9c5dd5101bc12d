//! Remote validation service client
//!
//! One multiplexed service, reached by synchronous POSTs: `<base>/uuids`
//! answers `409 Conflict` with the UUIDs that collide with other tracks,
//! and `<base>/patterns` answers `422` with the pattern names it rejects.
//! The base URL is injected so tests can point at a local listener, and the
//! whole client is skippable with `--no-http`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ureq::Agent;

use crate::domain::config::PatternGroup;

/// Default endpoint of the validation service.
pub const DEFAULT_VALIDATION_URL: &str = "https://api.trackkit.dev/v1/validations";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("validation request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
}

impl From<ureq::Error> for RemoteError {
    fn from(e: ureq::Error) -> Self {
        Self::Transport(Box::new(e))
    }
}

#[derive(Serialize)]
struct UuidPayload<'a> {
    track_id: &'a str,
    uuids: &'a [String],
}

#[derive(Deserialize, Default)]
struct UuidConflicts {
    #[serde(default)]
    uuids: Vec<String>,
}

#[derive(Deserialize, Default)]
struct RejectedPatterns {
    #[serde(default)]
    patterns: Vec<String>,
}

/// Client for the cross-track validation service.
pub struct RemoteValidator {
    agent: Agent,
    base_url: String,
}

impl RemoteValidator {
    pub fn new(base_url: impl Into<String>) -> Self {
        // Non-2xx statuses carry the interesting payloads here, so they
        // must come back as responses, not transport errors.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.new_agent(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Asks the service which of the track's UUIDs collide with another
    /// track. An empty UUID set never leaves the process.
    pub fn colliding_uuids(
        &self,
        track_id: &str,
        uuids: &[String],
    ) -> Result<Vec<String>, RemoteError> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/uuids", self.base_url);
        let mut response = self
            .agent
            .post(&url)
            .send_json(UuidPayload { track_id, uuids })?;

        if response.status().as_u16() == 409 {
            let conflicts: UuidConflicts = response.body_mut().read_json()?;
            return Ok(conflicts.uuids);
        }

        Ok(Vec::new())
    }

    /// Asks the service whether the track's patterns are portable. Returns
    /// the names of rejected patterns.
    pub fn rejected_patterns(&self, patterns: &PatternGroup) -> Result<Vec<String>, RemoteError> {
        let url = format!("{}/patterns", self.base_url);
        let mut response = self.agent.post(&url).send_json(patterns)?;

        if response.status().as_u16() == 422 {
            let rejected: RejectedPatterns = response.body_mut().read_json()?;
            return Ok(rejected.patterns);
        }

        Ok(Vec::new())
    }
}
