//! External activity provider.
//!
//! Activities come from a third-party fitness API and live in their own
//! failure domain: nothing here touches the entity store or the event
//! bus, and provider failures surface as [`ActivityError`] rather than
//! [`ResortError`](crate::error::ResortError).
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible.

use std::time::Duration;

use serde::Deserialize;
use snowtooth_types::{Activity, ActivityId};
use tracing::{debug, warn};

use crate::config::ActivityConfig;

/// Errors raised by the activity provider.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    /// No provider credentials were configured.
    #[error("activity provider is not configured")]
    NotConfigured,

    /// The HTTP request could not be sent or completed.
    #[error("activity request failed: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("activity provider returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not a list of activities.
    #[error("activity response parse failed: {0}")]
    Decode(String),
}

/// Where activities are fetched from.
#[derive(Debug)]
pub enum ActivitySource {
    /// The Strava athlete activities API.
    Strava(StravaClient),
    /// A fixed list, for offline runs and tests.
    Fixed(Vec<Activity>),
    /// No provider; every request fails with [`ActivityError::NotConfigured`].
    Disabled,
}

impl ActivitySource {
    /// Build a source from configuration.
    ///
    /// Without an access token the source is [`ActivitySource::Disabled`].
    pub fn from_config(config: &ActivityConfig) -> Result<Self, ActivityError> {
        match &config.access_token {
            Some(token) if !token.is_empty() => Ok(Self::Strava(StravaClient::new(config, token)?)),
            _ => Ok(Self::Disabled),
        }
    }

    /// Fetch the athlete's activities.
    pub async fn list(&self) -> Result<Vec<Activity>, ActivityError> {
        match self {
            Self::Strava(client) => client.list().await,
            Self::Fixed(activities) => Ok(activities.clone()),
            Self::Disabled => Err(ActivityError::NotConfigured),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Strava(_) => "strava",
            Self::Fixed(_) => "fixed",
            Self::Disabled => "disabled",
        }
    }
}

// ---------------------------------------------------------------------------
// Strava backend
// ---------------------------------------------------------------------------

/// Client for `GET /athlete/activities` on the Strava v3 API.
#[derive(Debug)]
pub struct StravaClient {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    per_page: u32,
}

impl StravaClient {
    fn new(config: &ActivityConfig, access_token: &str) -> Result<Self, ActivityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ActivityError::Http(format!("client build failed: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
            per_page: config.per_page,
        })
    }

    async fn list(&self) -> Result<Vec<Activity>, ActivityError> {
        let url = format!("{}/athlete/activities", self.api_url);

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", self.per_page)])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "activity request failed");
                ActivityError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            warn!(status = status.as_u16(), "activity provider returned an error");
            return Err(ActivityError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ActivityError::Http(e.to_string()))?;
        let activities = parse_activities(&body)?;
        debug!(count = activities.len(), "activities fetched");
        Ok(activities)
    }
}

/// Raw activity record as returned by Strava.
#[derive(Debug, Deserialize)]
struct StravaActivity {
    id: u64,
    name: Option<String>,
    distance: Option<f64>,
    #[serde(rename = "type")]
    activity_type: Option<String>,
    sport_type: Option<String>,
    elapsed_time: Option<u64>,
}

impl From<StravaActivity> for Activity {
    fn from(raw: StravaActivity) -> Self {
        Self {
            id: ActivityId::new(raw.id.to_string()),
            name: raw.name,
            distance: raw.distance,
            kind: raw.activity_type.or(raw.sport_type),
            time: raw.elapsed_time,
        }
    }
}

/// Decode a Strava activity list into [`Activity`] records.
fn parse_activities(body: &str) -> Result<Vec<Activity>, ActivityError> {
    let raw: Vec<StravaActivity> =
        serde_json::from_str(body).map_err(|e| ActivityError::Decode(e.to_string()))?;
    Ok(raw.into_iter().map(Activity::from).collect())
}
