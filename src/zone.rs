//! Zone discovery.
//!
//! Each Autotask tenant lives in one zone with its own REST host. The
//! public `zoneInformation` endpoint maps an API user to that host.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::{AutotaskClient, USER_AGENT};
use crate::config::{ClientConfig, Credentials, DEFAULT_TIMEOUT};
use crate::error::{AutotaskError, Result};

/// Public endpoint answering zone lookups for any user.
pub const ZONE_INFORMATION_URL: &str =
    "https://webservices.autotask.net/atservicesrest/v1.0/zoneInformation";

/// The zone an API user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInformation {
    #[serde(default)]
    pub zone_name: Option<String>,
    /// REST root of the zone, e.g. `https://webservices15.autotask.net/ATServicesRest/`.
    pub url: String,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub ci: Option<i64>,
}

impl ZoneInformation {
    /// Look up the zone for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    pub async fn fetch(username: &str) -> Result<Self> {
        Self::fetch_from(ZONE_INFORMATION_URL, username).await
    }

    /// Look up the zone using a specific discovery endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the request fails or the
    /// body is malformed.
    #[tracing::instrument]
    pub async fn fetch_from(endpoint: &str, username: &str) -> Result<Self> {
        let url = Url::parse(endpoint)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(AutotaskError::HttpError)?;

        let response = http
            .get(url)
            .query(&[("user", username)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutotaskError::ApiError {
                message: format!("zone lookup failed for '{username}'"),
                status_code: Some(status.as_u16()),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Versioned API base for this zone.
    pub fn api_url(&self) -> String {
        let root = self.url.trim_end_matches('/');
        format!("{root}/V1.0/")
    }
}

impl AutotaskClient {
    /// Discover the user's zone and build a client pointed at it.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails or the zone URL is invalid.
    pub async fn for_zone(credentials: Credentials) -> Result<Self> {
        let zone = ZoneInformation::fetch(&credentials.username).await?;
        Self::new(ClientConfig::new(credentials).with_base_url(zone.api_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_deserialize_and_api_url() {
        let zone: ZoneInformation = serde_json::from_str(
            r#"{
                "zoneName": "America West 2",
                "url": "https://webservices15.autotask.net/ATServicesRest/",
                "webUrl": "https://ww15.autotask.net/",
                "ci": 12345
            }"#,
        )
        .unwrap();

        assert_eq!(zone.zone_name.as_deref(), Some("America West 2"));
        assert_eq!(
            zone.api_url(),
            "https://webservices15.autotask.net/ATServicesRest/V1.0/"
        );
    }
}
