//! Client configuration.
//!
//! Credentials, base URL and write-body serialization policy, either built
//! by hand or read from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AutotaskError, Result};

/// Default REST base URL (zone 2). Use zone discovery for other tenants.
pub const DEFAULT_API_URL: &str = "https://webservices2.autotask.net/ATServicesRest/V1.0/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// API user credentials sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API user name (usually an email address).
    pub username: String,
    /// API user secret.
    pub secret: String,
    /// Tracking identifier of the integration.
    pub integration_code: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        integration_code: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
            integration_code: integration_code.into(),
        }
    }

    /// Read `AUTOTASK_USERNAME`, `AUTOTASK_SECRET` and
    /// `AUTOTASK_INTEGRATION_CODE`.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::ConfigMissing`] naming the first unset variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            username: required_var("AUTOTASK_USERNAME")?,
            secret: required_var("AUTOTASK_SECRET")?,
            integration_code: required_var("AUTOTASK_INTEGRATION_CODE")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("integration_code", &self.integration_code)
            .finish_non_exhaustive()
    }
}

/// How unset (`None`) entity fields appear in create/update bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NullPolicy {
    /// Leave unset fields out of the body.
    #[default]
    Omit,
    /// Send unset fields as JSON `null`.
    Explicit,
}

impl FromStr for NullPolicy {
    type Err = AutotaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "explicit" | "null" => Ok(Self::Explicit),
            other => Err(AutotaskError::ConfigMissing(format!(
                "unknown null policy '{other}', expected 'omit' or 'explicit'"
            ))),
        }
    }
}

/// Everything needed to build an [`AutotaskClient`](crate::AutotaskClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub base_url: String,
    pub null_policy: NullPolicy,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the default base URL, policy and timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_API_URL.to_string(),
            null_policy: NullPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the configuration from environment variables.
    ///
    /// `AUTOTASK_API_URL` and `AUTOTASK_NULL_POLICY` are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or the null policy
    /// is not recognised.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(Credentials::from_env()?);

        if let Ok(url) = env::var("AUTOTASK_API_URL") {
            config.base_url = url;
        }
        if let Ok(policy) = env::var("AUTOTASK_NULL_POLICY") {
            config.null_policy = policy.parse()?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| AutotaskError::ConfigMissing(format!("{name} environment variable not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_secret() {
        let creds = Credentials::new("api@example.com", "s3cr3t", "TRACKING");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("api@example.com"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_null_policy_parse() {
        assert_eq!("omit".parse::<NullPolicy>().unwrap(), NullPolicy::Omit);
        assert_eq!(" Explicit ".parse::<NullPolicy>().unwrap(), NullPolicy::Explicit);
        assert!("sometimes".parse::<NullPolicy>().is_err());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new(Credentials::new("u", "s", "c"))
            .with_base_url("http://localhost:9000")
            .with_null_policy(NullPolicy::Explicit)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.null_policy, NullPolicy::Explicit);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
