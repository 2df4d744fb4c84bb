//! Integration configuration, read from the environment.

use std::time::Duration;

/// Default email API endpoint.
pub const DEFAULT_EMAIL_BASE_URL: &str = "https://api.resend.com";

/// Default sender address.
pub const DEFAULT_EMAIL_FROM: &str = "notifications@movetrack.local";

/// Default CRM API endpoint.
pub const DEFAULT_CRM_BASE_URL: &str = "https://api.hubapi.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Email dispatch configuration.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// API key; dispatch is disabled without one
    pub api_key: Option<String>,

    /// Base URL of the email API
    pub base_url: String,

    /// Sender address
    pub from: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_EMAIL_BASE_URL.to_string(),
            from: DEFAULT_EMAIL_FROM.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EmailConfig {
    /// Configuration with an API key against `base_url`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// CRM sync configuration.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// API key; sync is disabled without one
    pub api_key: Option<String>,

    /// Base URL of the CRM API
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_CRM_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CrmConfig {
    /// Configuration with an API key against `base_url`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// All integration settings.
#[derive(Debug, Clone, Default)]
pub struct IntegrationConfig {
    /// Email dispatch
    pub email: EmailConfig,

    /// CRM sync
    pub crm: CrmConfig,
}

impl IntegrationConfig {
    /// Load from `MOVETRACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = var("MOVETRACK_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            email: EmailConfig {
                api_key: var("MOVETRACK_EMAIL_API_KEY"),
                base_url: var("MOVETRACK_EMAIL_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_EMAIL_BASE_URL.to_string()),
                from: var("MOVETRACK_EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
                timeout,
            },
            crm: CrmConfig {
                api_key: var("MOVETRACK_CRM_API_KEY"),
                base_url: var("MOVETRACK_CRM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_CRM_BASE_URL.to_string()),
                timeout,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = IntegrationConfig::from_lookup(lookup(&[]));
        assert!(config.email.api_key.is_none());
        assert!(config.crm.api_key.is_none());
        assert_eq!(config.email.base_url, DEFAULT_EMAIL_BASE_URL);
        assert_eq!(config.crm.base_url, DEFAULT_CRM_BASE_URL);
        assert_eq!(config.email.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = IntegrationConfig::from_lookup(lookup(&[("MOVETRACK_EMAIL_API_KEY", "   ")]));
        assert!(config.email.api_key.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = IntegrationConfig::from_lookup(lookup(&[
            ("MOVETRACK_EMAIL_API_KEY", "re_123"),
            ("MOVETRACK_EMAIL_BASE_URL", "http://mail.test"),
            ("MOVETRACK_EMAIL_FROM", "ops@example.com"),
            ("MOVETRACK_CRM_API_KEY", " crm-key "),
            ("MOVETRACK_CRM_BASE_URL", "http://crm.test"),
            ("MOVETRACK_HTTP_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.email.api_key.as_deref(), Some("re_123"));
        assert_eq!(config.email.base_url, "http://mail.test");
        assert_eq!(config.email.from, "ops@example.com");
        assert_eq!(config.crm.api_key.as_deref(), Some("crm-key"));
        assert_eq!(config.crm.base_url, "http://crm.test");
        assert_eq!(config.crm.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = IntegrationConfig::from_lookup(lookup(&[("MOVETRACK_HTTP_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.crm.timeout, Duration::from_secs(30));
    }
}
