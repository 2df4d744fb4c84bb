//! Shared HTTP plumbing for the integration clients.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::error::{IntegrationError, Result};

const BODY_EXCERPT_CHARS: usize = 512;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(IntegrationError::Transport)
}

pub(crate) fn check_base_url(base_url: &str) -> Result<()> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(IntegrationError::InvalidConfig(format!(
            "base URL must be http(s): {base_url}"
        )))
    }
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// POST a JSON body with bearer auth and decode the JSON reply.
///
/// An empty success body decodes to `Value::Null`.
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    body: &B,
    service: &'static str,
) -> Result<serde_json::Value> {
    debug!(service, url, "sending request");
    let resp = client.post(url).bearer_auth(api_key).json(body).send().await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(IntegrationError::Api {
            service,
            status: status.as_u16(),
            body: text.chars().take(BODY_EXCERPT_CHARS).collect(),
        });
    }

    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        assert_eq!(endpoint("http://a.test/", "/emails"), "http://a.test/emails");
        assert_eq!(endpoint("http://a.test", "emails"), "http://a.test/emails");
    }

    #[test]
    fn test_check_base_url() {
        assert!(check_base_url("https://api.resend.com").is_ok());
        assert!(matches!(
            check_base_url("api.resend.com"),
            Err(IntegrationError::InvalidConfig(_))
        ));
    }
}
