use crate::error::{Result, StarsManagerError};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;

const DEVICE_CODE_URL: &str = "https://oauth2.googleapis.com/device/code";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Response from the device code request
#[derive(Debug, Deserialize)]
pub struct DeviceCodeResponse {
    pub device_code: String,
    pub user_code: String,
    #[serde(alias = "verification_uri")]
    pub verification_url: String,
    pub expires_in: u64,
    pub interval: u64,
}

/// Response from one token poll
#[derive(Debug, Deserialize)]
pub struct TokenPollResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub interval: Option<u64>,
}

/// What the poll loop should do after one token response.
#[derive(Debug, PartialEq)]
pub enum PollOutcome {
    /// Authorization complete, contains the access token.
    Authorized(String),
    /// Keep polling; Some carries a server-imposed new interval in seconds.
    Pending(Option<u64>),
    /// Terminal failure, contains the reason to show the user.
    Failed(String),
}

/// Map a token-endpoint response onto the next polling action.
pub fn classify_poll_response(response: &TokenPollResponse) -> PollOutcome {
    if let Some(token) = &response.access_token {
        return PollOutcome::Authorized(token.clone());
    }

    match response.error.as_deref() {
        // User has not entered the code yet
        Some("authorization_pending") => PollOutcome::Pending(None),
        // Polling too fast; fall back to +5s when no interval is given
        Some("slow_down") => PollOutcome::Pending(Some(response.interval.unwrap_or(5))),
        Some("expired_token") => PollOutcome::Failed(
            "The device code has expired. Start the export again.".to_string(),
        ),
        Some("access_denied") => PollOutcome::Failed("Authorization was declined.".to_string()),
        Some(other) => PollOutcome::Failed(format!("Unknown error: {}", other)),
        None => PollOutcome::Failed(
            "Token endpoint returned neither a token nor an error".to_string(),
        ),
    }
}

/// Device-authorization flow against Google's OAuth endpoints, used to
/// obtain a bearer token for the Sheets export.
pub struct GoogleAuth {
    client: Client,
    client_id: String,
    client_secret: String,
}

impl GoogleAuth {
    pub fn new(client_id: String, client_secret: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("github-stars-manager/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GoogleAuth {
            client,
            client_id,
            client_secret,
        })
    }

    /// Ask for a device code scoped to the Sheets API. The caller shows the
    /// returned verification URL and user code.
    pub async fn request_device_code(&self) -> Result<DeviceCodeResponse> {
        let response = self
            .client
            .post(DEVICE_CODE_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("scope", SHEETS_SCOPE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StarsManagerError::AuthError(format!(
                "device code request failed with status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Poll the token endpoint at the server-provided interval until the
    /// user approves, declines, or `timeout` elapses.
    pub async fn poll_for_token(
        &self,
        device_code: &DeviceCodeResponse,
        timeout: Duration,
    ) -> Result<String> {
        let started = Instant::now();
        let mut interval = Duration::from_secs(device_code.interval);

        loop {
            if started.elapsed() > timeout {
                return Err(StarsManagerError::AuthError(format!(
                    "authorization timed out after {} seconds",
                    timeout.as_secs()
                )));
            }

            sleep(interval).await;

            let response = self
                .client
                .post(TOKEN_URL)
                .form(&[
                    ("client_id", self.client_id.as_str()),
                    ("client_secret", self.client_secret.as_str()),
                    ("device_code", device_code.device_code.as_str()),
                    ("grant_type", GRANT_TYPE),
                ])
                .send()
                .await?;

            // Google signals "still pending" through a non-2xx status with
            // an error body, so classify the body instead of the status.
            let parsed: TokenPollResponse = response.json().await?;
            debug!(error = ?parsed.error, "token poll response");

            match classify_poll_response(&parsed) {
                PollOutcome::Authorized(token) => return Ok(token),
                PollOutcome::Pending(Some(new_interval)) => {
                    interval = Duration::from_secs(new_interval);
                }
                PollOutcome::Pending(None) => {}
                PollOutcome::Failed(reason) => return Err(StarsManagerError::AuthError(reason)),
            }
        }
    }
}
