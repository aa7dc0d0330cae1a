//! The NapCat HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use napsign_config::NapcatServiceConfig;
use napsign_core::{GroupId, RemoteError, SignService};

/// Fixed per-request timeout; a hung service cannot stall a batch for more
/// than this per call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stateless client for the two NapCat endpoints the daemon consumes.
pub struct NapcatClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NapcatClient {
    pub fn new(config: &NapcatServiceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: format!("http://{}:{}", config.host, config.port),
            token: (!config.token.is_empty()).then(|| config.token.clone()),
        })
    }

    /// POST `/get_group_list` and extract every joined group's id.
    pub async fn list_groups(&self) -> Result<Vec<GroupId>, RemoteError> {
        let payload = self.post("/get_group_list", json!({ "no_cache": false })).await?;
        if crate::response::list_ok(&payload) {
            Ok(crate::response::extract_group_ids(&payload))
        } else {
            Err(RemoteError::Rejected(crate::response::failure_message(
                &payload,
                "group listing failed with no reason given",
            )))
        }
    }

    /// POST `/set_group_sign` for one group. Returns the service's message.
    pub async fn set_group_sign(&self, group: &GroupId) -> Result<String, RemoteError> {
        let payload = self
            .post("/set_group_sign", json!({ "group_id": group.as_str() }))
            .await?;
        if crate::response::sign_ok(&payload) {
            Ok(crate::response::failure_message(&payload, "check-in succeeded"))
        } else {
            Err(RemoteError::Rejected(crate::response::failure_message(
                &payload,
                "check-in failed with no reason given",
            )))
        }
    }

    /// Shared request path: POST JSON, map transport failures, demand HTTP
    /// 200, parse the body as JSON.
    async fn post(&self, path: &str, body: Value) -> Result<Value, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, body = %body, "Sending NapCat request");

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;
        debug!(status = %status, body = %text, "NapCat response");

        if status != StatusCode::OK {
            return Err(RemoteError::BadStatus(status.as_u16()));
        }
        serde_json::from_str(&text).map_err(|_| RemoteError::MalformedResponse)
    }
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_connect() {
        RemoteError::Unreachable
    } else {
        RemoteError::Other(error.to_string())
    }
}

#[async_trait]
impl SignService for NapcatClient {
    async fn list_groups(&self) -> Result<Vec<GroupId>, RemoteError> {
        NapcatClient::list_groups(self).await
    }

    async fn check_in(&self, group: &GroupId) -> Result<String, RemoteError> {
        self.set_group_sign(group).await
    }
}
