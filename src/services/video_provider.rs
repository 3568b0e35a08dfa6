//! Video-provider client.
//!
//! Wraps the external live-video provisioning API behind a uniform call
//! contract. Exactly two operations are used: creating a live-ingest
//! resource at signup and resetting its stream key. Liveness of a session
//! is a locally-toggled flag and is never synced with the provider.
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::VideoProviderConfig;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct VideoProviderClient {
    http: Client,
    base_url: String,
    token_id: String,
    token_secret: String,
}

/// Outcome of a single provider call.
///
/// Transport failures (DNS, connect, timeout) are folded in rather than
/// propagated: callers treat them and non-2xx statuses as the same class
/// of upstream failure.
#[derive(Debug)]
pub struct ProviderCallResult {
    pub success: bool,
    pub status: Option<u16>,
    pub data: Value,
    pub error: Option<String>,
}

impl ProviderCallResult {
    fn describe(&self) -> String {
        match (&self.error, self.status) {
            (Some(err), _) => err.clone(),
            (None, Some(status)) => format!("provider returned status {status}"),
            (None, None) => "provider call failed".to_string(),
        }
    }
}

/// Fields persisted on the user row after provisioning.
#[derive(Debug)]
pub struct LiveStreamResource {
    pub provider_stream_id: String,
    pub stream_key: String,
    pub playback_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LiveStreamEnvelope {
    data: LiveStreamData,
}

#[derive(Debug, Deserialize)]
struct LiveStreamData {
    id: String,
    stream_key: String,
    #[serde(default)]
    playback_ids: Vec<PlaybackId>,
}

#[derive(Debug, Deserialize)]
struct PlaybackId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StreamKeyEnvelope {
    data: StreamKeyData,
}

#[derive(Debug, Deserialize)]
struct StreamKeyData {
    stream_key: String,
}

impl VideoProviderClient {
    pub fn new(config: &VideoProviderConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_id: config.token_id.clone(),
            token_secret: config.token_secret.clone(),
        }
    }

    /// Issue one authenticated request against the provider.
    ///
    /// The JSON response is parsed regardless of status code;
    /// `success` reflects only whether the status was 2xx.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ProviderCallResult {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method, &url)
            .basic_auth(&self.token_id, Some(&self.token_secret));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%url, error = %err, "video provider request failed");
                return ProviderCallResult {
                    success: false,
                    status: None,
                    data: Value::Null,
                    error: Some(err.to_string()),
                };
            }
        };

        let status = response.status();
        match response.json::<Value>().await {
            Ok(data) => ProviderCallResult {
                success: status.is_success(),
                status: Some(status.as_u16()),
                data,
                error: None,
            },
            Err(err) => ProviderCallResult {
                success: false,
                status: Some(status.as_u16()),
                data: Value::Null,
                error: Some(err.to_string()),
            },
        }
    }

    /// Provision a new live-ingest resource with public playback and
    /// low-latency mode.
    pub async fn create_live_stream(&self) -> Result<LiveStreamResource> {
        let body = json!({
            "playback_policy": ["public"],
            "new_asset_settings": { "playback_policy": ["public"] },
            "latency_mode": "low",
        });

        let result = self
            .call(Method::POST, "/video/v1/live-streams", Some(&body))
            .await;
        if !result.success {
            return Err(AppError::Upstream(result.describe()));
        }

        parse_live_stream(result.data)
    }

    /// Rotate the ingest key for an existing provider stream.
    pub async fn reset_stream_key(&self, provider_stream_id: &str) -> Result<String> {
        let path = format!("/video/v1/live-streams/{provider_stream_id}/reset-stream-key");

        let result = self.call(Method::POST, &path, None).await;
        if !result.success {
            return Err(AppError::Upstream(result.describe()));
        }

        let envelope: StreamKeyEnvelope = serde_json::from_value(result.data)
            .map_err(|e| AppError::Upstream(format!("unexpected provider response: {e}")))?;

        Ok(envelope.data.stream_key)
    }
}

fn parse_live_stream(data: Value) -> Result<LiveStreamResource> {
    let envelope: LiveStreamEnvelope = serde_json::from_value(data)
        .map_err(|e| AppError::Upstream(format!("unexpected provider response: {e}")))?;

    Ok(LiveStreamResource {
        provider_stream_id: envelope.data.id,
        stream_key: envelope.data.stream_key,
        playback_id: envelope.data.playback_ids.into_iter().next().map(|p| p.id),
    })
}
