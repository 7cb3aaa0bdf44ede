use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::ApiError;

/// Identifies the calling application; sent with every request.
const APP_ID_HEADER: &str = "appid";
const APP_ID: &str = "nike";

/// Creates and executes a GET request for the given URL,
/// reading the entire response body before parsing it as JSON.
pub(super) async fn get_json(url: Url) -> Result<Value, ApiError> {
    let path = url.path().to_string();

    // Each request gets its own client, so no connections are pooled across calls.
    let client = reqwest::Client::builder()
        .build()
        .map_err(ApiError::Transport)?;

    let mut response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .header(APP_ID_HEADER, APP_ID)
        .send()
        .await
        .map_err(|error| {
            warn!(%path, %error, "Nike+ API request failed");
            ApiError::Transport(error)
        })?;

    // We don't judge the status code; the body is all we hand back.
    let status = response.status();

    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(error) => {
                warn!(%path, %error, "Nike+ API response stream failed");
                return Err(ApiError::Transport(error));
            }
        }
    }
    debug!(%path, status = status.as_u16(), bytes = body.len(), "received Nike+ API response");

    parse_body(&body).map_err(|source| {
        warn!(%path, status = status.as_u16(), error = %source, "Nike+ API response was not JSON");
        ApiError::Parse {
            status: status.as_u16(),
            source,
        }
    })
}

/// Parses a response body. An empty body is treated as `null`.
fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
}
