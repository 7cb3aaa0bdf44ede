use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use super::{http_client, Params};

/// The host serving the Nike+ API. HTTPS, so port 443.
pub const API_HOST: &str = "api.nike.com";

/// The path every API method lives beneath.
pub const API_BASE_PATH: &str = "/me/sport";

/// Possible errors while talking to the Nike+ API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be formed; nothing was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The connection or response stream failed.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// The response body was not valid JSON.
    #[error("unable to parse response body (HTTP {status}): {source}")]
    Parse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Where requests are sent.
///
/// Only tests should need anything other than the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    /// Scheme and authority, e.g. `https://api.nike.com`.
    pub origin: String,
    /// Prefix for every method path, e.g. `/me/sport`.
    pub base_path: String,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            origin: format!("https://{API_HOST}"),
            base_path: API_BASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NikeClient {
    /// The access token sent along with every request.
    access_token: String,
    endpoint: ApiEndpoint,
}

impl NikeClient {
    /// Creates a new API client around the given access token.
    ///
    /// The token is not validated; the API itself will reject it if need be.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_endpoint(access_token, ApiEndpoint::default())
    }

    /// Creates a client that sends its requests to a different origin.
    pub fn with_endpoint(access_token: impl Into<String>, endpoint: ApiEndpoint) -> Self {
        Self {
            access_token: access_token.into(),
            endpoint,
        }
    }

    /// The access token sent along with every request.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The origin and base path requests are sent to.
    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Performs a GET request against the given method path,
    /// e.g. `/activities`, returning the parsed JSON body.
    ///
    /// An empty body is returned as [`Value::Null`].
    /// `params` is accepted but not sent: only the access token
    /// is placed within the query string.
    pub async fn get(&self, path: &str, params: Option<&Params>) -> Result<Value, ApiError> {
        let url = self.request_url(path)?;
        debug!(
            path = url.path(),
            params = params.map_or(0, Params::len),
            "issuing Nike+ API request"
        );
        http_client::get_json(url).await
    }

    /// Like [`NikeClient::get`], but returns immediately and hands the result
    /// to `callback` once the response has been fully read.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn get_with_callback<F>(
        &self,
        path: &str,
        params: Option<Params>,
        callback: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<Value, ApiError>) + Send + 'static,
    {
        let client = self.clone();
        let path = path.to_string();
        tokio::spawn(async move {
            let result = client.get(&path, params.as_ref()).await;
            callback(result);
        })
    }

    /// Builds the full URL for the given method path, with our token attached.
    ///
    /// `?` and `#` within the path or token are percent-encoded, so the token
    /// always lands in the query string. Dot segments are still resolved.
    pub(super) fn request_url(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoint.origin).map_err(|error| {
            ApiError::InvalidArgument(format!("unable to parse API origin: {error}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidArgument(format!(
                "API origin {} has no host",
                self.endpoint.origin
            )));
        }

        url.set_path(&format!("{}{}", self.endpoint.base_path, path));
        url.set_query(Some(&format!("access_token={}", self.access_token)));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_nike() {
        let client = NikeClient::new("abc123");
        assert_eq!(client.endpoint(), &ApiEndpoint::default());
        let url = client.request_url("/activities").expect("should form URL");

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some(API_HOST));
        assert_eq!(url.port_or_known_default(), Some(443));
        assert_eq!(url.path(), "/me/sport/activities");
        assert_eq!(url.query(), Some("access_token=abc123"));
    }

    #[test]
    fn aggregate_path_keeps_trailing_slash() {
        let client = NikeClient::new("abc123");
        let url = client.request_url("/").expect("should form URL");
        assert_eq!(
            url.as_str(),
            "https://api.nike.com/me/sport/?access_token=abc123"
        );
    }

    #[test]
    fn any_token_is_accepted() {
        let client = NikeClient::new("");
        assert_eq!(client.access_token(), "");
        let url = client.request_url("/").expect("should form URL");
        assert_eq!(url.query(), Some("access_token="));
    }

    #[test]
    fn hash_in_identifier_stays_in_path() {
        let client = NikeClient::new("tok");
        let url = client.request_url("/activities/42#x").expect("should form URL");

        assert_eq!(url.path(), "/me/sport/activities/42%23x");
        assert_eq!(url.query(), Some("access_token=tok"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn hash_in_token_stays_in_query() {
        let client = NikeClient::new("ab#cd");
        let url = client.request_url("/").expect("should form URL");

        assert_eq!(url.query(), Some("access_token=ab%23cd"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn question_mark_in_identifier_stays_in_path() {
        let client = NikeClient::new("tok");
        let url = client.request_url("/activities/a?b").expect("should form URL");

        assert_eq!(url.path(), "/me/sport/activities/a%3Fb");
        assert_eq!(url.query(), Some("access_token=tok"));
    }

    #[test]
    fn origin_without_host_is_invalid_argument() {
        let endpoint = ApiEndpoint {
            origin: "mailto:someone@example.com".to_string(),
            base_path: API_BASE_PATH.to_string(),
        };
        let client = NikeClient::with_endpoint("abc123", endpoint);

        let error = client.request_url("/").expect_err("should not form URL");
        assert!(matches!(error, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn unusable_origin_is_invalid_argument() {
        let endpoint = ApiEndpoint {
            origin: "not a url".to_string(),
            base_path: API_BASE_PATH.to_string(),
        };
        let client = NikeClient::with_endpoint("abc123", endpoint);

        let error = client.request_url("/").expect_err("should not form URL");
        assert!(matches!(error, ApiError::InvalidArgument(_)));
    }
}
