//! A small client for the Nike+ activity API.
//!
//! ```no_run
//! # async fn run() -> Result<(), nikeplus::ApiError> {
//! let client = nikeplus::NikeClient::new("access token");
//! let activities = client.list_activities(None).await?;
//! println!("{activities}");
//! # Ok(())
//! # }
//! ```

mod api;

pub use api::{ApiEndpoint, ApiError, NikeClient, ParamValue, Params, API_BASE_PATH, API_HOST};
