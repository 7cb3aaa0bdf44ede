mod activities;
mod client;
mod http_client;
mod params;

pub use client::{ApiEndpoint, ApiError, NikeClient, API_BASE_PATH, API_HOST};
pub use params::{ParamValue, Params};
