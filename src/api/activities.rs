use serde_json::Value;

use super::{ApiError, NikeClient, Params};

const ACTIVITIES_PATH: &str = "/activities";

fn activity_path(activity_id: &str) -> String {
    format!("{ACTIVITIES_PATH}/{activity_id}")
}

fn activity_gps_path(activity_id: &str) -> String {
    format!("{ACTIVITIES_PATH}/{activity_id}/gps")
}

fn experience_type_path(experience_type: &str) -> String {
    format!("{ACTIVITIES_PATH}/{experience_type}")
}

/// The individual API methods.
///
/// Identifiers are placed into the path exactly as given, without validation.
impl NikeClient {
    /// Aggregate sport data across the experiences the user participates in.
    pub async fn aggregate(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.get("/", params).await
    }

    /// Lists the user's activities.
    pub async fn list_activities(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.get(ACTIVITIES_PATH, params).await
    }

    /// Details for a single activity.
    pub async fn get_activity(
        &self,
        activity_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, ApiError> {
        self.get(&activity_path(activity_id), params).await
    }

    /// GPS data for a single activity. Only RUNNING activities have any.
    pub async fn get_activity_gps(
        &self,
        activity_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, ApiError> {
        self.get(&activity_gps_path(activity_id), params).await
    }

    /// The user's activities of a given experience type, e.g. `RUNNING`.
    pub async fn get_by_experience_type(
        &self,
        experience_type: &str,
        params: Option<&Params>,
    ) -> Result<Value, ApiError> {
        self.get(&experience_type_path(experience_type), params).await
    }
}
