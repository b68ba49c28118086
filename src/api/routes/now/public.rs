//! Public types for the now API
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NowQuery {
    /// Overrides the configured calendar timezone
    pub timezone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowResponse {
    pub utc: String,
    pub timezone: String,
    pub local: String,
    pub local_date: String,
    pub local_time: String,
}
