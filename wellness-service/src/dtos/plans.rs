use serde::{Deserialize, Serialize};

/// Whether a cached-endpoint response came from the cache or a fresh API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Cache,
    Api,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub source: ResponseSource,
    pub data: String,
}
