use crate::store::types::{Picture, SyncReport};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// One of `author`, `camera`, `tags`. Anything else searches every field.
    pub field: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Picture>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub report: Option<SyncReport>,
    pub error: Option<String>,
}
