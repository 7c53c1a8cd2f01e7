//! Remote Catalog Wire Protocol
//!
//! Request and response bodies exchanged with the remote image catalog.
//! Only the fields the cache consumes are modeled; serde drops everything else.

use serde::{Deserialize, Serialize};

/// Query parameter selecting a listing page (1-based).
pub const PAGE_PARAM: &str = "page";

/// Body of the login request.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// Body returned by the login endpoint.
///
/// Both fields are optional on the wire: a missing token or `auth` flag is a
/// failed login, not a decoding error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub auth: bool,
}

/// Minimal view of a picture inside a listing page.
#[derive(Debug, Serialize, Deserialize)]
pub struct PictureSummary {
    #[serde(default)]
    pub id: Option<String>,
}

/// One page of the catalog listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub pictures: Vec<PictureSummary>,
    #[serde(rename = "pageCount", default = "first_page")]
    pub page_count: u32,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

fn first_page() -> u32 {
    1
}
