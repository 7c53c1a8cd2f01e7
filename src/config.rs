//! Runtime configuration.
//!
//! Every option can be given as a flag or through its `IMAGE_SEARCH_*` environment variable.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "http://interview.agileengine.com/auth";
pub const DEFAULT_CATALOG_URL: &str = "http://interview.agileengine.com/images";

/// Highest listing page the fetcher will request in one pass.
///
/// The remote reports its own page count, but only the first pages are ever
/// mirrored locally. Raise this to cache more of the catalog.
pub const DEFAULT_PAGE_CAP: u32 = 2;

#[derive(Debug, Clone, Parser)]
#[command(name = "image-search", about = "Cached, ranked search over a remote image catalog")]
pub struct Config {
    /// API key exchanged for a bearer token at the auth endpoint.
    #[arg(long, env = "IMAGE_SEARCH_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "IMAGE_SEARCH_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub auth_url: String,

    #[arg(long, env = "IMAGE_SEARCH_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    #[arg(long, env = "IMAGE_SEARCH_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    #[arg(long, env = "IMAGE_SEARCH_PAGE_CAP", default_value_t = DEFAULT_PAGE_CAP)]
    pub page_cap: u32,

    /// Seconds between scheduled synchronization passes. `0` disables the schedule.
    #[arg(long, env = "IMAGE_SEARCH_REFRESH_INTERVAL_SECS", default_value_t = 300)]
    pub refresh_interval_secs: u64,

    #[arg(long, env = "IMAGE_SEARCH_REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    pub request_timeout_ms: u64,

    #[arg(long, env = "IMAGE_SEARCH_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        match self.refresh_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
