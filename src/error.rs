//! Error Taxonomy
//!
//! Failures are split by how far they are allowed to travel:
//!
//! - **`Auth`**: no credential could be obtained. Aborts the current synchronization pass.
//! - **`RemoteUnavailable`**: a listing page or detail request failed after its retry.
//!   Absorbed by the fetcher (truncated listing / skipped picture).
//! - **`Consistency`**: the index points at a picture the store does not hold. Never swallowed.
//! - **`Transport`**: connection failures and timeouts. Propagate and abort the pass.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("remote catalog unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("picture {0} is indexed but missing from the store")]
    Consistency(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
