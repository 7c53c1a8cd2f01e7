//! Image Search Cache Library
//!
//! Mirrors a remote, paginated, token-authenticated image catalog in memory and
//! serves ranked multi-field text search over it.
//!
//! ## Modules
//! - **`catalog`**: The remote side. Credential handling, retrying authenticated GETs,
//!   id listing and detail retrieval.
//! - **`store`**: The `PictureStore`, which keeps the local mirror in sync with minimal
//!   remote calls and publishes immutable snapshots for readers.
//! - **`search`**: Tokenizers, per-field inverted indexes, frequency ranking and the HTTP handlers.
//! - **`config`**: Runtime configuration from flags and environment.
//! - **`error`**: The error taxonomy shared by all of the above.

pub mod catalog;
pub mod config;
pub mod error;
pub mod search;
pub mod store;
