//! Search Service Module
//!
//! Answers ranked text queries against the cached catalog without any network I/O.
//!
//! ## Responsibilities
//! - **Tokenization**: Normalizing field values and queries into lowercase tokens.
//! - **Indexing**: One inverted index per searchable field (`author`, `camera`, `tags`).
//! - **Ranking**: Ordering matches by how often they were hit across fields and tokens.
//! - **API**: Exposing search, on-demand refresh and stats over HTTP.
//!
//! ## Submodules
//! - **`index`**: Field table, inverted index and frequency ranking.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`tokenizer`**: Text and tag tokenizers.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod handlers;
pub mod index;
pub mod tokenizer;
pub mod types;
