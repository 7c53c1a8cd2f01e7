//! Remote Catalog Module
//!
//! Everything that talks to the remote image catalog.
//!
//! ## Workflow
//! 1. **Login**: The API key is exchanged for a bearer credential.
//! 2. **Listing**: Picture ids are collected page by page, up to a configured page cap.
//! 3. **Details**: Each new id is fetched individually and turned into a `Picture`.
//!
//! A request that fails with an HTTP error status gets one fresh login and one retry.
//!
//! ## Submodules
//! - **`auth`**: `Credential` and the retrying `AuthenticatedClient`.
//! - **`fetcher`**: `CatalogFetcher`, pagination and detail retrieval.
//! - **`protocol`**: Wire DTOs of the remote API.
//! - **`source`**: The `CatalogSource` trait the store synchronizes from.

pub mod auth;
pub mod fetcher;
pub mod protocol;
pub mod source;

#[cfg(test)]
mod tests;
