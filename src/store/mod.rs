//! Picture Store Module
//!
//! The in-memory mirror of the remote catalog and the only place search results come from.
//!
//! ## Core Concepts
//! - **Snapshot**: The cached pictures plus the inverted index built over them, published as one immutable unit.
//! - **Synchronization**: A pass diffs remote ids against cached ids, fetches only the new ones,
//!   rebuilds the index and swaps the new snapshot in.
//! - **Refresh**: A background job that repeats the pass on a schedule.
//!
//! ## Submodules
//! - **`memory`**: `PictureStore` and `Snapshot`.
//! - **`refresh`**: The scheduled synchronization loop.
//! - **`types`**: The `Picture` entity and pass/stat reports.

pub mod memory;
pub mod refresh;
pub mod types;
