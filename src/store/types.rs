//! Store Data Types
//!
//! The cached entity and the summaries reported by the store.

use serde::{Deserialize, Serialize};

/// A single catalog picture as mirrored in the local cache.
///
/// Built only through [`Picture::from_record`] when it comes from the remote,
/// so every cached picture has a non-empty `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub id: String,
    pub author: String,
    pub camera: String,
    pub tags: String,
    pub cropped_picture: String,
    pub full_picture: String,
}

/// A detail record exactly as the remote sends it.
///
/// Unknown fields are dropped during deserialization and any recognized field
/// may be missing or `null`.
#[derive(Debug, Default, Deserialize)]
pub struct PictureRecord {
    pub id: Option<String>,
    pub author: Option<String>,
    pub camera: Option<String>,
    pub tags: Option<String>,
    pub cropped_picture: Option<String>,
    pub full_picture: Option<String>,
}

impl Picture {
    /// Returns `None` when the record carries no usable id.
    pub fn from_record(record: PictureRecord) -> Option<Self> {
        let id = record.id.filter(|id| !id.trim().is_empty())?;

        Some(Self {
            id,
            author: record.author.unwrap_or_default(),
            camera: record.camera.unwrap_or_default(),
            tags: record.tags.unwrap_or_default(),
            cropped_picture: record.cropped_picture.unwrap_or_default(),
            full_picture: record.full_picture.unwrap_or_default(),
        })
    }
}

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub pass_id: String,
    /// Distinct ids reported by the remote listing.
    pub listed: usize,
    pub added: usize,
    pub removed: usize,
    /// New ids whose detail could not be fetched this pass.
    pub skipped: usize,
    /// `false` when the pass found nothing to change and kept the current index.
    pub reindexed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub pictures: usize,
    pub author_tokens: usize,
    pub camera_tokens: usize,
    pub tag_tokens: usize,
}
