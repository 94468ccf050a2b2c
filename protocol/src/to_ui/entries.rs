use serde::{Deserialize, Serialize};

/// A chapter as shown in a menu. `index` is the position in the list it was
/// delivered in and is only meaningful until the next `ChaptersAvailable`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ChapterEntry {
    pub index: i64,
    pub label: String,
}

/// A selectable stream. `id` is assigned by the engine and must be passed back
/// unchanged when selecting the track.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TrackEntry {
    pub id: i64,
    pub label: String,
}

impl ChapterEntry {
    pub fn new(index: i64, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

impl TrackEntry {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
