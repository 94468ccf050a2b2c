pub mod entries;
pub mod status;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

pub use self::entries::{ChapterEntry, TrackEntry};
pub use self::status::{PlaybackState, Status};

/// Everything the mediator tells the UI. List-carrying variants always hold the
/// complete list and replace whatever the UI showed before.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Notification {
    StateChanged(PlaybackState),
    TimeChanged {
        time: NotNan<f64>,
        length: NotNan<f64>,
    },
    TitleChanged(String),
    ChaptersAvailable(Vec<ChapterEntry>),
    VideoTracksAvailable(Vec<TrackEntry>),
    AudioTracksAvailable(Vec<TrackEntry>),
    SubtitleTracksAvailable(Vec<TrackEntry>),
    VideoSizeChanged {
        width: u32,
        height: u32,
    },
    Status(Status),
}

impl Notification {
    pub fn time_changed(time: f64, length: f64) -> Self {
        Notification::TimeChanged {
            time: crate::util::not_nan_or_zero(time),
            length: crate::util::not_nan_or_zero(length),
        }
    }

    pub fn name(&self) -> &'static str {
        use Notification::*;
        match self {
            StateChanged(_) => "stateChanged",
            TimeChanged { .. } => "timeChanged",
            TitleChanged(_) => "titleChanged",
            ChaptersAvailable(_) => "chaptersAvailable",
            VideoTracksAvailable(_) => "videoTracksAvailable",
            AudioTracksAvailable(_) => "audioTracksAvailable",
            SubtitleTracksAvailable(_) => "subtitleTracksAvailable",
            VideoSizeChanged { .. } => "videoSizeChanged",
            Status(_) => "status",
        }
    }
}
