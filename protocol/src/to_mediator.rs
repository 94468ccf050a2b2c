use ordered_float::NotNan;
use serde::{Deserialize, Serialize};
use url::Url;

/// Which track to select. `None` turns the track kind off.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum TrackSelection {
    None,
    Id(i64),
}

impl From<i64> for TrackSelection {
    fn from(id: i64) -> Self {
        TrackSelection::Id(id)
    }
}

/// Requests from the UI. None of them has a reply, effects show up as
/// notifications later on.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Command {
    Open(Vec<Url>),
    PlayDisc(Url),
    PlayStream(Url),
    PlayItem { playlist: u64, item: u64 },
    PlayDevice(Url),
    Pause,
    Unpause,
    Stop,
    StepBackward,
    StepForward,
    NextChapter,
    PrevChapter,
    Chapter(i64),
    Seek(NotNan<f64>),
    SpeedUp,
    SpeedDown,
    SetSpeed(NotNan<f64>),
    SetAudioTrack(TrackSelection),
    SetSubtitleTrack(TrackSelection),
    SetVideoTrack(TrackSelection),
    SetVolume(i64),
    SetMute(bool),
    SendStatus,
}
