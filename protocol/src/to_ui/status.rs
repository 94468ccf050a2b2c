use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use super::{ChapterEntry, TrackEntry};
use crate::util::not_nan_or_zero;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        write!(f, "{name}")
    }
}

/// Full picture of the last known playback situation, for UIs that connect late.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Status {
    pub state: PlaybackState,
    pub time: NotNan<f64>,
    pub length: NotNan<f64>,
    pub speed: NotNan<f64>,
    pub title: String,
    pub chapters: Vec<ChapterEntry>,
    pub video_tracks: Vec<TrackEntry>,
    pub audio_tracks: Vec<TrackEntry>,
    pub subtitle_tracks: Vec<TrackEntry>,
    pub video_size: Option<(u32, u32)>,
}

impl Status {
    pub fn new(state: PlaybackState, time: f64, length: f64, speed: f64) -> Self {
        Self {
            state,
            time: not_nan_or_zero(time),
            length: not_nan_or_zero(length),
            speed: not_nan_or_zero(speed),
            title: String::new(),
            chapters: Vec::new(),
            video_tracks: Vec::new(),
            audio_tracks: Vec::new(),
            subtitle_tracks: Vec::new(),
            video_size: None,
        }
    }
}
