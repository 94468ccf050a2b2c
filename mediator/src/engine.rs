use protocol::TrackSelection;
use serde::Deserialize;
use tokio::sync::mpsc;

pub type EventSink = mpsc::UnboundedSender<EngineEvent>;
pub type EventSource = mpsc::UnboundedReceiver<EngineEvent>;

/// The playback engine as seen by the mediator. Implementations do the actual
/// decoding and rendering, the mediator only tells them what to do.
pub trait Engine {
    fn open(&mut self, path: &str);
    fn set_paused(&mut self, paused: bool);
    fn stop(&mut self);
    fn step_backward(&mut self);
    fn step_forward(&mut self);

    /// Index of the current chapter, negative if there is none.
    fn chapter(&self) -> i64;

    /// Returns false if `index` is not a chapter that can be jumped to.
    fn set_chapter(&mut self, index: i64) -> bool;

    fn set_time(&mut self, seconds: f64);
    fn set_speed(&mut self, speed: f64);
    fn set_audio_track(&mut self, track: TrackSelection);
    fn set_subtitle_track(&mut self, track: TrackSelection);
    fn set_video_track(&mut self, track: TrackSelection);
    fn set_volume(&mut self, level: i64);
    fn set_mute(&mut self, muted: bool);

    /// Display a short-lived message on top of the video.
    fn show_message(&mut self, text: &str);

    /// All future notifications should be sent to `sink`, replacing any
    /// previous one. Sending may happen from any thread.
    fn subscribe(&mut self, sink: EventSink);
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PlayTime(f64),
    PlayLength(f64),
    Started,
    Paused(bool),
    Finished,
    Title(String),
    Chapters(Vec<RawChapter>),
    Tracks(Vec<RawTrack>),
    VideoSize { width: u32, height: u32 },
}

impl EngineEvent {
    pub fn name(&self) -> &'static str {
        use EngineEvent::*;
        match self {
            PlayTime(_) => "playTimeChanged",
            PlayLength(_) => "playLengthChanged",
            Started => "playbackStarted",
            Paused(_) => "pausedChanged",
            Finished => "playbackFinished",
            Title(_) => "mediaTitleChanged",
            Chapters(_) => "chaptersChanged",
            Tracks(_) => "tracksChanged",
            VideoSize { .. } => "videoSizeChanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawChapter {
    pub time: f64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Sub,
    #[serde(other)]
    Other,
}

impl From<&str> for TrackKind {
    fn from(name: &str) -> Self {
        match name {
            "video" => TrackKind::Video,
            "audio" => TrackKind::Audio,
            "sub" => TrackKind::Sub,
            _ => TrackKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTrack {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RawChapter {
    pub fn new(time: f64, title: impl Into<String>) -> Self {
        Self {
            time,
            title: Some(title.into()),
        }
    }
}

impl RawTrack {
    pub fn new(id: i64, kind: TrackKind) -> Self {
        Self {
            id,
            kind,
            codec: None,
            lang: None,
            title: None,
        }
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
