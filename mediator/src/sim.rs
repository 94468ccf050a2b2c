//! An [Engine] without any actual media, reacting to commands the way a real
//! player would. Handy for driving a [crate::Mediator] without a screen.

use protocol::TrackSelection;
use serde::Deserialize;

use crate::engine::{Engine, EngineEvent, EventSink, RawChapter, RawTrack};

const FRAME: f64 = 1.0 / 24.0;

/// Description of the pretend media.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Media {
    pub title: String,
    /// Unknown if missing, like for some live streams.
    pub length: Option<f64>,
    pub chapters: Vec<RawChapter>,
    pub tracks: Vec<RawTrack>,
    pub video_size: Option<(u32, u32)>,
}

#[derive(Debug, Default)]
pub struct SimEngine {
    media: Media,
    sink: Option<EventSink>,
    loaded: bool,
    paused: bool,
    time: f64,
    chapter: i64,
    speed: f64,
    volume: i64,
    muted: bool,
    audio: Option<TrackSelection>,
    subtitle: Option<TrackSelection>,
    video: Option<TrackSelection>,
    messages: Vec<String>,
}

impl SimEngine {
    pub fn new(media: Media) -> Self {
        Self {
            media,
            chapter: -1,
            speed: 1.0,
            volume: 100,
            ..Default::default()
        }
    }

    fn send(&self, event: EngineEvent) {
        if let Some(sink) = &self.sink {
            if sink.send(event).is_err() {
                log::debug!("nobody is listening to the sim engine anymore");
            }
        }
    }

    fn seek(&mut self, time: f64) {
        let time = match self.media.length {
            Some(length) => time.clamp(0.0, length),
            None => time.max(0.0),
        };
        self.time = time;
        self.chapter = self
            .media
            .chapters
            .iter()
            .rposition(|c| c.time <= time)
            .map_or(-1, |i| i as i64);
        self.send(EngineEvent::PlayTime(time));
    }

    fn step(&mut self, delta: f64) {
        if !self.loaded {
            return;
        }
        if !self.paused {
            self.paused = true;
            self.send(EngineEvent::Paused(true));
        }
        self.seek(self.time + delta);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn selected(&self) -> [Option<TrackSelection>; 3] {
        [self.video, self.audio, self.subtitle]
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Engine for SimEngine {
    fn open(&mut self, path: &str) {
        log::info!("sim: opening {}", path);
        self.loaded = true;
        self.paused = false;
        self.time = 0.0;
        self.chapter = if self.media.chapters.is_empty() { -1 } else { 0 };

        let title = if self.media.title.is_empty() {
            path.to_string()
        } else {
            self.media.title.clone()
        };
        self.send(EngineEvent::Title(title));
        if let Some(length) = self.media.length {
            self.send(EngineEvent::PlayLength(length));
        }
        self.send(EngineEvent::Chapters(self.media.chapters.clone()));
        self.send(EngineEvent::Tracks(self.media.tracks.clone()));
        if let Some((width, height)) = self.media.video_size {
            self.send(EngineEvent::VideoSize { width, height });
        }
        self.send(EngineEvent::Started);
        self.send(EngineEvent::PlayTime(0.0));
    }

    fn set_paused(&mut self, paused: bool) {
        if self.loaded && self.paused != paused {
            self.paused = paused;
            self.send(EngineEvent::Paused(paused));
        }
    }

    fn stop(&mut self) {
        if self.loaded {
            self.loaded = false;
            self.chapter = -1;
            self.send(EngineEvent::Finished);
        }
    }

    fn step_backward(&mut self) {
        self.step(-FRAME);
    }

    fn step_forward(&mut self) {
        self.step(FRAME);
    }

    fn chapter(&self) -> i64 {
        self.chapter
    }

    fn set_chapter(&mut self, index: i64) -> bool {
        let chapter = usize::try_from(index)
            .ok()
            .and_then(|i| self.media.chapters.get(i));
        match chapter {
            Some(chapter) if self.loaded => {
                let time = chapter.time;
                self.seek(time);
                true
            }
            _ => false,
        }
    }

    fn set_time(&mut self, seconds: f64) {
        if self.loaded {
            self.seek(seconds);
        }
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    fn set_audio_track(&mut self, track: TrackSelection) {
        self.audio = Some(track);
    }

    fn set_subtitle_track(&mut self, track: TrackSelection) {
        self.subtitle = Some(track);
    }

    fn set_video_track(&mut self, track: TrackSelection) {
        self.video = Some(track);
    }

    fn set_volume(&mut self, level: i64) {
        self.volume = level;
    }

    fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn show_message(&mut self, text: &str) {
        log::info!("sim osd: {}", text);
        self.messages.push(text.to_string());
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }
}
