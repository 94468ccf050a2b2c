use std::{cell::RefCell, rc::Rc};

use protocol::{Notification, TrackSelection};

use crate::{
    engine::{Engine, EngineEvent, EventSink},
    Mediator,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Open(String),
    SetPaused(bool),
    Stop,
    StepBackward,
    StepForward,
    SetChapter(i64),
    SetTime(f64),
    SetSpeed(f64),
    AudioTrack(TrackSelection),
    SubtitleTrack(TrackSelection),
    VideoTrack(TrackSelection),
    Volume(i64),
    Mute(bool),
    Message(String),
}

/// Remembers every call. Chapters `0..chapters` can be jumped to.
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub(crate) calls: Vec<Call>,
    pub(crate) chapter: i64,
    pub(crate) chapters: i64,
    pub(crate) sink: Option<EventSink>,
}

impl RecordingEngine {
    pub(crate) fn with_chapters(chapters: i64, current: i64) -> Self {
        Self {
            chapter: current,
            chapters,
            ..Default::default()
        }
    }

    pub(crate) fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub(crate) fn send(&self, event: EngineEvent) {
        if let Some(sink) = &self.sink {
            sink.send(event).ok();
        }
    }
}

impl Engine for RecordingEngine {
    fn open(&mut self, path: &str) {
        self.calls.push(Call::Open(path.to_string()));
    }

    fn set_paused(&mut self, paused: bool) {
        self.calls.push(Call::SetPaused(paused));
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn step_backward(&mut self) {
        self.calls.push(Call::StepBackward);
    }

    fn step_forward(&mut self) {
        self.calls.push(Call::StepForward);
    }

    fn chapter(&self) -> i64 {
        self.chapter
    }

    fn set_chapter(&mut self, index: i64) -> bool {
        self.calls.push(Call::SetChapter(index));
        if (0..self.chapters).contains(&index) {
            self.chapter = index;
            true
        } else {
            false
        }
    }

    fn set_time(&mut self, seconds: f64) {
        self.calls.push(Call::SetTime(seconds));
    }

    fn set_speed(&mut self, speed: f64) {
        self.calls.push(Call::SetSpeed(speed));
    }

    fn set_audio_track(&mut self, track: TrackSelection) {
        self.calls.push(Call::AudioTrack(track));
    }

    fn set_subtitle_track(&mut self, track: TrackSelection) {
        self.calls.push(Call::SubtitleTrack(track));
    }

    fn set_video_track(&mut self, track: TrackSelection) {
        self.calls.push(Call::VideoTrack(track));
    }

    fn set_volume(&mut self, level: i64) {
        self.calls.push(Call::Volume(level));
    }

    fn set_mute(&mut self, muted: bool) {
        self.calls.push(Call::Mute(muted));
    }

    fn show_message(&mut self, text: &str) {
        self.calls.push(Call::Message(text.to_string()));
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }
}

pub(crate) type Seen = Rc<RefCell<Vec<Notification>>>;

/// Subscribes a listener that collects everything `mediator` emits.
pub(crate) fn recorder(mut mediator: Mediator) -> (Mediator, Seen) {
    let seen = Seen::default();
    let collect = Rc::clone(&seen);
    mediator.subscribe(move |n: &Notification| collect.borrow_mut().push(n.clone()));
    (mediator, seen)
}

/// A wired mediator attached to a fresh engine, with the attach calls cleared.
pub(crate) fn attached(
    engine: RecordingEngine,
) -> (Mediator, Rc<RefCell<RecordingEngine>>, Seen) {
    let engine = Rc::new(RefCell::new(engine));
    let (mut mediator, seen) = recorder(Mediator::default());
    mediator.attach(&engine, true);
    engine.borrow_mut().take_calls();
    (mediator, engine, seen)
}
