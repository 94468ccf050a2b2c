mod commands;
mod translate;

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use protocol::{ChapterEntry, Notification, PlaybackState, Status};
use tokio::{select, sync::mpsc};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    engine::{Engine, EventSource},
    errors::{MediatorError, MediatorResult},
    listener::{Listener, Listeners},
    tracks::Tracks,
};

/// What is known about the currently opened media. Thrown away whenever
/// something new is opened or another engine is attached.
#[derive(Debug, Default)]
struct Session {
    /// Never smaller than `time`, see [Mediator::known_length].
    known_length: f64,
    time: f64,
    title: String,
    chapters: Vec<ChapterEntry>,
    tracks: Tracks,
    video_size: Option<(u32, u32)>,
}

/// Sits between one playback engine and any number of UI listeners. Commands
/// are checked and forwarded to the engine, engine events are turned into
/// [Notification]s.
///
/// Everything happens on one thread. Engines delivering events from elsewhere
/// go through the channel set up by [Mediator::attach], which is drained by
/// [Mediator::dispatch_pending] or [Mediator::run].
#[derive(Debug)]
pub struct Mediator {
    engine: Option<Weak<RefCell<dyn Engine>>>,
    events: Option<EventSource>,
    listeners: Listeners,
    config: Config,
    state: PlaybackState,
    speed: f64,
    session: Session,
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Mediator {
    pub fn new(config: Config) -> Self {
        Self {
            engine: None,
            events: None,
            listeners: Listeners::default(),
            speed: config.speed.initial,
            config,
            state: PlaybackState::Stopped,
            session: Session::default(),
        }
    }

    /// Binds to `engine`, replacing any previous one. Only a weak reference is
    /// kept, the caller decides how long the engine lives.
    ///
    /// Without `wire_notifications` the engine is only commanded and nothing it
    /// reports reaches the mediator.
    pub fn attach<E>(&mut self, engine: &Rc<RefCell<E>>, wire_notifications: bool)
    where
        E: Engine + 'static,
    {
        let engine: Rc<RefCell<dyn Engine>> = engine.clone();
        self.engine = Some(Rc::downgrade(&engine));
        self.events = None;
        self.session = Session::default();

        if wire_notifications {
            let (tx, rx) = mpsc::unbounded_channel();
            match engine.try_borrow_mut() {
                Ok(mut engine) => {
                    engine.subscribe(tx);
                    self.events = Some(rx);
                }
                Err(_) => log::error!("Engine is busy, could not subscribe to it"),
            }
        }
        log::info!(
            "Attached to an engine ({})",
            if self.events.is_some() {
                "wired"
            } else {
                "commands only"
            }
        );

        let speed = self.speed;
        self.forward("set speed", |e| e.set_speed(speed));
    }

    pub fn is_attached(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.strong_count() > 0)
    }

    pub fn subscribe(&mut self, listener: impl Listener + 'static) {
        self.listeners.add(Box::new(listener));
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Best guess of the media duration in seconds. Grows with the reported
    /// playback time when the engine doesn't know the duration.
    pub fn known_length(&self) -> f64 {
        self.session.known_length
    }

    pub fn snapshot(&self) -> Status {
        let session = &self.session;
        let mut status =
            Status::new(self.state, session.time, session.known_length, self.speed);
        status.title = session.title.clone();
        status.chapters = session.chapters.clone();
        status.video_tracks = session.tracks.video.clone();
        status.audio_tracks = session.tracks.audio.clone();
        status.subtitle_tracks = session.tracks.subtitle.clone();
        status.video_size = session.video_size;
        status
    }

    /// Translates every event the engine has sent so far, oldest first.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Throws away every event the engine has sent so far.
    fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while let Some(event) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            log::trace!("discarding {}", event.name());
            dropped += 1;
        }
        dropped
    }

    /// Translates events as they arrive until `token` is cancelled or the
    /// engine drops its sink.
    pub async fn run(&mut self, token: &CancellationToken) -> MediatorResult<()> {
        let mut events = self.events.take().ok_or(MediatorError::NotWired)?;

        loop {
            select! {
                _ = token.cancelled() => {
                    log::debug!("Mediator loop cancelled");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        log::debug!("Engine closed its event sink");
                        break;
                    }
                }
            }
        }

        self.events = Some(events);
        Ok(())
    }

    fn engine(&self) -> MediatorResult<Rc<RefCell<dyn Engine>>> {
        self.engine
            .as_ref()
            .ok_or(MediatorError::Detached)?
            .upgrade()
            .ok_or(MediatorError::EngineGone)
    }

    fn with_engine<R>(&self, f: impl FnOnce(&mut dyn Engine) -> R) -> MediatorResult<R> {
        let engine = self.engine()?;
        let mut borrowed = engine
            .try_borrow_mut()
            .map_err(|_| MediatorError::EngineBusy)?;
        Ok(f(&mut *borrowed))
    }

    fn forward(&self, what: &str, f: impl FnOnce(&mut dyn Engine)) {
        log::debug!("forwarding '{}'", what);
        if let Err(e) = self.with_engine(f) {
            log::warn!("Dropping '{}': {}", what, e);
        }
    }

    fn emit(&mut self, notification: Notification) {
        self.listeners.emit(notification);
    }

    fn set_state(&mut self, state: PlaybackState) {
        log::debug!("state {} -> {}", self.state, state);
        self.state = state;
        self.emit(Notification::StateChanged(state));
    }
}
