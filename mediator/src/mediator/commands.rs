use protocol::{Command, Notification, PlaybackState, TrackSelection};
use url::Url;

use super::{Mediator, Session};
use crate::{
    engine::{Engine, TrackKind},
    errors::{MediatorError, MediatorResult},
};

/// `file://` urls are given to the engine as paths, anything else as is.
fn locator(url: &Url) -> String {
    if url.scheme() == "file" {
        if let Ok(path) = url.to_file_path() {
            return path.to_string_lossy().into_owned();
        }
    }
    url.as_str().to_string()
}

fn log_failure(what: &str, res: MediatorResult<()>) {
    if let Err(e) = res {
        log::warn!("Command '{}' failed: {}", what, e);
    }
}

impl Mediator {
    /// Opens the first of `sources`. The rest are dropped, queueing them is up
    /// to a playlist.
    ///
    /// Events still queued from the previous media are thrown away unhandled,
    /// everything the engine sends from `open` on belongs to the new one.
    pub fn open(&mut self, sources: &[Url]) {
        let res = self.try_open(sources);
        log_failure("open", res);
    }

    fn try_open(&mut self, sources: &[Url]) -> MediatorResult<()> {
        let (first, rest) = sources.split_first().ok_or(MediatorError::EmptyOpen)?;
        if !rest.is_empty() {
            log::info!("Ignoring {} sources after the first", rest.len());
        }

        let path = locator(first);
        log::debug!("opening {}", path);
        let stale = self.discard_pending();
        if stale > 0 {
            log::debug!("Dropped {} events of the previous media", stale);
        }
        self.with_engine(|e| e.open(&path))?;
        self.session = Session::default();
        Ok(())
    }

    pub fn play_disc(&mut self, _disc: &Url) {
        log_failure("play disc", Err(MediatorError::Unsupported("disc")));
    }

    pub fn play_stream(&mut self, _stream: &Url) {
        log_failure("play stream", Err(MediatorError::Unsupported("stream")));
    }

    pub fn play_item(&mut self, _playlist: u64, _item: u64) {
        log_failure("play item", Err(MediatorError::Unsupported("playlist item")));
    }

    pub fn play_device(&mut self, _device: &Url) {
        log_failure("play device", Err(MediatorError::Unsupported("device")));
    }

    pub fn pause(&mut self) {
        self.forward("pause", |e| e.set_paused(true));
    }

    pub fn unpause(&mut self) {
        self.forward("unpause", |e| e.set_paused(false));
    }

    pub fn stop(&mut self) {
        self.forward("stop", |e| e.stop());
    }

    pub fn step_backward(&mut self) {
        self.forward("step backward", |e| e.step_backward());
    }

    pub fn step_forward(&mut self) {
        self.forward("step forward", |e| e.step_forward());
    }

    pub fn navigate_to_next_chapter(&mut self) {
        let current = match self.with_engine(|e| e.chapter()) {
            Ok(current) => current,
            Err(e) => return log_failure("next chapter", Err(e)),
        };
        if current < 0 {
            log::warn!("Not going to the next chapter, not inside of one");
            return;
        }
        self.navigate_to_chapter(current + 1);
    }

    pub fn navigate_to_prev_chapter(&mut self) {
        match self.with_engine(|e| e.chapter()) {
            Ok(current) => self.navigate_to_chapter((current - 1).max(0)),
            Err(e) => log_failure("previous chapter", Err(e)),
        }
    }

    /// Jumping to a chapter the engine refuses stops playback.
    pub fn navigate_to_chapter(&mut self, chapter: i64) {
        let res = self.try_navigate_to_chapter(chapter);
        log_failure("chapter", res);
    }

    fn try_navigate_to_chapter(&mut self, chapter: i64) -> MediatorResult<()> {
        log::debug!("forwarding 'chapter {}'", chapter);
        if self.with_engine(|e| e.set_chapter(chapter))? {
            return Ok(());
        }

        log::info!("Chapter {} is out of range, stopping", chapter);
        self.with_engine(|e| e.stop())?;
        // TODO: hand over to the playlist to open the next item instead
        self.set_state(PlaybackState::Stopped);
        Ok(())
    }

    pub fn navigate_to_time(&mut self, seconds: f64) {
        self.forward("seek", |e| e.set_time(seconds));
    }

    pub fn speed_up(&mut self) {
        let speed = self.config.speed.up(self.speed);
        self.set_speed(speed);
    }

    pub fn speed_down(&mut self) {
        let speed = self.config.speed.down(self.speed);
        self.set_speed(speed);
    }

    /// Unlike [Mediator::speed_up] and [Mediator::speed_down] the value is not
    /// clamped to the configured limits.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.forward("set speed", |e| e.set_speed(speed));
        self.osd_message(format!("Speed: {speed}"));
    }

    pub fn set_audio_track(&mut self, track: TrackSelection) {
        self.select_track(TrackKind::Audio, track, |e| e.set_audio_track(track));
    }

    pub fn set_subtitle_track(&mut self, track: TrackSelection) {
        self.select_track(TrackKind::Sub, track, |e| e.set_subtitle_track(track));
    }

    pub fn set_video_track(&mut self, track: TrackSelection) {
        self.select_track(TrackKind::Video, track, |e| e.set_video_track(track));
    }

    /// Ids the engine never reported are still passed on, the engine has the
    /// final say.
    fn select_track(
        &self,
        kind: TrackKind,
        track: TrackSelection,
        select: impl FnOnce(&mut dyn Engine),
    ) {
        if let TrackSelection::Id(id) = track {
            if !self.session.tracks.contains(kind, id) {
                log::warn!("Selecting {:?} track {} that was never reported", kind, id);
            }
        }
        self.forward("select track", select);
    }

    pub fn set_volume(&mut self, volume: i64) {
        self.forward("set volume", |e| e.set_volume(volume));
        self.osd_message(format!("Volume: {volume}"));
    }

    pub fn set_mute(&mut self, muted: bool) {
        self.forward("set mute", |e| e.set_mute(muted));
        self.osd_message(format!("Mute: {}", if muted { "on" } else { "off" }));
    }

    fn osd_message(&self, text: String) {
        if self.config.osd_messages {
            self.forward("show message", |e| e.show_message(&text));
        }
    }

    pub fn execute(&mut self, command: Command) {
        use Command::*;
        log::debug!("executing {:?}", command);
        match command {
            Open(sources) => self.open(&sources),
            PlayDisc(url) => self.play_disc(&url),
            PlayStream(url) => self.play_stream(&url),
            PlayItem { playlist, item } => self.play_item(playlist, item),
            PlayDevice(url) => self.play_device(&url),
            Pause => self.pause(),
            Unpause => self.unpause(),
            Stop => self.stop(),
            StepBackward => self.step_backward(),
            StepForward => self.step_forward(),
            NextChapter => self.navigate_to_next_chapter(),
            PrevChapter => self.navigate_to_prev_chapter(),
            Chapter(chapter) => self.navigate_to_chapter(chapter),
            Seek(seconds) => self.navigate_to_time(seconds.into_inner()),
            SpeedUp => self.speed_up(),
            SpeedDown => self.speed_down(),
            SetSpeed(speed) => self.set_speed(speed.into_inner()),
            SetAudioTrack(track) => self.set_audio_track(track),
            SetSubtitleTrack(track) => self.set_subtitle_track(track),
            SetVideoTrack(track) => self.set_video_track(track),
            SetVolume(volume) => self.set_volume(volume),
            SetMute(muted) => self.set_mute(muted),
            SendStatus => {
                let status = self.snapshot();
                self.emit(Notification::Status(status));
            }
        }
    }
}
