use protocol::{Notification, PlaybackState};

use super::Mediator;
use crate::{chapters::build_chapters, engine::EngineEvent, tracks::Tracks};

impl Mediator {
    /// Reacts to one engine event, emitting what the UI needs to know before
    /// returning.
    pub fn handle_event(&mut self, event: EngineEvent) {
        log::debug!("translating {}", event.name());
        match event {
            EngineEvent::PlayTime(time) => self.play_time(time),
            EngineEvent::PlayLength(length) => self.play_length(length),
            EngineEvent::Started => self.set_state(PlaybackState::Playing),
            EngineEvent::Paused(true) => self.set_state(PlaybackState::Paused),
            EngineEvent::Paused(false) => self.set_state(PlaybackState::Playing),
            EngineEvent::Finished => {
                // TODO: let a playlist decide what comes next
                self.set_state(PlaybackState::Stopped)
            }
            EngineEvent::Title(title) => {
                self.session.title.clone_from(&title);
                self.emit(Notification::TitleChanged(title));
            }
            EngineEvent::Chapters(chapters) => {
                let entries = build_chapters(&chapters);
                self.session.chapters.clone_from(&entries);
                self.emit(Notification::ChaptersAvailable(entries));
            }
            EngineEvent::Tracks(tracks) => {
                let tracks = Tracks::build(&tracks);
                self.emit(Notification::VideoTracksAvailable(tracks.video.clone()));
                self.emit(Notification::AudioTracksAvailable(tracks.audio.clone()));
                self.emit(Notification::SubtitleTracksAvailable(tracks.subtitle.clone()));
                self.session.tracks = tracks;
            }
            EngineEvent::VideoSize { width, height } => {
                self.session.video_size = Some((width, height));
                self.emit(Notification::VideoSizeChanged { width, height });
            }
        }
    }

    /// The duration is not always available, a time past the known length
    /// means there is at least that much.
    fn play_time(&mut self, time: f64) {
        if time > self.session.known_length {
            self.session.known_length = time;
        }
        self.session.time = time;
        self.emit(Notification::time_changed(time, self.session.known_length));
    }

    fn play_length(&mut self, length: f64) {
        if !length.is_finite() || length < 0.0 {
            log::warn!("Ignoring nonsensical length {}", length);
            return;
        }
        self.session.known_length = length;
    }
}

#[cfg(test)]
mod test {
    use protocol::{ChapterEntry, TrackEntry};

    use super::*;
    use crate::{
        engine::{RawChapter, RawTrack, TrackKind},
        testing::{recorder, Seen},
    };

    fn fresh() -> (Mediator, Seen) {
        recorder(Mediator::default())
    }

    #[test]
    fn time_grows_the_length() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::PlayTime(5.0));
        mediator.handle_event(EngineEvent::PlayTime(3.0));
        mediator.handle_event(EngineEvent::PlayLength(100.0));
        mediator.handle_event(EngineEvent::PlayTime(4.0));
        assert_eq!(
            vec![
                Notification::time_changed(5.0, 5.0),
                Notification::time_changed(3.0, 5.0),
                Notification::time_changed(4.0, 100.0),
            ],
            *seen.borrow()
        );
    }

    #[test]
    fn length_never_below_time() {
        let (mut mediator, _) = fresh();
        let mut previous = mediator.known_length();
        for t in [0.0, 1.5, 0.5, 10.0, 9.99, 10.0, 200.25, 3.0] {
            mediator.handle_event(EngineEvent::PlayTime(t));
            assert!(mediator.known_length() >= previous);
            assert!(mediator.known_length() >= t);
            previous = mediator.known_length();
        }
    }

    #[test]
    fn authoritative_length_wins() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::PlayTime(50.0));
        mediator.handle_event(EngineEvent::PlayLength(40.0));
        assert_eq!(40.0, mediator.known_length());
        mediator.handle_event(EngineEvent::PlayLength(f64::NAN));
        mediator.handle_event(EngineEvent::PlayLength(-1.0));
        assert_eq!(40.0, mediator.known_length());
        // only time changes are announced
        assert_eq!(1, seen.borrow().len());
    }

    #[test]
    fn state_machine() {
        let (mut mediator, seen) = fresh();
        assert_eq!(PlaybackState::Stopped, mediator.state());

        mediator.handle_event(EngineEvent::Started);
        assert_eq!(PlaybackState::Playing, mediator.state());
        mediator.handle_event(EngineEvent::Paused(true));
        assert_eq!(PlaybackState::Paused, mediator.state());
        mediator.handle_event(EngineEvent::Paused(false));
        assert_eq!(PlaybackState::Playing, mediator.state());
        mediator.handle_event(EngineEvent::Finished);
        assert_eq!(PlaybackState::Stopped, mediator.state());

        let states: Vec<_> = seen
            .borrow()
            .iter()
            .map(|n| match n {
                Notification::StateChanged(s) => *s,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            vec![
                PlaybackState::Playing,
                PlaybackState::Paused,
                PlaybackState::Playing,
                PlaybackState::Stopped
            ],
            states
        );
    }

    #[test]
    fn finished_from_anywhere() {
        for before in [
            vec![],
            vec![EngineEvent::Started],
            vec![EngineEvent::Started, EngineEvent::Paused(true)],
        ] {
            let (mut mediator, _) = fresh();
            for event in before {
                mediator.handle_event(event);
            }
            mediator.handle_event(EngineEvent::Finished);
            assert_eq!(PlaybackState::Stopped, mediator.state());
        }
    }

    #[test]
    fn title_is_verbatim() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::Title("  Weird [title] ".to_string()));
        assert_eq!(
            vec![Notification::TitleChanged("  Weird [title] ".to_string())],
            *seen.borrow()
        );
    }

    #[test]
    fn chapters_are_replaced() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::Chapters(vec![
            RawChapter::new(0.0, "Intro"),
            RawChapter::new(125.5, "Part 2"),
        ]));
        mediator.handle_event(EngineEvent::Chapters(vec![RawChapter::new(
            60.0, "Only",
        )]));
        assert_eq!(
            vec![
                Notification::ChaptersAvailable(vec![
                    ChapterEntry::new(0, "[0:00:00.000] - Intro"),
                    ChapterEntry::new(1, "[0:02:05.500] - Part 2"),
                ]),
                Notification::ChaptersAvailable(vec![ChapterEntry::new(
                    0,
                    "[0:01:00.000] - Only"
                )]),
            ],
            *seen.borrow()
        );
        assert_eq!(1, mediator.snapshot().chapters.len());
    }

    #[test]
    fn tracks_are_split() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::Tracks(vec![
            RawTrack::new(1, TrackKind::Video).codec("h264"),
            RawTrack::new(2, TrackKind::Audio).lang("en"),
            RawTrack::new(3, TrackKind::Sub).title("English"),
            RawTrack::new(4, TrackKind::Other),
        ]));

        let seen = seen.borrow();
        assert_eq!(3, seen.len());
        let [Notification::VideoTracksAvailable(video), Notification::AudioTracksAvailable(audio), Notification::SubtitleTracksAvailable(subs)] =
            seen.as_slice()
        else {
            panic!("unexpected {seen:?}");
        };
        let only = |list: &Vec<TrackEntry>| {
            assert_eq!(1, list.len());
            list[0].clone()
        };
        let (video, audio, subs) = (only(video), only(audio), only(subs));
        assert_eq!((1, 2, 3), (video.id, audio.id, subs.id));
        assert!(video.label.contains("h264"));
        assert!(audio.label.contains("en"));
        assert!(subs.label.contains("English"));
    }

    #[test]
    fn empty_track_list_clears_all() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::Tracks(Vec::new()));
        assert_eq!(
            vec![
                Notification::VideoTracksAvailable(Vec::new()),
                Notification::AudioTracksAvailable(Vec::new()),
                Notification::SubtitleTracksAvailable(Vec::new()),
            ],
            *seen.borrow()
        );
    }

    #[test]
    fn video_size_is_verbatim() {
        let (mut mediator, seen) = fresh();
        mediator.handle_event(EngineEvent::VideoSize {
            width: 1280,
            height: 720,
        });
        assert_eq!(
            vec![Notification::VideoSizeChanged {
                width: 1280,
                height: 720
            }],
            *seen.borrow()
        );
    }
}
