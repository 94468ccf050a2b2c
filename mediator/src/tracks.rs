use std::fmt;

use protocol::TrackEntry;

use crate::engine::{RawTrack, TrackKind};

/// Track lists split by kind, each in the order the engine reported them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tracks {
    pub video: Vec<TrackEntry>,
    pub audio: Vec<TrackEntry>,
    pub subtitle: Vec<TrackEntry>,
}

/// The menu label of a track, `id: [codec] lang - title ` with missing parts
/// left out.
impl fmt::Display for RawTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.id)?;
        if let Some(codec) = &self.codec {
            write!(f, "[{codec}] ")?;
        }
        if let Some(lang) = &self.lang {
            write!(f, "{lang} ")?;
        }
        if let Some(title) = &self.title {
            write!(f, "- {title} ")?;
        }
        Ok(())
    }
}

impl Tracks {
    pub fn build(tracks: &[RawTrack]) -> Self {
        let mut built = Tracks::default();
        for track in tracks {
            let list = match track.kind {
                TrackKind::Video => &mut built.video,
                TrackKind::Audio => &mut built.audio,
                TrackKind::Sub => &mut built.subtitle,
                TrackKind::Other => {
                    log::trace!("Ignoring track {} of unknown kind", track.id);
                    continue;
                }
            };
            list.push(TrackEntry::new(track.id, track.to_string()));
        }
        built
    }

    pub fn list(&self, kind: TrackKind) -> &[TrackEntry] {
        match kind {
            TrackKind::Video => &self.video,
            TrackKind::Audio => &self.audio,
            TrackKind::Sub => &self.subtitle,
            TrackKind::Other => &[],
        }
    }

    pub fn contains(&self, kind: TrackKind, id: i64) -> bool {
        self.list(kind).iter().any(|t| t.id == id)
    }
}
