//! Conversion from the dynamic property values engines like mpv report into
//! [EngineEvent]s.
//!
//! Meant for [crate::Engine] adapters over mpv-style players: the adapter
//! observes the properties [property_change] knows, runs each change through it
//! and sends the resulting event to its sink.

use std::collections::HashMap;

use crate::engine::{EngineEvent, RawChapter, RawTrack, TrackKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    String(String),
    Flag(bool),
    Int64(i64),
    Double(f64),
    Array(Vec<Node>),
    Map(HashMap<String, Node>),
    None,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NodeError {
    #[error("property '{0}' is not understood")]
    UnknownProperty(String),
    #[error("expected {expected} but got {got:?}")]
    WrongType { expected: &'static str, got: Node },
    #[error("map is missing the required key '{0}'")]
    MissingKey(&'static str),
}

type NodeResult<T> = Result<T, NodeError>;

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::String(_) => "string",
            Node::Flag(_) => "flag",
            Node::Int64(_) => "int",
            Node::Double(_) => "double",
            Node::Array(_) => "array",
            Node::Map(_) => "map",
            Node::None => "none",
        }
    }

    fn wrong(&self, expected: &'static str) -> NodeError {
        NodeError::WrongType {
            expected,
            got: self.clone(),
        }
    }

    pub fn take_flag(&self) -> NodeResult<bool> {
        match self {
            Node::Flag(b) => Ok(*b),
            _ => Err(self.wrong("flag")),
        }
    }

    /// Ints are widened, mpv sometimes reports whole seconds as ints.
    pub fn take_double(&self) -> NodeResult<f64> {
        match self {
            Node::Double(d) => Ok(*d),
            Node::Int64(i) => Ok(*i as f64),
            _ => Err(self.wrong("double")),
        }
    }

    pub fn take_int(&self) -> NodeResult<i64> {
        match self {
            Node::Int64(i) => Ok(*i),
            _ => Err(self.wrong("int")),
        }
    }

    pub fn take_string(&self) -> NodeResult<&str> {
        match self {
            Node::String(s) => Ok(s),
            _ => Err(self.wrong("string")),
        }
    }

    pub fn take_array(&self) -> NodeResult<&[Node]> {
        match self {
            Node::Array(a) => Ok(a),
            _ => Err(self.wrong("array")),
        }
    }

    pub fn take_map(&self) -> NodeResult<&HashMap<String, Node>> {
        match self {
            Node::Map(m) => Ok(m),
            _ => Err(self.wrong("map")),
        }
    }
}

/// A missing key or an explicit none is absent, anything else must be a string.
fn optional_string(map: &HashMap<String, Node>, key: &str) -> NodeResult<Option<String>> {
    match map.get(key) {
        None | Some(Node::None) => Ok(None),
        Some(node) => node.take_string().map(|s| Some(s.to_string())),
    }
}

fn required<'a>(map: &'a HashMap<String, Node>, key: &'static str) -> NodeResult<&'a Node> {
    map.get(key).ok_or(NodeError::MissingKey(key))
}

pub fn chapter_list(node: &Node) -> NodeResult<Vec<RawChapter>> {
    node.take_array()?
        .iter()
        .map(|entry| {
            let map = entry.take_map()?;
            Ok(RawChapter {
                time: required(map, "time")?.take_double()?,
                title: optional_string(map, "title")?,
            })
        })
        .collect()
}

/// Tracks that can't be identified are left out, since they could never be
/// selected anyway.
pub fn track_list(node: &Node) -> NodeResult<Vec<RawTrack>> {
    let mut tracks = Vec::new();
    for entry in node.take_array()? {
        let map = entry.take_map()?;
        let id = match required(map, "id").and_then(Node::take_int) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Skipping track without a usable id: {}", e);
                continue;
            }
        };
        let kind = match map.get("type") {
            Some(Node::String(name)) => TrackKind::from(name.as_str()),
            _ => TrackKind::Other,
        };
        tracks.push(RawTrack {
            id,
            kind,
            codec: optional_string(map, "codec")?,
            lang: optional_string(map, "lang")?,
            title: optional_string(map, "title")?,
        });
    }
    Ok(tracks)
}

fn video_size(node: &Node) -> NodeResult<EngineEvent> {
    let map = node.take_map()?;
    let dimension = |key: &'static str| -> NodeResult<u32> {
        let value = required(map, key)?.take_int()?;
        u32::try_from(value).map_err(|_| NodeError::WrongType {
            expected: "non-negative int",
            got: Node::Int64(value),
        })
    };
    Ok(EngineEvent::VideoSize {
        width: dimension("w")?,
        height: dimension("h")?,
    })
}

/// Translates one observed property change. `None` values mean the property is
/// currently unavailable and produce no event.
pub fn property_change(name: &str, change: &Node) -> NodeResult<Option<EngineEvent>> {
    if *change == Node::None {
        log::debug!("property '{}' is unavailable", name);
        return Ok(None);
    }

    let event = match name {
        "playback-time" => EngineEvent::PlayTime(change.take_double()?),
        "duration" => EngineEvent::PlayLength(change.take_double()?),
        "pause" => EngineEvent::Paused(change.take_flag()?),
        "media-title" => EngineEvent::Title(change.take_string()?.to_string()),
        "chapter-list" => EngineEvent::Chapters(chapter_list(change)?),
        "track-list" => EngineEvent::Tracks(track_list(change)?),
        "video-params" => video_size(change)?,
        _ => return Err(NodeError::UnknownProperty(name.to_string())),
    };
    log::trace!("{} ({}) became {}", name, change.kind(), event.name());
    Ok(Some(event))
}

#[cfg(test)]
mod test {
    use super::*;

    fn map<const N: usize>(entries: [(&str, Node); N]) -> Node {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn string(s: &str) -> Node {
        Node::String(s.to_string())
    }

    #[test]
    fn chapters_keep_order_and_missing_titles() {
        let node = Node::Array(vec![
            map([("time", Node::Double(0.0)), ("title", string("Intro"))]),
            map([("time", Node::Int64(125))]),
        ]);
        let chapters = chapter_list(&node).unwrap();
        assert_eq!(
            vec![
                RawChapter::new(0.0, "Intro"),
                RawChapter {
                    time: 125.0,
                    title: None
                }
            ],
            chapters
        );
    }

    #[test]
    fn chapter_without_time_is_an_error() {
        let node = Node::Array(vec![map([("title", string("Intro"))])]);
        assert_eq!(Err(NodeError::MissingKey("time")), chapter_list(&node));
    }

    #[test]
    fn tracks_have_optional_fields() {
        let node = Node::Array(vec![
            map([
                ("id", Node::Int64(1)),
                ("type", string("video")),
                ("codec", string("h264")),
            ]),
            map([
                ("id", Node::Int64(2)),
                ("type", string("audio")),
                ("lang", string("en")),
                ("title", Node::None),
            ]),
            map([("type", string("sub"))]),
            map([("id", Node::Int64(4)), ("type", string("menu"))]),
        ]);
        let tracks = track_list(&node).unwrap();
        assert_eq!(3, tracks.len());
        assert_eq!(RawTrack::new(1, TrackKind::Video).codec("h264"), tracks[0]);
        assert_eq!(RawTrack::new(2, TrackKind::Audio).lang("en"), tracks[1]);
        assert_eq!(TrackKind::Other, tracks[2].kind);
    }

    #[test]
    fn property_changes() {
        assert_eq!(
            Ok(Some(EngineEvent::PlayTime(1.5))),
            property_change("playback-time", &Node::Double(1.5))
        );
        assert_eq!(
            Ok(Some(EngineEvent::Paused(true))),
            property_change("pause", &Node::Flag(true))
        );
        assert_eq!(
            Ok(Some(EngineEvent::VideoSize {
                width: 1920,
                height: 1080
            })),
            property_change(
                "video-params",
                &map([("w", Node::Int64(1920)), ("h", Node::Int64(1080))])
            )
        );
        assert_eq!(Ok(None), property_change("duration", &Node::None));
    }

    #[test]
    fn bad_property_changes() {
        assert!(matches!(
            property_change("pause", &Node::Double(1.0)),
            Err(NodeError::WrongType {
                expected: "flag",
                ..
            })
        ));
        assert_eq!(
            Err(NodeError::UnknownProperty("volume".to_string())),
            property_change("volume", &Node::Double(50.0))
        );
        assert!(property_change(
            "video-params",
            &map([("w", Node::Int64(-1)), ("h", Node::Int64(1))])
        )
        .is_err());
    }
}
