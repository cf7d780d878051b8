use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Stable backend identifier of a playlist entry.
///
/// The server emits it either as a JSON string or a bare number; both are
/// normalised to their string form since it only ever travels in URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerId(String);

impl ServerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ServerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ServerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(ServerId(s)),
            Value::Number(n) => Ok(ServerId(n.to_string())),
            other => Err(de::Error::custom(format!(
                "server id must be a string or number, got {}",
                other
            ))),
        }
    }
}

/// Media length as sent by the server: whole seconds plus the sub-second
/// remainder in microseconds (`"3725,500000"` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MediaDuration {
    pub seconds: u64,
    pub micros: u64,
}

impl From<String> for MediaDuration {
    fn from(raw: String) -> Self {
        let mut parts = raw.split(',');
        let seconds = parts
            .next()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        let micros = parts
            .next()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        Self {
            seconds: seconds.max(0.0) as u64,
            micros: micros.max(0.0) as u64,
        }
    }
}

impl From<MediaDuration> for String {
    fn from(d: MediaDuration) -> Self {
        format!("{},{}", d.seconds, d.micros)
    }
}

/// One track's attribute mapping, keys kept sorted.
pub type TrackAttributes = BTreeMap<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MediaMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub duration: Option<MediaDuration>,
    #[serde(rename = "tracks-video", default)]
    pub video_tracks: Vec<TrackAttributes>,
    #[serde(rename = "tracks-audio", default)]
    pub audio_tracks: Vec<TrackAttributes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TranscodingStatus {
    Complete,
    #[default]
    Pending,
    Other(String),
}

impl From<String> for TranscodingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "complete" => TranscodingStatus::Complete,
            "" | "pending" => TranscodingStatus::Pending,
            _ => TranscodingStatus::Other(raw),
        }
    }
}

impl From<TranscodingStatus> for String {
    fn from(status: TranscodingStatus) -> Self {
        match status {
            TranscodingStatus::Complete => "complete".to_string(),
            TranscodingStatus::Pending => "pending".to_string(),
            TranscodingStatus::Other(s) => s,
        }
    }
}

/// A playable entry, either from a playlist snapshot or a browse listing.
///
/// Browse entries carry only `path`; everything the server assigns once the
/// file is queued (`serverid`, `meta`, transcoding state) is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PlaylistItem {
    #[serde(rename = "serverid", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<ServerId>,

    #[serde(rename = "path", default)]
    pub source_path: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MediaMeta>,

    #[serde(rename = "transcoding-status", alias = "transcodingStatus", default)]
    pub transcoding_status: TranscodingStatus,

    #[serde(
        rename = "transcoding-duration",
        alias = "transcodingDuration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transcoding_duration: Option<Value>,

    /// Local seek-mode toggle. Never sent by the server.
    #[serde(skip)]
    pub seekable: bool,
}

impl PlaylistItem {
    pub fn display_name(&self) -> String {
        if let Some(name) = self.meta.as_ref().and_then(|m| m.name.as_deref()) {
            if !name.is_empty() {
                return name.to_string();
            }
        }

        if !self.name.is_empty() {
            return self.name.clone();
        }

        Path::new(&self.source_path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }

    pub fn duration(&self) -> MediaDuration {
        self.meta
            .as_ref()
            .and_then(|m| m.duration)
            .unwrap_or_default()
    }

    pub fn has_video(&self) -> bool {
        self.meta
            .as_ref()
            .map(|m| !m.video_tracks.is_empty())
            .unwrap_or(false)
    }

    pub fn is_transcoded(&self) -> bool {
        self.transcoding_status == TranscodingStatus::Complete
    }

    /// Same entry as `other` by backend identity. Entries without an id never match.
    pub fn same_entry(&self, other: &PlaylistItem) -> bool {
        match (&self.server_id, &other.server_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn stream_mode(&self) -> StreamMode {
        if self.seekable {
            StreamMode::RandomAccess
        } else {
            StreamMode::Progressive
        }
    }
}

impl fmt::Display for PlaylistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.display_name(),
            crate::utils::format_duration(self.duration())
        )
    }
}

/// Which access path a stream is served through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Progressively downloadable playlist.
    Progressive,
    /// Fully random-access (seekable) playlist.
    RandomAccess,
}

impl StreamMode {
    pub fn file_name(self) -> &'static str {
        match self {
            StreamMode::Progressive => "stream.m3u8",
            StreamMode::RandomAccess => "seekable.m3u8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn segment(self) -> &'static str {
        match self {
            Direction::Prev => "prev",
            Direction::Next => "next",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_playlist_item_with_numeric_id_and_tracks() {
        let json = r#"{
            "serverid": 42,
            "path": "/media/films/heat.mkv",
            "name": "heat.mkv",
            "link": "abc123",
            "meta": {
                "name": "Heat",
                "uri": "file:///media/films/heat.mkv",
                "duration": "10234,250000",
                "tracks-video": [{"Type": "video", "track": 0, "codec": "h264", "width": 1920}],
                "tracks-audio": [{"codec": "aac"}]
            },
            "transcoding-status": "complete"
        }"#;

        let item: PlaylistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.server_id, Some(ServerId::new("42")));
        assert_eq!(item.display_name(), "Heat");
        assert_eq!(item.duration(), MediaDuration { seconds: 10234, micros: 250000 });
        assert!(item.has_video());
        assert!(item.is_transcoded());
        assert!(!item.seekable);
    }

    #[test]
    fn raw_file_falls_back_to_file_name() {
        let item: PlaylistItem =
            serde_json::from_str(r#"{"path": "/music/track01.flac"}"#).unwrap();
        assert!(item.meta.is_none());
        assert_eq!(item.display_name(), "track01.flac");
        assert_eq!(item.transcoding_status, TranscodingStatus::Pending);
        assert!(item.server_id.is_none());
    }

    #[test]
    fn items_without_ids_are_never_the_same_entry() {
        let a = PlaylistItem::default();
        let b = PlaylistItem::default();
        assert!(!a.same_entry(&b));
    }

    #[test]
    fn malformed_duration_degrades_to_zero() {
        let d = MediaDuration::from("abc".to_string());
        assert_eq!(d, MediaDuration::default());
    }

    #[test]
    fn stream_mode_follows_local_flag() {
        let mut item = PlaylistItem::default();
        assert_eq!(item.stream_mode().file_name(), "stream.m3u8");
        item.seekable = true;
        assert_eq!(item.stream_mode().file_name(), "seekable.m3u8");
    }
}
