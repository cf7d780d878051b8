use crate::core::models::{PlaylistItem, TrackAttributes};
use crate::modules::remote::api::thumbnail_path;
use crate::utils::format_duration;
use serde_json::Value;
use std::fmt;

/// Attribute keys that describe track bookkeeping rather than the track.
const HIDDEN_TRACK_KEYS: &[&str] = &["Type", "track"];

#[derive(Debug, Clone, PartialEq)]
pub struct TrackSection {
    pub label: &'static str,
    pub attributes: Vec<(String, String)>,
}

/// Contents of the info panel for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSheet {
    pub title: String,
    pub thumbnail: String,
    pub fields: Vec<(&'static str, String)>,
    pub sections: Vec<TrackSection>,
}

impl InfoSheet {
    pub fn build(item: &PlaylistItem) -> Self {
        let mut fields = Vec::new();
        let mut sections = Vec::new();

        if let Some(meta) = &item.meta {
            fields.push(("Name", item.display_name()));
            fields.push(("Path", meta.uri.clone().unwrap_or_else(|| "?".to_string())));
            fields.push(("Duration", format_duration(item.duration())));

            for (label, tracks) in [("Video", &meta.video_tracks), ("Audio", &meta.audio_tracks)] {
                if !tracks.is_empty() {
                    sections.push(TrackSection {
                        label,
                        attributes: tracks.iter().flat_map(track_attributes).collect(),
                    });
                }
            }
        }

        Self {
            title: item.display_name(),
            thumbnail: thumbnail_path(&item.link),
            fields,
            sections,
        }
    }
}

fn track_attributes(track: &TrackAttributes) -> Vec<(String, String)> {
    // BTreeMap iterates in key order.
    track
        .iter()
        .filter(|(key, _)| !HIDDEN_TRACK_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), display_value(value)))
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Display for InfoSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.fields {
            writeln!(f, "{}: {}", label, value)?;
        }
        for section in &self.sections {
            writeln!(f, "{}:", section.label)?;
            for (key, value) in &section.attributes {
                writeln!(f, "  {}: {}", key, value)?;
            }
        }
        Ok(())
    }
}
