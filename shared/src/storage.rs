//! Persisted segment list format.
//!
//! Stored data is untrusted: every entry is coerced field by field, broken
//! entries are dropped, and anything that does not leave a playable wheel
//! falls back to the caller's defaults. Surviving entries are normalized so
//! that they can be saved back unchanged: labels are trimmed and cut to
//! `MAX_LABEL_LENGTH`, colors that are not hex get a palette color.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{MAX_LABEL_LENGTH, PRESET_COLORS};
use crate::shared_wheel_game::{is_playable, Segment};
use crate::validation::is_valid_color;

pub const STORAGE_KEY: &str = "CUSTOM_WHEEL_SEGMENTS_V1";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSource {
    Stored,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSegments {
    pub segments: Vec<Segment>,
    pub source: SegmentSource,
}

impl LoadedSegments {
    fn fallback(fallback: &[Segment]) -> Self {
        Self {
            segments: fallback.to_vec(),
            source: SegmentSource::Fallback,
        }
    }

    pub fn is_default(&self) -> bool {
        self.source == SegmentSource::Fallback
    }
}

pub fn parse_stored_segments(raw: Option<&str>, fallback: &[Segment]) -> LoadedSegments {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return LoadedSegments::fallback(fallback),
    };

    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log::warn!("Stored segments are not a list, using defaults");
            return LoadedSegments::fallback(fallback);
        }
        Err(e) => {
            log::warn!("Stored segments are not valid JSON ({}), using defaults", e);
            return LoadedSegments::fallback(fallback);
        }
    };

    let total = items.len();
    let cleaned: Vec<Segment> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| coerce_segment(index, item))
        .collect();
    if cleaned.len() < total {
        log::info!("Dropped {} malformed stored segments", total - cleaned.len());
    }

    if !is_playable(cleaned.len()) {
        return LoadedSegments::fallback(fallback);
    }

    LoadedSegments {
        segments: cleaned,
        source: SegmentSource::Stored,
    }
}

pub fn serialize_segments(segments: &[Segment]) -> Result<String, serde_json::Error> {
    serde_json::to_string(segments)
}

fn coerce_segment(index: usize, item: &Value) -> Option<Segment> {
    let segment = Segment {
        id: coerce_string(item.get("id")),
        label: coerce_string(item.get("label")),
        color: coerce_string(item.get("color")),
        reward_value: coerce_number(item.get("rewardValue")),
    };

    let complete = !segment.id.is_empty()
        && !segment.label.is_empty()
        && !segment.color.is_empty()
        && segment.reward_value.is_finite();
    if !complete {
        return None;
    }

    let label = normalize_label(&segment.label)?;
    let color = if is_valid_color(&segment.color) {
        segment.color.trim().to_string()
    } else {
        log::info!("Replacing stored color {:?} on segment {}", segment.color, segment.id);
        PRESET_COLORS[index % PRESET_COLORS.len()].to_string()
    };

    Some(Segment { label, color, ..segment })
}

fn normalize_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cut: String = trimmed.chars().take(MAX_LABEL_LENGTH).collect();
    Some(cut.trim_end().to_string())
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // Missing, null and nested values all count as absent
        _ => String::new(),
    }
}

fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::default_segments;
    use crate::validation::validate_segments;

    #[test]
    fn test_missing_or_empty_storage_uses_fallback() {
        let fallback = default_segments();
        let loaded = parse_stored_segments(None, &fallback);
        assert_eq!(loaded.segments, fallback);
        assert!(loaded.is_default());
        assert!(parse_stored_segments(Some(""), &fallback).is_default());
    }

    #[test]
    fn test_corrupt_storage_uses_fallback() {
        let fallback = default_segments();
        assert!(parse_stored_segments(Some("{not json"), &fallback).is_default());
        assert!(parse_stored_segments(Some(r#"{"id":"1"}"#), &fallback).is_default());
        assert!(parse_stored_segments(Some("42"), &fallback).is_default());
    }

    #[test]
    fn test_saved_list_is_restored() {
        let mut segments = default_segments();
        segments.truncate(3);
        let raw = serialize_segments(&segments).unwrap();
        let loaded = parse_stored_segments(Some(&raw), &default_segments());
        assert_eq!(loaded.source, SegmentSource::Stored);
        assert_eq!(loaded.segments, segments);
    }

    #[test]
    fn test_fields_are_coerced() {
        let raw = r##"[
            {"id": 7, "label": "Seven", "color": "#FFFFFF", "rewardValue": "12.5"},
            {"id": "b", "label": "Bee", "color": "#000000"},
            {"id": "c", "label": "Sea", "color": "#123456", "rewardValue": null}
        ]"##;
        let loaded = parse_stored_segments(Some(raw), &default_segments());
        assert_eq!(loaded.source, SegmentSource::Stored);
        assert_eq!(loaded.segments.len(), 3);
        assert_eq!(loaded.segments[0].id, "7");
        assert_eq!(loaded.segments[0].reward_value, 12.5);
        assert_eq!(loaded.segments[1].reward_value, 0.0);
        assert_eq!(loaded.segments[2].reward_value, 0.0);
    }

    #[test]
    fn test_broken_entries_dropped() {
        let raw = r##"[
            {"id": "1", "label": "One", "color": "#FFFFFF", "rewardValue": 1},
            {"id": "", "label": "No id", "color": "#FFFFFF", "rewardValue": 1},
            {"id": "3", "label": "", "color": "#FFFFFF", "rewardValue": 1},
            {"id": "4", "label": "No color", "rewardValue": 1},
            {"id": "5", "label": "Bad reward", "color": "#FFFFFF", "rewardValue": "lots"},
            "not an object",
            {"id": "6", "label": "Six", "color": "#FFFFFF", "rewardValue": 6}
        ]"##;
        let loaded = parse_stored_segments(Some(raw), &default_segments());
        assert_eq!(loaded.source, SegmentSource::Stored);
        let ids: Vec<&str> = loaded.segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "6"]);
    }

    #[test]
    fn test_legacy_entries_are_normalized_for_saving() {
        let long_label = "A very long prize name that nobody will ever read in full";
        let raw = format!(
            r##"[
                {{"id": "1", "label": "  Tea  ", "color": "red", "rewardValue": 1}},
                {{"id": "2", "label": "{}", "color": " #abc ", "rewardValue": 2}},
                {{"id": "3", "label": "   ", "color": "#FFFFFF", "rewardValue": 3}}
            ]"##,
            long_label
        );
        let loaded = parse_stored_segments(Some(&raw), &default_segments());
        assert_eq!(loaded.source, SegmentSource::Stored);
        assert_eq!(loaded.segments.len(), 2);

        assert_eq!(loaded.segments[0].label, "Tea");
        assert_eq!(loaded.segments[0].color, PRESET_COLORS[0]);
        assert!(loaded.segments[1].label.chars().count() <= MAX_LABEL_LENGTH);
        assert!(long_label.starts_with(&loaded.segments[1].label));
        assert_eq!(loaded.segments[1].color, "#abc");

        assert!(validate_segments(&loaded.segments).is_ok());
    }

    #[test]
    fn test_too_few_valid_entries_uses_fallback() {
        let raw = r##"[
            {"id": "1", "label": "One", "color": "#FFFFFF", "rewardValue": 1},
            {"id": "2", "label": "", "color": "#FFFFFF", "rewardValue": 1}
        ]"##;
        let fallback = default_segments();
        let loaded = parse_stored_segments(Some(raw), &fallback);
        assert!(loaded.is_default());
        assert_eq!(loaded.segments, fallback);
    }
}
