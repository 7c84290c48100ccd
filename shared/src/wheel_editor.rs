use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::PRESET_COLORS;
use crate::shared_wheel_game::{is_playable, Segment};

/// Raw form fields as typed by the user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentInput {
    pub label: String,
    pub reward_value: String,
    pub color: String,
}

impl Default for SegmentInput {
    fn default() -> Self {
        Self {
            label: String::new(),
            reward_value: "0".to_string(),
            color: PRESET_COLORS[0].to_string(),
        }
    }
}

impl SegmentInput {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            label: segment.label.clone(),
            reward_value: segment.reward_value.to_string(),
            color: segment.color.clone(),
        }
    }

    fn parsed_reward(&self) -> Option<f64> {
        self.reward_value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    pub fn is_valid(&self) -> bool {
        !self.label.trim().is_empty() && !self.color.trim().is_empty() && self.parsed_reward().is_some()
    }

    /// Builds the segment, keeping `existing_id` when editing or minting a fresh id.
    pub fn into_segment(self, existing_id: Option<&str>) -> Option<Segment> {
        let reward_value = self.parsed_reward()?;
        if !self.is_valid() {
            return None;
        }
        let id = existing_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Some(Segment {
            id,
            label: self.label.trim().to_string(),
            color: self.color,
            reward_value,
        })
    }
}

/// Editor's working copy of the wheel; nothing is persisted until saved
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WheelDraft {
    pub segments: Vec<Segment>,
}

impl WheelDraft {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn add(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Replaces the segment with the same id. Returns false if none matched.
    pub fn update(&mut self, segment: Segment) -> bool {
        match self.segments.iter_mut().find(|s| s.id == segment.id) {
            Some(slot) => {
                *slot = segment;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.segments.len();
        self.segments.retain(|s| s.id != id);
        self.segments.len() != before
    }

    pub fn can_save(&self) -> bool {
        is_playable(self.segments.len()) && self.segments.iter().all(|s| !s.label.trim().is_empty())
    }
}
