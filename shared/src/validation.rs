use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

use crate::constants::MAX_LABEL_LENGTH;
use crate::profanity::ProfanityFilter;
use crate::shared_wheel_game::{is_playable, Segment};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex"));

pub fn validate_segment_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::new("empty_segment_id"));
    }
    Ok(())
}

pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("empty_label"));
    }
    if trimmed.chars().count() > MAX_LABEL_LENGTH {
        return Err(ValidationError::new("label_too_long"));
    }
    if ProfanityFilter::validate_label(trimmed).is_err() {
        let mut error = ValidationError::new("inappropriate_label");
        error.message = Some(ProfanityFilter::get_censored_text(trimmed).into());
        return Err(error);
    }
    Ok(())
}

pub fn is_valid_color(color: &str) -> bool {
    HEX_COLOR.is_match(color.trim())
}

pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    if !is_valid_color(color) {
        return Err(ValidationError::new("invalid_color"));
    }
    Ok(())
}

/// Whole-wheel rules applied before a segment list is persisted
pub fn validate_segments(segments: &[Segment]) -> Result<(), ValidationError> {
    if !is_playable(segments.len()) {
        return Err(ValidationError::new("too_few_segments"));
    }

    let mut seen = HashSet::new();
    for segment in segments {
        if !seen.insert(segment.id.as_str()) {
            let mut error = ValidationError::new("duplicate_segment_id");
            error.add_param("id".into(), &segment.id);
            return Err(error);
        }
        if !segment.reward_value.is_finite() {
            return Err(ValidationError::new("invalid_reward_value"));
        }
        if segment.validate().is_err() {
            let mut error = ValidationError::new("invalid_segment");
            error.add_param("id".into(), &segment.id);
            return Err(error);
        }
    }
    Ok(())
}
