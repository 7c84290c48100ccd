use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::*;
use crate::wheel_math::{
    pick_random_index_with, spin_delta, sweep_angle, wheel_layout, SegmentArc, SpinParams,
    MIN_SEGMENTS, POINTER_ANGLE_DEG,
};

/// One labeled, colored reward slice of the wheel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[validate(custom = "validate_segment_id")]
    pub id: String,
    #[validate(custom = "validate_label")]
    pub label: String,
    #[validate(custom = "validate_color")]
    pub color: String,
    pub reward_value: f64,
}

impl Segment {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: impl Into<String>, reward_value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: color.into(),
            reward_value,
        }
    }
}

pub fn is_playable(segment_count: usize) -> bool {
    segment_count >= MIN_SEGMENTS
}

/// An already decided spin outcome plus the rotation that presents it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpinPlan {
    pub selected_index: usize,
    pub segment: Segment,
    /// Size of the wheel the delta was computed for
    pub segment_count: usize,
    pub full_rotations: u32,
    pub start_rotation_deg: f64,
    pub delta_deg: f64,
    pub target_rotation_deg: f64,
}

/// Picks the winner first, then works out how far the wheel has to turn to show it.
///
/// Returns `None` when the wheel has fewer than two segments.
pub fn plan_spin<R: Rng + ?Sized>(
    segments: &[Segment],
    current_rotation_deg: f64,
    full_rotations: u32,
    rng: &mut R,
) -> Option<SpinPlan> {
    if !is_playable(segments.len()) {
        return None;
    }

    let selected_index = pick_random_index_with(rng, segments.len());
    let delta_deg = spin_delta(SpinParams {
        selected_index,
        segment_count: segments.len(),
        full_rotations,
        current_rotation_deg,
    });

    Some(SpinPlan {
        selected_index,
        segment: segments[selected_index].clone(),
        segment_count: segments.len(),
        full_rotations,
        start_rotation_deg: current_rotation_deg,
        delta_deg,
        target_rotation_deg: current_rotation_deg + delta_deg,
    })
}

impl SpinPlan {
    /// True when animating this plan on `segments` stops on `self.segment`.
    /// Both the wheel size and the segment at the selected index must agree.
    pub fn matches_wheel(&self, segments: &[Segment]) -> bool {
        segments.len() == self.segment_count
            && segments.get(self.selected_index).map(|s| &s.id) == Some(&self.segment.id)
    }
}

/// Play-screen state: one spin in flight at a time, rotation only ever grows
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WheelGame {
    pub is_spinning: bool,
    pub rotation_deg: f64,
    pub last_result: Option<Segment>,
}

impl WheelGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_spin(&self, segment_count: usize) -> bool {
        !self.is_spinning && is_playable(segment_count)
    }

    /// Claims the in-flight slot. Returns false if a spin is already running
    /// or the wheel is not playable.
    pub fn start_spin(&mut self, segment_count: usize) -> bool {
        if !self.can_spin(segment_count) {
            return false;
        }
        self.is_spinning = true;
        self.last_result = None;
        true
    }

    pub fn complete_spin(&mut self, plan: &SpinPlan) {
        self.rotation_deg = plan.target_rotation_deg;
        self.last_result = Some(plan.segment.clone());
        self.is_spinning = false;
    }

    // Only valid before an animation has started
    pub fn cancel_pending_spin(&mut self) {
        self.is_spinning = false;
    }
}

// Spin presentation policy
pub const FULL_ROTATIONS: u32 = 4;
pub const SPIN_DURATION_MS: u32 = 4200;

// === API Types ===

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinRequest {
    pub current_rotation_deg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub success: bool,
    pub plan: Option<SpinPlan>,
    pub duration_ms: u32,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentsResponse {
    pub segments: Vec<Segment>,
    pub is_default: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveSegmentsRequest {
    #[validate(custom = "validate_segments")]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSegmentsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WheelLayoutResponse {
    pub pointer_angle_deg: f64,
    pub sweep_deg: f64,
    pub arcs: Vec<SegmentArc>,
}

impl WheelLayoutResponse {
    pub fn for_segment_count(segment_count: usize) -> Self {
        Self {
            pointer_angle_deg: POINTER_ANGLE_DEG,
            sweep_deg: sweep_angle(segment_count),
            arcs: wheel_layout(segment_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::default_segments;
    use crate::wheel_math::{segment_at_pointer, spin_delta, SpinParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_segment_serializes_camel_case() {
        let segment = Segment::new("1", "Small prize", "#A7F3D0", 10.0);
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["rewardValue"], 10.0);
        assert!(json.get("reward_value").is_none());
    }

    #[test]
    fn test_api_types_serialize_camel_case() {
        let request = serde_json::to_value(SpinRequest { current_rotation_deg: 30.0 }).unwrap();
        assert_eq!(request["currentRotationDeg"], 30.0);

        let mut rng = StdRng::seed_from_u64(3);
        let plan = plan_spin(&default_segments(), 0.0, FULL_ROTATIONS, &mut rng).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        for key in ["selectedIndex", "segmentCount", "fullRotations", "startRotationDeg", "deltaDeg", "targetRotationDeg"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["segment"]["rewardValue"], plan.segment.reward_value);

        let layout = serde_json::to_value(WheelLayoutResponse::for_segment_count(4)).unwrap();
        assert_eq!(layout["sweepDeg"], 90.0);
        assert_eq!(layout["arcs"][0]["startDeg"], -90.0);
    }

    #[test]
    fn test_plan_matches_only_same_sized_wheel() {
        // Server holds the six defaults plus two more; the client still has the six
        let local = default_segments();
        let mut server = default_segments();
        server.push(Segment::new("7", "Extra spin", "#FDE68A", 5.0));
        server.push(Segment::new("8", "Jackpot", "#C4B5FD", 500.0));

        let delta_deg = spin_delta(SpinParams {
            selected_index: 5,
            segment_count: server.len(),
            full_rotations: FULL_ROTATIONS,
            current_rotation_deg: 0.0,
        });
        let plan = SpinPlan {
            selected_index: 5,
            segment: server[5].clone(),
            segment_count: server.len(),
            full_rotations: FULL_ROTATIONS,
            start_rotation_deg: 0.0,
            delta_deg,
            target_rotation_deg: delta_deg,
        };

        // Same id at the same index, but the stale wheel would stop elsewhere
        assert_eq!(local[5].id, plan.segment.id);
        assert_ne!(segment_at_pointer(plan.target_rotation_deg, local.len()), plan.selected_index);
        assert!(!plan.matches_wheel(&local));

        assert_eq!(segment_at_pointer(plan.target_rotation_deg, server.len()), plan.selected_index);
        assert!(plan.matches_wheel(&server));

        let mut renamed = server.clone();
        renamed[5].id = "other".to_string();
        assert!(!plan.matches_wheel(&renamed));
    }

    #[test]
    fn test_plan_spin_records_wheel_size() {
        let segments = default_segments();
        let mut rng = StdRng::seed_from_u64(5);
        let plan = plan_spin(&segments, 90.0, FULL_ROTATIONS, &mut rng).unwrap();
        assert_eq!(plan.segment_count, segments.len());
        assert!(plan.matches_wheel(&segments));
    }

    #[test]
    fn test_plan_spin_refuses_unplayable_wheel() {
        let mut rng = StdRng::seed_from_u64(1);
        let one = vec![Segment::new("1", "Only", "#FFFFFF", 1.0)];
        assert!(plan_spin(&one, 0.0, FULL_ROTATIONS, &mut rng).is_none());
        assert!(plan_spin(&[], 0.0, FULL_ROTATIONS, &mut rng).is_none());
    }

    #[test]
    fn test_plan_spin_lands_on_selected_segment() {
        let segments = default_segments();
        let mut rng = StdRng::seed_from_u64(42);
        let mut rotation = 0.0;

        for _ in 0..50 {
            let plan = plan_spin(&segments, rotation, FULL_ROTATIONS, &mut rng).unwrap();
            assert_eq!(plan.segment, segments[plan.selected_index]);
            assert_eq!(plan.start_rotation_deg, rotation);
            assert!(plan.delta_deg >= 4.0 * 360.0);
            assert!(plan.target_rotation_deg > rotation);
            assert_eq!(segment_at_pointer(plan.target_rotation_deg, segments.len()), plan.selected_index);
            rotation = plan.target_rotation_deg;
        }
    }

    #[test]
    fn test_wheel_game_single_spin_in_flight() {
        let segments = default_segments();
        let mut game = WheelGame::new();
        let mut rng = StdRng::seed_from_u64(9);

        assert!(game.start_spin(segments.len()));
        assert!(!game.start_spin(segments.len()));

        let plan = plan_spin(&segments, game.rotation_deg, FULL_ROTATIONS, &mut rng).unwrap();
        game.complete_spin(&plan);
        assert!(!game.is_spinning);
        assert_eq!(game.rotation_deg, plan.target_rotation_deg);
        assert_eq!(game.last_result.as_ref(), Some(&plan.segment));

        // Next spin starts from the accumulated rotation
        assert!(game.start_spin(segments.len()));
        assert!(game.last_result.is_none());
        game.cancel_pending_spin();
        assert!(!game.is_spinning);
        assert_eq!(game.rotation_deg, plan.target_rotation_deg);
    }

    #[test]
    fn test_wheel_game_requires_two_segments() {
        let mut game = WheelGame::new();
        assert!(!game.start_spin(1));
        assert!(!game.is_spinning);
    }

    #[test]
    fn test_layout_response() {
        let layout = WheelLayoutResponse::for_segment_count(6);
        assert_eq!(layout.pointer_angle_deg, -90.0);
        assert_eq!(layout.sweep_deg, 60.0);
        assert_eq!(layout.arcs.len(), 6);
    }
}
