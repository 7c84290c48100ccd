use rand::Rng;
use serde::{Deserialize, Serialize};

// Screen-space convention: 0° points along +x, angles grow clockwise (y down).
pub const WHEEL_START_ANGLE_DEG: f64 = -90.0;
pub const POINTER_ANGLE_DEG: f64 = WHEEL_START_ANGLE_DEG;
pub const FULL_TURN_DEG: f64 = 360.0;
pub const MIN_SEGMENTS: usize = 2;

// Labels sit at this fraction of the radius along the segment's center line
const LABEL_RADIUS_RATIO: f64 = 0.65;

/// Angular width of every segment. `segment_count` must be at least 1.
pub fn sweep_angle(segment_count: usize) -> f64 {
    FULL_TURN_DEG / segment_count as f64
}

/// Bounds an externally supplied count to the playable minimum.
///
/// `NaN` and anything below 2 clamp to 2.
pub fn clamp_segment_count(n: f64) -> usize {
    n.floor().max(MIN_SEGMENTS as f64) as usize
}

/// Canonical representative of `angle_deg` in `[0, 360)`.
pub fn normalize_angle(angle_deg: f64) -> f64 {
    let normalized = angle_deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= FULL_TURN_DEG {
        0.0
    } else {
        normalized
    }
}

pub fn segment_start_angle(index: usize, segment_count: usize) -> f64 {
    WHEEL_START_ANGLE_DEG + index as f64 * sweep_angle(segment_count)
}

pub fn segment_end_angle(index: usize, segment_count: usize) -> f64 {
    WHEEL_START_ANGLE_DEG + (index + 1) as f64 * sweep_angle(segment_count)
}

/// Midpoint angle of segment `index` while the wheel sits at rotation 0.
pub fn segment_center_angle(index: usize, segment_count: usize) -> f64 {
    let sweep = sweep_angle(segment_count);
    WHEEL_START_ANGLE_DEG + index as f64 * sweep + sweep / 2.0
}

/// Rotation in `[0, 360)` that brings the center of `index` under the pointer
/// when applied to the unrotated wheel. Independent of any spin history.
pub fn rotation_to_center_index_at_pointer(index: usize, segment_count: usize) -> f64 {
    normalize_angle(POINTER_ANGLE_DEG - segment_center_angle(index, segment_count))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinParams {
    pub selected_index: usize,
    pub segment_count: usize,
    pub full_rotations: u32,
    pub current_rotation_deg: f64,
}

/// Forward rotation to add to `current_rotation_deg` so that the selected
/// segment ends centered under the pointer after `full_rotations` extra turns.
///
/// The result lies in `[full_rotations * 360, (full_rotations + 1) * 360)`.
/// An already aligned wheel still performs every full rotation.
pub fn spin_delta(params: SpinParams) -> f64 {
    let SpinParams {
        selected_index,
        segment_count,
        full_rotations,
        current_rotation_deg,
    } = params;
    debug_assert!(selected_index < segment_count, "selected index out of range");

    let normalized_current = normalize_angle(current_rotation_deg);
    let target = rotation_to_center_index_at_pointer(selected_index, segment_count);
    let delta = normalize_angle(target - normalized_current);

    full_rotations as f64 * FULL_TURN_DEG + delta
}

/// Uniformly random segment index drawn from the thread-local generator.
pub fn pick_random_index(segment_count: usize) -> usize {
    pick_random_index_with(&mut rand::thread_rng(), segment_count)
}

pub fn pick_random_index_with<R: Rng + ?Sized>(rng: &mut R, segment_count: usize) -> usize {
    rng.gen_range(0..segment_count)
}

/// Index of the segment whose arc contains the pointer at `rotation_deg`.
pub fn segment_at_pointer(rotation_deg: f64, segment_count: usize) -> usize {
    // Wheel-frame angle currently under the pointer, measured from the first segment's start
    let offset = normalize_angle(POINTER_ANGLE_DEG - rotation_deg - WHEEL_START_ANGLE_DEG);
    let index = (offset / sweep_angle(segment_count)).floor() as usize;
    index.min(segment_count.saturating_sub(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentArc {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
    pub center_deg: f64,
}

pub fn wheel_layout(segment_count: usize) -> Vec<SegmentArc> {
    (0..segment_count)
        .map(|index| SegmentArc {
            index,
            start_deg: segment_start_angle(index, segment_count),
            end_deg: segment_end_angle(index, segment_count),
            center_deg: segment_center_angle(index, segment_count),
        })
        .collect()
}

pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

pub fn label_anchor(cx: f64, cy: f64, radius: f64, index: usize, segment_count: usize) -> (f64, f64) {
    polar_to_cartesian(
        cx,
        cy,
        radius * LABEL_RADIUS_RATIO,
        segment_center_angle(index, segment_count),
    )
}
