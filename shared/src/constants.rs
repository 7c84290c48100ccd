use crate::shared_wheel_game::Segment;

pub const API_WHEEL_PREFIX: &str = "/wheel";
pub const SEGMENTS_ENDPOINT: &str = "/wheel/segments";
pub const SPIN_ENDPOINT: &str = "/wheel/spin";
pub const LAYOUT_ENDPOINT: &str = "/wheel/layout";

pub const MAX_LABEL_LENGTH: usize = 40;

pub const PRESET_COLORS: [&str; 8] = [
    "#7DD3FC", "#A7F3D0", "#FDE68A", "#FBCFE8", "#DDD6FE", "#BBF7D0", "#FED7AA", "#C7D2FE",
];

pub const INVALID_WHEEL_ERROR: &str = "A wheel needs at least 2 segments and every segment needs a name";
pub const SAVE_FAILED_ERROR: &str = "Could not save the wheel";
pub const SPIN_FAILED_ERROR: &str = "Could not spin the wheel";
pub const NETWORK_ERROR: &str = "Network error. Please try again";
pub const WHEEL_CHANGED_ERROR: &str = "The wheel was changed elsewhere. Please spin again";

/// Built-in wheel used when nothing valid has been saved yet
pub fn default_segments() -> Vec<Segment> {
    vec![
        Segment::new("1", "Small prize", "#A7F3D0", 10.0),
        Segment::new("2", "Better luck next time", "#FBCFE8", 0.0),
        Segment::new("3", "Medium prize", "#7DD3FC", 25.0),
        Segment::new("4", "Grand prize", "#FDE68A", 100.0),
        Segment::new("5", "Bonus", "#DDD6FE", 50.0),
        Segment::new("6", "Super lucky!", "#BBF7D0", 75.0),
    ]
}
