pub mod constants;
pub mod profanity;
pub mod rate_limit;
pub mod shared_wheel_game;
pub mod storage;
pub mod validation;
pub mod wheel_editor;
pub mod wheel_math;
