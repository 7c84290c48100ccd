use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SPIN_WINDOW: Duration = Duration::from_secs(60);
pub const SAVE_WINDOW: Duration = Duration::from_secs(60);
pub const API_WINDOW: Duration = Duration::from_secs(60);

pub const SPIN_MAX_REQUESTS: u32 = 30;
pub const SAVE_MAX_REQUESTS: u32 = 20;
pub const API_MAX_REQUESTS: u32 = 300;

pub const SPIN_RATE_LIMIT_ERROR: &str = "Too many spins. Please slow down.";
pub const SAVE_RATE_LIMIT_ERROR: &str = "Too many saves. Please try again in a minute.";
pub const API_RATE_LIMIT_ERROR: &str = "Too Many Requests";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitType {
    Spin,
    Save,
    Api,
}

impl RateLimitType {
    pub fn get_window(&self) -> Duration {
        match self {
            Self::Spin => SPIN_WINDOW,
            Self::Save => SAVE_WINDOW,
            Self::Api => API_WINDOW,
        }
    }

    pub fn get_max_attempts(&self) -> u32 {
        match self {
            Self::Spin => SPIN_MAX_REQUESTS,
            Self::Save => SAVE_MAX_REQUESTS,
            Self::Api => API_MAX_REQUESTS,
        }
    }

    pub fn get_error_message(&self) -> &'static str {
        match self {
            Self::Spin => SPIN_RATE_LIMIT_ERROR,
            Self::Save => SAVE_RATE_LIMIT_ERROR,
            Self::Api => API_RATE_LIMIT_ERROR,
        }
    }

    fn key_prefix(&self) -> &'static str {
        match self {
            Self::Spin => "spin",
            Self::Save => "save",
            Self::Api => "api",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateLimitCheck {
    pub remaining_attempts: u32,
    pub is_locked: bool,
}

impl RateLimitCheck {
    /// `attempts` counts every request in the current window, this one included.
    pub fn new(attempts: u32, limit_type: RateLimitType) -> Self {
        let max_attempts = limit_type.get_max_attempts();
        Self {
            remaining_attempts: max_attempts.saturating_sub(attempts),
            is_locked: attempts > max_attempts,
        }
    }
}

pub fn get_rate_limit_key(limit_type: RateLimitType, identifier: &str) -> String {
    format!("rate:{}:{}", limit_type.key_prefix(), identifier)
}

pub fn create_rate_limit_error(limit_type: RateLimitType, remaining: Option<Duration>) -> RateLimitError {
    RateLimitError {
        message: limit_type.get_error_message().to_string(),
        remaining: remaining.unwrap_or(limit_type.get_window()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateLimitError {
    pub message: String,
    pub remaining: Duration,
}
