use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use wheel_shared::shared_wheel_game::FULL_ROTATIONS;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://127.0.0.1:8080,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub redis_url: Option<String>,
    pub allowed_origins: Vec<HeaderValue>,
    pub static_dir: PathBuf,
    pub full_rotations: u32,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidOrigin(String),
    InvalidFullRotations(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBindAddr(v) => write!(f, "BIND_ADDR is not a socket address: {}", v),
            ConfigError::InvalidOrigin(v) => write!(f, "ALLOWED_ORIGINS contains an invalid origin: {}", v),
            ConfigError::InvalidFullRotations(v) => write!(f, "FULL_ROTATIONS is not a non-negative integer: {}", v),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr_raw.clone()))?;

        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        let origins_raw = lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());
        let allowed_origins = origins_raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()));

        let full_rotations = match lookup("FULL_ROTATIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidFullRotations(raw.clone()))?,
            None => FULL_ROTATIONS,
        };

        Ok(Self {
            bind_addr,
            redis_url,
            allowed_origins,
            static_dir,
            full_rotations,
        })
    }
}
