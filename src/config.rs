//! launch configuration read from the environment
use std::env;
use std::num::{ParseFloatError, ParseIntError};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::constants::DEFAULT_ZOOM;

pub const SEED_ENV_VAR: &str = "TILEWORLD_SEED";
pub const ZOOM_ENV_VAR: &str = "TILEWORLD_ZOOM";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub seed: i64,
    pub zoom: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("TILEWORLD_SEED={value:?} is not an integer: {source}")]
    InvalidSeed {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("TILEWORLD_ZOOM={value:?} is not a number: {source}")]
    UnparsableZoom {
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("TILEWORLD_ZOOM must be finite and positive, got {0}")]
    NonPositiveZoom(f32),
}

impl Default for GameConfig {
    /// wall‑clock seed, default zoom
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let seed = env::var(SEED_ENV_VAR).ok();
        let zoom = env::var(ZOOM_ENV_VAR).ok();
        Self::from_vars(seed.as_deref(), zoom.as_deref())
    }

    /// unset seed → wall‑clock millis, unset zoom → [`DEFAULT_ZOOM`]
    pub fn from_vars(seed: Option<&str>, zoom: Option<&str>) -> Result<Self, ConfigError> {
        let seed = match seed.map(str::trim) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::InvalidSeed {
                value: raw.to_string(),
                source,
            })?,
            None => clock_seed(),
        };

        let zoom = match zoom.map(str::trim) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::UnparsableZoom {
                value: raw.to_string(),
                source,
            })?,
            None => DEFAULT_ZOOM,
        };
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(ConfigError::NonPositiveZoom(zoom));
        }

        Ok(Self { seed, zoom })
    }
}

fn clock_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
