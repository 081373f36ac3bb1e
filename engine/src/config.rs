use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf, time::Duration};
use thiserror::Error;

use vitrine_types::ReducedMotion;

use crate::autoplay::DEFAULT_AUTOPLAY_INTERVAL;
use crate::input::SWIPE_THRESHOLD_PX;
use crate::slides::TRANSITION_DURATION;

/// Environment variable that forces reduced motion on (`1`/`true`) or off
/// (`0`/`false`), overriding the config file.
pub const REDUCED_MOTION_ENV: &str = "VITRINE_REDUCED_MOTION";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct VitrineConfig {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub slides: SlidesConfig,
    #[serde(default)]
    pub autoplay: AutoplayConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct MotionConfig {
    /// Disable slide transitions and entrance animations.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlidesConfig {
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f32,
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            swipe_threshold_px: default_swipe_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutoplayConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_transition_ms() -> u64 {
    u64::try_from(TRANSITION_DURATION.as_millis()).unwrap_or(600)
}

const fn default_swipe_threshold() -> f32 {
    SWIPE_THRESHOLD_PX
}

fn default_interval_ms() -> u64 {
    u64::try_from(DEFAULT_AUTOPLAY_INTERVAL.as_millis()).unwrap_or(6000)
}

impl VitrineConfig {
    /// Load `~/.vitrine/config.toml`. A missing file (or no home directory)
    /// yields `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Load with the fallbacks the binary wants: errors are logged and
    /// replaced by defaults, then the environment override applies.
    #[must_use]
    pub fn load_or_default() -> Self {
        let mut config = match Self::load() {
            Ok(config) => config.unwrap_or_default(),
            Err(err) => {
                tracing::error!("Using default config: {err}");
                Self::default()
            }
        };
        config.apply_env_override(env::var(REDUCED_MOTION_ENV).ok().as_deref());
        config
    }

    /// Apply a `VITRINE_REDUCED_MOTION` value. Unrecognised values are
    /// ignored.
    pub fn apply_env_override(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => self.motion.reduced_motion = true,
            "0" | "false" | "no" | "off" => self.motion.reduced_motion = false,
            other => tracing::warn!("Ignoring {REDUCED_MOTION_ENV}={other:?}"),
        }
    }

    #[must_use]
    pub fn reduced_motion(&self) -> ReducedMotion {
        ReducedMotion::from_bool(self.motion.reduced_motion)
    }

    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.slides.transition_ms)
    }

    /// Non-positive or non-finite thresholds fall back to the default.
    #[must_use]
    pub fn swipe_threshold(&self) -> f32 {
        let px = self.slides.swipe_threshold_px;
        if px.is_finite() && px > 0.0 {
            px
        } else {
            SWIPE_THRESHOLD_PX
        }
    }

    /// A zero interval falls back to the default.
    #[must_use]
    pub fn autoplay_interval(&self) -> Duration {
        if self.autoplay.interval_ms == 0 {
            DEFAULT_AUTOPLAY_INTERVAL
        } else {
            Duration::from_millis(self.autoplay.interval_ms)
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vitrine").join("config.toml"))
}
