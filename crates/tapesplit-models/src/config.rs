//! Segmentation and cleanup configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default silence threshold in dB.
pub const DEFAULT_NOISE_DB: f64 = -35.0;
/// Default minimum silence duration in seconds.
pub const DEFAULT_MIN_SILENCE: f64 = 0.6;
/// Default minimum kept-segment duration in seconds.
pub const DEFAULT_MIN_SEGMENT: f64 = 20.0;
/// Default output extension.
pub const DEFAULT_EXTENSION: &str = "mp3";

/// Segmentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Silence threshold in dB (audio below this counts as silence).
    #[serde(default = "default_noise_db")]
    pub noise_db: f64,

    /// Minimum silence duration in seconds for a gap to register.
    #[serde(default = "default_min_silence")]
    pub min_silence: f64,

    /// Minimum duration in seconds for a segment to be kept as a track.
    #[serde(default = "default_min_segment")]
    pub min_segment: f64,

    /// Seconds to losslessly trim from the start of each side before
    /// analysis (leader tape, announcements). Zero disables the trim.
    #[serde(default)]
    pub intro_trim_sec: f64,

    /// Reserved. Accepted for forward compatibility but exports currently
    /// run strictly sequentially so that track numbering stays monotonic.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Global track index the first side starts at.
    #[serde(default = "default_start_index")]
    pub start_index: u32,

    /// Output container extension for exported tracks.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_noise_db() -> f64 {
    DEFAULT_NOISE_DB
}
fn default_min_silence() -> f64 {
    DEFAULT_MIN_SILENCE
}
fn default_min_segment() -> f64 {
    DEFAULT_MIN_SEGMENT
}
fn default_concurrency() -> usize {
    1
}
fn default_start_index() -> u32 {
    1
}
fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            noise_db: DEFAULT_NOISE_DB,
            min_silence: DEFAULT_MIN_SILENCE,
            min_segment: DEFAULT_MIN_SEGMENT,
            intro_trim_sec: 0.0,
            concurrency: 1,
            start_index: 1,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl SplitConfig {
    /// Create config from `TAPESPLIT_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            noise_db: env_parse("TAPESPLIT_NOISE_DB", defaults.noise_db),
            min_silence: env_parse("TAPESPLIT_MIN_SILENCE", defaults.min_silence),
            min_segment: env_parse("TAPESPLIT_MIN_SEGMENT", defaults.min_segment),
            intro_trim_sec: env_parse("TAPESPLIT_INTRO_TRIM_SEC", defaults.intro_trim_sec),
            concurrency: env_parse("TAPESPLIT_CONCURRENCY", defaults.concurrency),
            start_index: env_parse("TAPESPLIT_START_INDEX", defaults.start_index),
            extension: std::env::var("TAPESPLIT_EXTENSION").unwrap_or(defaults.extension),
        }
    }
}

/// Which intermediate directories cleanup is allowed to reclaim.
///
/// All levels currently behave identically: only the raw-sources directory
/// is ever reclaimed. The enum exists so a tracks-consuming downstream stage
/// can add real per-level semantics without a config break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupLevel {
    Raw,
    Tracks,
    All,
}

impl Default for CleanupLevel {
    fn default() -> Self {
        Self::Raw
    }
}

impl std::str::FromStr for CleanupLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "tracks" => Ok(Self::Tracks),
            "all" => Ok(Self::All),
            other => Err(format!("unknown cleanup level: {other}")),
        }
    }
}

/// Cleanup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Whether cleanup runs at all.
    #[serde(default)]
    pub cleanup: bool,

    /// Cleanup granularity (see [`CleanupLevel`]).
    #[serde(default)]
    pub level: CleanupLevel,

    /// Report intended moves without touching the filesystem.
    #[serde(default)]
    pub dry_run: bool,

    /// Permanently delete this item's trash subtree after a successful
    /// reclaim. Irreversible.
    #[serde(default)]
    pub purge_trash: bool,

    /// Trash root. Defaults to `<out>/.trash` when unset.
    #[serde(default)]
    pub trash_dir: Option<PathBuf>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup: false,
            level: CleanupLevel::Raw,
            dry_run: false,
            purge_trash: false,
            trash_dir: None,
        }
    }
}

impl CleanupConfig {
    /// Create config from `TAPESPLIT_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            cleanup: env_bool("TAPESPLIT_CLEANUP"),
            level: std::env::var("TAPESPLIT_CLEANUP_LEVEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            dry_run: env_bool("TAPESPLIT_DRY_RUN"),
            purge_trash: env_bool("TAPESPLIT_PURGE_TRASH"),
            trash_dir: std::env::var("TAPESPLIT_TRASH_DIR").ok().map(PathBuf::from),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .map(|v| {
            let v = v.to_ascii_lowercase();
            v == "1" || v == "true" || v == "yes"
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_defaults() {
        let config = SplitConfig::default();
        assert!((config.noise_db - -35.0).abs() < f64::EPSILON);
        assert!((config.min_silence - 0.6).abs() < f64::EPSILON);
        assert!((config.min_segment - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.start_index, 1);
        assert_eq!(config.extension, "mp3");
    }

    #[test]
    fn test_cleanup_level_parse() {
        assert_eq!("raw".parse::<CleanupLevel>().unwrap(), CleanupLevel::Raw);
        assert_eq!("TRACKS".parse::<CleanupLevel>().unwrap(), CleanupLevel::Tracks);
        assert_eq!("all".parse::<CleanupLevel>().unwrap(), CleanupLevel::All);
        assert!("everything".parse::<CleanupLevel>().is_err());
    }

    #[test]
    fn test_split_config_serde_defaults() {
        let config: SplitConfig = serde_json::from_str("{}").unwrap();
        assert!((config.min_segment - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.concurrency, 1);
    }
}
