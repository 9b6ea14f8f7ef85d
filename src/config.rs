//! Application-level configuration loading for cooldowns, counters, and the
//! end-game secret.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CLUETRAIL_BACK_CONFIG_PATH";

/// Immutable runtime configuration shared across the application. Values are
/// copied into a fresh game document at bootstrap; an existing `game.json`
/// keeps whatever it was started with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Minutes a killer must wait between kills.
    pub kill_cooldown_minutes: u64,
    /// Minutes a killed player stays down without a revive.
    pub down_minutes: u64,
    /// Minutes a detective must wait between unpoisons.
    pub unpoison_cooldown_minutes: u64,
    /// Minutes a safe mark protects a tag.
    pub safe_mark_minutes: u64,
    /// Truth badges available to the team at the start of a run.
    pub truth_badges: u32,
    /// Safe marks available to the team at the start of a run.
    pub safe_marks: u32,
    /// End-game code, compared trimmed and case-insensitively.
    pub final_code: String,
    /// Description of the medbay location.
    pub medbay: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kill_cooldown_minutes: 8,
            down_minutes: 5,
            unpoison_cooldown_minutes: 8,
            safe_mark_minutes: 10,
            truth_badges: 2,
            safe_marks: 2,
            final_code: "BLUEROUTE2GOLDROUTE5".into(),
            medbay: "Park with 4 orange benches".into(),
        }
    }
}

/// JSON representation of the configuration file; every field optional so a
/// partial file only overrides what it names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    kill_cooldown_minutes: Option<u64>,
    down_minutes: Option<u64>,
    unpoison_cooldown_minutes: Option<u64>,
    safe_mark_minutes: Option<u64>,
    truth_badges: Option<u32>,
    safe_marks: Option<u32>,
    final_code: Option<String>,
    medbay: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            kill_cooldown_minutes: raw
                .kill_cooldown_minutes
                .unwrap_or(defaults.kill_cooldown_minutes),
            down_minutes: raw.down_minutes.unwrap_or(defaults.down_minutes),
            unpoison_cooldown_minutes: raw
                .unpoison_cooldown_minutes
                .unwrap_or(defaults.unpoison_cooldown_minutes),
            safe_mark_minutes: raw.safe_mark_minutes.unwrap_or(defaults.safe_mark_minutes),
            truth_badges: raw.truth_badges.unwrap_or(defaults.truth_badges),
            safe_marks: raw.safe_marks.unwrap_or(defaults.safe_marks),
            final_code: raw.final_code.unwrap_or(defaults.final_code),
            medbay: raw.medbay.unwrap_or(defaults.medbay),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
