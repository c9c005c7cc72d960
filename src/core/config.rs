//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.psalm139/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The Gemini API key is the one required value. `resolve` fails with
//! `ConfigError::MissingCredential` when no layer provides it, so the
//! process stops before the terminal is taken over.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Psalm139Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub music_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MUSIC_URL: &str =
    "https://drive.google.com/file/d/1Xd8tqkXkI6x_l-PKc0vcyJUL_c3XkqO1/preview";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub music_url: String,
}

/// Values coming from CLI flags (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub model: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

/// Source of environment variables. `std::env::var` in production,
/// a map in tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No API key in the config file or the environment.
    MissingCredential,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingCredential => write!(
                f,
                "GEMINI_API_KEY (or API_KEY) is not set; add it to the environment, a .env file, \
                 or [gemini] api_key in ~/.psalm139/config.toml"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.psalm139/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".psalm139").join("config.toml"))
}

/// Load config from `~/.psalm139/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `Psalm139Config::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<Psalm139Config, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(Psalm139Config::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Psalm139Config, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(Psalm139Config::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: Psalm139Config = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // api_key is deliberately left out of the log line
    debug!(
        "Config: base_url={:?} model={:?} music_url={:?}",
        config.gemini.base_url, config.gemini.model, config.player.music_url
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Psalm 139 Configuration
# All settings are optional except the API key, which may also come from
# the GEMINI_API_KEY (or API_KEY) environment variable or a .env file.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [gemini]
# api_key = "AIza..."
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-2.5-flash"

# [player]
# music_url = "https://drive.google.com/file/d/1Xd8tqkXkI6x_l-PKc0vcyJUL_c3XkqO1/preview"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &Psalm139Config,
    env: &dyn EnvSource,
    cli: &CliOverrides<'_>,
) -> Result<ResolvedConfig, ConfigError> {
    // API key: env → config. API_KEY is the legacy name.
    let api_key = env
        .var("GEMINI_API_KEY")
        .or_else(|| env.var("API_KEY"))
        .or_else(|| config.gemini.api_key.clone())
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::MissingCredential)?;

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(str::to_string)
        .or_else(|| env.var("GEMINI_BASE_URL"))
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    // Model: CLI → env → config → default
    let model = cli
        .model
        .map(str::to_string)
        .or_else(|| env.var("GEMINI_MODEL"))
        .or_else(|| config.gemini.model.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    let music_url = env
        .var("PSALM139_MUSIC_URL")
        .or_else(|| config.player.music_url.clone())
        .unwrap_or_else(|| DEFAULT_MUSIC_URL.to_string());

    Ok(ResolvedConfig {
        api_key,
        base_url: base_url.trim_end_matches('/').to_string(),
        model,
        music_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> MapEnv {
        MapEnv(pairs.iter().copied().collect())
    }

    #[test]
    fn test_missing_credential_is_an_error() {
        let config = Psalm139Config::default();
        let result = resolve(&config, &env(&[]), &CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = Psalm139Config {
            gemini: GeminiConfig {
                api_key: Some("   ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = resolve(&config, &env(&[]), &CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn test_resolve_uses_defaults_when_only_key_given() {
        let config = Psalm139Config::default();
        let resolved =
            resolve(&config, &env(&[("GEMINI_API_KEY", "k")]), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.api_key, "k");
        assert_eq!(resolved.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(resolved.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(resolved.music_url, DEFAULT_MUSIC_URL);
    }

    #[test]
    fn test_legacy_api_key_env_var() {
        let config = Psalm139Config::default();
        let resolved =
            resolve(&config, &env(&[("API_KEY", "legacy")]), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.api_key, "legacy");
    }

    #[test]
    fn test_env_wins_over_config_and_cli_wins_over_env() {
        let config = Psalm139Config {
            gemini: GeminiConfig {
                api_key: Some("from-file".to_string()),
                base_url: Some("http://file".to_string()),
                model: Some("file-model".to_string()),
            },
            player: PlayerConfig {
                music_url: Some("http://music".to_string()),
            },
        };
        let env = env(&[("GEMINI_API_KEY", "from-env"), ("GEMINI_MODEL", "env-model")]);
        let cli = CliOverrides {
            model: Some("cli-model"),
            base_url: Some("http://cli/"),
        };
        let resolved = resolve(&config, &env, &cli).unwrap();
        assert_eq!(resolved.api_key, "from-env");
        assert_eq!(resolved.model, "cli-model");
        assert_eq!(resolved.base_url, "http://cli");
        assert_eq!(resolved.music_url, "http://music");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[gemini]
model = "gemini-2.0-flash"
"#;
        let config: Psalm139Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.model.as_deref(), Some("gemini-2.0-flash"));
        assert!(config.gemini.api_key.is_none());
        assert!(config.player.music_url.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("psalm139-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[gemini\nmodel = 1").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("psalm139-default-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.gemini.api_key.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [gemini]"));
        // The generated file is all comments, so it parses to the default
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.gemini.model.is_none());
        fs::remove_dir_all(&dir).unwrap();
    }
}
