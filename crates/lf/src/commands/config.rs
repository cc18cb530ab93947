//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/lf/config.toml.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "LF_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# lf - label filter configuration

# Config schema version (do not modify)
version = 1

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Saved filters, usable anywhere as @name
[filters]
# urgent = "1 & !9"
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Saved filters by name.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            output: OutputConfig::default(),
            filters: BTreeMap::new(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config file path.
///
/// Uses `LF_CONFIG` if set, then `$XDG_CONFIG_HOME/lf/config.toml`,
/// then `~/.config/lf/config.toml` on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("lf").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("lf").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    log::debug!(
        "loaded config from {} ({} saved filters)",
        path.display(),
        config.filters.len()
    );
    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
pub fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    log::debug!("saved config to {}", path.display());
    Ok(())
}

/// Executes `config show`.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    let content = toml::to_string_pretty(&ctx.config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{content}");
    Ok(())
}

/// Executes `config path`.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    if ctx.json_output {
        println!(
            "{}",
            serde_json::json!({ "path": path.display().to_string(), "exists": path.exists() })
        );
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

/// Options for `config set`.
pub struct ConfigSetOptions {
    pub key: String,
    pub value: String,
}

/// Applies one `key = value` assignment to a config.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "output.color" => {
            let enabled = value.parse::<bool>().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid value for output.color: '{}' (expected true or false)",
                    value
                ))
            })?;
            config.output.color = Some(enabled);
            Ok(())
        }
        _ => Err(CommandError::Config(format!(
            "Unknown config key: '{}'. Valid keys: output.color",
            key
        ))),
    }
}

/// Executes `config set`.
pub fn execute_set(ctx: &mut CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    apply_setting(&mut ctx.config, &opts.key, &opts.value)?;
    save_config(&ctx.config)?;

    if ctx.json_output {
        println!(
            "{}",
            serde_json::json!({ "status": "ok", "key": opts.key, "value": opts.value })
        );
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }
    Ok(())
}

/// Executes `config init`.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path()?;
    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, DEFAULT_CONFIG)?;

    if ctx.json_output {
        println!(
            "{}",
            serde_json::json!({ "status": "created", "path": path.display().to_string() })
        );
    } else if !ctx.quiet {
        println!("Created {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.filters.is_empty());
        assert_eq!(config.output.color, None);
    }

    #[test]
    fn test_parse_filters() {
        let content = r#"
version = 1

[output]
color = false

[filters]
urgent = "1 & !9"
mail = "2 | 3"
"#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.filters.get("urgent").map(String::as_str), Some("1 & !9"));
        assert_eq!(config.filters.len(), 2);
    }

    #[test]
    fn test_missing_version_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_roundtrip_preserves_filters() {
        let mut config = Config::default();
        config.filters.insert("a".to_string(), "1 | 2".to_string());
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.filters, config.filters);
    }

    #[test]
    fn test_migrate_rejects_future_version() {
        let config = Config {
            version: CONFIG_VERSION + 1,
            ..Config::default()
        };
        assert!(matches!(migrate_config(config), Err(CommandError::Config(_))));
    }

    /// Runs `f` with `LF_CONFIG` pointing at `path`, restoring the old value afterwards.
    fn with_config_env<R>(path: &std::path::Path, f: impl FnOnce() -> R) -> R {
        let original = env::var(CONFIG_ENV).ok();
        env::set_var(CONFIG_ENV, path);
        let result = f();
        match original {
            Some(val) => env::set_var(CONFIG_ENV, val),
            None => env::remove_var(CONFIG_ENV),
        }
        result
    }

    #[test]
    #[serial_test::serial]
    fn test_config_path_from_env() {
        let path = PathBuf::from("/tmp/lf-test/custom.toml");
        let resolved = with_config_env(&path, get_config_path).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    #[serial_test::serial]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = with_config_env(&path, load_config).unwrap();
        assert!(config.filters.is_empty());
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    #[serial_test::serial]
    fn test_save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.color = Some(false);
        config.filters.insert("mail".to_string(), "2 | 3".to_string());

        let loaded = with_config_env(&path, || {
            save_config(&config)?;
            load_config()
        })
        .unwrap();

        assert_eq!(loaded.output.color, Some(false));
        assert_eq!(loaded.filters, config.filters);
    }

    #[test]
    #[serial_test::serial]
    fn test_load_invalid_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "filters = 3").unwrap();
        let result = with_config_env(&path, load_config);
        assert!(matches!(result, Err(CommandError::Config(_))));
    }

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();
        apply_setting(&mut config, "output.color", "false").unwrap();
        assert_eq!(config.output.color, Some(false));

        assert!(apply_setting(&mut config, "output.color", "maybe").is_err());
        assert!(apply_setting(&mut config, "token", "x").is_err());
    }
}
