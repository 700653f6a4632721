//! Configuration management utilities.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

/// Layered configuration loaded from defaults, user config, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub picker: Picker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "Defaults::default_line_numbers")]
    pub line_numbers: bool,
    #[serde(default = "Defaults::default_tab_width")]
    pub tab_width: usize,
    #[serde(default = "Defaults::default_max_file_size")]
    pub max_file_size: u64,
}

impl Defaults {
    fn default_line_numbers() -> bool {
        true
    }

    fn default_tab_width() -> usize {
        4
    }

    fn default_max_file_size() -> u64 {
        2 * 1024 * 1024
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            line_numbers: Self::default_line_numbers(),
            tab_width: Self::default_tab_width(),
            max_file_size: Self::default_max_file_size(),
        }
    }
}

/// Advisory extension allow-list surfaced next to the file prompt. It never
/// blocks a load; dropped paths bypass it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Picker {
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Picker {
    /// Whether the given filename carries one of the advertised extensions.
    pub fn advertises(&self, filename: &str) -> bool {
        let ext = filename.rsplit('.').next().unwrap_or(filename);
        self.extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    line_numbers: Option<bool>,
    max_file_size: Option<u64>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            line_numbers: env::var("CODEVIEW_LINE_NUMBERS")
                .ok()
                .and_then(|value| parse_bool(&value)),
            max_file_size: env::var("CODEVIEW_MAX_FILE_SIZE")
                .ok()
                .and_then(|value| value.parse().ok()),
        }
    }

    #[cfg(test)]
    fn for_tests(line_numbers: bool, max_file_size: u64) -> Self {
        Self {
            line_numbers: Some(line_numbers),
            max_file_size: Some(max_file_size),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from defaults, the user config file, and env
    /// overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        Self::load_with_layers(user_config_path(), env)
    }

    fn load_with_layers(user: Option<PathBuf>, env_overrides: EnvOverrides) -> Result<Self> {
        let mut config = Self::from_str(&DEFAULT_CONFIG)?;

        if let Some(user_path) = user.filter(|path| path.exists()) {
            config = config.merge(Self::from_file(&user_path)?);
        }

        Ok(apply_env_overrides(config, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            picker: merge_picker(self.picker, other.picker),
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        line_numbers: if overlay.line_numbers != Defaults::default_line_numbers() {
            overlay.line_numbers
        } else {
            base.line_numbers
        },
        tab_width: if overlay.tab_width != Defaults::default_tab_width() {
            overlay.tab_width
        } else {
            base.tab_width
        },
        max_file_size: if overlay.max_file_size != Defaults::default_max_file_size() {
            overlay.max_file_size
        } else {
            base.max_file_size
        },
    }
}

fn merge_picker(base: Picker, overlay: Picker) -> Picker {
    if overlay.extensions.is_empty() {
        return base;
    }
    let mut extensions: BTreeSet<String> = base.extensions.into_iter().collect();
    extensions.extend(overlay.extensions);
    Picker {
        extensions: extensions.into_iter().collect(),
    }
}

fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("codeview/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(line_numbers) = env.line_numbers {
        config.defaults.line_numbers = line_numbers;
    }
    if let Some(max_file_size) = env.max_file_size {
        config.defaults.max_file_size = max_file_size;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config =
            Config::load_with_layers(None, EnvOverrides::default()).expect("load default config");
        assert!(config.defaults.line_numbers);
        assert_eq!(config.defaults.tab_width, 4);
        assert!(config.picker.extensions.contains(&"py".into()));
    }

    #[test]
    fn user_layer_overrides_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let user = temp.path().join("config.toml");
        fs::write(
            &user,
            r#"
[defaults]
line_numbers = false
tab_width = 8
[picker]
extensions = ["zig"]
"#,
        )?;

        let config = Config::load_with_layers(Some(user), EnvOverrides::default())?;

        assert!(!config.defaults.line_numbers);
        assert_eq!(config.defaults.tab_width, 8);
        assert!(config.picker.extensions.contains(&"zig".into()));
        assert!(config.picker.extensions.contains(&"rs".into()));
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests(false, 1024);
        let config = Config::load_with_layers(None, overrides)?;
        assert!(!config.defaults.line_numbers);
        assert_eq!(config.defaults.max_file_size, 1024);
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn picker_allow_list_is_advisory_case_insensitive() {
        let config =
            Config::load_with_layers(None, EnvOverrides::default()).expect("load default config");
        assert!(config.picker.advertises("main.PY"));
        assert!(config.picker.advertises("notes.txt"));
        assert!(!config.picker.advertises("image.png"));
    }
}
