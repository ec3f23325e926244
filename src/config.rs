use crate::collectors::toolchains::VersionRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_disk_path")]
    pub disk_path: String,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub ascii: AsciiConfig,
    #[serde(default = "default_toolchains")]
    pub toolchains: Vec<ToolchainConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Boxed,
    Plain,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorsConfig {
    #[serde(default = "default_colors_enabled")]
    pub enabled: bool,
    #[serde(default = "default_title_color")]
    pub title: String,
    #[serde(default = "default_label_color")]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AsciiConfig {
    #[serde(default = "default_ascii_enabled")]
    pub enabled: bool,
    #[serde(default = "default_ascii_name")]
    pub name: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolchainConfig {
    pub name: String,
    pub icon: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub rule: VersionRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            width: default_width(),
            disk_path: default_disk_path(),
            probe_timeout_ms: default_probe_timeout_ms(),
            colors: ColorsConfig::default(),
            ascii: AsciiConfig::default(),
            toolchains: default_toolchains(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_colors_enabled(),
            title: default_title_color(),
            label: default_label_color(),
        }
    }
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            enabled: default_ascii_enabled(),
            name: default_ascii_name(),
            assets_dir: default_assets_dir(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать файл конфигурации {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("не удалось разобрать YAML в {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("ошибка валидации конфигурации: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(20..=200).contains(&self.width) {
            return Err(ConfigError::Validation(
                "width должно быть в диапазоне 20..200".to_string(),
            ));
        }
        if self.disk_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "поле disk_path обязательно".to_string(),
            ));
        }
        if !(1..=60_000).contains(&self.probe_timeout_ms) {
            return Err(ConfigError::Validation(
                "probe_timeout_ms должно быть в диапазоне 1..60000".to_string(),
            ));
        }
        if self.ascii.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "ascii.name не должен быть пустым".to_string(),
            ));
        }

        validate_toolchains(&self.toolchains)?;

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn validate_toolchains(toolchains: &[ToolchainConfig]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for tool in toolchains {
        if tool.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "toolchains[*].name не должен быть пустым".to_string(),
            ));
        }
        if !names.insert(tool.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "имя тулчейна '{}' должно быть уникальным",
                tool.name
            )));
        }
        if tool.command.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "toolchains '{}' command не должен быть пустым",
                tool.name
            )));
        }
    }
    Ok(())
}

const fn default_width() -> usize {
    50
}

fn default_disk_path() -> String {
    "/".to_string()
}

const fn default_probe_timeout_ms() -> u64 {
    3000
}

const fn default_colors_enabled() -> bool {
    true
}

fn default_title_color() -> String {
    "magenta".to_string()
}

fn default_label_color() -> String {
    "cyan".to_string()
}

const fn default_ascii_enabled() -> bool {
    true
}

fn default_ascii_name() -> String {
    "default".to_string()
}

fn default_assets_dir() -> String {
    "ascii/assets".to_string()
}

fn toolchain(
    name: &str,
    icon: &str,
    command: &str,
    arg: &str,
    rule: VersionRule,
) -> ToolchainConfig {
    ToolchainConfig {
        name: name.to_string(),
        icon: icon.to_string(),
        command: command.to_string(),
        args: vec![arg.to_string()],
        rule,
    }
}

pub fn default_toolchains() -> Vec<ToolchainConfig> {
    vec![
        toolchain("Python", "🐍", "python3", "--version", VersionRule::SecondToken),
        toolchain("Go", "🟢", "go", "version", VersionRule::GoVersion),
        toolchain("Node.js", "🟨", "node", "--version", VersionRule::StripV),
        toolchain("Java", "☕", "java", "-version", VersionRule::QuotedOnVersionLine),
        toolchain("Ruby", "💎", "ruby", "--version", VersionRule::SecondToken),
        toolchain("Rust", "🦀", "rustc", "--version", VersionRule::SecondToken),
        toolchain("PHP", "🐘", "php", "--version", VersionRule::SecondToken),
    ]
}
