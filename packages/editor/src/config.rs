use std::fmt;
use std::path::Path;

use isoflow_model::{codec, Scene, SceneInput};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConfigError;

pub const DEFAULT_CONFIG_NAME: &str = "isoflow.config.json";
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/markmanx/isoflow";
pub const DEFAULT_DISCORD_URL: &str = "https://discord.gg/QYPkvZth7D";

/// Menu capability tag. An action is offered only when its tag is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuOption {
    Open,
    SaveJson,
    Clear,
    Github,
    Discord,
    Version,
}

impl MenuOption {
    pub const ALL: [MenuOption; 6] = [
        MenuOption::Open,
        MenuOption::SaveJson,
        MenuOption::Clear,
        MenuOption::Github,
        MenuOption::Discord,
        MenuOption::Version,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            MenuOption::Open => "OPEN",
            MenuOption::SaveJson => "SAVE_JSON",
            MenuOption::Clear => "CLEAR",
            MenuOption::Github => "GITHUB",
            MenuOption::Discord => "DISCORD",
            MenuOption::Version => "VERSION",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// External link targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(default = "default_repository_url")]
    pub repository_url: String,

    #[serde(default = "default_discord_url")]
    pub discord_url: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            repository_url: default_repository_url(),
            discord_url: default_discord_url(),
        }
    }
}

/// Editor configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Enabled main menu actions, in display order
    #[serde(default = "default_main_menu_options")]
    pub main_menu_options: Vec<MenuOption>,

    /// Scene loaded at startup and restored by Clear (minus icons)
    #[serde(default)]
    pub initial_scene: SceneInput,

    /// Version shown in the menu footer
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub links: Links,
}

fn default_main_menu_options() -> Vec<MenuOption> {
    MenuOption::ALL.to_vec()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_repository_url() -> String {
    DEFAULT_REPOSITORY_URL.to_string()
}

fn default_discord_url() -> String {
    DEFAULT_DISCORD_URL.to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&content)?;
        debug!(path = %path.display(), options = ?config.main_menu_options, "Loaded config");
        Ok(config)
    }

    /// Decoded initial scene. Rejects duplicate ids like any other scene load.
    pub fn initial_scene(&self) -> Result<Scene, ConfigError> {
        Ok(codec::decode(self.initial_scene.clone())?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            main_menu_options: default_main_menu_options(),
            initial_scene: SceneInput::default(),
            version: default_version(),
            links: Links::default(),
        }
    }
}
