//! Error types for the editor

use std::io;

use isoflow_model::MalformedSceneError;
use thiserror::Error;

use crate::config::MenuOption;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Menu action {0} is not enabled")]
    ActionDisabled(MenuOption),

    #[error("Malformed scene: {0}")]
    MalformedScene(#[from] MalformedSceneError),

    #[error("Failed to read {file_name}: {source}")]
    Read {
        file_name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Save prompt failed: {0}")]
    Save(#[source] io::Error),

    #[error("Failed to open {url}: {source}")]
    Link {
        url: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid initial scene: {0}")]
    InitialScene(#[from] MalformedSceneError),
}
