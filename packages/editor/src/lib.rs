//! # Isoflow Editor
//!
//! State management behind the editor's main menu.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: file picker, save prompt, links       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ MenuController: Open / Save / Clear / links │
//! │  - visibility from configured menu options  │
//! │  - async file read guarded by scene tickets │
//! └─────────────────────────────────────────────┘
//!           ↓                         ↓
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ SceneStore           │ │ UiStateStore       │
//! │  whole-scene swaps   │ │  menu + session    │
//! └──────────────────────┘ └────────────────────┘
//!           ↓                         ↓
//!      subscribers (renderer, outside this crate)
//! ```
//!
//! ## Core Principles
//!
//! 1. **Stores are injected**: constructed at startup and passed to the
//!    controller, never global
//! 2. **Scenes are replaced, not patched**: `set_scene` swaps the whole scene
//! 3. **Newest replacement wins**: a pending Open can't overwrite a later Clear
//! 4. **Cancelling is not failing**: a dismissed file picker changes nothing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use isoflow_editor::{EditorConfig, MenuController, SceneStore, UiStateStore};
//!
//! let config = EditorConfig::load(&cwd)?;
//! let scene_store = Arc::new(SceneStore::new(config.initial_scene()?));
//! let ui_store = Arc::new(UiStateStore::new(config.main_menu_options.clone()));
//!
//! let menu = MenuController::new(
//!     scene_store, ui_store, config, file_source, save_prompt, link_opener,
//! )?;
//!
//! match menu.open_scene().await? {
//!     OpenOutcome::Loaded { file_name } => println!("opened {file_name}"),
//!     OpenOutcome::Cancelled | OpenOutcome::Superseded { .. } => {}
//! }
//! ```

mod config;
mod errors;
pub mod host;
mod menu;
mod menu_view;
mod scene_store;
mod ui_state;

pub use config::{
    EditorConfig, Links, MenuOption, DEFAULT_CONFIG_NAME, DEFAULT_DISCORD_URL,
    DEFAULT_REPOSITORY_URL,
};
pub use errors::{ConfigError, MenuError};
pub use host::{
    FileSelection, FileSource, LinkOpener, SaveArtifact, SavePrompt, SelectedFile,
    SCENE_FILE_ACCEPT, SCENE_FILE_MIME,
};
pub use menu::{export_file_name, MenuController, OpenOutcome};
pub use menu_view::{ExternalLink, MainMenuView, MenuAction, MenuEntry, MenuSection, SectionKind};
pub use scene_store::{SceneStore, SceneTicket, SceneUpdate, StaleTicket};
pub use ui_state::{
    InteractionMode, ItemRef, MenuAnchor, Scroll, UiState, UiStateStore, DEFAULT_ZOOM,
};

// Re-export model types for convenience
pub use isoflow_model::{MalformedSceneError, Scene, SceneInput};
