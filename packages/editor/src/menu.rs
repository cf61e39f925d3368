//! # Menu Controller
//!
//! Runs the main menu's lifecycle actions against the two stores.
//!
//! ## Actions
//!
//! ```text
//! Open   idle → pick file ─┬─ cancelled → idle (nothing changes)
//!                          └─ selected → reset UI, close menu
//!                                      → read (await) → decode → commit
//! Save   encode → serialize → save prompt → close menu
//! Clear  initial scene + current icons → reset UI → close menu
//! ```
//!
//! Open closes the menu as soon as a file is chosen, before the read
//! finishes. Its commit uses a [`SceneTicket`](crate::SceneTicket), so a
//! Clear or a second Open issued while the read is pending wins over it.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use isoflow_model::{codec, Scene};
use tracing::{debug, info, instrument, warn};

use crate::config::{EditorConfig, MenuOption};
use crate::errors::{ConfigError, MenuError};
use crate::host::{
    FileSelection, FileSource, LinkOpener, SaveArtifact, SavePrompt, SelectedFile,
    SCENE_FILE_ACCEPT, SCENE_FILE_MIME,
};
use crate::menu_view::{ExternalLink, MainMenuView};
use crate::scene_store::SceneStore;
use crate::ui_state::{MenuAnchor, UiStateStore};

/// How an Open ended, when it didn't fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Loaded { file_name: String },
    /// Picker dismissed; no state was touched
    Cancelled,
    /// A newer scene replacement landed while the file was being read
    Superseded { file_name: String },
}

/// Export file name, e.g. `isoflow-2024-03-01T09:30:00.000Z.json`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!(
        "isoflow-{}.json",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

pub struct MenuController<F, S, L> {
    scene_store: Arc<SceneStore>,
    ui_store: Arc<UiStateStore>,
    config: EditorConfig,
    initial_scene: Scene,
    file_source: F,
    save_prompt: S,
    link_opener: L,
}

impl<F, S, L> MenuController<F, S, L>
where
    F: FileSource,
    S: SavePrompt,
    L: LinkOpener,
{
    pub fn new(
        scene_store: Arc<SceneStore>,
        ui_store: Arc<UiStateStore>,
        config: EditorConfig,
        file_source: F,
        save_prompt: S,
        link_opener: L,
    ) -> Result<Self, ConfigError> {
        let initial_scene = config.initial_scene()?;

        Ok(Self {
            scene_store,
            ui_store,
            config,
            initial_scene,
            file_source,
            save_prompt,
            link_opener,
        })
    }

    pub fn scene_store(&self) -> &Arc<SceneStore> {
        &self.scene_store
    }

    pub fn ui_store(&self) -> &Arc<UiStateStore> {
        &self.ui_store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn file_source(&self) -> &F {
        &self.file_source
    }

    pub fn save_prompt(&self) -> &S {
        &self.save_prompt
    }

    pub fn link_opener(&self) -> &L {
        &self.link_opener
    }

    pub fn is_enabled(&self, option: MenuOption) -> bool {
        self.ui_store.main_menu_options().contains(&option)
    }

    /// Current menu layout, `None` when the control is hidden
    pub fn menu_view(&self) -> Option<MainMenuView> {
        MainMenuView::build(self.ui_store.main_menu_options(), &self.config.version)
    }

    /// No-op when no menu options are configured, as the control is hidden
    pub fn open_menu(&self, anchor: MenuAnchor) {
        if self.ui_store.main_menu_options().is_empty() {
            debug!("Main menu hidden, not opening");
            return;
        }
        self.ui_store.set_main_menu_anchor(Some(anchor));
        self.ui_store.set_is_main_menu_open(true);
    }

    /// Explicit close and outside click both land here
    pub fn close_menu(&self) {
        self.ui_store.set_is_main_menu_open(false);
        self.ui_store.set_main_menu_anchor(None);
    }

    pub fn toggle_menu(&self, anchor: MenuAnchor) {
        if self.ui_store.is_main_menu_open() {
            self.close_menu();
        } else {
            self.open_menu(anchor);
        }
    }

    #[instrument(skip(self))]
    pub async fn open_scene(&self) -> Result<OpenOutcome, MenuError> {
        self.ensure_enabled(MenuOption::Open)?;

        let file = match self.file_source.request_file(SCENE_FILE_ACCEPT).await {
            FileSelection::Selected(file) => file,
            FileSelection::Cancelled => {
                debug!("File selection cancelled");
                return Ok(OpenOutcome::Cancelled);
            }
        };

        let file_name = file.name().to_string();
        let ticket = self.scene_store.issue_ticket();
        self.ui_store.reset_ui_state();
        self.close_menu();
        debug!(file = %file_name, generation = ticket.generation(), "File selected");

        let text = file.read_text().await.map_err(|source| MenuError::Read {
            file_name: file_name.clone(),
            source,
        })?;

        let scene = codec::decode_str(&text).map_err(|error| {
            warn!(file = %file_name, %error, "Rejected scene file");
            MenuError::MalformedScene(error)
        })?;

        match self.scene_store.commit(ticket, scene) {
            Ok(()) => {
                info!(file = %file_name, "Opened scene");
                Ok(OpenOutcome::Loaded { file_name })
            }
            Err(stale) => {
                info!(file = %file_name, %stale, "Discarding superseded open");
                Ok(OpenOutcome::Superseded { file_name })
            }
        }
    }

    /// Export the current scene through the save prompt
    pub fn save_as(&self) -> Result<SaveArtifact, MenuError> {
        self.save_as_at(Utc::now())
    }

    #[instrument(skip(self))]
    pub fn save_as_at(&self, now: DateTime<Utc>) -> Result<SaveArtifact, MenuError> {
        self.ensure_enabled(MenuOption::SaveJson)?;

        let input = codec::encode(&self.scene_store.scene());
        let artifact = SaveArtifact {
            file_name: export_file_name(now),
            mime_type: SCENE_FILE_MIME.to_string(),
            bytes: codec::to_json_bytes(&input)?,
        };

        self.save_prompt.save(&artifact).map_err(MenuError::Save)?;
        self.close_menu();

        info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Saved scene");
        Ok(artifact)
    }

    /// Replace the scene with the initial one, keeping the icon set. No undo.
    #[instrument(skip(self))]
    pub fn clear_canvas(&self) -> Result<(), MenuError> {
        self.ensure_enabled(MenuOption::Clear)?;

        let icons = self.scene_store.scene().icons.clone();
        self.scene_store
            .set_scene(self.initial_scene.clone().with_icons(icons));
        self.ui_store.reset_ui_state();
        self.close_menu();

        info!("Cleared canvas");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn open_link(&self, link: ExternalLink) -> Result<(), MenuError> {
        self.ensure_enabled(link.option())?;

        let url = match link {
            ExternalLink::GitHub => &self.config.links.repository_url,
            ExternalLink::Discord => &self.config.links.discord_url,
        };

        self.link_opener.open_url(url).map_err(|source| MenuError::Link {
            url: url.clone(),
            source,
        })
    }

    fn ensure_enabled(&self, option: MenuOption) -> Result<(), MenuError> {
        if self.is_enabled(option) {
            Ok(())
        } else {
            warn!(%option, "Menu action not enabled");
            Err(MenuError::ActionDisabled(option))
        }
    }
}
