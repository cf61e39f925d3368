pub mod init;
pub mod menu;
pub mod scene;

pub use init::{init, InitArgs};
pub use menu::{link, menu, LinkArgs, MenuArgs};
pub use scene::{clear, export, open, validate, ClearArgs, ExportArgs, OpenArgs, ValidateArgs};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use isoflow_editor::{EditorConfig, MenuController, SceneStore, UiStateStore};

use crate::host::{DirectorySavePrompt, PathFileSource, PrintLinkOpener};

pub type NativeController = MenuController<PathFileSource, DirectorySavePrompt, PrintLinkOpener>;

/// Per-invocation settings shared by all commands
pub struct Context {
    pub cwd: PathBuf,
    pub config: EditorConfig,
}

impl Context {
    pub fn load(cwd: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => EditorConfig::load_file(path)?,
            None => EditorConfig::load(&cwd)?,
        };
        Ok(Self { cwd, config })
    }

    /// Fresh stores and controller, as at editor startup
    pub fn controller(
        &self,
        file: Option<PathBuf>,
        out_dir: Option<PathBuf>,
    ) -> Result<NativeController> {
        let scene_store = Arc::new(SceneStore::new(self.config.initial_scene()?));
        let ui_store = Arc::new(UiStateStore::new(self.config.main_menu_options.clone()));
        let out_dir = out_dir.unwrap_or_else(|| self.cwd.clone());

        Ok(MenuController::new(
            scene_store,
            ui_store,
            self.config.clone(),
            PathFileSource::new(file),
            DirectorySavePrompt::new(out_dir),
            PrintLinkOpener,
        )?)
    }
}
