//! # UI State Store
//!
//! Session-scoped interaction state. Nothing here is persisted with the
//! scene.
//!
//! The main menu flags are managed explicitly by the menu controller. All
//! other flags describe interaction with the current scene and are restored by
//! [`UiStateStore::reset_ui_state`] whenever the scene is replaced, since they
//! may point at entities that no longer exist.

use isoflow_model::{ConnectorId, IconId, NodeId, RectangleId, TextBoxId};
use tokio::sync::watch;
use tracing::debug;

use crate::config::MenuOption;

/// Reference to a selectable scene entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Node(NodeId),
    Connector(ConnectorId),
    TextBox(TextBoxId),
    Rectangle(RectangleId),
}

/// Active canvas tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionMode {
    Cursor { selection: Option<ItemRef> },
    Pan,
    PlaceIcon { icon: Option<IconId> },
    Connector { in_progress: Option<ConnectorId> },
    DrawRectangle,
    TextBox,
}

impl Default for InteractionMode {
    fn default() -> Self {
        InteractionMode::Cursor { selection: None }
    }
}

/// Screen position the main menu overlay opens from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MenuAnchor {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scroll {
    pub x: f64,
    pub y: f64,
}

pub const DEFAULT_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub is_main_menu_open: bool,
    pub main_menu_anchor: Option<MenuAnchor>,
    pub mode: InteractionMode,
    pub item_controls: Option<ItemRef>,
    pub context_menu: Option<ItemRef>,
    pub scroll: Scroll,
    pub zoom: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            is_main_menu_open: false,
            main_menu_anchor: None,
            mode: InteractionMode::default(),
            item_controls: None,
            context_menu: None,
            scroll: Scroll::default(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl UiState {
    /// Restore every scene-dependent flag, leaving the main menu alone
    fn reset_interaction(&mut self) {
        let defaults = UiState::default();
        self.mode = defaults.mode;
        self.item_controls = defaults.item_controls;
        self.context_menu = defaults.context_menu;
        self.scroll = defaults.scroll;
        self.zoom = defaults.zoom;
    }

    pub fn selection(&self) -> Option<&ItemRef> {
        match &self.mode {
            InteractionMode::Cursor { selection } => selection.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct UiStateStore {
    state: watch::Sender<UiState>,
    main_menu_options: Vec<MenuOption>,
}

impl UiStateStore {
    /// `main_menu_options` is fixed for the lifetime of the store
    pub fn new(main_menu_options: Vec<MenuOption>) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self {
            state,
            main_menu_options,
        }
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn main_menu_options(&self) -> &[MenuOption] {
        &self.main_menu_options
    }

    pub fn is_main_menu_open(&self) -> bool {
        self.state.borrow().is_main_menu_open
    }

    pub fn set_is_main_menu_open(&self, is_open: bool) {
        self.update(|state| state.is_main_menu_open = is_open);
    }

    pub fn set_main_menu_anchor(&self, anchor: Option<MenuAnchor>) {
        self.update(|state| state.main_menu_anchor = anchor);
    }

    pub fn set_mode(&self, mode: InteractionMode) {
        self.update(|state| state.mode = mode);
    }

    pub fn set_item_controls(&self, item: Option<ItemRef>) {
        self.update(|state| state.item_controls = item);
    }

    pub fn set_context_menu(&self, item: Option<ItemRef>) {
        self.update(|state| state.context_menu = item);
    }

    pub fn set_scroll(&self, scroll: Scroll) {
        self.update(|state| state.scroll = scroll);
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.update(|state| state.zoom = zoom);
    }

    /// Return interaction flags to their defaults. Idempotent.
    pub fn reset_ui_state(&self) {
        debug!("Resetting UI state");
        self.update(UiState::reset_interaction);
    }

    // Subscribers are only woken when something actually changed.
    fn update(&self, modify: impl FnOnce(&mut UiState)) {
        self.state.send_if_modified(|state| {
            let before = state.clone();
            modify(state);
            *state != before
        });
    }
}

impl Default for UiStateStore {
    fn default() -> Self {
        Self::new(MenuOption::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_store() -> UiStateStore {
        let store = UiStateStore::default();
        store.set_mode(InteractionMode::Cursor {
            selection: Some(ItemRef::Node(NodeId::new("n1").unwrap())),
        });
        store.set_item_controls(Some(ItemRef::Node(NodeId::new("n1").unwrap())));
        store.set_context_menu(Some(ItemRef::Rectangle(RectangleId::new("r").unwrap())));
        store.set_scroll(Scroll { x: 40.0, y: -12.5 });
        store.set_zoom(0.5);
        store.set_is_main_menu_open(true);
        store
    }

    #[test]
    fn test_reset_restores_interaction_defaults() {
        let store = busy_store();
        store.reset_ui_state();

        let state = store.state();
        assert_eq!(state.mode, InteractionMode::default());
        assert_eq!(state.item_controls, None);
        assert_eq!(state.context_menu, None);
        assert_eq!(state.scroll, Scroll::default());
        assert_eq!(state.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_reset_leaves_main_menu_alone() {
        let store = busy_store();
        store.set_main_menu_anchor(Some(MenuAnchor { x: 8.0, y: 8.0 }));
        store.reset_ui_state();

        let state = store.state();
        assert!(state.is_main_menu_open);
        assert_eq!(state.main_menu_anchor, Some(MenuAnchor { x: 8.0, y: 8.0 }));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let store = busy_store();
        store.reset_ui_state();
        let once = store.state();
        store.reset_ui_state();

        assert_eq!(store.state(), once);
    }

    #[test]
    fn test_selection_only_in_cursor_mode() {
        let store = busy_store();
        assert!(store.state().selection().is_some());

        store.set_mode(InteractionMode::Pan);
        assert!(store.state().selection().is_none());
    }

    #[test]
    fn test_unchanged_update_does_not_notify() {
        let store = UiStateStore::default();
        let mut receiver = store.subscribe();

        store.set_is_main_menu_open(false);
        assert!(!receiver.has_changed().unwrap());

        store.set_is_main_menu_open(true);
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_main_menu_open);
    }
}
