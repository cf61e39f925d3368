//! Integration tests for editor crate

use std::sync::Arc;

use isoflow_editor::host::{MockFile, MockFileSource, MockLinkOpener, MockSavePrompt};
use isoflow_editor::{
    EditorConfig, InteractionMode, ItemRef, MenuAnchor, MenuController, MenuEntry, MenuOption,
    OpenOutcome, SceneInput, SceneStore, UiStateStore,
};
use isoflow_model::{codec, Coords, Node, NodeId, Rectangle, RectangleId, Scene};

#[tokio::test]
async fn test_session_lifecycle() {
    // Startup: stores built from config and injected
    let config: EditorConfig = serde_json::from_str(
        r#"{
            "mainMenuOptions": ["OPEN", "SAVE_JSON", "CLEAR", "VERSION"],
            "version": "0.9.0",
            "initialScene": {
                "version": 1,
                "title": "Blank",
                "icons": [{ "id": "box", "name": "Box", "url": "https://isoflow.io/box.svg" }],
                "nodes": [], "connectors": [], "textBoxes": [], "rectangles": []
            }
        }"#,
    )
    .unwrap();

    let scene_store = Arc::new(SceneStore::new(config.initial_scene().unwrap()));
    let ui_store = Arc::new(UiStateStore::new(config.main_menu_options.clone()));
    let mut scene_updates = scene_store.subscribe();

    let controller = MenuController::new(
        scene_store.clone(),
        ui_store.clone(),
        config,
        MockFileSource::new(),
        MockSavePrompt::new(),
        MockLinkOpener::new(),
    )
    .unwrap();

    let entries = controller.menu_view().unwrap().entries();
    assert_eq!(entries.last(), Some(&MenuEntry::Label("Isoflow v0.9.0".to_string())));
    assert!(!entries.iter().any(|entry| matches!(entry, MenuEntry::Link(_))));

    // Open a diagram
    let mut opened = Scene::new("Network").with_icons(scene_store.scene().icons.clone());
    opened.insert_node(Node::new(NodeId::new("router").unwrap(), Coords::new(0, 0)));
    opened.insert_rectangle(Rectangle {
        id: RectangleId::new("dmz").unwrap(),
        color: None,
        from: Coords::new(-2, -2),
        to: Coords::new(2, 2),
    });
    let text = String::from_utf8(codec::to_json_bytes(&codec::encode(&opened)).unwrap()).unwrap();
    controller
        .file_source()
        .push_file(MockFile::new("network.json", text));

    controller.open_menu(MenuAnchor::default());
    let outcome = controller.open_scene().await.unwrap();
    assert!(matches!(outcome, OpenOutcome::Loaded { .. }));
    assert!(scene_updates.has_changed().unwrap());
    assert_eq!(scene_updates.borrow_and_update().title, "Network");

    // Interact, then save
    ui_store.set_mode(InteractionMode::Cursor {
        selection: Some(ItemRef::Node(NodeId::new("router").unwrap())),
    });
    let artifact = controller.save_as().unwrap();
    assert!(artifact.file_name.starts_with("isoflow-"));
    assert!(artifact.file_name.ends_with(".json"));

    // Clear drops content and selection, keeps icons
    controller.clear_canvas().unwrap();
    assert_eq!(scene_store.scene().title, "Blank");
    assert!(scene_store.scene().is_blank());
    assert_eq!(scene_store.scene().icons.len(), 1);
    assert_eq!(ui_store.state().selection(), None);

    // Reopen what was saved
    let saved = String::from_utf8(artifact.bytes).unwrap();
    controller
        .file_source()
        .push_file(MockFile::new("network.json", saved));
    controller.open_scene().await.unwrap();
    assert_eq!(*scene_store.scene(), opened);
}

#[test]
fn test_set_scene_with_input_and_model() {
    let store = SceneStore::default();

    let input = SceneInput {
        title: "input".to_string(),
        nodes: vec![Node::new(NodeId::new("n").unwrap(), Coords::new(1, 2))],
        ..SceneInput::default()
    };
    store.set_scene(input);
    assert_eq!(store.scene().nodes.len(), 1);

    store.set_scene(Scene::new("model"));
    assert_eq!(store.scene().title, "model");
    assert!(store.scene().nodes.is_empty());
}

#[test]
fn test_config_rejects_duplicate_initial_scene_ids() {
    let mut config = EditorConfig::default();
    let node = Node::new(NodeId::new("dup").unwrap(), Coords::new(0, 0));
    config.initial_scene.nodes = vec![node.clone(), node];

    let result = MenuController::new(
        Arc::new(SceneStore::default()),
        Arc::new(UiStateStore::new(vec![MenuOption::Clear])),
        config,
        MockFileSource::new(),
        MockSavePrompt::new(),
        MockLinkOpener::new(),
    );
    assert!(result.is_err());
}
