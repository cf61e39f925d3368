//! Integration tests for the scene codec

use isoflow_model::{
    codec, AnchorRef, Connector, ConnectorId, ConnectorStyle, Coords, Icon, IconId,
    MalformedSceneError, Node, NodeId, Rectangle, RectangleId, Scene, CURRENT_VERSION,
};

fn demo_scene() -> Scene {
    let mut scene = Scene::new("demo").with_icons(vec![Icon {
        id: IconId::new("block").unwrap(),
        name: "Block".to_string(),
        url: "https://isoflow.io/icons/block.svg".to_string(),
        collection: Some("isoflow".to_string()),
        is_isometric: Some(true),
    }]);

    let mut server = Node::new(NodeId::new("server").unwrap(), Coords::new(0, 0));
    server.label = "Server".to_string();
    server.icon = Some(IconId::new("block").unwrap());
    scene.insert_node(server);

    let mut db = Node::new(NodeId::new("db").unwrap(), Coords::new(4, -2));
    db.description = Some("Primary database".to_string());
    db.label_height = Some(80);
    scene.insert_node(db);

    let mut link = Connector::between(
        ConnectorId::new("link").unwrap(),
        NodeId::new("server").unwrap(),
        NodeId::new("db").unwrap(),
    );
    link.style = ConnectorStyle::Dashed;
    link.width = Some(10);
    link.color = Some("#a5b8f3".to_string());
    scene.insert_connector(link);

    scene.insert_rectangle(Rectangle {
        id: RectangleId::new("zone").unwrap(),
        color: Some("#e8f5e9".to_string()),
        from: Coords::new(-1, -3),
        to: Coords::new(5, 1),
    });

    scene
}

#[test]
fn test_round_trip_through_json_text() {
    let scene = demo_scene();

    let bytes = codec::to_json_bytes(&codec::encode(&scene)).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let decoded = codec::decode_str(&text).unwrap();

    assert_eq!(decoded, scene);
}

#[test]
fn test_encoded_json_shape() {
    let input = codec::encode(&demo_scene());
    let json = serde_json::to_value(&input).unwrap();

    assert_eq!(json["version"], CURRENT_VERSION);
    assert_eq!(json["title"], "demo");
    for key in ["icons", "nodes", "connectors", "textBoxes", "rectangles"] {
        assert!(json[key].is_array(), "{key} should be a sequence");
    }

    // Ordered by id
    assert_eq!(json["nodes"][0]["id"], "db");
    assert_eq!(json["nodes"][1]["id"], "server");
    assert_eq!(json["nodes"][0]["labelHeight"], 80);
    assert_eq!(json["connectors"][0]["style"], "DASHED");
    assert_eq!(json["connectors"][0]["anchors"][0]["ref"]["node"], "server");
    assert_eq!(json["icons"][0]["isIsometric"], true);
}

#[test]
fn test_invalid_json_is_malformed() {
    let err = codec::decode_str("{not json").unwrap_err();
    assert!(matches!(err, MalformedSceneError::Syntax(_)));
}

#[test]
fn test_empty_object_is_missing_title() {
    let err = codec::decode_str("{}").unwrap_err();
    assert!(matches!(err, MalformedSceneError::MissingField("title")));
}

#[test]
fn test_legacy_unversioned_file_loads() {
    let text = r#"{
        "title": "legacy",
        "icons": [],
        "nodes": [{ "id": "n1", "label": "One", "tile": { "x": 1, "y": 2 } }],
        "connectors": [],
        "textBoxes": [{ "id": "t1", "tile": { "x": 0, "y": 0 }, "content": "hi" }],
        "rectangles": []
    }"#;

    let scene = codec::decode_str(text).unwrap();
    assert_eq!(scene.title, "legacy");
    assert_eq!(scene.nodes["n1"].tile, Coords::new(1, 2));
    assert_eq!(scene.text_boxes["t1"].content, "hi");
}

#[test]
fn test_future_version_is_rejected() {
    let text = r#"{
        "version": 99,
        "title": "from the future",
        "icons": [], "nodes": [], "connectors": [], "textBoxes": [], "rectangles": []
    }"#;

    let err = codec::decode_str(text).unwrap_err();
    assert!(matches!(err, MalformedSceneError::UnsupportedVersion(99)));
}

#[test]
fn test_dangling_connector_survives_round_trip() {
    let mut scene = demo_scene();
    scene.nodes.remove("db");
    assert_eq!(scene.dangling_node_refs().len(), 1);

    let decoded = codec::decode(codec::encode(&scene)).unwrap();

    assert_eq!(decoded.connectors.len(), 1);
    assert_eq!(decoded.dangling_node_refs(), scene.dangling_node_refs());
    let anchors = &decoded.connectors["link"].anchors;
    assert_eq!(anchors[1].reference, AnchorRef::Node(NodeId::new("db").unwrap()));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let text = r#"{
        "version": 1,
        "title": "extra",
        "selection": ["n1"],
        "icons": [], "nodes": [], "connectors": [], "textBoxes": [], "rectangles": []
    }"#;

    let scene = codec::decode_str(text).unwrap();
    assert_eq!(scene.title, "extra");
    assert!(scene.is_blank());
}
