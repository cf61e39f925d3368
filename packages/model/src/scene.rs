//! # Scene Model
//!
//! In-memory representation of a diagram. Entities are keyed by id; the
//! persisted form (see [`crate::input`]) stores them as sequences.
//!
//! Fields marked `#[serde(skip)]` are derived geometry cached by the canvas.
//! They are never written to disk and come back as `None` after a load.

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

use crate::ids::{AnchorId, ConnectorId, IconId, NodeId, RectangleId, TextBoxId};

/// Tile coordinates on the isometric grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Icon available for placement. Supplied by the host, persisted with the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub id: IconId,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_isometric: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconId>,
    pub tile: Coords,
}

impl Node {
    pub fn new(id: NodeId, tile: Coords) -> Self {
        Self {
            id,
            label: String::new(),
            description: None,
            label_height: None,
            icon: None,
            tile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

/// What a connector anchor is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorRef {
    Node(NodeId),
    Tile(Coords),
    Anchor(AnchorId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorAnchor {
    pub id: AnchorId,
    #[serde(rename = "ref")]
    pub reference: AnchorRef,
}

/// Routed path cached by the canvas after layout
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectorPath {
    pub origin: Coords,
    pub tiles: Vec<Coords>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: ConnectorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default)]
    pub style: ConnectorStyle,
    pub anchors: Vec<ConnectorAnchor>,

    #[serde(skip)]
    pub path: Option<ConnectorPath>,
}

impl Connector {
    /// Connector between two nodes, anchors named `<id>-from` / `<id>-to`.
    pub fn between(id: ConnectorId, from: NodeId, to: NodeId) -> Self {
        let anchor = |suffix: &str| AnchorId::new(format!("{id}-{suffix}"));
        // Both anchor ids are derived from a non-empty connector id.
        let anchors = [("from", from), ("to", to)]
            .into_iter()
            .filter_map(|(suffix, node)| {
                anchor(suffix).ok().map(|id| ConnectorAnchor {
                    id,
                    reference: AnchorRef::Node(node),
                })
            })
            .collect();

        Self {
            id,
            description: None,
            color: None,
            width: None,
            style: ConnectorStyle::default(),
            anchors,
            path: None,
        }
    }

    /// Node ids referenced by this connector's anchors
    pub fn node_refs(&self) -> impl Iterator<Item = &NodeId> {
        self.anchors.iter().filter_map(|anchor| match &anchor.reference {
            AnchorRef::Node(node_id) => Some(node_id),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    #[default]
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    pub id: TextBoxId,
    pub tile: Coords,
    #[serde(default)]
    pub content: String,
    /// Must be finite to be written out; JSON has no NaN or infinity
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_finite"
    )]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub orientation: Orientation,

    #[serde(skip)]
    pub size: Option<Size>,
}

fn serialize_finite<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(number) if !number.is_finite() => {
            Err(S::Error::custom(format!("expected a finite number, got {number}")))
        }
        _ => value.serialize(serializer),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: RectangleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub from: Coords,
    pub to: Coords,
}

/// The complete diagram
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub title: String,
    pub icons: Vec<Icon>,
    pub nodes: BTreeMap<NodeId, Node>,
    pub connectors: BTreeMap<ConnectorId, Connector>,
    pub text_boxes: BTreeMap<TextBoxId, TextBox>,
    pub rectangles: BTreeMap<RectangleId, Rectangle>,
}

impl Scene {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Same scene content with `icons` swapped in
    pub fn with_icons(self, icons: Vec<Icon>) -> Self {
        Self { icons, ..self }
    }

    pub fn insert_node(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    pub fn insert_connector(&mut self, connector: Connector) -> Option<Connector> {
        self.connectors.insert(connector.id.clone(), connector)
    }

    pub fn insert_text_box(&mut self, text_box: TextBox) -> Option<TextBox> {
        self.text_boxes.insert(text_box.id.clone(), text_box)
    }

    pub fn insert_rectangle(&mut self, rectangle: Rectangle) -> Option<Rectangle> {
        self.rectangles.insert(rectangle.id.clone(), rectangle)
    }

    /// True when the scene holds no user content (icons don't count)
    pub fn is_blank(&self) -> bool {
        self.nodes.is_empty()
            && self.connectors.is_empty()
            && self.text_boxes.is_empty()
            && self.rectangles.is_empty()
    }

    /// Connector anchors pointing at nodes that don't exist in this scene.
    ///
    /// Loading never repairs these; callers that need referential integrity
    /// check here and decide what to do.
    pub fn dangling_node_refs(&self) -> Vec<(ConnectorId, NodeId)> {
        self.connectors
            .values()
            .flat_map(|connector| {
                connector
                    .node_refs()
                    .filter(|node_id| !self.nodes.contains_key(*node_id))
                    .map(|node_id| (connector.id.clone(), node_id.clone()))
            })
            .collect()
    }

    /// Drop cached geometry (connector paths, text box sizes)
    pub fn clear_cached_geometry(&mut self) {
        for connector in self.connectors.values_mut() {
            connector.path = None;
        }
        for text_box in self.text_boxes.values_mut() {
            text_box.size = None;
        }
    }
}
