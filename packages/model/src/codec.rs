//! # Scene Codec
//!
//! Converts between [`Scene`] and the persisted [`SceneInput`].
//!
//! ## Contract
//!
//! - `encode` is total. It drops cached geometry and orders collections by id.
//! - `decode` treats its input as untrusted. Missing keys, wrong shapes,
//!   duplicate ids and unknown versions are errors.
//! - Cross-entity integrity is not checked here. A connector pointing at a
//!   missing node loads as-is; see [`Scene::dangling_node_refs`].
//!
//! For every field the format defines, `decode(encode(scene))` yields the
//! same scene.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::MalformedSceneError;
use crate::ids::Id;
use crate::input::{SceneInput, CURRENT_VERSION, LEGACY_VERSION, REQUIRED_FIELDS};
use crate::scene::{Connector, Scene, TextBox};

/// Project a scene onto its persisted form
pub fn encode(scene: &Scene) -> SceneInput {
    SceneInput {
        version: CURRENT_VERSION,
        title: scene.title.clone(),
        icons: scene.icons.clone(),
        nodes: scene.nodes.values().cloned().collect(),
        connectors: scene
            .connectors
            .values()
            .map(|connector| Connector {
                path: None,
                ..connector.clone()
            })
            .collect(),
        text_boxes: scene
            .text_boxes
            .values()
            .map(|text_box| TextBox {
                size: None,
                ..text_box.clone()
            })
            .collect(),
        rectangles: scene.rectangles.values().cloned().collect(),
    }
}

/// Build a scene from its persisted form, rejecting duplicate ids
pub fn decode(input: SceneInput) -> Result<Scene, MalformedSceneError> {
    match input.version {
        LEGACY_VERSION | CURRENT_VERSION => {}
        other => return Err(MalformedSceneError::UnsupportedVersion(other)),
    }

    let scene = Scene {
        title: input.title,
        icons: input.icons,
        nodes: index_unique("node", input.nodes, |n| &n.id)?,
        connectors: index_unique("connector", input.connectors, |c| &c.id)?,
        text_boxes: index_unique("textBox", input.text_boxes, |t| &t.id)?,
        rectangles: index_unique("rectangle", input.rectangles, |r| &r.id)?,
    };

    debug!(
        title = %scene.title,
        nodes = scene.nodes.len(),
        connectors = scene.connectors.len(),
        text_boxes = scene.text_boxes.len(),
        rectangles = scene.rectangles.len(),
        "Decoded scene"
    );

    Ok(scene)
}

/// Decode scene text as read from a user-selected file
pub fn decode_str(text: &str) -> Result<Scene, MalformedSceneError> {
    let value: Value = serde_json::from_str(text).map_err(MalformedSceneError::Syntax)?;
    decode_value(value)
}

/// Decode an already-parsed JSON document
pub fn decode_value(value: Value) -> Result<Scene, MalformedSceneError> {
    let Value::Object(mut map) = value else {
        return Err(MalformedSceneError::NotAnObject);
    };

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !map.contains_key(**key)) {
        return Err(MalformedSceneError::MissingField(*missing));
    }

    let version = match map.remove("version") {
        None | Some(Value::Null) => LEGACY_VERSION,
        Some(value) => from_field("version", value)?,
    };

    let input = match version {
        // The unversioned format already used the current layout.
        LEGACY_VERSION | CURRENT_VERSION => SceneInput {
            version,
            title: take_field(&mut map, "title")?,
            icons: take_field(&mut map, "icons")?,
            nodes: take_field(&mut map, "nodes")?,
            connectors: take_field(&mut map, "connectors")?,
            text_boxes: take_field(&mut map, "textBoxes")?,
            rectangles: take_field(&mut map, "rectangles")?,
        },
        other => return Err(MalformedSceneError::UnsupportedVersion(other)),
    };

    decode(input)
}

/// Serialize a scene input as compact JSON
pub fn to_json_bytes(input: &SceneInput) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(input)
}

impl From<SceneInput> for Scene {
    /// Lenient conversion for inputs built in code. Later duplicates replace
    /// earlier ones; use [`decode`] for anything read from outside.
    fn from(input: SceneInput) -> Self {
        Scene {
            title: input.title,
            icons: input.icons,
            nodes: index_lenient("node", input.nodes, |n| &n.id),
            connectors: index_lenient("connector", input.connectors, |c| &c.id),
            text_boxes: index_lenient("textBox", input.text_boxes, |t| &t.id),
            rectangles: index_lenient("rectangle", input.rectangles, |r| &r.id),
        }
    }
}

fn take_field<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    field: &'static str,
) -> Result<T, MalformedSceneError> {
    let value = map
        .remove(field)
        .ok_or(MalformedSceneError::MissingField(field))?;
    from_field(field, value)
}

fn from_field<T: DeserializeOwned>(
    field: &'static str,
    value: Value,
) -> Result<T, MalformedSceneError> {
    serde_json::from_value(value)
        .map_err(|source| MalformedSceneError::InvalidField { field, source })
}

fn index_unique<Tag: Ord + Clone, T>(
    collection: &'static str,
    items: Vec<T>,
    id_of: impl Fn(&T) -> &Id<Tag>,
) -> Result<BTreeMap<Id<Tag>, T>, MalformedSceneError> {
    let mut indexed = BTreeMap::new();
    for item in items {
        let id = id_of(&item).clone();
        if indexed.contains_key(&id) {
            return Err(MalformedSceneError::DuplicateId {
                collection,
                id: id.into_string(),
            });
        }
        indexed.insert(id, item);
    }
    Ok(indexed)
}

fn index_lenient<Tag: Ord + Clone, T>(
    collection: &'static str,
    items: Vec<T>,
    id_of: impl Fn(&T) -> &Id<Tag>,
) -> BTreeMap<Id<Tag>, T> {
    let mut indexed = BTreeMap::new();
    for item in items {
        let id = id_of(&item).clone();
        if let Some(_replaced) = indexed.insert(id.clone(), item) {
            warn!(collection, id = %id, "Duplicate id in scene input, keeping the last entry");
        }
    }
    indexed
}
