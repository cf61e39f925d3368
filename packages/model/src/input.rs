//! Persisted scene format.
//!
//! ```json
//! {
//!   "version": 1,
//!   "title": "My diagram",
//!   "icons": [...],
//!   "nodes": [...],
//!   "connectors": [...],
//!   "textBoxes": [...],
//!   "rectangles": [...]
//! }
//! ```
//!
//! Entity collections are sequences ordered by id. Unknown keys are ignored
//! on load.

use serde::{Deserialize, Serialize};

use crate::scene::{Connector, Icon, Node, Rectangle, TextBox};

/// Format version written by [`crate::codec::encode`]
pub const CURRENT_VERSION: u32 = 1;

/// Files written before the format carried a `version` key
pub const LEGACY_VERSION: u32 = 0;

/// Top-level keys every scene file must carry
pub const REQUIRED_FIELDS: [&str; 6] = [
    "title",
    "icons",
    "nodes",
    "connectors",
    "textBoxes",
    "rectangles",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneInput {
    #[serde(default)]
    pub version: u32,
    pub title: String,
    pub icons: Vec<Icon>,
    pub nodes: Vec<Node>,
    pub connectors: Vec<Connector>,
    pub text_boxes: Vec<TextBox>,
    pub rectangles: Vec<Rectangle>,
}

impl Default for SceneInput {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            title: "Untitled".to_string(),
            icons: Vec::new(),
            nodes: Vec::new(),
            connectors: Vec::new(),
            text_boxes: Vec::new(),
            rectangles: Vec::new(),
        }
    }
}
