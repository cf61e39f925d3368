//! # Isoflow Model
//!
//! Scene data and its persisted form.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Scene: in-memory diagram                    │
//! │  - entities keyed by typed ids              │
//! │  - cached geometry (never persisted)        │
//! └─────────────────────────────────────────────┘
//!               ↓ encode        ↑ decode
//! ┌─────────────────────────────────────────────┐
//! │ SceneInput: versioned JSON file format      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use isoflow_model::{codec, Scene};
//!
//! let scene = Scene::new("demo");
//! let bytes = codec::to_json_bytes(&codec::encode(&scene)).unwrap();
//! let text = String::from_utf8(bytes).unwrap();
//!
//! assert_eq!(codec::decode_str(&text).unwrap(), scene);
//! ```

pub mod codec;
mod errors;
pub mod ids;
mod input;
mod scene;

pub use codec::{decode, decode_str, decode_value, encode, to_json_bytes};
pub use errors::MalformedSceneError;
pub use ids::{AnchorId, ConnectorId, IconId, Id, IdError, NodeId, RectangleId, TextBoxId};
pub use input::{SceneInput, CURRENT_VERSION, LEGACY_VERSION, REQUIRED_FIELDS};
pub use scene::{
    AnchorRef, Connector, ConnectorAnchor, ConnectorPath, ConnectorStyle, Coords, Icon, Node,
    Orientation, Rectangle, Scene, Size, TextBox,
};
