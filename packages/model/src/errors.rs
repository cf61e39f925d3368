//! Error types for the scene codec

use thiserror::Error;

use crate::input::CURRENT_VERSION;

/// Scene data that can't be turned into a [`crate::Scene`].
///
/// Never retried: malformed input stays malformed.
#[derive(Error, Debug)]
pub enum MalformedSceneError {
    #[error("Scene is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("Scene must be a JSON object")]
    NotAnObject,

    #[error("Scene is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Scene field `{field}` is invalid: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported scene version {0} (newest supported is {})", CURRENT_VERSION)]
    UnsupportedVersion(u32),

    #[error("Duplicate {collection} id `{id}`")]
    DuplicateId { collection: &'static str, id: String },
}
