use thiserror::Error;

/// Configuration error raised while loading or validating a [`Registry`](super::Registry).
///
/// Every variant names the body it was raised for, so the message can be shown
/// as-is to whoever authored the data.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{body}: radius must be a finite number > 0 (got {value})")]
    InvalidRadius { body: String, value: f64 },

    #[error("{body}: orbit distance must be a finite number > 0 (got {value})")]
    InvalidDistance { body: String, value: f64 },

    #[error("{body}: {field} must be finite (got {value})")]
    NonFiniteSpeed {
        body: String,
        field: &'static str,
        value: f64,
    },

    #[error("{body}: ring radii must satisfy 0 < inner < outer (got {inner}..{outer})")]
    InvalidRing { body: String, inner: f64, outer: f64 },

    #[error("{body}: orbiting body has no orbit parameters")]
    MissingOrbit { body: String },

    #[error("{body}: the star cannot orbit another body")]
    StarHasOrbit { body: String },

    #[error("{body}: required field `{field}` is missing")]
    MissingField { body: String, field: &'static str },

    #[error("{body}: a moon cannot own {what}")]
    UnsupportedNesting { body: String, what: &'static str },

    #[error("{body}: could not be attached to its parent node")]
    Detached { body: String },

    #[error("body at {position} has an empty name")]
    EmptyName { position: String },

    #[error("body name {name:?} is used more than once")]
    DuplicateName { name: String },

    #[error("registry JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
