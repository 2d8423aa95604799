//! Errors for style resolution and kit configuration.

use std::path::PathBuf;

/// Error returned when a style prop cannot be resolved.
///
/// Resolution never falls back to a default for a bad value: a token outside
/// the registry is an authoring mistake and is handed straight back to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// A style prop was set to a value that is not a key of its registry.
    #[error(
        "unknown {property} token '{supplied}' (expected one of: {})",
        .valid.join(", ")
    )]
    UnknownToken {
        /// The prop that carried the value (e.g. `color`, `pt`)
        property: String,
        /// The value as supplied by the caller
        supplied: String,
        /// Every token the registry accepts, in registry order
        valid: Vec<String>,
    },
}

impl StyleError {
    pub(crate) fn unknown_token<I, S>(property: &str, supplied: impl Into<String>, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StyleError::UnknownToken {
            property: property.to_string(),
            supplied: supplied.into(),
            valid: valid.into_iter().map(Into::into).collect(),
        }
    }
}

/// Error returned when a kit configuration is rejected.
///
/// All of these are raised while a [`Kit`](crate::Kit) is being built, so a
/// kit that loaded successfully can only fail at compose time with
/// [`StyleError`].
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error("failed to parse kit YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse kit JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read kit file \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported kit file extension for \"{}\" (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("component '{kind}' is defined more than once")]
    DuplicateKind { kind: String },

    #[error("component '{kind}': axis '{prop}' is declared more than once")]
    DuplicateAxis { kind: String, prop: String },

    #[error("component '{kind}': default '{default}' for '{prop}' is not one of its tokens")]
    UnknownDefault {
        kind: String,
        prop: String,
        default: String,
    },

    #[error("component '{kind}': order slot '{slot}' does not name a declared axis")]
    UnknownSlot { kind: String, slot: String },

    #[error("component '{kind}': axis '{prop}' is missing from the emission order")]
    MissingSlot { kind: String, prop: String },

    #[error("component '{kind}': slot '{slot}' appears more than once in the emission order")]
    DuplicateSlot { kind: String, slot: String },

    #[error("component '{kind}': axis '{prop}' collides with a reserved prop name")]
    ReservedProp { kind: String, prop: String },

    #[error("component '{kind}': '{class}' is not a single class name")]
    InvalidClass { kind: String, class: String },

    #[error("component '{kind}': class for token '{token}' of '{prop}' must be a string")]
    NonStringClass {
        kind: String,
        prop: String,
        token: String,
    },
}
