//! Error types for mounting the field and loading settings.
//!
//! None of these reach the user: mount failures leave the page without a
//! background, and bad settings fall back to defaults.

use std::fmt;

/// Errors that can occur while mounting the field onto a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// Window has no document.
    NoDocument,
    /// Document has no body to attach a created canvas to.
    NoBody,
    /// No element with the requested id.
    CanvasMissing(String),
    /// Element exists but is not a `<canvas>`.
    NotACanvas(String),
    /// `getContext("2d")` returned nothing.
    ContextUnavailable,
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::NoWindow => write!(f, "No browser window available"),
            MountError::NoDocument => write!(f, "Window has no document"),
            MountError::NoBody => write!(f, "Document has no body"),
            MountError::CanvasMissing(id) => write!(f, "No element with id '{}'", id),
            MountError::NotACanvas(id) => write!(f, "Element '{}' is not a canvas", id),
            MountError::ContextUnavailable => write!(f, "2D drawing context unavailable"),
            MountError::Js(msg) => write!(f, "DOM call failed: {}", msg),
        }
    }
}

impl std::error::Error for MountError {}

/// Errors that can occur when validating or parsing [`Settings`](crate::Settings).
#[derive(Debug)]
pub enum SettingsError {
    /// A `min`/`max` pair is inverted or not finite.
    InvalidRange { field: &'static str },
    /// A value that must be strictly positive is not.
    NonPositive { field: &'static str },
    /// A value exceeds the accepted maximum.
    TooLarge { field: &'static str },
    /// JSON could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidRange { field } => {
                write!(f, "Invalid range for '{}': min must be <= max and finite", field)
            }
            SettingsError::NonPositive { field } => {
                write!(f, "'{}' must be positive and finite", field)
            }
            SettingsError::TooLarge { field } => write!(f, "'{}' is too large", field),
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
