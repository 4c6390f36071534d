use thiserror::Error;

use crate::element::PropertyKind;
use crate::id_generator::{ElementId, PageId};

/// Errors raised while applying or reverting a [`Command`](crate::command::Command).
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Page {0} not found in deck")]
    PageNotFound(PageId),

    #[error("Element {0} not found on page")]
    ElementNotFound(ElementId),

    #[error("Element {0} is not a line")]
    NotALine(ElementId),

    #[error("{element} elements have no {property} property")]
    PropertyMismatch {
        property: PropertyKind,
        element: &'static str,
    },
}

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors raised while building elements.
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Errors raised while loading or validating an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
