use sf_core::{DomError, NodeIndex, StyleError};

/// Failures while setting up or maintaining an [`SvgSurface`](crate::SvgSurface).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error("node {0:?} is not an element and cannot host a surface")]
    NotAnElement(NodeIndex),
}

/// Failures of style updates and draw calls on an [`SvgForm`](crate::SvgForm).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("item not defined or not yet added to a surface")]
    MissingIdentity,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid surface config: {0}")]
    Json(#[from] serde_json::Error),
}
