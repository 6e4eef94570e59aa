//! Crate-level error type.
//!
//! Each module defines its own error enum; this wraps them for callers that
//! drive the whole build → layout → render pipeline through [`crate::run`].

use thiserror::Error;

use crate::{export, graph::GraphError, layout::LayoutError, style::StyleError};

/// The top-level error type for the lodestone pipeline.
///
/// All variants are synchronous, local failures: nothing is transient and
/// nothing is retried. A layout that fails to converge within its iteration
/// budget does not surface here; see
/// [`Layout::converged`](crate::layout::Layout::converged).
#[derive(Debug, Error)]
pub enum LodestoneError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("style error: {0}")]
    Style(#[from] StyleError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("export error: {0}")]
    Export(#[from] export::Error),
}
