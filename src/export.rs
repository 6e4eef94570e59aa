//! Render adapters: consumers that turn a graph plus frozen positions into
//! drawn output.

pub mod svg;

use thiserror::Error;

use crate::{graph::Graph, layout::Layout};

/// A render adapter that draws a positioned graph.
///
/// Adapters are pure consumers: they read the graph and the layout result
/// and produce a document, without mutating either.
pub trait Exporter {
    fn render_layout(&self, graph: &Graph, layout: &Layout) -> Result<::svg::Document, Error>;
}

/// Errors raised by render adapters.
#[derive(Debug, Error)]
pub enum Error {
    /// The adapter received input it cannot draw.
    #[error("render error: {0}")]
    Render(String),

    /// Writing the rendered document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
