//! Force-directed graph layout with an SVG render adapter.
//!
//! The crate runs one synchronous pipeline per call: build a [`Graph`] of
//! styled nodes and edges, compute positions with the spring layout engine,
//! and render the result into an SVG document. There is no ambient state and
//! no event wiring; the host invokes [`run`] once its display surface exists.
//!
//! ```
//! use lodestone::{EdgeStyle, Graph, NodeStyle, RunConfig, spring};
//!
//! # fn main() -> Result<(), lodestone::LodestoneError> {
//! let mut graph = Graph::new();
//! graph.add_node("A", NodeStyle::default())?;
//! graph.add_node("B", NodeStyle::default())?;
//! graph.add_edge("A", "B", EdgeStyle::default().with_label("1"))?;
//!
//! let config = RunConfig {
//!     surface_width: 800.0,
//!     surface_height: 600.0,
//!     layout: spring::Config {
//!         seed: Some(42),
//!         ..Default::default()
//!     },
//!     output: None,
//! };
//!
//! let output = lodestone::run(&graph, &config)?;
//! assert_eq!(output.layout.positions().len(), 2);
//! # Ok(())
//! # }
//! ```

mod color;
mod error;
mod export;
mod geometry;
mod graph;
mod layout;
mod style;

pub use color::Color;
pub use error::LodestoneError;
pub use export::{Error as ExportError, Exporter, svg::Svg};
pub use geometry::{Point, Size};
pub use graph::{Graph, GraphError, Node};
pub use layout::{Layout, LayoutError, Positions, State, spring};
pub use style::{EdgeStyle, NodeStyle, StyleError};

use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Configuration for a single [`run`] pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Width of the drawing surface in pixels.
    pub surface_width: f32,

    /// Height of the drawing surface in pixels.
    pub surface_height: f32,

    /// Spring simulation parameters.
    #[serde(default)]
    pub layout: spring::Config,

    /// Optional path to write the rendered SVG to.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Everything a run produces: the frozen layout and the rendered document.
pub struct RenderOutput {
    /// Node positions plus convergence information.
    pub layout: Layout,

    /// The rendered SVG document.
    pub document: svg::Document,
}

/// Runs the whole pipeline: layout the graph, render it, and optionally
/// write the SVG file named in the config.
pub fn run(graph: &Graph, cfg: &RunConfig) -> Result<RenderOutput, LodestoneError> {
    info!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        directed = graph.is_directed();
        "Processing graph"
    );

    let surface = Size::new(cfg.surface_width, cfg.surface_height);

    info!("Calculating spring layout");
    let mut engine = spring::Engine::new(cfg.layout.clone());
    let layout = engine.calculate(graph, surface)?;
    debug!(
        iterations_run = layout.iterations_run(),
        converged = layout.converged();
        "Layout calculated"
    );

    info!("Rendering SVG document");
    let exporter = Svg::new(surface);
    let document = exporter.render_layout(graph, &layout)?;

    if let Some(path) = &cfg.output {
        exporter.write_document(path, &document)?;
        info!(path:? = path; "SVG exported successfully");
    }

    Ok(RenderOutput { layout, document })
}
