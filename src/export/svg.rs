//! SVG render adapter built on the `svg` crate.
//!
//! Consumes a graph and its frozen layout and produces an `svg::Document`
//! sized to the surface the layout was computed for. Nodes are drawn as
//! filled discs with centered labels, edges as lines with optional mid-point
//! labels, and directed graphs get per-color arrowhead markers.

use std::{fs::File, io::Write, path::Path as FilePath};

use log::{debug, error, info};
use svg::{
    Document,
    node::element::{Circle, Definitions, Group, Line, Marker, Path, Text},
};

use crate::{
    export::{self, Exporter},
    geometry::{Point, Size},
    graph::{Graph, Node},
    layout::Layout,
    style::EdgeStyle,
};

/// SVG exporter for a fixed surface size.
pub struct Svg {
    surface: Size,
}

impl Svg {
    /// Creates an exporter targeting a surface of the given dimensions.
    pub fn new(surface: Size) -> Self {
        Self { surface }
    }

    /// Writes a rendered document to the given file path.
    pub fn write_document(&self, path: &FilePath, doc: &Document) -> Result<(), export::Error> {
        info!(path:? = path; "Creating SVG file");
        let f = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!(path:? = path, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(path:? = path, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }

    /// Creates one arrowhead marker per distinct edge stroke color.
    fn marker_definitions(&self, graph: &Graph) -> Definitions {
        let mut defs = Definitions::new();
        let mut seen: Vec<String> = Vec::new();

        for (_, _, style) in graph.edges() {
            let token = style.stroke().id_token();
            if seen.contains(&token) {
                continue;
            }

            let marker = Marker::new()
                .set("id", format!("arrow-{token}"))
                .set("viewBox", "0 0 10 10")
                .set("refX", 9)
                .set("refY", 5)
                .set("markerWidth", 6)
                .set("markerHeight", 6)
                .set("orient", "auto")
                .add(
                    Path::new()
                        .set("d", "M 0 0 L 10 5 L 0 10 z")
                        .set("fill", style.stroke()),
                );

            defs = defs.add(marker);
            seen.push(token);
        }

        defs
    }

    fn render_node(&self, node: &Node, position: Point) -> Group {
        let style = node.style();

        let disc = Circle::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", style.radius())
            .set("fill", style.fill())
            .set("stroke", style.stroke())
            .set("stroke-width", style.stroke_width());

        let label = Text::new(node.display_text())
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", "Arial")
            .set("font-size", 14);

        Group::new().add(disc).add(label)
    }

    fn render_edge(
        &self,
        source: (&Node, Point),
        target: (&Node, Point),
        style: &EdgeStyle,
        directed: bool,
    ) -> Group {
        let mut group = Group::new();

        let (source_node, source_pos) = source;
        let (target_node, target_pos) = target;

        // Trim the line to the disc rims so arrowheads stay visible
        let distance = source_pos.distance_to(target_pos);
        let (start, end) = if distance > source_node.style().radius() + target_node.style().radius()
        {
            let unit = target_pos.sub_point(source_pos).scale(1.0 / distance);
            (
                source_pos.add_point(unit.scale(source_node.style().radius())),
                target_pos.sub_point(unit.scale(target_node.style().radius())),
            )
        } else {
            (source_pos, target_pos)
        };

        let mut line = Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("stroke", style.stroke())
            .set("stroke-width", 1.0);
        if directed {
            line = line.set(
                "marker-end",
                format!("url(#arrow-{})", style.stroke().id_token()),
            );
        }
        group = group.add(line);

        if let Some(label) = style.label() {
            let mid = start.midpoint(end);
            group = group.add(self.edge_label(label, mid, style));
        }

        group
    }

    /// Draws a self-loop as a small arc above the node.
    fn render_self_loop(
        &self,
        node: (&Node, Point),
        style: &EdgeStyle,
        directed: bool,
    ) -> Group {
        let mut group = Group::new();

        let (node_ref, position) = node;
        let radius = node_ref.style().radius();
        let anchor = Point::new(position.x(), position.y() - radius);

        let mut path = Path::new()
            .set(
                "d",
                format!(
                    "M {} {} C {} {}, {} {}, {} {}",
                    anchor.x(),
                    anchor.y(),
                    anchor.x() - radius * 1.8,
                    anchor.y() - radius * 2.4,
                    anchor.x() + radius * 1.8,
                    anchor.y() - radius * 2.4,
                    anchor.x(),
                    anchor.y(),
                ),
            )
            .set("fill", "none")
            .set("stroke", style.stroke())
            .set("stroke-width", 1.0);
        if directed {
            path = path.set(
                "marker-end",
                format!("url(#arrow-{})", style.stroke().id_token()),
            );
        }
        group = group.add(path);

        if let Some(label) = style.label() {
            let above = Point::new(position.x(), position.y() - radius * 3.2);
            group = group.add(self.edge_label(label, above, style));
        }

        group
    }

    fn edge_label(&self, label: &str, at: Point, style: &EdgeStyle) -> Text {
        Text::new(label)
            .set("x", at.x())
            .set("y", at.y() - 4.0)
            .set("text-anchor", "middle")
            .set("font-family", "Arial")
            .set("font-size", style.label_font_size())
            .set("fill", style.fill())
    }

    fn position_of(&self, layout: &Layout, node: &Node) -> Result<Point, export::Error> {
        layout
            .position_of(node.id())
            .ok_or_else(|| export::Error::Render(format!("no position for node `{}`", node.id())))
    }
}

impl Exporter for Svg {
    fn render_layout(&self, graph: &Graph, layout: &Layout) -> Result<Document, export::Error> {
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.surface.width(), self.surface.height()),
            )
            .set("width", self.surface.width())
            .set("height", self.surface.height());

        if graph.is_directed() {
            doc = doc.add(self.marker_definitions(graph));
        }

        // Edges first so node discs sit on top of the lines
        let mut edge_group = Group::new();
        for (source_idx, target_idx, style) in graph.edges() {
            let source = graph.node_from_idx(source_idx);
            let target = graph.node_from_idx(target_idx);
            let source_pos = self.position_of(layout, source)?;
            let target_pos = self.position_of(layout, target)?;

            let rendered = if source_idx == target_idx {
                self.render_self_loop((source, source_pos), style, graph.is_directed())
            } else {
                self.render_edge(
                    (source, source_pos),
                    (target, target_pos),
                    style,
                    graph.is_directed(),
                )
            };
            edge_group = edge_group.add(rendered);
        }
        doc = doc.add(edge_group);

        let mut node_group = Group::new();
        for (_, node) in graph.nodes_with_indices() {
            let position = self.position_of(layout, node)?;
            node_group = node_group.add(self.render_node(node, position));
        }
        doc = doc.add(node_group);

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count();
            "SVG document rendered"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::spring,
        style::{EdgeStyle, NodeStyle},
    };

    fn small_layout(graph: &Graph, surface: Size) -> Layout {
        let config = spring::Config {
            seed: Some(3),
            ..spring::Config::default()
        };
        spring::Engine::new(config).calculate(graph, surface).unwrap()
    }

    #[test]
    fn test_rendered_document_contains_nodes_and_edges() {
        let mut graph = Graph::new();
        graph.add_node("A", NodeStyle::default()).unwrap();
        graph.add_node("B", NodeStyle::default()).unwrap();
        graph
            .add_edge("A", "B", EdgeStyle::default().with_label("1"))
            .unwrap();

        let surface = Size::new(400.0, 300.0);
        let layout = small_layout(&graph, surface);

        let doc = Svg::new(surface).render_layout(&graph, &layout).unwrap();
        let rendered = doc.to_string();

        assert!(rendered.contains("<circle"));
        assert!(rendered.contains("<line"));
        assert!(rendered.contains("<text"));
        // The edge label is the only element at the edge-label font size
        assert!(rendered.contains("font-size=\"15\""));
        // Undirected graphs get no arrowheads
        assert!(!rendered.contains("marker-end"));
    }

    #[test]
    fn test_directed_graph_gets_arrowheads() {
        let mut graph = Graph::new();
        graph.set_directed(true).unwrap();
        graph.add_node("A", NodeStyle::default()).unwrap();
        graph.add_node("B", NodeStyle::default()).unwrap();
        graph.add_edge("A", "B", EdgeStyle::default()).unwrap();

        let surface = Size::new(400.0, 300.0);
        let layout = small_layout(&graph, surface);

        let rendered = Svg::new(surface)
            .render_layout(&graph, &layout)
            .unwrap()
            .to_string();

        assert!(rendered.contains("<marker"));
        assert!(rendered.contains("marker-end"));
    }

    #[test]
    fn test_self_loop_rendered_as_path() {
        let mut graph = Graph::new();
        graph.add_node("E", NodeStyle::default()).unwrap();
        graph
            .add_edge("E", "E", EdgeStyle::default().with_label("2"))
            .unwrap();

        let surface = Size::new(200.0, 200.0);
        let layout = small_layout(&graph, surface);

        let rendered = Svg::new(surface)
            .render_layout(&graph, &layout)
            .unwrap()
            .to_string();

        assert!(rendered.contains("<path"));
        assert!(rendered.contains("<text"));
    }

    #[test]
    fn test_missing_position_is_a_render_error() {
        let mut graph = Graph::new();
        graph.add_node("A", NodeStyle::default()).unwrap();

        // Hand the renderer a layout computed for a different graph
        let empty_layout = small_layout(&Graph::new(), Size::new(100.0, 100.0));

        let result = Svg::new(Size::new(100.0, 100.0)).render_layout(&graph, &empty_layout);
        assert!(matches!(result, Err(export::Error::Render(_))));
    }
}
