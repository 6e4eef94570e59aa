//! Validated style descriptors for nodes and edges.
//!
//! Styles replace the loosely-typed attribute bags a host would otherwise
//! pass alongside graph elements: every color and dimension is checked when
//! the style is constructed, so the render adapter never sees bad input.

use thiserror::Error;

use crate::color::Color;

/// Errors raised while constructing a style descriptor.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("{0}")]
    InvalidColor(String),

    #[error("label font size must be positive, got {0}")]
    InvalidFontSize(f32),

    #[error("node radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("stroke width must be positive, got {0}")]
    InvalidStrokeWidth(f32),

    #[error("edge weight must be finite, got {0}")]
    InvalidWeight(f32),
}

/// Visual description of a node: a filled, stroked disc.
#[derive(Debug, Clone)]
pub struct NodeStyle {
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    radius: f32,
}

impl NodeStyle {
    /// Creates a node style from CSS color strings, keeping the default
    /// radius and stroke width.
    pub fn new(fill: &str, stroke: &str) -> Result<Self, StyleError> {
        Ok(Self {
            fill: Color::new(fill).map_err(StyleError::InvalidColor)?,
            stroke: Color::new(stroke).map_err(StyleError::InvalidColor)?,
            ..Self::default()
        })
    }

    /// Sets the disc radius.
    pub fn with_radius(mut self, radius: f32) -> Result<Self, StyleError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(StyleError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Sets the stroke width of the disc outline.
    pub fn with_stroke_width(mut self, width: f32) -> Result<Self, StyleError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(StyleError::InvalidStrokeWidth(width));
        }
        self.stroke_width = width;
        Ok(self)
    }

    /// Returns the fill color of the disc
    pub fn fill(&self) -> &Color {
        &self.fill
    }

    /// Returns the stroke color of the disc outline
    pub fn stroke(&self) -> &Color {
        &self.stroke
    }

    /// Returns the stroke width of the disc outline
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Returns the disc radius
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill: Color::new("#8b8d8b").unwrap(),
            stroke: Color::default(),
            stroke_width: 0.4,
            radius: 11.0,
        }
    }
}

/// Description of an edge: stroke color, label fill color, a numeric weight,
/// and an optional display label with its font size.
///
/// The weight is carried as data for host-side queries; the layout engine
/// treats every edge as an equal spring regardless of it.
#[derive(Debug, Clone)]
pub struct EdgeStyle {
    fill: Color,
    stroke: Color,
    weight: f32,
    label: Option<String>,
    label_font_size: f32,
}

impl EdgeStyle {
    /// Creates an edge style from CSS color strings with no label.
    pub fn new(fill: &str, stroke: &str) -> Result<Self, StyleError> {
        Ok(Self {
            fill: Color::new(fill).map_err(StyleError::InvalidColor)?,
            stroke: Color::new(stroke).map_err(StyleError::InvalidColor)?,
            ..Self::default()
        })
    }

    /// Sets the numeric edge weight.
    pub fn with_weight(mut self, weight: f32) -> Result<Self, StyleError> {
        if !weight.is_finite() {
            return Err(StyleError::InvalidWeight(weight));
        }
        self.weight = weight;
        Ok(self)
    }

    /// Sets the display label drawn at the edge midpoint.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the font size used for the edge label.
    pub fn with_label_font_size(mut self, size: f32) -> Result<Self, StyleError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(StyleError::InvalidFontSize(size));
        }
        self.label_font_size = size;
        Ok(self)
    }

    /// Returns the fill color used for the edge label text
    pub fn fill(&self) -> &Color {
        &self.fill
    }

    /// Returns the stroke color of the edge line
    pub fn stroke(&self) -> &Color {
        &self.stroke
    }

    /// Returns the numeric edge weight
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the display label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the font size used for the edge label
    pub fn label_font_size(&self) -> f32 {
        self.label_font_size
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            fill: Color::new("#bebebe").unwrap(),
            stroke: Color::new("#646464").unwrap(),
            weight: 1.0,
            label: None,
            label_font_size: 15.0,
        }
    }
}
