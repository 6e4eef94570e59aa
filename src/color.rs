use color::DynamicColor;
use std::str::FromStr;

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Accepts any CSS color syntax ("#8b8d8b", "rgb(100, 100, 100)", "black", ...)
/// and renders back out as a CSS color string for SVG attributes.
#[derive(Clone, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parse a CSS color string.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Returns a token derived from this color that is safe to embed in an
    /// SVG element id (used to key arrowhead markers per stroke color).
    pub fn id_token(&self) -> String {
        let mut token: String = self
            .to_string()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        // SVG ids must start with a letter
        if token.chars().next().is_some_and(|c| !c.is_ascii_alphabetic()) {
            token.insert_str(0, "c_");
        }

        token
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").unwrap()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}
