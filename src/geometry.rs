//! Plain 2D value types shared by the layout engine and the render adapter.

/// A 2D point or vector with floating-point coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Calculates the Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Clamps the point into the rectangle spanning the origin and `size`
    pub fn clamp_to(self, size: Size) -> Self {
        Self {
            x: self.x.clamp(0.0, size.width()),
            y: self.y.clamp(0.0, size.height()),
        }
    }

    /// Returns true if either coordinate is NaN or infinite
    pub fn is_degenerate(self) -> bool {
        !self.x.is_finite() || !self.y.is_finite()
    }
}

/// Represents the dimensions of a drawing surface with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);

        assert_eq!(p1.add_point(p2), Point::new(4.0, 6.0));
        assert_eq!(p2.sub_point(p1), Point::new(2.0, 2.0));
        assert_eq!(p1.scale(2.0), Point::new(2.0, 4.0));
    }

    #[test]
    fn test_point_distance() {
        let origin = Point::default();
        assert!(origin.is_zero());

        let p = Point::new(3.0, 4.0);
        assert!(approx_eq!(f32, p.hypot(), 5.0));
        assert!(approx_eq!(f32, origin.distance_to(p), 5.0));
    }

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(4.0, 6.0));
        assert_eq!(mid, Point::new(2.0, 3.0));
    }

    #[test]
    fn test_point_clamp_to_surface() {
        let surface = Size::new(100.0, 50.0);

        assert_eq!(
            Point::new(-10.0, 25.0).clamp_to(surface),
            Point::new(0.0, 25.0)
        );
        assert_eq!(
            Point::new(150.0, 75.0).clamp_to(surface),
            Point::new(100.0, 50.0)
        );
        assert_eq!(
            Point::new(40.0, 20.0).clamp_to(surface),
            Point::new(40.0, 20.0)
        );
    }

    #[test]
    fn test_point_degenerate() {
        assert!(!Point::new(1.0, 2.0).is_degenerate());
        assert!(Point::new(f32::NAN, 0.0).is_degenerate());
        assert!(Point::new(0.0, f32::INFINITY).is_degenerate());
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(800.0, 600.0).is_positive());
        assert!(!Size::new(0.0, 600.0).is_positive());
        assert!(!Size::new(800.0, -1.0).is_positive());
        assert!(!Size::new(f32::NAN, 600.0).is_positive());
        assert!(!Size::default().is_positive());
    }
}
