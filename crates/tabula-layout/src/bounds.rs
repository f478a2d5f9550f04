//! Rectangles and sizes in canvas pixels.

use glam::DVec2;

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero or negative.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Position of the top-left corner
    pub x: f64,
    pub y: f64,
    /// Size of the box
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create bounds from position and size vectors.
    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Whether the interiors of two bounds overlap. Shared edges do not count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Expand bounds by a uniform amount.
    pub fn expand(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Inset bounds by a uniform amount.
    pub fn inset(&self, amount: f64) -> Bounds {
        self.expand(-amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_shrinks_both_axes() {
        let inner = Bounds::new(10.0, 10.0, 100.0, 40.0).inset(8.0);
        assert_eq!(inner, Bounds::new(18.0, 18.0, 84.0, 24.0));
    }

    #[test]
    fn test_adjacent_bounds_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 50.0, 30.0);
        let b = Bounds::new(50.0, 0.0, 20.0, 30.0);
        let c = Bounds::new(49.0, 29.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_degenerate_size() {
        assert!(Size::new(0.0, 10.0).is_degenerate());
        assert!(!Size::new(1.0, 1.0).is_degenerate());
    }
}
