//! Rect - Rectangle regions of the pixel domain
//!
//! Right and bottom edges are exclusive, so a `Rect` with `w == 0` or
//! `h == 0` covers no coordinates.

/// A rectangle region of the non-negative coordinate domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: u32,
    /// Top y coordinate
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Create a rect from its top-left corner and size
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rect from its left/top and exclusive right/bottom edges
    ///
    /// Edges given in reverse order produce an empty rect.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            x: left,
            y: top,
            w: right.saturating_sub(left),
            h: bottom.saturating_sub(top),
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Check if the rect is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Iterate over the coordinates of the rect in row-major order
    pub fn points(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Rect { x, y, w, h } = *self;
        (y..y + h).flat_map(move |py| (x..x + w).map(move |px| (px, py)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_creation() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.area(), 5000);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_rect_from_edges() {
        let r = Rect::from_edges(2, 3, 7, 5);
        assert_eq!(r, Rect::new(2, 3, 5, 2));
        assert!(Rect::from_edges(7, 0, 2, 4).is_empty());
    }

    #[test]
    fn test_rect_points_row_major() {
        let pts: Vec<_> = Rect::new(1, 2, 2, 2).points().collect();
        assert_eq!(pts, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
        assert_eq!(Rect::new(0, 0, 0, 5).points().count(), 0);
    }
}
