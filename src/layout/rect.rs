//! Rect: An axis-aligned rectangle with exclusive right/bottom edges.

/// A rectangle given by its edges. `right` and `bottom` are exclusive.
///
/// Used both in cell units (while accumulating changed cells) and in pixel
/// units (the dirty rectangle handed to a presenter).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: u32,
    /// Top edge (inclusive).
    pub top: u32,
    /// Right edge (exclusive).
    pub right: u32,
    /// Bottom edge (exclusive).
    pub bottom: u32,
}

impl Rect {
    /// Create a new rectangle from its edges.
    #[inline]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Zero-sized rectangle.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Height (0 for an empty or inverted rectangle).
    #[inline]
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Smallest rectangle covering both. An empty side is ignored.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Grow to include the unit square at (x, y).
    #[inline]
    pub fn include(&mut self, x: u32, y: u32) {
        *self = self.union(&Self::from_origin(x, y, 1, 1));
    }

    /// Scale every edge, e.g. from cell to pixel units.
    #[inline]
    #[must_use]
    pub const fn scale(&self, sx: u32, sy: u32) -> Self {
        Self::new(
            self.left.saturating_mul(sx),
            self.top.saturating_mul(sy),
            self.right.saturating_mul(sx),
            self.bottom.saturating_mul(sy),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {} .. {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::new(5, 5, 5, 9).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_include_builds_bounding_box() {
        let mut rect = Rect::EMPTY;
        rect.include(3, 4);
        assert_eq!(rect, Rect::new(3, 4, 4, 5));
        rect.include(1, 6);
        assert_eq!(rect, Rect::new(1, 4, 4, 7));
    }

    #[test]
    fn test_union_ignores_empty() {
        let a = Rect::new(2, 2, 4, 4);
        assert_eq!(a.union(&Rect::EMPTY), a);
        assert_eq!(Rect::EMPTY.union(&a), a);
        assert_eq!(a.union(&Rect::new(0, 3, 1, 10)), Rect::new(0, 2, 4, 10));
    }

    #[test]
    fn test_scale_to_pixels() {
        assert_eq!(Rect::new(1, 1, 2, 2).scale(9, 16), Rect::new(9, 16, 18, 32));
    }

    #[test]
    fn test_height() {
        assert_eq!(Rect::from_origin(10, 10, 5, 7).height(), 7);
        assert_eq!(Rect::new(0, 9, 4, 3).height(), 0);
    }
}
