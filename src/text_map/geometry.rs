/// A point in page coordinate space (points, origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in page coordinate space
///
/// `x0 <= x1` and `y0 <= y1`; `y0` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PageRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn center_y(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &PageRect) -> PageRect {
        PageRect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Inclusive on all four edges
    pub fn contains(&self, point: PagePoint) -> bool {
        self.x0 <= point.x && point.x <= self.x1 && self.y0 <= point.y && point.y <= self.y1
    }

    /// True when top and bottom edges both differ by less than `tolerance`
    pub fn vertically_aligned(&self, other: &PageRect, tolerance: f64) -> bool {
        (self.y0 - other.y0).abs() < tolerance && (self.y1 - other.y1).abs() < tolerance
    }

    /// Grow by `amount` on every side
    pub fn padded(&self, amount: f64) -> PageRect {
        PageRect {
            x0: self.x0 - amount,
            y0: self.y0 - amount,
            x1: self.x1 + amount,
            y1: self.y1 + amount,
        }
    }

    pub fn scaled(&self, factor: f64) -> PageRect {
        PageRect {
            x0: self.x0 * factor,
            y0: self.y0 * factor,
            x1: self.x1 * factor,
            y1: self.y1 * factor,
        }
    }
}

/// Bounding box of a set of rectangles, `None` when empty
pub fn bounding_box<'a>(rects: impl IntoIterator<Item = &'a PageRect>) -> Option<PageRect> {
    rects
        .into_iter()
        .copied()
        .reduce(|acc, rect| acc.union(&rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_covers_both() {
        let a = PageRect::new(10.0, 20.0, 30.0, 40.0);
        let b = PageRect::new(5.0, 25.0, 50.0, 35.0);
        assert_eq!(a.union(&b), PageRect::new(5.0, 20.0, 50.0, 40.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = PageRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(PagePoint::new(0.0, 0.0)));
        assert!(r.contains(PagePoint::new(10.0, 10.0)));
        assert!(r.contains(PagePoint::new(10.0, 0.0)));
        assert!(!r.contains(PagePoint::new(10.01, 5.0)));
        assert!(!r.contains(PagePoint::new(5.0, -0.01)));
    }

    #[test]
    fn test_vertically_aligned() {
        let a = PageRect::new(0.0, 100.0, 10.0, 112.0);
        assert!(a.vertically_aligned(&PageRect::new(20.0, 104.9, 30.0, 108.0), 5.0));
        assert!(!a.vertically_aligned(&PageRect::new(20.0, 105.0, 30.0, 112.0), 5.0));
        assert!(!a.vertically_aligned(&PageRect::new(20.0, 100.0, 30.0, 120.0), 5.0));
    }

    #[test]
    fn test_padded_and_scaled() {
        let r = PageRect::new(10.0, 10.0, 20.0, 30.0);
        assert_eq!(r.padded(2.0), PageRect::new(8.0, 8.0, 22.0, 32.0));
        assert_eq!(r.scaled(2.0), PageRect::new(20.0, 20.0, 40.0, 60.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 20.0);
    }

    #[test]
    fn test_bounding_box() {
        assert_eq!(bounding_box(&Vec::<PageRect>::new()), None);
        let rects = [
            PageRect::new(50.0, 10.0, 60.0, 20.0),
            PageRect::new(0.0, 30.0, 20.0, 40.0),
        ];
        assert_eq!(
            bounding_box(&rects),
            Some(PageRect::new(0.0, 10.0, 60.0, 40.0))
        );
    }
}
