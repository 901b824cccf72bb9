//! Axis-aligned hit rectangles.
//!
//! Fighters expose a full-body [`Hitbox`] at all times and an attack hitbox
//! while a punch or kick is out. The resolver only ever asks one question of
//! them: do two rectangles overlap?

/// Axis-aligned rectangle in arena coordinates (Y+ is down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns (min, max) corners. Negative sizes are normalized.
    pub fn aabb(&self) -> ((f32, f32), (f32, f32)) {
        let x1 = self.x + self.width;
        let y1 = self.y + self.height;
        (
            (self.x.min(x1), self.y.min(y1)),
            (self.x.max(x1), self.y.max(y1)),
        )
    }

    /// Strict AABB overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (min_a, max_a) = self.aabb();
        let (min_b, max_b) = other.aabb();
        min_a.0 < max_b.0 && max_a.0 > min_b.0 && min_a.1 < max_b.1 && max_a.1 > min_b.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_separated_vertically() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(0.0, 20.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let a = Hitbox::new(10.0, 10.0, -10.0, -10.0);
        let ((x0, y0), (x1, y1)) = a.aabb();
        assert_eq!((x0, y0, x1, y1), (0.0, 0.0, 10.0, 10.0));
        assert!(a.overlaps(&Hitbox::new(5.0, 5.0, 1.0, 1.0)));
    }
}
