//! Axis-aligned rectangles produced by the solvers.

/// Axis-aligned bounding box in frame-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds at the origin with the given size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
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

    /// Compute intersection with another bounds.
    pub fn intersect(&self, other: &Bounds) -> Option<Bounds> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 < x2 && y1 < y2 {
            Some(Bounds::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Clip a list of bands to a frame, dropping the ones entirely outside.
    pub fn clip_all(bands: &[Bounds], frame: &Bounds) -> Vec<Bounds> {
        bands.iter().filter_map(|band| band.intersect(frame)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_contains() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.bottom(), 60.0);
        assert!(b.contains(10.0, 20.0));
        assert!(b.contains(40.0, 60.0));
        assert!(!b.contains(41.0, 30.0));
    }

    #[test]
    fn test_intersect() {
        let a = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let b = Bounds::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersect(&b), Some(Bounds::new(50.0, 50.0, 50.0, 50.0)));

        let far = Bounds::new(200.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(&far), None);
    }

    #[test]
    fn test_clip_all_drops_outside_bands() {
        let frame = Bounds::from_size(100.0, 50.0);
        let bands = vec![
            Bounds::new(10.0, 0.0, 40.0, 50.0),
            Bounds::new(80.0, 0.0, 40.0, 50.0),
            Bounds::new(150.0, 0.0, 40.0, 50.0),
        ];
        let clipped = Bounds::clip_all(&bands, &frame);
        assert_eq!(clipped.len(), 2);
        assert_eq!(clipped[1].width, 20.0);
    }
}
