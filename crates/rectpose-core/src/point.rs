use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A point in the plane, possibly at infinity.
///
/// A point at infinity (`finite == false`) stores the direction shared by two parallel
/// lines in `x` and `y`. Equality and hashing only look at the coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// `false` when the point lies at infinity.
    #[serde(default = "finite_default")]
    pub finite: bool,
}

fn finite_default() -> bool {
    true
}

impl Point2 {
    /// Create a finite point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, finite: true }
    }

    /// Create a point at infinity along the direction `(dx, dy)`.
    pub const fn at_infinity(dx: f64, dy: f64) -> Self {
        Self {
            x: dx,
            y: dy,
            finite: false,
        }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: &Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point2) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Vector from `self` to `other`.
    pub fn to(&self, other: &Point2) -> Point2 {
        Point2::new(other.x - self.x, other.y - self.y)
    }

    /// z-component of the cross product of two plane vectors.
    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The point with its x coordinate negated.
    pub fn mirrored_x(&self) -> Point2 {
        Point2 {
            x: -self.x,
            ..*self
        }
    }

    /// Coordinates as an array.
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(p: [f64; 2]) -> Self {
        Point2::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

impl PartialEq for Point2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Hash for Point2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // adding zero folds -0.0 into 0.0 so equal points hash equally
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(p: &Point2) -> u64 {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_ignores_finite_flag() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::at_infinity(1.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Point2::new(1.0, 2.5));
    }

    #[test]
    fn test_signed_zero_hash() {
        assert_eq!(hash_of(&Point2::new(0.0, -0.0)), hash_of(&Point2::new(-0.0, 0.0)));
    }

    #[test]
    fn test_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_cross_and_mirror() {
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        assert_eq!(a.cross(&b), 1.0);
        assert_eq!(b.cross(&a), -1.0);
        let m = Point2::at_infinity(2.0, 3.0).mirrored_x();
        assert_eq!(m.x, -2.0);
        assert!(!m.finite);
    }

    #[test]
    fn test_deserialize_defaults_to_finite() -> Result<(), Box<dyn std::error::Error>> {
        let p: Point2 = serde_json::from_str(r#"{"x": 1.5, "y": -2.0}"#)?;
        assert!(p.finite);
        assert_eq!(p, Point2::new(1.5, -2.0));
        Ok(())
    }
}
