use crate::point::Point2;
use crate::solver::SolveError;

/// Below this magnitude two lines are treated as parallel.
const PARALLEL_EPS: f64 = 1e-5;

/// A line `a·x + b·y + c = 0`.
///
/// Coefficients are sign-normalized so that `a > 0`, or `a == 0` and `b >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    /// Coefficient of `x`.
    pub a: f64,
    /// Coefficient of `y`.
    pub b: f64,
    /// Constant term.
    pub c: f64,
}

impl Line2 {
    /// Line through two points.
    ///
    /// Either point may be at infinity, in which case it contributes its direction. A
    /// line cannot pass through two points at infinity.
    pub fn through(p1: &Point2, p2: &Point2) -> Result<Self, SolveError> {
        match (p1.finite, p2.finite) {
            (true, true) => Ok(Self::through_coords(p1.x, p1.y, p2.x, p2.y)),
            (false, false) => Err(SolveError::InfiniteLine),
            (true, false) => Ok(Self::along(p1, p2)),
            (false, true) => Ok(Self::along(p2, p1)),
        }
    }

    /// Line through two finite points given by their coordinates.
    pub fn through_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let a = y1 - y2;
        let b = x2 - x1;
        let c = -(a * x1 + b * y1);
        Self { a, b, c }.sign_normalized()
    }

    fn along(origin: &Point2, direction: &Point2) -> Self {
        let a = direction.y;
        let b = -direction.x;
        let c = -(a * origin.x + b * origin.y);
        Self { a, b, c }.sign_normalized()
    }

    fn sign_normalized(self) -> Self {
        if self.a < 0.0 || (self.a == 0.0 && self.b < 0.0) {
            Self {
                a: -self.a,
                b: -self.b,
                c: -self.c,
            }
        } else {
            self
        }
    }

    /// Intersection with another line.
    ///
    /// Parallel lines meet at infinity: the result is then a non-finite point holding
    /// the common direction.
    pub fn intersect(&self, other: &Line2) -> Point2 {
        let denominator = self.b * other.a - self.a * other.b;
        let num_x = self.c * other.b - self.b * other.c;
        let num_y = self.a * other.c - self.c * other.a;
        if denominator.abs() < PARALLEL_EPS {
            return Point2::at_infinity(num_x, num_y);
        }
        Point2::new(num_x / denominator, num_y / denominator)
    }

    /// Signed residual `a·x + b·y + c` of a finite point.
    pub fn residual(&self, p: &Point2) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }
}
