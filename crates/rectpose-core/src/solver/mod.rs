//! Pose recovery from the four pictured corners of a rectangle.

use faer::prelude::SpSolver;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::point::Point2;
use crate::pose::Pose;
use crate::rotation::RotationMatrix;

mod nine_point;
mod rectangle;

pub use nine_point::NinePointSolver;
pub use rectangle::RectangleSolver;

/// Error types for the pose solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    /// The linear system has no unique solution.
    #[error("linear system is rank deficient: smallest singular value {min_singular_value:e} < {tolerance:e}")]
    RankDeficient {
        /// Smallest singular value found in the system.
        min_singular_value: f64,
        /// Threshold below which the system is rejected.
        tolerance: f64,
    },

    /// The solved rotation columns collapsed to zero or NaN.
    #[error("solved rotation is degenerate")]
    DegenerateRotation,

    /// A line was requested through two points at infinity.
    #[error("cannot build a line through two points at infinity")]
    InfiniteLine,

    /// Too few finite points were available for the solver.
    #[error("solver requires at least {required} finite points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of finite points required by the solver.
        required: usize,
        /// Actual number of finite points available.
        actual: usize,
    },
}

/// Numeric tolerances shared by the solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Smallest singular value accepted before a system is considered rank deficient.
    pub rank_eps: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self { rank_eps: 1e-4 }
    }
}

/// Half side lengths of the rectangle centered at the world origin on `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfExtents {
    /// Half extent along world `x`.
    pub a: f64,
    /// Half extent along world `y`.
    pub b: f64,
}

impl HalfExtents {
    /// Create the half extents of a rectangle.
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Half extents of a rectangle with the given full side lengths.
    pub fn from_side_lengths(width: f64, height: f64) -> Self {
        Self::new(width / 2.0, height / 2.0)
    }

    /// Corners in picking order: `(-a,-b)`, `(a,-b)`, `(-a,b)`, `(a,b)`, all at `z = 0`.
    pub fn corners(&self) -> [[f64; 3]; 4] {
        let (a, b) = (self.a, self.b);
        [[-a, -b, 0.0], [a, -b, 0.0], [-a, b, 0.0], [a, b, 0.0]]
    }

    /// The corners as plane points, in picking order.
    pub fn plane_corners(&self) -> [[f64; 2]; 4] {
        let (a, b) = (self.a, self.b);
        [[-a, -b], [a, -b], [-a, b], [a, b]]
    }
}

/// Trait for single-shot pose solvers.
pub trait PoseSolver {
    /// Solver-specific parameters.
    type Param;

    /// Recover the camera pose from four picked corners.
    ///
    /// # Arguments
    /// * `picks` – Corners on the projective plane, in picking order.
    /// * `extents` – Half extents of the pictured rectangle.
    /// * `params` – Solver-specific parameters.
    fn solve(
        picks: &[Point2; 4],
        extents: &HalfExtents,
        params: &Self::Param,
    ) -> Result<Pose, SolveError>;
}

/// Enumeration of the available pose solvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseMethod {
    /// Closed-form solve of the 8x8 system built from the four corners.
    #[default]
    Rectangle,
    /// Homogeneous fit over corners, center and edge midpoints.
    NinePoint,
}

/// Dispatch function that routes to the chosen solver with default parameters.
pub fn solve_pose(
    picks: &[Point2; 4],
    extents: &HalfExtents,
    method: PoseMethod,
) -> Result<Pose, SolveError> {
    solve_pose_with_params(picks, extents, method, &SolverParams::default())
}

/// Dispatch function that routes to the chosen solver.
pub fn solve_pose_with_params(
    picks: &[Point2; 4],
    extents: &HalfExtents,
    method: PoseMethod,
    params: &SolverParams,
) -> Result<Pose, SolveError> {
    match method {
        PoseMethod::Rectangle => RectangleSolver::solve(picks, extents, params),
        PoseMethod::NinePoint => NinePointSolver::solve(picks, extents, params),
    }
}

/// Recover a pose from a plane-to-image homography, given up to scale.
///
/// `h` maps world `(X, Y, 1)` onto image points whose `x` axis is mirrored, so that its
/// first two columns are the first two rotation columns and its last column is `-R·C`.
/// The scale is fixed by the unit length of column 0 and its sign by a positive `R[1][1]`.
pub(crate) fn pose_from_homography(h: &[[f64; 3]; 3]) -> Result<Pose, SolveError> {
    let norm = DVec3::new(h[0][0], h[1][0], h[2][0]).length();
    if norm.is_nan() || norm == 0.0 {
        return Err(SolveError::DegenerateRotation);
    }

    let mut scale = 1.0 / norm;
    if h[1][1] * scale < 0.0 {
        scale = -scale;
    }

    let c0 = [scale * h[0][0], scale * h[1][0], scale * h[2][0]];
    let c1 = [scale * h[0][1], scale * h[1][1], scale * h[2][1]];
    let rotation = RotationMatrix::from_columns(c0, c1).ok_or(SolveError::DegenerateRotation)?;

    // R · C = -scale · (h02, h12, h22)
    let rc = [-scale * h[0][2], -scale * h[1][2], -scale * h[2][2]];
    let mat_r = faer::Mat::<f64>::from_fn(3, 3, |i, j| rotation.get(i, j));
    let col_rc = faer::Mat::<f64>::from_fn(3, 1, |i, _| rc[i]);
    let c = mat_r.partial_piv_lu().solve(col_rc.as_ref());
    let position = [c.read(0, 0), c.read(1, 0), c.read(2, 0)];

    Ok(Pose::new(position, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::project_points;
    use approx::assert_relative_eq;

    fn picks_of(pose: &Pose, extents: &HalfExtents) -> [Point2; 4] {
        let p = project_points(&extents.corners(), pose);
        [p[0], p[1], p[2], p[3]]
    }

    #[test]
    fn test_corners_order() {
        let e = HalfExtents::from_side_lengths(4.0, 2.0);
        assert_eq!(e, HalfExtents::new(2.0, 1.0));
        assert_eq!(
            e.corners(),
            [
                [-2.0, -1.0, 0.0],
                [2.0, -1.0, 0.0],
                [-2.0, 1.0, 0.0],
                [2.0, 1.0, 0.0]
            ]
        );
        assert_eq!(e.plane_corners()[3], [2.0, 1.0]);
    }

    #[test]
    fn test_solve_pose_both_methods_agree() -> Result<(), SolveError> {
        let extents = HalfExtents::new(1.0, 0.5);
        let truth = Pose::from_euler([0.3, -0.2, -5.0], 10.0, 20.0, 0.0);
        let picks = picks_of(&truth, &extents);

        let rect = solve_pose(&picks, &extents, PoseMethod::Rectangle)?;
        let nine = solve_pose(&picks, &extents, PoseMethod::NinePoint)?;

        for p in [rect, nine] {
            let d = truth.distances(&p);
            assert!(d.position < 1e-9, "position error {}", d.position);
            assert!(d.rotation < 1e-9, "rotation error {}", d.rotation);
            assert!(d.angles < 1e-6, "angle error {}", d.angles);
        }
        Ok(())
    }

    #[test]
    fn test_pose_from_homography_scale_invariant() -> Result<(), SolveError> {
        // identity camera at z = -2: h = [c0 c1 -R·C] = [[1,0,0],[0,1,0],[0,0,2]]
        let h = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]];
        let scaled = h.map(|row| row.map(|v| -3.5 * v));
        for m in [h, scaled] {
            let pose = pose_from_homography(&m)?;
            let c = pose.position();
            assert_relative_eq!(c[0], 0.0);
            assert_relative_eq!(c[1], 0.0);
            assert_relative_eq!(c[2], -2.0, epsilon = 1e-12);
            assert_relative_eq!(pose.rotation().get(1, 1), 1.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_pose_from_homography_degenerate() {
        let h = [[0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(pose_from_homography(&h), Err(SolveError::DegenerateRotation));
        let nan = [[f64::NAN; 3]; 3];
        assert_eq!(pose_from_homography(&nan), Err(SolveError::DegenerateRotation));
    }

    #[test]
    fn test_method_serde_tokens() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&PoseMethod::NinePoint)?, "\"nine_point\"");
        let m: PoseMethod = serde_json::from_str("\"rectangle\"")?;
        assert_eq!(m, PoseMethod::Rectangle);
        let p: SolverParams = serde_json::from_str("{}")?;
        assert_eq!(p, SolverParams::default());
        Ok(())
    }
}
