use faer::prelude::SpSolver;

use super::{pose_from_homography, HalfExtents, PoseSolver, SolveError, SolverParams};
use crate::point::Point2;
use crate::pose::Pose;

/// Closed-form solver over the four corners.
///
/// With the image `x` axis mirrored, each corner `(X, Y)` seen at `(u, v)` contributes
///
/// ```text
/// [X, Y, 1, 0, 0, 0, -X·u, -Y·u] · s = u
/// [0, 0, 0, X, Y, 1, -X·v, -Y·v] · s = v
/// ```
///
/// and the eight unknowns `s` are the homography entries with `h22 = 1`.
pub struct RectangleSolver;

impl PoseSolver for RectangleSolver {
    type Param = SolverParams;

    fn solve(
        picks: &[Point2; 4],
        extents: &HalfExtents,
        params: &Self::Param,
    ) -> Result<Pose, SolveError> {
        let corners = extents.plane_corners();
        let image: Vec<Point2> = picks.iter().map(Point2::mirrored_x).collect();

        // construct the 8x8 system and its right-hand side
        let mut system = faer::Mat::<f64>::zeros(8, 8);
        let mut rhs = faer::Mat::<f64>::zeros(8, 1);
        for (i, ([x, y], p)) in corners.iter().zip(image.iter()).enumerate() {
            system.write(i, 0, *x);
            system.write(i, 1, *y);
            system.write(i, 2, 1.0);
            system.write(i, 6, -x * p.x);
            system.write(i, 7, -y * p.x);

            system.write(i + 4, 3, *x);
            system.write(i + 4, 4, *y);
            system.write(i + 4, 5, 1.0);
            system.write(i + 4, 6, -x * p.y);
            system.write(i + 4, 7, -y * p.y);

            rhs.write(i, 0, p.x);
            rhs.write(i + 4, 0, p.y);
        }

        let min_singular_value = system
            .singular_values()
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        if min_singular_value < params.rank_eps {
            log::debug!("rectangle system rejected, smallest singular value {min_singular_value:e}");
            return Err(SolveError::RankDeficient {
                min_singular_value,
                tolerance: params.rank_eps,
            });
        }

        let sol = system.partial_piv_lu().solve(rhs.as_ref());
        let s = |i: usize| sol.read(i, 0);

        let h = [[s(0), s(1), s(2)], [s(3), s(4), s(5)], [s(6), s(7), 1.0]];
        pose_from_homography(&h)
    }
}
