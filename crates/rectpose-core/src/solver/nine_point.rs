use super::{pose_from_homography, HalfExtents, PoseSolver, SolveError, SolverParams};
use crate::line::Line2;
use crate::point::Point2;
use crate::pose::Pose;

/// Homogeneous solver over nine plane points.
///
/// Besides the four corners, the rectangle center and the four edge midpoints are
/// located in the image by line intersections: the center from the diagonals, the
/// midlines from the center and the two vanishing points. Every finite point adds two
/// rows to a homogeneous 9-column system whose null vector is the homography.
pub struct NinePointSolver;

/// Minimum number of finite points for a homography.
const MIN_POINTS: usize = 4;

impl NinePointSolver {
    /// Locate the nine plane points in the (mirrored) image.
    ///
    /// Returns `(world, image)` pairs: corners, center, then the midpoints of the
    /// `x = -a`, `x = a`, `y = -b` and `y = b` edges. Image points may be at infinity.
    pub fn correspondences(
        picks: &[Point2; 4],
        extents: &HalfExtents,
    ) -> Result<[([f64; 2], Point2); 9], SolveError> {
        let [p0, p1, p2, p3] = picks.map(|p| p.mirrored_x());
        let (a, b) = (extents.a, extents.b);

        let side_01 = Line2::through(&p0, &p1)?;
        let side_23 = Line2::through(&p2, &p3)?;
        let side_02 = Line2::through(&p0, &p2)?;
        let side_13 = Line2::through(&p1, &p3)?;

        let center = Line2::through(&p0, &p3)?.intersect(&Line2::through(&p1, &p2)?);
        let vanish_x = side_01.intersect(&side_23);
        let vanish_y = side_02.intersect(&side_13);

        let midline_x = Line2::through(&center, &vanish_x)?;
        let midline_y = Line2::through(&center, &vanish_y)?;

        Ok([
            ([-a, -b], p0),
            ([a, -b], p1),
            ([-a, b], p2),
            ([a, b], p3),
            ([0.0, 0.0], center),
            ([-a, 0.0], midline_x.intersect(&side_02)),
            ([a, 0.0], midline_x.intersect(&side_13)),
            ([0.0, -b], midline_y.intersect(&side_01)),
            ([0.0, b], midline_y.intersect(&side_23)),
        ])
    }
}

impl PoseSolver for NinePointSolver {
    type Param = SolverParams;

    fn solve(
        picks: &[Point2; 4],
        extents: &HalfExtents,
        params: &Self::Param,
    ) -> Result<Pose, SolveError> {
        let pairs = Self::correspondences(picks, extents)?;
        let finite: Vec<&([f64; 2], Point2)> = pairs.iter().filter(|(_, p)| p.finite).collect();
        if finite.len() < MIN_POINTS {
            return Err(SolveError::InsufficientPoints {
                required: MIN_POINTS,
                actual: finite.len(),
            });
        }

        let mut mat_a = faer::Mat::<f64>::zeros(2 * finite.len(), 9);
        for (i, ([x, y], p)) in finite.iter().map(|pair| (&pair.0, &pair.1)).enumerate() {
            let (u, v) = (p.x, p.y);
            mat_a.write(2 * i, 0, *x);
            mat_a.write(2 * i, 1, *y);
            mat_a.write(2 * i, 2, 1.0);
            mat_a.write(2 * i, 6, -u * x);
            mat_a.write(2 * i, 7, -u * y);
            mat_a.write(2 * i, 8, -u);

            mat_a.write(2 * i + 1, 3, *x);
            mat_a.write(2 * i + 1, 4, *y);
            mat_a.write(2 * i + 1, 5, 1.0);
            mat_a.write(2 * i + 1, 6, -v * x);
            mat_a.write(2 * i + 1, 7, -v * y);
            mat_a.write(2 * i + 1, 8, -v);
        }

        // the homography spans a one dimensional null space, so the eighth largest
        // singular value must stay clear of zero
        let svd = mat_a.svd();
        let s = svd.s_diagonal();
        let mut singular: Vec<f64> = (0..s.nrows()).map(|i| s.read(i)).collect();
        singular.sort_by(|l, r| r.total_cmp(l));
        let eighth = singular.get(7).copied().unwrap_or(0.0);
        if eighth < params.rank_eps {
            log::debug!("nine point system rejected, eighth singular value {eighth:e}");
            return Err(SolveError::RankDeficient {
                min_singular_value: eighth,
                tolerance: params.rank_eps,
            });
        }

        // right singular vector of the smallest singular value
        let v = svd.v();
        let h = |i: usize| v.read(i, 8);
        let homography = [[h(0), h(1), h(2)], [h(3), h(4), h(5)], [h(6), h(7), h(8)]];
        pose_from_homography(&homography)
    }
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
    fn test_correspondences_hit_projected_midpoints() -> Result<(), SolveError> {
        let extents = HalfExtents::new(2.0, 1.0);
        let pose = Pose::from_euler([0.0, 0.0, -1.0], 290.0, -30.0, 40.0);
        let pairs = NinePointSolver::correspondences(&picks_of(&pose, &extents), &extents)?;

        let world: Vec<[f64; 3]> = pairs.iter().map(|([x, y], _)| [*x, *y, 0.0]).collect();
        let expected = project_points(&world, &pose);
        for ((_, found), truth) in pairs.iter().zip(expected.iter()) {
            assert!(found.finite);
            // correspondences live in the mirrored image
            assert_relative_eq!(found.x, -truth.x, epsilon = 1e-9);
            assert_relative_eq!(found.y, truth.y, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_nine_point_recovers_pose() -> Result<(), SolveError> {
        let extents = HalfExtents::new(1.0, 1.0);
        let truth = Pose::from_euler([1.0, 2.0, -3.0], -170.0, 60.0, -80.0);
        let pose = NinePointSolver::solve(
            &picks_of(&truth, &extents),
            &extents,
            &SolverParams::default(),
        )?;
        let d = truth.distances(&pose);
        assert!(d.position < 1e-8, "position error {}", d.position);
        assert!(d.rotation < 1e-8, "rotation error {}", d.rotation);
        Ok(())
    }

    #[test]
    fn test_nine_point_fronto_parallel() -> Result<(), SolveError> {
        // both vanishing points lie at infinity
        let extents = HalfExtents::new(1.0, 1.0);
        let truth = Pose::from_euler([0.0, 0.0, -3.0], 0.0, 0.0, 0.0);
        let picks = picks_of(&truth, &extents);
        let pairs = NinePointSolver::correspondences(&picks, &extents)?;
        assert!(pairs.iter().all(|(_, p)| p.finite));

        let pose = NinePointSolver::solve(&picks, &extents, &SolverParams::default())?;
        let c = pose.position();
        assert_relative_eq!(c[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(c[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(c[2], -3.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_nine_point_collapsed_picks() {
        let extents = HalfExtents::new(1.0, 1.0);
        let picks = [Point2::new(0.5, 0.5); 4];
        let res = NinePointSolver::solve(&picks, &extents, &SolverParams::default());
        assert!(res.is_err());
    }
}
