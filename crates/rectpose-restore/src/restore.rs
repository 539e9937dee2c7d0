use rectpose_core::{
    solve_pose_with_params, EulerAngles, HalfExtents, Point2, Pose, PoseMethod, SolveError,
    SolverParams,
};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidPicks, RestoreError};
use crate::face::Face;
use crate::normalize::{ImageSize, PixelMapping};
use crate::overlay::project_framed;
use crate::validity::{check_picks, ValidityParams};

/// Everything needed to restore a camera pose from one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreRequest {
    /// Picked corners in pixels, in the order `(-a,-b)`, `(a,-b)`, `(-a,b)`, `(a,b)`.
    pub picks: [Point2; 4],
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Half extents of the pictured rectangle.
    pub extents: HalfExtents,
    /// Face the rectangle lies on.
    #[serde(default)]
    pub face: Face,
    /// Size of the image the picks were taken on.
    pub image: ImageSize,
}

/// Parameters of the restoration pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreParams {
    /// Pick validity thresholds.
    pub validity: ValidityParams,
    /// Solver tolerances.
    pub solver: SolverParams,
    /// Solver used for the pose.
    pub method: PoseMethod,
    /// Largest absolute roll, in degrees, for which a command is produced.
    pub roll_tolerance_deg: f64,
    /// Reprojection error, in pixels, above which a solved pose is reported as bad.
    pub max_reprojection_error_px: f64,
}

impl Default for RestoreParams {
    fn default() -> Self {
        Self {
            validity: ValidityParams::default(),
            solver: SolverParams::default(),
            method: PoseMethod::default(),
            roll_tolerance_deg: 1.0,
            max_reprojection_error_px: 1e-3,
        }
    }
}

/// A successfully solved camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolvedPose {
    /// Pose relative to the rectangle on `z = 0`.
    pub raw: Pose,
    /// Pose re-expressed in the frame of [`SolvedPose::face`].
    pub pose: Pose,
    /// Face the pose was re-expressed on.
    pub face: Face,
    /// Angles of `pose` with the yaw turned by 180 degrees, as used by the command.
    pub heading: EulerAngles,
    /// Largest absolute roll accepted for a command.
    pub roll_tolerance_deg: f64,
    /// Root of the summed squared pixel distances between the picks and the corners
    /// projected back through `pose`.
    pub reprojection_error_px: f64,
}

impl SolvedPose {
    /// Check the roll of the heading against the tolerance.
    pub fn check_roll(&self) -> Result<(), RestoreError> {
        let roll = self.heading.roll;
        // NaN roll is rejected as well
        if roll.abs() <= self.roll_tolerance_deg {
            Ok(())
        } else {
            Err(RestoreError::RollOutOfTolerance {
                roll,
                tolerance: self.roll_tolerance_deg,
            })
        }
    }
}

/// Outcome of [`restore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Restoration {
    /// The picks failed the validity check; nothing was solved.
    Invalid(InvalidPicks),
    /// The picks were valid but the solver found no pose.
    NoSolution {
        /// Always NaN-filled.
        position: [f64; 3],
        /// Why the solver gave up.
        reason: SolveError,
    },
    /// A pose was found.
    Solved(SolvedPose),
}

impl Restoration {
    /// Whether the picks passed the validity check.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Restoration::Invalid(_))
    }

    /// The solved camera, if any.
    pub fn solved(&self) -> Option<&SolvedPose> {
        match self {
            Restoration::Solved(solved) => Some(solved),
            _ => None,
        }
    }

    /// Face-framed camera position; NaN-filled when the solver failed, absent when the
    /// picks were invalid.
    pub fn position(&self) -> Option<[f64; 3]> {
        match self {
            Restoration::Invalid(_) => None,
            Restoration::NoSolution { position, .. } => Some(*position),
            Restoration::Solved(solved) => Some(solved.pose.position()),
        }
    }
}

/// Distance between the picks and the rectangle corners projected through a face-framed
/// pose, in pixels: the root of the summed squared distances over the four corners.
///
/// Exact picks give zero up to rounding. Picks that are not a perspective image of the
/// rectangle leave a residual, since the solved rotation is kept orthonormal.
pub fn reprojection_error(request: &RestoreRequest, pose: &Pose) -> f64 {
    let mapping = PixelMapping::new(request.fov_deg, &request.image);
    let projected = project_framed(&request.extents.corners(), request.face, pose, &mapping);
    projected
        .iter()
        .zip(request.picks.iter())
        .map(|(p, pick)| p.distance_squared(pick))
        .sum::<f64>()
        .sqrt()
}

/// Restore the camera pose for a request.
///
/// Picks are validated, normalized onto the projective plane, solved, then re-expressed
/// in the frame of the requested face. Each call is a pure function of its inputs.
pub fn restore(request: &RestoreRequest, params: &RestoreParams) -> Restoration {
    if let Err(reason) = check_picks(&request.picks, request.fov_deg, &params.validity) {
        log::debug!("picks rejected: {reason}");
        return Restoration::Invalid(reason);
    }

    let mapping = PixelMapping::new(request.fov_deg, &request.image);
    let projective = request.picks.map(|p| mapping.to_projective(&p));

    let raw = match solve_pose_with_params(
        &projective,
        &request.extents,
        params.method,
        &params.solver,
    ) {
        Ok(pose) => pose,
        Err(reason) => {
            log::debug!("no pose for valid picks: {reason}");
            return Restoration::NoSolution {
                position: [f64::NAN; 3],
                reason,
            };
        }
    };

    let pose = raw.reframed(&request.face.frame());
    let heading = pose.angles().with_yaw_offset(180.0);
    let reprojection_error_px = reprojection_error(request, &pose);
    if !(reprojection_error_px <= params.max_reprojection_error_px) {
        log::warn!("bad reprojection: {reprojection_error_px} px");
    }

    let solved = SolvedPose {
        raw,
        pose,
        face: request.face,
        heading,
        roll_tolerance_deg: params.roll_tolerance_deg,
        reprojection_error_px,
    };
    if let Err(e) = solved.check_roll() {
        log::warn!("{e}");
    }

    Restoration::Solved(solved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request() -> RestoreRequest {
        RestoreRequest {
            picks: [
                Point2::new(1079.2570705160322, -51.419889722832295),
                Point2::new(475.78462366250596, -58.25798487012162),
                Point2::new(1071.2257008215634, 242.08802913011453),
                Point2::new(510.63350179660546, 255.89807284717494),
            ],
            fov_deg: 70.0,
            extents: HalfExtents::new(1.0, 0.5),
            face: Face::PosZ,
            image: ImageSize::new(1920.0, 1080.0),
        }
    }

    #[test]
    fn test_restore_pos_z() -> Result<(), Box<dyn std::error::Error>> {
        let res = restore(&request(), &RestoreParams::default());
        let solved = res.solved().ok_or("expected a solution")?;

        let c = solved.pose.position();
        assert_relative_eq!(c[0], 0.3, epsilon = 1e-9);
        assert_relative_eq!(c[1], -0.2, epsilon = 1e-9);
        assert_relative_eq!(c[2], -5.0, epsilon = 1e-9);
        assert_eq!(solved.raw, solved.pose);

        assert_relative_eq!(solved.pose.yaw(), 10.0, epsilon = 1e-6);
        assert_relative_eq!(solved.heading.yaw, -170.0, epsilon = 1e-6);
        assert_relative_eq!(solved.heading.pitch, 20.0, epsilon = 1e-6);
        assert_relative_eq!(solved.heading.roll, 0.0, epsilon = 1e-6);
        assert!(solved.check_roll().is_ok());
        Ok(())
    }

    #[test]
    fn test_reprojection_error_of_exact_picks() -> Result<(), Box<dyn std::error::Error>> {
        for face in Face::ALL {
            let req = RestoreRequest { face, ..request() };
            let res = restore(&req, &RestoreParams::default());
            let solved = res.solved().ok_or("expected a solution")?;
            assert!(
                solved.reprojection_error_px < 1e-6,
                "{face}: {}",
                solved.reprojection_error_px
            );
            assert_relative_eq!(
                reprojection_error(&req, &solved.pose),
                solved.reprojection_error_px
            );
        }
        Ok(())
    }

    #[test]
    fn test_reprojection_error_of_free_quad() -> Result<(), Box<dyn std::error::Error>> {
        // a square seen by these picks would need a sheared rotation
        let req = RestoreRequest {
            picks: [
                Point2::new(238.5, 587.5),
                Point2::new(422.5, 505.0),
                Point2::new(152.0, 345.4),
                Point2::new(379.0, 325.5),
            ],
            extents: HalfExtents::new(0.5, 0.5),
            ..request()
        };
        let res = restore(&req, &RestoreParams::default());
        let solved = res.solved().ok_or("expected a solution")?;
        assert!(
            solved.reprojection_error_px > 1.0,
            "residual {}",
            solved.reprojection_error_px
        );
        Ok(())
    }

    #[test]
    fn test_restore_invalid_picks() {
        let mut req = request();
        req.fov_deg = 171.0;
        let res = restore(&req, &RestoreParams::default());
        assert!(!res.is_valid());
        assert_eq!(res.position(), None);
        assert!(res.solved().is_none());
    }

    #[test]
    fn test_restore_no_solution() -> Result<(), Box<dyn std::error::Error>> {
        let params = RestoreParams {
            solver: SolverParams { rank_eps: 1e3 },
            ..Default::default()
        };
        let res = restore(&request(), &params);
        assert!(res.is_valid());
        assert!(res.solved().is_none());
        let position = res.position().ok_or("expected a NaN position")?;
        assert!(position.iter().all(|v| v.is_nan()));
        assert!(matches!(
            res,
            Restoration::NoSolution {
                reason: SolveError::RankDeficient { .. },
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn test_params_from_partial_json() -> Result<(), serde_json::Error> {
        let params: RestoreParams =
            serde_json::from_str(r#"{"method": "nine_point", "roll_tolerance_deg": 2.5}"#)?;
        assert_eq!(params.method, PoseMethod::NinePoint);
        assert_eq!(params.roll_tolerance_deg, 2.5);
        assert_eq!(params.validity, ValidityParams::default());
        assert_eq!(params.max_reprojection_error_px, 1e-3);
        Ok(())
    }
}
