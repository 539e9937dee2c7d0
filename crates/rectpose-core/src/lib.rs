#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # rectpose-core
//!
//! Recovers a camera pose from the four projected corners of an axis-aligned rectangle
//! lying on the world plane `z = 0`.
//!
//! ## Example: project and solve back
//!
//! ```rust
//! use rectpose_core::{project_points, solve_pose, HalfExtents, Point2, Pose, PoseMethod};
//!
//! let extents = HalfExtents::new(2.0, 1.0);
//! let pose = Pose::from_euler([0.0, 0.0, -1.0], 290.0, -30.0, 40.0);
//!
//! let projected = project_points(&extents.corners(), &pose);
//! let picks: [Point2; 4] = [projected[0], projected[1], projected[2], projected[3]];
//!
//! let restored = solve_pose(&picks, &extents, PoseMethod::Rectangle)?;
//! assert!(pose.distances(&restored).position < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Angle wrapping and distance helpers.
pub mod linalg;

/// Lines in the projective plane.
pub mod line;

/// 2D points with an "at infinity" flag.
pub mod point;

/// Camera pose with eagerly derived Euler angles.
pub mod pose;

/// Forward model: world points to projective-plane points.
pub mod projector;

/// Orthonormal rotation matrices.
pub mod rotation;

/// Inverse model: pose recovery from four rectangle corners.
pub mod solver;

pub use line::Line2;
pub use point::Point2;
pub use pose::{EulerAngles, Pose, PoseDistances};
pub use projector::{project_point, project_points};
pub use rotation::RotationMatrix;
pub use solver::{
    solve_pose, solve_pose_with_params, HalfExtents, NinePointSolver, PoseMethod, PoseSolver,
    RectangleSolver, SolveError, SolverParams,
};
