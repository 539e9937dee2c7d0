use glam::DVec3;

use crate::point::Point2;
use crate::pose::Pose;

/// Project a world point onto the projective plane `z = 1` of a camera.
///
/// The camera looks along its local `-z` with image `y` pointing down, so the rotation
/// is flipped by `diag(1, -1, -1)` before the perspective division:
///
/// `Pc = diag(1, -1, -1) · R · (P − C)`, `(u, v) = (Pc.x / Pc.z, Pc.y / Pc.z)`.
///
/// A point at zero depth is not guarded: the division yields ±infinity or NaN.
pub fn project_point(point: &[f64; 3], pose: &Pose) -> Point2 {
    let rel = DVec3::from_array(*point) - DVec3::from_array(pose.position());
    let pc = pose.rotation().as_dmat3().mul_vec3(rel);
    let (x, y, z) = (pc.x, -pc.y, -pc.z);
    Point2::new(x / z, y / z)
}

/// Project a set of world points with [`project_point`].
///
/// Example:
///
/// ```
/// use rectpose_core::{project_points, Pose};
///
/// let pose = Pose::from_euler([0.0, 0.0, -2.0], 0.0, 0.0, 0.0);
/// let projected = project_points(&[[1.0, 0.5, 0.0]], &pose);
/// assert_eq!(projected[0].x, -0.5);
/// assert_eq!(projected[0].y, 0.25);
/// ```
pub fn project_points(points: &[[f64; 3]], pose: &Pose) -> Vec<Point2> {
    points.iter().map(|p| project_point(p, pose)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_identity_pose() {
        // camera at z = -2 with identity rotation sees the plane z = 0 at depth -2
        let pose = Pose::from_euler([0.0, 0.0, -2.0], 0.0, 0.0, 0.0);
        let p = project_point(&[1.0, 0.5, 0.0], &pose);
        assert_relative_eq!(p.x, -0.5);
        assert_relative_eq!(p.y, 0.25);
        assert!(p.finite);
    }

    #[test]
    fn test_project_camera_center_point() {
        let pose = Pose::from_euler([0.3, -0.2, -5.0], 10.0, 20.0, 0.0);
        // a point straight ahead of the camera lands on the principal point
        let forward = pose.rotation().transpose().mul_vec(&[0.0, 0.0, -1.0]);
        let c = pose.position();
        let ahead = [c[0] + forward[0], c[1] + forward[1], c[2] + forward[2]];
        let p = project_point(&ahead, &pose);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_project_zero_depth_is_not_finite() {
        let pose = Pose::from_euler([0.0, 0.0, -1.0], 0.0, 0.0, 0.0);
        let p = project_point(&[1.0, 0.0, -1.0], &pose);
        assert!(p.x.is_infinite());
        let q = project_point(&[0.0, 0.0, -1.0], &pose);
        assert!(q.x.is_nan());
    }

    #[test]
    fn test_project_points_keeps_order() {
        let pose = Pose::from_euler([0.0, 0.0, -1.0], 0.0, 0.0, 0.0);
        let pts = project_points(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], &pose);
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0].x, -1.0);
        assert_relative_eq!(pts[1].y, 1.0);
    }
}
