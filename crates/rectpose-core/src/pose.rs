use serde::{Deserialize, Serialize};

use crate::linalg::{euclidean_distance, wrap_degrees};
use crate::rotation::RotationMatrix;

/// Yaw, pitch and roll of a rotation, in degrees.
///
/// Yaw lies in `(-180, 180]`, pitch in `[-180, 180]` and roll in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about the vertical axis.
    pub yaw: f64,
    /// Rotation about the horizontal axis.
    pub pitch: f64,
    /// Rotation about the viewing axis.
    pub roll: f64,
}

impl EulerAngles {
    /// Decompose a rotation built as `RotX(pitch) · RotZ(roll) · RotY(yaw)`.
    pub fn from_rotation(r: &RotationMatrix) -> Self {
        let m = r.matrix();
        // rounding can push |R[0,1]| a hair above one
        let roll = (-m[0][1]).clamp(-1.0, 1.0).asin().to_degrees();
        let yaw = m[0][2].atan2(m[0][0]).to_degrees();
        let pitch = m[2][1].atan2(m[1][1]).to_degrees();
        Self {
            yaw: wrap_degrees(yaw),
            pitch,
            roll,
        }
    }

    /// The same angles with `offset` degrees added to the yaw, wrapped into `(-180, 180]`.
    pub fn with_yaw_offset(&self, offset: f64) -> Self {
        Self {
            yaw: wrap_degrees(self.yaw + offset),
            ..*self
        }
    }

    /// Angles as `[yaw, pitch, roll]`.
    pub fn to_array(&self) -> [f64; 3] {
        [self.yaw, self.pitch, self.roll]
    }
}

/// Euclidean distances between two poses, used to verify a solve against ground truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDistances {
    /// Distance between the positions.
    pub position: f64,
    /// Frobenius distance between the rotation matrices.
    pub rotation: f64,
    /// Distance between the `[yaw, pitch, roll]` vectors, in degrees.
    pub angles: f64,
}

/// Camera position and orientation.
///
/// The Euler angles are derived from the rotation once, at construction. A pose is
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    position: [f64; 3],
    rotation: RotationMatrix,
    angles: EulerAngles,
}

impl Pose {
    /// Create a pose from a camera position and rotation.
    pub fn new(position: [f64; 3], rotation: RotationMatrix) -> Self {
        Self {
            position,
            rotation,
            angles: EulerAngles::from_rotation(&rotation),
        }
    }

    /// Create a pose from a camera position and yaw, pitch and roll in degrees.
    ///
    /// The yaw is wrapped into `(-180, 180]` first.
    pub fn from_euler(position: [f64; 3], yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::new(
            position,
            RotationMatrix::from_euler(wrap_degrees(yaw), pitch, roll),
        )
    }

    /// Camera position in world coordinates.
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Camera rotation.
    pub fn rotation(&self) -> &RotationMatrix {
        &self.rotation
    }

    /// Euler angles of the rotation.
    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    /// Yaw in degrees, in `(-180, 180]`.
    pub fn yaw(&self) -> f64 {
        self.angles.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f64 {
        self.angles.pitch
    }

    /// Roll in degrees.
    pub fn roll(&self) -> f64 {
        self.angles.roll
    }

    /// Re-express the pose in a fixed frame: position `F · C`, rotation `R · Fᵀ`.
    pub fn reframed(&self, frame: &RotationMatrix) -> Self {
        Self::new(
            frame.mul_vec(&self.position),
            self.rotation.reframed(frame),
        )
    }

    /// Distances to `other` over position, raw rotation entries and angle vector.
    pub fn distances(&self, other: &Pose) -> PoseDistances {
        PoseDistances {
            position: euclidean_distance(&self.position, &other.position),
            rotation: euclidean_distance(&self.rotation.to_flat(), &other.rotation.to_flat()),
            angles: euclidean_distance(&self.angles.to_array(), &other.angles.to_array()),
        }
    }
}
