use thiserror::Error;

/// Reasons why four picked points cannot be the image of a rectangle.
///
/// Points are numbered `1..=4` in picking order.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidPicks {
    /// The vertical field of view is outside the accepted range.
    #[error("vertical field of view {fov_deg} is outside [{min_deg}, {max_deg}] degrees")]
    FieldOfViewOutOfRange {
        /// Requested field of view in degrees.
        fov_deg: f64,
        /// Smallest accepted field of view.
        min_deg: f64,
        /// Largest accepted field of view.
        max_deg: f64,
    },

    /// Two picks are closer than the minimum separation.
    #[error("points {first} and {second} are too close: squared distance {distance_sq}")]
    PointsTooClose {
        /// Number of the first point.
        first: usize,
        /// Number of the second point.
        second: usize,
        /// Squared pixel distance between them.
        distance_sq: f64,
    },

    /// The diagonal starting at a point does not separate the two remaining points.
    #[error("diagonal from point {origin} does not cross the opposite diagonal")]
    DiagonalsDoNotCross {
        /// Number of the point the diagonal starts from.
        origin: usize,
    },
}

/// Soft failures of the orchestration layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RestoreError {
    /// The restored roll is too large for a command that only sets yaw and pitch.
    #[error("Too non-zero roll={roll} to use in minecraft command.")]
    RollOutOfTolerance {
        /// Restored roll in degrees.
        roll: f64,
        /// Largest accepted absolute roll in degrees.
        tolerance: f64,
    },
}

/// Error returned when parsing an unknown face token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown face {0:?}, expected one of -x, +x, -y, +y, -z, +z")]
pub struct ParseFaceError(pub String);
