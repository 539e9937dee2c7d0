use rectpose_core::Point2;
use serde::{Deserialize, Serialize};

use crate::error::InvalidPicks;

/// Picking numbers of the points in diagonal order `[P1, P2, P4, P3]`.
const DIAGONAL_ORDER: [usize; 4] = [0, 1, 3, 2];

/// Thresholds of the pick validity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityParams {
    /// Smallest accepted vertical field of view, inclusive, in degrees.
    pub min_fov_deg: f64,
    /// Largest accepted vertical field of view, inclusive, in degrees.
    pub max_fov_deg: f64,
    /// Smallest accepted squared pixel distance between any two picks.
    pub min_distance_sq: f64,
}

impl Default for ValidityParams {
    fn default() -> Self {
        Self {
            min_fov_deg: 1.0,
            max_fov_deg: 170.0,
            min_distance_sq: 0.1,
        }
    }
}

/// Check that four pixel picks can be the image of the rectangle.
///
/// The checks run in order and the first failure is reported:
/// 1. the field of view lies in `[min_fov_deg, max_fov_deg]`;
/// 2. every pair of picks is at least `min_distance_sq` apart (squared);
/// 3. in the order `[P1, P2, P4, P3]`, the ray from each point toward its opposite
///    point has the two remaining points strictly on opposite sides.
pub fn check_picks(
    picks: &[Point2; 4],
    fov_deg: f64,
    params: &ValidityParams,
) -> Result<(), InvalidPicks> {
    if !(params.min_fov_deg..=params.max_fov_deg).contains(&fov_deg) {
        return Err(InvalidPicks::FieldOfViewOutOfRange {
            fov_deg,
            min_deg: params.min_fov_deg,
            max_deg: params.max_fov_deg,
        });
    }

    for i in 0..4 {
        for j in (i + 1)..4 {
            let distance_sq = picks[i].distance_squared(&picks[j]);
            if distance_sq < params.min_distance_sq {
                return Err(InvalidPicks::PointsTooClose {
                    first: i + 1,
                    second: j + 1,
                    distance_sq,
                });
            }
        }
    }

    let q = DIAGONAL_ORDER.map(|k| picks[k]);
    for i in 0..4 {
        if !ray_separates(&q[i], &q[(i + 2) % 4], &q[(i + 1) % 4], &q[(i + 3) % 4]) {
            return Err(InvalidPicks::DiagonalsDoNotCross {
                origin: DIAGONAL_ORDER[i] + 1,
            });
        }
    }

    Ok(())
}

/// Whether the picks pass [`check_picks`] with default thresholds.
pub fn is_valid(picks: &[Point2; 4], fov_deg: f64) -> bool {
    check_picks(picks, fov_deg, &ValidityParams::default()).is_ok()
}

fn ray_separates(origin: &Point2, toward: &Point2, s1: &Point2, s2: &Point2) -> bool {
    let ray = origin.to(toward);
    ray.cross(&origin.to(s1)) * ray.cross(&origin.to(s2)) < 0.0
}
