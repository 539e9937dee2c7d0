use std::fmt;
use std::str::FromStr;

use rectpose_core::RotationMatrix;
use serde::{Deserialize, Serialize};

use crate::error::ParseFaceError;

/// Block face the pictured rectangle lies on.
///
/// Each face has a fixed frame that re-expresses a pose solved against the rectangle on
/// `z = 0` in world axes, and an outward unit normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Face looking toward `-x`.
    #[serde(rename = "-x")]
    NegX,
    /// Face looking toward `+x`.
    #[serde(rename = "+x")]
    PosX,
    /// Face looking toward `-y`.
    #[serde(rename = "-y")]
    NegY,
    /// Face looking toward `+y`.
    #[serde(rename = "+y")]
    PosY,
    /// Face looking toward `-z`.
    #[serde(rename = "-z")]
    NegZ,
    /// Face looking toward `+z`.
    #[default]
    #[serde(rename = "+z")]
    PosZ,
}

impl Face {
    /// All faces, in selector order.
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
        Face::NegZ,
        Face::PosZ,
    ];

    /// Selector token, e.g. `"+z"`.
    pub fn token(&self) -> &'static str {
        match self {
            Face::NegX => "-x",
            Face::PosX => "+x",
            Face::NegY => "-y",
            Face::PosY => "+y",
            Face::NegZ => "-z",
            Face::PosZ => "+z",
        }
    }

    /// Fixed frame `F` of the face; the identity for `+z`.
    pub fn frame(&self) -> RotationMatrix {
        let m = match self {
            Face::PosZ => [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            Face::NegZ => [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
            Face::PosX => [[0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            Face::NegX => [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
            Face::PosY => [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0]],
            Face::NegY => [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]],
        };
        // signed permutation matrices with determinant +1
        RotationMatrix::from_rows_unchecked(m)
    }

    /// Outward unit normal of the face.
    pub fn normal(&self) -> [f64; 3] {
        match self {
            Face::NegX => [-1.0, 0.0, 0.0],
            Face::PosX => [1.0, 0.0, 0.0],
            Face::NegY => [0.0, -1.0, 0.0],
            Face::PosY => [0.0, 1.0, 0.0],
            Face::NegZ => [0.0, 0.0, -1.0],
            Face::PosZ => [0.0, 0.0, 1.0],
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|face| face.token() == s)
            .ok_or_else(|| ParseFaceError(s.to_string()))
    }
}
