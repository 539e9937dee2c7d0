use glam::{DMat3, DVec3};
use serde::Serialize;

const COLUMN_EPS: f64 = 1e-12;

/// A right-handed orthonormal 3x3 rotation.
///
/// Columns 0 and 1 are unit length and mutually orthogonal, column 2 is always
/// `column0 × column1`. The third column is derived, never taken from solved data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[[f64; 3]; 3]")]
pub struct RotationMatrix {
    m: DMat3,
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<RotationMatrix> for [[f64; 3]; 3] {
    fn from(r: RotationMatrix) -> Self {
        r.matrix()
    }
}

impl RotationMatrix {
    /// The identity rotation.
    pub const IDENTITY: Self = Self { m: DMat3::IDENTITY };

    /// Wrap a row-major matrix without checking it.
    ///
    /// PRECONDITION: `m` is orthonormal with determinant `+1`.
    pub fn from_rows_unchecked(m: [[f64; 3]; 3]) -> Self {
        Self {
            m: DMat3::from_cols_array_2d(&m).transpose(),
        }
    }

    /// Build a rotation from its first two columns.
    ///
    /// `c0` is normalized, `c1` is made orthogonal to `c0` and normalized (Gram-Schmidt)
    /// and the third column is completed as `c0 × c1`. For columns that are already
    /// orthonormal this leaves them untouched up to rounding.
    ///
    /// Returns `None` when either column collapses to zero.
    pub fn from_columns(c0: [f64; 3], c1: [f64; 3]) -> Option<Self> {
        let c0 = DVec3::from_array(c0);
        let n0 = c0.length();
        if n0.is_nan() || n0 <= COLUMN_EPS {
            return None;
        }
        let c0 = c0 / n0;

        let c1 = DVec3::from_array(c1);
        let c1 = c1 - c0.dot(c1) * c0;
        let n1 = c1.length();
        if n1.is_nan() || n1 <= COLUMN_EPS {
            return None;
        }

        Some(Self::complete(c0, c1 / n1))
    }

    /// Rotation from yaw, pitch and roll in degrees: `RotX(pitch) · RotZ(roll) · RotY(yaw)`.
    pub fn from_euler(yaw: f64, pitch: f64, roll: f64) -> Self {
        let r = DMat3::from_rotation_x(pitch.to_radians())
            * DMat3::from_rotation_z(roll.to_radians())
            * DMat3::from_rotation_y(yaw.to_radians());
        Self::complete(r.x_axis, r.y_axis)
    }

    fn complete(c0: DVec3, c1: DVec3) -> Self {
        Self {
            m: DMat3::from_cols(c0, c1, c0.cross(c1)),
        }
    }

    /// The underlying glam matrix.
    pub fn as_dmat3(&self) -> &DMat3 {
        &self.m
    }

    /// Row-major entries.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        let t = self.m.transpose();
        [t.x_axis.to_array(), t.y_axis.to_array(), t.z_axis.to_array()]
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m.col(col)[row]
    }

    /// Column `j` as a vector.
    pub fn column(&self, j: usize) -> [f64; 3] {
        self.m.col(j).to_array()
    }

    /// Determinant, `1` up to rounding.
    pub fn determinant(&self) -> f64 {
        self.m.determinant()
    }

    /// The inverse rotation.
    pub fn transpose(&self) -> Self {
        Self {
            m: self.m.transpose(),
        }
    }

    /// Rotate a vector.
    pub fn mul_vec(&self, v: &[f64; 3]) -> [f64; 3] {
        self.m.mul_vec3(DVec3::from_array(*v)).to_array()
    }

    /// `self · other`.
    pub fn compose(&self, other: &RotationMatrix) -> Self {
        let r = self.m * other.m;
        Self::complete(r.x_axis, r.y_axis)
    }

    /// Re-express the rotation in another frame: `self · frameᵀ`.
    pub fn reframed(&self, frame: &RotationMatrix) -> Self {
        self.compose(&frame.transpose())
    }

    /// Entries flattened row by row.
    pub fn to_flat(&self) -> [f64; 9] {
        self.m.transpose().to_cols_array()
    }
}
