//! 3x3 linear transforms and the per-frame cumulative transform
use nalgebra::Matrix3;

use crate::error::{Error, Result};
use crate::geometry::Vector;

/// Row-major 3x3 linear transform. There is no translation component since
/// every model is centered at the origin.
pub type Matrix = Matrix3<f32>;

/// Transform builder for rotations and scaling
pub struct Transform;

impl Transform {
    /// Identity matrix
    pub fn eye() -> Matrix {
        Matrix::identity()
    }

    /// Build a matrix from nine row-major coefficients
    pub fn from_coefficients(coefficients: &[f32]) -> Result<Matrix> {
        if coefficients.len() != 9 {
            return Err(Error::MatrixCoefficients {
                found: coefficients.len(),
            });
        }
        Ok(Matrix::from_row_slice(coefficients))
    }

    /// Diagonal scaling matrix
    pub fn scale(s: &Vector) -> Matrix {
        Matrix::from_diagonal(s)
    }

    /// Right-handed rotation about the x axis (radians)
    pub fn rotate_x(angle: f32) -> Matrix {
        let (sin, cos) = angle.sin_cos();
        Matrix::new(
            1.0, 0.0, 0.0, //
            0.0, cos, -sin, //
            0.0, sin, cos,
        )
    }

    /// Right-handed rotation about the y axis (radians)
    pub fn rotate_y(angle: f32) -> Matrix {
        let (sin, cos) = angle.sin_cos();
        Matrix::new(
            cos, 0.0, sin, //
            0.0, 1.0, 0.0, //
            -sin, 0.0, cos,
        )
    }

    /// Right-handed rotation about the z axis (radians)
    pub fn rotate_z(angle: f32) -> Matrix {
        let (sin, cos) = angle.sin_cos();
        Matrix::new(
            cos, -sin, 0.0, //
            sin, cos, 0.0, //
            0.0, 0.0, 1.0,
        )
    }

    /// Combined rotation `Rz(yaw) * Ry(pitch) * Rx(roll)`.
    ///
    /// Applied to a column vector the roll happens first, the yaw last.
    pub fn rotate(yaw: f32, pitch: f32, roll: f32) -> Matrix {
        Self::rotate_z(yaw) * Self::rotate_y(pitch) * Self::rotate_x(roll)
    }
}

/// Running product of a base transform, advanced once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeTransform {
    base: Matrix,
    current: Matrix,
}

impl CumulativeTransform {
    pub fn new(base: Matrix) -> Self {
        Self {
            base,
            current: base,
        }
    }

    pub fn current(&self) -> &Matrix {
        &self.current
    }

    /// Compose the base transform onto the running product.
    ///
    /// Right-multiplication keeps the rotation axis fixed in the model's
    /// own frame. For multi-axis rotations the axis therefore drifts
    /// relative to the rendered object. Kept for output compatibility.
    pub fn advance(&mut self) {
        self.current *= self.base;
    }
}
