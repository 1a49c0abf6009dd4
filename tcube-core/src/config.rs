//! Render configuration
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::geometry::Vector;
use crate::models::Target;
use crate::projection::Camera;
use crate::transform::{Matrix, Transform};

/// Terminal color encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorModel {
    /// 24-bit RGB
    #[default]
    TrueColor,
    /// 6x6x6 cube of the 256-color palette
    Quantized,
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorModel::TrueColor => write!(f, "24-bit"),
            ColorModel::Quantized => write!(f, "8-bit"),
        }
    }
}

impl FromStr for ColorModel {
    type Err = Error;

    /// Accepts the bit depths `24` and `8`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "24" => Ok(ColorModel::TrueColor),
            "8" => Ok(ColorModel::Quantized),
            other => Err(Error::Parse(format!(
                "unknown color model {other:?}, expected 24 or 8"
            ))),
        }
    }
}

/// Everything the render loop reads; built once before the loop starts
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub width: u32,
    pub height: u32,
    pub camera: Camera,
    /// Applied once per frame, composing across frames when animating
    pub transform: Matrix,
    pub target: Target,
    pub color_model: ColorModel,
    pub frame_delay: Duration,
    pub animate: bool,
}

impl Configuration {
    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.camera.position.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidCamera);
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            camera: Camera::new(Vector::new(0.0, 0.0, -2.0)),
            transform: Transform::rotate(0.0, 45f32.to_radians(), 0.0),
            target: Target::Cube,
            color_model: ColorModel::TrueColor,
            frame_delay: Duration::from_millis(32),
            animate: false,
        }
    }
}
