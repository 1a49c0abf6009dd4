//! Camera and primary ray generation
use crate::geometry::{Ray, Vector};

/// Pinhole camera looking down +z with the image plane at z = 1 in front of it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector,
}

impl Camera {
    pub fn new(position: Vector) -> Self {
        Self { position }
    }

    /// Ray through pixel `(x, y)` of a `width` x `height` image.
    ///
    /// Row 0 is the top of the image, so the y axis is flipped.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let direction = Vector::new(
            x as f32 / width as f32 - 0.5,
            (1.0 - y as f32 / height as f32) - 0.5,
            1.0,
        );
        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector::new(0.0, 0.0, -2.0))
    }
}
