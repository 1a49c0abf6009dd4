//! tcube core library - faceted shapes rendered by ray casting
//!
//! Stateless building blocks for the terminal renderer: vector and matrix
//! helpers, faces with ray intersection, the fixed model library, camera
//! rays and the frame renderer.

pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod parse;
pub mod projection;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use config::{ColorModel, Configuration};
pub use error::{Error, Result};
pub use geometry::{Color, Face, Hit, Parallelogram, Ray, Triangle, Vector};
pub use models::Target;
pub use projection::Camera;
pub use render::{Frames, Image, Renderer};
pub use transform::{CumulativeTransform, Matrix, Transform};
