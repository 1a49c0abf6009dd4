//! Fixed face lists for the renderable targets
use std::f32::consts::PI;
use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::{
    clamp, normalize, span_area_squared, Color, Face, Parallelogram, Triangle, Vector, EPSILON,
};

/// Shape selected for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Cube,
    Tetrahedron,
    Sphere {
        radius: f32,
        vertical: u32,
        horizontal: u32,
    },
}

impl Target {
    /// Build the face list for this target
    pub fn faces(&self) -> Result<Vec<Face>> {
        match *self {
            Target::Cube => Ok(cube()),
            Target::Tetrahedron => Ok(tetrahedron()),
            Target::Sphere {
                radius,
                vertical,
                horizontal,
            } => sphere(radius, vertical, horizontal),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Cube => write!(f, "cube"),
            Target::Tetrahedron => write!(f, "tetrahedron"),
            Target::Sphere {
                radius,
                vertical,
                horizontal,
            } => write!(f, "sphere(r={radius}, {vertical}x{horizontal})"),
        }
    }
}

/// Unit cube centered at the origin, one colored parallelogram per side
pub fn cube() -> Vec<Face> {
    let x = Vector::x();
    let y = Vector::y();
    let z = Vector::z();

    vec![
        // Top
        Parallelogram::new(Vector::new(-0.5, 0.5, -0.5), z, x, Color::new(1.0, 0.0, 0.0)).into(),
        // Bottom
        Parallelogram::new(Vector::new(0.5, -0.5, 0.5), -x, -z, Color::new(0.0, 1.0, 0.0)).into(),
        // Right
        Parallelogram::new(Vector::new(0.5, 0.5, 0.5), -y, -z, Color::new(0.0, 0.0, 1.0)).into(),
        // Back
        Parallelogram::new(Vector::new(0.5, 0.5, 0.5), -x, -y, Color::new(1.0, 0.0, 1.0)).into(),
        // Left
        Parallelogram::new(Vector::new(-0.5, 0.5, 0.5), -y, -z, Color::new(0.0, 1.0, 1.0)).into(),
        // Front
        Parallelogram::new(Vector::new(-0.5, 0.5, -0.5), x, -y, Color::new(1.0, 1.0, 1.0)).into(),
    ]
}

/// Triangular pyramid with its apex on the y axis and its base at y = -0.5
pub fn tetrahedron() -> Vec<Face> {
    let apex = Vector::new(0.0, 0.5, 0.0);
    let front_right = Vector::new(0.5, -0.5, -0.5);
    let front_left = Vector::new(-0.5, -0.5, -0.5);
    let back = Vector::new(0.0, -0.5, 0.5);

    vec![
        Triangle::new(apex, front_right, front_left, Color::new(1.0, 1.0, 1.0)).into(),
        Triangle::new(apex, front_right, back, Color::new(0.0, 1.0, 0.0)).into(),
        Triangle::new(apex, front_left, back, Color::new(0.0, 0.0, 1.0)).into(),
        Triangle::new(front_right, front_left, back, Color::new(1.0, 0.0, 0.0)).into(),
    ]
}

/// Latitude/longitude sphere approximation.
///
/// A triangle fan closes each pole and `vertical` rings of quads, split
/// into two triangles each, fill the body. Latitudes are spaced
/// `PI / (vertical + 2)` apart so the fans and the rings never share a
/// degenerate row. Yields `2 * horizontal * (vertical + 1)` faces.
///
/// Subdivisions fine enough to leave a face that no ray can hit are
/// rejected rather than rendered with holes.
pub fn sphere(radius: f32, vertical: u32, horizontal: u32) -> Result<Vec<Face>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidSphere(format!(
            "radius must be positive, got {radius}"
        )));
    }
    if horizontal < 2 {
        return Err(Error::InvalidSphere(format!(
            "need at least 2 horizontal subdivisions, got {horizontal}"
        )));
    }

    let rows = vertical + 2;
    let point = |ring: u32, segment: u32| {
        let phi = PI * ring as f32 / rows as f32;
        let theta = 2.0 * PI * segment as f32 / horizontal as f32;
        Vector::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()) * radius
    };

    let mut faces = Vec::with_capacity(2 * (horizontal * (vertical + 1)) as usize);

    // North pole fan
    let top = Vector::new(0.0, radius, 0.0);
    for i in 0..horizontal {
        let p1 = point(1, i);
        let p2 = point(1, i + 1);
        faces.push(Triangle::new(top, p1, p2, pole_color(&p1)).into());
    }

    // South pole fan
    let bottom = Vector::new(0.0, -radius, 0.0);
    for i in 0..horizontal {
        let p1 = point(rows - 1, i);
        let p2 = point(rows - 1, i + 1);
        faces.push(Triangle::new(bottom, p2, p1, pole_color(&p1)).into());
    }

    // Body rings
    for j in 1..=vertical {
        for i in 0..horizontal {
            let p1 = point(j, i);
            let p2 = point(j, i + 1);
            let p3 = point(j + 1, i);
            let p4 = point(j + 1, i + 1);

            let color = clamp(&normalize(&((p1 + p2 + p4) / 3.0)), 0.0, 1.0);
            faces.push(Triangle::new(p1, p2, p3, color).into());
            faces.push(Triangle::new(p2, p3, p4, color).into());
        }
    }

    let smallest = faces
        .iter()
        .filter_map(|face| match face {
            Face::Triangle(t) => Some(span_area_squared(&t.a(), &t.b())),
            Face::Parallelogram(_) => None,
        })
        .fold(f32::INFINITY, f32::min);
    if smallest < EPSILON {
        return Err(Error::InvalidSphere(format!(
            "{vertical} rings by {horizontal} segments at radius {radius} leave faces too small to hit"
        )));
    }

    Ok(faces)
}

/// Pole fans are tinted by the direction of their first rim vertex
fn pole_color(rim: &Vector) -> Color {
    clamp(&normalize(rim), 0.0, 1.0)
}
