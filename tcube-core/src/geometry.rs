//! Faces and ray intersection
use nalgebra::Vector3;

use crate::transform::Matrix;

/// Point, direction or color depending on context
pub type Vector = Vector3<f32>;

/// RGB color, channels nominally in [0, 1]
pub type Color = Vector;

/// Tolerance for parallel rays, degenerate faces and the parametric bounds
pub const EPSILON: f32 = 1e-6;

/// Unit-length copy of `v`.
///
/// The result is NaN for a zero vector; callers must rule that out.
pub fn normalize(v: &Vector) -> Vector {
    debug_assert!(v.norm_squared() > 0.0, "normalizing a zero-length vector");
    v / v.norm()
}

/// Componentwise clamp
pub fn clamp(v: &Vector, minimum: f32, maximum: f32) -> Vector {
    v.map(|c| c.clamp(minimum, maximum))
}

/// A ray with an origin and a direction that need not be normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub point: Vector,
    pub direction: Vector,
}

impl Ray {
    pub fn new(point: Vector, direction: Vector) -> Self {
        Self { point, direction }
    }

    pub fn at(&self, d: f32) -> Vector {
        self.point + self.direction * d
    }
}

/// A forward intersection of a ray with a face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// World-space intersection point
    pub point: Vector,
    /// Ray parameter at the intersection, always positive
    pub distance: f32,
}

/// Quadrilateral spanned by two edge vectors from one corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelogram {
    pub point: Vector,
    pub a: Vector,
    pub b: Vector,
    pub color: Color,
}

impl Parallelogram {
    pub fn new(point: Vector, a: Vector, b: Vector, color: Color) -> Self {
        Self { point, a, b, color }
    }

    pub fn normal(&self) -> Vector {
        self.a.cross(&self.b)
    }

    pub fn intersects(&self, ray: &Ray) -> Option<Hit> {
        let distance = plane_distance(ray, &self.point, &self.normal())?;
        let x = ray.at(distance);
        let (u, v) = plane_coordinates(&self.a, &self.b, &(x - self.point))?;

        if (-EPSILON..=1.0).contains(&u) && (-EPSILON..=1.0).contains(&v) {
            Some(Hit { point: x, distance })
        } else {
            None
        }
    }

    pub fn transform(&self, m: &Matrix) -> Self {
        Self {
            point: m * self.point,
            a: m * self.a,
            b: m * self.b,
            color: self.color,
        }
    }
}

/// Triangle given by its three corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(p0: Vector, p1: Vector, p2: Vector, color: Color) -> Self {
        Self {
            points: [p0, p1, p2],
            color,
        }
    }

    pub fn a(&self) -> Vector {
        self.points[1] - self.points[0]
    }

    pub fn b(&self) -> Vector {
        self.points[2] - self.points[0]
    }

    /// Unit normal, or `None` when the corners are collinear
    pub fn normal(&self) -> Option<Vector> {
        let n = self.a().cross(&self.b());
        if n.norm() < EPSILON {
            None
        } else {
            Some(normalize(&n))
        }
    }

    pub fn intersects(&self, ray: &Ray) -> Option<Hit> {
        let normal = self.normal()?;
        let origin = self.points[0];
        let distance = plane_distance(ray, &origin, &normal)?;
        let x = ray.at(distance);
        let (u, v) = plane_coordinates(&self.a(), &self.b(), &(x - origin))?;

        let bounds = -EPSILON..=1.0 + EPSILON;
        if bounds.contains(&u) && bounds.contains(&v) && bounds.contains(&(u + v)) {
            Some(Hit { point: x, distance })
        } else {
            None
        }
    }

    pub fn transform(&self, m: &Matrix) -> Self {
        Self {
            points: self.points.map(|p| m * p),
            color: self.color,
        }
    }
}

/// A flat colored polygon, the unit of ray intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Face {
    Parallelogram(Parallelogram),
    Triangle(Triangle),
}

impl Face {
    pub fn color(&self) -> Color {
        match self {
            Face::Parallelogram(face) => face.color,
            Face::Triangle(face) => face.color,
        }
    }

    pub fn intersects(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Face::Parallelogram(face) => face.intersects(ray),
            Face::Triangle(face) => face.intersects(ray),
        }
    }

    /// Copy of this face with every point and edge passed through `m`
    pub fn transform(&self, m: &Matrix) -> Face {
        match self {
            Face::Parallelogram(face) => Face::Parallelogram(face.transform(m)),
            Face::Triangle(face) => Face::Triangle(face.transform(m)),
        }
    }
}

impl From<Parallelogram> for Face {
    fn from(face: Parallelogram) -> Self {
        Face::Parallelogram(face)
    }
}

impl From<Triangle> for Face {
    fn from(face: Triangle) -> Self {
        Face::Triangle(face)
    }
}

/// Ray parameter where `ray` crosses the plane through `point` with the
/// given normal. `None` for parallel rays and for crossings at or behind the
/// ray origin.
fn plane_distance(ray: &Ray, point: &Vector, normal: &Vector) -> Option<f32> {
    let projection = ray.direction.dot(normal);
    if projection.abs() < EPSILON {
        return None;
    }

    let d = (point - ray.point).dot(normal) / projection;
    if d > EPSILON {
        Some(d)
    } else {
        None
    }
}

/// Coordinates `(u, v)` of the in-plane offset `p` in the basis `{a, b}`
/// Squared area of the parallelogram spanned by `a` and `b`, computed the
/// way the intersection tests see it. Below `EPSILON` a face is never hit.
pub(crate) fn span_area_squared(a: &Vector, b: &Vector) -> f32 {
    let dot_ab = a.dot(b);
    a.dot(a) * b.dot(b) - dot_ab * dot_ab
}

fn plane_coordinates(a: &Vector, b: &Vector, p: &Vector) -> Option<(f32, f32)> {
    let dot_aa = a.dot(a);
    let dot_ab = a.dot(b);
    let dot_bb = b.dot(b);
    let dot_ap = a.dot(p);
    let dot_bp = b.dot(p);

    let denom = span_area_squared(a, b);
    if denom.abs() < EPSILON {
        return None;
    }

    let u = (dot_bb * dot_ap - dot_ab * dot_bp) / denom;
    let v = (dot_aa * dot_bp - dot_ab * dot_ap) / denom;
    Some((u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;
    use approx::assert_relative_eq;

    fn unit_square() -> Parallelogram {
        Parallelogram::new(
            Vector::new(-0.5, 0.5, 0.0),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, -1.0, 0.0),
            Color::new(1.0, 1.0, 1.0),
        )
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vector::new(0.0, 0.0, 1.0),
            Vector::new(1.0, 0.0, 1.0),
            Vector::new(0.0, 1.0, 1.0),
            Color::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_normalize() {
        let n = normalize(&Vector::new(3.0, 0.0, 4.0));
        assert_relative_eq!(n, Vector::new(0.6, 0.0, 0.8), epsilon = 1e-6);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "zero-length")]
    fn test_normalize_zero_vector_is_rejected_in_debug() {
        normalize(&Vector::zeros());
    }

    #[test]
    fn test_clamp() {
        let c = clamp(&Vector::new(-0.5, 0.5, 1.5), 0.0, 1.0);
        assert_eq!(c, Vector::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_parallelogram_hit() {
        let ray = Ray::new(Vector::new(0.0, 0.0, -2.0), Vector::new(0.0, 0.0, 1.0));
        let hit = unit_square().intersects(&ray).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-6);
        assert_relative_eq!(hit.point, Vector::new(0.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_direction_scale_is_divided_out() {
        let ray = Ray::new(Vector::new(0.0, 0.0, -2.0), Vector::new(0.0, 0.0, 4.0));
        let hit = unit_square().intersects(&ray).unwrap();
        assert!((hit.distance - 0.5).abs() < 1e-6);
        assert_relative_eq!(hit.point, Vector::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_parallelogram_miss_outside() {
        let ray = Ray::new(Vector::new(0.7, 0.0, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert!(unit_square().intersects(&ray).is_none());
    }

    #[test]
    fn test_parallelogram_is_bounded() {
        // one edge length beyond the far corner would be inside a tiling
        let ray = Ray::new(Vector::new(1.0, -1.0, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert!(unit_square().intersects(&ray).is_none());
    }

    #[test]
    fn test_behind_origin_is_not_a_hit() {
        let ray = Ray::new(Vector::new(0.0, 0.0, 2.0), Vector::new(0.0, 0.0, 1.0));
        assert!(unit_square().intersects(&ray).is_none());
        assert!(unit_triangle().intersects(&Ray::new(
            Vector::new(0.2, 0.2, 3.0),
            Vector::new(0.0, 0.0, 1.0)
        ))
        .is_none());
    }

    #[test]
    fn test_parallel_ray_never_hits() {
        let faces: [Face; 2] = [unit_square().into(), unit_triangle().into()];
        let directions = [
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Vector::new(1.0, -1.0, 0.0),
        ];
        for face in &faces {
            for direction in &directions {
                // origins in the plane and off it
                for z in [0.0, 1.0, -3.0] {
                    let ray = Ray::new(Vector::new(0.1, 0.1, z), *direction);
                    assert!(face.intersects(&ray).is_none());
                }
            }
        }
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let triangle = unit_triangle();
        let down = Vector::new(0.0, 0.0, 1.0);

        let hit = triangle.intersects(&Ray::new(Vector::new(0.2, 0.2, 0.0), down)).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert_relative_eq!(hit.point, Vector::new(0.2, 0.2, 1.0), epsilon = 1e-6);

        // inside the bounding square but past the hypotenuse
        assert!(triangle.intersects(&Ray::new(Vector::new(0.7, 0.7, 0.0), down)).is_none());
    }

    #[test]
    fn test_triangle_edges_are_inclusive() {
        let triangle = unit_triangle();
        let down = Vector::new(0.0, 0.0, 1.0);
        assert!(triangle.intersects(&Ray::new(Vector::new(0.5, 0.5, 0.0), down)).is_some());
        assert!(triangle.intersects(&Ray::new(Vector::new(0.0, 0.0, 0.0), down)).is_some());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let triangle = Triangle::new(
            Vector::new(0.0, 0.0, 1.0),
            Vector::new(1.0, 0.0, 1.0),
            Vector::new(2.0, 0.0, 1.0),
            Color::zeros(),
        );
        assert!(triangle.normal().is_none());
        let ray = Ray::new(Vector::new(0.5, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0));
        assert!(triangle.intersects(&ray).is_none());
    }

    #[test]
    fn test_transform_keeps_color_and_source_face() {
        let face: Face = unit_triangle().into();
        let rotated = face.transform(&Transform::rotate_y(1.0));
        assert_eq!(rotated.color(), face.color());
        assert_ne!(rotated, face);
        assert_eq!(face, Face::from(unit_triangle()));
    }

    #[test]
    fn test_transform_round_trip() {
        let m = Transform::rotate(0.7, -1.1, 2.3);
        let inverse = m.transpose();
        let faces: [Face; 2] = [unit_square().into(), unit_triangle().into()];

        for face in &faces {
            assert_eq!(face.transform(&Transform::eye()), *face);

            match (face, face.transform(&m).transform(&inverse)) {
                (Face::Parallelogram(before), Face::Parallelogram(after)) => {
                    assert_relative_eq!(before.point, after.point, epsilon = 1e-5);
                    assert_relative_eq!(before.a, after.a, epsilon = 1e-5);
                    assert_relative_eq!(before.b, after.b, epsilon = 1e-5);
                }
                (Face::Triangle(before), Face::Triangle(after)) => {
                    for (p, q) in before.points.iter().zip(after.points.iter()) {
                        assert_relative_eq!(p, q, epsilon = 1e-5);
                    }
                }
                _ => panic!("transform changed the face kind"),
            }
        }
    }
}
