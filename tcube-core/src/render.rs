//! Brute-force ray casting renderer
use log::{debug, trace};

use crate::config::Configuration;
use crate::error::Result;
use crate::geometry::{clamp, Color, Face, Hit, Ray};
use crate::transform::{CumulativeTransform, Matrix};

/// A finished frame: row-major colors, `width * height` of them
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Wrap a pixel buffer. `None` if its length does not match the size.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, both coordinates wrapped into the image
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let x = (x % self.width) as usize;
        let y = (y % self.height) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

/// Casts one ray per pixel against the target's faces
pub struct Renderer {
    config: Configuration,
    faces: Vec<Face>,
}

impl Renderer {
    /// Validate the configuration and build the target's faces
    pub fn new(config: Configuration) -> Result<Self> {
        config.validate()?;
        let faces = config.target.faces()?;
        debug!("{} has {} faces", config.target, faces.len());
        Ok(Self { config, faces })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Render one frame with every face passed through `transform`
    pub fn render_image(&self, transform: &Matrix) -> Image {
        let faces: Vec<Face> = self.faces.iter().map(|f| f.transform(transform)).collect();
        let (width, height) = (self.config.width, self.config.height);

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let ray = self.config.camera.primary_ray(x, y, width, height);
                pixels.push(shade(&faces, &ray));
            }
        }

        trace!("rendered {}x{} frame against {} faces", width, height, faces.len());

        Image {
            width,
            height,
            pixels,
        }
    }

    /// Frames in display order: one in single-shot mode, unbounded when
    /// animating
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            renderer: self,
            transform: CumulativeTransform::new(self.config.transform),
            done: false,
        }
    }
}

/// Iterator over rendered frames, advancing the cumulative transform
pub struct Frames<'a> {
    renderer: &'a Renderer,
    transform: CumulativeTransform,
    done: bool,
}

impl Frames<'_> {
    /// Transform used for the next frame
    pub fn transform(&self) -> &Matrix {
        self.transform.current()
    }
}

impl Iterator for Frames<'_> {
    type Item = Image;

    fn next(&mut self) -> Option<Image> {
        if self.done {
            return None;
        }

        let image = self.renderer.render_image(self.transform.current());
        if self.renderer.config.animate {
            self.transform.advance();
        } else {
            self.done = true;
        }
        Some(image)
    }
}

/// Closest face hit by `ray`, if any
pub fn closest_hit<'a>(faces: &'a [Face], ray: &Ray) -> Option<(&'a Face, Hit)> {
    faces
        .iter()
        .filter_map(|face| face.intersects(ray).map(|hit| (face, hit)))
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

/// Face color dimmed by inverse hit distance, black on a miss.
///
/// Hits closer than one unit saturate after clamping.
fn shade(faces: &[Face], ray: &Ray) -> Color {
    match closest_hit(faces, ray) {
        Some((face, hit)) => clamp(&(face.color() * (1.0 / hit.distance)), 0.0, 1.0),
        None => Color::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use crate::models::Target;
    use crate::projection::Camera;
    use crate::transform::Transform;
    use crate::Error;
    use approx::assert_relative_eq;

    fn cube_config(camera: Vector) -> Configuration {
        Configuration {
            width: 4,
            height: 4,
            camera: Camera::new(camera),
            transform: Transform::eye(),
            target: Target::Cube,
            animate: false,
            ..Configuration::default()
        }
    }

    fn brightness(c: &Color) -> f32 {
        c.x + c.y + c.z
    }

    #[test]
    fn test_single_frame_cube() {
        let renderer = Renderer::new(cube_config(Vector::new(0.0, 0.0, -2.0))).unwrap();
        let frames: Vec<Image> = renderer.frames().collect();
        assert_eq!(frames.len(), 1);

        let image = &frames[0];
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
        assert_eq!(image.pixels().len(), 16);

        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_ne!(image.pixel(x, y), Color::zeros());
        }
        // front face is white, seen from 1.5 units away
        let expected = 1.0 / 1.5;
        let center = image.pixel(2, 2);
        assert!((center.x - expected).abs() < 1e-6);
        assert!((center.y - expected).abs() < 1e-6);
        assert!((center.z - expected).abs() < 1e-6);
        // corner rays pass beside the cube
        assert_eq!(image.pixel(0, 0), Color::zeros());
    }

    #[test]
    fn test_attenuation_is_monotonic() {
        let mut previous = f32::INFINITY;
        for z in [-1.0, -1.5, -2.0, -3.0, -5.0, -10.0] {
            let renderer = Renderer::new(cube_config(Vector::new(0.0, 0.0, z))).unwrap();
            let image = renderer.render_image(&Transform::eye());
            let b = brightness(&image.pixel(2, 2));
            assert!(b > 0.0);
            assert!(b <= previous);
            previous = b;
        }
    }

    #[test]
    fn test_close_hits_saturate() {
        let renderer = Renderer::new(cube_config(Vector::new(0.0, 0.0, -0.75))).unwrap();
        let image = renderer.render_image(&Transform::eye());
        assert_eq!(image.pixel(2, 2), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotation_changes_visible_face() {
        let renderer = Renderer::new(cube_config(Vector::new(0.0, 0.0, -2.0))).unwrap();
        let front = renderer.render_image(&Transform::eye()).pixel(2, 2);
        let turned = renderer
            .render_image(&Transform::rotate_y(std::f32::consts::FRAC_PI_2))
            .pixel(2, 2);
        assert_ne!(front, turned);
        assert_ne!(turned, Color::zeros());
    }

    #[test]
    fn test_faces_are_not_mutated() {
        let renderer = Renderer::new(cube_config(Vector::new(0.0, 0.0, -2.0))).unwrap();
        let before = renderer.faces().to_vec();
        renderer.render_image(&Transform::rotate(0.3, 0.2, 0.1));
        assert_eq!(renderer.faces(), before.as_slice());
    }

    #[test]
    fn test_animated_frames_compose_transform() {
        let base = Transform::rotate_y(0.25);
        let config = Configuration {
            transform: base,
            animate: true,
            ..cube_config(Vector::new(0.0, 0.0, -2.0))
        };
        let renderer = Renderer::new(config).unwrap();

        let mut frames = renderer.frames();
        assert_eq!(*frames.transform(), base);
        let first = frames.next().unwrap();
        assert_relative_eq!(*frames.transform(), base * base, epsilon = 1e-6);
        frames.next().unwrap();
        assert_relative_eq!(*frames.transform(), base * base * base, epsilon = 1e-6);

        // unbounded while animating
        assert_eq!(frames.take(5).count(), 5);
        assert_eq!(first, renderer.render_image(&base));
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = Configuration {
            width: 0,
            ..Configuration::default()
        };
        assert!(matches!(
            Renderer::new(config),
            Err(Error::InvalidDimensions { .. })
        ));

        let config = Configuration {
            target: Target::Sphere {
                radius: 0.5,
                vertical: 4,
                horizontal: 0,
            },
            ..Configuration::default()
        };
        assert!(matches!(Renderer::new(config), Err(Error::InvalidSphere(_))));
    }

    #[test]
    fn test_sphere_and_tetrahedron_render() {
        // (4, 5) is just below center, inside the tetrahedron's front face
        for (target, lit) in [
            (Target::Tetrahedron, (4, 5)),
            (
                Target::Sphere {
                    radius: 0.5,
                    vertical: 4,
                    horizontal: 8,
                },
                (3, 3),
            ),
        ] {
            let config = Configuration {
                width: 8,
                height: 8,
                target,
                ..cube_config(Vector::new(0.0, 0.0, -2.0))
            };
            let image = Renderer::new(config).unwrap().render_image(&Transform::eye());
            assert_ne!(image.pixel(lit.0, lit.1), Color::zeros(), "{target}");
            assert_eq!(image.pixel(0, 0), Color::zeros(), "{target}");
        }
    }

    #[test]
    fn test_tetrahedron_silhouette_narrows_upward() {
        let config = Configuration {
            width: 8,
            height: 8,
            target: Target::Tetrahedron,
            ..cube_config(Vector::new(0.0, 0.0, -2.0))
        };
        let image = Renderer::new(config).unwrap().render_image(&Transform::eye());
        assert_eq!(image.pixel(3, 3), Color::zeros());
        assert_ne!(image.pixel(4, 3), Color::zeros());
    }

    #[test]
    fn test_too_fine_sphere_is_rejected() {
        let config = Configuration {
            target: Target::Sphere {
                radius: 0.5,
                vertical: 64,
                horizontal: 128,
            },
            ..Configuration::default()
        };
        assert!(matches!(Renderer::new(config), Err(Error::InvalidSphere(_))));
    }

    #[test]
    fn test_image_pixel_wraps() {
        let pixels = (0..6).map(|i| Color::new(i as f32, 0.0, 0.0)).collect();
        let image = Image::new(3, 2, pixels).unwrap();
        assert_eq!(image.pixel(1, 1).x, 4.0);
        assert_eq!(image.pixel(4, 1).x, 4.0);
        assert_eq!(image.pixel(1, 3).x, 4.0);
        assert!(Image::new(3, 3, vec![Color::zeros(); 6]).is_none());
    }
}
