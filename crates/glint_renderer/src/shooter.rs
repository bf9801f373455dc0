//! Primary ray generation.

use glint_core::{Camera, Dimensions};
use glint_math::{Point, Ray, Vec3};

/// Turns pixel coordinates into camera rays.
///
/// The camera basis and per-pixel steps are computed once; `direction` then
/// only adds and normalizes.
#[derive(Debug, Clone, Copy)]
pub struct RayShooter {
    eye: Point,
    /// Direction to the center of pixel (0, 0), unnormalized
    base: Vec3,
    /// One pixel to the right on the view plane
    pixel_right: Vec3,
    /// One pixel up on the view plane
    pixel_up: Vec3,
}

impl RayShooter {
    /// Derive the view plane for `camera` rendering at `dimensions`.
    pub fn new(camera: &Camera, dimensions: Dimensions) -> Self {
        let forward = (camera.look_at - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.view_up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        let plane_height = 2.0 * camera.zvp * (camera.fov_radians() / 2.0).tan();
        let plane_width = plane_height * dimensions.aspect_ratio();

        let pixel_right = right * (plane_width / dimensions.width() as f32);
        let pixel_up = up * (plane_height / dimensions.height() as f32);

        // Top-left corner of the plane, then half a pixel in
        let base = forward * camera.zvp - right * (plane_width / 2.0) + up * (plane_height / 2.0)
            + (pixel_right - pixel_up) * 0.5;

        Self {
            eye: camera.eye,
            base,
            pixel_right,
            pixel_up,
        }
    }

    /// Unit direction through pixel coordinates (x, y); y grows downwards.
    pub fn direction(&self, x: f32, y: f32) -> Vec3 {
        (self.base + self.pixel_right * x - self.pixel_up * y).normalize_or_zero()
    }

    /// Full-energy primary ray through (x, y).
    pub fn ray(&self, x: f32, y: f32) -> Ray {
        Ray::new(self.eye, self.direction(x, y))
    }
}
