//! Camera and light definitions.

use glint_math::{Point, Vec3};
use serde::{Deserialize, Serialize};

use crate::Color;

/// Pinhole camera looking from `eye` towards `look_at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Point,
    pub look_at: Point,
    pub view_up: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    /// Distance from the eye to the view plane
    pub zvp: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(eye: Point, look_at: Point, view_up: Vec3, fov: f32, zvp: f32) -> Self {
        Self {
            eye,
            look_at,
            view_up,
            fov,
            zvp,
        }
    }

    /// Field of view in radians
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 60.0, 1.0)
    }
}

/// Point light with separate ambient, diffuse and specular intensities.
///
/// Full intensity everywhere: there is no distance attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Point,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Light {
    pub fn new(position: Point, ambient: Color, diffuse: Color, specular: Color) -> Self {
        Self {
            position,
            ambient,
            diffuse,
            specular,
        }
    }
}
