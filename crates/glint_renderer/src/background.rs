//! What a ray sees when it leaves the scene.

use std::sync::Arc;

use glint_core::{Canvas, Color};
use glint_math::Ray;

/// Color source at infinite distance.
#[derive(Debug, Clone)]
pub enum Background {
    /// One color in every direction
    Color(Color),
    /// Equirectangular environment map
    Canvas(Arc<Canvas>),
}

impl Background {
    /// Background color seen by `ray`, scaled by its residual energy.
    pub fn color(&self, ray: &Ray) -> Color {
        let color = match self {
            Self::Color(color) => *color,
            Self::Canvas(canvas) => canvas.color_for_direction(ray.direction),
        };
        color * ray.energy
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Color::BLACK)
    }
}
