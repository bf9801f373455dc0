//! Surface shaders.
//!
//! A shader decides what color a surface shows at a hit point and how much
//! of the incoming ray continues as a reflection.

use std::sync::Arc;

use glint_core::{Canvas, Color, Material};
use glint_math::{Point, Ray, Vec3};

use crate::Scene;

/// Phong local illumination with hard shadows.
#[derive(Debug, Clone)]
pub struct PhongShader {
    material: Material,
    reflection: f32,
    transparency: f32,
}

impl PhongShader {
    /// Create a new Phong shader.
    ///
    /// - `reflection`: share of energy passed to the mirror ray, clamped to [0, 1]
    /// - `transparency`: clamped to [0, 1]; carried but not used when tracing
    pub fn new(material: Material, reflection: f32, transparency: f32) -> Self {
        Self {
            material,
            reflection: clamp_unit(reflection),
            transparency: clamp_unit(transparency),
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Sum of every light's contribution at `point`.
    ///
    /// Ambient light always counts. Diffuse and specular terms are skipped
    /// for a light when the shadow ray towards it hits any object at all,
    /// even one beyond the light.
    pub fn color(&self, scene: &Scene, normal: Vec3, reflection: Vec3, point: Point) -> Color {
        let m = &self.material;
        let mut color = Color::BLACK;

        for light in scene.lights() {
            color += light.ambient * m.ambient();

            let to_light = (light.position - point).normalize_or_zero();
            if scene.is_occluded(&Ray::new(point, to_light)) {
                continue;
            }

            let diffuse = normal.dot(to_light);
            if diffuse > 0.0 {
                color += light.diffuse * m.diffuse() * diffuse;
            }

            let alignment = reflection.dot(to_light);
            if alignment > 0.0 {
                let specular = alignment.powf(m.shininess());
                if specular > 0.0 {
                    color += light.specular * m.specular() * specular;
                }
            }
        }

        color
    }
}

/// Projects a canvas onto the surface, indexed by surface normal.
///
/// Typically the canvas is an earlier render, which lets one image texture
/// objects in the next.
#[derive(Debug, Clone)]
pub struct SphericalTextureShader {
    texture: Arc<Canvas>,
    reflection: f32,
    transparency: f32,
}

impl SphericalTextureShader {
    pub fn new(texture: Arc<Canvas>, reflection: f32, transparency: f32) -> Self {
        Self {
            texture,
            reflection: clamp_unit(reflection),
            transparency: clamp_unit(transparency),
        }
    }

    pub fn texture(&self) -> &Canvas {
        &self.texture
    }

    /// Texture color in the direction of `normal`.
    pub fn color(&self, normal: Vec3) -> Color {
        self.texture.color_for_direction(normal)
    }
}

/// Any surface shader.
#[derive(Debug, Clone)]
pub enum Shader {
    Phong(PhongShader),
    SphericalTexture(SphericalTextureShader),
}

impl Shader {
    /// Share of the ray's energy carried into the reflected ray.
    pub fn reflection(&self) -> f32 {
        match self {
            Self::Phong(shader) => shader.reflection,
            Self::SphericalTexture(shader) => shader.reflection,
        }
    }

    /// Transparency coefficient. Refraction is not traced, so this is
    /// informational only.
    pub fn transparency(&self) -> f32 {
        match self {
            Self::Phong(shader) => shader.transparency,
            Self::SphericalTexture(shader) => shader.transparency,
        }
    }

    /// Local color at a hit point.
    ///
    /// `point` is expected to be already lifted off the surface.
    pub fn color(&self, scene: &Scene, normal: Vec3, reflection: Vec3, point: Point) -> Color {
        match self {
            Self::Phong(shader) => shader.color(scene, normal, reflection, point),
            Self::SphericalTexture(shader) => shader.color(normal),
        }
    }
}

impl From<PhongShader> for Shader {
    fn from(shader: PhongShader) -> Self {
        Self::Phong(shader)
    }
}

impl From<SphericalTextureShader> for Shader {
    fn from(shader: SphericalTextureShader) -> Self {
        Self::SphericalTexture(shader)
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
