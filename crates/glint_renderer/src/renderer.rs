//! Core Whitted ray tracer.
//!
//! Implements:
//! - Recursive mirror reflection bounded by depth and residual energy
//! - Phong/texture local shading via each object's shader
//! - 16-sample supersampling with progressive averaging
//! - Gamma correction on write

use std::time::Instant;

use glint_core::{Canvas, Color, Dimensions};
use glint_math::{reflect, Ray};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{RayShooter, Scene};

/// Default maximum recursion depth.
pub const DEFAULT_DEPTH: u32 = 5;

/// Rays at or below this energy are not traced further.
pub const DEFAULT_MIN_ENERGY: f32 = 0.001;

/// Hit points are lifted this far along the normal before spawning rays.
pub const SURFACE_EPSILON: f32 = 0.001;

/// Sub-pixel offsets on each axis when antialiasing.
const SAMPLE_OFFSETS: [f32; 4] = [-0.75, -0.25, 0.25, 0.75];

/// How antialiasing samples are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleAveraging {
    /// Each sample is averaged with the running result, so later samples
    /// weigh more. Matches the reference renderer's output.
    #[default]
    Progressive,
    /// Plain arithmetic mean.
    Mean,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 16 samples per pixel when true, one when false
    pub antialiasing: bool,
    /// Maximum recursion depth, at least 1
    pub depth: u32,
    /// Energy at or below which rays fall back to the background
    pub min_energy: f32,
    pub averaging: SampleAveraging,
    /// Edge length of render buckets in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialiasing: true,
            depth: DEFAULT_DEPTH,
            min_energy: DEFAULT_MIN_ENERGY,
            averaging: SampleAveraging::Progressive,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Renders a scene into a canvas.
///
/// The scene is only read, so one tracer can be shared across threads.
pub struct RayTracer<'a> {
    scene: &'a Scene,
    dimensions: Dimensions,
    shooter: RayShooter,
    config: RenderConfig,
}

impl<'a> RayTracer<'a> {
    /// Set up a tracer. A depth of 0 is raised to 1.
    pub fn new(scene: &'a Scene, dimensions: Dimensions, mut config: RenderConfig) -> Self {
        if config.depth < 1 {
            log::warn!("Render depth {} raised to 1", config.depth);
            config.depth = 1;
        }

        Self {
            scene,
            dimensions,
            shooter: RayShooter::new(scene.camera(), dimensions),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Render every pixel, buckets in parallel.
    pub fn render(&self) -> Canvas {
        let buckets = generate_buckets(
            self.dimensions.width(),
            self.dimensions.height(),
            self.config.bucket_size,
        );

        log::info!(
            "Rendering {}x{} (antialiasing: {}, depth: {}, {} buckets)",
            self.dimensions.width(),
            self.dimensions.height(),
            self.config.antialiasing,
            self.config.depth,
            buckets.len()
        );
        let start = Instant::now();

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let result = render_bucket(bucket, self);
                log::debug!(
                    "Bucket {} done ({}x{} at {},{})",
                    bucket.index,
                    bucket.width,
                    bucket.height,
                    bucket.x,
                    bucket.y
                );
                result
            })
            .collect();

        let mut canvas = Canvas::new(self.dimensions);
        for result in &results {
            for (x, y, color) in result.iter_pixels() {
                canvas.set(x as f32, y as f32, color);
            }
        }

        log::info!("Rendered in {:?}", start.elapsed());
        canvas
    }

    /// Final, gamma-corrected color of pixel (x, y).
    pub fn render_pixel(&self, x: u32, y: u32) -> Color {
        let (x, y) = (x as f32, y as f32);

        let color = if self.config.antialiasing {
            self.supersample(x, y)
        } else {
            self.trace_ray(&self.shooter.ray(x, y), 0)
        };

        color.gamma_corrected()
    }

    /// Trace the 4x4 sub-pixel grid around (x, y) and combine the samples.
    fn supersample(&self, x: f32, y: f32) -> Color {
        let samples = SAMPLE_OFFSETS.iter().flat_map(|&dy| {
            SAMPLE_OFFSETS
                .iter()
                .map(move |&dx| self.trace_ray(&self.shooter.ray(x + dx, y + dy), 0))
        });

        match self.config.averaging {
            SampleAveraging::Progressive => progressive_average(samples),
            SampleAveraging::Mean => Color::mean(&samples.collect::<Vec<_>>()),
        }
    }

    /// Color seen along `ray`, `step` reflections deep.
    ///
    /// Rays past the depth limit, out of energy, or hitting nothing return
    /// the background. Otherwise the local shading and the mirror
    /// reflection are added, each weighted by its own ray's energy.
    pub fn trace_ray(&self, ray: &Ray, step: u32) -> Color {
        let background = self.scene.background();

        if step >= self.config.depth || ray.energy <= self.config.min_energy {
            return background.color(ray);
        }

        let Some(hit) = self.scene.nearest_intersection(ray) else {
            return background.color(ray);
        };

        let surface = ray.at(hit.distance);
        let normal = hit.object.normal(surface);
        let point = surface + normal * SURFACE_EPSILON;
        let mirror = reflect(ray.direction, normal);

        let shader = hit.object.shader();
        let local = shader.color(self.scene, normal, mirror, point);

        let reflected_ray = Ray::with_energy(point, mirror, ray.energy * shader.reflection());
        let reflected = self.trace_ray(&reflected_ray, step + 1);

        local * ray.energy + reflected * reflected_ray.energy
    }
}

/// Fold samples by averaging each one into the running result.
///
/// The first sample seeds the result. Black when there are no samples.
fn progressive_average(samples: impl IntoIterator<Item = Color>) -> Color {
    samples
        .into_iter()
        .reduce(|acc, sample| acc.average(sample))
        .unwrap_or(Color::BLACK)
}

/// Render `scene` at `dimensions` with default settings otherwise.
pub fn trace(scene: &Scene, dimensions: Dimensions, antialiasing: bool, depth: u32) -> Canvas {
    let config = RenderConfig {
        antialiasing,
        depth,
        ..RenderConfig::default()
    };
    RayTracer::new(scene, dimensions, config).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Background, PhongShader, SceneObject, Shader};
    use glint_core::{Camera, Component, Light, Material};
    use glint_math::Vec3;
    use std::sync::Arc;

    fn mirror_scene(reflection: f32) -> Scene {
        let material = Material::new(
            Component::splat(0.2),
            Component::splat(0.6),
            Component::splat(0.0),
            1.0,
        );
        let shader = Arc::new(Shader::from(PhongShader::new(material, reflection, 0.0)));

        Scene::new(Camera::default(), Background::Color(Color::gray(200.0)))
            .with_object(SceneObject::sphere(shader, Vec3::ZERO, 1.0))
            .with_light(Light::new(
                Vec3::new(0.0, 0.0, 10.0),
                Color::gray(50.0),
                Color::gray(100.0),
                Color::BLACK,
            ))
    }

    fn tracer(scene: &Scene, config: RenderConfig) -> RayTracer<'_> {
        RayTracer::new(scene, Dimensions::new(8, 8).unwrap(), config)
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert!(config.antialiasing);
        assert_eq!(config.depth, 5);
        assert_eq!(config.min_energy, 0.001);
        assert_eq!(config.averaging, SampleAveraging::Progressive);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = RenderConfig::from_json(r#"{ "antialiasing": false, "averaging": "mean" }"#).unwrap();
        assert!(!config.antialiasing);
        assert_eq!(config.averaging, SampleAveraging::Mean);
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);

        assert!(RenderConfig::from_json("{ \"depth\": -1 }").is_err());
    }

    #[test]
    fn test_depth_floored_to_one() {
        let scene = mirror_scene(0.0);
        let config = RenderConfig { depth: 0, ..RenderConfig::default() };
        assert_eq!(tracer(&scene, config).config().depth, 1);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = mirror_scene(0.0);
        let tracer = tracer(&scene, RenderConfig::default());

        let ray = Ray::with_energy(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, 0.5);
        assert_eq!(tracer.trace_ray(&ray, 0), Color::gray(100.0));
    }

    #[test]
    fn test_hit_shades_locally() {
        let scene = mirror_scene(0.0);
        let tracer = tracer(&scene, RenderConfig::default());

        // Head-on hit: ambient 50*0.2 + diffuse 100*0.6, reflection adds nothing
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let color = tracer.trace_ray(&ray, 0);
        assert!((color.r() - 70.0).abs() < 1e-2, "got {}", color.r());
    }

    #[test]
    fn test_reflection_is_additive() {
        let scene = mirror_scene(0.5);
        let tracer = tracer(&scene, RenderConfig::default());

        // Mirror ray goes straight back into the background:
        // 70 * 1.0 + (200 * 0.5) * 0.5
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let color = tracer.trace_ray(&ray, 0);
        assert!((color.r() - 120.0).abs() < 1e-2, "got {}", color.r());
    }

    #[test]
    fn test_low_energy_skips_scene() {
        let scene = mirror_scene(0.0);
        let tracer = tracer(&scene, RenderConfig::default());

        let ray = Ray::with_energy(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, 0.0005);
        assert_eq!(tracer.trace_ray(&ray, 0), Color::gray(200.0) * 0.0005);
    }

    #[test]
    fn test_depth_limit_skips_scene() {
        let scene = mirror_scene(0.0);
        let tracer = tracer(&scene, RenderConfig::default());

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(tracer.trace_ray(&ray, DEFAULT_DEPTH), Color::gray(200.0));
        assert_ne!(tracer.trace_ray(&ray, DEFAULT_DEPTH - 1), Color::gray(200.0));
    }

    #[test]
    fn test_progressive_average_weights_later_samples() {
        let samples = [Color::gray(0.0), Color::gray(0.0), Color::gray(80.0)];
        assert_eq!(progressive_average(samples), Color::gray(40.0));
        assert!((Color::mean(&samples).r() - 26.666).abs() < 1e-2);

        let reversed = [Color::gray(80.0), Color::gray(0.0), Color::gray(0.0)];
        assert_eq!(progressive_average(reversed), Color::gray(20.0));

        assert_eq!(progressive_average([]), Color::BLACK);
    }

    #[test]
    fn test_render_pixel_is_gamma_corrected() {
        let scene = Scene::new(Camera::default(), Background::Color(Color::gray(100.0)));
        let config = RenderConfig { antialiasing: false, ..RenderConfig::default() };
        let tracer = tracer(&scene, config);

        assert_eq!(tracer.render_pixel(3, 3), Color::gray(100.0).gamma_corrected());
    }

    #[test]
    fn test_uniform_background_same_for_both_averagings() {
        let scene = Scene::new(Camera::default(), Background::Color(Color::gray(64.0)));
        let progressive = tracer(&scene, RenderConfig::default()).render_pixel(2, 2);
        let mean = tracer(
            &scene,
            RenderConfig { averaging: SampleAveraging::Mean, ..RenderConfig::default() },
        )
        .render_pixel(2, 2);

        assert!((progressive.r() - mean.r()).abs() < 1e-3);
    }
}
