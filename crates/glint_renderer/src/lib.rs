//! Glint Renderer - CPU Whitted ray tracing.
//!
//! Casts rays from a pinhole camera, shades hits with Phong illumination or
//! spherical textures, follows perfect mirror reflections until their energy
//! runs out, and supersamples pixels for antialiasing.

mod background;
mod bucket;
mod object;
mod renderer;
mod scene;
mod shader;
mod shooter;

pub use background::Background;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use object::{Cuboid, SceneObject, Sphere, BOX_PADDING, MIN_RADIUS};
pub use renderer::{
    trace, RayTracer, RenderConfig, SampleAveraging, DEFAULT_DEPTH, DEFAULT_MIN_ENERGY,
    SURFACE_EPSILON,
};
pub use scene::{Intersection, Scene};
pub use shader::{PhongShader, Shader, SphericalTextureShader};
pub use shooter::RayShooter;

/// Re-export the data types scenes are built from
pub use glint_core::{Camera, Canvas, Color, Component, Dimensions, Light, Material};
pub use glint_math::{Point, Ray, Vec3};
