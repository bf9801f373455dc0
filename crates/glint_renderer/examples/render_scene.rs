//! Whitted ray tracer example.
//!
//! Renders spheres and boxes over a checkered floor, saves the result as a
//! PNG, then renders again with the first image as both an environment map
//! and a sphere texture.
//!
//! Run with `RUST_LOG=info cargo run --example render_scene [config.json]`.

use std::sync::Arc;

use anyhow::Result;
use glint_renderer::{
    Background, Camera, Canvas, Color, Component, Dimensions, Light, Material, PhongShader,
    RayTracer, RenderConfig, Scene, SceneObject, Shader, SphericalTextureShader, Vec3,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RenderConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => RenderConfig::default(),
    };
    let dimensions = Dimensions::new(640, 360)?;

    // First pass: lit primitives on a solid background
    let scene = build_scene(Background::Color(Color::new(20.0, 30.0, 60.0)), None);
    let first = RayTracer::new(&scene, dimensions, config.clone()).render();
    first.to_rgb_image().save("glint_first.png")?;
    log::info!("Saved glint_first.png");

    // Second pass: reuse the first render as environment and texture
    let first = Arc::new(first);
    let scene = build_scene(Background::Canvas(first.clone()), Some(first));
    let second = RayTracer::new(&scene, dimensions, config).render();
    second.to_rgb_image().save("glint_second.png")?;
    log::info!("Saved glint_second.png");

    Ok(())
}

fn build_scene(background: Background, texture: Option<Arc<Canvas>>) -> Scene {
    let camera = Camera::new(
        Vec3::new(0.0, 2.0, 8.0), // eye
        Vec3::new(0.0, 0.5, 0.0), // look_at
        Vec3::Y,                  // view_up
        50.0,
        1.0,
    );

    let mut scene = Scene::new(camera, background);

    let red = shader(Component::new(0.9, 0.15, 0.1), 0.2);
    let mirror = shader(Component::splat(0.1), 0.8);
    let floor_a = shader(Component::splat(0.8), 0.1);
    let floor_b = shader(Component::splat(0.25), 0.1);

    // Checkered floor made of flat boxes
    for i in -4..4 {
        for j in -6..2 {
            let tile = if (i + j) % 2 == 0 { &floor_a } else { &floor_b };
            scene.add_object(SceneObject::cuboid(
                tile.clone(),
                Vec3::new(i as f32 + 0.5, -1.0, j as f32 + 0.5),
                Vec3::new(1.0, 0.2, 1.0),
            ));
        }
    }

    scene.add_object(SceneObject::sphere(red, Vec3::new(-1.6, 0.1, -0.5), 1.0));
    scene.add_object(SceneObject::sphere(mirror.clone(), Vec3::new(1.5, 0.3, -1.5), 1.2));
    scene.add_object(SceneObject::cuboid(
        mirror,
        Vec3::new(0.2, -0.4, 1.2),
        Vec3::new(0.8, 0.8, 0.8),
    ));

    if let Some(texture) = texture {
        let textured: Arc<Shader> = Arc::new(SphericalTextureShader::new(texture, 0.1, 0.0).into());
        scene.add_object(SceneObject::sphere(textured, Vec3::new(0.0, 1.6, -3.0), 0.9));
    }

    scene.add_light(Light::new(
        Vec3::new(-4.0, 6.0, 6.0),
        Color::gray(30.0),
        Color::gray(220.0),
        Color::gray(255.0),
    ));
    scene.add_light(Light::new(
        Vec3::new(5.0, 4.0, 2.0),
        Color::gray(10.0),
        Color::new(90.0, 90.0, 140.0),
        Color::gray(120.0),
    ));

    log::info!(
        "Scene has {} objects and {} lights",
        scene.objects().len(),
        scene.lights().len()
    );
    scene
}

fn shader(diffuse: Component, reflection: f32) -> Arc<Shader> {
    let material = Material::new(Component::splat(0.15), diffuse, Component::splat(0.6), 40.0);
    Arc::new(PhongShader::new(material, reflection, 0.0).into())
}
