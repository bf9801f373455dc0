//! Scene container and nearest-hit queries.

use glint_core::{Camera, Light};
use glint_math::Ray;

use crate::{Background, SceneObject};

/// Nearest hit of a ray: which object, and how far along the ray.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub object: &'a SceneObject,
    pub distance: f32,
}

/// Everything a render needs: background, camera, objects and lights.
///
/// Objects and lights keep insertion order; it decides ties.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    background: Background,
    camera: Camera,
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(camera: Camera, background: Background) -> Self {
        Self {
            background,
            camera,
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: impl Into<SceneObject>) {
        self.objects.push(object.into());
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder form of [`Scene::add_object`].
    pub fn with_object(mut self, object: impl Into<SceneObject>) -> Self {
        self.add_object(object);
        self
    }

    /// Builder form of [`Scene::add_light`].
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Closest object hit at a strictly positive distance.
    ///
    /// On equal distances the object added first wins.
    pub fn nearest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let mut nearest: Option<Intersection<'_>> = None;

        for object in &self.objects {
            let Some(distance) = object.intersect(ray) else {
                continue;
            };
            if distance <= 0.0 {
                continue;
            }
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(Intersection { object, distance });
            }
        }

        nearest
    }

    /// Returns true if the ray hits any object, however far away.
    pub fn is_occluded(&self, ray: &Ray) -> bool {
        self.objects.iter().any(|object| object.intersect(ray).is_some())
    }
}
