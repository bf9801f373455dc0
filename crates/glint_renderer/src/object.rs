//! Geometric primitives and the `SceneObject` sum type.
//!
//! Every object owns a shared handle to its shader, a position, and its
//! shape parameters. Intersections only ever report strictly positive
//! distances.

use std::sync::Arc;

use glint_math::{Point, Ray, Vec3};

use crate::Shader;

/// Smallest radius a sphere may have.
pub const MIN_RADIUS: f32 = 0.001;

/// Added to every box extent so hit points never sit exactly on a face.
pub const BOX_PADDING: f32 = 0.001;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    shader: Arc<Shader>,
    center: Point,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Radius is floored at [`MIN_RADIUS`].
    pub fn new(shader: Arc<Shader>, center: Point, radius: f32) -> Self {
        Self {
            shader,
            center,
            radius: radius.max(MIN_RADIUS),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance to the nearest positive root, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let diff = ray.origin - self.center;
        let d = diff.dot(ray.direction);
        let t = d * d - diff.length_squared() + self.radius * self.radius;
        if t < 0.0 {
            return None;
        }

        let root = t.sqrt();
        let near = -d - root;
        let far = -d + root;

        if near > 0.0 {
            Some(near)
        } else if far > 0.0 {
            // Origin is inside the sphere
            Some(far)
        } else {
            None
        }
    }

    /// Outward unit normal at `point`.
    pub fn normal(&self, point: Point) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }
}

/// An axis-aligned box centered on `position`.
#[derive(Debug, Clone)]
pub struct Cuboid {
    shader: Arc<Shader>,
    position: Point,
    /// Padded half-extents per axis
    half: Vec3,
}

impl Cuboid {
    /// Create a new box with full edge lengths `size`.
    ///
    /// Each edge is padded by [`BOX_PADDING`].
    pub fn new(shader: Arc<Shader>, position: Point, size: Vec3) -> Self {
        Self {
            shader,
            position,
            half: (size + Vec3::splat(BOX_PADDING)) * 0.5,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Padded edge lengths.
    pub fn size(&self) -> Vec3 {
        self.half * 2.0
    }

    /// Face test per axis.
    ///
    /// For each axis with a nonzero direction component both face planes are
    /// hit, and a hit counts only if its other two coordinates lie within the
    /// face. The smallest positive distance over all six faces wins.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut nearest: Option<f32> = None;

        for axis in 0..3 {
            let dir = ray.direction[axis];
            if dir == 0.0 {
                continue;
            }

            let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
            for side in [-1.0, 1.0] {
                let plane = self.position[axis] + side * self.half[axis];
                let t = (plane - ray.origin[axis]) / dir;
                if t <= 0.0 {
                    continue;
                }

                let hit = ray.at(t);
                let inside = (hit[a] - self.position[a]).abs() <= self.half[a]
                    && (hit[b] - self.position[b]).abs() <= self.half[b];

                if inside && nearest.map_or(true, |best| t < best) {
                    nearest = Some(t);
                }
            }
        }

        nearest
    }

    /// Normal of the face plane closest to `point`.
    ///
    /// Ties go to the first face in the order +x, -x, +y, -y, +z, -z.
    pub fn normal(&self, point: Point) -> Vec3 {
        let max = self.position + self.half;
        let min = self.position - self.half;
        let faces = [
            (Vec3::X, (point.x - max.x).abs()),
            (Vec3::NEG_X, (point.x - min.x).abs()),
            (Vec3::Y, (point.y - max.y).abs()),
            (Vec3::NEG_Y, (point.y - min.y).abs()),
            (Vec3::Z, (point.z - max.z).abs()),
            (Vec3::NEG_Z, (point.z - min.z).abs()),
        ];

        let mut best = faces[0];
        for face in &faces[1..] {
            if face.1 < best.1 {
                best = *face;
            }
        }
        best.0
    }
}

/// Any object that can sit in a scene.
#[derive(Debug, Clone)]
pub enum SceneObject {
    Sphere(Sphere),
    Box(Cuboid),
}

impl SceneObject {
    /// Build a sphere object.
    pub fn sphere(shader: Arc<Shader>, center: Point, radius: f32) -> Self {
        Self::Sphere(Sphere::new(shader, center, radius))
    }

    /// Build an axis-aligned box object.
    pub fn cuboid(shader: Arc<Shader>, position: Point, size: Vec3) -> Self {
        Self::Box(Cuboid::new(shader, position, size))
    }

    /// Distance along `ray` to this object, strictly positive.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Self::Sphere(sphere) => sphere.intersect(ray),
            Self::Box(cuboid) => cuboid.intersect(ray),
        }
    }

    /// Unit surface normal at `point`.
    pub fn normal(&self, point: Point) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.normal(point),
            Self::Box(cuboid) => cuboid.normal(point),
        }
    }

    pub fn shader(&self) -> &Shader {
        match self {
            Self::Sphere(sphere) => &sphere.shader,
            Self::Box(cuboid) => &cuboid.shader,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(cuboid) => cuboid.position,
        }
    }
}

impl From<Sphere> for SceneObject {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<Cuboid> for SceneObject {
    fn from(cuboid: Cuboid) -> Self {
        Self::Box(cuboid)
    }
}
