//! Radiance and reflectance types.
//!
//! `Color` carries radiance on a 0-255 scale and is what the tracer
//! accumulates. `Component` carries 0-1 reflectance coefficients and is what
//! materials are made of. Both clamp on construction, so arithmetic results
//! are always back in range.

use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// Gamma used by [`Color::gamma_corrected`].
pub const GAMMA: f32 = 1.1;

/// Upper bound of a color channel.
const MAX_CHANNEL: f32 = 255.0;

/// Additive RGB radiance, each channel clamped to [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color {
        r: MAX_CHANNEL,
        g: MAX_CHANNEL,
        b: MAX_CHANNEL,
    };

    /// Create a color, clamping each channel to [0, 255].
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_channel(r, MAX_CHANNEL),
            g: clamp_channel(g, MAX_CHANNEL),
            b: clamp_channel(b, MAX_CHANNEL),
        }
    }

    /// Create a gray with all channels set to `value`.
    pub fn gray(value: f32) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn r(&self) -> f32 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> f32 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.b
    }

    /// Mean of this color and `other`.
    pub fn average(self, other: Color) -> Color {
        Color::new(
            (self.r + other.r) * 0.5,
            (self.g + other.g) * 0.5,
            (self.b + other.b) * 0.5,
        )
    }

    /// Arithmetic mean of a set of colors. Black for an empty set.
    pub fn mean(colors: &[Color]) -> Color {
        if colors.is_empty() {
            return Color::BLACK;
        }
        let (r, g, b) = colors
            .iter()
            .fold((0.0, 0.0, 0.0), |(r, g, b), c| (r + c.r, g + c.g, b + c.b));
        let n = colors.len() as f32;
        Color::new(r / n, g / n, b / n)
    }

    /// Apply power-law gamma correction with [`GAMMA`].
    ///
    /// Each channel is normalized to [0, 1], raised to `1 / GAMMA` and scaled
    /// back. Non-positive channels map to 0 so the logarithm is never fed 0.
    pub fn gamma_corrected(self) -> Color {
        Color::new(
            gamma_channel(self.r),
            gamma_channel(self.g),
            gamma_channel(self.b),
        )
    }

    /// Round to 8-bit RGB.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8,
        ]
    }

    /// Build from 8-bit RGB.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32)
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Color::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Color> for [f32; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, factor: f32) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Mul<Component> for Color {
    type Output = Color;

    fn mul(self, component: Component) -> Color {
        Color::new(
            self.r * component.r,
            self.g * component.g,
            self.b * component.b,
        )
    }
}

/// Per-channel reflectance coefficients, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Component {
    r: f32,
    g: f32,
    b: f32,
}

impl Component {
    /// Create a component, clamping each coefficient to [0, 1].
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_channel(r, 1.0),
            g: clamp_channel(g, 1.0),
            b: clamp_channel(b, 1.0),
        }
    }

    /// Same coefficient on all channels.
    pub fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn r(&self) -> f32 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> f32 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.b
    }
}

impl From<[f32; 3]> for Component {
    fn from(rgb: [f32; 3]) -> Self {
        Component::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Component> for [f32; 3] {
    fn from(component: Component) -> Self {
        [component.r, component.g, component.b]
    }
}

/// Phong material: ambient/diffuse/specular response plus shininess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MaterialFields", into = "MaterialFields")]
pub struct Material {
    ambient: Component,
    diffuse: Component,
    specular: Component,
    shininess: f32,
}

impl Material {
    /// Create a material. Shininess below 1 (or NaN) is raised to 1.
    pub fn new(ambient: Component, diffuse: Component, specular: Component, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess: if shininess.is_nan() { 1.0 } else { shininess.max(1.0) },
        }
    }

    #[inline]
    pub fn ambient(&self) -> Component {
        self.ambient
    }

    #[inline]
    pub fn diffuse(&self) -> Component {
        self.diffuse
    }

    #[inline]
    pub fn specular(&self) -> Component {
        self.specular
    }

    /// Specular exponent, at least 1.
    #[inline]
    pub fn shininess(&self) -> f32 {
        self.shininess
    }
}

/// Serialized shape of a [`Material`]; loading goes through `Material::new`.
#[derive(Serialize, Deserialize)]
struct MaterialFields {
    ambient: Component,
    diffuse: Component,
    specular: Component,
    shininess: f32,
}

impl From<MaterialFields> for Material {
    fn from(fields: MaterialFields) -> Self {
        Material::new(fields.ambient, fields.diffuse, fields.specular, fields.shininess)
    }
}

impl From<Material> for MaterialFields {
    fn from(material: Material) -> Self {
        Self {
            ambient: material.ambient,
            diffuse: material.diffuse,
            specular: material.specular,
            shininess: material.shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(
            Component::splat(0.2),
            Component::splat(0.7),
            Component::splat(0.5),
            20.0,
        )
    }
}

/// Clamp to [0, max]; NaN collapses to 0.
#[inline]
fn clamp_channel(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

#[inline]
fn gamma_channel(value: f32) -> f32 {
    let normalized = value / MAX_CHANNEL;
    if normalized <= 0.0 {
        return 0.0;
    }
    (normalized.ln() / GAMMA).exp() * MAX_CHANNEL
}
