//! Pixel buffer the tracer renders into and textures are sampled from.
//!
//! A `Canvas` is a fixed-size, row-major grid of [`Color`]s. Coordinates are
//! fractional and floored on access; reads outside the grid return black and
//! writes outside it are dropped.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::path::Path;

use glint_math::Vec3;
use image::{DynamicImage, Rgb, RgbImage};

use crate::{Color, Error, Result};

/// Positive image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Validate and build dimensions. Both sides must be positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Returns true if (x, y) lies inside [0, width) x [0, height).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }
}

/// Width x height grid of colors, created black.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    dimensions: Dimensions,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with black.
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            pixels: vec![Color::BLACK; dimensions.pixel_count()],
        }
    }

    /// Copy an external raster image into a canvas.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::EmptyImage { width, height });
        }

        let dimensions = Dimensions { width, height };
        let pixels = rgb.pixels().map(|p| Color::from_rgb8(p.0)).collect();

        Ok(Self { dimensions, pixels })
    }

    /// Load and decode an image file into a canvas.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)?;
        let canvas = Self::from_image(&image)?;

        log::debug!(
            "Loaded canvas: {} ({}x{})",
            path.display(),
            canvas.width(),
            canvas.height()
        );

        Ok(canvas)
    }

    /// Convert to an 8-bit RGB image for display or saving.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            Rgb(self.pixels[self.offset(x, y)].to_rgb8())
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Get the color at (x, y), black when out of bounds.
    pub fn get(&self, x: f32, y: f32) -> Color {
        self.index(x, y)
            .map(|i| self.pixels[i])
            .unwrap_or(Color::BLACK)
    }

    /// Set the color at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: f32, y: f32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Equirectangular lookup: the pixel a direction points at when the
    /// canvas is wrapped around the viewer as a sphere.
    ///
    /// Longitude `atan2(x, z)` spans the width, latitude spans the height
    /// with +Y at the top row. A zero direction reads black.
    pub fn color_for_direction(&self, direction: Vec3) -> Color {
        let norm = direction.length();
        if norm == 0.0 {
            return Color::BLACK;
        }

        let theta = direction.x.atan2(direction.z);
        let phi = -FRAC_PI_2 + (direction.y / norm).clamp(-1.0, 1.0).acos();

        let u = (theta + PI) / TAU;
        let v = (phi + FRAC_PI_2) / PI;

        let x = (u * self.width() as f32).min(self.width() as f32 - 1.0);
        let y = (v * self.height() as f32).min(self.height() as f32 - 1.0);
        self.get(x, y)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.dimensions.width as usize + x as usize
    }

    fn index(&self, x: f32, y: f32) -> Option<usize> {
        let (x, y) = (x.floor(), y.floor());
        if !self.dimensions.contains(x, y) {
            return None;
        }
        Some(self.offset(x as u32, y as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: i32, h: i32) -> Dimensions {
        Dimensions::new(w, h).unwrap()
    }

    #[test]
    fn test_dimensions_validation() {
        assert!(Dimensions::new(10, 5).is_ok());
        assert!(matches!(
            Dimensions::new(0, 5),
            Err(Error::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(Dimensions::new(10, -1).is_err());
    }

    #[test]
    fn test_dimensions_contains() {
        let d = dims(4, 3);
        assert!(d.contains(0.0, 0.0));
        assert!(d.contains(3.9, 2.9));
        assert!(!d.contains(4.0, 0.0));
        assert!(!d.contains(0.0, 3.0));
        assert!(!d.contains(-0.1, 1.0));
        assert_eq!(d.pixel_count(), 12);
    }

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = Canvas::new(dims(3, 2));
        assert!(canvas.pixels().iter().all(|c| *c == Color::BLACK));
        assert_eq!(canvas.pixels().len(), 6);
    }

    #[test]
    fn test_get_set_floors_coordinates() {
        let mut canvas = Canvas::new(dims(3, 3));
        let red = Color::new(255.0, 0.0, 0.0);
        canvas.set(1.7, 2.2, red);

        assert_eq!(canvas.get(1.0, 2.0), red);
        assert_eq!(canvas.get(1.99, 2.99), red);
        assert_eq!(canvas.get(2.0, 2.0), Color::BLACK);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut canvas = Canvas::new(dims(2, 2));
        canvas.set(2.0, 0.0, Color::WHITE);
        canvas.set(0.0, -0.5, Color::WHITE);
        assert!(canvas.pixels().iter().all(|c| *c == Color::BLACK));

        assert_eq!(canvas.get(5.0, 5.0), Color::BLACK);
        assert_eq!(canvas.get(-1.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_image_conversion() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([10, 20, 30]));
        let canvas = Canvas::from_image(&DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(canvas.width(), 2);
        assert_eq!(canvas.get(1.0, 0.0), Color::new(10.0, 20.0, 30.0));
        assert_eq!(canvas.to_rgb_image().get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 4));
        assert!(matches!(Canvas::from_image(&img), Err(Error::EmptyImage { .. })));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(Canvas::open("/nonexistent/glint/texture.png").is_err());
    }

    #[test]
    fn test_color_for_direction() {
        // 4x2 canvas: top row red, bottom row blue
        let mut canvas = Canvas::new(dims(4, 2));
        let red = Color::new(255.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 255.0);
        for x in 0..4 {
            canvas.set(x as f32, 0.0, red);
            canvas.set(x as f32, 1.0, blue);
        }

        assert_eq!(canvas.color_for_direction(Vec3::new(0.1, 1.0, 0.3)), red);
        assert_eq!(canvas.color_for_direction(Vec3::new(0.1, -1.0, 0.3)), blue);
        // Straight up still lands inside the buffer
        assert_eq!(canvas.color_for_direction(Vec3::Y), red);
        assert_eq!(canvas.color_for_direction(Vec3::ZERO), Color::BLACK);
    }

    #[test]
    fn test_color_for_direction_longitude() {
        // 4x1 canvas with a distinct color per column
        let mut canvas = Canvas::new(dims(4, 1));
        for x in 0..4 {
            canvas.set(x as f32, 0.0, Color::gray(x as f32 * 10.0));
        }

        // theta = atan2(x, z): +z is theta 0 -> u 0.5 -> column 2
        assert_eq!(canvas.color_for_direction(Vec3::Z), Color::gray(20.0));
        // Just past -x: theta a bit above -pi/2 -> column 1
        assert_eq!(canvas.color_for_direction(Vec3::new(-1.0, 0.0, 0.1)), Color::gray(10.0));
        // Just past +x: theta a bit above pi/2 -> column 3
        assert_eq!(canvas.color_for_direction(Vec3::new(1.0, 0.0, -0.1)), Color::gray(30.0));
    }
}
