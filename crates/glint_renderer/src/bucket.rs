//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use glint_core::Color;

use crate::RayTracer;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket's middle to `point`.
    fn distance_sq_to(&self, point: (f32, f32)) -> f32 {
        let mid_x = self.x as f32 + self.width as f32 / 2.0;
        let mid_y = self.y as f32 + self.height as f32 / 2.0;
        (mid_x - point.0).powi(2) + (mid_y - point.1).powi(2)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile a `width` x `height` image into buckets, nearest to the center first.
///
/// Edge buckets are clipped to the image. Buckets never overlap, so they can
/// be written back without locking.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width)
                .step_by(size as usize)
                .map(move |x| Bucket::new(x, y, size.min(width - x), size.min(height - y), 0))
        })
        .collect();

    let center = (width as f32 / 2.0, height as f32 / 2.0);
    // Stable sort keeps row-major order among equally distant buckets
    buckets.sort_by(|a, b| a.distance_sq_to(center).total_cmp(&b.distance_sq_to(center)));

    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }
    buckets
}

/// Render a single bucket.
///
/// Returns gamma-corrected pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, tracer: &RayTracer<'_>) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(tracer.render_pixel(bucket.x + local_x, bucket.y + local_y));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Absolute image coordinates paired with their colors.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let bucket = self.bucket;
        self.pixels.iter().enumerate().map(move |(i, color)| {
            let i = i as u32;
            (bucket.x + i % bucket.width, bucket.y + i / bucket.width, *color)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 30, 64);
        assert_eq!(buckets.len(), 2);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 30);
    }

    #[test]
    fn test_zero_bucket_size_is_floored() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert_eq!(first.index, 0);
    }

    #[test]
    fn test_order_moves_outwards() {
        let (width, height) = (300, 140);
        let center = (width as f32 / 2.0, height as f32 / 2.0);
        let buckets = generate_buckets(width, height, 32);

        for pair in buckets.windows(2) {
            assert!(pair[0].distance_sq_to(center) <= pair[1].distance_sq_to(center));
        }
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_buckets_cover_each_pixel_once() {
        let (width, height) = (37, 23);
        let mut seen = vec![0u8; (width * height) as usize];
        for bucket in generate_buckets(width, height, 8) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    seen[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_bucket_result_coordinates() {
        let bucket = Bucket::new(10, 20, 2, 2, 0);
        let result = BucketResult::new(bucket, vec![Color::gray(1.0); 4]);
        let coords: Vec<(u32, u32)> = result.iter_pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(10, 20), (11, 20), (10, 21), (11, 21)]);
    }
}
