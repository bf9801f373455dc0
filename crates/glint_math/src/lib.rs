// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod ray;
pub use ray::Ray;

/// Positions share the vector type; the alias only documents intent.
pub type Point = Vec3;

/// Mirror `v` about the unit normal `n`: `v - 2(v·n)n`, normalized.
///
/// A zero result (e.g. a zero input) stays zero instead of turning into NaN.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    (v - 2.0 * v.dot(n) * n).normalize_or_zero()
}
