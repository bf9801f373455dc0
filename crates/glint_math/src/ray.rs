use crate::Vec3;

/// A ray in 3D space with origin, direction, and residual energy.
///
/// `energy` tracks how much the ray still contributes to the pixel it came
/// from. Primary rays start at 1.0 and every reflection multiplies it by the
/// surface's reflection coefficient.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Expected to be unit length; callers normalize.
    pub direction: Vec3,
    pub energy: f32,
}

impl Ray {
    /// Create a primary ray with full energy.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_energy(origin, direction, 1.0)
    }

    /// Create a ray carrying the given residual energy.
    pub fn with_energy(origin: Vec3, direction: Vec3, energy: f32) -> Self {
        Self {
            origin,
            direction,
            energy,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the residual energy of the ray.
    #[inline]
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert_eq!(ray.energy, 1.0);
    }

    #[test]
    fn test_ray_with_energy() {
        let ray = Ray::with_energy(Vec3::ZERO, Vec3::X, 0.25);
        assert_eq!(ray.energy(), 0.25);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert_eq!(ray.direction(), Vec3::X);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }
}
