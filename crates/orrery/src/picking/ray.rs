use glam::{DAffine3, DVec3};

/// Half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Nearest `t >= 0` where the ray enters a sphere. A ray starting inside
    /// the sphere hits at its exit point.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }

    /// Hit against a flat annulus lying in the XZ plane of `frame`.
    /// Radii are in the frame's local units.
    pub fn intersect_annulus(&self, frame: &DAffine3, inner: f64, outer: f64) -> Option<f64> {
        let center = frame.translation;
        let normal = frame.transform_vector3(DVec3::Y).normalize_or_zero();
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = (center - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        let local = frame.inverse().transform_point3(self.at(t));
        let r = (local.x * local.x + local.z * local.z).sqrt();
        (r >= inner && r <= outer).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_from_outside() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        let t = ray.intersect_sphere(DVec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-12);
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Z);
        assert!(ray.intersect_sphere(DVec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn sphere_from_inside_hits_exit() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let t = ray.intersect_sphere(DVec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-12);
    }

    #[test]
    fn annulus_hit_only_between_radii() {
        let frame = DAffine3::from_translation(DVec3::new(45.0, 0.0, 0.0));
        let down = |x: f64| Ray::new(DVec3::new(x, 10.0, 0.0), DVec3::NEG_Y);

        let t = down(45.0 + 1.8).intersect_annulus(&frame, 1.5, 2.2).unwrap();
        assert!((t - 10.0).abs() < 1e-9);
        assert!(down(45.0 + 1.0).intersect_annulus(&frame, 1.5, 2.2).is_none());
        assert!(down(45.0 + 3.0).intersect_annulus(&frame, 1.5, 2.2).is_none());
    }

    #[test]
    fn annulus_parallel_ray_misses() {
        let ray = Ray::new(DVec3::new(-10.0, 0.0, 0.0), DVec3::X);
        assert!(ray.intersect_annulus(&DAffine3::IDENTITY, 1.0, 2.0).is_none());
    }
}
