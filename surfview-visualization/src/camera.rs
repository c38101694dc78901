//! Orbit camera for the surface viewer

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Smallest polar angle allowed by [`Camera::orbit`], keeps the view off the poles
const MIN_POLAR: f32 = 1e-3;

/// A perspective camera orbiting a target point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Update the aspect ratio for a viewport; zero sizes are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Rotate the camera around the target.
    ///
    /// `azimuth` turns around the up (Y) axis, `polar` tilts towards or away
    /// from it. Both are in radians. The distance is kept and the polar
    /// angle stays strictly between the poles.
    pub fn orbit(&mut self, azimuth: f32, polar: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return;
        }

        let theta = offset.x.atan2(offset.z) + azimuth;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + polar)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);

        let offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        self.position = self.target + offset;
    }

    /// Scale the distance to the target by `factor`, staying within `[near, far]`
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return;
        }

        let new_radius = (radius * factor).clamp(self.near, self.far);
        self.position = self.target + offset * (new_radius / radius);
    }

    /// Aim at the center of a bounding box, backing off until it fits the view
    pub fn fit_bounds(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        let center = Point3::from((min.coords + max.coords) * 0.5);
        let direction = (self.position - self.target)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0).normalize());

        let radius = (max - min).norm() * 0.5;
        let distance = if radius > 0.0 {
            (radius / (self.fov * 0.5).sin()).clamp(self.near, self.far)
        } else {
            self.distance()
        };

        self.target = center;
        self.position = center + direction * distance;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(150.0, 150.0, 150.0),
            Point3::origin(),
            Vector3::y(),
            10.0_f32.to_radians(),
            16.0 / 9.0,
            1.0,
            4000.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let camera = Camera::default();
        assert_relative_eq!(camera.fov, 10.0_f32.to_radians());
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 4000.0);
        assert_relative_eq!(camera.distance(), 150.0 * 3.0_f32.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = Camera::default();
        let before = camera.distance();

        camera.orbit(0.7, -0.3);
        assert_relative_eq!(camera.distance(), before, epsilon = 1e-3);
        assert_eq!(camera.target, Point3::origin());

        // A full turn comes back to the start
        let start = camera.position;
        camera.orbit(std::f32::consts::TAU, 0.0);
        assert_relative_eq!(camera.position, start, epsilon = 1e-2);
    }

    #[test]
    fn test_orbit_clamps_polar_angle() {
        let mut camera = Camera::default();
        camera.orbit(0.0, -10.0);

        let offset = camera.position - camera.target;
        assert!(offset.y > 0.0);
        assert!(offset.x.abs() + offset.z.abs() > 0.0);
        assert_relative_eq!(offset.y / offset.norm(), MIN_POLAR.cos(), epsilon = 1e-5);
    }

    #[test]
    fn test_zoom() {
        let mut camera = Camera::default();
        let before = camera.distance();

        camera.zoom(0.5);
        assert_relative_eq!(camera.distance(), before * 0.5, epsilon = 1e-3);

        camera.zoom(1e-6);
        assert_relative_eq!(camera.distance(), camera.near, epsilon = 1e-4);

        let at_near = camera.distance();
        camera.zoom(-2.0);
        camera.zoom(f32::NAN);
        assert_eq!(camera.distance(), at_near);
    }

    #[test]
    fn test_fit_bounds() {
        let mut camera = Camera::default();
        camera.fit_bounds(&Point3::new(-1.0, 0.0, -1.0), &Point3::new(3.0, 2.0, 1.0));

        assert_eq!(camera.target, Point3::new(1.0, 1.0, 0.0));
        let radius = 6.0_f32.sqrt();
        assert_relative_eq!(camera.distance(), radius / (camera.fov * 0.5).sin(), epsilon = 1e-2);

        // The viewing direction is unchanged
        let direction = (camera.position - camera.target).normalize();
        assert_relative_eq!(direction, Vector3::new(1.0, 1.0, 1.0).normalize(), epsilon = 1e-5);
    }

    #[test]
    fn test_viewport() {
        let mut camera = Camera::default();
        camera.set_viewport(800, 400);
        assert_eq!(camera.aspect_ratio, 2.0);
        camera.set_viewport(0, 400);
        assert_eq!(camera.aspect_ratio, 2.0);
    }
}
