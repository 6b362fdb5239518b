//! Orientation of an entity expressed as yaw and pitch in degrees.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Yaw/pitch orientation in degrees. Yaw 0 faces +X, yaw 90 faces +Y.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub fn from_yaw(yaw: f32) -> Self {
        Self { yaw, pitch: 0.0 }
    }

    /// Unit vector pointing along the yaw on the ground plane.
    pub fn forward(&self) -> Vec3 {
        yaw_forward(self.yaw)
    }

    /// Unit vector pointing to the right of the yaw on the ground plane.
    pub fn right(&self) -> Vec3 {
        yaw_right(self.yaw)
    }
}

/// Ground-plane forward vector for a yaw angle in degrees.
pub fn yaw_forward(yaw: f32) -> Vec3 {
    let rad = yaw.to_radians();
    Vec3::new(rad.cos(), rad.sin(), 0.0)
}

/// Ground-plane right vector for a yaw angle in degrees.
pub fn yaw_right(yaw: f32) -> Vec3 {
    yaw_forward(yaw + 90.0)
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn forward_and_right_are_perpendicular() {
        let rot = Rotation::from_yaw(37.0);
        assert!(approx_eq(rot.forward().dot(rot.right()), 0.0));
    }

    #[test]
    fn yaw_zero_faces_positive_x() {
        let f = yaw_forward(0.0);
        assert!(approx_eq(f.x, 1.0));
        assert!(approx_eq(f.y, 0.0));
        let r = yaw_right(0.0);
        assert!(approx_eq(r.y, 1.0));
    }

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert!(approx_eq(normalize_degrees(190.0), -170.0));
        assert!(approx_eq(normalize_degrees(-190.0), 170.0));
        assert!(approx_eq(normalize_degrees(180.0), 180.0));
        assert!(approx_eq(normalize_degrees(720.0), 0.0));
    }
}
