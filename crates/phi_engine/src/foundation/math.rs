//! Math utilities and types
//!
//! Provides the vector and matrix aliases used by the collision registry and
//! the transform published to the rendering layer.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Translation + non-uniform scale of an axis-aligned box.
///
/// Volumes never rotate, so unlike a general scene transform this carries no
/// rotation; the scale is the box size relative to a unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Transform {
    /// Create a transform for a box of `size` centred on `position`
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Convert to a transformation matrix (translation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Sign of `value` as ±1, keeping `fallback` for zero.
#[inline]
pub fn sign_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_places_unit_cube_corner() {
        let transform = Transform::from_position_scale(Vec3::new(2.0, 3.0, 0.0), Vec3::new(4.0, 1.0, 1.0));
        let corner = transform.to_matrix().transform_point(&nalgebra::Point3::new(0.5, 0.5, 0.5));

        assert_relative_eq!(corner.coords, Vec3::new(4.0, 3.5, 0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_sign_or_keeps_fallback_on_zero() {
        assert_eq!(sign_or(-3.0, 1.0), -1.0);
        assert_eq!(sign_or(0.5, -1.0), 1.0);
        assert_eq!(sign_or(0.0, -1.0), -1.0);
    }
}
