// modubil_sim/src/simulation/core/convert.rs

//! Conversions between Bevy's `f32` glam types and the `f64` nalgebra types
//! used by `modubil_core`. Both sides are Y-up and right-handed, so no axis
//! swaps are needed.

use bevy::prelude::{GlobalTransform, Transform, Vec3};
use modubil_core::prelude::WheelFrame;
use nalgebra::{Isometry3, Point3, Quaternion, Translation3, Unit, UnitQuaternion, Vector3};

pub fn vec3_to_vector(v: Vec3) -> Vector3<f64> {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}

pub fn vec3_to_point(v: Vec3) -> Point3<f64> {
    Point3::new(v.x as f64, v.y as f64, v.z as f64)
}

pub fn vector_to_vec3(v: &Vector3<f64>) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

pub fn point_to_vec3(p: &Point3<f64>) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Converts a Bevy `Transform` into a `nalgebra::Isometry3<f64>`. Scale is dropped.
pub fn bevy_transform_to_nalgebra_isometry(transform: &Transform) -> Isometry3<f64> {
    let t = transform.translation;
    let r = transform.rotation;
    Isometry3::from_parts(
        Translation3::new(t.x as f64, t.y as f64, t.z as f64),
        UnitQuaternion::from_quaternion(Quaternion::new(
            r.w as f64, r.x as f64, r.y as f64, r.z as f64,
        )),
    )
}

pub fn bevy_global_transform_to_nalgebra_isometry(transform: &GlobalTransform) -> Isometry3<f64> {
    bevy_transform_to_nalgebra_isometry(&transform.compute_transform())
}

/// The world-space frame of a wheel entity. `forward` comes out as
/// `up × right`, which matches Bevy's `-Z` forward.
pub fn wheel_frame_from_global(transform: &GlobalTransform) -> WheelFrame {
    WheelFrame::new(
        vec3_to_point(transform.translation()),
        Unit::new_normalize(vec3_to_vector(*transform.right())),
        Unit::new_normalize(vec3_to_vector(*transform.up())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::prelude::Quat;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_frame_matches_bevy_axes() {
        let global = GlobalTransform::from(Transform::from_xyz(1.0, 2.0, 3.0));
        let frame = wheel_frame_from_global(&global);

        assert_relative_eq!(frame.position, Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(frame.right.into_inner(), Vector3::x());
        assert_relative_eq!(frame.up.into_inner(), Vector3::y());
        assert_relative_eq!(
            frame.forward.into_inner(),
            vec3_to_vector(*global.forward()),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_yawed_frame_forward_follows_bevy() {
        // A quarter turn left about +Y points Bevy's forward at -X.
        let global = GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_y(
            FRAC_PI_2,
        )));
        let frame = wheel_frame_from_global(&global);

        assert_relative_eq!(frame.forward.into_inner(), -Vector3::x(), epsilon = 1e-6);
        assert_relative_eq!(frame.right.into_inner(), -Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_isometry_conversion_preserves_points() {
        let transform = Transform::from_xyz(4.0, 0.5, -2.0).with_rotation(Quat::from_rotation_y(0.3));
        let iso = bevy_transform_to_nalgebra_isometry(&transform);

        let local = Vec3::new(0.2, -0.1, 1.5);
        let expected = vec3_to_point(transform.transform_point(local));
        assert_relative_eq!(iso * vec3_to_point(local), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_vector_round_trip_is_lossless_for_f32_values() {
        let v = Vec3::new(-1.25, 0.5, 1024.0);
        assert_eq!(vector_to_vec3(&vec3_to_vector(v)), v);
        assert_eq!(point_to_vec3(&vec3_to_point(v)), v);
    }
}
