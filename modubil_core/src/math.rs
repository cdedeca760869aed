// modubil_core/src/math.rs

//! Small vector helpers that never produce NaN on degenerate input.

use nalgebra::Vector3;

/// Squared lengths below this are treated as zero.
pub const EPSILON_SQ: f64 = 1e-18;

/// Projects `v` onto the direction of `onto`. Returns zero when `onto` has no length.
pub fn project(v: &Vector3<f64>, onto: &Vector3<f64>) -> Vector3<f64> {
    let len_sq = onto.norm_squared();
    if len_sq < EPSILON_SQ {
        return Vector3::zeros();
    }
    onto * (v.dot(onto) / len_sq)
}

/// Normalizes `v`, or returns the zero vector when `v` has no length.
pub fn safe_normalize(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(EPSILON_SQ.sqrt()).unwrap_or_else(Vector3::zeros)
}

pub fn is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}
