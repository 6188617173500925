//! Small vector helpers shared by the geometry and buffer stages.

use std::cmp::Ordering;

use glam::Vec3;

use crate::error::{MeshError, Result};

/// Normalizes `v`, mapping the exact zero vector to zero.
///
/// Unlike [`Vec3::normalize_or_zero`] this keeps NaN and infinite inputs non-finite, so
/// degenerate geometry is caught by [`ensure_finite`] rather than silently zeroed.
#[inline]
#[must_use]
pub fn unit_or_zero(v: Vec3) -> Vec3 {
    if v == Vec3::ZERO {
        Vec3::ZERO
    } else {
        v / v.length()
    }
}

#[inline]
fn cmp_scalar(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Lexicographic order on (x, y, z) with exact equality.
#[must_use]
pub fn lexicographic(a: &Vec3, b: &Vec3) -> Ordering {
    cmp_scalar(a.x, b.x)
        .then_with(|| cmp_scalar(a.y, b.y))
        .then_with(|| cmp_scalar(a.z, b.z))
}

/// Fails with [`MeshError::DegenerateGeometry`] if any component of `v` is not finite.
pub fn ensure_finite(v: Vec3, what: impl FnOnce() -> String) -> Result<Vec3> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MeshError::DegenerateGeometry(format!("{} is {v}", what())))
    }
}

/// Fails with [`MeshError::DegenerateGeometry`] if `value` is NaN.
pub fn ensure_not_nan(value: f32, what: impl FnOnce() -> String) -> Result<f32> {
    if value.is_nan() {
        Err(MeshError::DegenerateGeometry(format!("{} is NaN", what())))
    } else {
        Ok(value)
    }
}
