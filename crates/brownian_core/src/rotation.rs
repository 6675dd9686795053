//! Rodrigues rotations that carry a point on the sphere back to the north pole.

use nalgebra::{Matrix3, Vector3};

use crate::error::Result;
use crate::vector::cross;

/// Below this ratio `|v × ẑ| / |v|` the point is treated as lying on the polar axis.
pub const POLE_EPSILON: f64 = 1e-12;

/// Cross-product matrix `K` with `K w = k × w`.
pub fn skew_matrix(k: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -k.z, k.y, //
        k.z, 0.0, -k.x, //
        -k.y, k.x, 0.0,
    )
}

/// Rotation by `phi` about the axis `v × ẑ`, i.e. `R = I + sin φ K + (1 - cos φ) K²`.
///
/// When `phi` is the polar angle of `v`, `R` maps `v` onto the positive z-axis.
/// The sine term uses `|sin φ|`: past `φ = π` the normalized axis flips sign, and
/// the rotation still has to land on the pole. Points on the polar axis have no
/// well-defined rotation axis: the north pole and the origin get the identity,
/// the south pole gets a half turn about the x-axis.
pub fn rotation_to_pole(v: &[f64], phi: f64) -> Result<Matrix3<f64>> {
    let axis = cross(v, &[0.0, 0.0, 1.0])?;
    let axis_norm = axis.norm();
    let v_norm = Vector3::from_column_slice(v).norm();
    if axis_norm <= POLE_EPSILON * v_norm {
        if v[2] < 0.0 {
            log::trace!("rotation_to_pole: point at the south pole, using a half turn");
            return Ok(Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, -1.0)));
        }
        log::trace!("rotation_to_pole: point on the polar axis, using identity");
        return Ok(Matrix3::identity());
    }

    let k = skew_matrix(&(axis / axis_norm));
    Ok(Matrix3::identity() + k * phi.sin().abs() + (k * k) * (1.0 - phi.cos()))
}
