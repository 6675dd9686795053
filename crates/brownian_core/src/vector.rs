//! Small vector and angle helpers shared by the walk generators.

use std::f64::consts::TAU;

use nalgebra::Vector3;

use crate::error::{ManifoldError, Result};

/// Cross product `v × w` of two 3-vectors given as slices.
pub fn cross(v: &[f64], w: &[f64]) -> Result<Vector3<f64>> {
    if v.len() != 3 || w.len() != 3 {
        return Err(ManifoldError::InvalidInput(format!(
            "cross product requires two 3-vectors, got lengths {} and {}.",
            v.len(),
            w.len()
        )));
    }
    Ok(Vector3::from_column_slice(v).cross(&Vector3::from_column_slice(w)))
}

/// Element-wise `atan2(y, x)` mapped to `[0, 2π)`.
pub fn azimuth(y: &[f64], x: &[f64]) -> Result<Vec<f64>> {
    if y.len() != x.len() {
        return Err(ManifoldError::InvalidInput(format!(
            "azimuth requires equal-length inputs, got {} and {}.",
            y.len(),
            x.len()
        )));
    }
    Ok(y.iter()
        .zip(x)
        .map(|(&yi, &xi)| azimuth_scalar(yi, xi))
        .collect())
}

pub fn azimuth_scalar(y: f64, x: f64) -> f64 {
    let theta = y.atan2(x);
    if theta >= 0.0 {
        return theta;
    }
    // Tiny negatives round to exactly 2π after the shift.
    let shifted = theta + TAU;
    if shifted >= TAU {
        0.0
    } else {
        shifted
    }
}
