//! Pieces shared by the sphere and cylinder walks: Gaussian tangent-plane draws
//! and the immutable trajectory they produce.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{ManifoldError, Result};

/// One raw displacement in the tangent plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentStep {
    pub x: f64,
    pub y: f64,
}

impl TangentStep {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Length of the displacement.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Draws `n` isotropic Gaussian steps with per-axis standard deviation `sqrt(step_size)`.
///
/// All x coordinates are drawn before the y coordinates, so a seeded generator
/// reproduces the same batch regardless of how the steps are consumed later.
pub fn draw_tangent_steps<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    step_size: f64,
) -> Result<Vec<TangentStep>> {
    let normal = Normal::new(0.0, step_size.sqrt()).map_err(|err| {
        ManifoldError::InvalidConfig(format!("step size {step_size} gives no normal law: {err}"))
    })?;
    let xs: Vec<f64> = (0..n).map(|_| normal.sample(rng)).collect();
    let ys: Vec<f64> = (0..n).map(|_| normal.sample(rng)).collect();
    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| TangentStep { x, y })
        .collect())
}

/// Ordered points of a walk, one per step.
///
/// Deserializing goes through the same finiteness check as construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 3]>")]
pub struct Trajectory {
    points: Vec<[f64; 3]>,
}

impl Trajectory {
    pub(crate) fn new(points: Vec<[f64; 3]>) -> Result<Self> {
        if let Some(index) = points
            .iter()
            .position(|p| p.iter().any(|v| !v.is_finite()))
        {
            return Err(ManifoldError::NumericalDegeneracy(format!(
                "non-finite trajectory point at step {}.",
                index + 1
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&[f64; 3]> {
        self.points.last()
    }

    /// The first `steps` points, i.e. the walk as it looked after `steps` steps.
    pub fn prefix(&self, steps: usize) -> &[[f64; 3]] {
        &self.points[..steps.min(self.points.len())]
    }

    pub fn into_points(self) -> Vec<[f64; 3]> {
        self.points
    }
}

impl TryFrom<Vec<[f64; 3]>> for Trajectory {
    type Error = ManifoldError;

    fn try_from(points: Vec<[f64; 3]>) -> Result<Self> {
        Self::new(points)
    }
}
