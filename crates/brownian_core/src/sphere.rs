//! Brownian motion on the 2-sphere of radius `R`.
//!
//! Every step is drawn in the tangent plane at the north pole, wrapped onto the
//! sphere through the exponential map and then carried to the walker's current
//! position by the frame accumulated from all earlier steps. Each step's
//! Rodrigues rotation brings the freshly placed point back to the pole, so the
//! frame at the new position is the running frame times that rotation's inverse.

use nalgebra::{Matrix3, Vector3};
use rand::Rng;
use serde::Serialize;

use crate::config::ManifoldKind;
use crate::error::{ManifoldError, Result};
use crate::mesh::{sphere_mesh, MeshResolution, SurfaceGrid};
use crate::rotation::rotation_to_pole;
use crate::traits::Manifold;
use crate::vector::azimuth;
use crate::walk::{draw_tangent_steps, TangentStep, Trajectory};

/// A tangent step after the exponential map, expressed in the pole-anchored frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedStep {
    pub point: Vector3<f64>,
    /// Geodesic angle between the pole and `point`.
    pub phi: f64,
}

/// Maps a batch of tangent steps onto the sphere at the north pole.
pub fn smooth_steps(steps: &[TangentStep], radius: f64) -> Result<Vec<SmoothedStep>> {
    let xs: Vec<f64> = steps.iter().map(|s| s.x).collect();
    let ys: Vec<f64> = steps.iter().map(|s| s.y).collect();
    let thetas = azimuth(&ys, &xs)?;

    Ok(steps
        .iter()
        .zip(thetas)
        .map(|(step, theta)| {
            let phi = step.magnitude() / radius;
            let point = Vector3::new(
                radius * theta.cos() * phi.sin(),
                radius * theta.sin() * phi.sin(),
                radius * phi.cos(),
            );
            SmoothedStep { point, phi }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SphereWalk {
    pub radius: f64,
    pub trajectory: Trajectory,
    /// Per-step rotations taking each smoothed step back to the pole.
    #[serde(skip)]
    pub rotations: Vec<Matrix3<f64>>,
    /// Frame at the final position: maps the pole-anchored frame to world coordinates.
    #[serde(skip)]
    pub frame: Matrix3<f64>,
}

impl SphereWalk {
    /// Product of all step rotations, latest first. It undoes `frame`.
    pub fn total_rotation(&self) -> Matrix3<f64> {
        self.frame.transpose()
    }

    /// The walk seen from the frame of its last step: every point dragged along
    /// by all later rotations, so the final point sits at `(0, 0, R)`.
    pub fn anchored_at_last(&self) -> Vec<[f64; 3]> {
        let total = self.total_rotation();
        self.trajectory
            .points()
            .iter()
            .map(|p| {
                let v = total * Vector3::from(*p);
                [v.x, v.y, v.z]
            })
            .collect()
    }
}

/// Folds the smoothed steps into a trajectory that starts from the pole.
pub fn compose_sphere_walk(smoothed: &[SmoothedStep], radius: f64) -> Result<SphereWalk> {
    let n = smoothed.len();
    let (frame, points, rotations) = smoothed.iter().try_fold(
        (Matrix3::identity(), Vec::with_capacity(n), Vec::with_capacity(n)),
        |(frame, mut points, mut rotations): (Matrix3<f64>, Vec<[f64; 3]>, Vec<Matrix3<f64>>),
         step| {
            let placed = frame * step.point;
            points.push([placed.x, placed.y, placed.z]);

            let rotation = rotation_to_pole(step.point.as_slice(), step.phi)?;
            rotations.push(rotation);
            Ok::<_, ManifoldError>((frame * rotation.transpose(), points, rotations))
        },
    )?;

    Ok(SphereWalk {
        radius,
        trajectory: Trajectory::new(points)?,
        rotations,
        frame,
    })
}

/// Draws, smooths and composes a full sphere walk.
pub fn simulate_sphere_walk<R: Rng + ?Sized>(
    rng: &mut R,
    radius: f64,
    n_steps: usize,
    step_size: f64,
) -> Result<SphereWalk> {
    let steps = draw_tangent_steps(rng, n_steps, step_size)?;
    let smoothed = smooth_steps(&steps, radius)?;
    compose_sphere_walk(&smoothed, radius)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f64,
}

impl Sphere {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Manifold for Sphere {
    fn kind(&self) -> ManifoldKind {
        ManifoldKind::Sphere
    }

    fn contains(&self, point: &[f64; 3], tolerance: f64) -> bool {
        let norm = Vector3::from(*point).norm();
        (norm - self.radius).abs() <= tolerance * self.radius
    }

    fn axis_limit(&self) -> f64 {
        self.radius
    }

    fn mesh(&self, resolution: MeshResolution) -> Result<SurfaceGrid> {
        sphere_mesh(self.radius, resolution)
    }

    fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n_steps: usize,
        step_size: f64,
    ) -> Result<Trajectory> {
        Ok(simulate_sphere_walk(rng, self.radius, n_steps, step_size)?.trajectory)
    }
}
