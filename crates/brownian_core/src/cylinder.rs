//! Brownian motion on the lateral surface of a finite cylinder.
//!
//! The surface is flat, so the walk runs in the intrinsic coordinates
//! `(α, z)`: arc length `x` turns the angle by `x / R`, and `y` moves along the
//! axis. Only the caps at `z = ±H` need care; see [`CylinderBoundary`].

use std::f64::consts::TAU;

use rand::Rng;
use serde::Serialize;

use crate::config::{CylinderBoundary, ManifoldKind};
use crate::error::Result;
use crate::mesh::{cylinder_mesh, MeshResolution, SurfaceGrid};
use crate::traits::Manifold;
use crate::walk::{draw_tangent_steps, TangentStep, Trajectory};

/// Folds `z` into `[-height, height]` by mirroring at both caps, as many times as needed.
pub fn reflect_into(z: f64, height: f64) -> f64 {
    if z.abs() <= height {
        return z;
    }
    let span = 2.0 * height;
    let shifted = (z + height).rem_euclid(2.0 * span);
    if shifted <= span {
        shifted - height
    } else {
        3.0 * height - shifted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CylinderWalk {
    pub radius: f64,
    pub height: f64,
    pub trajectory: Trajectory,
    /// One-based step at which an absorbing cap was hit.
    pub absorbed_at: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct WalkerState {
    alpha: f64,
    z: f64,
    absorbed_at: Option<usize>,
}

impl WalkerState {
    fn advance(
        self,
        step: &TangentStep,
        index: usize,
        radius: f64,
        height: f64,
        boundary: CylinderBoundary,
    ) -> Self {
        if self.absorbed_at.is_some() {
            return self;
        }
        let z_next = self.z + step.y;
        match boundary {
            CylinderBoundary::Reflecting => Self {
                alpha: (self.alpha + step.x / radius).rem_euclid(TAU),
                z: reflect_into(z_next, height),
                absorbed_at: None,
            },
            CylinderBoundary::Absorbing if z_next.abs() >= height => {
                let cap = height.copysign(z_next);
                // Straight line in (α, z) up to the cap.
                let fraction = (cap - self.z) / step.y;
                Self {
                    alpha: (self.alpha + fraction * step.x / radius).rem_euclid(TAU),
                    z: cap,
                    absorbed_at: Some(index + 1),
                }
            }
            CylinderBoundary::Absorbing => Self {
                alpha: (self.alpha + step.x / radius).rem_euclid(TAU),
                z: z_next,
                absorbed_at: None,
            },
        }
    }

    fn embed(&self, radius: f64) -> [f64; 3] {
        [radius * self.alpha.cos(), radius * self.alpha.sin(), self.z]
    }
}

/// Walks the lateral surface from `(R, 0, 0)` through the given tangent steps.
pub fn compose_cylinder_walk(
    steps: &[TangentStep],
    radius: f64,
    height: f64,
    boundary: CylinderBoundary,
) -> Result<CylinderWalk> {
    let start = WalkerState {
        alpha: 0.0,
        z: 0.0,
        absorbed_at: None,
    };
    let (state, points) = steps.iter().enumerate().fold(
        (start, Vec::with_capacity(steps.len())),
        |(state, mut points), (index, step)| {
            let next = state.advance(step, index, radius, height, boundary);
            points.push(next.embed(radius));
            (next, points)
        },
    );

    if let Some(step) = state.absorbed_at {
        log::debug!("cylinder walk absorbed at step {step} of {}", steps.len());
    }

    Ok(CylinderWalk {
        radius,
        height,
        trajectory: Trajectory::new(points)?,
        absorbed_at: state.absorbed_at,
    })
}

pub fn simulate_cylinder_walk<R: Rng + ?Sized>(
    rng: &mut R,
    cylinder: &Cylinder,
    n_steps: usize,
    step_size: f64,
) -> Result<CylinderWalk> {
    let steps = draw_tangent_steps(rng, n_steps, step_size)?;
    compose_cylinder_walk(&steps, cylinder.radius, cylinder.height, cylinder.boundary)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub radius: f64,
    /// Half-height: the surface spans `z ∈ [-height, height]`.
    pub height: f64,
    pub boundary: CylinderBoundary,
}

impl Cylinder {
    pub fn new(radius: f64, height: f64, boundary: CylinderBoundary) -> Self {
        Self {
            radius,
            height,
            boundary,
        }
    }
}

impl Manifold for Cylinder {
    fn kind(&self) -> ManifoldKind {
        ManifoldKind::Cylinder
    }

    fn contains(&self, point: &[f64; 3], tolerance: f64) -> bool {
        let radial = point[0].hypot(point[1]);
        (radial - self.radius).abs() <= tolerance * self.radius
            && point[2].abs() <= self.height * (1.0 + tolerance)
    }

    fn axis_limit(&self) -> f64 {
        self.height
    }

    fn mesh(&self, resolution: MeshResolution) -> Result<SurfaceGrid> {
        cylinder_mesh(self.radius, self.height, resolution)
    }

    fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n_steps: usize,
        step_size: f64,
    ) -> Result<Trajectory> {
        Ok(simulate_cylinder_walk(rng, self, n_steps, step_size)?.trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::{compose_cylinder_walk, reflect_into, simulate_cylinder_walk, Cylinder};
    use crate::config::CylinderBoundary;
    use crate::traits::Manifold;
    use crate::walk::TangentStep;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn reflect_into_mirrors_at_both_caps() {
        assert_eq!(reflect_into(0.5, 1.0), 0.5);
        assert!((reflect_into(1.25, 1.0) - 0.75).abs() < 1e-15);
        assert!((reflect_into(-1.25, 1.0) + 0.75).abs() < 1e-15);
        // Long enough to bounce off both caps.
        assert!((reflect_into(3.5, 1.0) + 0.5).abs() < 1e-15);
        assert!((reflect_into(4.0, 1.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn arc_step_turns_by_x_over_radius() {
        let steps = [TangentStep::new(FRAC_PI_2 * 2.0, 0.3)];
        let walk =
            compose_cylinder_walk(&steps, 2.0, 10.0, CylinderBoundary::Reflecting).expect("walk");
        let p = walk.trajectory.points()[0];
        assert!(p[0].abs() < 1e-12);
        assert!((p[1] - 2.0).abs() < 1e-12);
        assert!((p[2] - 0.3).abs() < 1e-15);
    }

    #[test]
    fn reflecting_walk_stays_on_surface() {
        let cylinder = Cylinder::new(1.5, 0.5, CylinderBoundary::Reflecting);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let walk = simulate_cylinder_walk(&mut rng, &cylinder, 3_000, 0.01).expect("walk");
        assert_eq!(walk.absorbed_at, None);
        assert_eq!(walk.trajectory.len(), 3_000);
        for p in walk.trajectory.points() {
            assert!(cylinder.contains(p, 1e-12), "{p:?} off the cylinder");
        }
    }

    #[test]
    fn absorbing_walk_freezes_at_the_cap() {
        let steps = [
            TangentStep::new(0.0, 0.4),
            TangentStep::new(0.2, 0.8),
            TangentStep::new(0.1, -0.5),
        ];
        let walk =
            compose_cylinder_walk(&steps, 1.0, 1.0, CylinderBoundary::Absorbing).expect("walk");
        assert_eq!(walk.absorbed_at, Some(2));
        let points = walk.trajectory.points();
        assert_eq!(points[1][2], 1.0);
        assert_eq!(points[1], points[2]);
        // Hit the cap three quarters of the way through the second step.
        let alpha = points[1][1].atan2(points[1][0]);
        assert!((alpha - 0.15).abs() < 1e-12);
    }

    #[test]
    fn absorbing_walk_without_hit_matches_reflecting() {
        let steps = [TangentStep::new(0.1, 0.1), TangentStep::new(-0.3, -0.2)];
        let absorbing =
            compose_cylinder_walk(&steps, 1.0, 5.0, CylinderBoundary::Absorbing).expect("walk");
        let reflecting =
            compose_cylinder_walk(&steps, 1.0, 5.0, CylinderBoundary::Reflecting).expect("walk");
        assert_eq!(absorbing.absorbed_at, None);
        assert_eq!(absorbing.trajectory, reflecting.trajectory);
    }
}
