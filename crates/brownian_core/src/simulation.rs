use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{ManifoldKind, ManifoldParams};
use crate::cylinder::{simulate_cylinder_walk, Cylinder, CylinderWalk};
use crate::error::{ManifoldError, Result};
use crate::mesh::{MeshResolution, SurfaceGrid};
use crate::sphere::{simulate_sphere_walk, Sphere, SphereWalk};
use crate::traits::Manifold;

/// A validated configuration and the operations it allows.
///
/// Every call is independent: a configured seed gives the same walk on each call,
/// otherwise each call draws a fresh seed from the thread generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    params: ManifoldParams,
}

impl Simulation {
    pub fn new(params: ManifoldParams) -> Result<Self> {
        params.validate()?;
        log::debug!(
            "configured {} simulation: {} steps, step size {}",
            params.kind,
            params.n_steps,
            params.step_size()
        );
        Ok(Self { params })
    }

    pub fn params(&self) -> &ManifoldParams {
        &self.params
    }

    pub fn kind(&self) -> ManifoldKind {
        self.params.kind
    }

    pub fn step_size(&self) -> f64 {
        self.params.step_size()
    }

    pub fn rng(&self) -> ChaCha8Rng {
        match self.params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    fn require(&self, kind: ManifoldKind, operation: &'static str) -> Result<()> {
        if self.params.kind != kind {
            return Err(ManifoldError::ManifoldMismatch {
                operation,
                configured: self.params.kind,
            });
        }
        Ok(())
    }

    pub fn sphere(&self) -> Result<Sphere> {
        self.require(ManifoldKind::Sphere, "sphere")?;
        Ok(self.build_sphere())
    }

    fn build_sphere(&self) -> Sphere {
        Sphere::new(self.params.radius_sphere)
    }

    pub fn cylinder(&self) -> Result<Cylinder> {
        self.require(ManifoldKind::Cylinder, "cylinder")?;
        Ok(self.build_cylinder())
    }

    fn build_cylinder(&self) -> Cylinder {
        Cylinder::new(
            self.params.radius_cylinder,
            self.params.height_cylinder,
            self.params.boundary,
        )
    }

    pub fn simulate_sphere(&self) -> Result<SphereWalk> {
        self.simulate_sphere_with(&mut self.rng())
    }

    pub fn simulate_sphere_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SphereWalk> {
        self.require(ManifoldKind::Sphere, "simulate_sphere")?;
        simulate_sphere_walk(
            rng,
            self.params.radius_sphere,
            self.params.n_steps,
            self.step_size(),
        )
    }

    pub fn simulate_cylinder(&self) -> Result<CylinderWalk> {
        self.simulate_cylinder_with(&mut self.rng())
    }

    pub fn simulate_cylinder_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CylinderWalk> {
        self.require(ManifoldKind::Cylinder, "simulate_cylinder")?;
        simulate_cylinder_walk(rng, &self.build_cylinder(), self.params.n_steps, self.step_size())
    }

    pub fn sphere_mesh(&self) -> Result<SurfaceGrid> {
        self.sphere_mesh_with(MeshResolution::default())
    }

    pub fn sphere_mesh_with(&self, resolution: MeshResolution) -> Result<SurfaceGrid> {
        self.require(ManifoldKind::Sphere, "sphere_mesh")?;
        self.build_sphere().mesh(resolution)
    }

    pub fn cylinder_mesh(&self) -> Result<SurfaceGrid> {
        self.cylinder_mesh_with(MeshResolution::default())
    }

    pub fn cylinder_mesh_with(&self, resolution: MeshResolution) -> Result<SurfaceGrid> {
        self.require(ManifoldKind::Cylinder, "cylinder_mesh")?;
        self.build_cylinder().mesh(resolution)
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The manifold is a {}!", self.params.kind)
    }
}
