use rand::Rng;

use crate::config::ManifoldKind;
use crate::error::Result;
use crate::mesh::{MeshResolution, SurfaceGrid};
use crate::walk::Trajectory;

/// A surface embedded in R³ that supports Brownian walks.
pub trait Manifold {
    fn kind(&self) -> ManifoldKind;

    /// Whether `point` lies on the surface, with `tolerance` relative to the radius.
    fn contains(&self, point: &[f64; 3], tolerance: f64) -> bool;

    /// Half-extent of a cube that frames the surface when plotted.
    fn axis_limit(&self) -> f64;

    /// Backdrop grid for plotting.
    fn mesh(&self, resolution: MeshResolution) -> Result<SurfaceGrid>;

    /// Runs `n_steps` steps of size `step_size` and returns the visited points.
    fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n_steps: usize,
        step_size: f64,
    ) -> Result<Trajectory>;
}
