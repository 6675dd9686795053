pub mod config;
pub mod cylinder;
pub mod error;
pub mod mesh;
pub mod rotation;
pub mod simulation;
pub mod snapshot;
pub mod sphere;
pub mod vector;
pub mod walk;
/// The `brownian_core` crate simulates Brownian motion on surfaces embedded in R³.
/// It has no rendering dependency: walks and meshes come out as plain numbers for
/// whatever draws them.
///
/// Key components:
/// - **Traits**: `Manifold` (surfaces that can be walked on and meshed).
/// - **Sphere**: tangent-plane Gaussian steps, exponential map, and a fold over
///   Rodrigues rotations that keeps each step anchored at the current point.
/// - **Cylinder**: intrinsic walk on the lateral surface with reflecting or absorbing caps.
/// - **Simulation**: validated configuration and the entry points used by the bridge.
pub mod traits;

pub use config::{CylinderBoundary, ManifoldKind, ManifoldParams};
pub use error::{ManifoldError, Result};
pub use simulation::Simulation;
