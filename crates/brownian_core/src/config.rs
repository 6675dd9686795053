use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ManifoldError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ManifoldKind {
    Sphere,
    Cylinder,
}

impl ManifoldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ManifoldKind::Sphere => "sphere",
            ManifoldKind::Cylinder => "cylinder",
        }
    }
}

impl fmt::Display for ManifoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifoldKind {
    type Err = ManifoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sphere" => Ok(ManifoldKind::Sphere),
            "cylinder" => Ok(ManifoldKind::Cylinder),
            other => Err(ManifoldError::UnknownManifold(other.to_string())),
        }
    }
}

impl TryFrom<String> for ManifoldKind {
    type Error = ManifoldError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ManifoldKind> for String {
    fn from(kind: ManifoldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// What happens when a cylinder walk reaches one of the caps at `z = ±height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CylinderBoundary {
    /// The overshoot is mirrored back onto the surface.
    #[default]
    Reflecting,
    /// The walker stops at the cap for the rest of the run.
    Absorbing,
}

/// Immutable simulation configuration.
///
/// Missing fields take the defaults of the unit sphere, a cylinder of radius 1
/// and half-height 10, one unit of time and 1000 steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifoldParams {
    pub kind: ManifoldKind,
    pub radius_sphere: f64,
    pub radius_cylinder: f64,
    pub height_cylinder: f64,
    pub final_time: f64,
    pub n_steps: usize,
    pub boundary: CylinderBoundary,
    pub seed: Option<u64>,
}

impl Default for ManifoldParams {
    fn default() -> Self {
        Self {
            kind: ManifoldKind::Sphere,
            radius_sphere: 1.0,
            radius_cylinder: 1.0,
            height_cylinder: 10.0,
            final_time: 1.0,
            n_steps: 1000,
            boundary: CylinderBoundary::Reflecting,
            seed: None,
        }
    }
}

impl ManifoldParams {
    /// Defaults for the named manifold. Unknown names fail before anything else happens.
    pub fn new(kind: &str) -> Result<Self> {
        Ok(Self {
            kind: kind.parse()?,
            ..Self::default()
        })
    }

    pub fn with_sphere_radius(mut self, radius: f64) -> Self {
        self.radius_sphere = radius;
        self
    }

    pub fn with_cylinder(mut self, radius: f64, height: f64) -> Self {
        self.radius_cylinder = radius;
        self.height_cylinder = height;
        self
    }

    pub fn with_final_time(mut self, final_time: f64) -> Self {
        self.final_time = final_time;
        self
    }

    pub fn with_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    pub fn with_boundary(mut self, boundary: CylinderBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Time increment of a single step.
    pub fn step_size(&self) -> f64 {
        self.final_time / self.n_steps as f64
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_steps == 0 {
            return Err(ManifoldError::InvalidConfig(
                "n_steps must be greater than zero.".into(),
            ));
        }
        check_positive("final_time", self.final_time)?;
        check_positive("radius_sphere", self.radius_sphere)?;
        check_positive("radius_cylinder", self.radius_cylinder)?;
        check_positive("height_cylinder", self.height_cylinder)?;
        Ok(())
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ManifoldError::InvalidConfig(format!(
            "{name} must be positive and finite (got {value})."
        )));
    }
    Ok(())
}
