//! Parametric surface grids used as backdrops when plotting walks.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::config::check_positive;
use crate::error::{ManifoldError, Result};

/// Sample counts along each parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshResolution {
    /// Sphere: samples of the polar angle.
    pub polar: usize,
    /// Sphere and cylinder: samples of the azimuth.
    pub azimuthal: usize,
    /// Cylinder: samples along the axis.
    pub axial: usize,
}

impl Default for MeshResolution {
    fn default() -> Self {
        Self {
            polar: 100,
            azimuthal: 100,
            axial: 2,
        }
    }
}

/// Three `rows x cols` coordinate grids stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGrid {
    pub rows: usize,
    pub cols: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl SurfaceGrid {
    fn from_fn<F>(rows: &[f64], cols: &[f64], f: F) -> Self
    where
        F: Fn(f64, f64) -> [f64; 3],
    {
        let len = rows.len() * cols.len();
        let mut grid = Self {
            rows: rows.len(),
            cols: cols.len(),
            x: Vec::with_capacity(len),
            y: Vec::with_capacity(len),
            z: Vec::with_capacity(len),
        };
        for &u in rows {
            for &v in cols {
                let [x, y, z] = f(u, v);
                grid.x.push(x);
                grid.y.push(y);
                grid.z.push(z);
            }
        }
        grid
    }

    pub fn get(&self, row: usize, col: usize) -> Option<[f64; 3]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = row * self.cols + col;
        Some([self.x[idx], self.y[idx], self.z[idx]])
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| [x, y, z])
    }
}

/// `n` evenly spaced samples from `start` to `end`, both included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i + 1 == n { end } else { start + step * i as f64 })
        .collect()
}

fn check_samples(name: &str, samples: usize) -> Result<()> {
    if samples < 2 {
        return Err(ManifoldError::InvalidConfig(format!(
            "{name} resolution needs at least 2 samples (got {samples})."
        )));
    }
    Ok(())
}

/// Sphere of radius `radius`, polar angle along rows and azimuth along columns.
pub fn sphere_mesh(radius: f64, resolution: MeshResolution) -> Result<SurfaceGrid> {
    check_positive("radius_sphere", radius)?;
    check_samples("polar", resolution.polar)?;
    check_samples("azimuthal", resolution.azimuthal)?;

    let phi = linspace(0.0, PI, resolution.polar);
    let theta = linspace(0.0, TAU, resolution.azimuthal);
    Ok(SurfaceGrid::from_fn(&phi, &theta, |phi, theta| {
        [
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ]
    }))
}

/// Lateral surface of the cylinder `x² + y² = radius²`, `z ∈ [-height, height]`.
/// Azimuth runs along rows, the axis from `+height` down to `-height` along columns.
pub fn cylinder_mesh(radius: f64, height: f64, resolution: MeshResolution) -> Result<SurfaceGrid> {
    check_positive("radius_cylinder", radius)?;
    check_positive("height_cylinder", height)?;
    check_samples("azimuthal", resolution.azimuthal)?;
    check_samples("axial", resolution.axial)?;

    let theta = linspace(0.0, TAU, resolution.azimuthal);
    let z = linspace(height, -height, resolution.axial);
    Ok(SurfaceGrid::from_fn(&theta, &z, |theta, z| {
        [radius * theta.cos(), radius * theta.sin(), z]
    }))
}

#[cfg(test)]
mod tests {
    use super::{cylinder_mesh, linspace, sphere_mesh, MeshResolution};
    use crate::error::ManifoldError;

    #[test]
    fn linspace_hits_both_endpoints() {
        let values = linspace(0.0, 1.0, 5);
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, -3.0, 2), vec![3.0, -3.0]);
    }

    #[test]
    fn sphere_mesh_points_lie_on_sphere() {
        let grid = sphere_mesh(2.5, MeshResolution::default()).expect("mesh");
        assert_eq!((grid.rows, grid.cols), (100, 100));
        assert_eq!(grid.x.len(), 10_000);
        for [x, y, z] in grid.points() {
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 2.5).abs() < 1e-12);
        }
        let north = grid.get(0, 0).expect("corner");
        assert_eq!(north, [0.0, 0.0, 2.5]);
        assert!(grid.get(100, 0).is_none());
    }

    #[test]
    fn cylinder_mesh_points_lie_on_lateral_surface() {
        let resolution = MeshResolution {
            axial: 5,
            ..MeshResolution::default()
        };
        let grid = cylinder_mesh(1.5, 4.0, resolution).expect("mesh");
        assert_eq!((grid.rows, grid.cols), (100, 5));
        for [x, y, z] in grid.points() {
            assert!((x.hypot(y) - 1.5).abs() < 1e-12);
            assert!(z.abs() <= 4.0);
        }
        assert_eq!(grid.get(0, 0).expect("corner")[2], 4.0);
        assert_eq!(grid.get(0, 4).expect("corner")[2], -4.0);
    }

    #[test]
    fn meshes_reject_bad_inputs() {
        let coarse = MeshResolution {
            polar: 1,
            ..MeshResolution::default()
        };
        assert!(matches!(
            sphere_mesh(1.0, coarse),
            Err(ManifoldError::InvalidConfig(_))
        ));
        assert!(matches!(
            cylinder_mesh(1.0, 0.0, MeshResolution::default()),
            Err(ManifoldError::InvalidConfig(_))
        ));
    }
}
