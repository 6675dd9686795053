//! Plot payloads handed to the JS renderer.
//!
//! Everything here is plain data: snapshots of a walk, the surface grid behind it,
//! axis framing and styling. Snapshot selections are validated before any walk is
//! run.

use anyhow::{Context, Result};
use brownian_core::config::ManifoldKind;
use brownian_core::mesh::{MeshResolution, SurfaceGrid};
use brownian_core::snapshot::resolve_snapshots;
use brownian_core::traits::Manifold;
use brownian_core::walk::Trajectory;
use brownian_core::Simulation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Falls back to a per-plot default when unset.
    pub surface_color: Option<String>,
    pub surface_alpha: Option<f64>,
    pub colormap: String,
    pub marker: String,
    pub marker_size: f64,
    pub has_title: bool,
    pub show_axes: bool,
    pub resolution: MeshResolution,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            surface_color: None,
            surface_alpha: None,
            colormap: "viridis".to_string(),
            marker: ".".to_string(),
            marker_size: 4.0,
            has_title: true,
            show_axes: false,
            resolution: MeshResolution::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub label: String,
    pub points: Vec<[f64; 3]>,
    /// Colour values for the points, `1..=step`.
    pub step_numbers: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub grid: SurfaceGrid,
    pub color: String,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct View {
    pub elevation: Option<f64>,
    pub azimuth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub limit: f64,
    pub ticks: [f64; 3],
    pub visible: bool,
}

impl Axes {
    fn framing(limit: f64, visible: bool) -> Self {
        Self {
            limit,
            ticks: [-limit, 0.0, limit],
            visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPlot {
    pub title: Option<String>,
    /// Subplot grid as `[rows, cols]`.
    pub layout: [usize; 2],
    pub snapshots: Vec<Snapshot>,
    pub surface: Surface,
    pub axes: Axes,
    pub view: View,
    pub colormap: String,
    pub marker: String,
    pub marker_size: f64,
    pub colorbar_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfacePlot {
    pub title: Option<String>,
    pub surface: Surface,
    pub axes: Axes,
    pub view: View,
}

fn layout_for(count: usize) -> [usize; 2] {
    match count {
        1 => [1, 1],
        2 => [2, 1],
        _ => [2, 2],
    }
}

fn manifold_label(kind: ManifoldKind) -> &'static str {
    match kind {
        ManifoldKind::Sphere => "2-Sphere",
        ManifoldKind::Cylinder => "Finite Cylinder",
    }
}

fn trajectory_title(simulation: &Simulation) -> String {
    format!(
        "Brownian Motion Simulation\n on {} Manifold:\n Total Steps= {}\n Step Size = {:.5}",
        manifold_label(simulation.kind()),
        simulation.params().n_steps,
        simulation.step_size()
    )
}

fn build_trajectory_plot(
    simulation: &Simulation,
    manifold: &impl Manifold,
    trajectory: &Trajectory,
    snapshots: &[usize],
    style: &PlotStyle,
) -> Result<TrajectoryPlot> {
    let grid = manifold
        .mesh(style.resolution)
        .context("Failed to build surface mesh")?;
    let view = match manifold.kind() {
        ManifoldKind::Sphere => View {
            elevation: Some(2.0),
            azimuth: None,
        },
        ManifoldKind::Cylinder => View {
            elevation: None,
            azimuth: Some(-0.0005),
        },
    };

    let snapshots = snapshots
        .iter()
        .map(|&step| Snapshot {
            step,
            label: format!("Snapshot at step {step}"),
            points: trajectory.prefix(step).to_vec(),
            step_numbers: (1..=step).collect(),
        })
        .collect::<Vec<_>>();

    Ok(TrajectoryPlot {
        title: style.has_title.then(|| trajectory_title(simulation)),
        layout: layout_for(snapshots.len()),
        snapshots,
        surface: Surface {
            grid,
            color: style.surface_color.clone().unwrap_or_else(|| "red".to_string()),
            alpha: style.surface_alpha.unwrap_or(0.06),
        },
        axes: Axes::framing(manifold.axis_limit(), style.show_axes),
        view,
        colormap: style.colormap.clone(),
        marker: style.marker.clone(),
        marker_size: style.marker_size,
        colorbar_label: "step number".to_string(),
    })
}

/// Validates the snapshot selection, runs the sphere walk and packages it.
pub(crate) fn sphere_plot(
    simulation: &Simulation,
    steps: &[usize],
    style: &PlotStyle,
) -> Result<TrajectoryPlot> {
    let sphere = simulation.sphere()?;
    let snapshots = resolve_snapshots(steps, simulation.params().n_steps)?;
    log::debug!("sphere plot with snapshots {snapshots:?}");
    let walk = simulation
        .simulate_sphere()
        .context("Sphere simulation failed")?;
    build_trajectory_plot(simulation, &sphere, &walk.trajectory, &snapshots, style)
}

/// Validates the snapshot selection, runs the cylinder walk and packages it.
pub(crate) fn cylinder_plot(
    simulation: &Simulation,
    steps: &[usize],
    style: &PlotStyle,
) -> Result<TrajectoryPlot> {
    let cylinder = simulation.cylinder()?;
    let snapshots = resolve_snapshots(steps, simulation.params().n_steps)?;
    log::debug!("cylinder plot with snapshots {snapshots:?}");
    let walk = simulation
        .simulate_cylinder()
        .context("Cylinder simulation failed")?;
    build_trajectory_plot(simulation, &cylinder, &walk.trajectory, &snapshots, style)
}

/// The blank surface of whichever manifold is configured.
pub(crate) fn surface_plot(simulation: &Simulation, style: &PlotStyle) -> Result<SurfacePlot> {
    let (grid, limit, title, alpha, view) = match simulation.kind() {
        ManifoldKind::Sphere => {
            let sphere = simulation.sphere()?;
            (
                sphere.mesh(style.resolution)?,
                sphere.axis_limit(),
                "Surface Plot: 2-sphere",
                0.2,
                View {
                    elevation: Some(10.0),
                    azimuth: None,
                },
            )
        }
        ManifoldKind::Cylinder => {
            let cylinder = simulation.cylinder()?;
            (
                cylinder.mesh(style.resolution)?,
                cylinder.axis_limit(),
                "Surface Plot: Finite Cylinder",
                0.15,
                View {
                    elevation: None,
                    azimuth: Some(-0.0005),
                },
            )
        }
    };

    Ok(SurfacePlot {
        title: style.has_title.then(|| title.to_string()),
        surface: Surface {
            grid,
            color: style.surface_color.clone().unwrap_or_else(|| "cyan".to_string()),
            alpha: style.surface_alpha.unwrap_or(alpha),
        },
        axes: Axes::framing(limit, style.show_axes),
        view,
    })
}

/// Flattens points into `[x0, y0, z0, x1, ...]` for typed-array transfer.
pub(crate) fn flatten(points: &[[f64; 3]]) -> Vec<f64> {
    points.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::{cylinder_plot, flatten, sphere_plot, surface_plot, PlotStyle};
    use brownian_core::config::ManifoldParams;
    use brownian_core::mesh::MeshResolution;
    use brownian_core::Simulation;

    fn simulation(kind: &str, n_steps: usize) -> Simulation {
        let params = ManifoldParams::new(kind)
            .expect("known manifold")
            .with_steps(n_steps)
            .with_seed(17);
        Simulation::new(params).expect("valid params")
    }

    fn coarse_style() -> PlotStyle {
        PlotStyle {
            resolution: MeshResolution {
                polar: 4,
                azimuthal: 6,
                axial: 2,
            },
            ..PlotStyle::default()
        }
    }

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn sphere_plot_defaults_to_single_full_snapshot() {
        let sim = simulation("sphere", 50);
        let plot = sphere_plot(&sim, &[], &coarse_style()).expect("plot");
        assert_eq!(plot.layout, [1, 1]);
        assert_eq!(plot.snapshots.len(), 1);
        assert_eq!(plot.snapshots[0].step, 50);
        assert_eq!(plot.snapshots[0].points.len(), 50);
        assert_eq!(plot.snapshots[0].step_numbers.last(), Some(&50));
        assert_eq!(plot.surface.color, "red");
        assert_eq!(plot.axes.ticks, [-1.0, 0.0, 1.0]);
        let title = plot.title.expect("title");
        assert!(title.contains("Total Steps= 50"));
        assert!(title.contains("Step Size = 0.02000"));
    }

    #[test]
    fn sphere_plot_snapshots_are_prefixes_of_one_walk() {
        let sim = simulation("sphere", 40);
        let plot = sphere_plot(&sim, &[10, 40], &coarse_style()).expect("plot");
        assert_eq!(plot.layout, [2, 1]);
        let (short, full) = (&plot.snapshots[0], &plot.snapshots[1]);
        assert_eq!(short.points[..], full.points[..10]);
        assert_eq!(short.label, "Snapshot at step 10");
    }

    #[test]
    fn plot_rejects_bad_snapshots() {
        let sim = simulation("sphere", 20);
        assert_err_contains(sphere_plot(&sim, &[1, 2, 3, 4, 5], &coarse_style()), "up to 4");
        assert_err_contains(sphere_plot(&sim, &[21], &coarse_style()), "> 20");
        assert_err_contains(sphere_plot(&sim, &[0], &coarse_style()), "invalid step");
    }

    #[test]
    fn plot_rejects_mismatched_manifold() {
        let sim = simulation("cylinder", 20);
        assert_err_contains(sphere_plot(&sim, &[], &coarse_style()), "not used");
        let sim = simulation("sphere", 20);
        assert_err_contains(cylinder_plot(&sim, &[], &coarse_style()), "not used");
    }

    #[test]
    fn cylinder_plot_frames_by_height() {
        let sim = simulation("cylinder", 30);
        let plot = cylinder_plot(&sim, &[5, 10, 30], &coarse_style()).expect("plot");
        assert_eq!(plot.layout, [2, 2]);
        assert_eq!(plot.axes.limit, 10.0);
        assert_eq!(plot.surface.grid.cols, 2);
        assert!(plot.title.expect("title").contains("Finite Cylinder"));
    }

    #[test]
    fn surface_plot_uses_blank_surface_styling() {
        let sim = simulation("sphere", 1);
        let style = PlotStyle {
            has_title: false,
            ..coarse_style()
        };
        let plot = surface_plot(&sim, &style).expect("plot");
        assert!(plot.title.is_none());
        assert_eq!(plot.surface.color, "cyan");
        assert_eq!(plot.surface.alpha, 0.2);
        assert_eq!(plot.view.elevation, Some(10.0));
    }

    #[test]
    fn flatten_interleaves_coordinates() {
        assert_eq!(
            flatten(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }
}
