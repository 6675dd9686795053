//! WASM wrapper around a configured simulation.

use crate::plot::{cylinder_plot, flatten, sphere_plot, surface_plot, PlotStyle};
use brownian_core::mesh::MeshResolution;
use brownian_core::{ManifoldParams, Simulation};
use js_sys::Float64Array;
use serde::de::DeserializeOwned;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmManifold {
    pub(crate) simulation: Simulation,
}

/// Reads an optional JS object, falling back to `T::default()` for `undefined`/`null`.
fn optional_from_value<T: DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    from_value(value).map_err(|e| JsValue::from_str(&format!("Invalid {what}: {e}")))
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

fn to_steps(steps: &[u32]) -> Vec<usize> {
    steps.iter().map(|&s| s as usize).collect()
}

impl WasmManifold {
    pub fn from_params(params: ManifoldParams) -> anyhow::Result<WasmManifold> {
        Ok(WasmManifold {
            simulation: Simulation::new(params)?,
        })
    }
}

#[wasm_bindgen]
impl WasmManifold {
    /// `config` follows `ManifoldParams`; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmManifold, JsValue> {
        let params: ManifoldParams = optional_from_value(config, "manifold config")?;
        WasmManifold::from_params(params).map_err(to_js_error)
    }

    pub fn kind(&self) -> String {
        self.simulation.kind().to_string()
    }

    pub fn describe(&self) -> String {
        self.simulation.to_string()
    }

    pub fn step_size(&self) -> f64 {
        self.simulation.step_size()
    }

    /// Sphere walk as a flat `[x0, y0, z0, x1, ...]` array.
    pub fn simulate_sphere(&self) -> Result<Float64Array, JsValue> {
        let walk = self
            .simulation
            .simulate_sphere()
            .map_err(|e| JsValue::from_str(&format!("Sphere simulation failed: {e}")))?;
        Ok(Float64Array::from(flatten(walk.trajectory.points()).as_slice()))
    }

    /// Same walk, rotated so the last point sits at the north pole.
    pub fn simulate_sphere_anchored(&self) -> Result<Float64Array, JsValue> {
        let walk = self
            .simulation
            .simulate_sphere()
            .map_err(|e| JsValue::from_str(&format!("Sphere simulation failed: {e}")))?;
        Ok(Float64Array::from(flatten(&walk.anchored_at_last()).as_slice()))
    }

    /// Cylinder walk with its absorption step, if any.
    pub fn simulate_cylinder(&self) -> Result<JsValue, JsValue> {
        let walk = self
            .simulation
            .simulate_cylinder()
            .map_err(|e| JsValue::from_str(&format!("Cylinder simulation failed: {e}")))?;
        to_value(&walk).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn sphere_mesh(&self, resolution: JsValue) -> Result<JsValue, JsValue> {
        let resolution: MeshResolution = optional_from_value(resolution, "mesh resolution")?;
        let grid = self
            .simulation
            .sphere_mesh_with(resolution)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_value(&grid).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn cylinder_mesh(&self, resolution: JsValue) -> Result<JsValue, JsValue> {
        let resolution: MeshResolution = optional_from_value(resolution, "mesh resolution")?;
        let grid = self
            .simulation
            .cylinder_mesh_with(resolution)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_value(&grid).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Up to four snapshots of one sphere walk; an empty `steps` shows the whole walk.
    pub fn sphere_plot(&self, steps: Vec<u32>, style: JsValue) -> Result<JsValue, JsValue> {
        let style: PlotStyle = optional_from_value(style, "plot style")?;
        let plot =
            sphere_plot(&self.simulation, &to_steps(&steps), &style).map_err(to_js_error)?;
        to_value(&plot).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn cylinder_plot(&self, steps: Vec<u32>, style: JsValue) -> Result<JsValue, JsValue> {
        let style: PlotStyle = optional_from_value(style, "plot style")?;
        let plot =
            cylinder_plot(&self.simulation, &to_steps(&steps), &style).map_err(to_js_error)?;
        to_value(&plot).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn surface_plot(&self, style: JsValue) -> Result<JsValue, JsValue> {
        let style: PlotStyle = optional_from_value(style, "plot style")?;
        let plot = surface_plot(&self.simulation, &style).map_err(to_js_error)?;
        to_value(&plot).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::WasmManifold;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[derive(Serialize)]
    struct Config<'a> {
        kind: &'a str,
        n_steps: usize,
        seed: u64,
    }

    fn config(kind: &str, n_steps: usize) -> wasm_bindgen::JsValue {
        to_value(&Config {
            kind,
            n_steps,
            seed: 5,
        })
        .expect("config")
    }

    #[wasm_bindgen_test]
    fn constructor_rejects_unknown_manifold() {
        let result = WasmManifold::new(config("torus", 10));
        assert!(result.is_err(), "torus should be rejected");
        let message = result
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("torus is not a recognized manifold"));
    }

    #[wasm_bindgen_test]
    fn simulate_sphere_returns_flat_points() {
        let manifold = WasmManifold::new(config("sphere", 25)).expect("manifold");
        let flat = manifold.simulate_sphere().expect("walk").to_vec();
        assert_eq!(flat.len(), 75);
        for p in flat.chunks(3) {
            let norm = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[wasm_bindgen_test]
    fn sphere_plot_rejects_too_many_snapshots() {
        let manifold = WasmManifold::new(config("sphere", 25)).expect("manifold");
        let result = manifold.sphere_plot(vec![1, 2, 3, 4, 5], wasm_bindgen::JsValue::UNDEFINED);
        let message = result
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("up to 4 snapshots"));
    }
}
