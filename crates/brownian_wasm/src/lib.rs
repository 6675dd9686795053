//! WASM bridge: builds simulations from JS configuration and ships walks,
//! meshes and plot payloads back as plain data.

use wasm_bindgen::prelude::*;

mod plot;
mod system;

pub use plot::{PlotStyle, SurfacePlot, TrajectoryPlot};
pub use system::WasmManifold;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[cfg(test)]
mod tests {
    use super::{PlotStyle, SurfacePlot, TrajectoryPlot, WasmManifold};

    #[test]
    fn bridge_reexports_are_wired() {
        assert!(std::any::type_name::<WasmManifold>().ends_with("WasmManifold"));
        assert!(std::any::type_name::<PlotStyle>().ends_with("PlotStyle"));
        assert!(std::any::type_name::<TrajectoryPlot>().ends_with("TrajectoryPlot"));
        assert!(std::any::type_name::<SurfacePlot>().ends_with("SurfacePlot"));
    }
}
