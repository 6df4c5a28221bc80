mod app;

use anyhow::Result;
use winit::dpi::LogicalSize;

use perspecta_core::{GridLayout, SceneConfig, Session, fixed_layout, jittered_grid};
use perspecta_engine::device::GpuInit;
use perspecta_engine::logging::{LoggingConfig, init_logging};
use perspecta_engine::window::{Runtime, RuntimeConfig};

use app::StudioApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = SceneConfig::default();

    let specs = match std::env::args().nth(1).as_deref() {
        Some("grid") => {
            let grid = GridLayout {
                canvas_width: config.canvas_width as f32,
                canvas_height: config.canvas_height as f32,
                ..GridLayout::default()
            };
            log::info!("layout: jittered {}x{} grid", grid.rows, grid.cols);
            jittered_grid(&grid, &mut rand::rng())
        }
        _ => {
            log::info!("layout: fixed");
            fixed_layout()
        }
    };

    let session = Session::new(config, &specs);

    let runtime = RuntimeConfig {
        title: "Homography Demo".to_string(),
        initial_size: LogicalSize::new(config.canvas_width as f64, config.canvas_height as f64),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), StudioApp::new(session))
}
