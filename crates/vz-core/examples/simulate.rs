//! Simulates a hold-to-zoom session against a stdout surface.
//!
//! Run with `RUST_LOG=trace cargo run --example simulate` to watch the
//! chord tracker and router edges fire.

use vz_core::{SurfaceRect, ZoomConfig, ZoomPanController, ZoomSurface};

#[derive(Clone)]
struct StdoutSurface;

impl ZoomSurface for StdoutSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        SurfaceRect {
            left: 50.0,
            top: 20.0,
            width: 640.0,
            height: 360.0,
        }
    }
    fn set_scale(&self, scale: f64) {
        println!("  style: transform: scale({scale:.3})");
    }
    fn set_transform_origin(&self, x: f64, y: f64) {
        println!("  style: transform-origin: {x:.1}px {y:.1}px");
    }
    fn set_shortcut_active(&self, active: bool) {
        println!("  class: vz-active {}", if active { "on" } else { "off" });
    }
    fn capture_pointer(&self, pointer_id: i32) {
        println!("  capture pointer {pointer_id}");
    }
}

fn main() {
    env_logger::init();

    let config = ZoomConfig {
        zoom_speed: 0.3,
        smoothing: 4,
        ..ZoomConfig::default()
    };
    let mut controller = match ZoomPanController::new(StdoutSurface, config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("bad config: {e}");
            std::process::exit(1);
        }
    };

    println!("hold shift, scroll in, sweep the pointer:");
    controller.key_down("Shift");
    controller.wheel(-250.0);
    for step in 0..8 {
        controller.pointer_move(100.0 + step as f64 * 60.0, 120.0);
        controller.frame();
    }

    println!("release shift (frames go quiet):");
    controller.key_up("Shift");
    controller.frame();

    println!("destroy:");
    controller.destroy();
    println!("level at teardown: {:.3}", controller.level());
}
