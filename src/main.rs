//! ndscatter demo - drives the engine headlessly with a logging renderer.
//!
//! Loads a synthetic five-dimensional dataset, simulates a few interactions,
//! and logs what each frame hands to the renderer. Run with
//! `RUST_LOG=info cargo run`.

use anyhow::Result;

use ndscatter::{
    ColumnSet, Modifiers, PointerButton, PointerEvent, Scatter, ScatterConfig, Viewport,
};
use ndscatter_render::{DrawFrame, PointRenderer};

/// Renderer stand-in that reports draw-call statistics instead of drawing.
struct LoggingRenderer {
    frames: usize,
}

impl PointRenderer for LoggingRenderer {
    fn draw(&mut self, frame: DrawFrame<'_>) {
        self.frames += 1;
        let visible = frame.colors[..frame.point_count as usize]
            .iter()
            .filter(|c| c.a > 0)
            .count();
        log::info!(
            "frame {}: {} points ({} visible) + {} axis vertices",
            self.frames,
            frame.point_count,
            visible,
            frame.axis_vertex_count
        );
    }
}

fn synthetic_columns() -> ColumnSet {
    let npoint = 500;
    let mut set = ColumnSet::new();
    for d in 0..5 {
        let values = (0..npoint)
            .map(|i| {
                let t = i as f64 * 0.02;
                (t * (d + 1) as f64).sin() * (1.0 - t * 0.05).max(0.2)
            })
            .collect();
        set = set.column(format!("E{}", d + 1), values);
    }
    let labels = (0..npoint)
        .map(|i| ["spiral", "ring", "noise"][i % 3].to_string())
        .collect();
    set.labels(labels)
}

fn run() -> Result<()> {
    env_logger::init();

    let config = ScatterConfig::load_default();
    let mut scatter = Scatter::new(&config, Viewport::new(800, 600, 1.0));
    let mut renderer = LoggingRenderer { frames: 0 };

    scatter.load_data(synthetic_columns())?;
    scatter.tick(&mut renderer);

    // Drag the first axis handle a short way and re-render.
    let handle = scatter.handle_positions()[0];
    scatter.pointer(PointerEvent::Down {
        x: handle.towards[0],
        y: handle.towards[1],
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    scatter.pointer(PointerEvent::Move {
        x: handle.towards[0] + 40.0,
        y: handle.towards[1] - 25.0,
    });
    scatter.pointer(PointerEvent::Up {
        x: handle.towards[0] + 40.0,
        y: handle.towards[1] - 25.0,
    });
    scatter.tick(&mut renderer);

    // Lasso everything and report the selection.
    scatter.pointer(PointerEvent::Down {
        x: -10_000.0,
        y: -10_000.0,
        button: PointerButton::Primary,
        modifiers: Modifiers::shift(),
    });
    for (x, y) in [
        (10_000.0, -10_000.0),
        (10_000.0, 10_000.0),
        (-10_000.0, 10_000.0),
    ] {
        scatter.pointer(PointerEvent::Move { x, y });
    }
    scatter.pointer(PointerEvent::Up { x: -10_000.0, y: 10_000.0 });
    scatter.tick(&mut renderer);
    log::info!("lasso selected {} points", scatter.selected_points().len());

    for event in scatter.drain_events() {
        log::debug!("event: {event:?}");
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
    }
}
