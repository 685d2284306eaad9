//! Replays a scripted pointer path through a sketch and logs the resulting CSS.
//!
//! ```text
//! RUST_LOG=info cargo run --example pointer_sweep -- [config.toml]
//! ```

use slantwise::backends::virtual_pointer::VirtualPointer;
use slantwise::{Config, LogSink, Sketch};
use std::time::Duration;

fn main() -> slantwise::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let (w, h) = (config.viewport.width, config.viewport.height);

    let mut sketch = Sketch::new(&config, LogSink::new())?;

    // Diagonal sweep, a press in the middle, then back.
    let mut pointer = VirtualPointer::new("virtual:demo", "Demo Pointer");
    pointer.sweep((0.0, 0.0), (w, h), 8);
    pointer.press_at(w / 2.0, h / 4.0);
    pointer.sweep((w, h), (0.0, 0.0), 8);
    sketch.add_source(pointer);

    // Stop the loop after a second.
    let cancel = sketch.cancel_flag();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_secs(1));
        cancel.cancel();
    });

    let frames = sketch.run()?;
    log::info!("produced {frames} frame(s)");
    Ok(())
}
