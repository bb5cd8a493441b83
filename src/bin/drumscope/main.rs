//! drumscope - trigger synthesized drums and watch the captured waveform
//!
//! Run with: cargo run
//!
//! Keys: k/h/c/s (or 1-4) trigger kick, hihat, clap, snare.
//! g toggles the grid, x the axes, l the collector dump, q quits.

mod app;
mod ui;

use app::Drumscope;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    Drumscope::new().run()
}
