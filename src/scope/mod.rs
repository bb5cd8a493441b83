//! Waveform plotting onto an abstract 2D drawing surface.
//!
//! The scope consumes the reconciled amplitude sequence plus two visual
//! toggles, and talks to any surface that can clear itself and stroke
//! lines. The TUI adapts a ratatui canvas; tests record draw commands with
//! [`RecordingSurface`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crosshair axis distance from the left and top edges, in surface units.
pub const AXIS_OFFSET: u32 = 40;
/// Grid spacing is the surface extent divided by this many divisions.
pub const GRID_DIVISIONS: u32 = 60;

/// Minimal drawing contract: geometry query, clear, stroke-line.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self);
    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);
}

/// The demo's configuration surface: two visual toggles plus the
/// post-reconciliation collector dump. Plain state, no validation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct ScopeOptions {
    pub show_grid: bool,
    pub show_axes: bool,
    /// Dump the raw collector state after each reconciliation.
    pub log_collector: bool,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_axes: true,
            log_collector: false,
        }
    }
}

/// The one fatal, not-retried failure in the renderer.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("drawing surface is degenerate ({width}x{height})")]
    DegenerateSurface { width: u32, height: u32 },
}

/// Grid spacing for a surface: the larger axis divided into
/// [`GRID_DIVISIONS`], never below one unit.
pub fn grid_spacing(width: u32, height: u32) -> u32 {
    (width / GRID_DIVISIONS).max(height / GRID_DIVISIONS).max(1)
}

/// Plot a reconciled waveform.
///
/// Clears the surface, optionally draws the uniform grid and crosshair
/// axes, then strokes the amplitude polyline: `[0,256)` maps linearly onto
/// the vertical extent (255 at the top), horizontal positions spread evenly
/// across the usable width right of the axis offset.
pub fn draw_scope(
    surface: &mut impl DrawSurface,
    samples: &[u8],
    options: &ScopeOptions,
) -> Result<(), ScopeError> {
    let width = surface.width();
    let height = surface.height();
    if width == 0 || height == 0 {
        return Err(ScopeError::DegenerateSurface { width, height });
    }

    surface.clear();

    if options.show_grid {
        draw_grid(surface, width, height);
    }
    if options.show_axes {
        draw_axes(surface, width, height);
    }

    draw_polyline(surface, samples, width, height);
    Ok(())
}

/// Uniform grid, phase-aligned so a line always passes through the
/// crosshair origin at ([`AXIS_OFFSET`], [`AXIS_OFFSET`]).
fn draw_grid(surface: &mut impl DrawSurface, width: u32, height: u32) {
    let spacing = grid_spacing(width, height);
    let phase = AXIS_OFFSET % spacing;

    let mut x = phase;
    while x < width {
        surface.line(x as f64, 0.0, x as f64, height as f64);
        x += spacing;
    }

    let mut y = phase;
    while y < height {
        surface.line(0.0, y as f64, width as f64, y as f64);
        y += spacing;
    }
}

/// Crosshair axes at a fixed offset from the left and top edges.
fn draw_axes(surface: &mut impl DrawSurface, width: u32, height: u32) {
    let offset = AXIS_OFFSET as f64;
    surface.line(offset, 0.0, offset, height as f64);
    surface.line(0.0, offset, width as f64, offset);
}

fn draw_polyline(surface: &mut impl DrawSurface, samples: &[u8], width: u32, height: u32) {
    if samples.len() < 2 {
        return;
    }

    let usable = width.saturating_sub(AXIS_OFFSET) as f64;
    let dx = usable / samples.len() as f64;
    let h = height as f64;

    let point = |i: usize, amplitude: u8| -> (f64, f64) {
        let x = AXIS_OFFSET as f64 + i as f64 * dx;
        let y = h - (amplitude as f64 / 256.0) * h;
        (x, y)
    };

    let mut previous = point(0, samples[0]);
    for (i, &amplitude) in samples.iter().enumerate().skip(1) {
        let current = point(i, amplitude);
        surface.line(previous.0, previous.1, current.0, current.1);
        previous = current;
    }
}

/// A draw command captured by [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCmd {
    Clear,
    Line { x0: f64, y0: f64, x1: f64, y1: f64 },
}

/// In-memory surface that records every draw command, for headless
/// consumers and the test suite.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCmd::Line { x0, y0, x1, y1 } => Some((x0, y0, x1, y1)),
            DrawCmd::Clear => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCmd::Clear);
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.commands.push(DrawCmd::Line { x0, y0, x1, y1 });
    }
}
