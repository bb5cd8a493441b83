//! Waveform scope widget: paints the recorded draw commands onto a
//! braille canvas.

use ratatui::{
    layout::Rect,
    style::Color,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

use drumscope::scope::{draw_scope, DrawSurface, RecordingSurface};

use crate::app::Drumscope;

pub fn render_scope(frame: &mut Frame, area: Rect, app: &Drumscope) {
    // Braille resolution: 2x4 dots per cell. Skip degenerate areas; the
    // library treats them as fatal but a collapsed terminal is transient.
    let inner_w = area.width.saturating_sub(2) as u32 * 2;
    let inner_h = area.height.saturating_sub(2) as u32 * 4;
    if inner_w == 0 || inner_h == 0 {
        return;
    }

    let mut surface = RecordingSurface::new(inner_w, inner_h);
    if draw_scope(&mut surface, &app.merged, &app.options).is_err() {
        return;
    }

    let w = surface.width() as f64;
    let h = surface.height() as f64;

    let canvas = Canvas::default()
        .block(Block::default().title(" Waveform ").borders(Borders::ALL))
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            for (x0, y0, x1, y1) in surface.lines() {
                // Full-extent axis-aligned lines are grid/axes chrome;
                // everything else is the waveform itself. Surface y grows
                // downward, canvas y grows upward.
                let chrome = (x0 == x1 && y0 == 0.0 && y1 == h)
                    || (y0 == y1 && x0 == 0.0 && x1 == w);
                ctx.draw(&CanvasLine {
                    x1: x0,
                    y1: h - y0,
                    x2: x1,
                    y2: h - y1,
                    color: if chrome { Color::DarkGray } else { Color::Cyan },
                });
            }
        });

    frame.render_widget(canvas, area);
}
