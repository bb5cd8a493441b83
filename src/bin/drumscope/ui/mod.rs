//! Terminal UI: scope canvas, spectrum pane, info/log pane.

mod scope;
mod spectrum;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Drumscope;

pub fn render(frame: &mut Frame, app: &Drumscope) {
    // Left: waveform scope. Right: spectrum on top, info/log below.
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(frame.area());

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    scope::render_scope(frame, main_chunks[0], app);
    spectrum::render_spectrum(frame, right_chunks[0], &app.last_frame, app.sample_rate);
    render_info(frame, right_chunks[1], app);
}

fn render_info(frame: &mut Frame, area: ratatui::layout::Rect, app: &Drumscope) {
    let toggle = |on: bool| if on { "on" } else { "off" };

    let mut lines = vec![
        Line::from("k/h/c/s: kick hihat clap snare   q: quit"),
        Line::from(format!(
            "g: grid [{}]   x: axes [{}]   l: dump [{}]",
            toggle(app.options.show_grid),
            toggle(app.options.show_axes),
            toggle(app.options.log_collector),
        )),
        Line::from(format!(
            "{} Hz   {} merged samples   {} capture(s) in flight",
            app.sample_rate,
            app.merged.len(),
            app.active_captures,
        )),
    ];
    for entry in &app.log {
        lines.push(Line::styled(
            entry.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let info = Paragraph::new(lines).block(Block::default().title(" Info ").borders(Borders::ALL));
    frame.render_widget(info, area);
}
