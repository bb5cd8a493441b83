//! Spectrum pane over the latest analyser window.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, FftPlanner};

pub fn render_spectrum(frame: &mut Frame, area: Rect, window: &[u8], sample_rate: f64) {
    let data = compute_spectrum(window, sample_rate);

    let dataset = Dataset::default()
        .name("Spectrum")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let max_freq = data.iter().map(|(f, _)| *f).fold(1.0f64, f64::max);
    let max_db = data.iter().map(|(_, db)| *db).fold(-100.0f64, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Hz")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_freq]),
        )
        .y_axis(
            Axis::default()
                .title("dB")
                .style(Style::default().fg(Color::Gray))
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"]),
        );

    frame.render_widget(chart, area);
}

/// Hann-windowed FFT magnitudes on log-spaced frequency bins.
fn compute_spectrum(window: &[u8], sample_rate: f64) -> Vec<(f64, f64)> {
    let n = window.len();
    if n == 0 || sample_rate <= 0.0 {
        return Vec::new();
    }

    // Analyser bytes center on 128; recenter before windowing
    let mut buffer: Vec<Complex<f32>> = window
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            let sample = (byte as f32 - 128.0) / 128.0;
            let hann = if n > 1 {
                let denom = (n - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
            } else {
                1.0
            };
            Complex::new(sample * hann, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let min_freq = 20.0f64;
    let max_freq = (sample_rate / 2.0).min(20_000.0);
    let num_bins = 48;

    let mut spectrum = Vec::new();
    for i in 0..num_bins {
        let t = i as f64 / (num_bins - 1) as f64;
        let freq = min_freq * (max_freq / min_freq).powf(t);

        let bin_index = (freq * n as f64 / sample_rate).round() as usize;
        if bin_index >= buffer.len() / 2 {
            break;
        }

        let c = &buffer[bin_index];
        let magnitude = (c.re * c.re + c.im * c.im).sqrt();
        let magnitude_db = if magnitude > 1e-10 {
            20.0 * (magnitude as f64).log10()
        } else {
            -100.0
        };

        spectrum.push((freq, magnitude_db));
    }

    spectrum
}
