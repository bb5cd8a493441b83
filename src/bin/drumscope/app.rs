//! Drumscope - main application state and runner

use std::time::Duration;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use drumscope::{
    capture::{reconcile, CaptureTask, SampleCollector, Tap},
    scope::ScopeOptions,
    session::{AudioSession, SessionTap},
    voices::DrumKind,
    DEFAULT_CAPACITY,
};

use super::ui;

/// One display refresh opportunity; the redraw loop doubles as the frame
/// scheduler for in-flight captures.
const TICK: Duration = Duration::from_millis(16);
const LOG_LINES: usize = 8;

pub struct Drumscope {
    pub options: ScopeOptions,
    /// Waveform from the most recently finished capture.
    pub merged: Vec<u8>,
    /// Latest analyser window, feeding the spectrum pane.
    pub last_frame: Vec<u8>,
    pub log: Vec<String>,
    pub active_captures: usize,
    pub sample_rate: f64,
    captures: Vec<CaptureTask>,
}

impl Drumscope {
    pub fn new() -> Self {
        Self {
            options: ScopeOptions::default(),
            merged: Vec::new(),
            last_frame: Vec::new(),
            log: Vec::new(),
            active_captures: 0,
            sample_rate: 0.0,
            captures: Vec::new(),
        }
    }

    /// Run the application (takes over the terminal, plays audio).
    pub fn run(mut self) -> EyreResult<()> {
        let (session, tap) =
            AudioSession::start().wrap_err("failed to start the audio session")?;
        self.sample_rate = session.sample_rate();
        self.last_frame = vec![128; tap.frame_width()];

        let terminal = ratatui::init();
        let result = self.event_loop(terminal, session, tap);
        ratatui::restore();
        result
    }

    fn event_loop(
        &mut self,
        mut terminal: DefaultTerminal,
        mut session: AudioSession,
        mut tap: SessionTap,
    ) -> EyreResult<()> {
        loop {
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Char('k') | KeyCode::Char('1') => {
                                self.trigger(&mut session, &tap, DrumKind::Kick)
                            }
                            KeyCode::Char('h') | KeyCode::Char('2') => {
                                self.trigger(&mut session, &tap, DrumKind::Hihat)
                            }
                            KeyCode::Char('c') | KeyCode::Char('3') => {
                                self.trigger(&mut session, &tap, DrumKind::Clap)
                            }
                            KeyCode::Char('s') | KeyCode::Char('4') => {
                                self.trigger(&mut session, &tap, DrumKind::Snare)
                            }
                            KeyCode::Char('g') => {
                                self.options.show_grid = !self.options.show_grid
                            }
                            KeyCode::Char('x') => {
                                self.options.show_axes = !self.options.show_axes
                            }
                            KeyCode::Char('l') => {
                                self.options.log_collector = !self.options.log_collector
                            }
                            _ => {}
                        }
                    }
                }
            }

            self.advance_captures(&mut tap);

            // Refresh the spectrum window independently of any capture
            tap.read_into(&mut self.last_frame);

            terminal.draw(|frame| ui::render(frame, self))?;
        }
    }

    /// Start the sound and bind a fresh collector to the tap. The deadline
    /// is the voice's decay; teardown is the envelope going idle on the
    /// audio thread.
    fn trigger(&mut self, session: &mut AudioSession, tap: &SessionTap, kind: DrumKind) {
        session.trigger(kind);

        let collector =
            SampleCollector::new(tap.sample_rate(), tap.frame_width(), DEFAULT_CAPACITY);
        let deadline = tap.now() + kind.decay();
        self.captures.push(CaptureTask::new(collector, deadline));
        self.push_log(format!("trigger {} (deadline {:.3}s)", kind.label(), deadline));
    }

    /// One scheduler tick for every in-flight capture. Finished captures
    /// reconcile immediately; when several overlap, the last to finish
    /// overwrites the plot, same as overlapping renders racing on a shared
    /// canvas.
    fn advance_captures(&mut self, tap: &mut SessionTap) {
        for task in &mut self.captures {
            task.tick(tap);
        }

        let mut i = 0;
        while i < self.captures.len() {
            if self.captures[i].is_done() {
                let task = self.captures.remove(i);
                self.finish_capture(task);
            } else {
                i += 1;
            }
        }
        self.active_captures = self.captures.len();
    }

    fn finish_capture(&mut self, task: CaptureTask) {
        let collector = task.into_collector();
        self.merged = reconcile(&collector);

        if self.options.log_collector {
            let populated = collector.populated_frames().count();
            self.push_log(format!(
                "collector: {}/{} frames x {} samples @ {} Hz -> {} merged",
                populated,
                collector.capacity(),
                collector.frame_width(),
                collector.sample_rate(),
                self.merged.len(),
            ));
            if let Some(first) = collector.populated_frames().next() {
                self.push_log(format!("  first frame at {:.4}s", first.time_start));
            }
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > LOG_LINES {
            self.log.remove(0);
        }
    }
}

impl Default for Drumscope {
    fn default() -> Self {
        Self::new()
    }
}
