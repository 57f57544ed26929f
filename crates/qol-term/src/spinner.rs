// SPDX-License-Identifier: MIT
//
// Spinner: an unbounded activity indicator on an anchored line.
//
// A spinner has the same lifecycle as a progress bar (Idle → Active →
// Finished | Aborted) but no total: every `tick` advances the glyph index
// and redraws, and the glyph shown is `frames[ticks % frames.len()]`.
//
// Ticking is caller-driven by default. `BackgroundSpinner` moves the
// ticking onto one dedicated worker thread:
//
//   - the spinner sits behind a mutex, so a frame is never written while
//     another is half-written (the caller's `update_message` redraws too)
//   - the worker sleeps with `park_timeout`, so stopping it is immediate
//   - the worker is stopped and joined before the line region is closed,
//     so nothing is written after the cursor has been restored

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::color::Color;
use crate::line::{Anchor, LineRenderer};
use crate::progress::ProgressState;
use crate::style::Style;
use crate::terminal::Capabilities;

// ─── Frame Sets ──────────────────────────────────────────────────────────────

/// Braille dots, the default.
pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// ASCII line, for terminals without braille glyphs.
pub const LINE: &[&str] = &["-", "\\", "|", "/"];

pub const MOON: &[&str] = &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"];

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerConfig {
    /// Glyphs cycled through, one per tick.
    pub frames: Vec<String>,
    /// Time between ticks when driven by a [`BackgroundSpinner`].
    pub interval: Duration,
    pub anchor: Anchor,
    /// Style of the glyph; the message is written as given.
    pub style: Style,
}

impl SpinnerConfig {
    /// Default configuration with another frame set.
    #[must_use]
    pub fn with_frames(frames: &[&str]) -> Self {
        Self {
            frames: frames.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            frames: DOTS.iter().map(ToString::to_string).collect(),
            interval: Duration::from_millis(100),
            anchor: Anchor::CurrentLine,
            style: Style::new().fg(Color::CYAN),
        }
    }
}

// ─── Spinner ─────────────────────────────────────────────────────────────────

pub struct Spinner<W: Write> {
    line: LineRenderer<W>,
    config: SpinnerConfig,
    message: String,
    state: ProgressState,
    ticks: usize,
}

impl Spinner<io::Stdout> {
    #[must_use]
    pub fn stdout(message: &str) -> Self {
        Self::with_line(LineRenderer::stdout(), message, SpinnerConfig::default())
    }
}

impl<W: Write> Spinner<W> {
    pub fn new(out: W, caps: Capabilities, message: &str) -> Self {
        Self::with_config(out, caps, message, SpinnerConfig::default())
    }

    pub fn with_config(out: W, caps: Capabilities, message: &str, config: SpinnerConfig) -> Self {
        Self::with_line(LineRenderer::new(out, caps), message, config)
    }

    fn with_line(line: LineRenderer<W>, message: &str, config: SpinnerConfig) -> Self {
        Self {
            line,
            config,
            message: message.to_string(),
            state: ProgressState::Idle,
            ticks: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ProgressState {
        self.state
    }

    #[must_use]
    pub const fn ticks(&self) -> usize {
        self.ticks
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.config.interval
    }

    pub const fn line(&self) -> &LineRenderer<W> {
        &self.line
    }

    /// The glyph for the current tick, unstyled.
    #[must_use]
    pub fn glyph(&self) -> &str {
        let frames = &self.config.frames;
        if frames.is_empty() {
            return "";
        }
        &frames[self.ticks % frames.len()]
    }

    /// The text of the current frame: styled glyph, space, message.
    #[must_use]
    pub fn frame(&self) -> String {
        let glyph = self.glyph();
        match (glyph.is_empty(), self.message.is_empty()) {
            (true, _) => self.message.clone(),
            (false, true) => self.config.style.paint(glyph),
            (false, false) => format!("{} {}", self.config.style.paint(glyph), self.message),
        }
    }

    /// Enter the Active state and draw the first glyph. No-op unless Idle.
    pub fn start(&mut self) -> io::Result<()> {
        if self.state != ProgressState::Idle {
            return Ok(());
        }
        self.state = ProgressState::Active;
        self.ticks = 0;
        self.draw()
    }

    /// Advance one glyph and redraw. Starts an Idle spinner.
    pub fn tick(&mut self) -> io::Result<()> {
        match self.state {
            ProgressState::Idle => self.start(),
            ProgressState::Active => {
                self.ticks = self.ticks.wrapping_add(1);
                self.draw()
            }
            ProgressState::Finished | ProgressState::Aborted => Ok(()),
        }
    }

    /// Replace the message, redrawing right away while active.
    pub fn update_message(&mut self, message: &str) -> io::Result<()> {
        self.message = message.to_string();
        if self.state == ProgressState::Active {
            self.draw()
        } else {
            Ok(())
        }
    }

    /// Erase the spinner line and close it.
    pub fn finish(&mut self) -> io::Result<()> {
        self.finish_with("")
    }

    /// Replace the spinner line with `message` and close it.
    pub fn finish_with(&mut self, message: &str) -> io::Result<()> {
        if matches!(self.state, ProgressState::Finished | ProgressState::Aborted) {
            return Ok(());
        }
        self.state = ProgressState::Finished;
        self.line.finish_with(message)
    }

    /// Stop where it is; the last frame stays on screen.
    pub fn abort(&mut self) -> io::Result<()> {
        if matches!(self.state, ProgressState::Finished | ProgressState::Aborted) {
            return Ok(());
        }
        self.state = ProgressState::Aborted;
        self.line.finish()
    }

    fn draw(&mut self) -> io::Result<()> {
        let frame = self.frame();
        tracing::trace!(tick = self.ticks, "spinner redraw");
        self.line.render_line(&frame, Some(self.config.anchor))
    }
}

impl<W: Write> Drop for Spinner<W> {
    fn drop(&mut self) {
        if let Err(err) = self.abort() {
            tracing::debug!(%err, "spinner cleanup failed");
        }
    }
}

// ─── Background Ticking ──────────────────────────────────────────────────────

/// A spinner ticked by a dedicated worker thread.
///
/// The worker stops and is joined on `finish`, `finish_with`, `abort` or
/// drop, always before the spinner's line is closed.
pub struct BackgroundSpinner<W: Write + Send + 'static> {
    spinner: Arc<Mutex<Spinner<W>>>,
    stop: Arc<AtomicBool>,
    /// `None` once joined, or if the worker could not be spawned.
    handle: Option<JoinHandle<()>>,
}

impl<W: Write + Send + 'static> BackgroundSpinner<W> {
    /// Draw the first frame and start the worker.
    ///
    /// If the OS refuses a new thread the spinner still shows its first
    /// frame and cleans up normally; it just doesn't animate.
    pub fn start(mut spinner: Spinner<W>) -> Self {
        if let Err(err) = spinner.start() {
            tracing::debug!(%err, "spinner start failed");
        }
        let interval = spinner.interval();
        let spinner = Arc::new(Mutex::new(spinner));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let spinner = Arc::clone(&spinner);
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("qol-spinner".into())
                .spawn(move || Self::worker_loop(&spinner, &stop, interval))
        };
        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(%err, "could not spawn spinner thread");
                None
            }
        };

        Self {
            spinner,
            stop,
            handle,
        }
    }

    fn worker_loop(spinner: &Mutex<Spinner<W>>, stop: &AtomicBool, interval: Duration) {
        loop {
            thread::park_timeout(interval);
            if stop.load(Ordering::Acquire) {
                break;
            }
            if let Err(err) = lock(spinner).tick() {
                tracing::debug!(%err, "spinner tick failed, stopping");
                break;
            }
        }
    }

    pub fn update_message(&self, message: &str) {
        if let Err(err) = lock(&self.spinner).update_message(message) {
            tracing::debug!(%err, "spinner redraw failed");
        }
    }

    #[must_use]
    pub fn ticks(&self) -> usize {
        lock(&self.spinner).ticks()
    }

    pub fn finish(self) -> io::Result<()> {
        self.finish_with("")
    }

    pub fn finish_with(mut self, message: &str) -> io::Result<()> {
        self.stop_worker();
        lock(&self.spinner).finish_with(message)
    }

    pub fn abort(mut self) -> io::Result<()> {
        self.stop_worker();
        lock(&self.spinner).abort()
    }

    /// Signal the worker and wait for it. Idempotent.
    fn stop_worker(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl<W: Write + Send + 'static> Drop for BackgroundSpinner<W> {
    fn drop(&mut self) {
        self.stop_worker();
        if let Err(err) = lock(&self.spinner).abort() {
            tracing::debug!(%err, "spinner cleanup failed");
        }
    }
}

/// A panic on the worker poisons the mutex; the spinner state is still
/// usable for cleanup.
fn lock<W: Write>(spinner: &Mutex<Spinner<W>>) -> MutexGuard<'_, Spinner<W>> {
    spinner.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─── Scoped Use ──────────────────────────────────────────────────────────────

/// Run `body` while a spinner animates on stdout.
///
/// On `Ok` the spinner line is erased; on `Err` the last frame stays and
/// the error is returned unchanged. The worker is joined and the cursor
/// shown before this returns.
pub fn with_spinner<T, E>(
    message: &str,
    body: impl FnOnce(&BackgroundSpinner<io::Stdout>) -> Result<T, E>,
) -> Result<T, E> {
    run_spinner(Spinner::stdout(message), body)
}

/// [`with_spinner`] over any spinner.
pub fn run_spinner<W: Write + Send + 'static, T, E>(
    spinner: Spinner<W>,
    body: impl FnOnce(&BackgroundSpinner<W>) -> Result<T, E>,
) -> Result<T, E> {
    let background = BackgroundSpinner::start(spinner);
    let result = body(&background);
    let cleanup = if result.is_ok() {
        background.finish()
    } else {
        background.abort()
    };
    if let Err(err) = cleanup {
        tracing::debug!(%err, "spinner cleanup failed");
    }
    result
}

// ─── Countdown ───────────────────────────────────────────────────────────────

/// Count down from `seconds` on one line, one step per `step`, then
/// replace the line with `end_message`.
pub fn countdown<W: Write>(
    line: &mut LineRenderer<W>,
    seconds: u32,
    message: &str,
    end_message: &str,
    step: Duration,
) -> io::Result<()> {
    let number = Style::new().fg(Color::YELLOW);
    for remaining in (1..=seconds).rev() {
        let text = format!("{message}: {} sec.", number.paint(&remaining.to_string()));
        line.render_line(&text, Some(Anchor::CurrentLine))?;
        if !step.is_zero() {
            thread::sleep(step);
        }
    }
    line.finish_with(end_message)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
