// SPDX-License-Identifier: MIT
//
// Progress bar: a bounded counter drawn in place on an anchored line.
//
// Lifecycle:
//
//   Idle ──start──▶ Active ──finish──▶ Finished
//                     │
//                     └──abort / drop──▶ Aborted
//
// `start` records the start time and draws a 0% frame. Each `update`
// moves `current` (clamped to `[0, total]`) and redraws only when one of
// these holds:
//
//   - it is the first update since `start`
//   - `current` has just reached `total`
//   - at least `min_interval` has passed since the last frame
//
// so a tight loop of updates costs a handful of writes while the first
// and last frames are never skipped. `finish` forces a final 100% frame;
// `abort` (and `Drop` on an unfinished bar) leaves the last frame as it
// was. Both close the line region, which shows the cursor again.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::line::{Anchor, LineRenderer};
use crate::terminal::Capabilities;

// ─── Configuration ───────────────────────────────────────────────────────────

/// How a progress bar looks and how often it redraws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Width of the bar between the brackets, in columns.
    pub bar_width: usize,
    pub complete: char,
    pub incomplete: char,
    pub show_percentage: bool,
    /// Show `current/total`.
    pub show_counter: bool,
    /// Show elapsed and estimated remaining time.
    pub show_timing: bool,
    /// Minimum time between two throttled redraws.
    pub min_interval: Duration,
    pub anchor: Anchor,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            bar_width: 50,
            complete: '█',
            incomplete: '░',
            show_percentage: true,
            show_counter: true,
            show_timing: true,
            min_interval: Duration::from_millis(100),
            anchor: Anchor::CurrentLine,
        }
    }
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Idle,
    Active,
    Finished,
    Aborted,
}

// ─── ProgressBar ─────────────────────────────────────────────────────────────

pub struct ProgressBar<W: Write> {
    line: LineRenderer<W>,
    config: ProgressConfig,
    total: u64,
    current: u64,
    description: String,
    state: ProgressState,
    started_at: Instant,
    last_render_at: Option<Instant>,
    /// Set once the first `update` after `start` has been seen.
    updated: bool,
    redraws: usize,
}

impl ProgressBar<io::Stdout> {
    /// A bar on stdout with default configuration.
    #[must_use]
    pub fn stdout(total: u64, description: &str) -> Self {
        Self::with_line(LineRenderer::stdout(), total, description, ProgressConfig::default())
    }
}

impl<W: Write> ProgressBar<W> {
    pub fn new(out: W, caps: Capabilities, total: u64, description: &str) -> Self {
        Self::with_config(out, caps, total, description, ProgressConfig::default())
    }

    pub fn with_config(
        out: W,
        caps: Capabilities,
        total: u64,
        description: &str,
        config: ProgressConfig,
    ) -> Self {
        Self::with_line(LineRenderer::new(out, caps), total, description, config)
    }

    fn with_line(line: LineRenderer<W>, total: u64, description: &str, config: ProgressConfig) -> Self {
        Self {
            line,
            config,
            total,
            current: 0,
            description: description.to_string(),
            state: ProgressState::Idle,
            started_at: Instant::now(),
            last_render_at: None,
            updated: false,
            redraws: 0,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub const fn state(&self) -> ProgressState {
        self.state
    }

    #[must_use]
    pub const fn position(&self) -> u64 {
        self.current
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of frames written so far, the initial frame included.
    #[must_use]
    pub const fn redraws(&self) -> usize {
        self.redraws
    }

    pub const fn line(&self) -> &LineRenderer<W> {
        &self.line
    }

    /// Completed fraction in `[0.0, 1.0]`.
    ///
    /// A zero total reads as empty until the bar finishes, then full.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return if self.state == ProgressState::Finished { 1.0 } else { 0.0 };
        }
        #[allow(clippy::cast_precision_loss)]
        let f = self.current as f64 / self.total as f64;
        f.clamp(0.0, 1.0)
    }

    /// Completed percentage, rounded down, so 100 appears only at the end.
    #[must_use]
    pub fn percent(&self) -> u64 {
        self.scaled(100)
    }

    /// `current / total` of `n`, rounded down.
    fn scaled(&self, n: u64) -> u64 {
        if self.total == 0 {
            return if self.state == ProgressState::Finished { n } else { 0 };
        }
        let v = u128::from(self.current) * u128::from(n) / u128::from(self.total);
        u64::try_from(v).unwrap_or(n)
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Enter the Active state and draw the 0% frame. No-op unless Idle.
    pub fn start(&mut self) -> io::Result<()> {
        if self.state != ProgressState::Idle {
            return Ok(());
        }
        self.state = ProgressState::Active;
        self.started_at = Instant::now();
        self.updated = false;
        self.draw()
    }

    /// Set the position to `value` (clamped), or advance by one when
    /// `None`. Starts the bar if it is still Idle; ignored once it has
    /// finished or aborted.
    pub fn update(&mut self, value: Option<u64>) -> io::Result<()> {
        match self.state {
            ProgressState::Idle => self.start()?,
            ProgressState::Active => {}
            ProgressState::Finished | ProgressState::Aborted => return Ok(()),
        }

        let previous = self.current;
        self.current = match value {
            Some(v) => v.min(self.total),
            None => self.current.saturating_add(1).min(self.total),
        };

        let first = !self.updated;
        self.updated = true;
        let reached_end = self.current == self.total && previous != self.total;
        let due = self
            .last_render_at
            .is_none_or(|t| t.elapsed() >= self.config.min_interval);

        if first || reached_end || due {
            self.draw()
        } else {
            tracing::trace!(current = self.current, "progress redraw throttled");
            Ok(())
        }
    }

    pub fn set(&mut self, value: u64) -> io::Result<()> {
        self.update(Some(value))
    }

    /// Advance by `n`.
    pub fn inc(&mut self, n: u64) -> io::Result<()> {
        let target = self.current.saturating_add(n);
        self.update(Some(target))
    }

    pub fn tick(&mut self) -> io::Result<()> {
        self.update(None)
    }

    /// Change the description; shown from the next frame on.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Complete the bar: draw a full frame, then close the line.
    pub fn finish(&mut self) -> io::Result<()> {
        match self.state {
            ProgressState::Finished | ProgressState::Aborted => return Ok(()),
            ProgressState::Idle => self.started_at = Instant::now(),
            ProgressState::Active => {}
        }
        self.current = self.total;
        self.state = ProgressState::Finished;
        self.draw()?;
        self.line.finish()
    }

    /// Stop without completing; the last frame stays as drawn.
    pub fn abort(&mut self) -> io::Result<()> {
        if matches!(self.state, ProgressState::Finished | ProgressState::Aborted) {
            return Ok(());
        }
        self.state = ProgressState::Aborted;
        self.line.finish()
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// The text of the current frame.
    #[must_use]
    pub fn frame(&self) -> String {
        let width = self.config.bar_width;
        let filled = usize::try_from(self.scaled(width as u64)).unwrap_or(width).min(width);

        let mut parts: Vec<String> = Vec::with_capacity(5);
        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }

        let mut bar = String::with_capacity(width * 3 + 2);
        bar.push('[');
        bar.extend(std::iter::repeat_n(self.config.complete, filled));
        bar.extend(std::iter::repeat_n(self.config.incomplete, width - filled));
        bar.push(']');
        parts.push(bar);

        if self.config.show_percentage {
            parts.push(format!("{}%", self.percent()));
        }
        if self.config.show_counter {
            parts.push(format!("{}/{}", self.current, self.total));
        }
        if self.config.show_timing {
            parts.extend(self.timing());
        }
        parts.join(" ")
    }

    /// `[elapsed<remaining s]` while running, `[elapsed s]` when done,
    /// nothing before the first unit of progress.
    fn timing(&self) -> Option<String> {
        let elapsed = self.started_at.elapsed().as_secs_f64();
        let fraction = self.fraction();
        let mut out = String::new();
        if fraction >= 1.0 {
            let _ = write!(out, "[{elapsed:.1}s]");
        } else if self.current > 0 {
            let remaining = elapsed / fraction * (1.0 - fraction);
            let _ = write!(out, "[{elapsed:.0}<{remaining:.0}s]");
        } else {
            return None;
        }
        Some(out)
    }

    fn draw(&mut self) -> io::Result<()> {
        let frame = self.frame();
        self.line.render_line(&frame, Some(self.config.anchor))?;
        self.last_render_at = Some(Instant::now());
        self.redraws += 1;
        tracing::trace!(current = self.current, total = self.total, "progress redraw");
        Ok(())
    }
}

impl<W: Write> Drop for ProgressBar<W> {
    fn drop(&mut self) {
        if let Err(err) = self.abort() {
            tracing::debug!(%err, "progress bar cleanup failed");
        }
    }
}

// ─── Scoped Use ──────────────────────────────────────────────────────────────

/// Run `body` with a progress bar on stdout.
///
/// The bar finishes at 100% when `body` returns `Ok`. On `Err` it is left
/// at its last value and the error is returned unchanged. Either way the
/// cursor is visible again afterwards.
pub fn with_progress<T, E>(
    total: u64,
    description: &str,
    body: impl FnOnce(&mut ProgressBar<io::Stdout>) -> Result<T, E>,
) -> Result<T, E> {
    run_progress(ProgressBar::stdout(total, description), body)
}

/// [`with_progress`] over any bar.
pub fn run_progress<W: Write, T, E>(
    mut bar: ProgressBar<W>,
    body: impl FnOnce(&mut ProgressBar<W>) -> Result<T, E>,
) -> Result<T, E> {
    if let Err(err) = bar.start() {
        tracing::debug!(%err, "progress bar start failed");
    }
    let result = body(&mut bar);
    let cleanup = if result.is_ok() { bar.finish() } else { bar.abort() };
    if let Err(err) = cleanup {
        tracing::debug!(%err, "progress bar cleanup failed");
    }
    result
}

// ─── Tests ───────────────────────────────────────────────────────────────────
