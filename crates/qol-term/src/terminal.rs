// SPDX-License-Identifier: MIT
//
// Terminal queries: size, TTY detection, color capability, and the
// cursor-restore safety net.
//
// Safety: This module necessarily uses `unsafe` for ioctl (TIOCGWINSZ),
// isatty and a raw fd write in the panic hook. These are the standard
// POSIX interfaces for terminal control. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// Nothing here fails. An unknown size becomes 80×24 (after consulting
// COLUMNS/LINES), a non-terminal stdout simply reports `interactive =
// false`, and the rest of the crate degrades to plain sequential output.

use std::env;
use std::io::{self, Write};
use std::sync::Once;

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// The size assumed when nothing better is known.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Query the current terminal size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Size from the `COLUMNS` / `LINES` environment variables.
///
/// Both must be present and positive.
#[must_use]
pub fn size_from_env() -> Option<Size> {
    let read = |name: &str| {
        env::var(name)
            .ok()
            .and_then(|v| v.trim().parse::<u16>().ok())
            .filter(|&n| n > 0)
    };
    Some(Size {
        cols: read("COLUMNS")?,
        rows: read("LINES")?,
    })
}

/// Best-effort terminal size: ioctl, then environment, then 80×24.
#[must_use]
pub fn size_or_default() -> Size {
    get_size().or_else(size_from_env).unwrap_or(Size::FALLBACK)
}

/// Check whether stdout is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Capabilities ───────────────────────────────────────────────────────────

/// What the output sink can do.
///
/// Detected once by the stdout-backed constructors; tests and callers
/// writing to other sinks build one by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The sink is a real terminal: anchored redraws and cursor
    /// visibility changes are allowed.
    pub interactive: bool,
    /// Escape sequences for color and attributes are wanted.
    pub color: bool,
    /// Terminal dimensions (or the fallback).
    pub size: Size,
}

impl Default for Capabilities {
    /// A fully capable 80×24 terminal.
    fn default() -> Self {
        Self {
            interactive: true,
            color: true,
            size: Size::FALLBACK,
        }
    }
}

impl Capabilities {
    /// Plain sequential output: no redraws, no color.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            interactive: false,
            color: false,
            size: Size::FALLBACK,
        }
    }

    /// Detect stdout's capabilities.
    ///
    /// `NO_COLOR` (any non-empty value) disables color; `CLICOLOR_FORCE`
    /// (non-empty, not `0`) forces it on even when stdout is piped.
    #[must_use]
    pub fn detect() -> Self {
        let interactive = is_tty();
        let caps = Self {
            interactive,
            color: color_wanted(
                interactive,
                env::var("NO_COLOR").ok().as_deref(),
                env::var("CLICOLOR_FORCE").ok().as_deref(),
            ),
            size: size_or_default(),
        };
        tracing::debug!(?caps, "detected terminal capabilities");
        caps
    }

    /// Copy with a different width, keeping the height.
    #[must_use]
    pub const fn with_cols(mut self, cols: u16) -> Self {
        self.size.cols = cols;
        self
    }
}

/// Color decision from TTY state and the two conventional env vars.
fn color_wanted(tty: bool, no_color: Option<&str>, force: Option<&str>) -> bool {
    if force.is_some_and(|v| !v.is_empty() && v != "0") {
        return true;
    }
    if no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    tty
}

// ─── Console Helpers ────────────────────────────────────────────────────────
//
// One-shot conveniences that write straight to stdout and flush. Errors
// are ignored: these are cosmetic.

fn with_stdout(f: impl FnOnce(&mut io::StdoutLock<'_>) -> io::Result<()>) {
    let mut lock = io::stdout().lock();
    let _ = f(&mut lock).and_then(|()| lock.flush());
}

/// Clear the screen and home the cursor.
pub fn clear() {
    with_stdout(|w| ansi::clear_screen(w));
}

pub fn hide_cursor() {
    with_stdout(|w| ansi::cursor_hide(w));
}

pub fn show_cursor() {
    with_stdout(|w| ansi::cursor_show(w));
}

/// Move the cursor to column `x`, row `y` (0-indexed).
pub fn move_cursor(x: u16, y: u16) {
    with_stdout(|w| ansi::cursor_to(w, x, y));
}

pub fn save_position() {
    with_stdout(|w| ansi::save_position(w));
}

pub fn restore_position() {
    with_stdout(|w| ansi::restore_position(w));
}

// ─── Panic-Safe Cursor Restore ──────────────────────────────────────────────

/// Written straight to fd 1 if the process panics while a redraw region
/// holds the cursor hidden: reset attributes, show cursor, new line.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\n";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install (once per process) a panic hook that shows the cursor before
/// the original hook prints its message.
///
/// Scoped animations already restore the cursor when they unwind; this
/// covers `panic = "abort"` builds and panics on other threads.
pub fn install_cursor_restore_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Bypasses the stdout lock so a panic raised mid-write can't deadlock.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
