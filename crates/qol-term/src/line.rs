// SPDX-License-Identifier: MIT
//
// Line renderer: writes one line of output, either appended to the
// normal scroll or anchored to a revisitable position that is erased and
// redrawn in place.
//
// Anchored redraw protocol, per frame:
//
//   1. hide the cursor (first frame only)
//   2. move to the anchor: `\r` for the current line, CUP for a fixed row
//   3. erase the whole line (EL 2)
//   4. write the new text, leaving the cursor right after it
//
// Erasing before writing is what keeps a shorter frame from leaving the
// tail of a longer one behind. Nothing is padded and no newline is
// written, so redrawing the same anchor never scrolls.
//
// `finish` moves past the region and shows the cursor again. It runs at
// most once per region and again from `Drop`, so every exit path ends
// with a visible cursor.
//
// When the sink is not a terminal, anchored frames are only remembered:
// `finish` writes the last one as an ordinary line and the cursor is
// never touched. When color is off, styles are stripped before writing.

use std::io::{self, Write};

use crate::ansi;
use crate::terminal::{self, Capabilities};
use crate::width::strip_style;

// ─── Anchor ──────────────────────────────────────────────────────────────────

/// Where an anchored line lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// The line the cursor is on; each frame starts with a carriage return.
    #[default]
    CurrentLine,
    /// A fixed terminal row (0-indexed), addressed absolutely.
    Row(u16),
}

// ─── LineRenderer ────────────────────────────────────────────────────────────

/// Owns one anchored region of an output sink.
///
/// ```
/// use qol_term::{Anchor, Capabilities, LineRenderer};
///
/// let mut out = Vec::new();
/// {
///     let mut line = LineRenderer::new(&mut out, Capabilities::default());
///     line.render_line("working", Some(Anchor::CurrentLine)).unwrap();
///     line.render_line("done", Some(Anchor::CurrentLine)).unwrap();
/// }
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.ends_with("done\n\x1b[0m\x1b[?25h"));
/// ```
pub struct LineRenderer<W: Write> {
    out: W,
    caps: Capabilities,
    /// Anchor of the last anchored frame, while a region is open.
    region: Option<Anchor>,
    /// Latest anchored text when the sink is not interactive.
    pending: Option<String>,
    cursor_hidden: bool,
}

impl LineRenderer<io::Stdout> {
    /// Renderer on stdout with detected capabilities.
    ///
    /// Also installs the process-wide cursor-restore panic hook.
    #[must_use]
    pub fn stdout() -> Self {
        terminal::install_cursor_restore_hook();
        let caps = Capabilities::detect();
        if !caps.interactive {
            tracing::debug!("stdout is not a terminal, anchored rendering disabled");
        }
        Self::new(io::stdout(), caps)
    }
}

impl<W: Write> LineRenderer<W> {
    pub const fn new(out: W, caps: Capabilities) -> Self {
        Self {
            out,
            caps,
            region: None,
            pending: None,
            cursor_hidden: false,
        }
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.caps
    }

    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.caps.interactive
    }

    /// Whether an anchored region is open and awaiting `finish`.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.region.is_some() || self.pending.is_some()
    }

    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Write `text` as a line.
    ///
    /// Without an anchor the text is appended to normal output followed by
    /// a newline. With one, the anchored line is erased and replaced.
    pub fn render_line(&mut self, text: &str, anchor: Option<Anchor>) -> io::Result<()> {
        let text = self.prepare(text);
        let Some(anchor) = anchor else {
            self.out.write_all(text.as_bytes())?;
            self.out.write_all(b"\n")?;
            return self.out.flush();
        };

        if !self.caps.interactive {
            self.pending = Some(text);
            return Ok(());
        }

        if !self.cursor_hidden {
            ansi::cursor_hide(&mut self.out)?;
            self.cursor_hidden = true;
        }
        match anchor {
            Anchor::CurrentLine => ansi::carriage_return(&mut self.out)?,
            Anchor::Row(row) => ansi::cursor_row(&mut self.out, row)?,
        }
        ansi::clear_line(&mut self.out)?;
        self.out.write_all(text.as_bytes())?;
        self.region = Some(anchor);
        self.out.flush()
    }

    /// Erase the anchored line without closing the region.
    pub fn clear(&mut self) -> io::Result<()> {
        if !self.caps.interactive {
            self.pending = None;
            return Ok(());
        }
        match self.region {
            Some(Anchor::CurrentLine) => ansi::carriage_return(&mut self.out)?,
            Some(Anchor::Row(row)) => ansi::cursor_row(&mut self.out, row)?,
            None => return Ok(()),
        }
        ansi::clear_line(&mut self.out)?;
        self.out.flush()
    }

    /// Close the region: move past it and show the cursor.
    ///
    /// A no-op when nothing is open, so calling it twice is harmless.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(text) = self.pending.take() {
            self.out.write_all(text.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        match self.region.take() {
            Some(Anchor::CurrentLine) => self.out.write_all(b"\n")?,
            Some(Anchor::Row(row)) => {
                ansi::cursor_row(&mut self.out, row)?;
                self.out.write_all(b"\n")?;
            }
            None => {}
        }
        if self.cursor_hidden {
            ansi::reset(&mut self.out)?;
            ansi::cursor_show(&mut self.out)?;
            self.cursor_hidden = false;
        }
        self.out.flush()
    }

    /// Close the region, replacing the anchored line with `text` first.
    /// An empty `text` erases the line instead, see [`dismiss`](Self::dismiss).
    pub fn finish_with(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return self.dismiss();
        }
        if self.caps.interactive {
            let anchor = self.region.unwrap_or_default();
            self.render_line(text, Some(anchor))?;
        } else {
            self.pending = Some(self.prepare(text));
        }
        self.finish()
    }

    /// Erase the anchored line and close the region without moving past
    /// it, so the next output starts where the line was.
    pub fn dismiss(&mut self) -> io::Result<()> {
        self.clear()?;
        self.pending = None;
        self.region = None;
        self.finish()
    }

    fn prepare(&self, text: &str) -> String {
        if self.caps.color {
            text.to_string()
        } else {
            strip_style(text)
        }
    }
}

impl<W: Write> Drop for LineRenderer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.finish() {
            tracing::debug!(%err, "line renderer cleanup failed");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(caps: Capabilities, f: impl FnOnce(&mut LineRenderer<&mut Vec<u8>>)) -> String {
        let mut out = Vec::new();
        {
            let mut line = LineRenderer::new(&mut out, caps);
            f(&mut line);
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unanchored_line_is_plain_output() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("hello", None).unwrap();
        });
        assert_eq!(s, "hello\n");
    }

    #[test]
    fn current_line_frame_sequence() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("abc", Some(Anchor::CurrentLine)).unwrap();
        });
        assert_eq!(s, "\x1b[?25l\r\x1b[2Kabc\n\x1b[0m\x1b[?25h");
    }

    #[test]
    fn row_anchor_uses_cursor_position() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("x", Some(Anchor::Row(4))).unwrap();
        });
        assert_eq!(s, "\x1b[?25l\x1b[5;1H\x1b[2Kx\x1b[5;1H\n\x1b[0m\x1b[?25h");
    }

    #[test]
    fn every_frame_clears_before_writing() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("a long first frame", Some(Anchor::CurrentLine)).unwrap();
            l.render_line("short", Some(Anchor::CurrentLine)).unwrap();
        });
        assert_eq!(s.matches("\r\x1b[2K").count(), 2);
        assert!(s.contains("\r\x1b[2Kshort"));
    }

    #[test]
    fn redraws_never_emit_newlines() {
        let mut out = Vec::new();
        let mut line = LineRenderer::new(&mut out, Capabilities::default());
        for i in 0..20 {
            line.render_line(&format!("frame {i}"), Some(Anchor::Row(2))).unwrap();
        }
        assert!(!line.writer().contains(&b'\n'));
    }

    #[test]
    fn cursor_hidden_once() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("1", Some(Anchor::CurrentLine)).unwrap();
            l.render_line("2", Some(Anchor::CurrentLine)).unwrap();
        });
        assert_eq!(s.matches("\x1b[?25l").count(), 1);
        assert_eq!(s.matches("\x1b[?25h").count(), 1);
    }

    #[test]
    fn finish_is_idempotent() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("x", Some(Anchor::CurrentLine)).unwrap();
            l.finish().unwrap();
            l.finish().unwrap();
            assert!(!l.is_active());
        });
        assert_eq!(s.matches("\x1b[?25h").count(), 1);
        assert_eq!(s.matches('\n').count(), 1);
    }

    #[test]
    fn finish_without_frames_writes_nothing() {
        let s = run(Capabilities::default(), |l| {
            l.finish().unwrap();
        });
        assert_eq!(s, "");
    }

    #[test]
    fn drop_restores_cursor() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("x", Some(Anchor::CurrentLine)).unwrap();
        });
        assert!(s.ends_with("\x1b[?25h"));
    }

    #[test]
    fn non_interactive_keeps_only_the_last_frame() {
        let s = run(Capabilities::plain(), |l| {
            l.render_line("one", Some(Anchor::CurrentLine)).unwrap();
            l.render_line("two", Some(Anchor::CurrentLine)).unwrap();
            assert!(l.is_active());
        });
        assert_eq!(s, "two\n");
    }

    #[test]
    fn colorless_sink_strips_styles() {
        let s = run(Capabilities::plain(), |l| {
            l.render_line("\x1b[31mred\x1b[0m", None).unwrap();
        });
        assert_eq!(s, "red\n");
    }

    #[test]
    fn finish_with_replaces_the_line() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("working", Some(Anchor::CurrentLine)).unwrap();
            l.finish_with("done").unwrap();
        });
        assert!(s.ends_with("\r\x1b[2Kdone\n\x1b[0m\x1b[?25h"));
    }

    #[test]
    fn finish_with_empty_text_drops_pending_frame() {
        let s = run(Capabilities::plain(), |l| {
            l.render_line("working", Some(Anchor::CurrentLine)).unwrap();
            l.finish_with("").unwrap();
        });
        assert_eq!(s, "");
    }

    #[test]
    fn dismiss_erases_without_newline() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("spinning", Some(Anchor::CurrentLine)).unwrap();
            l.dismiss().unwrap();
            assert!(!l.is_active());
        });
        assert_eq!(s, "\x1b[?25l\r\x1b[2Kspinning\r\x1b[2K\x1b[0m\x1b[?25h");
    }

    #[test]
    fn clear_erases_without_closing() {
        let s = run(Capabilities::default(), |l| {
            l.render_line("x", Some(Anchor::CurrentLine)).unwrap();
            l.clear().unwrap();
            assert!(l.is_active());
        });
        assert!(s.contains("x\r\x1b[2K\n"));
    }
}
