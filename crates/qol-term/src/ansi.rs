// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Two faces of the same codec:
//
//   Writers: pure functions that write one escape sequence to any
//            `impl Write`. The line renderer and progress engine use
//            these to assemble a frame in a buffer before a single write.
//
//   Tokens:  the same sequences as `&'static str` constants or owned
//            `String`s, for building styled text by concatenation
//            (`format!("{RED}hi{RESET}")`).
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).

use std::io::{self, Write};

use crate::color::Color;
use crate::style::Attr;

// ─── Token Constants ─────────────────────────────────────────────────────────

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const BLINK: &str = "\x1b[5m";
pub const REVERSE: &str = "\x1b[7m";
pub const HIDDEN: &str = "\x1b[8m";
pub const STRIKETHROUGH: &str = "\x1b[9m";

pub const BLACK: &str = "\x1b[30m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const WHITE: &str = "\x1b[37m";
pub const DEFAULT: &str = "\x1b[39m";

pub const GRAY: &str = "\x1b[90m";
pub const LIGHT_RED: &str = "\x1b[91m";
pub const LIGHT_GREEN: &str = "\x1b[92m";
pub const LIGHT_YELLOW: &str = "\x1b[93m";
pub const LIGHT_BLUE: &str = "\x1b[94m";
pub const LIGHT_MAGENTA: &str = "\x1b[95m";
pub const LIGHT_CYAN: &str = "\x1b[96m";
pub const LIGHT_WHITE: &str = "\x1b[97m";

pub const BG_BLACK: &str = "\x1b[40m";
pub const BG_RED: &str = "\x1b[41m";
pub const BG_GREEN: &str = "\x1b[42m";
pub const BG_YELLOW: &str = "\x1b[43m";
pub const BG_BLUE: &str = "\x1b[44m";
pub const BG_MAGENTA: &str = "\x1b[45m";
pub const BG_CYAN: &str = "\x1b[46m";
pub const BG_WHITE: &str = "\x1b[47m";
pub const BG_DEFAULT: &str = "\x1b[49m";

pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const CLEAR_LINE: &str = "\x1b[2K";

// ─── Token Builders ──────────────────────────────────────────────────────────

/// Foreground token for any [`Color`].
#[must_use]
pub fn fg_token(color: Color) -> String {
    let mut buf = Vec::with_capacity(20);
    // Writing into a Vec cannot fail.
    let _ = fg(&mut buf, color);
    String::from_utf8(buf).unwrap_or_default()
}

/// Background token for any [`Color`].
#[must_use]
pub fn bg_token(color: Color) -> String {
    let mut buf = Vec::with_capacity(20);
    let _ = bg(&mut buf, color);
    String::from_utf8(buf).unwrap_or_default()
}

/// Foreground from the 256-color palette, always in the extended form.
#[must_use]
pub fn fg_256(idx: u8) -> String {
    format!("\x1b[38;5;{idx}m")
}

/// Background from the 256-color palette, always in the extended form.
#[must_use]
pub fn bg_256(idx: u8) -> String {
    format!("\x1b[48;5;{idx}m")
}

#[must_use]
pub fn fg_rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

#[must_use]
pub fn bg_rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[48;2;{r};{g};{b}m")
}

/// Foreground from a `#RRGGBB` / `#RGB` literal.
///
/// An unparseable literal yields an empty token: the text is shown
/// without color rather than failing.
#[must_use]
pub fn fg_hex(hex: &str) -> String {
    match Color::hex(hex) {
        Some(Color::Rgb(r, g, b)) => fg_rgb(r, g, b),
        _ => {
            tracing::debug!(hex, "invalid hex color, applying no color");
            String::new()
        }
    }
}

/// Background from a `#RRGGBB` / `#RGB` literal. Empty token on failure.
#[must_use]
pub fn bg_hex(hex: &str) -> String {
    match Color::hex(hex) {
        Some(Color::Rgb(r, g, b)) => bg_rgb(r, g, b),
        _ => {
            tracing::debug!(hex, "invalid hex background, applying no color");
            String::new()
        }
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor to the first column of row `y` (0-indexed).
#[inline]
pub fn cursor_row(w: &mut impl Write, y: u16) -> io::Result<()> {
    cursor_to(w, 0, y)
}

/// Return to the first column of the current line.
#[inline]
pub fn carriage_return(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\r")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(HIDE_CURSOR.as_bytes())
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(SHOW_CURSOR.as_bytes())
}

/// Save the cursor position (SCP).
#[inline]
pub fn save_position(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[s")
}

/// Restore the cursor position saved by [`save_position`] (RCP).
#[inline]
pub fn restore_position(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[u")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Erase the entire current line (EL 2). The cursor does not move.
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CLEAR_LINE.as_bytes())
}

/// Clear the entire screen (ED 2) and home the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J\x1b[H")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET.as_bytes())
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97), the 256-color
/// extended format for palette indices 16-255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(DEFAULT.as_bytes()),
        Color::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        Color::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color.
///
/// Same encoding strategy as [`fg`] with the background SGR codes
/// (40–47, 100–107, 48;5;N, 48;2;R;G;B).
pub fn bg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(BG_DEFAULT.as_bytes()),
        Color::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        Color::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;4m` for
/// bold + underline. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = Attr::SGR
        .iter()
        .filter(|(flag, _)| attr.contains(*flag))
        .map(|&(_, code)| code)
        .collect();

    write!(w, "\x1b[{}m", codes.join(";"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_position() {
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
    }

    #[test]
    fn cursor_to_max_does_not_overflow() {
        assert_eq!(emit(|w| cursor_to(w, u16::MAX, u16::MAX)), "\x1b[65536;65536H");
    }

    #[test]
    fn cursor_row_is_first_column() {
        assert_eq!(emit(|w| cursor_row(w, 4)), "\x1b[5;1H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn save_and_restore() {
        assert_eq!(emit(|w| save_position(w)), "\x1b[s");
        assert_eq!(emit(|w| restore_position(w)), "\x1b[u");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn clear_line_sequence() {
        assert_eq!(emit(|w| clear_line(w)), "\x1b[2K");
    }

    #[test]
    fn clear_screen_homes_cursor() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J\x1b[H");
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    // ── Colors ──────────────────────────────────────────────────────────

    #[test]
    fn fg_standard_matches_constants() {
        assert_eq!(emit(|w| fg(w, Color::RED)), RED);
        assert_eq!(emit(|w| fg(w, Color::WHITE)), WHITE);
        assert_eq!(emit(|w| fg(w, Color::GRAY)), GRAY);
        assert_eq!(emit(|w| fg(w, Color::LIGHT_WHITE)), LIGHT_WHITE);
        assert_eq!(emit(|w| fg(w, Color::Default)), DEFAULT);
    }

    #[test]
    fn fg_extended_and_rgb() {
        assert_eq!(emit(|w| fg(w, Color::Ansi256(42))), "\x1b[38;5;42m");
        assert_eq!(emit(|w| fg(w, Color::Rgb(255, 128, 0))), "\x1b[38;2;255;128;0m");
    }

    #[test]
    fn bg_standard_matches_constants() {
        assert_eq!(emit(|w| bg(w, Color::GREEN)), BG_GREEN);
        assert_eq!(emit(|w| bg(w, Color::Default)), BG_DEFAULT);
        assert_eq!(emit(|w| bg(w, Color::LIGHT_GREEN)), "\x1b[102m");
    }

    #[test]
    fn bg_extended_and_rgb() {
        assert_eq!(emit(|w| bg(w, Color::Ansi256(200))), "\x1b[48;5;200m");
        assert_eq!(emit(|w| bg(w, Color::Rgb(0, 100, 200))), "\x1b[48;2;0;100;200m");
    }

    // ── Attributes ──────────────────────────────────────────────────────

    #[test]
    fn attrs_empty_emits_nothing() {
        assert_eq!(emit(|w| attrs(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_single_matches_constant() {
        assert_eq!(emit(|w| attrs(w, Attr::BOLD)), BOLD);
        assert_eq!(emit(|w| attrs(w, Attr::UNDERLINE)), UNDERLINE);
    }

    #[test]
    fn attrs_combined_in_sgr_order() {
        assert_eq!(
            emit(|w| attrs(w, Attr::STRIKETHROUGH | Attr::BOLD | Attr::DIM)),
            "\x1b[1;2;9m"
        );
    }

    // ── Tokens ──────────────────────────────────────────────────────────

    #[test]
    fn token_builders() {
        assert_eq!(fg_token(Color::CYAN), CYAN);
        assert_eq!(bg_token(Color::BLACK), BG_BLACK);
        assert_eq!(fg_256(196), "\x1b[38;5;196m");
        assert_eq!(bg_256(21), "\x1b[48;5;21m");
        assert_eq!(fg_rgb(1, 2, 3), "\x1b[38;2;1;2;3m");
        assert_eq!(bg_rgb(4, 5, 6), "\x1b[48;2;4;5;6m");
    }

    #[test]
    fn hex_tokens_use_rgb_form() {
        assert_eq!(fg_hex("#FFD700"), "\x1b[38;2;255;215;0m");
        assert_eq!(bg_hex("#000"), "\x1b[48;2;0;0;0m");
    }

    #[test]
    fn invalid_hex_applies_no_color() {
        assert_eq!(fg_hex("#GGGGGG"), "");
        assert_eq!(bg_hex("nope"), "");
    }
}
