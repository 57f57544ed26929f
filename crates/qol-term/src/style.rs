// SPDX-License-Identifier: MIT
//
// Styles: a foreground, a background and a set of attributes, turned into
// the prefix that goes in front of a piece of text.
//
// A painted string is always `prefix + text + RESET`, so styles never leak
// past the text they were applied to. An empty style paints nothing at all
// (no prefix, no reset), which keeps plain output byte-identical to its
// input.

use std::fmt::Write as _;

use crate::ansi::{self, RESET};
use crate::color::Color;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR parameters:
    ///
    /// ```
    /// use qol_term::style::Attr;
    ///
    /// let emphasis = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(emphasis.contains(Attr::BOLD));
    /// assert!(!emphasis.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1: increased intensity.
        const BOLD          = 1 << 0;
        /// SGR 2: decreased intensity (faint).
        const DIM           = 1 << 1;
        /// SGR 3: italic.
        const ITALIC        = 1 << 2;
        /// SGR 4: single underline.
        const UNDERLINE     = 1 << 3;
        /// SGR 5: slow blink.
        const BLINK         = 1 << 4;
        /// SGR 7: swap foreground and background.
        const REVERSE       = 1 << 5;
        /// SGR 8: invisible text.
        const HIDDEN        = 1 << 6;
        /// SGR 9: crossed-out text.
        const STRIKETHROUGH = 1 << 7;
    }
}

impl Attr {
    /// Flag → SGR parameter, in emission order.
    pub const SGR: [(Self, &'static str); 8] = [
        (Self::BOLD, "1"),
        (Self::DIM, "2"),
        (Self::ITALIC, "3"),
        (Self::UNDERLINE, "4"),
        (Self::BLINK, "5"),
        (Self::REVERSE, "7"),
        (Self::HIDDEN, "8"),
        (Self::STRIKETHROUGH, "9"),
    ];
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// A complete text style.
///
/// ```
/// use qol_term::{Color, Style};
///
/// let header = Style::new().fg(Color::CYAN).bold();
/// assert_eq!(header.paint("Name"), "\x1b[36m\x1b[1mName\x1b[0m");
/// assert_eq!(Style::new().paint("plain"), "plain");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attr,
}

impl Style {
    /// The empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attr::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Foreground by name or hex literal. Unknown names leave the style
    /// unchanged.
    #[must_use]
    pub fn fg_name(self, name: &str) -> Self {
        match name.parse::<Color>() {
            Ok(color) => self.fg(color),
            Err(err) => {
                tracing::debug!(%err, "ignoring foreground");
                self
            }
        }
    }

    /// Background by name or hex literal. Unknown names leave the style
    /// unchanged.
    #[must_use]
    pub fn bg_name(self, name: &str) -> Self {
        match name.parse::<Color>() {
            Ok(color) => self.bg(color),
            Err(err) => {
                tracing::debug!(%err, "ignoring background");
                self
            }
        }
    }

    #[must_use]
    pub const fn attr(mut self, attr: Attr) -> Self {
        self.attrs = self.attrs.union(attr);
        self
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        self.attr(Attr::BOLD)
    }

    #[must_use]
    pub const fn dim(self) -> Self {
        self.attr(Attr::DIM)
    }

    #[must_use]
    pub const fn italic(self) -> Self {
        self.attr(Attr::ITALIC)
    }

    #[must_use]
    pub const fn underline(self) -> Self {
        self.attr(Attr::UNDERLINE)
    }

    #[must_use]
    pub const fn blink(self) -> Self {
        self.attr(Attr::BLINK)
    }

    /// Whether painting with this style would emit anything.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// The escape sequences that switch this style on.
    #[must_use]
    pub fn prefix(&self) -> String {
        let mut out = String::new();
        if let Some(color) = self.fg {
            out.push_str(&ansi::fg_token(color));
        }
        if let Some(color) = self.bg {
            out.push_str(&ansi::bg_token(color));
        }
        if !self.attrs.is_empty() {
            let mut buf = Vec::new();
            let _ = ansi::attrs(&mut buf, self.attrs);
            out.push_str(&String::from_utf8_lossy(&buf));
        }
        out
    }

    /// `prefix + text + RESET`, or `text` unchanged for a plain style.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let mut out = self.prefix();
        out.push_str(text);
        out.push_str(RESET);
        out
    }

    /// Like [`paint`](Self::paint), but the style is switched back on after
    /// every reset inside `text`, so already-styled text stays covered.
    ///
    /// ```
    /// use qol_term::Style;
    ///
    /// let dim = Style::new().dim();
    /// assert_eq!(dim.paint_over("\x1b[32mok\x1b[0m!"), "\x1b[2m\x1b[32mok\x1b[0m\x1b[2m!\x1b[0m");
    /// ```
    #[must_use]
    pub fn paint_over(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let prefix = self.prefix();
        let reopened = text
            .replace(RESET, &format!("{RESET}{prefix}"))
            .replace("\x1b[m", &format!("\x1b[m{prefix}"));
        self.paint(&reopened)
    }
}

// ─── Quick Painters ──────────────────────────────────────────────────────────

#[must_use]
pub fn red(text: &str) -> String {
    Style::new().fg(Color::RED).paint(text)
}

#[must_use]
pub fn green(text: &str) -> String {
    Style::new().fg(Color::GREEN).paint(text)
}

#[must_use]
pub fn blue(text: &str) -> String {
    Style::new().fg(Color::BLUE).paint(text)
}

#[must_use]
pub fn yellow(text: &str) -> String {
    Style::new().fg(Color::YELLOW).paint(text)
}

#[must_use]
pub fn cyan(text: &str) -> String {
    Style::new().fg(Color::CYAN).paint(text)
}

#[must_use]
pub fn magenta(text: &str) -> String {
    Style::new().fg(Color::MAGENTA).paint(text)
}

#[must_use]
pub fn bold(text: &str) -> String {
    Style::new().bold().paint(text)
}

#[must_use]
pub fn underline(text: &str) -> String {
    Style::new().underline().paint(text)
}

// ─── Gradient ────────────────────────────────────────────────────────────────

/// Color each visible character of `text` along a gradient through `stops`.
///
/// Spaces are passed through uncolored. With one stop the whole text gets
/// that color; with none the text is returned unchanged. Between stops the
/// color is interpolated in RGB, so palette colors come out as 24-bit
/// sequences.
#[must_use]
pub fn gradient(text: &str, stops: &[Color]) -> String {
    let Some(&first) = stops.first() else {
        return text.to_string();
    };

    let chars: Vec<char> = text.chars().collect();
    let segments = stops.len().saturating_sub(1);
    let last_index = chars.len().saturating_sub(1).max(1);
    let mut out = String::with_capacity(text.len() * 8);

    for (i, ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            out.push(*ch);
            continue;
        }
        let color = if segments == 0 {
            first
        } else {
            // Position along the whole gradient, 0.0..=segments.
            #[allow(clippy::cast_precision_loss)]
            let pos = i as f32 / last_index as f32 * segments as f32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let seg = (pos.floor() as usize).min(segments - 1);
            #[allow(clippy::cast_precision_loss)]
            let t = pos - seg as f32;
            stops[seg].mix(stops[seg + 1], t)
        };
        let _ = write!(out, "{}{ch}", ansi::fg_token(color));
    }

    out.push_str(RESET);
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::strip_style;
    use pretty_assertions::assert_eq;

    #[test]
    fn paint_over_reopens_after_inner_resets() {
        let bold = Style::new().bold();
        assert_eq!(bold.paint_over("a\x1b[0mb\x1b[mc"), "\x1b[1ma\x1b[0m\x1b[1mb\x1b[m\x1b[1mc\x1b[0m");
        assert_eq!(bold.paint_over("plain"), bold.paint("plain"));
        assert_eq!(Style::new().paint_over("\x1b[0mx"), "\x1b[0mx");
    }

    #[test]
    fn plain_style_paints_nothing() {
        assert!(Style::new().is_plain());
        assert_eq!(Style::new().paint("x"), "x");
        assert_eq!(Style::new().prefix(), "");
    }

    #[test]
    fn prefix_order_is_fg_bg_attrs() {
        let style = Style::new().fg(Color::RED).bg(Color::BLACK).bold().underline();
        assert_eq!(style.prefix(), "\x1b[31m\x1b[40m\x1b[1;4m");
    }

    #[test]
    fn paint_closes_with_reset() {
        assert_eq!(Style::new().dim().paint("x"), "\x1b[2mx\x1b[0m");
    }

    #[test]
    fn fg_name_accepts_names_and_hex() {
        assert_eq!(Style::new().fg_name("cyan").fg, Some(Color::CYAN));
        assert_eq!(Style::new().fg_name("#102030").fg, Some(Color::Rgb(16, 32, 48)));
    }

    #[test]
    fn unknown_names_leave_style_unchanged() {
        let style = Style::new().fg_name("#GGGGGG").bg_name("nope");
        assert!(style.is_plain());
    }

    #[test]
    fn quick_painters() {
        assert_eq!(red("hi"), "\x1b[31mhi\x1b[0m");
        assert_eq!(green("hi"), "\x1b[32mhi\x1b[0m");
        assert_eq!(blue("hi"), "\x1b[34mhi\x1b[0m");
        assert_eq!(yellow("hi"), "\x1b[33mhi\x1b[0m");
        assert_eq!(cyan("hi"), "\x1b[36mhi\x1b[0m");
        assert_eq!(magenta("hi"), "\x1b[35mhi\x1b[0m");
        assert_eq!(bold("hi"), "\x1b[1mhi\x1b[0m");
        assert_eq!(underline("hi"), "\x1b[4mhi\x1b[0m");
    }

    #[test]
    fn gradient_preserves_visible_text() {
        let stops = [Color::RED, Color::YELLOW, Color::GREEN];
        assert_eq!(strip_style(&gradient("Rainbow gradient", &stops)), "Rainbow gradient");
    }

    #[test]
    fn gradient_endpoints_hit_stops() {
        let out = gradient("ab", &[Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255)]);
        assert_eq!(out, "\x1b[38;2;0;0;0ma\x1b[38;2;255;255;255mb\x1b[0m");
    }

    #[test]
    fn gradient_leaves_spaces_uncolored() {
        let out = gradient("a b", &[Color::RED]);
        assert_eq!(out, "\x1b[31ma \x1b[31mb\x1b[0m");
    }

    #[test]
    fn gradient_without_stops_is_identity() {
        assert_eq!(gradient("same", &[]), "same");
    }
}
