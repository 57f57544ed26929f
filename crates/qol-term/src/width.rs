// SPDX-License-Identifier: MIT
//
// Visible width: how many terminal columns a styled string occupies.
//
// Layout code never measures raw strings: a cell like "\x1b[31mok\x1b[0m"
// is two columns wide, not eleven bytes or nine chars. Everything here
// splits the input into escape sequences (zero columns) and literal text
// (measured with `unicode-width`: wide CJK/fullwidth = 2, combining marks
// and zero-width joiners = 0).
//
// Recognized sequences: CSI (`ESC [ … final`), OSC (`ESC ] … BEL` or
// `ESC ] … ESC \`), and the short two-byte escapes. Anything that starts
// with ESC but doesn't complete is left in place as literal text and
// measured by raw character count. A wrong width is acceptable; a panic
// is not.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::ansi::RESET;
use crate::error::ParseError;

// ─── Escape Sequence Scanner ─────────────────────────────────────────────────

/// OSC first so `ESC ]` isn't taken for a two-byte escape; CSI with
/// parameter/intermediate/final bytes; then the short escapes.
static ESCAPE_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b\[[0-?]*[ -/]*[@-~]|\x1b[78=>@-Z\\^_]")
        .expect("escape sequence pattern is valid")
});

/// A piece of a styled string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// A complete, recognized escape sequence.
    Escape(&'a str),
    /// Literal text (may contain stray, incomplete escapes).
    Text(&'a str),
}

/// Split `s` into escape sequences and the literal text between them.
pub(crate) fn segments(s: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in ESCAPE_SEQUENCE.find_iter(s) {
        if m.start() > last {
            out.push(Segment::Text(&s[last..m.start()]));
        }
        out.push(Segment::Escape(m.as_str()));
        last = m.end();
    }
    if last < s.len() {
        out.push(Segment::Text(&s[last..]));
    }
    out
}

fn is_reset(seq: &str) -> bool {
    seq == "\x1b[0m" || seq == "\x1b[m"
}

// ─── Measurement ─────────────────────────────────────────────────────────────

/// Display width of one character.
///
/// Control characters (including a stray ESC) count as one column: the
/// conservative choice for text we couldn't classify.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(1)
}

/// Display width of one grapheme cluster: its widest character, so
/// combining marks and ZWJ sequences occupy a single cell run.
fn grapheme_width(g: &str) -> usize {
    g.chars().map(char_width).max().unwrap_or(0)
}

fn text_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Remove every recognized escape sequence, keeping visible text exactly.
///
/// ```
/// use qol_term::width::strip_style;
///
/// assert_eq!(strip_style("\x1b[31mhi\x1b[0m"), "hi");
/// assert_eq!(strip_style("\x1b[31"), "\x1b[31"); // incomplete: kept
/// ```
#[must_use]
pub fn strip_style(s: &str) -> String {
    ESCAPE_SEQUENCE.replace_all(s, "").into_owned()
}

/// Number of terminal columns `s` occupies once styles are removed.
///
/// ```
/// use qol_term::width::visible_width;
///
/// assert_eq!(visible_width("\x1b[1mbold\x1b[0m"), 4);
/// assert_eq!(visible_width("中文"), 4);
/// assert_eq!(visible_width("e\u{301}"), 1);
/// ```
#[must_use]
pub fn visible_width(s: &str) -> usize {
    segments(s)
        .into_iter()
        .map(|seg| match seg {
            Segment::Escape(_) => 0,
            Segment::Text(t) => text_width(t),
        })
        .sum()
}

// ─── Alignment ───────────────────────────────────────────────────────────────

/// Horizontal alignment of text within a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Align {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "center" | "centre" | "c" => Ok(Self::Center),
            "right" | "r" => Ok(Self::Right),
            _ => Err(ParseError::UnknownAlign(s.to_string())),
        }
    }
}

/// Pad `s` with spaces to `width` visible columns.
///
/// Text already at or over `width` is returned unchanged. Centered text
/// puts the odd space on the right.
#[must_use]
pub fn pad_to_width(s: &str, width: usize, align: Align) -> String {
    let w = visible_width(s);
    if w >= width {
        return s.to_string();
    }
    let pad = width - w;
    let (left, right) = match align {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    };
    let mut out = String::with_capacity(s.len() + pad);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

// ─── Truncation ──────────────────────────────────────────────────────────────

/// Cut `s` down to `max_width` columns, ending in `…`.
///
/// Styles are kept up to the cut and closed with a reset if any were
/// opened. Grapheme clusters are never split, and a wide character that
/// would straddle the limit is dropped whole.
///
/// ```
/// use qol_term::width::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Hello", 10), "Hello");
/// assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
/// ```
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visible_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let limit = max_width - 1;
    let mut out = String::with_capacity(s.len());
    let mut width = 0;
    let mut styled = false;

    'outer: for seg in segments(s) {
        match seg {
            Segment::Escape(e) => {
                styled = !is_reset(e);
                out.push_str(e);
            }
            Segment::Text(t) => {
                for g in t.graphemes(true) {
                    let gw = grapheme_width(g);
                    if width + gw > limit {
                        break 'outer;
                    }
                    out.push_str(g);
                    width += gw;
                }
            }
        }
    }

    out.push('…');
    if styled {
        out.push_str(RESET);
    }
    out
}

// ─── Wrapping ────────────────────────────────────────────────────────────────

/// Line builder for [`wrap_to_width`]: tracks the open style so every
/// output line is self-contained (closed with a reset, reopened on the
/// next line).
struct Wrapper {
    max: usize,
    lines: Vec<String>,
    cur: String,
    cur_w: usize,
    word: String,
    word_w: usize,
    active: String,
}

impl Wrapper {
    fn new(max: usize) -> Self {
        Self {
            max,
            lines: Vec::new(),
            cur: String::new(),
            cur_w: 0,
            word: String::new(),
            word_w: 0,
            active: String::new(),
        }
    }

    fn escape(&mut self, seq: &str) {
        if is_reset(seq) {
            self.active.clear();
        } else {
            self.active.push_str(seq);
        }
        self.word.push_str(seq);
    }

    fn break_line(&mut self) {
        let mut line = std::mem::take(&mut self.cur);
        line.truncate(line.trim_end_matches(' ').len());
        if !self.active.is_empty() {
            line.push_str(RESET);
        }
        self.lines.push(line);
        self.cur.clone_from(&self.active);
        self.cur_w = 0;
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        if self.cur_w > 0 && self.cur_w + self.word_w > self.max {
            self.break_line();
        }
        self.cur.push_str(&self.word);
        self.cur_w += self.word_w;
        self.word.clear();
        self.word_w = 0;
    }

    fn grapheme(&mut self, g: &str) {
        let gw = grapheme_width(g);
        if g.chars().all(char::is_whitespace) {
            self.flush_word();
            if self.cur_w + gw > self.max {
                self.break_line();
            } else if self.cur_w > 0 || self.lines.is_empty() {
                self.cur.push_str(g);
                self.cur_w += gw;
            }
            return;
        }
        // Wider than a whole line on its own: stand in an ellipsis.
        let (g, gw) = if gw > self.max { ("…", 1) } else { (g, gw) };
        if self.word_w + gw > self.max {
            // A word longer than a whole line: hard-break it.
            self.flush_word();
            if self.cur_w > 0 {
                self.break_line();
            }
        }
        self.word.push_str(g);
        self.word_w += gw;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush_word();
        if visible_width(&self.cur) > 0 || self.lines.is_empty() {
            let mut line = self.cur;
            line.truncate(line.trim_end_matches(' ').len());
            if !self.active.is_empty() {
                line.push_str(RESET);
            }
            self.lines.push(line);
        }
        self.lines
    }
}

/// Split `s` into lines no wider than `max_width` columns.
///
/// Breaks at whitespace where possible and hard-breaks words that are
/// longer than a whole line. A single grapheme wider than `max_width`
/// becomes `…`. Open styles are closed at each line end and reopened on
/// the next line. `max_width` below 1 is treated as 1.
///
/// ```
/// use qol_term::width::wrap_to_width;
///
/// assert_eq!(wrap_to_width("the quick brown fox", 10), ["the quick", "brown fox"]);
/// assert_eq!(wrap_to_width("abcdef", 4), ["abcd", "ef"]);
/// ```
#[must_use]
pub fn wrap_to_width(s: &str, max_width: usize) -> Vec<String> {
    let mut wrapper = Wrapper::new(max_width.max(1));
    for seg in segments(s) {
        match seg {
            Segment::Escape(e) => wrapper.escape(e),
            Segment::Text(t) => t.graphemes(true).for_each(|g| wrapper.grapheme(g)),
        }
    }
    wrapper.finish()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
