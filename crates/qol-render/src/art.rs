// SPDX-License-Identifier: MIT
//
// Decorations: block-letter banners, separator rules and boxed text.

use qol_term::{Color, Style, visible_width};

// ─── Banner Font ─────────────────────────────────────────────────────────────
//
// Glyphs are 3×5 bitmaps, one `u8` per pixel row with bit 2 as the left
// column. Two pixel rows share one text row through the half-block
// characters, so every glyph is 3 columns by 3 rows.

const GLYPH_WIDTH: usize = 3;

/// Text rows of a rendered banner.
pub const BANNER_HEIGHT: usize = 3;

#[rustfmt::skip]
const FONT: &[(char, [u8; 5])] = &[
    ('A', [0b010, 0b101, 0b111, 0b101, 0b101]),
    ('B', [0b110, 0b101, 0b110, 0b101, 0b110]),
    ('C', [0b011, 0b100, 0b100, 0b100, 0b011]),
    ('D', [0b110, 0b101, 0b101, 0b101, 0b110]),
    ('E', [0b111, 0b100, 0b110, 0b100, 0b111]),
    ('F', [0b111, 0b100, 0b110, 0b100, 0b100]),
    ('G', [0b011, 0b100, 0b101, 0b101, 0b011]),
    ('H', [0b101, 0b101, 0b111, 0b101, 0b101]),
    ('I', [0b111, 0b010, 0b010, 0b010, 0b111]),
    ('J', [0b001, 0b001, 0b001, 0b101, 0b010]),
    ('K', [0b101, 0b101, 0b110, 0b101, 0b101]),
    ('L', [0b100, 0b100, 0b100, 0b100, 0b111]),
    ('M', [0b101, 0b111, 0b111, 0b101, 0b101]),
    ('N', [0b110, 0b101, 0b101, 0b101, 0b101]),
    ('O', [0b010, 0b101, 0b101, 0b101, 0b010]),
    ('P', [0b110, 0b101, 0b110, 0b100, 0b100]),
    ('Q', [0b010, 0b101, 0b101, 0b110, 0b011]),
    ('R', [0b110, 0b101, 0b110, 0b101, 0b101]),
    ('S', [0b011, 0b100, 0b010, 0b001, 0b110]),
    ('T', [0b111, 0b010, 0b010, 0b010, 0b010]),
    ('U', [0b101, 0b101, 0b101, 0b101, 0b111]),
    ('V', [0b101, 0b101, 0b101, 0b101, 0b010]),
    ('W', [0b101, 0b101, 0b111, 0b111, 0b101]),
    ('X', [0b101, 0b101, 0b010, 0b101, 0b101]),
    ('Y', [0b101, 0b101, 0b010, 0b010, 0b010]),
    ('Z', [0b111, 0b001, 0b010, 0b100, 0b111]),
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b110, 0b001, 0b010, 0b100, 0b111]),
    ('3', [0b110, 0b001, 0b010, 0b001, 0b110]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b110, 0b001, 0b110]),
    ('6', [0b011, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b010, 0b010, 0b010]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b110]),
    ('!', [0b010, 0b010, 0b010, 0b000, 0b010]),
    ('?', [0b110, 0b001, 0b010, 0b000, 0b010]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    (',', [0b000, 0b000, 0b000, 0b010, 0b100]),
    (':', [0b000, 0b010, 0b000, 0b010, 0b000]),
    ('-', [0b000, 0b000, 0b111, 0b000, 0b000]),
    ('_', [0b000, 0b000, 0b000, 0b000, 0b111]),
    ('+', [0b000, 0b010, 0b111, 0b010, 0b000]),
    ('/', [0b001, 0b001, 0b010, 0b100, 0b100]),
];

const BLANK: [u8; 5] = [0; 5];

fn bitmap(ch: char) -> [u8; 5] {
    let upper = ch.to_ascii_uppercase();
    FONT.iter()
        .find(|(c, _)| *c == upper)
        .map_or(BLANK, |&(_, bits)| bits)
}

/// One text row of a glyph from two pixel rows.
fn glyph_row(top: u8, bottom: u8, out: &mut String) {
    for col in (0..GLYPH_WIDTH).rev() {
        let t = (top >> col) & 1 == 1;
        let b = (bottom >> col) & 1 == 1;
        out.push(match (t, b) {
            (true, true) => '█',
            (true, false) => '▀',
            (false, true) => '▄',
            (false, false) => ' ',
        });
    }
}

/// Render `text` in block letters, one glyph column of space between
/// letters. Letters are case-insensitive; characters the font lacks
/// render as blanks.
///
/// ```
/// use qol_term::Style;
///
/// let banner = qol_render::art::banner("Hi", Style::new());
/// assert_eq!(banner, "█ █ ▀█▀\n█▀█  █ \n▀ ▀ ▀▀▀");
/// ```
#[must_use]
pub fn banner(text: &str, style: Style) -> String {
    let mut rows = vec![String::new(); BANNER_HEIGHT];
    for (i, ch) in text.chars().enumerate() {
        let bits = bitmap(ch);
        for (r, row) in rows.iter_mut().enumerate() {
            if i > 0 {
                row.push(' ');
            }
            let bottom = bits.get(2 * r + 1).copied().unwrap_or(0);
            glyph_row(bits[2 * r], bottom, row);
        }
    }
    rows.iter().map(|row| style.paint(row)).collect::<Vec<_>>().join("\n")
}

/// Default banner style.
#[must_use]
pub const fn banner_style() -> Style {
    Style::new().fg(Color::CYAN)
}

// ─── Separator ───────────────────────────────────────────────────────────────

/// A horizontal rule of `len` copies of `ch`.
#[must_use]
pub fn separator(len: usize, ch: char, style: Style) -> String {
    style.paint(&std::iter::repeat_n(ch, len).collect::<String>())
}

// ─── Boxed Text ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOptions {
    /// Shown inside the top border.
    pub title: Option<String>,
    /// Spaces between the border and the text, on both sides.
    pub padding: usize,
    pub border_style: Style,
    pub title_style: Style,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            title: None,
            padding: 1,
            border_style: Style::new().fg(Color::CYAN),
            title_style: Style::new().fg(Color::CYAN).bold(),
        }
    }
}

/// Draw a rounded box around `text`.
///
/// Lines may carry their own styles; widths are measured visibly so
/// the right border stays aligned.
///
/// ```
/// use qol_render::art::{boxed, BoxOptions};
/// use qol_term::strip_style;
///
/// let text = boxed("hello\nhi", &BoxOptions::default());
/// assert_eq!(strip_style(&text), "╭───────╮\n│ hello │\n│ hi    │\n╰───────╯");
/// ```
#[must_use]
pub fn boxed(text: &str, options: &BoxOptions) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let content = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let title = options.title.as_deref().filter(|t| !t.is_empty());
    let title_width = title.map_or(0, visible_width);

    // The title needs "─ " before and " ─" after it.
    let inner = (content + 2 * options.padding).max(if title.is_some() { title_width + 4 } else { 0 });
    let border = options.border_style;
    let mut out = Vec::with_capacity(lines.len() + 2);

    let top = match title {
        Some(title) => format!(
            "{}{}{}",
            border.paint("╭─ "),
            options.title_style.paint(title),
            border.paint(&format!(" {}╮", "─".repeat(inner - title_width - 3)))
        ),
        None => border.paint(&format!("╭{}╮", "─".repeat(inner))),
    };
    out.push(top);

    let side = border.paint("│");
    for line in lines {
        let fill = inner - options.padding - visible_width(line);
        out.push(format!(
            "{side}{}{line}{}{side}",
            " ".repeat(options.padding),
            " ".repeat(fill)
        ));
    }

    out.push(border.paint(&format!("╰{}╯", "─".repeat(inner))));
    out.join("\n")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
