// SPDX-License-Identifier: MIT
//
// Table layout: headers and rows in, bordered text out.
//
// Rendering is a pure function of headers, rows and options:
//
//   1. Normalize every row to the header count (pad with empty cells,
//      drop extras). Cells are stringified once, on the way in.
//   2. Measure each column: the widest visible line among its header and
//      cells, never less than 1. Embedded styles don't count.
//   3. If an overflow policy is set and the table is wider than
//      `max_width`, take one column off the widest column until it fits
//      or every column is down to 1.
//   4. Emit top rule, header, separator, body rows, bottom rule. A cell
//      may span several physical lines (embedded newlines, or wrapping);
//      the row is as tall as its tallest cell.
//
// Cell styles (header style, zebra stripe) are applied per cell after
// padding, so every painted run closes before the next border glyph.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use qol_term::width::{Align, pad_to_width, truncate_to_width, visible_width, wrap_to_width};
use qol_term::{Capabilities, Color, LineRenderer, ParseError, Style};

// ─── Borders ─────────────────────────────────────────────────────────────────

/// The glyphs that draw a table's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
    pub cross: &'static str,
    pub top_cross: &'static str,
    pub bottom_cross: &'static str,
    pub left_cross: &'static str,
    pub right_cross: &'static str,
}

impl BorderGlyphs {
    /// Whether horizontal rules are drawn at all.
    #[must_use]
    pub const fn has_rules(&self) -> bool {
        !self.horizontal.is_empty()
    }
}

const ROUNDED: BorderGlyphs = BorderGlyphs {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal: "─",
    vertical: "│",
    cross: "┼",
    top_cross: "┬",
    bottom_cross: "┴",
    left_cross: "├",
    right_cross: "┤",
};

const DOUBLE: BorderGlyphs = BorderGlyphs {
    top_left: "╔",
    top_right: "╗",
    bottom_left: "╚",
    bottom_right: "╝",
    horizontal: "═",
    vertical: "║",
    cross: "╬",
    top_cross: "╦",
    bottom_cross: "╩",
    left_cross: "╠",
    right_cross: "╣",
};

const SIMPLE: BorderGlyphs = BorderGlyphs {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    ..ROUNDED
};

/// No rules; columns are separated by a single space.
const PLAIN: BorderGlyphs = BorderGlyphs {
    top_left: "",
    top_right: "",
    bottom_left: "",
    bottom_right: "",
    horizontal: "",
    vertical: " ",
    cross: "",
    top_cross: "",
    bottom_cross: "",
    left_cross: "",
    right_cross: "",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Rounded,
    Double,
    Simple,
    Plain,
}

impl BorderStyle {
    pub const ALL: [Self; 4] = [Self::Rounded, Self::Double, Self::Simple, Self::Plain];

    #[must_use]
    pub const fn glyphs(self) -> &'static BorderGlyphs {
        match self {
            Self::Rounded => &ROUNDED,
            Self::Double => &DOUBLE,
            Self::Simple => &SIMPLE,
            Self::Plain => &PLAIN,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rounded => "rounded",
            Self::Double => "double",
            Self::Simple => "simple",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BorderStyle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.name() == wanted)
            .ok_or_else(|| ParseError::UnknownBorder(s.to_string()))
    }
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// What to do with cells when the table is wider than `max_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Keep full content; the table may be wider than the terminal.
    #[default]
    Visible,
    /// Shrink columns and cut cells with `…`.
    Truncate,
    /// Shrink columns and wrap cells onto extra lines.
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Per-column alignment; missing entries are left-aligned.
    pub alignments: Vec<Align>,
    /// Spaces on each side of every cell.
    pub padding: usize,
    pub border: BorderStyle,
    pub header_style: Style,
    /// Paint every second body row with `stripe_style`.
    pub zebra: bool,
    pub stripe_style: Style,
    pub overflow: Overflow,
    /// Total width limit, borders included. Only consulted when
    /// `overflow` is not `Visible`.
    pub max_width: Option<usize>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            alignments: Vec::new(),
            padding: 1,
            border: BorderStyle::Rounded,
            header_style: Style::new().fg(Color::CYAN).bold(),
            zebra: false,
            stripe_style: Style::new().dim(),
            overflow: Overflow::Visible,
            max_width: None,
        }
    }
}

impl TableOptions {
    #[must_use]
    pub fn alignment(&self, column: usize) -> Align {
        self.alignments.get(column).copied().unwrap_or_default()
    }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// One laid-out column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub alignment: Align,
    /// Content width in columns, padding excluded.
    pub width: usize,
}

/// Widest visible line of a cell.
fn cell_width(cell: &str) -> usize {
    cell.split('\n').map(visible_width).max().unwrap_or(0)
}

/// Content width of each column: the widest of header and cells, at
/// least 1. Rows must already be normalized.
#[must_use]
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell_width(cell))
                .fold(cell_width(header), usize::max)
                .max(1)
        })
        .collect()
}

/// Rendered width of a table whose columns have `widths`.
fn table_width(widths: &[usize], options: &TableOptions) -> usize {
    let separators = visible_width(options.border.glyphs().vertical) * (widths.len() + 1);
    widths.iter().map(|w| w + 2 * options.padding).sum::<usize>() + separators
}

/// Lay out the columns for `headers` and normalized `rows`.
#[must_use]
pub fn layout(headers: &[String], rows: &[Vec<String>], options: &TableOptions) -> Vec<Column> {
    let mut widths = column_widths(headers, rows);

    if let (Some(max), false) = (options.max_width, options.overflow == Overflow::Visible) {
        let mut total = table_width(&widths, options);
        while total > max {
            let Some((widest, &w)) = widths.iter().enumerate().rev().max_by_key(|&(_, w)| *w) else {
                break;
            };
            if w <= 1 {
                tracing::debug!(total, max, "table cannot shrink further");
                break;
            }
            widths[widest] -= 1;
            total -= 1;
        }
    }

    headers
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (header, width))| Column {
            header: header.clone(),
            alignment: options.alignment(i),
            width,
        })
        .collect()
}

/// Stringify `cells` and fit them to `columns` cells.
fn normalize_row<C: ToString>(cells: &[C], columns: usize) -> Vec<String> {
    let mut row: Vec<String> = cells.iter().take(columns).map(ToString::to_string).collect();
    row.resize(columns, String::new());
    row
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Render a table.
///
/// ```
/// use qol_render::table::{render_table, BorderStyle, TableOptions};
/// use qol_term::{Style, strip_style};
///
/// let options = TableOptions {
///     border: BorderStyle::Simple,
///     header_style: Style::new(),
///     ..TableOptions::default()
/// };
/// let text = render_table(&["A", "BB"], &[["x", "yy"], ["xxxxx", "y"]], &options);
/// assert_eq!(
///     strip_style(&text),
///     "┌───────┬────┐\n\
///      │ A     │ BB │\n\
///      ├───────┼────┤\n\
///      │ x     │ yy │\n\
///      │ xxxxx │ y  │\n\
///      └───────┴────┘\n"
/// );
/// ```
#[must_use]
pub fn render_table<H, R, C>(headers: &[H], rows: &[R], options: &TableOptions) -> String
where
    H: AsRef<str>,
    R: AsRef<[C]>,
    C: ToString,
{
    let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| normalize_row(row.as_ref(), headers.len()))
        .collect();
    render_rows(&headers, &rows, options)
}

/// Render already-normalized rows. An empty header list renders nothing.
fn render_rows(headers: &[String], rows: &[Vec<String>], options: &TableOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let columns = layout(headers, rows, options);
    let glyphs = options.border.glyphs();
    let mut out = String::new();

    if glyphs.has_rules() {
        push_rule(&mut out, &columns, options.padding, glyphs.horizontal, [
            glyphs.top_left,
            glyphs.top_cross,
            glyphs.top_right,
        ]);
    }

    push_row(&mut out, &columns, headers, options, options.header_style);

    if glyphs.has_rules() {
        push_rule(&mut out, &columns, options.padding, glyphs.horizontal, [
            glyphs.left_cross,
            glyphs.cross,
            glyphs.right_cross,
        ]);
    }

    for (index, row) in rows.iter().enumerate() {
        let style = if options.zebra && index % 2 == 1 {
            options.stripe_style
        } else {
            Style::new()
        };
        push_row(&mut out, &columns, row, options, style);
    }

    if glyphs.has_rules() {
        push_rule(&mut out, &columns, options.padding, glyphs.horizontal, [
            glyphs.bottom_left,
            glyphs.bottom_cross,
            glyphs.bottom_right,
        ]);
    }

    out
}

/// `[left, junction, right]` around one horizontal run per column.
fn push_rule(out: &mut String, columns: &[Column], padding: usize, horizontal: &str, [left, mid, right]: [&str; 3]) {
    out.push_str(left);
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str(mid);
        }
        out.push_str(&horizontal.repeat(column.width + 2 * padding));
    }
    out.push_str(right);
    out.push('\n');
}

/// Physical lines of one cell after the overflow policy.
fn cell_lines(cell: &str, width: usize, overflow: Overflow) -> Vec<String> {
    let lines = cell.split('\n');
    match overflow {
        Overflow::Visible => lines.map(str::to_string).collect(),
        Overflow::Truncate => lines.map(|line| truncate_to_width(line, width)).collect(),
        Overflow::Wrap => lines.flat_map(|line| wrap_to_width(line, width)).collect(),
    }
}

fn push_row(out: &mut String, columns: &[Column], cells: &[String], options: &TableOptions, style: Style) {
    let vertical = options.border.glyphs().vertical;
    let pad = " ".repeat(options.padding);

    let lines: Vec<Vec<String>> = columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| cell_lines(cell, column.width, options.overflow))
        .collect();
    let height = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);

    for k in 0..height {
        out.push_str(vertical);
        for (column, cell) in columns.iter().zip(&lines) {
            let text = cell.get(k).map_or("", String::as_str);
            out.push_str(&pad);
            out.push_str(&style.paint_over(&pad_to_width(text, column.width, column.alignment)));
            out.push_str(&pad);
            out.push_str(vertical);
        }
        out.push('\n');
    }
}

// ─── Table Builder ───────────────────────────────────────────────────────────

/// A table that collects rows and renders on demand.
///
/// ```
/// use qol_render::table::{BorderStyle, Table};
/// use qol_term::Align;
///
/// let mut table = Table::new(["Name", "Qty"]).border(BorderStyle::Double).align([Align::Left, Align::Right]);
/// table.add_row(["apples", "3"]);
/// table.add_row([String::from("pears")]);
/// assert_eq!(table.len(), 2);
/// assert!(table.render().contains("║"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    options: TableOptions,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            options: TableOptions::default(),
        }
    }

    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn align(mut self, alignments: impl IntoIterator<Item = Align>) -> Self {
        self.options.alignments = alignments.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn border(mut self, border: BorderStyle) -> Self {
        self.options.border = border;
        self
    }

    #[must_use]
    pub const fn padding(mut self, padding: usize) -> Self {
        self.options.padding = padding;
        self
    }

    #[must_use]
    pub const fn header_style(mut self, style: Style) -> Self {
        self.options.header_style = style;
        self
    }

    /// Stripe every second body row with `style`.
    #[must_use]
    pub const fn zebra(mut self, style: Style) -> Self {
        self.options.zebra = true;
        self.options.stripe_style = style;
        self
    }

    /// Fit the table into `max_width` columns using `overflow`.
    #[must_use]
    pub const fn overflow(mut self, overflow: Overflow, max_width: Option<usize>) -> Self {
        self.options.overflow = overflow;
        self.options.max_width = max_width;
        self
    }

    pub fn add_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: ToString,
    {
        let cells: Vec<C> = cells.into_iter().collect();
        self.rows.push(normalize_row(&cells, self.headers.len()));
    }

    pub fn add_rows<I, R, C>(&mut self, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: ToString,
    {
        for row in rows {
            self.add_row(row);
        }
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current column layout, computed fresh from the rows.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        layout(&self.headers, &self.rows, &self.options)
    }

    #[must_use]
    pub fn render(&self) -> String {
        render_rows(&self.headers, &self.rows, &self.options)
    }

    /// Print to stdout. With an overflow policy but no `max_width`, the
    /// terminal width is used.
    pub fn print(&self) -> io::Result<()> {
        self.print_to(&mut LineRenderer::new(io::stdout(), Capabilities::detect()))
    }

    /// Write the table through `line`, one physical line at a time. An
    /// unset `max_width` falls back to the renderer's terminal width.
    pub fn print_to<W: Write>(&self, line: &mut LineRenderer<W>) -> io::Result<()> {
        let mut options = self.options.clone();
        if options.overflow != Overflow::Visible && options.max_width.is_none() {
            options.max_width = Some(usize::from(line.capabilities().size.cols));
        }
        let text = render_rows(&self.headers, &self.rows, &options);
        for row in text.lines() {
            line.render_line(row, None)?;
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use qol_term::strip_style;

    fn unstyled(border: BorderStyle) -> TableOptions {
        TableOptions {
            border,
            header_style: Style::new(),
            ..TableOptions::default()
        }
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn widths_follow_widest_cell() {
        let headers = strings(&["A", "BB"]);
        let rows = vec![strings(&["x", "yy"]), strings(&["xxxxx", "y"])];
        assert_eq!(column_widths(&headers, &rows), [5, 2]);
    }

    #[test]
    fn widths_ignore_styles_and_count_wide_chars() {
        let headers = strings(&["H"]);
        let rows = vec![vec!["\x1b[31mred\x1b[0m".to_string()], vec!["日本".to_string()]];
        assert_eq!(column_widths(&headers, &rows), [4]);
    }

    #[test]
    fn empty_column_is_one_wide() {
        let headers = strings(&["", "B"]);
        let rows = vec![strings(&["", "b"])];
        assert_eq!(column_widths(&headers, &rows), [1, 1]);
    }

    #[test]
    fn rounded_table() {
        let text = render_table(&["A", "BB"], &[["x", "yy"], ["xxxxx", "y"]], &unstyled(BorderStyle::Rounded));
        assert_eq!(
            text,
            "╭───────┬────╮\n\
             │ A     │ BB │\n\
             ├───────┼────┤\n\
             │ x     │ yy │\n\
             │ xxxxx │ y  │\n\
             ╰───────┴────╯\n"
        );
    }

    #[test]
    fn double_table() {
        let text = render_table(&["N"], &[["1"]], &unstyled(BorderStyle::Double));
        assert_eq!(text, "╔═══╗\n║ N ║\n╠═══╣\n║ 1 ║\n╚═══╝\n");
    }

    #[test]
    fn plain_table_has_no_rules() {
        let text = render_table(&["A", "B"], &[["1", "2"]], &unstyled(BorderStyle::Plain));
        assert_eq!(text, "  A   B  \n  1   2  \n");
    }

    #[test]
    fn zero_rows_render_header_and_frame() {
        let empty: [[&str; 2]; 0] = [];
        let text = render_table(&["X", "Y"], &empty, &unstyled(BorderStyle::Rounded));
        assert_eq!(text, "╭───┬───╮\n│ X │ Y │\n├───┼───┤\n╰───┴───╯\n");
    }

    #[test]
    fn no_headers_render_nothing() {
        let empty: [[&str; 0]; 0] = [];
        let headers: [&str; 0] = [];
        assert_eq!(render_table(&headers, &empty, &TableOptions::default()), "");
    }

    #[test]
    fn short_rows_pad_and_long_rows_truncate() {
        let rows: Vec<Vec<&str>> = vec![vec!["only"], vec!["a", "b", "extra"]];
        let text = render_table(&["One", "Two"], &rows, &unstyled(BorderStyle::Simple));
        assert!(text.contains("│ only │     │"));
        assert!(!text.contains("extra"));
    }

    #[test]
    fn cells_accept_any_display_value() {
        let text = render_table(&["n", "f"], &[[1.5_f64, 2.0]], &unstyled(BorderStyle::Plain));
        assert!(text.contains("1.5"));
        assert!(text.contains(" 2 "));
    }

    #[test]
    fn alignment_applies_per_column() {
        let options = TableOptions {
            alignments: vec![Align::Right, Align::Center],
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["Num", "Mid"], &[["1", "x"]], &options);
        assert!(text.contains("│   1 │  x  │"));
    }

    #[test]
    fn header_style_wraps_each_header_cell() {
        let text = render_table(&["H"], &[["v"]], &TableOptions::default());
        assert!(text.contains("│ \x1b[36m\x1b[1mH\x1b[0m │"));
        assert!(text.contains("│ v │"));
    }

    #[test]
    fn zebra_stripes_odd_rows_per_cell() {
        let options = TableOptions {
            zebra: true,
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["A", "B"], &[["0", "0"], ["1", "1"], ["2", "2"]], &options);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "│ 0 │ 0 │");
        assert_eq!(lines[4], "│ \x1b[2m1\x1b[0m │ \x1b[2m1\x1b[0m │");
        assert_eq!(lines[5], "│ 2 │ 2 │");
    }

    #[test]
    fn zebra_stripe_survives_styled_cells() {
        let options = TableOptions {
            zebra: true,
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["Status"], &[["x"], ["\x1b[32mok\x1b[0m tail"]], &options);
        let striped = text.lines().nth(4).unwrap();
        assert_eq!(striped, "│ \x1b[2m\x1b[32mok\x1b[0m\x1b[2m tail\x1b[0m │");
    }

    #[test]
    fn wrapped_wide_cells_stay_inside_their_column() {
        let options = TableOptions {
            overflow: Overflow::Wrap,
            max_width: Some(8),
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["A", "B"], &[["日本語", "x"]], &options);
        let widths: Vec<usize> = text.lines().map(visible_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
        let columns = layout(&strings(&["A", "B"]), &[strings(&["日本語", "x"])], &options);
        for line in wrap_to_width("日本語", columns[0].width) {
            assert!(visible_width(&line) <= columns[0].width, "{line:?}");
        }
    }

    #[test]
    fn every_line_has_same_visible_width() {
        let rows = [["\x1b[32mok\x1b[0m", "日本語"], ["long value here", ""]];
        let text = render_table(&["Status", "Name"], &rows, &TableOptions::default());
        let widths: Vec<usize> = text.lines().map(visible_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn embedded_newlines_make_tall_rows() {
        let text = render_table(&["A", "B"], &[["one\ntwo", "x"]], &unstyled(BorderStyle::Simple));
        assert!(text.contains("│ one │ x │\n│ two │   │"));
    }

    #[test]
    fn visible_overflow_ignores_max_width() {
        let options = TableOptions {
            max_width: Some(5),
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["Header"], &[["a long cell"]], &options);
        assert!(text.contains("a long cell"));
    }

    #[test]
    fn truncate_shrinks_widest_column() {
        let options = TableOptions {
            overflow: Overflow::Truncate,
            max_width: Some(20),
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["Id", "Description"], &[["1", "a rather long description"]], &options);
        for line in text.lines() {
            assert!(visible_width(line) <= 20, "{line}");
        }
        assert!(text.contains('…'));
        assert!(text.contains("│ Id │"));
    }

    #[test]
    fn wrap_adds_physical_lines() {
        let options = TableOptions {
            overflow: Overflow::Wrap,
            max_width: Some(16),
            ..unstyled(BorderStyle::Simple)
        };
        let text = render_table(&["Words"], &[["alpha beta gamma delta"]], &options);
        for line in text.lines() {
            assert_eq!(visible_width(line), 16, "{line}");
        }
        let joined: Vec<&str> = text
            .lines()
            .skip(3)
            .take_while(|l| l.starts_with('│'))
            .map(|l| l.trim_matches(|c| c == '│' || c == ' '))
            .collect();
        assert_eq!(joined.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn shrinking_stops_at_one_column() {
        let options = TableOptions {
            overflow: Overflow::Truncate,
            max_width: Some(1),
            ..unstyled(BorderStyle::Simple)
        };
        let headers = strings(&["abc", "def"]);
        let columns = layout(&headers, &[], &options);
        assert!(columns.iter().all(|c| c.width == 1));
    }

    #[test]
    fn border_style_parses() {
        assert_eq!("rounded".parse::<BorderStyle>(), Ok(BorderStyle::Rounded));
        assert_eq!(" Double ".parse::<BorderStyle>(), Ok(BorderStyle::Double));
        assert_eq!(
            "dotted".parse::<BorderStyle>(),
            Err(ParseError::UnknownBorder("dotted".into()))
        );
        for border in BorderStyle::ALL {
            assert_eq!(border.to_string().parse::<BorderStyle>(), Ok(border));
        }
    }

    #[test]
    fn builder_collects_rows() {
        let mut table = Table::new(["A", "B"]).border(BorderStyle::Plain).header_style(Style::new());
        table.add_rows([["1", "2"], ["3", "4"]]);
        table.add_row([5]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[2], strings(&["5", ""]));
        assert_eq!(table.columns()[0].width, 1);
        assert_eq!(strip_style(&table.render()).lines().count(), 4);
    }

    #[test]
    fn builder_padding() {
        let table = Table::new(["A"]).padding(0).border(BorderStyle::Simple).header_style(Style::new());
        assert_eq!(table.render(), "┌─┐\n│A│\n├─┤\n└─┘\n");
    }

    fn cell() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z ]{0,12}",
            "[a-z]{0,4}".prop_map(|s| format!("\x1b[31m{s}\x1b[0m")),
            Just("日本".to_string()),
        ]
    }

    #[test]
    fn print_to_strips_color_and_fits_terminal() {
        let mut table = Table::new(["Name", "Notes"]).overflow(Overflow::Truncate, None);
        table.add_row(["a", "a fairly long note that will not fit"]);
        let caps = Capabilities::plain().with_cols(20);
        let mut line = LineRenderer::new(Vec::new(), caps);
        table.print_to(&mut line).unwrap();
        let out = String::from_utf8(line.writer().clone()).unwrap();
        assert!(!out.contains('\x1b'));
        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().all(|l| visible_width(l) <= 20), "{out}");
    }

    proptest! {
        #[test]
        fn columns_fit_every_cell(
            headers in proptest::collection::vec("[A-Z]{0,8}", 1..5),
            rows in proptest::collection::vec(proptest::collection::vec(cell(), 0..6), 0..6),
        ) {
            let rows: Vec<Vec<String>> = rows.iter().map(|r| normalize_row(r, headers.len())).collect();
            let columns = layout(&headers, &rows, &TableOptions::default());
            for (i, column) in columns.iter().enumerate() {
                prop_assert!(column.width >= 1);
                prop_assert!(column.width >= visible_width(&headers[i]));
                for row in &rows {
                    prop_assert!(visible_width(&row[i]) <= column.width);
                }
            }
        }

        #[test]
        fn rendered_lines_are_rectangular(
            rows in proptest::collection::vec(proptest::collection::vec(cell(), 2), 0..5),
        ) {
            let text = render_table(&["Left", "Right"], &rows, &TableOptions::default());
            let widths: Vec<usize> = text.lines().map(visible_width).collect();
            prop_assert!(widths.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
