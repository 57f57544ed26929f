// SPDX-License-Identifier: MIT
//
// Horizontal bar charts.
//
// Values are min/max normalized: the smallest value gets an empty bar and
// the largest a full one. When every value is the same there is nothing to
// compare, so every bar is full.

use std::fmt::Write as _;

use qol_term::width::{Align, pad_to_width};
use qol_term::{Color, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChartOptions {
    /// Length of the longest bar.
    pub max_len: usize,
    /// Labels are padded to this many columns.
    pub label_width: usize,
    /// Append `(value)` after each bar.
    pub show_values: bool,
    pub bar_char: char,
    pub style: Style,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            max_len: 10,
            label_width: 15,
            show_values: true,
            bar_char: '█',
            style: Style::new().fg(Color::CYAN),
        }
    }
}

/// Bar length for `value` on a `min..=max` scale of `max_len` columns,
/// rounded down.
#[allow(clippy::float_cmp)]
fn bar_len(value: f64, min: f64, max: f64, max_len: usize) -> usize {
    if max == min {
        return max_len;
    }
    #[allow(clippy::cast_precision_loss)]
    let scaled = (value - min) / (max - min) * max_len as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let len = scaled.floor().max(0.0) as usize;
    len.min(max_len)
}

/// Render one line per `(label, value)` pair, in order.
///
/// Values that are not finite are charted as the minimum. Empty data
/// renders nothing.
///
/// ```
/// use qol_render::graph::{bar_chart, BarChartOptions};
/// use qol_term::Style;
///
/// let options = BarChartOptions { max_len: 4, label_width: 3, style: Style::new(), ..Default::default() };
/// let chart = bar_chart(&[("a", 0.0), ("b", 2.0), ("c", 4.0)], &options);
/// assert_eq!(chart, "a    (0)\nb   ██ (2)\nc   ████ (4)\n");
/// ```
#[must_use]
pub fn bar_chart<L: AsRef<str>>(data: &[(L, f64)], options: &BarChartOptions) -> String {
    let finite = data.iter().map(|(_, v)| *v).filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if data.is_empty() {
        return String::new();
    }
    // No finite values at all: chart everything as equal.
    let (min, max) = if min > max { (0.0, 0.0) } else { (min, max) };

    let mut out = String::new();
    for (label, value) in data {
        let len = if value.is_finite() {
            bar_len(*value, min, max, options.max_len)
        } else {
            tracing::debug!(label = label.as_ref(), value, "charting non-finite value as minimum");
            bar_len(min, min, max, options.max_len)
        };
        let bar: String = std::iter::repeat_n(options.bar_char, len).collect();

        out.push_str(&pad_to_width(label.as_ref(), options.label_width, Align::Left));
        out.push(' ');
        out.push_str(&options.style.paint(&bar));
        if options.show_values {
            let _ = write!(out, " ({value})");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qol_term::strip_style;

    fn plain(max_len: usize) -> BarChartOptions {
        BarChartOptions {
            max_len,
            label_width: 0,
            style: Style::new(),
            ..BarChartOptions::default()
        }
    }

    #[test]
    fn defaults() {
        let o = BarChartOptions::default();
        assert_eq!(o.max_len, 10);
        assert_eq!(o.label_width, 15);
        assert!(o.show_values);
    }

    #[test]
    fn empty_data_renders_nothing() {
        let data: [(&str, f64); 0] = [];
        assert_eq!(bar_chart(&data, &BarChartOptions::default()), "");
    }

    #[test]
    fn normalizes_between_min_and_max() {
        let chart = bar_chart(&[("lo", 10.0), ("mid", 15.0), ("hi", 20.0)], &plain(10));
        let bars: Vec<usize> = chart.lines().map(|l| l.matches('█').count()).collect();
        assert_eq!(bars, [0, 5, 10]);
    }

    #[test]
    fn equal_values_render_full_bars() {
        let chart = bar_chart(&[("a", 3.0), ("b", 3.0)], &plain(6));
        assert!(chart.lines().all(|l| l.matches('█').count() == 6));
    }

    #[test]
    fn lengths_round_down() {
        assert_eq!(bar_len(1.0, 0.0, 3.0, 10), 3);
        assert_eq!(bar_len(2.0, 0.0, 3.0, 10), 6);
    }

    #[test]
    fn labels_pad_by_visible_width() {
        let options = BarChartOptions {
            label_width: 6,
            show_values: false,
            ..plain(2)
        };
        let chart = bar_chart(&[("\x1b[31mab\x1b[0m", 1.0), ("日本", 2.0)], &options);
        let lines: Vec<String> = chart.lines().map(strip_style).collect();
        assert_eq!(lines, ["ab     ", "日本   ██"]);
    }

    #[test]
    fn bars_are_styled() {
        let options = BarChartOptions {
            label_width: 0,
            show_values: false,
            ..BarChartOptions::default()
        };
        let chart = bar_chart(&[("x", 1.0)], &options);
        assert_eq!(chart, "x \x1b[36m██████████\x1b[0m\n");
    }

    #[test]
    fn non_finite_values_chart_as_minimum() {
        let chart = bar_chart(&[("a", 1.0), ("b", f64::NAN), ("c", 5.0)], &plain(4));
        let bars: Vec<usize> = chart.lines().map(|l| l.matches('█').count()).collect();
        assert_eq!(bars, [0, 0, 4]);
        assert!(chart.contains("(NaN)"));
    }
}
