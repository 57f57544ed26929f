// SPDX-License-Identifier: MIT
//
// qol — command-line front end for the presentation toolkit.
//
// The binary is a thin shell over the two library crates:
//
//   qol-term   → escape codes, width measurement, anchored lines, progress
//   qol-render → tables, messages, banners, charts, effects
//
// Every subcommand builds one `Capabilities` value up front (detected from
// stdout, then narrowed by `--no-color` and `--width`) and hands it to the
// renderers, so piping the output anywhere yields plain sequential text.
//
// Logs go to stderr, filtered by `QOL_LOG` (default `warn`).

mod demo;

use std::io::{self, BufRead, Read, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use qol_render::art::{self, BoxOptions};
use qol_render::graph::{BarChartOptions, bar_chart};
use qol_render::message::{MessageKind, Messenger, MessengerConfig};
use qol_render::table::{BorderStyle, Overflow, Table};
use qol_term::progress::{ProgressBar, ProgressConfig};
use qol_term::spinner::{BackgroundSpinner, Spinner};
use qol_term::terminal::{self, Capabilities};
use qol_term::width::{Align, strip_style, visible_width};
use qol_term::{LineRenderer, Style};

// ─── Command Line ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "qol", version, about = "Colors, tables, progress bars and banners for the terminal")]
struct Cli {
    /// Never emit color, even on a terminal
    #[arg(long, global = true)]
    no_color: bool,

    /// Override the detected terminal width
    #[arg(long, global = true, value_name = "COLS")]
    width: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tour the toolkit
    Demo {
        #[arg(value_enum, default_value_t = demo::Section::All)]
        section: demo::Section,

        /// Skip every delay in the animations
        #[arg(long)]
        fast: bool,
    },

    /// Render comma-separated rows as a table (rows from stdin when none are given)
    Table {
        /// Rows such as "alice,30"; the first row is the header unless --header is set
        rows: Vec<String>,

        /// Comma-separated header cells
        #[arg(long)]
        header: Option<String>,

        /// rounded, double, simple or plain
        #[arg(long, default_value = "rounded")]
        border: BorderStyle,

        /// Per-column alignment: left, center or right
        #[arg(long, value_delimiter = ',')]
        align: Vec<Align>,

        /// Dim every other row
        #[arg(long)]
        zebra: bool,

        /// What to do with tables wider than the terminal
        #[arg(long, value_enum, default_value_t = OverflowArg::Visible)]
        overflow: OverflowArg,
    },

    /// Print text in block letters
    Banner {
        text: String,

        /// Color name or #hex
        #[arg(long, default_value = "cyan")]
        color: String,
    },

    /// Draw a box around text
    Box {
        text: String,

        #[arg(long)]
        title: Option<String>,
    },

    /// Print a horizontal bar chart from label=value pairs
    Chart {
        #[arg(required = true, value_name = "LABEL=VALUE")]
        pairs: Vec<String>,

        /// Length of the longest bar
        #[arg(long, default_value_t = 10)]
        max_len: usize,
    },

    /// Print a status message
    Message {
        /// info, info2, pending, success, success2, error, warning, question or debug
        kind: MessageKind,
        text: String,

        /// Prefix the message with the local time
        #[arg(long)]
        timestamp: bool,
    },

    /// Remove escape sequences from stdin
    Strip,

    /// Print the visible width of text
    Width { text: String },

    /// Run a progress bar to completion
    Progress {
        #[arg(long, default_value_t = 100)]
        total: u64,

        /// Delay between steps
        #[arg(long, default_value_t = 20)]
        step_millis: u64,

        #[arg(long, default_value = "Working")]
        description: String,
    },

    /// Show a spinner for a while
    Spinner {
        #[arg(long, default_value_t = 1500)]
        millis: u64,

        #[arg(long, default_value = "Loading")]
        message: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OverflowArg {
    Visible,
    Truncate,
    Wrap,
}

impl From<OverflowArg> for Overflow {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Visible => Self::Visible,
            OverflowArg::Truncate => Self::Truncate,
            OverflowArg::Wrap => Self::Wrap,
        }
    }
}

impl Cli {
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::detect();
        if self.no_color {
            caps.color = false;
        }
        if let Some(cols) = self.width {
            caps = caps.with_cols(cols.max(1));
        }
        caps
    }
}

// ─── Entry Point ─────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_env("QOL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    terminal::install_cursor_restore_hook();

    let cli = Cli::parse();
    let caps = cli.capabilities();
    tracing::debug!(?caps, "starting");

    match cli.command {
        Commands::Demo { section, fast } => demo::run(section, caps, fast),
        Commands::Table {
            rows,
            header,
            border,
            align,
            zebra,
            overflow,
        } => {
            let options = TableArgs {
                header,
                border,
                align,
                zebra,
                overflow: overflow.into(),
            };
            table(rows, &options, caps)
        }
        Commands::Banner { text, color } => banner(&text, &color, caps),
        Commands::Box { text, title } => boxed(&text, title, caps),
        Commands::Chart { pairs, max_len } => chart(&pairs, max_len, caps),
        Commands::Message {
            kind,
            text,
            timestamp,
        } => message(kind, &text, timestamp, caps),
        Commands::Strip => strip(),
        Commands::Width { text } => {
            println!("{}", visible_width(&text));
            Ok(())
        }
        Commands::Progress {
            total,
            step_millis,
            description,
        } => progress(total, Duration::from_millis(step_millis), &description, caps),
        Commands::Spinner { millis, message } => spinner(Duration::from_millis(millis), &message, caps),
    }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// Print rendered text line by line, dropping styles when color is off.
fn emit(text: &str, caps: Capabilities) -> Result<()> {
    let mut line = LineRenderer::new(io::stdout(), caps);
    for row in text.lines() {
        line.render_line(row, None).context("writing to stdout")?;
    }
    Ok(())
}

// ─── Subcommands ─────────────────────────────────────────────────────────────

struct TableArgs {
    header: Option<String>,
    border: BorderStyle,
    align: Vec<Align>,
    zebra: bool,
    overflow: Overflow,
}

fn split_cells(row: &str) -> Vec<String> {
    row.split(',').map(|cell| cell.trim().to_string()).collect()
}

fn table(rows: Vec<String>, args: &TableArgs, caps: Capabilities) -> Result<()> {
    let mut rows = if rows.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("reading rows from stdin")?
    } else {
        rows
    };
    rows.retain(|row| !row.trim().is_empty());

    let headers = match &args.header {
        Some(header) => split_cells(header),
        None if rows.is_empty() => bail!("no rows to render"),
        None => split_cells(&rows.remove(0)),
    };

    let mut table = Table::new(headers)
        .border(args.border)
        .align(args.align.iter().copied())
        .overflow(args.overflow, None);
    if args.zebra {
        table = table.zebra(Style::new().dim());
    }
    table.add_rows(rows.iter().map(|row| split_cells(row)));

    let mut line = LineRenderer::new(io::stdout(), caps);
    table.print_to(&mut line).context("writing table")
}

fn banner(text: &str, color: &str, caps: Capabilities) -> Result<()> {
    let color = color.parse().with_context(|| format!("invalid banner color {color:?}"))?;
    emit(&art::banner(text, Style::new().fg(color)), caps)
}

fn boxed(text: &str, title: Option<String>, caps: Capabilities) -> Result<()> {
    let options = BoxOptions {
        title,
        ..BoxOptions::default()
    };
    emit(&art::boxed(text, &options), caps)
}

/// `label=value`, where the value is a decimal number.
const PAIR_PATTERN: &str = r"^(?P<label>.*)=(?P<value>[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)$";

/// Parse `label=value`, splitting on the last `=` so labels may contain one.
fn parse_pair(pattern: &Regex, pair: &str) -> Result<(String, f64)> {
    let found = pattern
        .captures(pair)
        .with_context(|| format!("expected LABEL=VALUE, got {pair:?}"))?;
    let value = found["value"]
        .parse()
        .with_context(|| format!("invalid number in {pair:?}"))?;
    Ok((found["label"].to_string(), value))
}

fn chart(pairs: &[String], max_len: usize, caps: Capabilities) -> Result<()> {
    let pattern = Regex::new(PAIR_PATTERN).context("compiling pair pattern")?;
    let data = pairs
        .iter()
        .map(|pair| parse_pair(&pattern, pair))
        .collect::<Result<Vec<_>>>()?;
    let label_width = data.iter().map(|(label, _)| visible_width(label)).max().unwrap_or(0);
    let options = BarChartOptions {
        max_len,
        label_width,
        ..BarChartOptions::default()
    };
    emit(&bar_chart(&data, &options), caps)
}

fn message(kind: MessageKind, text: &str, timestamp: bool, caps: Capabilities) -> Result<()> {
    let config = MessengerConfig {
        show_timestamps: timestamp,
        ..MessengerConfig::default()
    };
    Messenger::with_capabilities(config, caps)
        .print(kind, text)
        .context("writing message")
}

fn strip() -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    let mut out = io::stdout().lock();
    out.write_all(strip_style(&input).as_bytes())?;
    out.flush()?;
    Ok(())
}

fn progress(total: u64, step: Duration, description: &str, caps: Capabilities) -> Result<()> {
    let config = ProgressConfig {
        bar_width: usize::from(caps.size.cols).saturating_sub(40).clamp(10, 50),
        ..ProgressConfig::default()
    };
    let mut bar = ProgressBar::with_config(io::stdout(), caps, total, description, config);
    bar.start()?;
    for _ in 0..total {
        if !step.is_zero() {
            thread::sleep(step);
        }
        bar.tick()?;
    }
    bar.finish().context("finishing progress bar")
}

fn spinner(duration: Duration, message: &str, caps: Capabilities) -> Result<()> {
    let spinner = BackgroundSpinner::start(Spinner::new(io::stdout(), caps, message));
    thread::sleep(duration);
    let done = Style::new().fg(qol_term::Color::GREEN).paint("✓");
    spinner
        .finish_with(&format!("{done} {message}"))
        .context("finishing spinner")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cells_are_trimmed() {
        assert_eq!(split_cells(" a, b ,c"), ["a", "b", "c"]);
    }

    #[test]
    fn pairs_split_on_last_equals() {
        let pattern = Regex::new(PAIR_PATTERN).unwrap();
        assert_eq!(parse_pair(&pattern, "a=b=2.5").unwrap(), ("a=b".to_string(), 2.5));
        assert_eq!(parse_pair(&pattern, "neg=-3").unwrap(), ("neg".to_string(), -3.0));
        assert!(parse_pair(&pattern, "nothing").is_err());
        assert!(parse_pair(&pattern, "x=abc").is_err());
    }

    #[test]
    fn global_flags_narrow_capabilities() {
        let cli = Cli::parse_from(["qol", "--no-color", "--width", "33", "width", "x"]);
        let caps = cli.capabilities();
        assert!(!caps.color);
        assert_eq!(caps.size.cols, 33);
    }
}
