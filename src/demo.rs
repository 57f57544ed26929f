// SPDX-License-Identifier: MIT
//
// `qol demo`: a guided tour of the toolkit, one section at a time.
//
// Sections print through the same capability-aware paths the library
// exposes, so `qol demo | cat` produces a readable plain transcript. The
// `--fast` flag turns every delay into zero, which keeps animations short
// enough to run in tests.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;

use qol_render::art::{self, BoxOptions};
use qol_render::effects::{GlitchOptions, TypewriterOptions, glitch_line, typewriter};
use qol_render::graph::{BarChartOptions, bar_chart};
use qol_render::message::{MessageKind, MessageStyle, Messenger, MessengerConfig};
use qol_render::palette;
use qol_render::table::{BorderStyle, Overflow, Table};
use qol_term::color::NAMED_COLORS;
use qol_term::progress::{ProgressBar, ProgressConfig, run_progress};
use qol_term::spinner::{self, Spinner, SpinnerConfig, countdown, run_spinner};
use qol_term::style::{self, gradient};
use qol_term::terminal::Capabilities;
use qol_term::width::Align;
use qol_term::{Attr, Color, LineRenderer, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Colors,
    Messages,
    Animations,
    Tables,
    Art,
    All,
}

impl Section {
    const TOUR: [Self; 5] = [Self::Colors, Self::Messages, Self::Animations, Self::Tables, Self::Art];
}

pub fn run(section: Section, caps: Capabilities, fast: bool) -> Result<()> {
    let mut demo = Demo::new(caps, fast);
    let sections: &[Section] = if section == Section::All {
        &Section::TOUR
    } else {
        std::slice::from_ref(&section)
    };
    for &section in sections {
        let shown = match section {
            Section::Colors => demo.colors(),
            Section::Messages => demo.messages(),
            Section::Animations => demo.animations(),
            Section::Tables => demo.tables(),
            Section::Art => demo.art(),
            Section::All => Ok(()),
        };
        shown.with_context(|| format!("demo section {section:?}"))?;
    }
    Ok(())
}

// ─── Demo State ──────────────────────────────────────────────────────────────

struct Demo {
    caps: Capabilities,
    fast: bool,
    out: LineRenderer<io::Stdout>,
}

impl Demo {
    fn new(caps: Capabilities, fast: bool) -> Self {
        Self {
            caps,
            fast,
            out: LineRenderer::new(io::stdout(), caps),
        }
    }

    fn delay(&self, millis: u64) -> Duration {
        if self.fast { Duration::ZERO } else { Duration::from_millis(millis) }
    }

    /// Print every line of `text`.
    fn emit(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            self.out.render_line(line, None)?;
        }
        Ok(())
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let width = usize::from(self.caps.size.cols).min(60);
        self.out.render_line("", None)?;
        self.emit(&Style::new().bold().fg(Color::CYAN).paint(title))?;
        self.emit(&art::separator(width, '─', Style::new().fg(Color::GRAY)))
    }

    // ── Colors ──────────────────────────────────────────────────────────

    fn colors(&mut self) -> io::Result<()> {
        self.heading("Colors")?;

        let swatches: Vec<String> = NAMED_COLORS
            .iter()
            .filter(|(name, _)| !name.starts_with("bright-") && *name != "grey" && *name != "default")
            .map(|&(name, color)| Style::new().fg(color).paint(name))
            .collect();
        for chunk in swatches.chunks(8) {
            self.emit(&chunk.join(" "))?;
        }

        let attrs = [
            ("bold", Attr::BOLD),
            ("dim", Attr::DIM),
            ("italic", Attr::ITALIC),
            ("underline", Attr::UNDERLINE),
            ("reverse", Attr::REVERSE),
            ("strikethrough", Attr::STRIKETHROUGH),
        ];
        let sample: Vec<String> = attrs.iter().map(|&(name, attr)| Style::new().attr(attr).paint(name)).collect();
        self.emit(&sample.join(" "))?;

        let cube: String = (16..=231u8)
            .step_by(6)
            .map(|idx| Style::new().bg(Color::Ansi256(idx)).paint(" "))
            .collect();
        self.emit(&cube)?;

        self.emit(&palette::rainbow("Rainbow gradient across the whole line"))?;
        self.emit(&palette::pastel("Pastel gradient, soft and easy on the eyes"))?;
        self.emit(&gradient(
            "Custom stops from #ff5f6d to #ffc371",
            &[Color::Rgb(0xff, 0x5f, 0x6d), Color::Rgb(0xff, 0xc3, 0x71)],
        ))?;
        self.emit(&format!(
            "{} {} {} {}",
            style::red("red"),
            style::green("green"),
            style::bold("bold"),
            style::underline("underline")
        ))
    }

    // ── Messages ────────────────────────────────────────────────────────

    fn messages(&mut self) -> io::Result<()> {
        self.heading("Messages")?;
        let mut messenger = Messenger::with_capabilities(MessengerConfig::default(), self.caps);
        for kind in MessageKind::ALL {
            messenger.print(kind, &format!("a {} message", kind.name()))?;
        }
        messenger.print_indented(MessageKind::Info2, "indented detail", 4)?;

        messenger.register_style("deploy", MessageStyle::new("[deploy]", Color::MAGENTA).icon("🚀"));
        messenger.custom("deploy", "custom styles are registered by name")?;

        messenger.config_mut().show_timestamps = true;
        messenger.info("timestamps are optional")
    }

    // ── Animations ──────────────────────────────────────────────────────

    fn animations(&mut self) -> io::Result<()> {
        self.heading("Animations")?;
        let caps = self.caps;

        let config = ProgressConfig {
            bar_width: usize::from(caps.size.cols).saturating_sub(45).clamp(10, 40),
            ..ProgressConfig::default()
        };
        let step = self.delay(30);
        run_progress(
            ProgressBar::with_config(io::stdout(), caps, 40, "Downloading", config),
            |bar| {
                for i in 1..=40 {
                    if !step.is_zero() {
                        thread::sleep(step);
                    }
                    bar.set(i)?;
                }
                Ok::<_, io::Error>(())
            },
        )?;

        let config = SpinnerConfig {
            interval: self.delay(80).max(Duration::from_millis(1)),
            ..SpinnerConfig::with_frames(spinner::DOTS)
        };
        let pause = self.delay(1200);
        let done = Style::new().fg(Color::GREEN).paint("✓");
        run_spinner(Spinner::with_config(io::stdout(), caps, "Thinking", config), |spin| {
            thread::sleep(pause / 2);
            spin.update_message("Still thinking");
            thread::sleep(pause / 2);
            Ok::<_, io::Error>(())
        })?;
        self.emit(&format!("{done} Thought about it"))?;

        let mut line = LineRenderer::new(io::stdout(), caps);
        countdown(&mut line, 3, "Launching in", "Liftoff!", self.delay(1000))?;

        let mut stdout = io::stdout().lock();
        let options = TypewriterOptions {
            delay: self.delay(40),
            pause: self.delay(250),
            ..TypewriterOptions::default()
        };
        typewriter(&mut stdout, "Typed one character at a time. Neat!", &options)?;

        if caps.interactive {
            let options = GlitchOptions {
                delay: self.delay(30),
                ..GlitchOptions::default()
            };
            glitch_line(&mut stdout, "ACCESS GRANTED", &options)?;
        } else {
            writeln!(stdout, "ACCESS GRANTED")?;
        }
        stdout.flush()
    }

    // ── Tables ──────────────────────────────────────────────────────────

    fn tables(&mut self) -> io::Result<()> {
        self.heading("Tables")?;
        let rows = [
            ["Alice", "Engineer", "42"],
            ["Bob", "Designer", "7"],
            ["Chloé", "日本語 support", "1234"],
        ];

        for border in BorderStyle::ALL {
            self.emit(&Style::new().dim().paint(border.name()))?;
            let mut table = Table::new(["Name", "Role", "Score"])
                .border(border)
                .align([Align::Left, Align::Center, Align::Right]);
            table.add_rows(rows);
            table.print_to(&mut self.out)?;
        }

        self.emit(&Style::new().dim().paint("zebra, wrapped to 36 columns"))?;
        let mut table = Table::new(["Task", "Notes"])
            .zebra(Style::new().dim())
            .overflow(Overflow::Wrap, Some(36));
        table.add_rows([
            ["Parse", "splits input into tokens and keeps their spans"],
            ["Render", "pads every cell by its visible width"],
            ["Ship", "done"],
        ]);
        table.print_to(&mut self.out)
    }

    // ── Art ─────────────────────────────────────────────────────────────

    fn art(&mut self) -> io::Result<()> {
        self.heading("Art")?;
        self.emit(&art::banner("QOL", art::banner_style()))?;
        for row in art::banner("Hi!", Style::new()).lines() {
            self.emit(&gradient(row, &palette::RAINBOW))?;
        }
        self.emit(&art::separator(30, '═', Style::new().fg(Color::MAGENTA)))?;

        let options = BoxOptions {
            title: Some("Note".to_string()),
            ..BoxOptions::default()
        };
        self.emit(&art::boxed(
            &format!("Boxes measure {} text\nso borders stay aligned.", style::yellow("colored")),
            &options,
        ))?;

        let data = [("Rust", 92.0), ("Go", 71.5), ("Python", 64.0), ("C", 58.0)];
        let options = BarChartOptions {
            max_len: 20,
            label_width: 8,
            ..BarChartOptions::default()
        };
        self.emit(&bar_chart(&data, &options))
    }
}
