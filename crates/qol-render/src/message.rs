// SPDX-License-Identifier: MIT
//
// Status messages: one line per message, introduced by a colored marker:
//
//   [indent][timestamp ][icon ][prefix] text
//
// The timestamp is dim, the icon and prefix carry the kind's color and
// emphasis, and the text carries its color only. Every piece is painted
// separately, so nothing bleeds into the next line.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::str::FromStr;

use qol_term::style::Attr;
use qol_term::{Capabilities, Color, ParseError, Style, strip_style};

// ─── Kinds ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Info,
    Info2,
    Pending,
    Success,
    Success2,
    Error,
    Warning,
    Question,
    Debug,
}

impl MessageKind {
    pub const ALL: [Self; 9] = [
        Self::Info,
        Self::Info2,
        Self::Pending,
        Self::Success,
        Self::Success2,
        Self::Error,
        Self::Warning,
        Self::Question,
        Self::Debug,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Info2 => "info2",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Success2 => "success2",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Question => "question",
            Self::Debug => "debug",
        }
    }

    /// The built-in look of this kind.
    #[must_use]
    pub fn appearance(self) -> MessageStyle {
        let (prefix, icon, color, attrs) = match self {
            Self::Info => ("[+]", "ℹ", Color::WHITE, Attr::empty()),
            Self::Info2 => ("[#]", "🛈", Color::LIGHT_BLUE, Attr::empty()),
            Self::Pending => ("[...]", "⌛", Color::GRAY, Attr::empty()),
            Self::Success => ("[✓]", "✅", Color::LIGHT_GREEN, Attr::BOLD),
            Self::Success2 => ("[✓]", "✅", Color::LIGHT_BLUE, Attr::empty()),
            Self::Error => ("[-]", "❌", Color::LIGHT_RED, Attr::BOLD),
            Self::Warning => ("[!]", "⚠", Color::LIGHT_YELLOW, Attr::BOLD),
            Self::Question => ("[?]", "❓", Color::LIGHT_MAGENTA, Attr::empty()),
            Self::Debug => ("[DEBUG]", "🐛", Color::LIGHT_CYAN, Attr::empty()),
        };
        MessageStyle {
            prefix: prefix.to_string(),
            icon: icon.to_string(),
            color,
            attrs,
            indent: 0,
        }
    }
}

impl FromStr for MessageKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

// ─── Styles ──────────────────────────────────────────────────────────────────

/// How one kind of message looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStyle {
    pub prefix: String,
    /// Shown before the prefix when icons are enabled; may be empty.
    pub icon: String,
    pub color: Color,
    /// Emphasis of the icon and prefix (not the text).
    pub attrs: Attr,
    /// Extra indentation, added to the per-call indent.
    pub indent: usize,
}

impl MessageStyle {
    #[must_use]
    pub fn new(prefix: &str, color: Color) -> Self {
        Self {
            prefix: prefix.to_string(),
            icon: String::new(),
            color,
            attrs: Attr::empty(),
            indent: 0,
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    #[must_use]
    pub const fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub const fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    fn marker(&self) -> Style {
        Style::new().fg(self.color).attr(self.attrs)
    }

    fn text(&self) -> Style {
        Style::new().fg(self.color)
    }
}

// ─── Messenger ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessengerConfig {
    pub show_icons: bool,
    pub show_timestamps: bool,
    /// `strftime`-style format for timestamps.
    pub timestamp_format: String,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            show_timestamps: false,
            timestamp_format: "%H:%M:%S".to_string(),
        }
    }
}

/// Formats and prints status messages.
///
/// ```
/// use qol_render::message::{MessageKind, Messenger, MessengerConfig};
/// use qol_term::{Capabilities, strip_style};
///
/// let config = MessengerConfig { show_icons: false, ..MessengerConfig::default() };
/// let messenger = Messenger::with_capabilities(config, Capabilities::default());
/// let line = messenger.format(MessageKind::Success, "Saved", 2);
/// assert_eq!(strip_style(&line), "  [✓] Saved");
/// ```
#[derive(Debug, Clone)]
pub struct Messenger {
    config: MessengerConfig,
    caps: Capabilities,
    custom: HashMap<String, MessageStyle>,
}

impl Default for Messenger {
    fn default() -> Self {
        Self::new(MessengerConfig::default())
    }
}

impl Messenger {
    /// A messenger for stdout with detected capabilities.
    #[must_use]
    pub fn new(config: MessengerConfig) -> Self {
        Self::with_capabilities(config, Capabilities::detect())
    }

    #[must_use]
    pub fn with_capabilities(config: MessengerConfig, caps: Capabilities) -> Self {
        Self {
            config,
            caps,
            custom: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MessengerConfig {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut MessengerConfig {
        &mut self.config
    }

    /// Add or replace a named style for [`custom`](Self::custom).
    pub fn register_style(&mut self, name: &str, style: MessageStyle) {
        self.custom.insert(name.to_string(), style);
    }

    /// The style registered as `name`, or the info style.
    #[must_use]
    pub fn style_named(&self, name: &str) -> MessageStyle {
        self.custom.get(name).cloned().unwrap_or_else(|| {
            tracing::debug!(name, "no custom message style, using info");
            MessageKind::Info.appearance()
        })
    }

    // ── Formatting ──────────────────────────────────────────────────

    #[must_use]
    pub fn format(&self, kind: MessageKind, text: &str, indent: usize) -> String {
        self.format_styled(&kind.appearance(), text, indent)
    }

    #[must_use]
    pub fn format_styled(&self, style: &MessageStyle, text: &str, indent: usize) -> String {
        let timestamp = self.config.show_timestamps.then(|| self.timestamp());
        compose(style, text, indent, timestamp.as_deref(), self.config.show_icons)
    }

    /// Current local time in the configured format. A format chrono
    /// rejects falls back to `%H:%M:%S`.
    fn timestamp(&self) -> String {
        let now = chrono::Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.config.timestamp_format)).is_err() {
            tracing::debug!(format = %self.config.timestamp_format, "invalid timestamp format");
            out.clear();
            let _ = write!(out, "{}", now.format("%H:%M:%S"));
        }
        out
    }

    // ── Output ──────────────────────────────────────────────────────

    /// Write one formatted message line to `w`, stripping styles when
    /// color is off.
    pub fn write_to(&self, w: &mut impl Write, style: &MessageStyle, text: &str, indent: usize) -> io::Result<()> {
        let line = self.format_styled(style, text, indent);
        let line = if self.caps.color { line } else { strip_style(&line) };
        writeln!(w, "{line}")?;
        w.flush()
    }

    pub fn print(&self, kind: MessageKind, text: &str) -> io::Result<()> {
        self.print_indented(kind, text, 0)
    }

    pub fn print_indented(&self, kind: MessageKind, text: &str, indent: usize) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock(), &kind.appearance(), text, indent)
    }

    pub fn info(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Info, text)
    }

    pub fn info2(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Info2, text)
    }

    pub fn pending(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Pending, text)
    }

    pub fn success(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Success, text)
    }

    pub fn success2(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Success2, text)
    }

    pub fn error(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Error, text)
    }

    pub fn warning(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Warning, text)
    }

    pub fn question(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Question, text)
    }

    pub fn debug(&self, text: &str) -> io::Result<()> {
        self.print(MessageKind::Debug, text)
    }

    /// Print with a registered style, falling back to info.
    pub fn custom(&self, name: &str, text: &str) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock(), &self.style_named(name), text, 0)
    }
}

fn compose(style: &MessageStyle, text: &str, indent: usize, timestamp: Option<&str>, show_icons: bool) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(ts) = timestamp {
        parts.push(Style::new().dim().paint(ts));
    }
    let marker = style.marker();
    if show_icons && !style.icon.is_empty() {
        parts.push(marker.paint(&style.icon));
    }
    parts.push(marker.paint(&style.prefix));

    format!(
        "{}{} {}",
        " ".repeat(style.indent + indent),
        parts.join(" "),
        style.text().paint(text)
    )
}

// ─── Quick Functions ─────────────────────────────────────────────────────────
//
// Print with a default messenger. Output errors are ignored.

pub fn info(text: &str) {
    let _ = Messenger::default().info(text);
}

pub fn success(text: &str) {
    let _ = Messenger::default().success(text);
}

pub fn warning(text: &str) {
    let _ = Messenger::default().warning(text);
}

pub fn error(text: &str) {
    let _ = Messenger::default().error(text);
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn messenger(show_icons: bool) -> Messenger {
        let config = MessengerConfig {
            show_icons,
            ..MessengerConfig::default()
        };
        Messenger::with_capabilities(config, Capabilities::default())
    }

    #[test]
    fn prefixes_per_kind() {
        let m = messenger(false);
        let expected = [
            (MessageKind::Info, "[+] x"),
            (MessageKind::Info2, "[#] x"),
            (MessageKind::Pending, "[...] x"),
            (MessageKind::Success, "[✓] x"),
            (MessageKind::Success2, "[✓] x"),
            (MessageKind::Error, "[-] x"),
            (MessageKind::Warning, "[!] x"),
            (MessageKind::Question, "[?] x"),
            (MessageKind::Debug, "[DEBUG] x"),
        ];
        for (kind, line) in expected {
            assert_eq!(strip_style(&m.format(kind, "x", 0)), line);
        }
    }

    #[test]
    fn icons_precede_prefix() {
        let m = messenger(true);
        assert_eq!(strip_style(&m.format(MessageKind::Warning, "careful", 0)), "⚠ [!] careful");
    }

    #[test]
    fn exact_escape_layout() {
        let m = messenger(false);
        assert_eq!(
            m.format(MessageKind::Error, "failed", 0),
            "\x1b[91m\x1b[1m[-]\x1b[0m \x1b[91mfailed\x1b[0m"
        );
    }

    #[test]
    fn indent_adds_to_style_indent() {
        let m = messenger(false);
        let style = MessageStyle::new(">>", Color::GREEN).indent(2);
        assert_eq!(strip_style(&m.format_styled(&style, "t", 3)), "     >> t");
    }

    #[test]
    fn timestamp_is_dim_and_first() {
        let style = MessageKind::Info.appearance();
        let line = compose(&style, "t", 0, Some("12:34:56"), false);
        assert!(line.starts_with("\x1b[2m12:34:56\x1b[0m "));
        assert_eq!(strip_style(&line), "12:34:56 [+] t");
    }

    #[test]
    fn timestamps_follow_format() {
        let config = MessengerConfig {
            show_icons: false,
            show_timestamps: true,
            timestamp_format: "%Y".to_string(),
        };
        let m = Messenger::with_capabilities(config, Capabilities::default());
        let line = strip_style(&m.format(MessageKind::Info, "t", 0));
        let (year, rest) = line.split_once(' ').unwrap();
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest, "[+] t");
    }

    #[test]
    fn custom_styles_and_fallback() {
        let mut m = messenger(true);
        m.register_style("deploy", MessageStyle::new("[DEPLOY]", Color::MAGENTA).icon("🚀"));
        assert_eq!(m.style_named("deploy").prefix, "[DEPLOY]");
        assert_eq!(m.style_named("missing"), MessageKind::Info.appearance());
    }

    #[test]
    fn write_to_strips_without_color() {
        let m = Messenger::with_capabilities(MessengerConfig::default(), Capabilities::plain());
        let mut out = Vec::new();
        m.write_to(&mut out, &MessageKind::Success.appearance(), "ok", 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " ✅ [✓] ok\n");
    }

    #[test]
    fn kinds_parse_by_name() {
        for kind in MessageKind::ALL {
            assert_eq!(kind.name().parse::<MessageKind>(), Ok(kind));
        }
        assert_eq!("WARNING".parse::<MessageKind>(), Ok(MessageKind::Warning));
        assert_eq!(
            "shout".parse::<MessageKind>(),
            Err(ParseError::UnknownKind("shout".into()))
        );
    }
}
