// SPDX-License-Identifier: MIT
//
// Terminal colors: the three encodings a terminal understands.
//
// A color is either the terminal's own default, an index into the
// 256-color palette (0–15 being the classic named colors), or a 24-bit
// RGB triple. That is exactly what SGR can express, so there is no
// intermediate color space here: what you build is what gets emitted.
//
// Names and hex literals resolve through `FromStr`. The name table is a
// static slice, fixed at compile time; nothing about color lookup is
// mutable at runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color as the terminal sees it.
///
/// # Examples
///
/// ```
/// use qol_term::color::Color;
///
/// let red: Color = "red".parse().unwrap();
/// assert_eq!(red, Color::Ansi256(1));
///
/// let gold: Color = "#FFD700".parse().unwrap();
/// assert_eq!(gold, Color::Rgb(255, 215, 0));
///
/// assert!("#GGGGGG".parse::<Color>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default color (SGR 39 / 49).
    #[default]
    Default,

    /// ANSI 256-color palette index. 0–7 are the standard colors, 8–15
    /// their bright variants.
    Ansi256(u8),

    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);
    pub const GRAY: Self = Self::Ansi256(8);
    pub const LIGHT_RED: Self = Self::Ansi256(9);
    pub const LIGHT_GREEN: Self = Self::Ansi256(10);
    pub const LIGHT_YELLOW: Self = Self::Ansi256(11);
    pub const LIGHT_BLUE: Self = Self::Ansi256(12);
    pub const LIGHT_MAGENTA: Self = Self::Ansi256(13);
    pub const LIGHT_CYAN: Self = Self::Ansi256(14);
    pub const LIGHT_WHITE: Self = Self::Ansi256(15);

    /// Parse `#RGB` or `#RRGGBB` (the `#` is optional).
    ///
    /// Returns `None` for anything else, including alpha forms.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s).map(|(r, g, b)| Self::Rgb(r, g, b))
    }

    /// Look up a color by name in the static name table.
    ///
    /// Matching ignores ASCII case and treats `_` and spaces like `-`, so
    /// `"Light Blue"`, `"light_blue"` and `"light-blue"` are the same name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let key = normalize_name(name);
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|&(_, color)| color)
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// Approximate RGB value, using the xterm palette for indexed colors.
    ///
    /// Returns `None` for [`Color::Default`] since the actual value
    /// depends on the user's terminal theme.
    #[must_use]
    pub fn to_rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Rgb(r, g, b) => Some((r, g, b)),
            Self::Ansi256(idx) => Some(ansi256_to_rgb(idx)),
            Self::Default => None,
        }
    }

    /// Linear RGB interpolation towards `other` (`t` in 0.0–1.0).
    ///
    /// Falls back to `self` when either side is [`Color::Default`].
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        let (Some(a), Some(b)) = (self.to_rgb(), other.to_rgb()) else {
            return self;
        };
        let t = t.clamp(0.0, 1.0);
        let lerp = |x: u8, y: u8| -> u8 {
            let v = f32::from(x) + (f32::from(y) - f32::from(x)) * t;
            // Safe: v is between two u8 values.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let out = v.round().clamp(0.0, 255.0) as u8;
            out
        };
        Self::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(color) = Self::named(trimmed) {
            return Ok(color);
        }
        if trimmed.starts_with('#') {
            return Self::hex(trimmed).ok_or_else(|| ParseError::InvalidHex(trimmed.to_string()));
        }
        Self::hex(trimmed).ok_or_else(|| ParseError::UnknownColor(trimmed.to_string()))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Name Table ──────────────────────────────────────────────────────────────

/// Every color name the toolkit understands, with its palette slot.
///
/// `gray`/`light-*` follow the toolkit's own vocabulary; `bright-*` are
/// accepted as the conventional aliases.
pub const NAMED_COLORS: &[(&str, Color)] = &[
    ("default", Color::Default),
    ("black", Color::BLACK),
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("yellow", Color::YELLOW),
    ("blue", Color::BLUE),
    ("magenta", Color::MAGENTA),
    ("cyan", Color::CYAN),
    ("white", Color::WHITE),
    ("gray", Color::GRAY),
    ("grey", Color::GRAY),
    ("bright-black", Color::GRAY),
    ("light-red", Color::LIGHT_RED),
    ("bright-red", Color::LIGHT_RED),
    ("light-green", Color::LIGHT_GREEN),
    ("bright-green", Color::LIGHT_GREEN),
    ("light-yellow", Color::LIGHT_YELLOW),
    ("bright-yellow", Color::LIGHT_YELLOW),
    ("light-blue", Color::LIGHT_BLUE),
    ("bright-blue", Color::LIGHT_BLUE),
    ("light-magenta", Color::LIGHT_MAGENTA),
    ("bright-magenta", Color::LIGHT_MAGENTA),
    ("light-cyan", Color::LIGHT_CYAN),
    ("bright-cyan", Color::LIGHT_CYAN),
    ("light-white", Color::LIGHT_WHITE),
    ("bright-white", Color::LIGHT_WHITE),
];

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse a hex color string into an RGB triple.
fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some((r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── ANSI Palette ────────────────────────────────────────────────────────────

/// The standard ANSI-16 palette as RGB values (xterm defaults).
pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // 0: Black
    (128, 0, 0),     // 1: Red
    (0, 128, 0),     // 2: Green
    (128, 128, 0),   // 3: Yellow
    (0, 0, 128),     // 4: Blue
    (128, 0, 128),   // 5: Magenta
    (0, 128, 128),   // 6: Cyan
    (192, 192, 192), // 7: White
    (128, 128, 128), // 8: Bright Black
    (255, 0, 0),     // 9: Bright Red
    (0, 255, 0),     // 10: Bright Green
    (255, 255, 0),   // 11: Bright Yellow
    (0, 0, 255),     // 12: Bright Blue
    (255, 0, 255),   // 13: Bright Magenta
    (0, 255, 255),   // 14: Bright Cyan
    (255, 255, 255), // 15: Bright White
];

/// Convert an ANSI-256 palette index to RGB values.
#[must_use]
pub fn ansi256_to_rgb(idx: u8) -> (u8, u8, u8) {
    match idx {
        0..=15 => ANSI16_RGB[idx as usize],

        // 6×6×6 color cube: 0, 95, 135, 175, 215, 255
        16..=231 => {
            let idx = idx - 16;
            let to_value = |i: u8| -> u8 { if i == 0 { 0 } else { 55 + 40 * i } };
            (to_value(idx / 36), to_value((idx % 36) / 6), to_value(idx % 6))
        }

        232..=255 => {
            let v = 8 + 10 * (idx - 232);
            (v, v, v)
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_six_digits() {
        assert_eq!(Color::hex("#FFD700"), Some(Color::Rgb(255, 215, 0)));
    }

    #[test]
    fn hex_without_hash() {
        assert_eq!(Color::hex("00ff80"), Some(Color::Rgb(0, 255, 128)));
    }

    #[test]
    fn hex_three_digits_expand() {
        assert_eq!(Color::hex("#f80"), Some(Color::Rgb(0xff, 0x88, 0x00)));
    }

    #[test]
    fn hex_invalid_digits() {
        assert_eq!(Color::hex("#GGGGGG"), None);
    }

    #[test]
    fn hex_wrong_length() {
        assert_eq!(Color::hex("#ffff"), None);
        assert_eq!(Color::hex(""), None);
        assert_eq!(Color::hex("#"), None);
    }

    #[test]
    fn hex_non_ascii_does_not_panic() {
        assert_eq!(Color::hex("#ÿÿÿ"), None);
    }

    // ── Names ────────────────────────────────────────────────────────

    #[test]
    fn named_basic() {
        assert_eq!(Color::named("red"), Some(Color::RED));
        assert_eq!(Color::named("gray"), Some(Color::Ansi256(8)));
    }

    #[test]
    fn named_is_forgiving_about_spelling() {
        assert_eq!(Color::named("Light Blue"), Some(Color::LIGHT_BLUE));
        assert_eq!(Color::named("LIGHT_BLUE"), Some(Color::LIGHT_BLUE));
        assert_eq!(Color::named("bright-blue"), Some(Color::LIGHT_BLUE));
    }

    #[test]
    fn named_unknown() {
        assert_eq!(Color::named("chartreuse"), None);
    }

    #[test]
    fn every_table_entry_resolves_to_itself() {
        for &(name, color) in NAMED_COLORS {
            assert_eq!(Color::named(name), Some(color), "{name}");
        }
    }

    // ── FromStr ──────────────────────────────────────────────────────

    #[test]
    fn from_str_name_and_hex() {
        assert_eq!("cyan".parse::<Color>(), Ok(Color::CYAN));
        assert_eq!("#010203".parse::<Color>(), Ok(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn from_str_bad_hex_is_invalid_hex() {
        assert_eq!(
            "#GGGGGG".parse::<Color>(),
            Err(ParseError::InvalidHex("#GGGGGG".into()))
        );
    }

    #[test]
    fn from_str_unknown_name() {
        assert_eq!(
            "mauve".parse::<Color>(),
            Err(ParseError::UnknownColor("mauve".into()))
        );
    }

    // ── Palette ──────────────────────────────────────────────────────

    #[test]
    fn palette_standard_and_cube_and_gray() {
        assert_eq!(ansi256_to_rgb(9), (255, 0, 0));
        assert_eq!(ansi256_to_rgb(16), (0, 0, 0));
        assert_eq!(ansi256_to_rgb(231), (255, 255, 255));
        assert_eq!(ansi256_to_rgb(232), (8, 8, 8));
        assert_eq!(ansi256_to_rgb(255), (238, 238, 238));
    }

    #[test]
    fn to_rgb_default_is_none() {
        assert_eq!(Color::Default.to_rgb(), None);
        assert_eq!(Color::Rgb(1, 2, 3).to_rgb(), Some((1, 2, 3)));
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(a.mix(b, 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(a.mix(b, 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn mix_with_default_keeps_self() {
        assert_eq!(Color::RED.mix(Color::Default, 0.5), Color::RED);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Color::Rgb(255, 0, 16)), "#ff0010");
        assert_eq!(format!("{}", Color::Ansi256(3)), "ansi(3)");
        assert_eq!(format!("{}", Color::Default), "default");
    }
}
