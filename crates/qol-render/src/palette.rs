// SPDX-License-Identifier: MIT
//
// Named color palettes for gradients and charts.

use qol_term::Color;
use qol_term::style::gradient;

pub static RAINBOW: [Color; 6] = [
    Color::RED,
    Color::YELLOW,
    Color::GREEN,
    Color::CYAN,
    Color::BLUE,
    Color::MAGENTA,
];

/// Soft pink through purple, as true colors.
pub static PASTEL: [Color; 6] = [
    Color::Rgb(255, 179, 186),
    Color::Rgb(255, 223, 186),
    Color::Rgb(255, 255, 186),
    Color::Rgb(186, 255, 201),
    Color::Rgb(186, 225, 255),
    Color::Rgb(225, 186, 255),
];

/// Look up a palette by name.
#[must_use]
pub fn named(name: &str) -> Option<&'static [Color]> {
    match name.trim().to_ascii_lowercase().as_str() {
        "rainbow" => Some(&RAINBOW[..]),
        "pastel" => Some(&PASTEL[..]),
        _ => None,
    }
}

#[must_use]
pub fn rainbow(text: &str) -> String {
    gradient(text, &RAINBOW)
}

#[must_use]
pub fn pastel(text: &str) -> String {
    gradient(text, &PASTEL)
}
