// SPDX-License-Identifier: MIT
//
// Parse errors for the small vocabulary of named things callers can spell
// out as strings: colors, alignments, border styles, message kinds.
//
// Rendering itself never fails for cosmetic reasons. These errors only
// surface through `FromStr`; the convenience paths (`ansi::fg_hex`,
// `Style::fg_name`) swallow them and apply no color instead.

use thiserror::Error;

/// A name or literal that could not be turned into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a known color name (and not a hex literal).
    #[error("unknown color name `{0}`")]
    UnknownColor(String),

    /// Looked like a hex color but did not parse as `#RGB` or `#RRGGBB`.
    #[error("invalid hex color `{0}` (expected #RGB or #RRGGBB)")]
    InvalidHex(String),

    /// Not one of `left`, `center`, `right`.
    #[error("unknown alignment `{0}` (expected left, center or right)")]
    UnknownAlign(String),

    /// Not a known table border style.
    #[error("unknown border style `{0}` (expected rounded, double, simple or plain)")]
    UnknownBorder(String),

    /// Not a known message kind.
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        assert_eq!(
            ParseError::UnknownColor("teal-ish".into()).to_string(),
            "unknown color name `teal-ish`"
        );
        assert!(ParseError::InvalidHex("#GG".into()).to_string().contains("#GG"));
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            ParseError::UnknownAlign("up".into()),
            ParseError::UnknownAlign("up".into())
        );
        assert_ne!(
            ParseError::UnknownAlign("up".into()),
            ParseError::UnknownBorder("up".into())
        );
    }
}
