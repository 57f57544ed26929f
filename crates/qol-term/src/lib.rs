// SPDX-License-Identifier: MIT
//
// qol-term — the terminal layer of the qol presentation toolkit.
//
// Everything that touches raw escape sequences or the terminal itself
// lives here: the escape codec (colors, attributes, cursor control), the
// width measurer that sees through embedded styles, the terminal size and
// capability queries, the in-place line renderer, and the two animated
// components built on it (progress bar and spinner).
//
// No rendering framework sits underneath. Output is a plain byte stream
// of text and control sequences written to any `impl Write`, which keeps
// every component testable against a `Vec<u8>`.
//
// Nothing in this crate is allowed to take the host program down over a
// cosmetic failure: malformed colors fall back to "no color", unknown
// terminal sizes fall back to 80×24, and scoped animations always restore
// the cursor on the way out.

pub mod ansi;
pub mod color;
pub mod error;
pub mod line;
pub mod progress;
pub mod spinner;
pub mod style;
pub mod terminal;
pub mod width;

pub use color::Color;
pub use error::ParseError;
pub use line::{Anchor, LineRenderer};
pub use progress::{ProgressBar, ProgressConfig, ProgressState, run_progress, with_progress};
pub use spinner::{BackgroundSpinner, Spinner, SpinnerConfig, countdown, run_spinner, with_spinner};
pub use style::{Attr, Style};
pub use terminal::{Capabilities, Size};
pub use width::{Align, pad_to_width, strip_style, truncate_to_width, visible_width, wrap_to_width};
