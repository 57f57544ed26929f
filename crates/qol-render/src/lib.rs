// SPDX-License-Identifier: MIT
//
// qol-render — the formatting layer of the qol presentation toolkit.
//
// Everything here turns data into styled text using the codec and width
// measurer from qol-term: bordered tables, status messages, block-letter
// banners and boxes, bar charts, color palettes and a couple of cosmetic
// animations. Most functions are pure and return a `String`; the few that
// print go through qol-term's line renderer so color is dropped when the
// output is not a terminal.

pub mod art;
pub mod effects;
pub mod graph;
pub mod message;
pub mod palette;
pub mod table;

pub use art::{BoxOptions, banner, boxed, separator};
pub use graph::{BarChartOptions, bar_chart};
pub use message::{MessageKind, MessageStyle, Messenger, MessengerConfig};
pub use table::{BorderStyle, Column, Overflow, Table, TableOptions, render_table};
