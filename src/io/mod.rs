pub mod csv;
pub mod display;
pub mod tuning;

pub use display::{display_rows, preset_label, render_table, DisplayRow};
pub use tuning::{apply_text, format_value, Tunable, TuneError};
