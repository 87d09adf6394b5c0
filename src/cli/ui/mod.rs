pub mod formatting;
pub mod progress;
pub mod views;

pub use views::{record_lines, FieldRow, FormView};
