//! Schema-driven form state: controls, live values, completion progress and
//! required-field validation.

pub mod controls;
pub mod progress;
pub mod renderer;
pub mod value;

pub use controls::{Control, InputType, Widget};
pub use progress::compute_progress;
pub use renderer::{FormRenderer, ValidationError, SAVE_LABEL, SUBMIT_LABEL};
pub use value::{FieldValue, FieldValues};
