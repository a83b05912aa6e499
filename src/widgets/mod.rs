// Reusable UI widgets

pub mod dialog;
pub mod spinner;
pub mod text_input;

pub use dialog::{Dialog, DialogVariant};
pub use spinner::spinner_frame;
pub use text_input::{TextInputWidget, TextInputWidgetExt};
