pub mod pointer;
pub mod theme;

pub use pointer::{wire_input_handlers, InputWiring};
pub use theme::wire_theme_toggle;
