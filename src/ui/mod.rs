//! Presentation layer
//!
//! Consumes finished turn outcomes; never touches agent state.

pub mod console;
pub mod spinner;

pub use console::Console;
pub use spinner::Spinner;
