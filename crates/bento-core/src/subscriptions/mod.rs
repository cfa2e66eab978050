//! Built-in subscriptions.
//!
//! - [`terminal_events`]: keyboard, mouse, resize and paste input.
//! - [`every`]: a repeating timer, used by spinners.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
