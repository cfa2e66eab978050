//! Core runtime for **bento**.
//!
//! `bento-core` runs applications written in the Elm architecture on top of
//! [`ratatui`]: state lives in a [`Model`], changes only through
//! [`Model::update`], and is drawn by [`Model::view`]. Side effects are
//! described by [`Command`]s and long-lived inputs by [`Subscription`]s.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Application trait (init / update / view / subscriptions) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect returned from `update` |
//! | [`Subscription`] | Terminal input, timers |
//! | [`Program`] | Owns the terminal and runs the loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! State transitions are synchronous: one message is applied completely before
//! the next is read. Tokio is only used to feed messages in.

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{log_to_file, Program, ProgramError, ProgramOptions};
pub use subscription::{Subscription, SubscriptionId};
pub use subscriptions::{every, terminal_events};

/// Run a bento application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run a bento application with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
