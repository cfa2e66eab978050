//! **bento** -- Elm-architecture TUI components for [`ratatui`].
//!
//! Umbrella crate: depend on this one and get the runtime and the widgets.
//!
//! ```toml
//! [dependencies]
//! bento = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * Everything public in [`bento_core`] sits at the crate root ([`Model`],
//!   [`Component`], [`Command`], [`Subscription`], [`Program`], [`run`],
//!   [`run_with`], ...).
//! * [`widgets`] re-exports [`bento_widgets`]: the data table, the input
//!   field and their helpers.
//! * [`ratatui`], [`crossterm`] and [`tokio`] are re-exported so applications
//!   need not depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use bento::widgets::data_table::{Column, DataTable, TableRow};
//! use bento::{Command, Component, Model};
//! use ratatui::Frame;
//!
//! #[derive(Clone)]
//! struct User { id: u32, name: String }
//!
//! impl TableRow for User {
//!     type Id = u32;
//!     fn id(&self) -> u32 { self.id }
//! }
//!
//! struct App { users: DataTable<User> }
//!
//! impl Model for App {
//!     type Message = bento::widgets::data_table::Message<User>;
//!     type Flags = Vec<User>;
//!
//!     fn init(users: Vec<User>) -> (Self, Command<Self::Message>) {
//!         let table = DataTable::new(vec![
//!             Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable(),
//!         ])
//!         .with_rows(users);
//!         (App { users: table }, Command::none())
//!     }
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         self.users.update(msg)
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.users.view(frame, frame.area());
//!     }
//! }
//! ```

pub use bento_core::*;
pub mod widgets {
    pub use bento_widgets::*;
}

// Re-exported so applications can use one dependency.
pub use crossterm;
pub use ratatui;
pub use tokio;
