//! Widgets for the **bento** TUI framework.
//!
//! Every widget implements [`bento_core::Component`], so it can be embedded
//! in any [`bento_core::Model`] and placed anywhere in a [`ratatui`] layout.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`data_table`] | Sortable table with multi-row selection, loading and empty states |
//! | [`input_field`] | Labeled text input with helper/error footer, clear and password reveal |
//! | [`spinner`] | Animated loading indicator |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chrome`] | Focus-aware bordered blocks |
//! | [`focus`] | [`FocusRing`](focus::FocusRing) for Tab-order focus with skipped slots |
//! | [`key`] | Key bindings and one-line help rendering |

pub mod chrome;
pub mod data_table;
pub mod focus;
pub mod input_field;
pub mod key;
pub mod spinner;
