//! Console front end for the stockroom book stock manager.
//!
//! The binary wires these pieces together:
//!
//! - [`AppConfig`] picks the database file and table.
//! - [`Dispatcher`] turns an [`Action`] into a collected record and one
//!   persistence call, reporting the [`Outcome`].
//! - [`run_menu`] drives the numbered main menu through a
//!   [`ConsolePrompter`] and a [`ConsolePresenter`].

mod config;
mod console;
mod dispatch;
mod menu;
mod presenter;

pub use config::{AppConfig, ConfigError, DEFAULT_DATABASE, Result};
pub use console::ConsolePrompter;
pub use dispatch::{Action, DispatchError, Dispatcher, Entity, Halt, Outcome};
pub use menu::{MenuError, MenuOption, parse_menu_option, run_menu};
pub use presenter::{ConsolePresenter, render_grid};
