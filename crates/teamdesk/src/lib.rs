//! TeamDesk windowing and communication core.
//!
//! TeamDesk is a team and task planner. This crate holds the parts of it that
//! every window depends on:
//!
//! - [`window`]: borderless windows that drag and resize themselves
//! - [`dialog`]: opening, tracking and closing dialog windows by kind
//! - [`message`]: the application messages carried on the bus from
//!   `teamdesk-core`
//! - [`Shell`]: owns the bus and the coordinator for the life of the app
//!
//! # Example
//!
//! ```no_run
//! use teamdesk::prelude::*;
//!
//! fn run(factories: FactoryRegistry) -> Result<(), Box<dyn std::error::Error>> {
//!     let shell = Shell::start(ShellConfig::default(), factories);
//!
//!     shell.coordinator().open(DialogKind::Settings, WindowModality::NonModal, |result| {
//!         println!("settings closed: {result:?}");
//!     })?;
//!
//!     // Anywhere, without a handle to the window:
//!     request_close(shell.bus(), DialogKind::Settings, false);
//!
//!     shell.shutdown();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dialog;
mod error;
pub mod message;
pub mod prelude;
mod shell;
pub mod window;

pub use error::{ConfigError, DialogError, Result};
pub use shell::Shell;
