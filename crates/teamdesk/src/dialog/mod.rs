//! Dialog windows and their lifecycle.
//!
//! The [`DialogCoordinator`] opens windows by [`DialogKind`], tracks them,
//! and closes them either directly or when a close request for their kind
//! arrives on the bus:
//!
//! ```ignore
//! use teamdesk::dialog::{DialogKind, WindowModality};
//!
//! coordinator.open(DialogKind::Settings, WindowModality::NonModal, |result| {
//!     if result.is_accepted() {
//!         reload_settings();
//!     }
//! })?;
//!
//! // Later, from the settings content's Cancel button:
//! context.request_close(true);
//! ```

mod command;
mod coordinator;
mod factory;
mod kind;
mod result;

pub use command::{CloseDialogCommand, Command, OpenDialogCommand, RequestCloseCommand};
pub use coordinator::{DialogCoordinator, OpenOutcome, ResultCallback, WindowId};
pub use factory::{
    DialogContent, DialogContext, DialogFactory, DialogParts, DialogWindow, FactoryRegistry,
};
pub use kind::{DialogKind, WindowModality};
pub use result::DialogResult;
