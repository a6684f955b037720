//! Command adapters for binding buttons and menu items to dialog operations.
//!
//! A view binds a [`Command`] instead of calling the coordinator itself. All
//! three commands are always executable.

use std::sync::Arc;

use teamdesk_core::logging::targets;

use super::coordinator::DialogCoordinator;
use super::kind::{DialogKind, WindowModality};
use crate::message::{AppBus, request_close};

/// A bindable user command.
pub trait Command: Send + Sync {
    /// Check whether the command can run now.
    fn can_execute(&self) -> bool {
        true
    }

    /// Run the command.
    fn execute(&self);
}

/// Opens a dialog of a fixed kind.
#[derive(Debug, Clone)]
pub struct OpenDialogCommand {
    coordinator: DialogCoordinator,
    kind: DialogKind,
    modality: WindowModality,
}

impl OpenDialogCommand {
    /// Open `kind` non-modally.
    pub fn new(coordinator: DialogCoordinator, kind: DialogKind) -> Self {
        Self {
            coordinator,
            kind,
            modality: WindowModality::NonModal,
        }
    }

    /// Set the modality.
    pub fn with_modality(mut self, modality: WindowModality) -> Self {
        self.modality = modality;
        self
    }

    /// The kind this command opens.
    pub fn kind(&self) -> DialogKind {
        self.kind
    }
}

impl Command for OpenDialogCommand {
    fn execute(&self) {
        if let Err(err) = self.coordinator.open(self.kind, self.modality, |_| {}) {
            tracing::warn!(target: targets::DIALOG, kind = %self.kind, %err, "open command failed");
        }
    }
}

/// Closes the open dialog of a fixed kind as rejected.
#[derive(Debug, Clone)]
pub struct CloseDialogCommand {
    coordinator: DialogCoordinator,
    kind: DialogKind,
}

impl CloseDialogCommand {
    pub fn new(coordinator: DialogCoordinator, kind: DialogKind) -> Self {
        Self { coordinator, kind }
    }
}

impl Command for CloseDialogCommand {
    fn execute(&self) {
        self.coordinator.close_kind(self.kind);
    }
}

/// Publishes a close request, for content bound to its own OK and Cancel
/// buttons.
#[derive(Debug, Clone)]
pub struct RequestCloseCommand {
    bus: Arc<AppBus>,
    kind: DialogKind,
    is_canceled: bool,
}

impl RequestCloseCommand {
    /// A command that closes `kind` as accepted.
    pub fn accept(bus: Arc<AppBus>, kind: DialogKind) -> Self {
        Self {
            bus,
            kind,
            is_canceled: false,
        }
    }

    /// A command that closes `kind` as canceled.
    pub fn cancel(bus: Arc<AppBus>, kind: DialogKind) -> Self {
        Self {
            bus,
            kind,
            is_canceled: true,
        }
    }
}

impl Command for RequestCloseCommand {
    fn execute(&self) {
        let delivery = request_close(&self.bus, self.kind, self.is_canceled);
        if delivery.is_unobserved() {
            tracing::debug!(target: targets::DIALOG, kind = %self.kind, "close request had no open window");
        }
    }
}
