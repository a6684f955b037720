//! Application messages carried on the TeamDesk bus.
//!
//! Every message the application publishes is a variant of [`AppMessage`];
//! subscribers register for a [`MessageKind`].

use teamdesk_core::{BusMessage, Delivery, MessageBus};

use crate::dialog::{DialogKind, DialogResult};

/// Ask the open window of `dialog_kind` to close itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloseDialogRequest {
    /// The window to close.
    pub dialog_kind: DialogKind,
    /// `true` when the user backed out; the dialog then ends as rejected.
    pub is_canceled: bool,
}

impl CloseDialogRequest {
    /// Create a close request.
    pub fn new(dialog_kind: DialogKind, is_canceled: bool) -> Self {
        Self {
            dialog_kind,
            is_canceled,
        }
    }
}

/// Messages published on the application bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// Close the open window of a kind.
    CloseDialog(CloseDialogRequest),
    /// A dialog window was shown.
    DialogOpened { kind: DialogKind },
    /// A dialog window was closed and removed.
    DialogClosed { kind: DialogKind, result: DialogResult },
}

/// Subscription key for [`AppMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    CloseDialog,
    DialogOpened,
    DialogClosed,
}

impl BusMessage for AppMessage {
    type Kind = MessageKind;

    fn kind(&self) -> MessageKind {
        match self {
            AppMessage::CloseDialog(_) => MessageKind::CloseDialog,
            AppMessage::DialogOpened { .. } => MessageKind::DialogOpened,
            AppMessage::DialogClosed { .. } => MessageKind::DialogClosed,
        }
    }
}

impl From<CloseDialogRequest> for AppMessage {
    fn from(request: CloseDialogRequest) -> Self {
        AppMessage::CloseDialog(request)
    }
}

/// The application bus.
pub type AppBus = MessageBus<AppMessage>;

/// Publish a close request for `kind`.
///
/// If no window of that kind is open the request is simply not observed.
pub fn request_close(bus: &AppBus, kind: DialogKind, is_canceled: bool) -> Delivery {
    bus.publish(CloseDialogRequest::new(kind, is_canceled).into())
}
