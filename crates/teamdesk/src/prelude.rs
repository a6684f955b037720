//! Prelude module for TeamDesk.
//!
//! ```ignore
//! use teamdesk::prelude::*;
//! ```

// ============================================================================
// Shell and Configuration
// ============================================================================

pub use crate::Shell;
pub use crate::config::{DialogConfig, DuplicatePolicy, ShellConfig};

// ============================================================================
// Messaging
// ============================================================================

pub use crate::message::{AppBus, AppMessage, CloseDialogRequest, MessageKind, request_close};
pub use teamdesk_core::{Delivery, HandlerFault, HandlerResult, Subscription, SubscriptionId};

// ============================================================================
// Dialogs
// ============================================================================

pub use crate::dialog::{
    Command, DialogContent, DialogContext, DialogCoordinator, DialogFactory, DialogKind,
    DialogParts, DialogResult, DialogWindow, FactoryRegistry, OpenOutcome, WindowId,
    WindowModality,
};

// ============================================================================
// Windows
// ============================================================================

pub use crate::window::{
    CursorShape, GestureConfig, GestureSurface, PointerButton, PointerInput, Point, WindowBounds,
    WindowGesture,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{ConfigError, DialogError};
