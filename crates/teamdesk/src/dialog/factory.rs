//! The seam between the coordinator and concrete dialog windows.
//!
//! The coordinator never knows what a window looks like. A [`DialogFactory`]
//! builds a [`DialogWindow`] and its [`DialogContent`] together for a kind,
//! and the coordinator drives both through these traits.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use teamdesk_core::Delivery;

use super::kind::DialogKind;
use super::result::DialogResult;
use crate::message::{AppBus, request_close};
use crate::window::GestureSurface;

/// A platform window hosting one dialog.
///
/// Methods take `&self`; implementations use interior mutability and hop to
/// the UI thread where the platform requires it.
pub trait DialogWindow: GestureSurface + Send + Sync {
    /// Show the window and return immediately.
    fn show(&self);

    /// Show the window and block until it is closed.
    fn show_modal(&self);

    /// Close the native window.
    fn close(&self);

    /// Bring the window to the front and focus it.
    fn raise(&self);
}

/// The view-model side of a dialog.
pub trait DialogContent: Send {
    /// Release whatever the content holds. Called at most once, before the
    /// window closes.
    fn teardown(&mut self, result: DialogResult) {
        let _ = result;
    }
}

/// What a factory builds for one dialog.
pub struct DialogParts {
    pub window: Arc<dyn DialogWindow>,
    pub content: Box<dyn DialogContent>,
}

impl DialogParts {
    /// Pair a window with its content.
    pub fn new(window: Arc<dyn DialogWindow>, content: Box<dyn DialogContent>) -> Self {
        Self { window, content }
    }
}

impl fmt::Debug for DialogParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogParts").finish_non_exhaustive()
    }
}

/// Passed to a factory while it builds a dialog.
///
/// Content that wants to close its own window keeps the bus and publishes a
/// close request; it never needs a handle to the coordinator.
#[derive(Debug, Clone)]
pub struct DialogContext {
    kind: DialogKind,
    bus: Arc<AppBus>,
}

impl DialogContext {
    pub(crate) fn new(kind: DialogKind, bus: Arc<AppBus>) -> Self {
        Self { kind, bus }
    }

    /// The kind being built.
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// The application bus.
    pub fn bus(&self) -> &Arc<AppBus> {
        &self.bus
    }

    /// Ask for this dialog to be closed.
    pub fn request_close(&self, is_canceled: bool) -> Delivery {
        request_close(&self.bus, self.kind, is_canceled)
    }
}

/// Builds dialogs by kind.
pub trait DialogFactory: Send + Sync {
    /// Build the window and content for `kind`, or `None` when the kind is
    /// not supported.
    fn create(&self, kind: DialogKind, context: &DialogContext) -> Option<DialogParts>;
}

type BuildFn = Box<dyn Fn(&DialogContext) -> DialogParts + Send + Sync>;

/// A [`DialogFactory`] backed by a table of closures.
///
/// ```ignore
/// let mut factories = FactoryRegistry::new();
/// factories.register(DialogKind::Settings, |ctx| {
///     DialogParts::new(SettingsWindow::new(), Box::new(SettingsModel::new(ctx.clone())))
/// });
/// ```
#[derive(Default)]
pub struct FactoryRegistry {
    builders: HashMap<DialogKind, BuildFn>,
}

impl FactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the builder for `kind`, replacing any previous one.
    pub fn register<F>(&mut self, kind: DialogKind, build: F) -> &mut Self
    where
        F: Fn(&DialogContext) -> DialogParts + Send + Sync + 'static,
    {
        self.builders.insert(kind, Box::new(build));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, kind: DialogKind, build: F) -> Self
    where
        F: Fn(&DialogContext) -> DialogParts + Send + Sync + 'static,
    {
        self.register(kind, build);
        self
    }

    /// Check whether `kind` has a builder.
    pub fn supports(&self, kind: DialogKind) -> bool {
        self.builders.contains_key(&kind)
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.builders.keys().copied().collect();
        kinds.sort_unstable();
        f.debug_struct("FactoryRegistry").field("kinds", &kinds).finish()
    }
}

impl DialogFactory for FactoryRegistry {
    fn create(&self, kind: DialogKind, context: &DialogContext) -> Option<DialogParts> {
        self.builders.get(&kind).map(|build| build(context))
    }
}

static_assertions::assert_impl_all!(FactoryRegistry: Send, Sync);
static_assertions::assert_impl_all!(DialogContext: Send, Sync);
