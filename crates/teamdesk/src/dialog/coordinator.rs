//! Dialog lifecycle coordinator.
//!
//! [`DialogCoordinator`] creates dialog windows through a [`DialogFactory`],
//! keeps track of which are open, and closes them again. A window can be
//! closed two ways:
//!
//! - directly, with [`DialogCoordinator::close`]
//! - by anyone publishing [`AppMessage::CloseDialog`] for its kind, usually
//!   the window's own content
//!
//! Each open window holds a close-request subscription that reaches the
//! coordinator through a weak reference, so content never holds the
//! coordinator and dropping the coordinator is never blocked by its windows.
//!
//! The registry lock is never held while calling window, content, factory,
//! or bus code. All of those may call back into the coordinator.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use teamdesk_core::logging::{span_names, targets};
use teamdesk_core::{PerfSpan, SubscriptionId};

use super::factory::{DialogContent, DialogContext, DialogFactory, DialogWindow};
use super::kind::{DialogKind, WindowModality};
use super::result::DialogResult;
use crate::config::{DialogConfig, DuplicatePolicy};
use crate::error::{DialogError, Result};
use crate::message::{AppBus, AppMessage, MessageKind};
use crate::window::{GestureConfig, GestureMode, PointerInput, WindowGesture};

new_key_type! {
    /// Identifies an open dialog window.
    ///
    /// IDs are never reused, so an ID kept after its window closed is
    /// simply stale.
    pub struct WindowId;
}

/// Callback receiving the result when a dialog closes.
pub type ResultCallback = Box<dyn FnOnce(DialogResult) + Send>;

/// What [`DialogCoordinator::open`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new non-modal window is showing.
    Opened(WindowId),
    /// A window of this kind was already open and has been raised.
    Raised(WindowId),
    /// The dialog already closed with this result: a modal run finished, or
    /// the window was closed before it could be shown.
    Completed(DialogResult),
}

impl OpenOutcome {
    /// The window ID, unless the dialog already completed.
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            OpenOutcome::Opened(id) | OpenOutcome::Raised(id) => Some(*id),
            OpenOutcome::Completed(_) => None,
        }
    }
}

struct DialogEntry {
    kind: DialogKind,
    window: Arc<dyn DialogWindow>,
    content: Box<dyn DialogContent>,
    gesture: Arc<Mutex<WindowGesture>>,
    subscription: Option<SubscriptionId>,
    on_result: Option<ResultCallback>,
}

#[derive(Default)]
struct Registry {
    windows: SlotMap<WindowId, DialogEntry>,
    by_kind: HashMap<DialogKind, WindowId>,
}

impl Registry {
    fn remove(&mut self, id: WindowId) -> Option<DialogEntry> {
        let entry = self.windows.remove(id)?;
        if self.by_kind.get(&entry.kind) == Some(&id) {
            self.by_kind.remove(&entry.kind);
        }
        Some(entry)
    }
}

struct Inner {
    bus: Arc<AppBus>,
    factory: Box<dyn DialogFactory>,
    config: DialogConfig,
    gesture: GestureConfig,
    registry: Mutex<Registry>,
    shut_down: AtomicBool,
}

impl Inner {
    fn close_entry(&self, id: WindowId, result: DialogResult, dispose: bool) -> bool {
        let Some(mut entry) = self.registry.lock().remove(id) else {
            tracing::trace!(target: targets::DIALOG, ?id, "close of unknown window ignored");
            return false;
        };

        if let Some(subscription) = entry.subscription.take() {
            self.bus.unsubscribe_id(MessageKind::CloseDialog, subscription);
        }
        if dispose {
            // The window must close even when the content misbehaves.
            let content = &mut entry.content;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| content.teardown(result))) {
                tracing::warn!(
                    target: targets::DIALOG,
                    kind = %entry.kind,
                    panic = panic_message(payload.as_ref()),
                    "dialog content panicked during teardown"
                );
            }
        }
        entry.window.close();

        tracing::debug!(target: targets::DIALOG, kind = %entry.kind, ?result, dispose, "dialog closed");
        self.bus.publish(AppMessage::DialogClosed {
            kind: entry.kind,
            result,
        });
        if let Some(on_result) = entry.on_result.take() {
            on_result(result);
        }
        true
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// Creates, tracks and closes TeamDesk dialog windows.
///
/// Cloning is cheap; clones share the same registry.
#[derive(Clone)]
pub struct DialogCoordinator {
    inner: Arc<Inner>,
}

impl fmt::Debug for DialogCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogCoordinator")
            .field("open", &self.open_kinds())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl DialogCoordinator {
    /// Create a coordinator with default settings.
    pub fn new(bus: Arc<AppBus>, factory: impl DialogFactory + 'static) -> Self {
        Self::with_config(bus, factory, DialogConfig::default(), GestureConfig::default())
    }

    /// Create a coordinator.
    ///
    /// `gesture` configures the gesture machine of every window it opens.
    pub fn with_config(
        bus: Arc<AppBus>,
        factory: impl DialogFactory + 'static,
        config: DialogConfig,
        gesture: GestureConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                bus,
                factory: Box::new(factory),
                config,
                gesture,
                registry: Mutex::new(Registry::default()),
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    /// The bus close requests arrive on.
    pub fn bus(&self) -> &Arc<AppBus> {
        &self.inner.bus
    }

    /// The coordinator settings.
    pub fn config(&self) -> &DialogConfig {
        &self.inner.config
    }

    /// Open a dialog of `kind`.
    ///
    /// A non-modal dialog returns [`OpenOutcome::Opened`] once shown. A modal
    /// dialog blocks until it closes and returns [`OpenOutcome::Completed`];
    /// a modal window closed without a close request counts as rejected.
    /// A dialog closed by a `DialogOpened` listener before it could be shown
    /// is never shown and returns [`OpenOutcome::Completed`] too.
    /// `on_result` runs once, when the dialog closes.
    ///
    /// If a window of `kind` is already open, the duplicate policy decides:
    /// it is raised ([`OpenOutcome::Raised`], `on_result` is dropped unused)
    /// or the call fails with [`DialogError::AlreadyOpen`].
    ///
    /// # Errors
    ///
    /// [`DialogError::UnsupportedKind`] when the factory cannot build `kind`;
    /// nothing is created and the registry is unchanged.
    pub fn open<F>(&self, kind: DialogKind, modality: WindowModality, on_result: F) -> Result<OpenOutcome>
    where
        F: FnOnce(DialogResult) + Send + 'static,
    {
        if self.inner.shut_down.load(Ordering::Acquire) {
            return Err(DialogError::ShutDown);
        }
        if let Some(outcome) = self.handle_duplicate(kind)? {
            return Ok(outcome);
        }

        let context = DialogContext::new(kind, Arc::clone(&self.inner.bus));
        let Some(mut parts) = self.inner.factory.create(kind, &context) else {
            tracing::warn!(target: targets::DIALOG, %kind, "no factory for dialog kind");
            return Err(DialogError::UnsupportedKind(kind));
        };

        let slot: Arc<Mutex<Option<DialogResult>>> = Arc::new(Mutex::new(None));
        let on_result: ResultCallback = {
            let slot = Arc::clone(&slot);
            Box::new(move |result| {
                *slot.lock() = Some(result);
                on_result(result);
            })
        };

        let window = Arc::clone(&parts.window);
        let id = {
            let mut registry = self.inner.registry.lock();
            if registry.by_kind.contains_key(&kind) {
                // Lost a race with another open of the same kind.
                drop(registry);
                parts.content.teardown(DialogResult::Rejected);
                parts.window.close();
                return self
                    .handle_duplicate(kind)?
                    .ok_or(DialogError::AlreadyOpen(kind));
            }
            let id = registry.windows.insert(DialogEntry {
                kind,
                window: parts.window,
                content: parts.content,
                gesture: Arc::new(Mutex::new(WindowGesture::new(self.inner.gesture.clone()))),
                subscription: None,
                on_result: Some(on_result),
            });
            registry.by_kind.insert(kind, id);
            id
        };

        self.subscribe_close_requests(kind, id);
        tracing::debug!(target: targets::DIALOG, %kind, ?id, ?modality, "dialog opened");
        self.inner.bus.publish(AppMessage::DialogOpened { kind });

        // A listener may have closed the window already; never show it then.
        if !self.inner.registry.lock().windows.contains_key(id) {
            tracing::debug!(target: targets::DIALOG, %kind, ?id, "dialog closed before it was shown");
            let result = slot.lock().take().unwrap_or_default();
            return Ok(OpenOutcome::Completed(result));
        }

        if !modality.is_modal() {
            window.show();
            return Ok(OpenOutcome::Opened(id));
        }

        {
            let _span = PerfSpan::new(span_names::MODAL_DIALOG);
            window.show_modal();
        }
        if self.inner.close_entry(id, DialogResult::Rejected, true) {
            tracing::debug!(target: targets::DIALOG, %kind, "modal window closed without a close request");
        }
        let result = slot.lock().take().unwrap_or_default();
        Ok(OpenOutcome::Completed(result))
    }

    /// Open a non-modal dialog without a result callback.
    pub fn show(&self, kind: DialogKind) -> Result<OpenOutcome> {
        self.open(kind, WindowModality::NonModal, |_| {})
    }

    /// Apply the duplicate policy when `kind` is already open.
    fn handle_duplicate(&self, kind: DialogKind) -> Result<Option<OpenOutcome>> {
        let existing = {
            let registry = self.inner.registry.lock();
            registry
                .by_kind
                .get(&kind)
                .and_then(|&id| registry.windows.get(id).map(|e| (id, Arc::clone(&e.window))))
        };
        let Some((id, window)) = existing else {
            return Ok(None);
        };

        match self.inner.config.duplicate_policy {
            DuplicatePolicy::Raise => {
                tracing::debug!(target: targets::DIALOG, %kind, ?id, "dialog already open, raising");
                window.raise();
                Ok(Some(OpenOutcome::Raised(id)))
            }
            DuplicatePolicy::Reject => Err(DialogError::AlreadyOpen(kind)),
        }
    }

    fn subscribe_close_requests(&self, kind: DialogKind, id: WindowId) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let subscription = self.inner.bus.subscribe_fn(MessageKind::CloseDialog, move |message| {
            let AppMessage::CloseDialog(request) = message else {
                return Ok(());
            };
            if request.dialog_kind != kind {
                return Ok(());
            }
            if let Some(inner) = weak.upgrade() {
                inner.close_entry(id, DialogResult::from_canceled(request.is_canceled), true);
            }
            Ok(())
        });

        let mut registry = self.inner.registry.lock();
        match registry.windows.get_mut(id) {
            Some(entry) => entry.subscription = Some(subscription),
            None => {
                // Closed before the subscription was recorded.
                drop(registry);
                self.inner.bus.unsubscribe_id(MessageKind::CloseDialog, subscription);
            }
        }
    }

    /// Close a window as rejected.
    ///
    /// With `dispose`, the content's teardown hook runs first. Returns
    /// `false` for an unknown or already-closed window.
    pub fn close(&self, id: WindowId, dispose: bool) -> bool {
        self.inner.close_entry(id, DialogResult::Rejected, dispose)
    }

    /// Close a window with an explicit result, disposing its content.
    pub fn close_with_result(&self, id: WindowId, result: DialogResult) -> bool {
        self.inner.close_entry(id, result, true)
    }

    /// Close the open window of `kind` as rejected.
    pub fn close_kind(&self, kind: DialogKind) -> bool {
        match self.window_for(kind) {
            Some(id) => self.close(id, true),
            None => false,
        }
    }

    /// Close every open window as rejected and return how many closed.
    pub fn close_all(&self) -> usize {
        let ids: Vec<WindowId> = self.inner.registry.lock().windows.keys().collect();
        ids.into_iter().filter(|&id| self.close(id, true)).count()
    }

    /// Refuse further opens and close every window.
    pub fn shutdown(&self) -> usize {
        if self.inner.shut_down.swap(true, Ordering::AcqRel) {
            return 0;
        }
        self.close_all()
    }

    /// Check whether a window of `kind` is open.
    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.inner.registry.lock().by_kind.contains_key(&kind)
    }

    /// The open window of `kind`.
    pub fn window_for(&self, kind: DialogKind) -> Option<WindowId> {
        self.inner.registry.lock().by_kind.get(&kind).copied()
    }

    /// The kind of an open window.
    pub fn kind_of(&self, id: WindowId) -> Option<DialogKind> {
        self.inner.registry.lock().windows.get(id).map(|e| e.kind)
    }

    /// The platform window of an open dialog.
    pub fn window(&self, id: WindowId) -> Option<Arc<dyn DialogWindow>> {
        self.inner
            .registry
            .lock()
            .windows
            .get(id)
            .map(|e| Arc::clone(&e.window))
    }

    /// Kinds with an open window, sorted.
    pub fn open_kinds(&self) -> Vec<DialogKind> {
        let mut kinds: Vec<_> = self.inner.registry.lock().by_kind.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Number of open windows.
    pub fn len(&self) -> usize {
        self.inner.registry.lock().windows.len()
    }

    /// True when no window is open.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feed a pointer event to the gesture machine of window `id`.
    ///
    /// Returns `None` for an unknown window.
    pub fn dispatch_pointer(&self, id: WindowId, input: PointerInput) -> Option<GestureMode> {
        let (window, gesture) = {
            let registry = self.inner.registry.lock();
            let entry = registry.windows.get(id)?;
            (Arc::clone(&entry.window), Arc::clone(&entry.gesture))
        };
        let mode = gesture.lock().handle(window.as_ref(), input);
        Some(mode)
    }
}

static_assertions::assert_impl_all!(DialogCoordinator: Send, Sync);
static_assertions::assert_impl_all!(WindowId: Send, Sync, Copy);
