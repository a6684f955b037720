//! Typed publish/subscribe message bus.
//!
//! The bus routes messages from any producer to every handler currently
//! registered for the message's kind. Messages are a sum type implementing
//! [`BusMessage`]; the kind tag returned by [`BusMessage::kind`] is the
//! routing key.
//!
//! # Key Types
//!
//! - [`MessageBus<M>`] - The registry and dispatcher
//! - [`Handler<M>`] - A shared handler callback; its `Arc` identity is what
//!   [`MessageBus::unsubscribe`] compares
//! - [`SubscriptionId`] - Unique identifier returned by every subscription
//! - [`Subscription`] - RAII guard that unsubscribes when dropped
//! - [`Delivery`] - What happened during one `publish`
//!
//! # Dispatch Protocol
//!
//! `publish` copies the handler sequence for the message kind while holding
//! the registry lock, releases the lock, and then invokes the copy in
//! registration order. Consequently:
//!
//! - a handler may subscribe, unsubscribe, or publish from inside its own
//!   invocation without deadlocking;
//! - handlers added during a publish do not receive the in-flight message;
//! - handlers removed during a publish still receive it.
//!
//! # Fault Policy
//!
//! Handler errors and panics are isolated. Each one is reported to the bus's
//! [`ErrorSink`] and the remaining handlers are still invoked. The publisher
//! learns about failures through [`Delivery::failed`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use teamdesk_core::{BusMessage, MessageBus};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Ping }
//!
//! #[derive(Debug)]
//! enum Msg { Ping(u32) }
//!
//! impl BusMessage for Msg {
//!     type Kind = Kind;
//!     fn kind(&self) -> Kind { Kind::Ping }
//! }
//!
//! let bus = Arc::new(MessageBus::<Msg>::new());
//! bus.subscribe_fn(Kind::Ping, |msg| {
//!     let Msg::Ping(n) = msg;
//!     println!("ping {n}");
//!     Ok(())
//! });
//!
//! let delivery = bus.publish(Msg::Ping(1));
//! assert_eq!(delivery.delivered, 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::{HandlerFault, HandlerResult};
use crate::logging::targets;
use crate::sink::{ErrorSink, FaultReport, TracingSink};

/// A message that can travel on a [`MessageBus`].
///
/// The associated `Kind` is a small copyable tag, normally a fieldless enum
/// mirroring the message enum's variants.
pub trait BusMessage: Send + Sync + 'static {
    /// The routing key type.
    type Kind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// The routing key of this message.
    fn kind(&self) -> Self::Kind;
}

/// A shared handler callback.
///
/// Handler identity is the identity of the `Arc`: cloning a `Handler` and
/// passing the clone to [`MessageBus::unsubscribe`] removes the original
/// registration.
pub type Handler<M> = Arc<dyn Fn(&M) -> HandlerResult + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<M, F>(f: F) -> Handler<M>
where
    M: BusMessage,
    F: Fn(&M) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A unique identifier for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw u64 value of this subscription ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Build an ID from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Outcome of a single [`MessageBus::publish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Handlers that ran to completion.
    pub delivered: usize,
    /// Handlers that returned an error or panicked.
    pub failed: usize,
}

impl Delivery {
    /// Total number of handlers invoked.
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed
    }

    /// True when nobody was subscribed to the message kind.
    pub fn is_unobserved(&self) -> bool {
        self.invoked() == 0
    }
}

/// One registration in the sequence for a kind.
struct Registration<M> {
    id: SubscriptionId,
    handler: Handler<M>,
}

impl<M> Clone for Registration<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Compare handlers by the address of their shared allocation.
fn same_handler<M>(a: &Handler<M>, b: &Handler<M>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// A kind-keyed publish/subscribe registry.
///
/// `MessageBus<M>` is `Send + Sync`; share it as `Arc<MessageBus<M>>`. The
/// single internal mutex is held only to mutate the registry or to copy a
/// handler sequence, never while a handler runs.
pub struct MessageBus<M: BusMessage> {
    registry: Mutex<HashMap<M::Kind, Vec<Registration<M>>>>,
    next_id: AtomicU64,
    sink: Arc<dyn ErrorSink>,
}

impl<M: BusMessage> Default for MessageBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: BusMessage> fmt::Debug for MessageBus<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("MessageBus")
            .field("kinds", &registry.len())
            .field(
                "subscriptions",
                &registry.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl<M: BusMessage> MessageBus<M> {
    /// Create an empty bus that logs handler faults.
    pub fn new() -> Self {
        Self::with_error_sink(Arc::new(TracingSink))
    }

    /// Create an empty bus that reports handler faults to `sink`.
    pub fn with_error_sink(sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            sink,
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register `handler` for messages of `kind`.
    ///
    /// Handlers for a kind run in registration order. Registering the same
    /// handler twice makes it run twice per publish.
    pub fn subscribe(&self, kind: M::Kind, handler: Handler<M>) -> SubscriptionId {
        let id = self.next_id();
        self.registry
            .lock()
            .entry(kind)
            .or_default()
            .push(Registration { id, handler });
        tracing::trace!(target: targets::BUS, ?kind, subscription = id.0, "subscribed");
        id
    }

    /// Register a closure for messages of `kind`.
    pub fn subscribe_fn<F>(&self, kind: M::Kind, f: F) -> SubscriptionId
    where
        F: Fn(&M) -> HandlerResult + Send + Sync + 'static,
    {
        self.subscribe(kind, handler(f))
    }

    /// Register a handler whose registration ends when the guard drops.
    pub fn subscribe_scoped(self: &Arc<Self>, kind: M::Kind, handler: Handler<M>) -> Subscription<M> {
        let id = self.subscribe(kind, handler);
        Subscription {
            bus: Arc::downgrade(self),
            kind,
            id: Some(id),
        }
    }

    /// Remove the first registration of `handler` for `kind`.
    ///
    /// Returns `false` when the handler was not registered for that kind.
    pub fn unsubscribe(&self, kind: M::Kind, handler: &Handler<M>) -> bool {
        self.remove_where(kind, |reg| same_handler(&reg.handler, handler))
    }

    /// Remove a registration by its ID.
    pub fn unsubscribe_id(&self, kind: M::Kind, id: SubscriptionId) -> bool {
        self.remove_where(kind, |reg| reg.id == id)
    }

    fn remove_where(&self, kind: M::Kind, matches: impl Fn(&Registration<M>) -> bool) -> bool {
        let mut registry = self.registry.lock();
        let Some(regs) = registry.get_mut(&kind) else {
            return false;
        };
        let Some(pos) = regs.iter().position(matches) else {
            return false;
        };
        let removed = regs.remove(pos);
        if regs.is_empty() {
            registry.remove(&kind);
        }
        drop(registry);

        tracing::trace!(target: targets::BUS, ?kind, subscription = removed.id.0, "unsubscribed");
        true
    }

    /// Number of handlers registered for `kind`.
    pub fn subscriber_count(&self, kind: M::Kind) -> usize {
        self.registry.lock().get(&kind).map_or(0, Vec::len)
    }

    /// True when no handler is registered for any kind.
    pub fn is_empty(&self) -> bool {
        self.registry.lock().is_empty()
    }

    /// Drop every registration.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.registry.lock());
        crate::teamdesk_debug!(kinds = removed.len(), "bus cleared");
    }

    /// Deliver `message` to every handler registered for its kind.
    ///
    /// Publishing to a kind with no handlers is valid and returns an empty
    /// [`Delivery`]. Faulting handlers are reported to the error sink and do
    /// not prevent later handlers from running.
    #[tracing::instrument(skip_all, target = "teamdesk_core::bus", level = "trace")]
    pub fn publish(&self, message: M) -> Delivery {
        let kind = message.kind();

        let snapshot: Vec<Registration<M>> = {
            let registry = self.registry.lock();
            match registry.get(&kind) {
                Some(regs) => regs.clone(),
                None => {
                    tracing::trace!(target: targets::BUS, ?kind, "no subscribers");
                    return Delivery::default();
                }
            }
        };

        tracing::trace!(target: targets::BUS, ?kind, handlers = snapshot.len(), "publishing");

        let mut delivery = Delivery::default();
        for reg in &snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (reg.handler)(&message)));
            let fault = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(fault)) => Some(fault),
                Err(payload) => Some(HandlerFault::from_panic(payload)),
            };

            match fault {
                None => delivery.delivered += 1,
                Some(fault) => {
                    delivery.failed += 1;
                    self.sink.report(FaultReport {
                        kind: format!("{kind:?}"),
                        subscription: reg.id,
                        fault,
                    });
                }
            }
        }

        delivery
    }
}

static_assertions::assert_impl_all!(SubscriptionId: Send, Sync, Copy);

/// A registration that is removed when this guard is dropped.
///
/// The guard holds only a weak reference to the bus, so it never keeps the
/// bus alive and dropping it after the bus is gone is harmless.
pub struct Subscription<M: BusMessage> {
    bus: Weak<MessageBus<M>>,
    kind: M::Kind,
    id: Option<SubscriptionId>,
}

impl<M: BusMessage> Subscription<M> {
    /// The ID of the guarded registration.
    pub fn id(&self) -> Option<SubscriptionId> {
        self.id
    }

    /// The kind this registration listens to.
    pub fn kind(&self) -> M::Kind {
        self.kind
    }

    /// Remove the registration now. Returns `true` if it was still present.
    pub fn cancel(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        self.bus
            .upgrade()
            .is_some_and(|bus| bus.unsubscribe_id(self.kind, id))
    }

    /// Keep the registration alive past the guard and return its ID.
    pub fn detach(mut self) -> Option<SubscriptionId> {
        self.id.take()
    }
}

impl<M: BusMessage> fmt::Debug for Subscription<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

impl<M: BusMessage> Drop for Subscription<M> {
    fn drop(&mut self) {
        self.cancel();
    }
}
