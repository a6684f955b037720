//! Destinations for handler faults raised during message delivery.
//!
//! The bus isolates failing handlers: a fault is packaged into a
//! [`FaultReport`] and handed to the bus's [`ErrorSink`], and delivery moves
//! on to the next handler.
//!
//! - [`TracingSink`] logs each fault through `tracing` (the default).
//! - [`ChannelSink`] forwards reports over a channel so a UI thread can drain
//!   and present them.

use crossbeam_channel::{Receiver, Sender};

use crate::bus::SubscriptionId;
use crate::error::HandlerFault;
use crate::logging::targets;

/// A handler fault together with where it happened.
#[derive(Debug)]
pub struct FaultReport {
    /// Debug rendering of the message kind being delivered.
    pub kind: String,
    /// The subscription whose handler failed.
    pub subscription: SubscriptionId,
    /// The failure itself.
    pub fault: HandlerFault,
}

/// Receives faults from the message bus.
///
/// Implementations must not publish on the bus that reports to them from
/// inside [`report`](Self::report) in a way that can fault again without
/// bound.
pub trait ErrorSink: Send + Sync {
    /// Accept one fault report.
    fn report(&self, report: FaultReport);
}

/// Logs faults at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, report: FaultReport) {
        tracing::warn!(
            target: targets::BUS,
            kind = %report.kind,
            subscription = report.subscription.as_u64(),
            panicked = report.fault.is_panic(),
            "bus handler fault: {}",
            report.fault
        );
    }
}

/// Forwards faults over a channel.
///
/// Reports sent after the receiver is dropped fall back to [`TracingSink`].
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<FaultReport>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn unbounded() -> (Self, Receiver<FaultReport>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }

    /// Wrap an existing sender.
    pub fn new(sender: Sender<FaultReport>) -> Self {
        Self { sender }
    }
}

impl ErrorSink for ChannelSink {
    fn report(&self, report: FaultReport) {
        if let Err(err) = self.sender.send(report) {
            TracingSink.report(err.into_inner());
        }
    }
}
