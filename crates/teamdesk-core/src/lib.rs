//! Core systems for TeamDesk.
//!
//! This crate provides the communication foundation shared by every TeamDesk
//! window:
//!
//! - **Message Bus**: A kind-keyed publish/subscribe registry, safe to use
//!   from any thread
//! - **Fault Isolation**: Handler errors and panics are reported to an
//!   [`ErrorSink`] instead of unwinding into the publisher
//! - **Logging**: `tracing` targets and span names for every subsystem
//!
//! # Message Bus Example
//!
//! ```
//! use std::sync::Arc;
//! use teamdesk_core::{BusMessage, MessageBus, Subscription, handler};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Saved }
//!
//! #[derive(Debug)]
//! struct Saved { path: String }
//!
//! impl BusMessage for Saved {
//!     type Kind = Kind;
//!     fn kind(&self) -> Kind { Kind::Saved }
//! }
//!
//! let bus = Arc::new(MessageBus::<Saved>::new());
//!
//! // Stays registered until `guard` is dropped.
//! let guard: Subscription<Saved> = bus.subscribe_scoped(
//!     Kind::Saved,
//!     handler(|msg: &Saved| {
//!         println!("saved {}", msg.path);
//!         Ok(())
//!     }),
//! );
//!
//! bus.publish(Saved { path: "plan.toml".into() });
//! drop(guard);
//! assert!(bus.is_empty());
//! ```

pub mod bus;
mod error;
pub mod logging;
pub mod sink;

pub use bus::{BusMessage, Delivery, Handler, MessageBus, Subscription, SubscriptionId, handler};
pub use error::{HandlerFault, HandlerResult};
pub use logging::PerfSpan;
pub use sink::{ChannelSink, ErrorSink, FaultReport, TracingSink};
