//! The application shell.
//!
//! [`Shell`] owns the application bus and the dialog coordinator. It is
//! created once at startup and shut down on exit; nothing in TeamDesk is a
//! process-wide global.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use teamdesk_core::ErrorSink;
use teamdesk_core::logging::{span_names, targets};

use crate::config::ShellConfig;
use crate::dialog::{DialogCoordinator, DialogFactory};
use crate::message::AppBus;

/// Owner of the bus and dialog coordinator.
///
/// ```ignore
/// let shell = Shell::start(ShellConfig::load("teamdesk.toml")?, factories);
/// shell.coordinator().show(DialogKind::MainWindow)?;
/// // ... run the event loop ...
/// shell.shutdown();
/// ```
#[derive(Debug)]
pub struct Shell {
    config: ShellConfig,
    bus: Arc<AppBus>,
    coordinator: DialogCoordinator,
    shut_down: AtomicBool,
}

impl Shell {
    /// Build the bus and coordinator. Handler faults are logged.
    pub fn start(config: ShellConfig, factory: impl DialogFactory + 'static) -> Self {
        Self::start_with_bus(config, factory, Arc::new(AppBus::new()))
    }

    /// Like [`start`](Self::start), reporting handler faults to `sink`.
    pub fn start_with_error_sink(
        config: ShellConfig,
        factory: impl DialogFactory + 'static,
        sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self::start_with_bus(config, factory, Arc::new(AppBus::with_error_sink(sink)))
    }

    fn start_with_bus(config: ShellConfig, factory: impl DialogFactory + 'static, bus: Arc<AppBus>) -> Self {
        let _span = tracing::info_span!(target: targets::SHELL, "start", name = span_names::SHELL).entered();

        let coordinator = DialogCoordinator::with_config(
            Arc::clone(&bus),
            factory,
            config.dialogs.clone(),
            config.gesture.clone(),
        );
        tracing::info!(
            target: targets::SHELL,
            duplicate_policy = ?config.dialogs.duplicate_policy,
            edge_threshold = config.gesture.edge_threshold,
            "shell started"
        );

        Self {
            config,
            bus,
            coordinator,
            shut_down: AtomicBool::new(false),
        }
    }

    /// The application bus.
    pub fn bus(&self) -> &Arc<AppBus> {
        &self.bus
    }

    /// The dialog coordinator.
    pub fn coordinator(&self) -> &DialogCoordinator {
        &self.coordinator
    }

    /// The configuration the shell started with.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Check whether [`shutdown`](Self::shutdown) has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    /// Close every dialog as rejected and drop every bus subscription.
    ///
    /// Later calls do nothing.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        let _span = tracing::info_span!(target: targets::SHELL, "shutdown", name = span_names::SHELL).entered();

        let closed = self.coordinator.shutdown();
        self.bus.clear();
        tracing::info!(target: targets::SHELL, closed, "shell shut down");
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.shutdown();
    }
}

static_assertions::assert_impl_all!(Shell: Send, Sync);
