//! Integration tests for opening and closing dialogs through the coordinator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use teamdesk::prelude::*;
use teamdesk::window::GestureMode;
use teamdesk_core::ChannelSink;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

type ModalHook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct FakeWindow {
    calls: Mutex<Vec<&'static str>>,
    bounds: Mutex<WindowBounds>,
    modal_hook: Mutex<Option<ModalHook>>,
}

impl FakeWindow {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

impl GestureSurface for FakeWindow {
    fn bounds(&self) -> WindowBounds {
        *self.bounds.lock()
    }
    fn set_bounds(&self, bounds: WindowBounds) {
        *self.bounds.lock() = bounds;
    }
    fn capture_pointer(&self) {
        self.record("capture");
    }
    fn release_pointer(&self) {
        self.record("release");
    }
    fn begin_drag_move(&self) -> bool {
        false
    }
    fn set_cursor(&self, _: CursorShape) {}
}

impl DialogWindow for FakeWindow {
    fn show(&self) {
        self.record("show");
    }
    fn show_modal(&self) {
        self.record("show_modal");
        // Runs like a nested event loop: whatever the user does happens here.
        let hook = self.modal_hook.lock().take();
        if let Some(hook) = hook {
            hook();
        }
    }
    fn close(&self) {
        self.record("close");
    }
    fn raise(&self) {
        self.record("raise");
    }
}

struct FakeContent {
    teardowns: Arc<Mutex<Vec<DialogResult>>>,
}

impl DialogContent for FakeContent {
    fn teardown(&mut self, result: DialogResult) {
        self.teardowns.lock().push(result);
    }
}

/// Records everything built by the factory.
#[derive(Clone, Default)]
struct Harness {
    windows: Arc<Mutex<Vec<Arc<FakeWindow>>>>,
    teardowns: Arc<Mutex<Vec<DialogResult>>>,
    built: Arc<AtomicUsize>,
    /// When set, modal windows publish a close request with this
    /// `is_canceled` flag from inside their modal loop.
    modal_close: Arc<Mutex<Option<bool>>>,
}

impl Harness {
    fn factory(&self, kinds: &[DialogKind]) -> FactoryRegistry {
        let mut factories = FactoryRegistry::new();
        for &kind in kinds {
            let harness = self.clone();
            factories.register(kind, move |ctx| {
                harness.built.fetch_add(1, Ordering::SeqCst);
                let modal_close = *harness.modal_close.lock();
                let modal_hook = modal_close.map(|is_canceled| {
                    let ctx = ctx.clone();
                    Box::new(move || {
                        ctx.request_close(is_canceled);
                    }) as ModalHook
                });
                let window = Arc::new(FakeWindow {
                    bounds: Mutex::new(WindowBounds::new(100.0, 100.0, 600.0, 400.0)),
                    modal_hook: Mutex::new(modal_hook),
                    ..FakeWindow::default()
                });
                harness.windows.lock().push(Arc::clone(&window));
                DialogParts::new(
                    window,
                    Box::new(FakeContent {
                        teardowns: Arc::clone(&harness.teardowns),
                    }),
                )
            });
        }
        factories
    }

    fn window(&self, index: usize) -> Arc<FakeWindow> {
        Arc::clone(&self.windows.lock()[index])
    }

    fn teardowns(&self) -> Vec<DialogResult> {
        self.teardowns.lock().clone()
    }
}

fn coordinator(harness: &Harness, kinds: &[DialogKind]) -> DialogCoordinator {
    DialogCoordinator::new(Arc::new(AppBus::new()), harness.factory(kinds))
}

#[test]
fn test_close_request_round_trip() {
    init_tracing();
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::AddTask]);

    let outcome = coordinator.show(DialogKind::AddTask).unwrap();
    assert!(matches!(outcome, OpenOutcome::Opened(_)));
    assert!(coordinator.is_open(DialogKind::AddTask));

    let delivery = request_close(coordinator.bus(), DialogKind::AddTask, false);
    assert_eq!(delivery.delivered, 1);

    assert!(coordinator.is_empty());
    assert_eq!(harness.teardowns(), vec![DialogResult::Accepted]);
    assert_eq!(harness.window(0).calls(), vec!["show", "close"]);
    assert_eq!(coordinator.bus().subscriber_count(MessageKind::CloseDialog), 0);

    // A second request finds nobody and tears nothing down again.
    assert!(request_close(coordinator.bus(), DialogKind::AddTask, false).is_unobserved());
    assert_eq!(harness.teardowns().len(), 1);
}

#[test]
fn test_settings_cancel_reaches_teardown_and_callback() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::Settings]);
    let results = Arc::new(Mutex::new(Vec::new()));

    let results_clone = results.clone();
    coordinator
        .open(DialogKind::Settings, WindowModality::NonModal, move |result| {
            results_clone.lock().push(result);
        })
        .unwrap();

    request_close(coordinator.bus(), DialogKind::Settings, true);

    assert_eq!(harness.teardowns(), vec![DialogResult::Rejected]);
    assert_eq!(*results.lock(), vec![DialogResult::Rejected]);
}

#[test]
fn test_close_request_for_other_kind_is_ignored() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::AddTask, DialogKind::EditTask]);

    coordinator.show(DialogKind::AddTask).unwrap();
    coordinator.show(DialogKind::EditTask).unwrap();

    let delivery = request_close(coordinator.bus(), DialogKind::EditTask, false);
    // Both windows see the request; only one acts on it.
    assert_eq!(delivery.delivered, 2);
    assert_eq!(coordinator.open_kinds(), vec![DialogKind::AddTask]);
}

#[test]
fn test_open_unsupported_kind_fails_without_side_effects() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::Settings]);
    coordinator.show(DialogKind::Settings).unwrap();

    let err = coordinator.show(DialogKind::CalendarAccounts).unwrap_err();

    assert_eq!(err, DialogError::UnsupportedKind(DialogKind::CalendarAccounts));
    assert_eq!(harness.built.load(Ordering::SeqCst), 1);
    assert_eq!(coordinator.open_kinds(), vec![DialogKind::Settings]);
    assert_eq!(coordinator.bus().subscriber_count(MessageKind::CloseDialog), 1);
}

#[test]
fn test_duplicate_open_raises_existing_window() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::About]);

    let first = coordinator.show(DialogKind::About).unwrap();
    let second = coordinator.show(DialogKind::About).unwrap();

    let id = first.window_id().unwrap();
    assert_eq!(second, OpenOutcome::Raised(id));
    assert_eq!(harness.built.load(Ordering::SeqCst), 1);
    assert_eq!(harness.window(0).calls(), vec!["show", "raise"]);
    assert_eq!(coordinator.len(), 1);
}

#[test]
fn test_duplicate_open_rejected_by_policy() {
    let harness = Harness::default();
    let coordinator = DialogCoordinator::with_config(
        Arc::new(AppBus::new()),
        harness.factory(&[DialogKind::About]),
        DialogConfig::default().with_duplicate_policy(DuplicatePolicy::Reject),
        GestureConfig::default(),
    );

    coordinator.show(DialogKind::About).unwrap();
    assert_eq!(
        coordinator.show(DialogKind::About),
        Err(DialogError::AlreadyOpen(DialogKind::About))
    );
    assert_eq!(harness.built.load(Ordering::SeqCst), 1);
}

#[test]
fn test_direct_close_without_dispose_skips_teardown() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::TaskDetails]);

    let id = coordinator.show(DialogKind::TaskDetails).unwrap().window_id().unwrap();
    assert!(coordinator.close(id, false));

    assert!(harness.teardowns().is_empty());
    assert_eq!(harness.window(0).calls(), vec!["show", "close"]);
    assert!(!coordinator.close(id, true));
}

#[test]
fn test_reopen_after_close_builds_new_window() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::EditTeamMember]);

    let first = coordinator.show(DialogKind::EditTeamMember).unwrap().window_id().unwrap();
    request_close(coordinator.bus(), DialogKind::EditTeamMember, false);
    let second = coordinator.show(DialogKind::EditTeamMember).unwrap().window_id().unwrap();

    assert_ne!(first, second);
    assert_eq!(harness.built.load(Ordering::SeqCst), 2);
    // The stale id does not close the new window.
    assert!(!coordinator.close(first, true));
    assert!(coordinator.is_open(DialogKind::EditTeamMember));
}

#[test]
fn test_modal_dialog_completes_with_requested_result() {
    let harness = Harness::default();
    *harness.modal_close.lock() = Some(false);
    let coordinator = coordinator(&harness, &[DialogKind::AddTeamMember]);
    let results = Arc::new(Mutex::new(Vec::new()));

    let results_clone = results.clone();
    let outcome = coordinator
        .open(DialogKind::AddTeamMember, WindowModality::ApplicationModal, move |result| {
            results_clone.lock().push(result);
        })
        .unwrap();

    assert_eq!(outcome, OpenOutcome::Completed(DialogResult::Accepted));
    assert_eq!(*results.lock(), vec![DialogResult::Accepted]);
    assert_eq!(harness.teardowns(), vec![DialogResult::Accepted]);
    assert_eq!(harness.window(0).calls(), vec!["show_modal", "close"]);
    assert!(coordinator.is_empty());
}

#[test]
fn test_modal_dialog_closed_natively_is_rejected() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::AddTeamMember]);

    let outcome = coordinator
        .open(DialogKind::AddTeamMember, WindowModality::ApplicationModal, |_| {})
        .unwrap();

    assert_eq!(outcome, OpenOutcome::Completed(DialogResult::Rejected));
    assert_eq!(harness.teardowns(), vec![DialogResult::Rejected]);
}

#[test]
fn test_lifecycle_notifications() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::About]);
    let events = Arc::new(Mutex::new(Vec::new()));

    for kind in [MessageKind::DialogOpened, MessageKind::DialogClosed] {
        let events = events.clone();
        coordinator.bus().subscribe_fn(kind, move |msg| {
            events.lock().push(msg.clone());
            Ok(())
        });
    }

    coordinator.show(DialogKind::About).unwrap();
    coordinator.close_kind(DialogKind::About);

    assert_eq!(
        *events.lock(),
        vec![
            AppMessage::DialogOpened { kind: DialogKind::About },
            AppMessage::DialogClosed {
                kind: DialogKind::About,
                result: DialogResult::Rejected
            },
        ]
    );
}

#[test]
fn test_close_from_another_thread() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::AddTask]);
    coordinator.show(DialogKind::AddTask).unwrap();

    let bus = Arc::clone(coordinator.bus());
    std::thread::spawn(move || {
        request_close(&bus, DialogKind::AddTask, true);
    })
    .join()
    .unwrap();

    assert!(coordinator.is_empty());
    assert_eq!(harness.teardowns(), vec![DialogResult::Rejected]);
}

#[test]
fn test_pointer_events_drive_window_gesture() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::Settings]);
    let id = coordinator.show(DialogKind::Settings).unwrap().window_id().unwrap();

    let mode = coordinator.dispatch_pointer(
        id,
        PointerInput::Down {
            position: Point::new(300.0, 20.0),
            screen_position: Point::new(400.0, 120.0),
            button: PointerButton::Primary,
        },
    );
    assert_eq!(mode, Some(GestureMode::Dragging));

    coordinator.dispatch_pointer(
        id,
        PointerInput::Move {
            position: Point::new(0.0, 0.0),
            screen_position: Point::new(450.0, 170.0),
        },
    );
    coordinator.dispatch_pointer(id, PointerInput::Up { button: PointerButton::Primary });

    let window = harness.window(0);
    assert_eq!(window.bounds(), WindowBounds::new(150.0, 150.0, 600.0, 400.0));
    assert_eq!(window.calls(), vec!["show", "capture", "release"]);
}

#[test]
fn test_shell_shutdown_closes_everything() {
    let harness = Harness::default();
    let shell = Shell::start(
        ShellConfig::default(),
        harness.factory(&[DialogKind::MainWindow, DialogKind::Settings]),
    );

    shell.coordinator().show(DialogKind::MainWindow).unwrap();
    shell.coordinator().show(DialogKind::Settings).unwrap();

    shell.shutdown();
    shell.shutdown();

    assert!(shell.is_shut_down());
    assert!(shell.coordinator().is_empty());
    assert!(shell.bus().is_empty());
    assert_eq!(
        harness.teardowns(),
        vec![DialogResult::Rejected, DialogResult::Rejected]
    );
    assert_eq!(
        shell.coordinator().show(DialogKind::Settings),
        Err(DialogError::ShutDown)
    );
}

#[test]
fn test_faulting_listener_does_not_break_open() {
    let harness = Harness::default();
    let (sink, faults): (ChannelSink, crossbeam_channel::Receiver<_>) = ChannelSink::unbounded();
    let shell = Shell::start_with_error_sink(
        ShellConfig::default(),
        harness.factory(&[DialogKind::About]),
        Arc::new(sink),
    );

    shell.bus().subscribe_fn(MessageKind::DialogOpened, |_| Err(HandlerFault::msg("listener broke")));
    shell.bus().subscribe_fn(MessageKind::DialogOpened, |_| panic!("listener panicked"));

    assert!(shell.coordinator().show(DialogKind::About).is_ok());
    assert!(shell.coordinator().is_open(DialogKind::About));

    let reports: Vec<_> = faults.try_iter().collect();
    assert_eq!(reports.len(), 2);
    assert!(!reports[0].fault.is_panic());
    assert!(reports[1].fault.is_panic());
}

#[test]
fn test_dialog_closed_by_opened_listener_is_never_shown() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::Settings]);
    let results = Arc::new(Mutex::new(Vec::new()));

    let bus = Arc::clone(coordinator.bus());
    coordinator.bus().subscribe_fn(MessageKind::DialogOpened, move |msg| {
        if let AppMessage::DialogOpened { kind } = msg {
            request_close(&bus, *kind, true);
        }
        Ok(())
    });

    let results_clone = results.clone();
    let outcome = coordinator
        .open(DialogKind::Settings, WindowModality::NonModal, move |result| {
            results_clone.lock().push(result);
        })
        .unwrap();

    assert_eq!(outcome, OpenOutcome::Completed(DialogResult::Rejected));
    assert!(coordinator.is_empty());
    assert_eq!(harness.window(0).calls(), vec!["close"]);
    assert_eq!(harness.teardowns(), vec![DialogResult::Rejected]);
    assert_eq!(*results.lock(), vec![DialogResult::Rejected]);
}

#[test]
fn test_modal_dialog_closed_by_opened_listener_skips_modal_loop() {
    let harness = Harness::default();
    let coordinator = coordinator(&harness, &[DialogKind::AddTask]);

    let bus = Arc::clone(coordinator.bus());
    coordinator.bus().subscribe_fn(MessageKind::DialogOpened, move |msg| {
        if let AppMessage::DialogOpened { kind } = msg {
            request_close(&bus, *kind, false);
        }
        Ok(())
    });

    let outcome = coordinator
        .open(DialogKind::AddTask, WindowModality::ApplicationModal, |_| {})
        .unwrap();

    assert_eq!(outcome, OpenOutcome::Completed(DialogResult::Accepted));
    assert_eq!(harness.window(0).calls(), vec!["close"]);
}

struct PanickingContent;

impl DialogContent for PanickingContent {
    fn teardown(&mut self, _: DialogResult) {
        panic!("teardown failed");
    }
}

#[test]
fn test_panicking_teardown_still_closes_window() {
    let window = Arc::new(FakeWindow::default());
    let factory_window = Arc::clone(&window);
    let factory = FactoryRegistry::new().with(DialogKind::About, move |_| {
        DialogParts::new(factory_window.clone(), Box::new(PanickingContent))
    });
    let coordinator = DialogCoordinator::new(Arc::new(AppBus::new()), factory);

    let closed = Arc::new(Mutex::new(Vec::new()));
    let closed_clone = closed.clone();
    coordinator.bus().subscribe_fn(MessageKind::DialogClosed, move |msg| {
        closed_clone.lock().push(msg.clone());
        Ok(())
    });
    let results = Arc::new(Mutex::new(Vec::new()));
    let results_clone = results.clone();
    coordinator
        .open(DialogKind::About, WindowModality::NonModal, move |result| {
            results_clone.lock().push(result);
        })
        .unwrap();

    let delivery = request_close(coordinator.bus(), DialogKind::About, false);

    assert_eq!(delivery.failed, 0);
    assert!(coordinator.is_empty());
    assert_eq!(window.calls(), vec!["show", "close"]);
    assert_eq!(
        *closed.lock(),
        vec![AppMessage::DialogClosed {
            kind: DialogKind::About,
            result: DialogResult::Accepted
        }]
    );
    assert_eq!(*results.lock(), vec![DialogResult::Accepted]);
}
