//! Integration tests for the borderless window gesture machine.

use std::cell::{Cell, RefCell};

use teamdesk::window::{
    CursorShape, GestureConfig, GestureMode, GestureSurface, Point, PointerButton, PointerInput,
    ResizeEdge, WindowBounds, WindowGesture,
};

struct Surface {
    bounds: Cell<WindowBounds>,
    captured: Cell<bool>,
    drags: Cell<usize>,
    log: RefCell<Vec<WindowBounds>>,
}

impl Surface {
    fn new(bounds: WindowBounds) -> Self {
        Self {
            bounds: Cell::new(bounds),
            captured: Cell::new(false),
            drags: Cell::new(0),
            log: RefCell::new(Vec::new()),
        }
    }
}

impl GestureSurface for Surface {
    fn bounds(&self) -> WindowBounds {
        self.bounds.get()
    }
    fn set_bounds(&self, bounds: WindowBounds) {
        self.log.borrow_mut().push(bounds);
        self.bounds.set(bounds);
    }
    fn capture_pointer(&self) {
        self.captured.set(true);
    }
    fn release_pointer(&self) {
        self.captured.set(false);
    }
    fn begin_drag_move(&self) -> bool {
        self.drags.set(self.drags.get() + 1);
        false
    }
    fn set_cursor(&self, _: CursorShape) {}
}

const START: WindowBounds = WindowBounds::new(200.0, 150.0, 500.0, 400.0);

fn press(surface: &Surface, gesture: &mut WindowGesture, local: Point, button: PointerButton) -> GestureMode {
    let b = surface.bounds();
    gesture.handle(
        surface,
        PointerInput::Down {
            position: local,
            screen_position: Point::new(b.left + local.x, b.top + local.y),
            button,
        },
    )
}

fn move_to(surface: &Surface, gesture: &mut WindowGesture, screen: Point) -> GestureMode {
    gesture.handle(
        surface,
        PointerInput::Move {
            position: Point::ZERO,
            screen_position: screen,
        },
    )
}

#[test]
fn test_resize_never_goes_below_minimum() {
    let config = GestureConfig::default().with_min_size(320.0, 240.0);

    for edge_point in [Point::new(2.0, 200.0), Point::new(498.0, 200.0), Point::new(250.0, 398.0)] {
        let surface = Surface::new(START);
        let mut gesture = WindowGesture::new(config.clone());
        assert!(matches!(
            press(&surface, &mut gesture, edge_point, PointerButton::Primary),
            GestureMode::Resizing(_)
        ));

        let mut x = -400.0;
        while x <= 400.0 {
            let screen = Point::new(START.left + edge_point.x + x, START.top + edge_point.y + x);
            move_to(&surface, &mut gesture, screen);
            let b = surface.bounds();
            assert!(b.width >= 320.0, "width {} at offset {x}", b.width);
            assert!(b.height >= 240.0, "height {} at offset {x}", b.height);
            x += 25.0;
        }
    }
}

#[test]
fn test_rejected_resize_step_writes_nothing() {
    let surface = Surface::new(START);
    let mut gesture = WindowGesture::new(GestureConfig::default().with_min_size(320.0, 240.0));

    press(&surface, &mut gesture, Point::new(498.0, 200.0), PointerButton::Primary);
    let anchor_x = START.left + 498.0;

    // 500 - 200 = 300 < 320: rejected, no write at all.
    move_to(&surface, &mut gesture, Point::new(anchor_x - 200.0, 0.0));
    assert!(surface.log.borrow().is_empty());
    assert_eq!(surface.bounds(), START);
}

#[test]
fn test_left_resize_keeps_right_edge_while_accepted() {
    let surface = Surface::new(START);
    let mut gesture = WindowGesture::new(GestureConfig::default());
    press(&surface, &mut gesture, Point::new(1.0, 200.0), PointerButton::Primary);

    for dx in [-100.0, -20.0, 0.0, 40.0, 150.0] {
        move_to(&surface, &mut gesture, Point::new(START.left + 1.0 + dx, 0.0));
        assert_eq!(surface.bounds().right(), START.right());
    }
}

#[test]
fn test_gestures_are_exclusive_until_release() {
    let surface = Surface::new(START);
    let mut gesture = WindowGesture::new(GestureConfig::default());

    assert_eq!(
        press(&surface, &mut gesture, Point::new(250.0, 100.0), PointerButton::Primary),
        GestureMode::Dragging
    );
    // Pressing on an edge mid-drag does not switch to resizing.
    assert_eq!(
        press(&surface, &mut gesture, Point::new(1.0, 100.0), PointerButton::Primary),
        GestureMode::Dragging
    );
    assert_eq!(surface.drags.get(), 1);

    assert_eq!(
        gesture.handle(&surface, PointerInput::Up { button: PointerButton::Primary }),
        GestureMode::Idle
    );
    assert!(!surface.captured.get());

    assert_eq!(
        press(&surface, &mut gesture, Point::new(1.0, 100.0), PointerButton::Primary),
        GestureMode::Resizing(ResizeEdge::Left)
    );
}

#[test]
fn test_resize_works_with_any_button() {
    let surface = Surface::new(START);
    let mut gesture = WindowGesture::new(GestureConfig::default());

    assert_eq!(
        press(&surface, &mut gesture, Point::new(250.0, 398.0), PointerButton::Secondary),
        GestureMode::Resizing(ResizeEdge::Bottom)
    );
}

#[test]
fn test_release_while_idle_is_harmless() {
    let surface = Surface::new(START);
    let mut gesture = WindowGesture::new(GestureConfig::default());

    assert_eq!(gesture.handle(&surface, PointerInput::CaptureLost), GestureMode::Idle);
    assert_eq!(surface.bounds(), START);
}
