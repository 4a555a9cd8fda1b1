mod common;

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use gfx_bridge::core::data::event::{Event, EventKind};
use gfx_bridge::core::event_queue::EventQueue;
use gfx_bridge::core::keys::{KEY_RETURN, KEY_SHIFT};
use gfx_bridge::{ActiveTarget, BridgeError, Colour, Modifiers, SubwindowKind, Timeout, WindowRef};

fn target(raw: u64) -> ActiveTarget {
    ActiveTarget {
        window: WindowRef::from_raw(raw),
        subwindow: 0,
    }
}

#[test]
fn test_eviction_keeps_last_capacity_events_in_order() {
    let queue = EventQueue::new(4);

    for button in 0..10 {
        queue.push(Event::button_down(target(1), 0, 0, button));
    }

    let buttons: Vec<_> = queue.snapshot().iter().map(|e| e.button).collect();
    assert_eq!(buttons, vec![6, 7, 8, 9]);
}

#[test]
fn test_get_mouse_blocks_until_click_arrives() {
    let gui = common::start();
    let window = gui.context().open_window(10, 10, "block").unwrap();
    let ctx = gui.context().clone();
    let (tx, rx) = mpsc::channel();

    let waiter = thread::spawn(move || {
        tx.send(ctx.get_mouse()).unwrap();
    });

    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

    gui.inject_click(window, 7, 8, 1);
    let click = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
    assert_eq!((click.x, click.y), (7, 8));

    waiter.join().unwrap();
    gui.shutdown().unwrap();
}

#[test]
fn test_get_mouse_ignores_clicks_in_inactive_windows() {
    let gui = common::start();
    let ctx = gui.context();
    let active = ctx.open_window(10, 10, "active").unwrap();
    let other = ctx.open_window(10, 10, "other").unwrap();

    gui.inject_click(other, 1, 1, 1);
    gui.inject_click(active, 2, 2, 1);

    let click = ctx.get_mouse().unwrap();
    assert_eq!(click.target.window, active);
    assert_eq!((click.x, click.y), (2, 2));

    gui.shutdown().unwrap();
}

#[test]
fn test_waiting_get_mouse_follows_active_window_change() {
    let gui = common::start_fast();
    let first = gui.context().open_window(10, 10, "first").unwrap();
    let second = gui.context().open_window(10, 10, "second").unwrap();
    let ctx = gui.context().clone();

    let waiter = thread::spawn(move || ctx.get_mouse());

    gui.context().set_active_window(second, 0).unwrap();
    // Several poll intervals, so the waiter has re-read the filter.
    thread::sleep(Duration::from_millis(50));
    gui.inject_click(second, 4, 4, 1);

    let click = waiter.join().unwrap().unwrap();
    assert_eq!(click.target.window, second);
    assert_ne!(click.target.window, first);

    gui.shutdown().unwrap();
}

#[test]
fn test_get_mouse_without_active_window_fails() {
    let gui = common::start();

    assert!(matches!(
        gui.context().get_mouse(),
        Err(BridgeError::NoActiveWindow)
    ));

    gui.shutdown().unwrap();
}

#[test]
fn test_any_click_accepts_every_window() {
    let gui = common::start();
    let ctx = gui.context();
    ctx.open_window(10, 10, "active").unwrap();
    let other = ctx.open_window(10, 10, "other").unwrap();

    gui.inject_click(other, 1, 1, 3);

    let (button, origin) = ctx.any_click().unwrap();
    assert_eq!(button, 3);
    assert_eq!(origin.window, other);

    gui.shutdown().unwrap();
}

#[test]
fn test_get_key_skips_modifiers_and_normalizes() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "keys").unwrap();

    gui.inject_key(window, KEY_SHIFT, Modifiers::SHIFT);
    gui.inject_key(window, i32::from(b'Q'), Modifiers::empty());
    gui.inject_key(window, KEY_RETURN, Modifiers::empty());

    assert_eq!(ctx.get_key(true).unwrap().key, i32::from(b'q'));
    assert_eq!(ctx.get_key(true).unwrap().key, KEY_RETURN);

    gui.shutdown().unwrap();
}

#[test]
fn test_get_event_times_out_with_none_event() {
    let gui = common::start();

    let event = gui
        .context()
        .get_event(Timeout::After(Duration::from_millis(20)))
        .unwrap();

    assert_eq!(event.kind, EventKind::None);
    assert_eq!(event.window, None);
    gui.shutdown().unwrap();
}

#[test]
fn test_get_event_forever_wakes_on_later_input() {
    let gui = common::start();
    let window = gui.context().open_window(10, 10, "forever").unwrap();
    let ctx = gui.context().clone();
    let (tx, rx) = mpsc::channel();

    let waiter = thread::spawn(move || {
        tx.send(ctx.get_event(Timeout::Forever)).unwrap();
    });

    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

    gui.inject_button_down(window, 6, 7, 2);
    let event = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
    assert_eq!(event.kind, EventKind::ButtonDown);
    assert_eq!((event.x, event.y, event.button), (6, 7, 2));

    waiter.join().unwrap();
    gui.shutdown().unwrap();
}

#[test]
fn test_get_event_normalizes_queued_key() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "normalize").unwrap();

    gui.inject_key(window, i32::from(b'Q'), Modifiers::empty());
    gui.settle().unwrap();

    let down = ctx.get_event(Timeout::Poll).unwrap();
    assert_eq!(down.kind, EventKind::KeyDown);
    assert_eq!(down.key, i32::from(b'q'));

    let up = ctx.get_event(Timeout::Poll).unwrap();
    assert_eq!(up.kind, EventKind::KeyUp);
    assert_eq!(up.key, i32::from(b'q'));
    gui.shutdown().unwrap();
}

#[test]
fn test_get_key_reports_lone_modifier_when_not_ignored() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "modifier").unwrap();

    gui.inject_key(window, KEY_SHIFT, Modifiers::SHIFT);
    gui.inject_key(window, i32::from(b'a'), Modifiers::empty());

    let press = ctx.get_key(false).unwrap();
    assert_eq!(press.key, KEY_SHIFT);
    assert_eq!(press.modifiers, Modifiers::SHIFT);
    assert_eq!(ctx.get_key(false).unwrap().key, i32::from(b'a'));
    gui.shutdown().unwrap();
}

#[test]
fn test_un_get_event_goes_to_the_tail() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "requeue").unwrap();

    gui.inject_button_down(window, 0, 0, 1);
    gui.inject_button_down(window, 0, 0, 2);
    gui.settle().unwrap();

    let first = ctx.get_event(Timeout::Poll).unwrap();
    ctx.un_get_event(first);

    assert_eq!(ctx.get_event(Timeout::Poll).unwrap().button, 2);
    assert_eq!(ctx.get_event(Timeout::Poll).unwrap().button, 1);
    gui.shutdown().unwrap();
}

#[test]
fn test_flush_discards_pending_input() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "flush").unwrap();

    gui.inject_click(window, 0, 0, 1);
    gui.settle().unwrap();
    ctx.flush_events();

    assert_eq!(ctx.get_event(Timeout::Poll).unwrap().kind, EventKind::None);
    gui.shutdown().unwrap();
}

#[test]
fn test_flush_during_concurrent_pushes_keeps_order_monotonic() {
    let queue = Arc::new(EventQueue::new(10_000));
    let producer_queue = Arc::clone(&queue);

    let producer = thread::spawn(move || {
        for button in 0..2_000 {
            producer_queue.push(Event::button_down(target(1), 0, 0, button));
        }
    });
    for _ in 0..20 {
        queue.flush();
        thread::yield_now();
    }
    producer.join().unwrap();

    let buttons: Vec<_> = queue.snapshot().iter().map(|e| e.button).collect();
    assert!(buttons.windows(2).all(|pair| pair[1] == pair[0] + 1));
}

#[test]
fn test_queued_calls_visible_to_next_blocking_call() {
    let gui = common::start();
    let ctx = gui.context();
    ctx.open_window(10, 10, "order").unwrap();

    ctx.set_background(Colour::RED).unwrap();
    ctx.set_background(Colour::GREEN).unwrap();
    ctx.clear_window().unwrap();

    assert_eq!(ctx.capture_pixel(9, 9).unwrap(), Colour::GREEN);
    gui.shutdown().unwrap();
}

#[test]
fn test_capture_outside_surface_fails() {
    let gui = common::start();
    let ctx = gui.context();
    ctx.open_window(10, 10, "bounds").unwrap();

    assert!(matches!(
        ctx.capture_pixel(10, 0),
        Err(BridgeError::PixelOutOfBounds { x: 10, y: 0 })
    ));
    gui.shutdown().unwrap();
}

#[test]
fn test_mouse_tracking_enables_motion_events() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "motion").unwrap();

    gui.inject_motion(window, 1, 1);
    gui.settle().unwrap();
    assert!(ctx.event_queue().is_empty());

    ctx.enable_mouse_tracking(true).unwrap();
    gui.settle().unwrap();
    gui.inject_motion(window, 2, 3);
    gui.settle().unwrap();

    let event = ctx.get_event(Timeout::Poll).unwrap();
    assert_eq!(event.kind, EventKind::MouseMove);
    assert_eq!((event.x, event.y), (2, 3));
    gui.shutdown().unwrap();
}

#[test]
fn test_tab_selection_moves_active_subwindow() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx
        .open_complex_window(
            30,
            20,
            "tabs",
            &[("left", SubwindowKind::Canvas2d), ("right", SubwindowKind::View3d)],
        )
        .unwrap();

    gui.select_tab(window, 1);
    gui.settle().unwrap();
    gui.inject_click(window, 5, 5, 1);

    let click = ctx.get_mouse().unwrap();
    assert_eq!(click.target, ActiveTarget { window, subwindow: 1 });
    gui.shutdown().unwrap();
}

#[test]
fn test_show_window_raises_requested_subwindow() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx
        .open_complex_window(
            30,
            20,
            "show",
            &[("a", SubwindowKind::Canvas2d), ("b", SubwindowKind::Canvas2d)],
        )
        .unwrap();

    ctx.show_window(window, 1).unwrap();
    assert!(matches!(
        ctx.show_window(window, 2),
        Err(BridgeError::SubwindowOutOfBounds { index: 2, count: 2, .. })
    ));

    assert_eq!(gui.backend_log().raised, vec![(window, 1)]);
    assert_eq!(ctx.active_window(), Some(ActiveTarget { window, subwindow: 1 }));
    gui.shutdown().unwrap();
}

#[test]
fn test_native_close_request_is_ignored() {
    let gui = common::start();
    let ctx = gui.context();
    let window = ctx.open_window(10, 10, "stubborn").unwrap();

    gui.request_close(window);
    gui.settle().unwrap();

    assert_eq!(ctx.window_count(), 1);
    assert!(ctx.event_queue().is_empty());
    gui.shutdown().unwrap();
}

#[test]
fn test_view_subwindow_starts_white_on_black_background() {
    let gui = common::start();
    let ctx = gui.context();
    ctx.open_window_3d(10, 10, "view").unwrap();

    assert_eq!(ctx.capture_pixel(0, 0).unwrap(), Colour::WHITE);
    ctx.clear_window().unwrap();
    assert_eq!(ctx.capture_pixel(0, 0).unwrap(), Colour::BLACK);
    gui.shutdown().unwrap();
}
