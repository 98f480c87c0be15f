// Host-side checks that browser pointer events feed the playground directly.
// The event types exist on every target; only calling into them needs wasm.

use joy_core::{Collaborators, Playground, PointerId, Settings};

#[test]
fn browser_pointer_ids_are_playground_pointer_ids() {
    let read_id: fn(&web_sys::PointerEvent) -> PointerId = web_sys::PointerEvent::pointer_id;
    let _ = read_id;
}

#[test]
fn negative_and_large_browser_ids_are_tracked() {
    let mut pg = Playground::new(
        glam::Vec2::new(640.0, 480.0),
        Settings::default(),
        3,
        Collaborators::silent(),
    );
    for id in [-1, 0, i32::MAX] {
        pg.pointer_down(id, glam::Vec2::new(10.0, 10.0), 0.0);
    }
    assert_eq!(pg.sessions().len(), 3);
    assert!(pg.pointer_up(i32::MAX, 5.0));
    assert!(pg.pointer_cancel(-1, 5.0));
    assert_eq!(pg.sessions().len(), 1);
}
