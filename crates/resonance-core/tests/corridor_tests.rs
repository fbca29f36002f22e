// Time corridor sub-machine: focus tracking, drag vs click, snapping, inspect.

use glam::Vec2;
use resonance_core::{
    nearest_index, slot_x, Corridor, CorridorMode, Element, Landmark, PhotoMemory, Release,
};

fn memory(id: &str, timestamp: u64) -> PhotoMemory {
    PhotoMemory {
        id: id.to_string(),
        photo_url: format!("blob:{}", id),
        element: Element::Water,
        landmark: Landmark::new("west_lake", "West Lake"),
        timestamp,
    }
}

fn corridor_with(n: usize) -> Corridor {
    let mut c = Corridor::new();
    c.enter((0..n).map(|i| memory(&format!("m{}", i), 1_000 - i as u64)).collect());
    c
}

fn drag(c: &mut Corridor, from: Vec2, to: Vec2, now: f64) -> Release {
    c.pointer_down(from);
    c.pointer_move(to);
    c.pointer_up(now)
}

#[test]
fn nearest_index_rounds_and_clamps() {
    assert_eq!(nearest_index(0.0, 5), 0);
    assert_eq!(nearest_index(3.9, 5), 0);
    assert_eq!(nearest_index(8.5, 5), 1);
    assert_eq!(nearest_index(12.1, 5), 2);
    assert_eq!(nearest_index(39.0, 5), 4);
    assert_eq!(nearest_index(-6.0, 5), 0);
    assert_eq!(nearest_index(100.0, 0), 0);
}

#[test]
fn enter_sorts_newest_first_and_resets() {
    let mut c = Corridor::new();
    c.enter(vec![memory("old", 1), memory("new", 3), memory("mid", 2)]);
    let ids: Vec<&str> = c.memories().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
    assert_eq!(c.state().camera_x, 0.0);
    assert_eq!(c.state().focus_index, 0);
    assert_eq!(c.state().mode, CorridorMode::Corridor);
}

#[test]
fn small_movement_is_a_click_not_a_drag() {
    let mut c = corridor_with(3);
    c.pointer_down(Vec2::new(100.0, 100.0));
    c.pointer_move(Vec2::new(103.0, 101.0));
    assert!(!c.state().is_dragging);
    assert_eq!(c.pointer_up(0.0), Release::Click);
    assert_eq!(c.state().camera_x, 0.0);
    assert!(!c.is_snapping());
    assert_eq!(c.pointer_up(0.0), Release::Ignored);
}

#[test]
fn drag_moves_offset_then_snaps_to_nearest() {
    let mut c = corridor_with(5);
    c.pointer_down(Vec2::new(0.0, 0.0));
    c.pointer_move(Vec2::new(-100.0, 0.0));
    assert!(c.state().is_dragging);
    assert!((c.state().camera_x - 2.0).abs() < 1e-5);
    assert_eq!(c.state().focus_index, 0);

    c.pointer_move(Vec2::new(-300.0, 0.0));
    assert!((c.state().camera_x - 6.0).abs() < 1e-5);
    assert_eq!(c.state().focus_index, 1);

    assert_eq!(c.pointer_up(10.0), Release::Drag);
    assert!(!c.state().is_dragging);
    assert!(c.is_snapping());
    c.tick(10.8);
    assert!(!c.is_snapping());
    assert_eq!(c.state().camera_x, slot_x(1));
}

#[test]
fn drag_offset_is_clamped_to_the_corridor() {
    let mut c = corridor_with(3);
    drag(&mut c, Vec2::ZERO, Vec2::new(300.0, 0.0), 0.0);
    assert_eq!(c.state().camera_x, 0.0);

    drag(&mut c, Vec2::ZERO, Vec2::new(-10_000.0, 0.0), 1.0);
    assert_eq!(c.state().camera_x, c.max_camera_x());
    assert_eq!(c.state().focus_index, 2);
}

#[test]
fn snap_sets_focus_before_the_tween_finishes() {
    let mut c = corridor_with(4);
    assert!(c.step(1, 0.0));
    assert_eq!(c.state().focus_index, 1);
    c.tick(0.3);
    assert!(c.state().camera_x > 0.0 && c.state().camera_x < slot_x(1));
    assert_eq!(c.state().focus_index, 1);
    c.tick(0.8);
    assert_eq!(c.state().camera_x, slot_x(1));

    assert!(c.step(-5, 1.0));
    assert_eq!(c.state().focus_index, 0);
}

#[test]
fn drag_cancels_a_running_snap() {
    let mut c = corridor_with(4);
    c.step(2, 0.0);
    c.tick(0.2);
    c.pointer_down(Vec2::ZERO);
    c.pointer_move(Vec2::new(-10.0, 0.0));
    assert!(!c.is_snapping());
}

#[test]
fn only_the_focused_memory_can_be_inspected() {
    let mut c = corridor_with(3);
    assert!(!c.click(1));
    assert_eq!(c.state().mode, CorridorMode::Corridor);
    assert!(c.click(0));
    assert_eq!(c.state().mode, CorridorMode::Inspect);
    assert!(c.view().inspecting);
}

#[test]
fn inspect_drag_rotates_instead_of_moving() {
    let mut c = corridor_with(3);
    c.click(0);
    let release = drag(&mut c, Vec2::ZERO, Vec2::new(10.0, 20.0), 0.0);
    assert_eq!(release, Release::Drag);
    assert_eq!(c.state().camera_x, 0.0);
    assert!(!c.is_snapping());
    let rot = c.state().inspect_rotation;
    assert!((rot.x + 0.1).abs() < 1e-6);
    assert!((rot.y - 0.1).abs() < 1e-6);

    assert!(c.cancel_inspect());
    assert!(!c.cancel_inspect());
    assert!(c.click(0));
    assert_eq!(c.state().inspect_rotation.x, 0.0);
}

#[test]
fn deleting_the_last_memory_leaves_an_empty_corridor() {
    let mut c = corridor_with(1);
    assert!(c.click(0));
    let removed = c.remove("m0").unwrap();
    assert_eq!(removed.id, "m0");
    assert!(c.is_empty());
    assert_eq!(c.state().mode, CorridorMode::Corridor);
    assert_eq!(c.state().focus_index, 0);
    assert!(c.focused().is_none());

    assert!(!c.click(0));
    assert_eq!(c.state().mode, CorridorMode::Corridor);
    assert!(!c.step(1, 0.0));
}

#[test]
fn deleting_keeps_focus_in_range() {
    let mut c = corridor_with(3);
    c.step(2, 0.0);
    c.tick(1.0);
    assert_eq!(c.state().focus_index, 2);

    c.remove("m0");
    assert_eq!(c.state().focus_index, 1);
    assert_eq!(c.focused().map(|m| m.id.as_str()), Some("m2"));
    assert_eq!(c.state().camera_x, slot_x(1));

    c.remove("m2");
    assert_eq!(c.state().focus_index, 0);
    assert_eq!(c.focused().map(|m| m.id.as_str()), Some("m1"));
    assert!(c.remove("missing").is_none());
}
