//! Photo-memory corridor: a browse/inspect sub-machine.
//!
//! In `Corridor` mode the camera slides along X over memory slots spaced
//! [`CORRIDOR_SPACING`] apart and the focus tracks the nearest slot. In
//! `Inspect` mode a single focused memory is shown enlarged and drags rotate
//! it instead. The focus index is always clamped into the valid range.

use crate::constants::*;
use crate::easing::Ease;
use crate::memory::PhotoMemory;
use crate::tween::Tween;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorMode {
    Corridor,
    Inspect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InspectRotation {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorState {
    pub mode: CorridorMode,
    pub camera_x: f32,
    pub focus_index: usize,
    pub is_dragging: bool,
    pub inspect_rotation: InspectRotation,
}

impl Default for CorridorState {
    fn default() -> Self {
        Self {
            mode: CorridorMode::Corridor,
            camera_x: 0.0,
            focus_index: 0,
            is_dragging: false,
            inspect_rotation: InspectRotation::default(),
        }
    }
}

/// What the camera rig needs to follow the corridor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorView {
    pub camera_x: f32,
    pub look_x: f32,
    pub inspecting: bool,
}

/// How a pointer press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Movement stayed under the drag threshold.
    Click,
    Drag,
    /// No press was active.
    Ignored,
}

/// Nearest slot to `camera_x`, clamped to `[0, count - 1]`.
pub fn nearest_index(camera_x: f32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let raw = (camera_x / CORRIDOR_SPACING).round();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    }
}

pub fn slot_x(index: usize) -> f32 {
    index as f32 * CORRIDOR_SPACING
}

#[derive(Clone, Copy, Debug)]
struct Press {
    origin: Vec2,
    camera_x: f32,
    rotation: InspectRotation,
    moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Corridor {
    state: CorridorState,
    memories: Vec<PhotoMemory>,
    press: Option<Press>,
    snap: Option<Tween<f32>>,
}

impl Corridor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CorridorState {
        &self.state
    }

    pub fn memories(&self) -> &[PhotoMemory] {
        &self.memories
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn focused(&self) -> Option<&PhotoMemory> {
        self.memories.get(self.state.focus_index)
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }

    pub fn max_camera_x(&self) -> f32 {
        slot_x(self.memories.len().saturating_sub(1))
    }

    pub fn view(&self) -> CorridorView {
        let inspecting = self.state.mode == CorridorMode::Inspect;
        CorridorView {
            camera_x: self.state.camera_x,
            look_x: if inspecting {
                slot_x(self.state.focus_index)
            } else {
                self.state.camera_x
            },
            inspecting,
        }
    }

    /// Fresh entry: newest-first memories, offset at the first slot, browse mode.
    pub fn enter(&mut self, mut memories: Vec<PhotoMemory>) {
        crate::memory::sort_newest_first(&mut memories);
        log::info!("[corridor] enter with {} memories", memories.len());
        self.memories = memories;
        self.state = CorridorState::default();
        self.press = None;
        self.snap = None;
    }

    pub fn leave(&mut self) {
        self.press = None;
        self.snap = None;
        self.state.is_dragging = false;
        self.state.mode = CorridorMode::Corridor;
    }

    /// Recompute focus from the camera offset. Only writes on change.
    pub fn refocus(&mut self) -> bool {
        if self.state.mode != CorridorMode::Corridor {
            return false;
        }
        let nearest = nearest_index(self.state.camera_x, self.memories.len());
        if nearest == self.state.focus_index {
            return false;
        }
        self.state.focus_index = nearest;
        true
    }

    pub fn pointer_down(&mut self, at: Vec2) {
        self.press = Some(Press {
            origin: at,
            camera_x: self.state.camera_x,
            rotation: self.state.inspect_rotation,
            moved: false,
        });
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        let delta = at - press.origin;
        if !press.moved && delta.length() < DRAG_THRESHOLD_PX {
            return;
        }
        if !press.moved {
            press.moved = true;
            self.snap = None;
            self.state.is_dragging = true;
        }
        let press = *press;
        match self.state.mode {
            CorridorMode::Corridor => {
                let x = press.camera_x - delta.x * DRAG_OFFSET_PER_PX;
                self.state.camera_x = x.clamp(0.0, self.max_camera_x());
                self.refocus();
            }
            CorridorMode::Inspect => {
                self.state.inspect_rotation = InspectRotation {
                    x: press.rotation.x - delta.y * INSPECT_PITCH_PER_PX,
                    y: press.rotation.y + delta.x * INSPECT_YAW_PER_PX,
                };
            }
        }
    }

    /// End a press. A real drag in browse mode snaps to the nearest slot.
    pub fn pointer_up(&mut self, now_sec: f64) -> Release {
        let Some(press) = self.press.take() else {
            return Release::Ignored;
        };
        self.state.is_dragging = false;
        if !press.moved {
            return Release::Click;
        }
        if self.state.mode == CorridorMode::Corridor && !self.memories.is_empty() {
            self.snap_to(nearest_index(self.state.camera_x, self.memories.len()), now_sec);
        }
        Release::Drag
    }

    /// Click on a memory. Only the focused memory can be inspected.
    pub fn click(&mut self, index: usize) -> bool {
        if self.state.mode != CorridorMode::Corridor
            || self.memories.is_empty()
            || index != self.state.focus_index
        {
            return false;
        }
        log::info!("[corridor] inspect {}", index);
        self.snap = None;
        self.state.mode = CorridorMode::Inspect;
        self.state.inspect_rotation = InspectRotation::default();
        true
    }

    pub fn cancel_inspect(&mut self) -> bool {
        if self.state.mode != CorridorMode::Inspect {
            return false;
        }
        log::info!("[corridor] back to browse");
        self.state.mode = CorridorMode::Corridor;
        true
    }

    /// Move focus by `delta` slots and snap there.
    pub fn step(&mut self, delta: i32, now_sec: f64) -> bool {
        if self.state.mode != CorridorMode::Corridor || self.memories.is_empty() {
            return false;
        }
        let last = self.memories.len() as i64 - 1;
        let target = (self.state.focus_index as i64 + delta as i64).clamp(0, last) as usize;
        if target == self.state.focus_index && !self.is_snapping() {
            return false;
        }
        self.snap_to(target, now_sec);
        true
    }

    /// Animate the offset to `index`'s slot. Focus updates immediately.
    pub fn snap_to(&mut self, index: usize, now_sec: f64) {
        let index = index.min(self.memories.len().saturating_sub(1));
        self.state.focus_index = index;
        self.snap = Some(Tween::new(
            self.state.camera_x,
            slot_x(index),
            now_sec,
            SNAP_DURATION_SEC,
            Ease::Power2Out,
        ));
    }

    /// Advance any running snap. Focus is not recomputed while snapping.
    pub fn tick(&mut self, now_sec: f64) {
        if let Some(snap) = self.snap {
            self.state.camera_x = snap.sample(now_sec);
            if snap.is_finished(now_sec) {
                self.snap = None;
            }
            return;
        }
        if !self.state.is_dragging {
            self.refocus();
        }
    }

    /// Remove a memory by id, keeping focus in range.
    pub fn remove(&mut self, id: &str) -> Option<PhotoMemory> {
        let pos = self.memories.iter().position(|m| m.id == id)?;
        let removed = self.memories.remove(pos);
        let was_focused = pos == self.state.focus_index;
        if pos < self.state.focus_index {
            self.state.focus_index -= 1;
        }
        let count = self.memories.len();
        if count == 0 {
            self.state.focus_index = 0;
            self.state.mode = CorridorMode::Corridor;
        } else {
            self.state.focus_index = self.state.focus_index.min(count - 1);
            if was_focused {
                self.state.mode = CorridorMode::Corridor;
            }
        }
        self.snap = None;
        self.state.camera_x = slot_x(self.state.focus_index);
        log::info!(
            "[corridor] removed {} ({} left, focus {})",
            id,
            count,
            self.state.focus_index
        );
        Some(removed)
    }
}
