//! Which scene subtree is mounted for each phase.
//!
//! At most one scene is mounted at a time. Tuning mounts nothing so the
//! overlay carries the moment on its own.

use crate::phase::Phase;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneId {
    PortalEntry,
    EmitterHub,
    SelectionRing,
    ShardField,
    ResonanceWorld,
    TimeCorridor,
}

impl SceneId {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneId::PortalEntry => "PortalEntry",
            SceneId::EmitterHub => "EmitterHub",
            SceneId::SelectionRing => "SelectionRing",
            SceneId::ShardField => "ShardField",
            SceneId::ResonanceWorld => "ResonanceWorld",
            SceneId::TimeCorridor => "TimeCorridor",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn scene_for_phase(phase: Phase) -> Option<SceneId> {
    match phase {
        Phase::Entry | Phase::Transition => Some(SceneId::PortalEntry),
        Phase::Emitter => Some(SceneId::EmitterHub),
        Phase::Selection => Some(SceneId::SelectionRing),
        Phase::Shards => Some(SceneId::ShardField),
        Phase::Tuning => None,
        Phase::Resonance => Some(SceneId::ResonanceWorld),
        Phase::TimeCorridor => Some(SceneId::TimeCorridor),
    }
}

/// A swap the rendering layer must perform: tear down `unmount` fully
/// before constructing `mount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountChange {
    pub unmount: Option<SceneId>,
    pub mount: Option<SceneId>,
}

#[derive(Clone, Debug)]
pub struct MountGate {
    mounted: Option<SceneId>,
}

impl MountGate {
    pub fn new(phase: Phase) -> Self {
        Self {
            mounted: scene_for_phase(phase),
        }
    }

    pub fn mounted(&self) -> Option<SceneId> {
        self.mounted
    }

    /// Align with `phase`. Returns the swap to perform, if any.
    pub fn sync(&mut self, phase: Phase) -> Option<MountChange> {
        let next = scene_for_phase(phase);
        if next == self.mounted {
            return None;
        }
        let change = MountChange {
            unmount: self.mounted,
            mount: next,
        };
        log::info!(
            "[mount] {} -> {}",
            change.unmount.map_or("none", SceneId::as_str),
            change.mount.map_or("none", SceneId::as_str)
        );
        self.mounted = next;
        Some(change)
    }
}
