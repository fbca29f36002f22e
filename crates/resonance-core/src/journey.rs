//! Application root: owns the store and every subsystem it coordinates.
//!
//! User intents come in as method calls, a render tick comes in as
//! [`Journey::frame`], and changes the front-end must mirror come out as
//! [`JourneyEvent`]s.

use crate::camera::{CameraPose, CameraRig};
use crate::catalog::find_landmark;
use crate::choreography::{Choreographer, ChoreoError, Choreography, Edge, Outcome, Stage};
use crate::constants::MAX_FRAME_DT_SEC;
use crate::corridor::{Corridor, Release};
use crate::curtain::Curtain;
use crate::memory::MemorySource;
use crate::mount::{MountChange, MountGate, SceneId};
use crate::phase::{Element, Phase};
use crate::scripts::{self, INJECT_MARK};
use crate::store::{Action, Snapshot, StateStore, StoreObserver, SubscriptionId, TransitionError};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum JourneyEvent {
    PhaseChanged { from: Phase, to: Phase },
    Mount(MountChange),
    /// The persistence collaborator should forget this memory.
    MemoryDeleted(String),
}

struct RigStage<'a> {
    rig: &'a mut CameraRig,
    curtain: &'a mut Curtain,
}

impl Stage for RigStage<'_> {
    fn camera_pose(&self) -> CameraPose {
        self.rig.pose()
    }

    fn drive_camera(&mut self, edge: Edge, pose: CameraPose) {
        self.rig.drive(edge, pose);
    }

    fn curtain(&mut self) -> &mut Curtain {
        &mut *self.curtain
    }
}

pub struct Journey {
    store: StateStore,
    choreo: Choreographer,
    rig: CameraRig,
    gate: MountGate,
    curtain: Curtain,
    corridor: Corridor,
    memories: Box<dyn MemorySource>,
    pointer: Vec2,
    clock_sec: f64,
    events: Vec<JourneyEvent>,
}

impl Journey {
    pub fn new(memories: Box<dyn MemorySource>) -> Self {
        let store = StateStore::new();
        let phase = store.phase();
        Self {
            store,
            choreo: Choreographer::new(),
            rig: CameraRig::new(phase),
            gate: MountGate::new(phase),
            curtain: Curtain::default(),
            corridor: Corridor::new(),
            memories,
            pointer: Vec2::ZERO,
            clock_sec: 0.0,
            events: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.store.phase()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn camera(&self) -> &CameraRig {
        &self.rig
    }

    pub fn curtain(&self) -> &Curtain {
        &self.curtain
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreo
    }

    pub fn mounted_scene(&self) -> Option<SceneId> {
        self.gate.mounted()
    }

    /// Progress of a named step, for scene-local animation in the renderer.
    pub fn progress(&self, edge: Edge, step: &str) -> Option<f32> {
        self.choreo.progress(edge, step)
    }

    pub fn back_available(&self) -> bool {
        Action::back_from(self.phase()).is_some()
    }

    pub fn drain_events(&mut self) -> Vec<JourneyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pointer position normalised to \[-1, 1\] with +y up.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    pub fn set_mic_ready(&mut self, ready: bool) {
        self.store.set_mic_ready(ready);
    }

    // ---------------- Intents ----------------

    pub fn click_portal(&mut self) -> Result<Phase, TransitionError> {
        self.apply(Action::StartJourney)
    }

    /// Earth marker on the emitter hub: plays the injection, then selection.
    pub fn activate_marker(&mut self) -> Result<(), ChoreoError> {
        if self.phase() != Phase::Emitter {
            log::debug!("[journey] marker ignored in {}", self.phase());
            return Ok(());
        }
        self.launch(scripts::injection())
    }

    pub fn choose_element(&mut self, element: Element) -> Result<(), ChoreoError> {
        if self.phase() != Phase::Selection {
            log::debug!("[journey] element {} ignored in {}", element, self.phase());
            return Ok(());
        }
        self.launch(scripts::element_dive(element))
    }

    /// Open the photo choice for an active landmark of the current element.
    pub fn choose_landmark(&mut self, id: &str) -> Result<(), TransitionError> {
        let phase = self.phase();
        let entry = self
            .store
            .context()
            .element
            .and_then(|el| find_landmark(el, id))
            .filter(|l| l.active);
        match entry {
            Some(entry) => self.store.open_photo_choice(entry.landmark()),
            None => {
                log::debug!("[journey] landmark {} unavailable in {}", id, phase);
                Err(TransitionError::NotPermitted {
                    action: "openPhotoChoice",
                    phase,
                })
            }
        }
    }

    /// Confirm the open photo choice, optionally with a photo, and start tuning.
    pub fn confirm_photo(&mut self, photo_url: Option<String>) -> Result<Phase, TransitionError> {
        let landmark = self
            .store
            .flags()
            .photo_choice
            .clone()
            .ok_or(TransitionError::NoPhotoChoice)?;
        if let Some(url) = photo_url {
            self.store.attach_photo(url)?;
        }
        self.apply(Action::StartTuning(landmark))
    }

    pub fn dismiss_photo_choice(&mut self) {
        self.store.close_photo_choice();
    }

    pub fn enter_time_corridor(&mut self) -> Result<Phase, TransitionError> {
        self.apply(Action::EnterTimeTravel)
    }

    /// Go back one level. In-flight choreographies are cancelled and the
    /// camera lands on the target phase's resting pose.
    pub fn back(&mut self) -> Result<Phase, TransitionError> {
        let phase = self.phase();
        let Some(action) = Action::back_from(phase) else {
            log::debug!("[journey] no back from {}", phase);
            return Err(TransitionError::NotPermitted {
                action: "back",
                phase,
            });
        };
        self.settle_for(action.target());
        self.apply(action)
    }

    /// Full reset to the portal. Every field returns to its start value.
    pub fn reset(&mut self) {
        let from = self.phase();
        self.settle_for(Phase::Entry);
        self.curtain = Curtain::default();
        self.corridor = Corridor::new();
        self.store.reset();
        self.after_phase_change(from, Phase::Entry);
    }

    // ---------------- Corridor intents ----------------

    pub fn corridor_pointer_down(&mut self, px: Vec2) {
        if self.phase() == Phase::TimeCorridor {
            self.corridor.pointer_down(px);
        }
    }

    pub fn corridor_pointer_move(&mut self, px: Vec2) {
        if self.phase() == Phase::TimeCorridor {
            self.corridor.pointer_move(px);
        }
    }

    pub fn corridor_pointer_up(&mut self) -> Release {
        if self.phase() != Phase::TimeCorridor {
            return Release::Ignored;
        }
        self.corridor.pointer_up(self.clock_sec)
    }

    pub fn corridor_click(&mut self, index: usize) -> bool {
        self.phase() == Phase::TimeCorridor && self.corridor.click(index)
    }

    pub fn corridor_cancel(&mut self) -> bool {
        self.phase() == Phase::TimeCorridor && self.corridor.cancel_inspect()
    }

    pub fn corridor_step(&mut self, delta: i32) -> bool {
        self.phase() == Phase::TimeCorridor && self.corridor.step(delta, self.clock_sec)
    }

    pub fn delete_memory(&mut self, id: &str) -> bool {
        if self.phase() != Phase::TimeCorridor {
            return false;
        }
        match self.corridor.remove(id) {
            Some(m) => {
                self.events.push(JourneyEvent::MemoryDeleted(m.id));
                true
            }
            None => false,
        }
    }

    // ---------------- Frame ----------------

    /// Advance one render tick at wall-clock `now_sec`.
    pub fn frame(&mut self, now_sec: f64) {
        let dt = (now_sec - self.clock_sec).clamp(0.0, MAX_FRAME_DT_SEC) as f32;
        self.clock_sec = now_sec.max(self.clock_sec);

        let outcomes = {
            let mut stage = RigStage {
                rig: &mut self.rig,
                curtain: &mut self.curtain,
            };
            self.choreo.tick(self.clock_sec, &mut stage)
        };
        for outcome in outcomes {
            self.handle_outcome(outcome);
        }

        let phase = self.phase();
        if phase == Phase::TimeCorridor {
            self.corridor.tick(self.clock_sec);
            self.rig.follow(self.corridor.view(), dt);
        } else {
            self.rig.update_idle(phase, self.pointer, dt);
        }
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Marked { edge, step } => {
                if edge == Edge::Injection && step == INJECT_MARK {
                    if let Err(e) = self.store.start_injection() {
                        log::debug!("[journey] {}", e);
                    }
                }
            }
            Outcome::Completed { edge, action } => {
                self.rig.release(edge, self.phase());
                if let Some(action) = action {
                    if let Err(e) = self.apply(action) {
                        log::warn!("[journey] completion of {:?} dropped: {}", edge, e);
                    }
                }
                if let Some(next) = scripts::follow_up(edge) {
                    if let Err(e) = self.launch(next) {
                        log::debug!("[journey] follow-up of {:?}: {}", edge, e);
                    }
                }
            }
        }
    }

    /// Start a choreography, claiming the camera first if it needs it.
    fn launch(&mut self, choreo: Choreography) -> Result<(), ChoreoError> {
        let edge = choreo.edge;
        if self.choreo.is_in_flight(edge) {
            log::debug!("[journey] {:?} already in flight", edge);
            return Err(ChoreoError::InFlight(edge));
        }
        let needs_camera = choreo.drives_camera();
        if needs_camera {
            self.rig.claim(edge)?;
        }
        if let Err(e) = self.choreo.begin(choreo, self.clock_sec) {
            if needs_camera {
                self.rig.release(edge, self.phase());
            }
            return Err(e);
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<Phase, TransitionError> {
        let from = self.phase();
        let to = self.store.dispatch(action)?;
        self.after_phase_change(from, to);
        Ok(to)
    }

    /// Cancel everything in flight and land deterministically on `target`'s
    /// resting state before a backwards jump.
    fn settle_for(&mut self, target: Phase) {
        let cancelled = self.choreo.cancel_all();
        if !cancelled.is_empty() {
            log::info!("[journey] cancelled {:?} for {}", cancelled, target);
        }
        self.curtain.clear();
        self.rig.force_place(target);
    }

    fn after_phase_change(&mut self, from: Phase, to: Phase) {
        if from != to {
            for edge in self.choreo.cancel_orphaned(to) {
                log::info!("[journey] {:?} cannot complete from {}, cancelled", edge, to);
                self.rig.release(edge, to);
            }
        }
        if from == Phase::TimeCorridor && to != Phase::TimeCorridor {
            self.corridor.leave();
        }
        if from == Phase::Tuning {
            self.curtain.lines.clear();
        }
        if let Some(change) = self.gate.sync(to) {
            self.rig.place(to);
            self.events.push(JourneyEvent::Mount(change));
        }
        if to == Phase::TimeCorridor && from != Phase::TimeCorridor {
            self.corridor.enter(self.memories.load());
        }
        if from != to {
            self.events.push(JourneyEvent::PhaseChanged { from, to });
        }
        if let Some(choreo) = scripts::for_phase_entry(self.store.snapshot()) {
            if let Err(e) = self.launch(choreo) {
                log::debug!("[journey] entry script for {}: {}", to, e);
            }
        }
    }
}
