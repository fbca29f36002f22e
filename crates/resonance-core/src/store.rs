//! Single source of truth for where the user is in the journey.
//!
//! The store is explicitly constructed and owned by the application root.
//! Every mutation goes through a named action; an action invoked from a phase
//! that does not permit it is rejected with [`TransitionError`] and leaves the
//! state and subscribers untouched.

use crate::phase::{Element, Landmark, Phase, SelectionContext};
use thiserror::Error;

/// Named phase transitions. See [`Action::permitted_from`] for the edge table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    StartJourney,
    CompleteTransition,
    EnterSelection,
    SelectElement(Element),
    StartTuning(Landmark),
    EnterWorld,
    EnterTimeTravel,
    BackToEntry,
    BackToEmitter,
    BackToSelection,
    BackToShards,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartJourney => "startJourney",
            Action::CompleteTransition => "completeTransition",
            Action::EnterSelection => "enterSelection",
            Action::SelectElement(_) => "selectElement",
            Action::StartTuning(_) => "startTuning",
            Action::EnterWorld => "enterWorld",
            Action::EnterTimeTravel => "enterTimeTravel",
            Action::BackToEntry => "backToEntry",
            Action::BackToEmitter => "backToEmitter",
            Action::BackToSelection => "backToSelection",
            Action::BackToShards => "backToShards",
        }
    }

    pub fn permitted_from(&self) -> &'static [Phase] {
        match self {
            Action::StartJourney => &[Phase::Entry],
            Action::CompleteTransition => &[Phase::Transition],
            Action::EnterSelection => &[Phase::Emitter],
            Action::SelectElement(_) => &[Phase::Selection],
            Action::StartTuning(_) => &[Phase::Shards],
            Action::EnterWorld => &[Phase::Tuning],
            Action::EnterTimeTravel => &[Phase::Emitter],
            Action::BackToEntry => &[Phase::Emitter],
            Action::BackToEmitter => &[
                Phase::Selection,
                Phase::Shards,
                Phase::Tuning,
                Phase::Resonance,
                Phase::TimeCorridor,
            ],
            Action::BackToSelection => &[Phase::Shards],
            Action::BackToShards => &[Phase::Resonance],
        }
    }

    pub fn target(&self) -> Phase {
        match self {
            Action::StartJourney => Phase::Transition,
            Action::CompleteTransition => Phase::Emitter,
            Action::EnterSelection => Phase::Selection,
            Action::SelectElement(_) => Phase::Shards,
            Action::StartTuning(_) => Phase::Tuning,
            Action::EnterWorld => Phase::Resonance,
            Action::EnterTimeTravel => Phase::TimeCorridor,
            Action::BackToEntry => Phase::Entry,
            Action::BackToEmitter => Phase::Emitter,
            Action::BackToSelection => Phase::Selection,
            Action::BackToShards => Phase::Shards,
        }
    }

    /// The "back" action available from `phase`, if the phase offers one.
    pub fn back_from(phase: Phase) -> Option<Action> {
        match phase {
            Phase::Emitter => Some(Action::BackToEntry),
            Phase::Selection | Phase::TimeCorridor => Some(Action::BackToEmitter),
            Phase::Shards => Some(Action::BackToSelection),
            Phase::Resonance => Some(Action::BackToShards),
            Phase::Entry | Phase::Transition | Phase::Tuning => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{action} is not permitted from phase {phase}")]
    NotPermitted { action: &'static str, phase: Phase },
    #[error("no photo choice is open")]
    NoPhotoChoice,
}

/// Non-phase UI state carried alongside the phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiFlags {
    pub mic_ready: bool,
    pub injecting: bool,
    /// Landmark whose photo-choice panel is open (shards only).
    pub photo_choice: Option<Landmark>,
    /// Photo attached to the current tuning, if the user supplied one.
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub context: SelectionContext,
    pub flags: UiFlags,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Entry,
            context: SelectionContext::default(),
            flags: UiFlags::default(),
        }
    }
}

/// Receives every accepted mutation synchronously, before the next frame.
pub trait StoreObserver {
    fn state_changed(&mut self, previous: Phase, snapshot: &Snapshot);
}

impl<F> StoreObserver for F
where
    F: FnMut(Phase, &Snapshot),
{
    fn state_changed(&mut self, previous: Phase, snapshot: &Snapshot) {
        self(previous, snapshot)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct StateStore {
    state: Snapshot,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_id: u64,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            state: Snapshot::default(),
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn context(&self) -> &SelectionContext {
        &self.state.context
    }

    pub fn flags(&self) -> &UiFlags {
        &self.state.flags
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Apply a phase action. Returns the new phase on success.
    pub fn dispatch(&mut self, action: Action) -> Result<Phase, TransitionError> {
        let from = self.state.phase;
        if !action.permitted_from().contains(&from) {
            log::debug!("[store] rejected {} from {}", action.name(), from);
            return Err(TransitionError::NotPermitted {
                action: action.name(),
                phase: from,
            });
        }
        let to = action.target();
        let ctx = &mut self.state.context;
        let flags = &mut self.state.flags;
        match &action {
            Action::SelectElement(el) => ctx.element = Some(*el),
            Action::StartTuning(landmark) => {
                ctx.landmark = Some(landmark.clone());
                flags.photo_choice = None;
            }
            Action::BackToEntry => {
                ctx.element = None;
                flags.injecting = false;
            }
            Action::BackToEmitter => {
                ctx.element = None;
                ctx.landmark = None;
                flags.injecting = false;
                flags.photo_choice = None;
                flags.photo_url = None;
            }
            Action::BackToSelection => {
                ctx.landmark = None;
                flags.photo_choice = None;
                flags.photo_url = None;
            }
            Action::BackToShards => {
                ctx.landmark = None;
                flags.photo_url = None;
            }
            Action::StartJourney
            | Action::CompleteTransition
            | Action::EnterSelection
            | Action::EnterWorld
            | Action::EnterTimeTravel => {}
        }
        self.state.phase = to;
        debug_assert!(self.state.context.is_consistent());
        log::info!("[store] {} : {} -> {}", action.name(), from, to);
        self.notify(from);
        Ok(to)
    }

    pub fn start_journey(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::StartJourney)
    }

    pub fn complete_transition(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::CompleteTransition)
    }

    pub fn enter_selection(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::EnterSelection)
    }

    pub fn select_element(&mut self, element: Element) -> Result<Phase, TransitionError> {
        self.dispatch(Action::SelectElement(element))
    }

    pub fn start_tuning(&mut self, landmark: Landmark) -> Result<Phase, TransitionError> {
        self.dispatch(Action::StartTuning(landmark))
    }

    pub fn enter_world(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::EnterWorld)
    }

    pub fn enter_time_travel(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::EnterTimeTravel)
    }

    pub fn back_to_entry(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::BackToEntry)
    }

    pub fn back_to_emitter(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::BackToEmitter)
    }

    pub fn back_to_selection(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::BackToSelection)
    }

    pub fn back_to_shards(&mut self) -> Result<Phase, TransitionError> {
        self.dispatch(Action::BackToShards)
    }

    pub fn set_mic_ready(&mut self, ready: bool) {
        if self.state.flags.mic_ready != ready {
            self.state.flags.mic_ready = ready;
            self.notify(self.state.phase);
        }
    }

    pub fn start_injection(&mut self) -> Result<(), TransitionError> {
        self.require(Phase::Emitter, "startInjection")?;
        self.state.flags.injecting = true;
        self.notify(self.state.phase);
        Ok(())
    }

    pub fn open_photo_choice(&mut self, landmark: Landmark) -> Result<(), TransitionError> {
        self.require(Phase::Shards, "openPhotoChoice")?;
        self.state.flags.photo_choice = Some(landmark);
        self.state.flags.photo_url = None;
        self.notify(self.state.phase);
        Ok(())
    }

    pub fn close_photo_choice(&mut self) {
        if self.state.flags.photo_choice.take().is_some() {
            self.notify(self.state.phase);
        }
    }

    pub fn attach_photo(&mut self, url: String) -> Result<(), TransitionError> {
        if self.state.flags.photo_choice.is_none() {
            return Err(TransitionError::NoPhotoChoice);
        }
        self.state.flags.photo_url = Some(url);
        self.notify(self.state.phase);
        Ok(())
    }

    /// Re-initialise every field to its start value. Subscriptions survive.
    pub fn reset(&mut self) {
        let from = self.state.phase;
        self.state = Snapshot::default();
        log::info!("[store] reset from {}", from);
        self.notify(from);
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), TransitionError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            log::debug!("[store] rejected {} from {}", action, self.state.phase);
            Err(TransitionError::NotPermitted {
                action,
                phase: self.state.phase,
            })
        }
    }

    fn notify(&mut self, previous: Phase) {
        for (_, observer) in &mut self.observers {
            observer.state_changed(previous, &self.state);
        }
    }
}
