//! Timed, multi-step sequences bound to phase edges.
//!
//! A [`Choreography`] is a list of [`Step`]s, each starting at an offset from
//! the choreography start and running for a fixed duration with an easing
//! curve. Steps may overlap. Steps flagged as gating form the completion
//! barrier: the completion action fires once, after every gating step has
//! finished, never on the first step to end.
//!
//! The [`Choreographer`] keeps at most one live flight per [`Edge`]. A second
//! `begin` for an edge already in flight is rejected. Everything is sampled
//! from wall-clock seconds so durations do not depend on frame rate.

use crate::camera::CameraPose;
use crate::curtain::{Curtain, Rgb};
use crate::easing::Ease;
use crate::phase::Phase;
use crate::store::Action;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use thiserror::Error;

/// Logical transition slot. One live flight per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    PortalRush,
    EmitterReveal,
    Injection,
    SelectionReveal,
    ElementDive,
    ShardsReveal,
    TuningSequence,
    ResonanceIntro,
    CorridorSideStep,
    CorridorReveal,
}

impl Edge {
    pub const ALL: [Edge; 10] = [
        Edge::PortalRush,
        Edge::EmitterReveal,
        Edge::Injection,
        Edge::SelectionReveal,
        Edge::ElementDive,
        Edge::ShardsReveal,
        Edge::TuningSequence,
        Edge::ResonanceIntro,
        Edge::CorridorSideStep,
        Edge::CorridorReveal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::PortalRush => "portalRush",
            Edge::EmitterReveal => "emitterReveal",
            Edge::Injection => "injection",
            Edge::SelectionReveal => "selectionReveal",
            Edge::ElementDive => "elementDive",
            Edge::ShardsReveal => "shardsReveal",
            Edge::TuningSequence => "tuningSequence",
            Edge::ResonanceIntro => "resonanceIntro",
            Edge::CorridorSideStep => "corridorSideStep",
            Edge::CorridorReveal => "corridorReveal",
        }
    }

    pub fn parse(s: &str) -> Option<Edge> {
        Edge::ALL.into_iter().find(|e| e.as_str() == s)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoreoError {
    #[error("{0:?} is already in flight")]
    InFlight(Edge),
    #[error("{edge:?} needs the camera but {holder:?} holds it")]
    CameraBusy { edge: Edge, holder: Edge },
}

/// Per-axis camera target; unset axes keep the value the step started from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Axes {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl Axes {
    pub fn z(z: f32) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    pub fn xyz(v: Vec3) -> Self {
        Self {
            x: Some(v.x),
            y: Some(v.y),
            z: Some(v.z),
        }
    }

    pub fn resolve(&self, from: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(from.x),
            self.y.unwrap_or(from.y),
            self.z.unwrap_or(from.z),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    /// Tween the camera eye.
    Eye(Axes),
    /// Tween the camera look-at target.
    LookAt(Vec3),
    /// Set the whole pose at step start.
    Place(CameraPose),
    /// Tween curtain opacity.
    Fade(f32),
    Tint(Rgb),
    /// Append a typewriter line.
    Line(String),
    Message(Option<String>),
    /// Report reaching this step's start to the owner.
    Mark,
    /// Progress only; polled by the rendering layer.
    Signal,
}

impl Cue {
    fn is_camera(&self) -> bool {
        matches!(self, Cue::Eye(_) | Cue::LookAt(_) | Cue::Place(_))
    }

    fn is_instant(&self) -> bool {
        matches!(
            self,
            Cue::Place(_) | Cue::Tint(_) | Cue::Line(_) | Cue::Message(_) | Cue::Mark
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub name: &'static str,
    pub at_sec: f64,
    pub duration_sec: f64,
    pub ease: Ease,
    pub cue: Cue,
    pub gates: bool,
}

impl Step {
    pub fn new(name: &'static str, cue: Cue) -> Self {
        Self {
            name,
            at_sec: 0.0,
            duration_sec: 0.0,
            ease: Ease::Linear,
            cue,
            gates: false,
        }
    }

    pub fn at(mut self, at_sec: f64) -> Self {
        self.at_sec = at_sec;
        self
    }

    pub fn over(mut self, duration_sec: f64, ease: Ease) -> Self {
        self.duration_sec = duration_sec;
        self.ease = ease;
        self
    }

    pub fn gating(mut self) -> Self {
        self.gates = true;
        self
    }

    pub fn end_sec(&self) -> f64 {
        self.at_sec + self.duration_sec.max(0.0)
    }

    fn progress(&self, elapsed: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        ((elapsed - self.at_sec) / self.duration_sec).clamp(0.0, 1.0) as f32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Choreography {
    pub edge: Edge,
    pub steps: SmallVec<[Step; 8]>,
    pub completion: Option<Action>,
}

impl Choreography {
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            steps: SmallVec::new(),
            completion: None,
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn completes_with(mut self, action: Action) -> Self {
        self.completion = Some(action);
        self
    }

    pub fn drives_camera(&self) -> bool {
        self.steps.iter().any(|s| s.cue.is_camera())
    }

    /// Time at which the completion barrier opens. With no gating steps the
    /// last step to end gates.
    pub fn gate_sec(&self) -> f64 {
        let gating = self
            .steps
            .iter()
            .filter(|s| s.gates)
            .map(Step::end_sec)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))));
        gating.unwrap_or_else(|| self.duration_sec())
    }

    pub fn duration_sec(&self) -> f64 {
        self.steps.iter().map(Step::end_sec).fold(0.0, f64::max)
    }

    fn gates_on(&self, index: usize) -> bool {
        let any_gating = self.steps.iter().any(|s| s.gates);
        !any_gating || self.steps[index].gates
    }
}

/// What a running choreography writes to. Implemented by the journey over
/// its camera rig and curtain.
pub trait Stage {
    fn camera_pose(&self) -> CameraPose;
    fn drive_camera(&mut self, edge: Edge, pose: CameraPose);
    fn curtain(&mut self) -> &mut Curtain;
}

/// Side effects the owner must apply after a tick, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Marked { edge: Edge, step: &'static str },
    Completed { edge: Edge, action: Option<Action> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StepState {
    Pending,
    Running { from_pose: CameraPose, from_opacity: f32 },
    Done,
}

#[derive(Debug)]
struct Flight {
    choreo: Choreography,
    started_sec: f64,
    states: SmallVec<[StepState; 8]>,
}

impl Flight {
    fn gate_open(&self) -> bool {
        self.states
            .iter()
            .enumerate()
            .all(|(i, s)| !self.choreo.gates_on(i) || *s == StepState::Done)
    }
}

#[derive(Debug, Default)]
pub struct Choreographer {
    flights: FnvHashMap<Edge, Flight>,
    clock_sec: f64,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self, edge: Edge) -> bool {
        self.flights.contains_key(&edge)
    }

    pub fn in_flight(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.flights.keys().copied().collect();
        edges.sort();
        edges
    }

    pub fn begin(&mut self, choreo: Choreography, now_sec: f64) -> Result<(), ChoreoError> {
        let edge = choreo.edge;
        if self.flights.contains_key(&edge) {
            log::debug!("[choreo] {:?} rejected, already in flight", edge);
            return Err(ChoreoError::InFlight(edge));
        }
        log::info!(
            "[choreo] begin {:?} steps={} gate={:.2}s",
            edge,
            choreo.steps.len(),
            choreo.gate_sec()
        );
        let states = choreo.steps.iter().map(|_| StepState::Pending).collect();
        self.flights.insert(
            edge,
            Flight {
                choreo,
                started_sec: now_sec,
                states,
            },
        );
        self.clock_sec = self.clock_sec.max(now_sec);
        Ok(())
    }

    /// Stop a flight where it is. No completion action fires.
    pub fn cancel(&mut self, edge: Edge) -> bool {
        let removed = self.flights.remove(&edge).is_some();
        if removed {
            log::info!("[choreo] cancel {:?}", edge);
        }
        removed
    }

    pub fn cancel_all(&mut self) -> Vec<Edge> {
        let edges = self.in_flight();
        for edge in &edges {
            self.cancel(*edge);
        }
        edges
    }

    /// Cancel flights whose completion action is no longer permitted from
    /// `phase`. Returns the cancelled edges.
    pub fn cancel_orphaned(&mut self, phase: Phase) -> Vec<Edge> {
        let orphaned: Vec<Edge> = self
            .in_flight()
            .into_iter()
            .filter(|edge| {
                self.flights
                    .get(edge)
                    .and_then(|f| f.choreo.completion.as_ref())
                    .is_some_and(|action| !action.permitted_from().contains(&phase))
            })
            .collect();
        for edge in &orphaned {
            self.cancel(*edge);
        }
        orphaned
    }

    /// Linear progress of a named step as of the last tick.
    pub fn progress(&self, edge: Edge, step: &str) -> Option<f32> {
        let flight = self.flights.get(&edge)?;
        let s = flight.choreo.steps.iter().find(|s| s.name == step)?;
        Some(s.progress(self.clock_sec - flight.started_sec))
    }

    /// Advance every flight to `now_sec`.
    pub fn tick(&mut self, now_sec: f64, stage: &mut dyn Stage) -> Vec<Outcome> {
        self.clock_sec = now_sec;
        let mut out = Vec::new();
        for edge in self.in_flight() {
            let Some(flight) = self.flights.get_mut(&edge) else {
                continue;
            };
            let elapsed = now_sec - flight.started_sec;
            for i in 0..flight.states.len() {
                advance_step(flight, i, elapsed, false, stage, &mut out);
            }
            if flight.gate_open() {
                for i in 0..flight.states.len() {
                    advance_step(flight, i, elapsed, true, stage, &mut out);
                }
                let action = flight.choreo.completion.clone();
                self.flights.remove(&edge);
                log::info!("[choreo] complete {:?} at {:.2}s", edge, elapsed);
                out.push(Outcome::Completed { edge, action });
            }
        }
        out
    }
}

fn advance_step(
    flight: &mut Flight,
    i: usize,
    elapsed: f64,
    settle: bool,
    stage: &mut dyn Stage,
    out: &mut Vec<Outcome>,
) {
    let edge = flight.choreo.edge;
    let step = &flight.choreo.steps[i];
    if flight.states[i] == StepState::Pending {
        if !settle && elapsed < step.at_sec {
            return;
        }
        let from_pose = stage.camera_pose();
        let from_opacity = stage.curtain().opacity;
        if step.cue.is_instant() {
            apply_instant(edge, step, stage, out);
            flight.states[i] = StepState::Done;
            return;
        }
        flight.states[i] = StepState::Running {
            from_pose,
            from_opacity,
        };
    }
    if let StepState::Running {
        from_pose,
        from_opacity,
    } = flight.states[i]
    {
        let t = if settle { 1.0 } else { step.progress(elapsed) };
        let e = step.ease.apply(t);
        match &step.cue {
            Cue::Eye(axes) => {
                let mut pose = stage.camera_pose();
                pose.eye = from_pose.eye.lerp(axes.resolve(from_pose.eye), e);
                stage.drive_camera(edge, pose);
            }
            Cue::LookAt(target) => {
                let mut pose = stage.camera_pose();
                pose.look_at = from_pose.look_at.lerp(*target, e);
                stage.drive_camera(edge, pose);
            }
            Cue::Fade(to) => {
                stage.curtain().opacity = from_opacity + (to - from_opacity) * e;
            }
            _ => {}
        }
        if t >= 1.0 {
            flight.states[i] = StepState::Done;
        }
    }
}

fn apply_instant(edge: Edge, step: &Step, stage: &mut dyn Stage, out: &mut Vec<Outcome>) {
    match &step.cue {
        Cue::Place(pose) => stage.drive_camera(edge, *pose),
        Cue::Tint(color) => stage.curtain().color = *color,
        Cue::Line(line) => stage.curtain().lines.push(line.clone()),
        Cue::Message(msg) => stage.curtain().message = msg.clone(),
        Cue::Mark => out.push(Outcome::Marked {
            edge,
            step: step.name,
        }),
        Cue::Eye(_) | Cue::LookAt(_) | Cue::Fade(_) | Cue::Signal => {}
    }
}
