//! The journey's concrete choreographies.
//!
//! Phase-entry scripts play once a phase is entered (overlay reactions and
//! arrival flights). Intent scripts play before the phase changes and end by
//! dispatching the action that moves the store forward.

use crate::camera::CameraPose;
use crate::catalog::{element_info, ring_position, tuning_lines};
use crate::choreography::{Axes, Choreography, Cue, Edge, Step};
use crate::constants::*;
use crate::curtain::Rgb;
use crate::easing::Ease;
use crate::phase::{Element, Landmark, Phase};
use crate::store::{Action, Snapshot};
use glam::Vec3;

const CORRIDOR_TINT: Rgb = Rgb::new(0x05, 0x05, 0x05);
pub const CORRIDOR_MESSAGE: &str = "ENTERING TIME CORRIDOR";
/// Step of [`injection`] at which the planets are released.
pub const INJECT_MARK: &str = "inject";

/// Entry → emitter: brief pull-back, then the rush through the portal.
pub fn portal_rush() -> Choreography {
    Choreography::new(Edge::PortalRush)
        .step(Step::new("anticipate", Cue::Eye(Axes::z(16.0))).over(0.5, Ease::Power2In))
        .step(
            Step::new("rush", Cue::Eye(Axes::z(-10.0)))
                .at(0.5)
                .over(1.5, Ease::ExpoInOut)
                .gating(),
        )
        .step(Step::new("tint", Cue::Tint(Rgb::WHITE)))
        .step(
            Step::new("whiteout", Cue::Fade(1.0))
                .at(1.2)
                .over(1.5, Ease::Linear),
        )
        .completes_with(Action::CompleteTransition)
}

pub fn emitter_reveal() -> Choreography {
    Choreography::new(Edge::EmitterReveal)
        .step(Step::new("reveal", Cue::Fade(0.0)).at(0.5).over(1.0, Ease::Linear))
}

/// Earth marker → selection ring: align the marker, release the planets,
/// converge them on the marker while the camera dives after them.
pub fn injection() -> Choreography {
    Choreography::new(Edge::Injection)
        .step(Step::new("earth-align", Cue::Signal).over(1.5, Ease::Power2InOut))
        .step(Step::new(INJECT_MARK, Cue::Mark).at(1.5))
        .step(
            Step::new("emission", Cue::Signal)
                .at(1.5)
                .over(0.5, Ease::BackOut(1.7)),
        )
        .step(
            Step::new("convergence", Cue::Signal)
                .at(2.0)
                .over(0.8, Ease::ExpoIn)
                .gating(),
        )
        .step(
            Step::new("dolly", Cue::Eye(Axes::xyz(Vec3::new(0.0, -2.0, -5.0))))
                .at(1.5)
                .over(1.3, Ease::ExpoIn)
                .gating(),
        )
        .completes_with(Action::EnterSelection)
}

pub fn selection_reveal() -> Choreography {
    Choreography::new(Edge::SelectionReveal)
        .step(Step::new("tint", Cue::Tint(Rgb::WHITE)))
        .step(Step::new("flash", Cue::Fade(1.0)).over(0.05, Ease::Linear))
        .step(Step::new("reveal", Cue::Fade(0.0)).at(0.5).over(1.5, Ease::Linear))
}

/// Zoom into the chosen element on the ring, then select it.
pub fn element_dive(element: Element) -> Choreography {
    let target = ring_position(element) + Vec3::new(0.0, 0.0, DIVE_STANDOFF_Z);
    Choreography::new(Edge::ElementDive)
        .step(
            Step::new("dive", Cue::Eye(Axes::xyz(target)))
                .over(1.5, Ease::ExpoIn)
                .gating(),
        )
        .completes_with(Action::SelectElement(element))
}

pub fn shards_reveal(element: Element) -> Choreography {
    Choreography::new(Edge::ShardsReveal)
        .step(Step::new("tint", Cue::Tint(element_info(element).color)))
        .step(Step::new("flash", Cue::Fade(1.0)).over(0.5, Ease::Linear))
        .step(Step::new("reveal", Cue::Fade(0.0)).at(0.5).over(1.5, Ease::Linear))
}

/// Fade to black, type the calibration lines, then enter the world.
pub fn tuning_sequence(element: Element, landmark: &Landmark) -> Choreography {
    let mut choreo = Choreography::new(Edge::TuningSequence)
        .step(Step::new("tint", Cue::Tint(Rgb::BLACK)))
        .step(Step::new("blackout", Cue::Fade(1.0)).over(1.0, Ease::Linear));
    let mut at = TYPEWRITER_FIRST_LINE_SEC;
    for line in tuning_lines(element, landmark) {
        choreo = choreo.step(Step::new("line", Cue::Line(line)).at(at));
        at += TYPEWRITER_LINE_GAP_SEC;
    }
    // `at` now sits one gap past the last line.
    choreo
        .step(
            Step::new("settle", Cue::Signal)
                .at(at)
                .over(TYPEWRITER_SETTLE_SEC, Ease::Linear)
                .gating(),
        )
        .completes_with(Action::EnterWorld)
}

/// Macro view of the landmark, dolly through the mist, settle on the body.
pub fn resonance_intro() -> Choreography {
    Choreography::new(Edge::ResonanceIntro)
        .step(Step::new(
            "macro",
            Cue::Place(CameraPose::new(
                Vec3::new(0.0, 2.0, 15.0),
                Vec3::new(0.0, 0.0, -3.0),
            )),
        ))
        .step(Step::new("tint", Cue::Tint(Rgb::BLACK)))
        .step(Step::new("hold-black", Cue::Fade(1.0)))
        .step(
            Step::new("approach", Cue::Eye(Axes::xyz(Vec3::new(0.0, 1.0, 8.0))))
                .over(3.0, Ease::Power2InOut),
        )
        .step(
            Step::new("arrive", Cue::Eye(Axes::xyz(Vec3::new(0.0, 0.0, 5.0))))
                .at(3.0)
                .over(2.0, Ease::Power1Out)
                .gating(),
        )
        .step(
            Step::new("focus", Cue::LookAt(Vec3::ZERO))
                .over(5.0, Ease::Power2InOut)
                .gating(),
        )
        .step(Step::new("reveal", Cue::Fade(0.0)).at(0.5).over(2.0, Ease::Linear))
}

/// Side-step past the prism and turn down the corridor while the curtain
/// closes on the corridor title.
pub fn corridor_side_step() -> Choreography {
    Choreography::new(Edge::CorridorSideStep)
        .step(
            Step::new("side-step", Cue::Eye(Axes::xyz(Vec3::new(20.0, 0.0, 0.0))))
                .over(2.5, Ease::Power2InOut),
        )
        .step(
            Step::new("turn", Cue::LookAt(Vec3::new(30.0, 0.0, 0.0)))
                .over(2.5, Ease::Power2InOut),
        )
        .step(Step::new("tint", Cue::Tint(CORRIDOR_TINT)))
        .step(
            Step::new("title", Cue::Message(Some(CORRIDOR_MESSAGE.to_string()))).at(1.8),
        )
        .step(
            Step::new("close", Cue::Fade(1.0))
                .at(1.8)
                .over(1.5, Ease::Linear)
                .gating(),
        )
}

pub fn corridor_reveal() -> Choreography {
    Choreography::new(Edge::CorridorReveal)
        .step(Step::new("untitle", Cue::Message(None)))
        .step(Step::new("reveal", Cue::Fade(0.0)).over(1.0, Ease::Linear))
}

/// Script to play on entering `snapshot.phase`, if any.
pub fn for_phase_entry(snapshot: &Snapshot) -> Option<Choreography> {
    match snapshot.phase {
        Phase::Entry => None,
        Phase::Transition => Some(portal_rush()),
        Phase::Emitter => Some(emitter_reveal()),
        Phase::Selection => Some(selection_reveal()),
        Phase::Shards => snapshot.context.element.map(shards_reveal),
        Phase::Tuning => match (&snapshot.context.element, &snapshot.context.landmark) {
            (Some(el), Some(landmark)) => Some(tuning_sequence(*el, landmark)),
            _ => None,
        },
        Phase::Resonance => Some(resonance_intro()),
        Phase::TimeCorridor => Some(corridor_side_step()),
    }
}

/// Script chained after `edge` completes.
pub fn follow_up(edge: Edge) -> Option<Choreography> {
    match edge {
        Edge::CorridorSideStep => Some(corridor_reveal()),
        _ => None,
    }
}
