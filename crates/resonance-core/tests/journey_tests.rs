// End-to-end journey: intents, timed transitions, back navigation, corridor.

use glam::Vec2;
use resonance_core::scripts::CORRIDOR_MESSAGE;
use resonance_core::{
    resting_pose, ChoreoError, CorridorMode, Curtain, Edge, Element, Journey, JourneyEvent,
    Landmark, MountChange, Phase, PhotoMemory, SceneId,
};

struct Clock(f64);

impl Clock {
    /// Render at 60 Hz until `until` seconds.
    fn run_until(&mut self, j: &mut Journey, until: f64) {
        while self.0 < until {
            self.0 += 1.0 / 60.0;
            j.frame(self.0);
        }
    }

    fn run_for(&mut self, j: &mut Journey, secs: f64) {
        let until = self.0 + secs;
        self.run_until(j, until);
    }
}

fn memories() -> Vec<PhotoMemory> {
    (0..3)
        .map(|i| PhotoMemory {
            id: format!("mem-{}", i),
            photo_url: format!("blob:{}", i),
            element: Element::Fire,
            landmark: Landmark::new("danxia", "Danxia Landform"),
            timestamp: 100 + i,
        })
        .collect()
}

fn journey() -> Journey {
    Journey::new(Box::new(memories))
}

/// Walk a fresh journey to the shards of `element`.
fn at_shards(element: Element) -> (Journey, Clock) {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);
    j.activate_marker().unwrap();
    clock.run_for(&mut j, 3.0);
    j.choose_element(element).unwrap();
    clock.run_for(&mut j, 1.6);
    assert_eq!(j.phase(), Phase::Shards);
    (j, clock)
}

#[test]
fn portal_rush_lands_in_the_emitter() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    assert_eq!(j.click_portal(), Ok(Phase::Transition));
    assert_eq!(
        j.drain_events(),
        vec![JourneyEvent::PhaseChanged {
            from: Phase::Entry,
            to: Phase::Transition
        }]
    );
    assert_eq!(j.camera().holder(), Some(Edge::PortalRush));
    assert!(j.click_portal().is_err());

    clock.run_until(&mut j, 1.9);
    assert_eq!(j.phase(), Phase::Transition);
    clock.run_until(&mut j, 2.1);
    assert_eq!(j.phase(), Phase::Emitter);
    assert_eq!(j.camera().holder(), None);
    assert_eq!(j.mounted_scene(), Some(SceneId::EmitterHub));
    assert_eq!(
        j.drain_events(),
        vec![
            JourneyEvent::Mount(MountChange {
                unmount: Some(SceneId::PortalEntry),
                mount: Some(SceneId::EmitterHub)
            }),
            JourneyEvent::PhaseChanged {
                from: Phase::Transition,
                to: Phase::Emitter
            }
        ]
    );
}

#[test]
fn injection_sets_flag_then_enters_selection() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);

    j.activate_marker().unwrap();
    assert_eq!(
        j.activate_marker(),
        Err(ChoreoError::InFlight(Edge::Injection))
    );
    clock.run_for(&mut j, 1.0);
    assert!(!j.snapshot().flags.injecting);
    clock.run_for(&mut j, 0.6);
    assert!(j.snapshot().flags.injecting);
    assert_eq!(j.phase(), Phase::Emitter);
    clock.run_for(&mut j, 1.3);
    assert_eq!(j.phase(), Phase::Selection);
    assert_eq!(j.mounted_scene(), Some(SceneId::SelectionRing));
}

#[test]
fn double_dive_selects_once() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);
    j.activate_marker().unwrap();
    clock.run_for(&mut j, 3.0);
    j.drain_events();

    j.choose_element(Element::Fire).unwrap();
    assert_eq!(
        j.choose_element(Element::Fire),
        Err(ChoreoError::InFlight(Edge::ElementDive))
    );
    clock.run_for(&mut j, 3.0);
    let entered_shards = j
        .drain_events()
        .into_iter()
        .filter(|e| {
            *e == JourneyEvent::PhaseChanged {
                from: Phase::Selection,
                to: Phase::Shards,
            }
        })
        .count();
    assert_eq!(entered_shards, 1);
    assert_eq!(j.snapshot().context.element, Some(Element::Fire));
}

#[test]
fn back_mid_dive_cancels_the_selection() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);
    j.activate_marker().unwrap();
    clock.run_for(&mut j, 3.0);

    j.choose_element(Element::Water).unwrap();
    clock.run_for(&mut j, 0.7);
    assert_eq!(j.back(), Ok(Phase::Emitter));
    assert_eq!(j.camera().holder(), None);
    assert_eq!(j.camera().pose(), resting_pose(Phase::Emitter));
    assert!(!j.choreographer().is_in_flight(Edge::ElementDive));

    clock.run_for(&mut j, 3.0);
    assert_eq!(j.phase(), Phase::Emitter);
    assert_eq!(j.snapshot().context.element, None);
}

#[test]
fn fire_danxia_descent_reaches_resonance() {
    let (mut j, mut clock) = at_shards(Element::Fire);
    assert_eq!(j.snapshot().context.element, Some(Element::Fire));
    assert_eq!(j.snapshot().context.landmark, None);

    assert!(j.choose_landmark("flaming_mt").is_err());
    assert!(j.choose_landmark("bamboo").is_err());
    assert_eq!(j.snapshot().flags.photo_choice, None);

    j.choose_landmark("danxia").unwrap();
    assert_eq!(
        j.snapshot().flags.photo_choice,
        Some(Landmark::new("danxia", "Danxia Landform"))
    );
    assert_eq!(
        j.confirm_photo(Some("blob:selfie".into())),
        Ok(Phase::Tuning)
    );
    assert_eq!(j.mounted_scene(), None);
    assert_eq!(
        j.snapshot().context.landmark,
        Some(Landmark::new("danxia", "Danxia Landform"))
    );
    assert_eq!(j.snapshot().flags.photo_url.as_deref(), Some("blob:selfie"));

    let t0 = clock.0;
    clock.run_until(&mut j, t0 + 5.15);
    assert_eq!(j.phase(), Phase::Tuning);
    assert_eq!(j.curtain().lines.len(), 4);
    clock.run_until(&mut j, t0 + 5.25);
    assert_eq!(j.phase(), Phase::Resonance);
    assert_eq!(j.mounted_scene(), Some(SceneId::ResonanceWorld));
    assert_eq!(j.camera().holder(), Some(Edge::ResonanceIntro));
    assert_eq!(j.snapshot().context.element, Some(Element::Fire));
}

#[test]
fn back_from_resonance_mid_intro_lands_on_shards() {
    let (mut j, mut clock) = at_shards(Element::Fire);
    j.choose_landmark("danxia").unwrap();
    j.confirm_photo(None).unwrap();
    clock.run_for(&mut j, 5.3);
    assert_eq!(j.phase(), Phase::Resonance);
    clock.run_for(&mut j, 1.0);

    assert_eq!(j.back(), Ok(Phase::Shards));
    assert_eq!(j.choreographer().in_flight(), vec![Edge::ShardsReveal]);
    assert_eq!(j.camera().holder(), None);
    assert_eq!(j.camera().pose(), resting_pose(Phase::Shards));
    assert_eq!(j.snapshot().context.landmark, None);
    assert_eq!(j.snapshot().context.element, Some(Element::Fire));
}

#[test]
fn no_back_from_entry_or_tuning() {
    let mut j = journey();
    assert!(!j.back_available());
    assert!(j.back().is_err());

    let (mut j, _clock) = at_shards(Element::Wood);
    j.choose_landmark("bamboo").unwrap();
    j.confirm_photo(None).unwrap();
    assert!(!j.back_available());
    assert!(j.back().is_err());
    assert_eq!(j.phase(), Phase::Tuning);
}

#[test]
fn confirm_without_choice_is_rejected() {
    let (mut j, _clock) = at_shards(Element::Metal);
    assert!(j.confirm_photo(None).is_err());
    j.choose_landmark("snow_peak").unwrap();
    j.dismiss_photo_choice();
    assert!(j.confirm_photo(None).is_err());
    assert_eq!(j.phase(), Phase::Shards);
}

#[test]
fn time_corridor_round_trip() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);
    j.drain_events();

    assert_eq!(j.enter_time_corridor(), Ok(Phase::TimeCorridor));
    assert_eq!(j.mounted_scene(), Some(SceneId::TimeCorridor));
    assert_eq!(j.corridor().len(), 3);
    assert_eq!(j.corridor().memories()[0].id, "mem-2");
    assert_eq!(j.camera().holder(), Some(Edge::CorridorSideStep));

    clock.run_for(&mut j, 2.0);
    assert_eq!(j.curtain().message.as_deref(), Some(CORRIDOR_MESSAGE));
    clock.run_for(&mut j, 1.4);
    assert!(j.choreographer().is_in_flight(Edge::CorridorReveal));
    assert_eq!(j.camera().holder(), None);
    clock.run_for(&mut j, 1.2);
    assert_eq!(j.curtain().message, None);
    assert_eq!(j.curtain().opacity, 0.0);

    // Browse to the second memory and inspect it.
    assert!(j.corridor_step(1));
    clock.run_for(&mut j, 1.0);
    assert_eq!(j.corridor().state().focus_index, 1);
    assert!(!j.corridor_click(0));
    assert!(j.corridor_click(1));
    assert_eq!(j.corridor().state().mode, CorridorMode::Inspect);

    j.drain_events();
    assert!(j.delete_memory("mem-1"));
    assert_eq!(
        j.drain_events(),
        vec![JourneyEvent::MemoryDeleted("mem-1".into())]
    );
    assert_eq!(j.corridor().state().mode, CorridorMode::Corridor);
    assert_eq!(j.corridor().len(), 2);

    assert_eq!(j.back(), Ok(Phase::Emitter));
    assert_eq!(j.mounted_scene(), Some(SceneId::EmitterHub));
    assert!(!j.corridor_step(1));
}

#[test]
fn entering_the_corridor_mid_injection_hands_over_the_camera() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);
    j.activate_marker().unwrap();
    clock.run_for(&mut j, 0.5);
    assert_eq!(j.camera().holder(), Some(Edge::Injection));

    assert_eq!(j.enter_time_corridor(), Ok(Phase::TimeCorridor));
    assert!(!j.choreographer().is_in_flight(Edge::Injection));
    assert_eq!(j.camera().holder(), Some(Edge::CorridorSideStep));

    clock.run_for(&mut j, 2.0);
    assert_eq!(j.curtain().message.as_deref(), Some(CORRIDOR_MESSAGE));
    clock.run_for(&mut j, 4.0);
    assert_eq!(j.phase(), Phase::TimeCorridor);
    assert!(!j.snapshot().flags.injecting);
    assert_eq!(j.camera().holder(), None);
}

#[test]
fn corridor_pointer_intents_only_apply_in_the_corridor() {
    let mut j = journey();
    j.corridor_pointer_down(Vec2::ZERO);
    j.corridor_pointer_move(Vec2::new(-200.0, 0.0));
    assert_eq!(j.corridor_pointer_up(), resonance_core::Release::Ignored);
    assert_eq!(j.corridor().state().camera_x, 0.0);
}

#[test]
fn reset_returns_to_the_portal() {
    let (mut j, mut clock) = at_shards(Element::Earth);
    j.choose_landmark("great_wall").unwrap();
    j.reset();
    assert_eq!(j.phase(), Phase::Entry);
    assert_eq!(j.snapshot().context.element, None);
    assert_eq!(j.snapshot().flags.photo_choice, None);
    assert_eq!(j.mounted_scene(), Some(SceneId::PortalEntry));
    assert!(j.choreographer().in_flight().is_empty());
    assert_eq!(j.camera().pose(), resting_pose(Phase::Entry));

    clock.run_for(&mut j, 1.0);
    assert_eq!(j.click_portal(), Ok(Phase::Transition));
}

#[test]
fn reset_forgets_the_corridor_and_curtain_tint() {
    let mut j = journey();
    let mut clock = Clock(0.0);
    j.click_portal().unwrap();
    clock.run_for(&mut j, 2.1);
    j.enter_time_corridor().unwrap();
    clock.run_for(&mut j, 2.0);
    assert_ne!(j.curtain().color, Curtain::default().color);
    assert_eq!(j.corridor().len(), 3);

    j.reset();
    assert_eq!(j.curtain(), &Curtain::default());
    assert!(j.corridor().is_empty());
    assert_eq!(j.corridor().state().camera_x, 0.0);
}
