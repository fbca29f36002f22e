// Camera rig ownership, idle parallax and scene mounting.

use glam::{Vec2, Vec3};
use resonance_core::{
    frame_lerp, idle_params, resting_pose, scene_for_phase, CameraMode, CameraPose, CameraRig,
    ChoreoError, CorridorView, Edge, MountGate, Phase, SceneId,
};

#[test]
fn frame_lerp_matches_across_frame_rates() {
    let settle = |hz: f32, secs: f32| {
        let mut x = 0.0_f32;
        for _ in 0..(hz * secs).round() as usize {
            x += (1.0 - x) * frame_lerp(0.05, 1.0 / hz);
        }
        x
    };
    let a = settle(30.0, 1.0);
    let b = settle(60.0, 1.0);
    let c = settle(144.0, 1.0);
    assert!((a - b).abs() < 1e-4);
    assert!((b - c).abs() < 1e-4);
    assert!((frame_lerp(0.05, 1.0 / 60.0) - 0.05).abs() < 1e-6);
    assert_eq!(frame_lerp(0.05, 0.0), 0.0);
}

#[test]
fn only_one_flight_holds_the_camera() {
    let mut rig = CameraRig::new(Phase::Selection);
    rig.claim(Edge::ElementDive).unwrap();
    assert_eq!(
        rig.claim(Edge::Injection),
        Err(ChoreoError::CameraBusy {
            edge: Edge::Injection,
            holder: Edge::ElementDive
        })
    );
    let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
    assert!(!rig.drive(Edge::Injection, pose));
    assert!(rig.drive(Edge::ElementDive, pose));
    assert_eq!(rig.pose(), pose);
}

#[test]
fn idle_is_suspended_while_scripted() {
    let mut rig = CameraRig::new(Phase::Emitter);
    rig.claim(Edge::Injection).unwrap();
    let before = rig.pose();
    assert!(!rig.update_idle(Phase::Emitter, Vec2::ONE, 0.016));
    assert!(!rig.place(Phase::Selection));
    assert_eq!(rig.pose(), before);
}

#[test]
fn release_recentres_idle_target_on_the_new_phase() {
    let mut rig = CameraRig::new(Phase::Emitter);
    rig.update_idle(Phase::Emitter, Vec2::new(1.0, 1.0), 0.016);
    assert_eq!(rig.idle_target(), Vec3::new(0.5, 0.5, 12.0));

    rig.claim(Edge::Injection).unwrap();
    assert!(!rig.release(Edge::ElementDive, Phase::Selection));
    assert!(rig.release(Edge::Injection, Phase::Selection));
    assert_eq!(
        rig.mode(),
        CameraMode::Idle {
            phase: Phase::Selection
        }
    );
    assert_eq!(rig.idle_target(), Vec3::new(0.0, 0.0, 15.0));
}

#[test]
fn idle_follows_pointer_within_phase_limits() {
    let mut rig = CameraRig::new(Phase::Entry);
    for _ in 0..600 {
        rig.update_idle(Phase::Entry, Vec2::new(1.0, -1.0), 1.0 / 60.0);
    }
    let eye = rig.pose().eye;
    assert!((eye - Vec3::new(2.0, -1.0, 15.0)).length() < 1e-3);
    assert_eq!(rig.pose().look_at, Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn no_parallax_in_transition_or_corridor() {
    assert!(idle_params(Phase::Transition).is_none());
    assert!(idle_params(Phase::TimeCorridor).is_none());
    let mut rig = CameraRig::new(Phase::Transition);
    assert!(!rig.update_idle(Phase::Transition, Vec2::ONE, 0.016));
}

#[test]
fn force_place_overrides_a_scripted_hold() {
    let mut rig = CameraRig::new(Phase::Selection);
    rig.claim(Edge::ElementDive).unwrap();
    rig.force_place(Phase::Emitter);
    assert_eq!(rig.holder(), None);
    assert_eq!(rig.pose(), resting_pose(Phase::Emitter));
}

#[test]
fn corridor_follow_tracks_offset_and_pulls_in_for_inspect() {
    let mut rig = CameraRig::new(Phase::TimeCorridor);
    let view = CorridorView {
        camera_x: 16.0,
        look_x: 16.0,
        inspecting: true,
    };
    for _ in 0..1200 {
        rig.follow(view, 1.0 / 60.0);
    }
    let eye = rig.pose().eye;
    assert!((eye.x - 16.0).abs() < 1e-2);
    assert!((eye.z - 12.0).abs() < 1e-2);
    assert_eq!(rig.pose().look_at, Vec3::new(16.0, 0.0, 0.0));
}

#[test]
fn tuning_mounts_no_scene() {
    assert_eq!(scene_for_phase(Phase::Tuning), None);
    assert_eq!(scene_for_phase(Phase::Transition), Some(SceneId::PortalEntry));
    assert_eq!(
        scene_for_phase(Phase::TimeCorridor),
        Some(SceneId::TimeCorridor)
    );
}

#[test]
fn mount_gate_unmounts_before_mounting() {
    let mut gate = MountGate::new(Phase::Entry);
    assert_eq!(gate.sync(Phase::Transition), None);

    let change = gate.sync(Phase::Emitter).unwrap();
    assert_eq!(change.unmount, Some(SceneId::PortalEntry));
    assert_eq!(change.mount, Some(SceneId::EmitterHub));

    gate.sync(Phase::Selection);
    gate.sync(Phase::Shards);
    let change = gate.sync(Phase::Tuning).unwrap();
    assert_eq!(change.unmount, Some(SceneId::ShardField));
    assert_eq!(change.mount, None);
    assert_eq!(gate.mounted(), None);

    let change = gate.sync(Phase::Resonance).unwrap();
    assert_eq!(change.unmount, None);
    assert_eq!(change.mount, Some(SceneId::ResonanceWorld));
}

#[test]
fn pose_projects_its_look_at_to_screen_centre() {
    let pose = resting_pose(Phase::Entry);
    let m = pose.camera(16.0 / 9.0).view_projection();
    let clip = m * pose.look_at.extend(1.0);
    assert!(clip.w > 0.0);
    assert!((clip.x / clip.w).abs() < 1e-5);
    assert!((clip.y / clip.w).abs() < 1e-5);
}
