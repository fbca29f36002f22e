//! Camera rig: per-phase idle parallax plus scripted flights.
//!
//! Exactly one mode writes the pose in a given frame. While a choreography
//! holds the camera ([`CameraMode::Scripted`]) idle updates are suspended;
//! on release the rig returns to idle for the new phase with its target
//! recentred on that phase's anchor.

use crate::choreography::{ChoreoError, Edge};
use crate::constants::*;
use crate::corridor::CorridorView;
use crate::phase::Phase;
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Position and look-at target; the only transform the rig owns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub const fn new(eye: Vec3, look_at: Vec3) -> Self {
        Self { eye, look_at }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye,
            target: self.look_at,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// Idle behaviour for one phase. Pointer input is normalised to \[-1, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleParams {
    pub max_offset: Vec2,
    pub anchor: Vec3,
    pub look_at: Vec3,
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub lerp: f32,
}

impl IdleParams {
    pub fn target(&self, pointer: Vec2) -> Vec3 {
        self.anchor + Vec3::new(pointer.x * self.max_offset.x, pointer.y * self.max_offset.y, 0.0)
    }
}

/// `None` for phases without parallax: `transition` is always scripted and
/// the corridor drives its own follow camera.
pub fn idle_params(phase: Phase) -> Option<IdleParams> {
    let p = |mx: f32, my: f32, z: f32, look: Vec3, lerp: f32| IdleParams {
        max_offset: Vec2::new(mx, my),
        anchor: Vec3::new(0.0, 0.0, z),
        look_at: look,
        lerp,
    };
    match phase {
        Phase::Entry => Some(p(2.0, 1.0, 15.0, Vec3::new(0.0, 2.0, 0.0), 0.05)),
        Phase::Emitter => Some(p(0.5, 0.5, 12.0, Vec3::ZERO, 0.05)),
        Phase::Selection => Some(p(0.3, 0.3, 15.0, Vec3::ZERO, 0.05)),
        Phase::Shards => Some(p(0.2, 0.2, 12.0, Vec3::ZERO, 0.05)),
        Phase::Tuning => Some(p(0.2, 0.2, 6.0, Vec3::ZERO, 0.03)),
        Phase::Resonance => Some(p(0.3, 0.3, 5.0, Vec3::ZERO, 0.03)),
        Phase::Transition | Phase::TimeCorridor => None,
    }
}

/// Where a phase's scene places the camera when it mounts.
pub fn resting_pose(phase: Phase) -> CameraPose {
    let at = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    match phase {
        Phase::Entry | Phase::Transition => CameraPose::new(at(0.0, 0.0, 15.0), at(0.0, 2.0, 0.0)),
        Phase::Emitter => CameraPose::new(at(0.0, 0.0, 12.0), Vec3::ZERO),
        Phase::Selection => CameraPose::new(at(0.0, 0.0, 16.0), Vec3::ZERO),
        Phase::Shards => CameraPose::new(at(0.0, 0.0, 10.0), Vec3::ZERO),
        Phase::Tuning => CameraPose::new(at(0.0, 0.0, 6.0), Vec3::ZERO),
        Phase::Resonance => CameraPose::new(at(0.0, 0.0, 5.0), Vec3::ZERO),
        Phase::TimeCorridor => CameraPose::new(at(0.0, 0.0, CORRIDOR_CAMERA_Z), Vec3::ZERO),
    }
}

/// Convert a per-60Hz-frame lerp factor to the fraction for `dt_sec`.
#[inline]
pub fn frame_lerp(factor: f32, dt_sec: f32) -> f32 {
    if dt_sec <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - factor.clamp(0.0, 1.0)).powf(dt_sec * FRAME_RATE_REFERENCE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Idle { phase: Phase },
    Scripted { edge: Edge },
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    pose: CameraPose,
    mode: CameraMode,
    idle_target: Vec3,
}

impl CameraRig {
    pub fn new(phase: Phase) -> Self {
        let pose = resting_pose(phase);
        Self {
            pose,
            mode: CameraMode::Idle { phase },
            idle_target: pose.eye,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn idle_target(&self) -> Vec3 {
        self.idle_target
    }

    pub fn holder(&self) -> Option<Edge> {
        match self.mode {
            CameraMode::Scripted { edge } => Some(edge),
            CameraMode::Idle { .. } => None,
        }
    }

    /// Hand the camera to a scripted flight. Fails while another flight holds it.
    pub fn claim(&mut self, edge: Edge) -> Result<(), ChoreoError> {
        match self.mode {
            CameraMode::Scripted { edge: holder } if holder != edge => {
                Err(ChoreoError::CameraBusy { edge, holder })
            }
            _ => {
                log::debug!("[camera] scripted by {:?}", edge);
                self.mode = CameraMode::Scripted { edge };
                Ok(())
            }
        }
    }

    /// Scripted write. Ignored unless `edge` currently holds the camera.
    pub fn drive(&mut self, edge: Edge, pose: CameraPose) -> bool {
        if self.mode != (CameraMode::Scripted { edge }) {
            return false;
        }
        self.pose = pose;
        true
    }

    /// Return control to idle for `phase`. The idle target restarts from the
    /// phase anchor rather than whatever the previous phase was chasing.
    pub fn release(&mut self, edge: Edge, phase: Phase) -> bool {
        if self.mode != (CameraMode::Scripted { edge }) {
            return false;
        }
        log::debug!("[camera] released by {:?}, idle for {}", edge, phase);
        self.enter_idle(phase);
        true
    }

    /// Place the camera at `phase`'s resting pose if no flight holds it.
    pub fn place(&mut self, phase: Phase) -> bool {
        if matches!(self.mode, CameraMode::Scripted { .. }) {
            return false;
        }
        self.force_place(phase);
        true
    }

    /// Drop any scripted hold and land on `phase`'s resting pose.
    pub fn force_place(&mut self, phase: Phase) {
        self.pose = resting_pose(phase);
        self.enter_idle(phase);
        self.idle_target = self.pose.eye;
    }

    /// Per-frame parallax follow. Returns whether the pose was written.
    pub fn update_idle(&mut self, phase: Phase, pointer: Vec2, dt_sec: f32) -> bool {
        match self.mode {
            CameraMode::Scripted { .. } => return false,
            CameraMode::Idle { phase: p } if p != phase => self.enter_idle(phase),
            CameraMode::Idle { .. } => {}
        }
        let Some(params) = idle_params(phase) else {
            return false;
        };
        self.idle_target = params.target(pointer);
        let alpha = frame_lerp(params.lerp, dt_sec);
        self.pose.eye = self.pose.eye.lerp(self.idle_target, alpha);
        self.pose.look_at = params.look_at;
        true
    }

    /// Corridor follow camera, used in place of parallax in the time corridor.
    pub fn follow(&mut self, view: CorridorView, dt_sec: f32) -> bool {
        match self.mode {
            CameraMode::Scripted { .. } => return false,
            CameraMode::Idle { phase } if phase != Phase::TimeCorridor => {
                self.enter_idle(Phase::TimeCorridor)
            }
            CameraMode::Idle { .. } => {}
        }
        let target_z = if view.inspecting {
            CORRIDOR_INSPECT_Z
        } else {
            CORRIDOR_CAMERA_Z
        };
        self.idle_target = Vec3::new(view.camera_x, 0.0, target_z);
        let eye = &mut self.pose.eye;
        eye.x += (view.camera_x - eye.x) * frame_lerp(CORRIDOR_FOLLOW_X_LERP, dt_sec);
        eye.y += (0.0 - eye.y) * frame_lerp(CORRIDOR_FOLLOW_Y_LERP, dt_sec);
        eye.z += (target_z - eye.z) * frame_lerp(CORRIDOR_FOLLOW_Z_LERP, dt_sec);
        self.pose.look_at = Vec3::new(view.look_x, 0.0, 0.0);
        true
    }

    fn enter_idle(&mut self, phase: Phase) {
        self.mode = CameraMode::Idle { phase };
        self.idle_target = idle_params(phase)
            .map(|p| p.anchor)
            .unwrap_or_else(|| resting_pose(phase).eye);
    }
}
