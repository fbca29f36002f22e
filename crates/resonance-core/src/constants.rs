// Shared timing, layout and interaction tuning for the journey core.

// Camera
pub const FRAME_RATE_REFERENCE: f32 = 60.0; // lerp factors below are tuned per 60 Hz frame
pub const CAMERA_FOVY_DEGREES: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const MAX_FRAME_DT_SEC: f64 = 0.1; // clamp for tab-switch stalls

// Corridor layout
pub const CORRIDOR_SPACING: f32 = 8.0; // world units between memory slots
pub const CORRIDOR_CAMERA_Z: f32 = 15.0;
pub const CORRIDOR_INSPECT_Z: f32 = 12.0;
pub const CORRIDOR_FOLLOW_X_LERP: f32 = 0.1;
pub const CORRIDOR_FOLLOW_Y_LERP: f32 = 0.1;
pub const CORRIDOR_FOLLOW_Z_LERP: f32 = 0.05;

// Corridor interaction
pub const DRAG_THRESHOLD_PX: f32 = 5.0; // below this a press is still a click
pub const DRAG_OFFSET_PER_PX: f32 = 0.02; // 100px of drag = 2 world units
pub const INSPECT_PITCH_PER_PX: f32 = 0.005;
pub const INSPECT_YAW_PER_PX: f32 = 0.01;
pub const SNAP_DURATION_SEC: f64 = 0.8;

// Selection ring
pub const RING_RADIUS: f32 = 4.5;
pub const DIVE_STANDOFF_Z: f32 = 2.0; // element dive stops this far in front of the item

// Tuning typewriter
pub const TYPEWRITER_FIRST_LINE_SEC: f64 = 1.0;
pub const TYPEWRITER_LINE_GAP_SEC: f64 = 0.8;
pub const TYPEWRITER_SETTLE_SEC: f64 = 1.0;
