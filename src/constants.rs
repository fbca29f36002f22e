/// DOM contract and input tuning for the web front-end.
///
/// Element ids and event names are shared with the page and the scene
/// scripts; keep them in sync with `index.html`.
// Canvas the scene renderer draws into
pub const CANVAS_ID: &str = "app-canvas";

// Overlay curtain and its text layers
pub const CURTAIN_ID: &str = "curtain";
pub const CURTAIN_LINES_ID: &str = "curtain-lines";
pub const CURTAIN_MESSAGE_ID: &str = "curtain-message";

// Chrome
pub const BACK_BUTTON_ID: &str = "back-button";
pub const PHOTO_CHOICE_ID: &str = "photo-choice";
pub const HIDDEN_CLASS: &str = "hidden";

// Attribute on <body> mirroring the current phase for CSS hooks
pub const PHASE_ATTR: &str = "data-phase";

// Window events published for the scene scripts
pub const EVENT_PHASE: &str = "resonance:phase";
pub const EVENT_MOUNT: &str = "resonance:mount";
pub const EVENT_MEMORY_DELETED: &str = "resonance:memory-deleted";

// Global the page fills with saved photo memories before the corridor opens
pub const MEMORIES_GLOBAL: &str = "resonancePhotoMemories";

// Opacity changes smaller than this are not written to the DOM
pub const CURTAIN_OPACITY_EPSILON: f32 = 0.002;

// Parallax pointer range; positions outside the canvas are clamped to it
pub const POINTER_NDC_CLAMP: f32 = 1.0;
