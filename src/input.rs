use crate::constants::POINTER_NDC_CLAMP;
use glam::Vec2;
use resonance_core::Phase;

/// What a key press asks the journey to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    Back,
    /// Move corridor focus by this many slots.
    Step(i32),
    /// Inspect the focused memory.
    Inspect,
    Reset,
}

#[inline]
pub fn key_intent(key: &str, phase: Phase) -> Option<KeyIntent> {
    let in_corridor = phase == Phase::TimeCorridor;
    match key {
        "Escape" | "Backspace" => Some(KeyIntent::Back),
        "ArrowLeft" | "a" | "A" if in_corridor => Some(KeyIntent::Step(-1)),
        "ArrowRight" | "d" | "D" if in_corridor => Some(KeyIntent::Step(1)),
        "Enter" | " " if in_corridor => Some(KeyIntent::Inspect),
        "Home" => Some(KeyIntent::Reset),
        _ => None,
    }
}

/// CSS-pixel position inside a `width` x `height` box to normalised device
/// coordinates, +y up.
#[inline]
pub fn pointer_ndc(x_css: f32, y_css: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (x_css / width) * 2.0 - 1.0;
    let y = 1.0 - (y_css / height) * 2.0;
    Vec2::new(x, y).clamp(Vec2::splat(-POINTER_NDC_CLAMP), Vec2::splat(POINTER_NDC_CLAMP))
}
