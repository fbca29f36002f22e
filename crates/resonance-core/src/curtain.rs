//! Full-screen overlay curtain used for flashes, fades and the tuning text.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return None;
        }
        let v = u32::from_str_radix(s, 16).ok()?;
        Some(Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Curtain {
    pub opacity: f32,
    pub color: Rgb,
    pub lines: Vec<String>,
    pub message: Option<String>,
}

impl Default for Curtain {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            color: Rgb::WHITE,
            lines: Vec::new(),
            message: None,
        }
    }
}

impl Curtain {
    /// Drop to a fully clear resting state.
    pub fn clear(&mut self) {
        self.opacity = 0.0;
        self.lines.clear();
        self.message = None;
    }

    pub fn is_opaque(&self) -> bool {
        self.opacity >= 0.999
    }
}
