//! Discrete journey phases and the selection context gathered along the way.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level state of the experience. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Entry,
    Transition,
    Emitter,
    Selection,
    Shards,
    Tuning,
    Resonance,
    TimeCorridor,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Entry,
        Phase::Transition,
        Phase::Emitter,
        Phase::Selection,
        Phase::Shards,
        Phase::Tuning,
        Phase::Resonance,
        Phase::TimeCorridor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Entry => "entry",
            Phase::Transition => "transition",
            Phase::Emitter => "emitter",
            Phase::Selection => "selection",
            Phase::Shards => "shards",
            Phase::Tuning => "tuning",
            Phase::Resonance => "resonance",
            Phase::TimeCorridor => "timeCorridor",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five elemental paths offered on the selection ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Ring order; wood sits at the top.
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }

    pub fn parse(s: &str) -> Option<Element> {
        Element::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
    }

    /// Position on the selection ring.
    pub fn ring_index(self) -> usize {
        Element::ALL.iter().position(|e| *e == self).unwrap_or(0)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
}

impl Landmark {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// What the user has picked so far on the way down to a resonance world.
///
/// A landmark is only ever present together with an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub element: Option<Element>,
    pub landmark: Option<Landmark>,
}

impl SelectionContext {
    pub fn is_consistent(&self) -> bool {
        self.landmark.is_none() || self.element.is_some()
    }
}
