//! Static content per element: colour, resonance frequency and landmarks.

use crate::constants::RING_RADIUS;
use crate::curtain::Rgb;
use crate::phase::{Element, Landmark};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandmarkEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub active: bool,
}

impl LandmarkEntry {
    pub fn landmark(&self) -> Landmark {
        Landmark::new(self.id, self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementInfo {
    pub element: Element,
    pub color: Rgb,
    pub frequency: &'static str,
    pub landmarks: [LandmarkEntry; 3],
}

const fn lm(id: &'static str, name: &'static str, active: bool) -> LandmarkEntry {
    LandmarkEntry { id, name, active }
}

static CATALOG: [ElementInfo; 5] = [
    ElementInfo {
        element: Element::Wood,
        color: Rgb::new(0x22, 0xd3, 0xee),
        frequency: "396Hz",
        landmarks: [
            lm("bamboo", "Bamboo Sea", true),
            lm("mt_huang", "Yellow Mts", false),
            lm("forest", "Xishuangbanna", false),
        ],
    },
    ElementInfo {
        element: Element::Fire,
        color: Rgb::new(0xf4, 0x3f, 0x5e),
        frequency: "528Hz",
        landmarks: [
            lm("danxia", "Danxia Landform", true),
            lm("flaming_mt", "Flaming Mts", false),
            lm("red_beach", "Red Beach", false),
        ],
    },
    ElementInfo {
        element: Element::Earth,
        color: Rgb::new(0xfb, 0xbf, 0x24),
        frequency: "174Hz",
        landmarks: [
            lm("great_wall", "The Great Wall", true),
            lm("terracotta", "Terracotta Army", false),
            lm("mt_tai", "Mount Tai", false),
        ],
    },
    ElementInfo {
        element: Element::Metal,
        color: Rgb::new(0xe2, 0xe8, 0xf0),
        frequency: "741Hz",
        landmarks: [
            lm("snow_peak", "Meili Snow Mt", true),
            lm("shanghai", "Shanghai Tower", false),
            lm("bird_nest", "Bird's Nest", false),
        ],
    },
    ElementInfo {
        element: Element::Water,
        color: Rgb::new(0x3b, 0x82, 0xf6),
        frequency: "417Hz",
        landmarks: [
            lm("west_lake", "West Lake", true),
            lm("yangtze", "Three Gorges", false),
            lm("guilin", "Li River", false),
        ],
    },
];

pub fn element_info(element: Element) -> &'static ElementInfo {
    &CATALOG[element.ring_index()]
}

pub fn find_landmark(element: Element, id: &str) -> Option<&'static LandmarkEntry> {
    element_info(element).landmarks.iter().find(|l| l.id == id)
}

/// World position of an element on the selection ring; wood at the top.
pub fn ring_position(element: Element) -> Vec3 {
    let n = Element::ALL.len() as f32;
    let angle = element.ring_index() as f32 / n * std::f32::consts::TAU + std::f32::consts::FRAC_PI_2;
    Vec3::new(angle.cos() * RING_RADIUS, angle.sin() * RING_RADIUS, 0.0)
}

pub fn tuning_lines(element: Element, landmark: &Landmark) -> [String; 4] {
    let freq = element_info(element).frequency;
    [
        format!("> Target Located: {}...", landmark.name),
        "> Analyzing Energy Field...".to_string(),
        format!("> Calibrating to {}...", freq),
        "> Connection Established.".to_string(),
    ]
}
