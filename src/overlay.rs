use crate::constants::*;
use crate::dom;
use resonance_core::{Curtain, Phase, Snapshot};
use web_sys as web;

/// Last values written to the DOM, so unchanged frames touch nothing.
#[derive(Default)]
pub struct OverlayView {
    opacity: Option<f32>,
    color: Option<String>,
    line_count: Option<usize>,
    message: Option<Option<String>>,
    phase: Option<Phase>,
    back_visible: Option<bool>,
    photo_choice_open: Option<bool>,
}

impl OverlayView {
    pub fn render(
        &mut self,
        document: &web::Document,
        curtain: &Curtain,
        snapshot: &Snapshot,
        back_available: bool,
    ) {
        self.render_curtain(document, curtain);
        self.render_chrome(document, snapshot, back_available);
    }

    fn render_curtain(&mut self, document: &web::Document, curtain: &Curtain) {
        let Some(el) = dom::html_element(document, CURTAIN_ID) else {
            return;
        };
        let style = el.style();
        let opacity_changed = self
            .opacity
            .map_or(true, |o| (o - curtain.opacity).abs() > CURTAIN_OPACITY_EPSILON);
        if opacity_changed {
            _ = style.set_property("opacity", &format!("{:.3}", curtain.opacity));
            // An invisible curtain must not swallow clicks meant for the scene.
            let events = if curtain.opacity > 0.0 { "auto" } else { "none" };
            _ = style.set_property("pointer-events", events);
            self.opacity = Some(curtain.opacity);
        }
        let color = curtain.color.to_string();
        if self.color.as_deref() != Some(color.as_str()) {
            _ = style.set_property("background-color", &color);
            self.color = Some(color);
        }

        if self.line_count != Some(curtain.lines.len()) {
            if let Some(lines) = document.get_element_by_id(CURTAIN_LINES_ID) {
                lines.set_text_content(Some(&curtain.lines.join("\n")));
            }
            self.line_count = Some(curtain.lines.len());
        }

        if self.message.as_ref() != Some(&curtain.message) {
            if let Some(msg) = document.get_element_by_id(CURTAIN_MESSAGE_ID) {
                msg.set_text_content(curtain.message.as_deref());
                dom::set_hidden(&msg, curtain.message.is_none());
            }
            self.message = Some(curtain.message.clone());
        }
    }

    fn render_chrome(&mut self, document: &web::Document, snapshot: &Snapshot, back: bool) {
        if self.phase != Some(snapshot.phase) {
            if let Some(body) = document.body() {
                _ = body.set_attribute(PHASE_ATTR, snapshot.phase.as_str());
            }
            self.phase = Some(snapshot.phase);
        }
        if self.back_visible != Some(back) {
            if let Some(el) = document.get_element_by_id(BACK_BUTTON_ID) {
                dom::set_hidden(&el, !back);
            }
            self.back_visible = Some(back);
        }
        let open = snapshot.flags.photo_choice.is_some();
        if self.photo_choice_open != Some(open) {
            if let Some(el) = document.get_element_by_id(PHOTO_CHOICE_ID) {
                dom::set_hidden(&el, !open);
            }
            self.photo_choice_open = Some(open);
        }
    }
}
