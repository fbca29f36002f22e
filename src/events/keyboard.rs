use crate::input::{key_intent, KeyIntent};
use resonance_core::{CorridorMode, Journey, Phase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, journey: &Rc<RefCell<Journey>>) {
    let mut j = journey.borrow_mut();
    let phase = j.phase();
    let Some(intent) = key_intent(&ev.key(), phase) else {
        return;
    };
    match intent {
        KeyIntent::Back => {
            // Escape closes the inspected memory before leaving the corridor.
            let inspecting = phase == Phase::TimeCorridor
                && j.corridor().state().mode == CorridorMode::Inspect;
            if inspecting {
                j.corridor_cancel();
            } else if j.snapshot().flags.photo_choice.is_some() {
                j.dismiss_photo_choice();
            } else if let Err(e) = j.back() {
                log::debug!("[keys] {}", e);
            }
        }
        KeyIntent::Step(delta) => {
            j.corridor_step(delta);
        }
        KeyIntent::Inspect => {
            let focus = j.corridor().state().focus_index;
            j.corridor_click(focus);
        }
        KeyIntent::Reset => {
            log::info!("[keys] reset");
            j.reset();
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(journey: Rc<RefCell<Journey>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &journey);
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
