use crate::constants::*;
use crate::dom;
use crate::overlay::OverlayView;
use instant::Instant;
use resonance_core::{Journey, JourneyEvent, Phase, SceneId};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Serialize)]
struct PhaseDetail {
    from: Phase,
    to: Phase,
}

#[derive(Serialize)]
struct MountDetail {
    unmount: Option<&'static str>,
    mount: Option<&'static str>,
}

#[derive(Serialize)]
struct MemoryDetail<'a> {
    id: &'a str,
}

pub struct FrameContext {
    pub journey: Rc<RefCell<Journey>>,
    pub document: web::Document,
    pub started: Instant,
    pub overlay: OverlayView,
}

impl FrameContext {
    pub fn new(journey: Rc<RefCell<Journey>>, document: web::Document, started: Instant) -> Self {
        Self {
            journey,
            document,
            started,
            overlay: OverlayView::default(),
        }
    }

    pub fn frame(&mut self) {
        let now_sec = self.started.elapsed().as_secs_f64();
        let events = {
            let mut j = self.journey.borrow_mut();
            j.frame(now_sec);
            j.drain_events()
        };
        // Listeners may call back into the journey, so no borrow is held here.
        for ev in &events {
            publish(ev);
        }
        let j = self.journey.borrow();
        self.overlay
            .render(&self.document, j.curtain(), j.snapshot(), j.back_available());
    }
}

fn publish(ev: &JourneyEvent) {
    match ev {
        JourneyEvent::PhaseChanged { from, to } => {
            dom::emit(EVENT_PHASE, &PhaseDetail { from: *from, to: *to });
        }
        JourneyEvent::Mount(change) => {
            dom::emit(
                EVENT_MOUNT,
                &MountDetail {
                    unmount: change.unmount.map(SceneId::as_str),
                    mount: change.mount.map(SceneId::as_str),
                },
            );
        }
        JourneyEvent::MemoryDeleted(id) => {
            dom::emit(EVENT_MEMORY_DELETED, &MemoryDetail { id });
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
