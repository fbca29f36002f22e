#![cfg(target_arch = "wasm32")]
use instant::Instant;
use resonance_core::{Edge, Element, Journey, Landmark, Phase};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod memories;
mod overlay;

thread_local! {
    static JOURNEY: RefCell<Option<Rc<RefCell<Journey>>>> = const { RefCell::new(None) };
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_back_button(document: &web::Document, journey: &Rc<RefCell<Journey>>) {
    let journey = journey.clone();
    dom::add_click_listener(document, constants::BACK_BUTTON_ID, move || {
        if let Err(e) = journey.borrow_mut().back() {
            log::debug!("[ui] back: {}", e);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("resonance-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let started = Instant::now();
    let journey = Rc::new(RefCell::new(Journey::new(Box::new(
        memories::load_from_page,
    ))));
    JOURNEY.with(|slot| *slot.borrow_mut() = Some(journey.clone()));

    wire_back_button(&document, &journey);
    events::wire_global_keydown(journey.clone());
    events::wire_pointer_handlers(events::PointerWiring {
        canvas,
        journey: journey.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        journey, document, started,
    )));
    frame::start_loop(frame_ctx);
    log::info!("[journey] ready in {}", Phase::Entry);
    Ok(())
}

fn accepted<T, E: Display>(intent: &str, result: Result<T, E>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::debug!("[ui] {} ignored: {}", intent, e);
            false
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotView {
    phase: Phase,
    element: Option<Element>,
    landmark: Option<Landmark>,
    mic_ready: bool,
    injecting: bool,
    photo_choice: Option<Landmark>,
    photo_url: Option<String>,
    back_available: bool,
}

/// Script-facing handle for scenes and page chrome. Every intent returns
/// whether it was accepted; rejected intents change nothing.
#[wasm_bindgen]
pub struct JourneyHandle {
    inner: Rc<RefCell<Journey>>,
}

/// The running journey, once `start` has completed.
#[wasm_bindgen]
pub fn journey() -> Option<JourneyHandle> {
    JOURNEY.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|inner| JourneyHandle { inner: inner.clone() })
    })
}

#[wasm_bindgen]
impl JourneyHandle {
    pub fn phase(&self) -> String {
        self.inner.borrow().phase().as_str().to_string()
    }

    pub fn snapshot(&self) -> JsValue {
        let j = self.inner.borrow();
        let s = j.snapshot();
        let view = SnapshotView {
            phase: s.phase,
            element: s.context.element,
            landmark: s.context.landmark.clone(),
            mic_ready: s.flags.mic_ready,
            injecting: s.flags.injecting,
            photo_choice: s.flags.photo_choice.clone(),
            photo_url: s.flags.photo_url.clone(),
            back_available: j.back_available(),
        };
        JsValue::from_serde(&view).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = clickPortal)]
    pub fn click_portal(&self) -> bool {
        accepted("clickPortal", self.inner.borrow_mut().click_portal())
    }

    #[wasm_bindgen(js_name = activateMarker)]
    pub fn activate_marker(&self) -> bool {
        accepted("activateMarker", self.inner.borrow_mut().activate_marker())
    }

    #[wasm_bindgen(js_name = chooseElement)]
    pub fn choose_element(&self, name: &str) -> bool {
        match Element::parse(name) {
            Some(el) => accepted("chooseElement", self.inner.borrow_mut().choose_element(el)),
            None => {
                log::warn!("[ui] unknown element {:?}", name);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = chooseLandmark)]
    pub fn choose_landmark(&self, id: &str) -> bool {
        accepted("chooseLandmark", self.inner.borrow_mut().choose_landmark(id))
    }

    #[wasm_bindgen(js_name = confirmPhoto)]
    pub fn confirm_photo(&self, photo_url: Option<String>) -> bool {
        accepted("confirmPhoto", self.inner.borrow_mut().confirm_photo(photo_url))
    }

    #[wasm_bindgen(js_name = dismissPhotoChoice)]
    pub fn dismiss_photo_choice(&self) {
        self.inner.borrow_mut().dismiss_photo_choice();
    }

    #[wasm_bindgen(js_name = enterTimeCorridor)]
    pub fn enter_time_corridor(&self) -> bool {
        accepted("enterTimeCorridor", self.inner.borrow_mut().enter_time_corridor())
    }

    pub fn back(&self) -> bool {
        accepted("back", self.inner.borrow_mut().back())
    }

    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    #[wasm_bindgen(js_name = setMicReady)]
    pub fn set_mic_ready(&self, ready: bool) {
        self.inner.borrow_mut().set_mic_ready(ready);
    }

    #[wasm_bindgen(js_name = corridorClick)]
    pub fn corridor_click(&self, index: usize) -> bool {
        self.inner.borrow_mut().corridor_click(index)
    }

    #[wasm_bindgen(js_name = corridorCancel)]
    pub fn corridor_cancel(&self) -> bool {
        self.inner.borrow_mut().corridor_cancel()
    }

    #[wasm_bindgen(js_name = corridorStep)]
    pub fn corridor_step(&self, delta: i32) -> bool {
        self.inner.borrow_mut().corridor_step(delta)
    }

    #[wasm_bindgen(js_name = deleteMemory)]
    pub fn delete_memory(&self, id: &str) -> bool {
        self.inner.borrow_mut().delete_memory(id)
    }

    /// `[offset, focusIndex, inspecting, rotX, rotY]` for the corridor scene.
    #[wasm_bindgen(js_name = corridorState)]
    pub fn corridor_state(&self) -> Vec<f32> {
        let j = self.inner.borrow();
        let s = j.corridor().state();
        let inspecting = if j.corridor().view().inspecting { 1.0 } else { 0.0 };
        vec![
            s.camera_x,
            s.focus_index as f32,
            inspecting,
            s.inspect_rotation.x,
            s.inspect_rotation.y,
        ]
    }

    /// `[eyeX, eyeY, eyeZ, lookX, lookY, lookZ]`.
    pub fn camera(&self) -> Vec<f32> {
        let pose = self.inner.borrow().camera().pose();
        vec![
            pose.eye.x,
            pose.eye.y,
            pose.eye.z,
            pose.look_at.x,
            pose.look_at.y,
            pose.look_at.z,
        ]
    }

    /// Column-major view-projection matrix for the current pose.
    #[wasm_bindgen(js_name = viewProjection)]
    pub fn view_projection(&self, aspect: f32) -> Vec<f32> {
        let pose = self.inner.borrow().camera().pose();
        pose.camera(aspect).view_projection().to_cols_array().to_vec()
    }

    /// Linear progress of a named choreography step, if that edge is playing.
    pub fn progress(&self, edge: &str, step: &str) -> Option<f32> {
        let edge = Edge::parse(edge)?;
        self.inner.borrow().progress(edge, step)
    }

    #[wasm_bindgen(js_name = mountedScene)]
    pub fn mounted_scene(&self) -> Option<String> {
        self.inner
            .borrow()
            .mounted_scene()
            .map(|s| s.as_str().to_string())
    }
}
