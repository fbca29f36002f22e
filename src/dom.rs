use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] no #{} to wire", element_id);
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn set_hidden(el: &web::Element, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1(crate::constants::HIDDEN_CLASS);
    } else {
        _ = cl.remove_1(crate::constants::HIDDEN_CLASS);
    }
}

/// Fire a `CustomEvent` on the window with `detail` serialised to a JS object.
pub fn emit<T: Serialize>(name: &str, detail: &T) {
    let Some(window) = web::window() else {
        return;
    };
    let detail = match JsValue::from_serde(detail) {
        Ok(v) => v,
        Err(e) => {
            log::error!("[dom] {} detail: {}", name, e);
            return;
        }
    };
    let init = web::CustomEventInit::new();
    init.set_detail(&detail);
    match web::CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(ev) => {
            _ = window.dispatch_event(&ev);
        }
        Err(e) => log::error!("[dom] {} event: {:?}", name, e),
    }
}
