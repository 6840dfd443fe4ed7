use crate::core::SceneHost;
use crate::dom;
use crate::input;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneHost>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_click(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let uv = input::pointer_canvas_uv(&ev, &w.canvas);
        let hovering = w.scene.borrow().hover(input::uv_to_ndc(uv));
        dom::set_cursor(&w.canvas, input::cursor_for_hover(hovering));
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let uv = input::pointer_canvas_uv(&ev, &w.canvas);
        let ndc = input::uv_to_ndc(uv);
        if let Some(id) = w.scene.borrow_mut().click(ndc, Instant::now()) {
            log::debug!("[click] uv=({:.3},{:.3}) spawned {}", uv[0], uv[1], id.raw());
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
