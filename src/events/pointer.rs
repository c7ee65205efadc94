use super::InputWiring;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer(w: &InputWiring) {
    wire_mousedown(w);
    wire_mousemove(w);
    wire_mouseup(w);
}

fn wire_mousedown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        w.ensure_audio();
        let cursor = input::cursor_canvas_px(&ev, &w.canvas);
        let viewport = *w.viewport.borrow();
        let mut seq = w.sequencer.borrow_mut();
        seq.mouse_down(cursor, &viewport);
        if seq.is_dragging() {
            log::debug!("[mouse] begin drag at ({:.0}, {:.0})", cursor.x, cursor.y);
        } else {
            log::debug!("[mouse] selected {}", seq.selected());
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mousemove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !w.sequencer.borrow().is_dragging() {
            return;
        }
        let cursor = input::cursor_canvas_px(&ev, &w.canvas);
        w.sequencer.borrow_mut().mouse_move(cursor);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_mouseup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        w.sequencer.borrow_mut().mouse_up();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
