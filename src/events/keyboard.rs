use super::InputWiring;
use crate::core::KeyAction;
use crate::input::action_for_key;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys whose browser default (scrolling, navigation) must not fire.
#[inline]
fn blocks_default(action: &KeyAction) -> bool {
    matches!(
        action,
        KeyAction::DragMode | KeyAction::Pan(_) | KeyAction::ClearAll | KeyAction::Play
    )
}

pub fn handle_keydown(ev: &web::KeyboardEvent, w: &InputWiring) {
    w.ensure_audio();
    let key = ev.key();
    let Some(action) = action_for_key(&key) else {
        return;
    };
    if blocks_default(&action) {
        ev.prevent_default();
    }
    // Auto-repeat would start a new cascade on every repeat tick.
    if action == KeyAction::Play && ev.repeat() {
        return;
    }
    log::debug!("[keys] down {:?} -> {:?}", key, action);

    let mut notes = Vec::new();
    let now = w.now_ms();
    w.sequencer.borrow_mut().key_down(action, now, &mut notes);
    w.sound(&notes);
}

pub fn handle_keyup(ev: &web::KeyboardEvent, w: &InputWiring) {
    if let Some(action) = action_for_key(&ev.key()) {
        if action.is_hold() {
            w.sequencer.borrow_mut().key_up(action);
        }
    }
}

pub fn wire_keyboard(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };

    let wd = w.clone();
    let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &wd);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
    down.forget();

    let wu = w.clone();
    let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keyup(&ev, &wu);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
    up.forget();
}
