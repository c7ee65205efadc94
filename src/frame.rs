use crate::constants::{FRAME_STEP_MS, MAX_STEPS_PER_FRAME};
use crate::dom;
use crate::events::InputWiring;
use crate::overlay;
use crate::render::Painter;
use crate::scene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub wiring: InputWiring,
    pub painter: Painter,
    pub info: web::HtmlElement,
    pub last_ms: f64,
    pub accum_ms: f64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.wiring.now_ms();
        self.accum_ms += (now - self.last_ms).max(0.0);
        self.last_ms = now;

        let mut notes = Vec::new();
        let mut steps = 0;
        {
            let mut seq = self.wiring.sequencer.borrow_mut();
            while self.accum_ms >= FRAME_STEP_MS && steps < MAX_STEPS_PER_FRAME {
                seq.step(now, &mut notes);
                self.accum_ms -= FRAME_STEP_MS;
                steps += 1;
            }
        }
        if steps == MAX_STEPS_PER_FRAME && self.accum_ms >= FRAME_STEP_MS {
            log::debug!("[frame] dropping {:.0} ms of backlog", self.accum_ms);
            self.accum_ms = 0.0;
        }
        if steps == 0 {
            return;
        }

        self.wiring.sound(&notes);
        if let Some(out) = self.wiring.audio.borrow_mut().as_mut() {
            out.prune();
        }

        let viewport = *self.wiring.viewport.borrow();
        let seq = self.wiring.sequencer.borrow();
        let cmds = scene::build(&seq, &viewport);
        self.painter
            .begin(&self.wiring.canvas, dom::device_pixel_ratio());
        self.painter.paint(&cmds);
        overlay::update_info(&self.info, &seq.info());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
