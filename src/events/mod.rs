pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_keyboard;
pub use pointer::wire_pointer;

use crate::audio::AudioOut;
use crate::core::{NoteEvent, Sequencer, Viewport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Handles shared by the input listeners and the frame loop.
#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub sequencer: Rc<RefCell<Sequencer>>,
    pub audio: Rc<RefCell<Option<AudioOut>>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub started_at: Instant,
}

impl InputWiring {
    /// Milliseconds since startup; the clock every cascade timestamp uses.
    pub fn now_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }

    /// Browsers only allow audio after a user gesture, so the context is
    /// created lazily from the first key or mouse press.
    pub fn ensure_audio(&self) {
        let mut audio = self.audio.borrow_mut();
        match audio.as_ref() {
            Some(a) => a.resume(),
            None => match AudioOut::new() {
                Ok(a) => *audio = Some(a),
                Err(e) => log::error!("audio init error: {:?}", e),
            },
        }
    }

    /// Send notes to the speakers and mute anything the sequencer killed.
    pub fn sound(&self, notes: &[NoteEvent]) {
        let killed = self.sequencer.borrow_mut().take_killed();
        let peak = self.sequencer.borrow().config.note_peak_gain;
        let mut audio = self.audio.borrow_mut();
        let Some(out) = audio.as_mut() else {
            return;
        };
        for id in killed {
            out.silence(id);
        }
        for n in notes {
            out.play(n, peak);
        }
    }
}
