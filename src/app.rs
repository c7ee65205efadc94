use crate::core::{Sequencer, SequencerConfig};
use crate::dom;
use crate::events::{self, InputWiring};
use crate::frame::{self, FrameContext};
use crate::render::Painter;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

fn wire_canvas_resize(w: &InputWiring) {
    let w = w.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let vp = dom::fit_canvas_to_window(&w.canvas);
        *w.viewport.borrow_mut() = vp;
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("grid-sequencer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, "canvas")?;
    let info: web::HtmlElement = dom::element_by_id(&document, "info")?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("getContext error: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let viewport = dom::fit_canvas_to_window(&canvas);
    let config = SequencerConfig::default();
    log::info!(
        "[init] viewport {}x{} cascade delay {} ms",
        viewport.width,
        viewport.height,
        config.cascade_delay_ms
    );

    let wiring = InputWiring {
        canvas,
        sequencer: Rc::new(RefCell::new(Sequencer::new(config))),
        audio: Rc::new(RefCell::new(None)),
        viewport: Rc::new(RefCell::new(viewport)),
        started_at: Instant::now(),
    };

    wire_canvas_resize(&wiring);
    events::wire_keyboard(&wiring);
    events::wire_pointer(&wiring);

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        last_ms: wiring.now_ms(),
        wiring,
        painter: Painter::new(ctx),
        info,
        accum_ms: 0.0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
