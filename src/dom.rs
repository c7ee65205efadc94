use crate::core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has the wrong element type: {:?}", id, e))
}

/// Size the canvas to fill the window. The backing store is scaled by the
/// device pixel ratio; drawing happens in CSS pixels.
pub fn fit_canvas_to_window(canvas: &web::HtmlCanvasElement) -> Viewport {
    let Some(w) = web::window() else {
        return Viewport::new(canvas.width() as f32, canvas.height() as f32);
    };
    let css_w = w
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(canvas.width() as f64);
    let css_h = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(canvas.height() as f64);
    let dpr = w.device_pixel_ratio().max(1.0);
    canvas.set_width(((css_w * dpr) as u32).max(1));
    canvas.set_height(((css_h * dpr) as u32).max(1));
    _ = canvas.set_attribute(
        "style",
        &format!("width:{}px;height:{}px;display:block", css_w, css_h),
    );
    Viewport::new(css_w as f32, css_h as f32)
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .max(1.0)
}
