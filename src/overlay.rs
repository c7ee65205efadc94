use crate::core::{pitch, Info};
use web_sys as web;

fn swatch(css: &str) -> String {
    format!("<span style='background:{}'>&nbsp;&nbsp;&nbsp;</span>", css)
}

/// Info panel markup for the current state.
fn info_html(info: &Info) -> String {
    let mut html = format!(
        "<div>frame: {}</div><div>selected: {}</div><div>connect mode: {}</div>",
        info.frame, info.selected, info.connect_mode
    );
    if let Some(v) = &info.voice {
        let name = pitch::pitch_name(v.piano_key).unwrap_or_default();
        html.push_str(&format!(
            "<div>block: {} {} ({:.1} Hz) {}</div>",
            v.waveform.label(),
            name,
            v.frequency_hz(),
            swatch(&v.color.css())
        ));
    }
    html.push_str(&format!(
        "<div>blocks: {} • signals: {}</div>",
        info.blocks, info.pending_signals
    ));
    html
}

pub fn update_info(el: &web::HtmlElement, info: &Info) {
    el.set_inner_html(&info_html(info));
}
