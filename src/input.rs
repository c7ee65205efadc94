use crate::core::{Direction, KeyAction, Rgb, Voice, Waveform, DEFAULT_NOTE_DURATION_SEC};
#[cfg(target_arch = "wasm32")]
use glam::Vec2;

const fn preset(color: Rgb, waveform: Waveform, piano_key: i32) -> Voice {
    Voice {
        color,
        waveform,
        piano_key,
        duration_sec: DEFAULT_NOTE_DURATION_SEC,
    }
}

#[inline]
pub fn preset_for_key(key: &str) -> Option<Voice> {
    match key {
        "q" | "Q" => Some(preset(Rgb::LIGHT_BLUE, Waveform::Saw, 37)), // A3, 220 Hz
        "w" | "W" => Some(preset(Rgb::LIGHT_ORANGE, Waveform::Sine, 49)), // A4, 440 Hz
        "e" | "E" => Some(preset(Rgb::LIGHT_PINK, Waveform::Square, 44)), // E4
        "r" | "R" => Some(preset(Rgb::LIGHT_TEAL, Waveform::Triangle, 40)), // C4
        _ => None,
    }
}

#[inline]
pub fn pan_direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" => Some(Direction::Left),
        "ArrowUp" => Some(Direction::Up),
        "ArrowRight" => Some(Direction::Right),
        "ArrowDown" => Some(Direction::Down),
        _ => None,
    }
}

/// Map a `KeyboardEvent.key` value to an action.
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if let Some(voice) = preset_for_key(key) {
        return Some(KeyAction::Assign(voice));
    }
    if let Some(dir) = pan_direction_for_key(key) {
        return Some(KeyAction::Pan(dir));
    }
    match key {
        "[" => Some(KeyAction::Transpose(-1)),
        "]" => Some(KeyAction::Transpose(1)),
        "Enter" => Some(KeyAction::Play),
        "c" | "C" => Some(KeyAction::ConnectMode),
        " " => Some(KeyAction::DragMode),
        "Backspace" => Some(KeyAction::ClearAll),
        "Delete" => Some(KeyAction::RemoveSelected),
        "Escape" => Some(KeyAction::CancelCascade),
        _ => None,
    }
}

/// Cursor position relative to the canvas' top-left corner, in CSS pixels.
#[cfg(target_arch = "wasm32")]
#[inline]
pub fn cursor_canvas_px(ev: &web_sys::MouseEvent, canvas: &web_sys::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
