/// Frame, drawing and input tuning constants.
///
/// Per-frame quantities assume the fixed 60 Hz step driven by the frame loop.
// Frame stepping
pub const FRAME_STEP_MS: f64 = 1000.0 / 60.0;
pub const MAX_STEPS_PER_FRAME: u32 = 4; // catch-up cap after a stalled tab

// Camera
pub const CAMERA_SPEED: f32 = 5.0; // px per frame while an arrow key is held

// Signal marker
pub const MARKER_RADIUS: f64 = 20.0;
pub const MARKER_FADE_PER_FRAME: f32 = 1.0 / 30.0;

// Connection flash (red highlight while a signal travels)
pub const FLASH_DECAY_PER_FRAME: f32 = 1.0 / 20.0;
pub const ARROW_HEAD_PX: f64 = 10.0;

// Labels and borders
pub const FONT_SIZE: u32 = 14;
pub const LABEL_INSET_PX: f64 = 5.0;
pub const THIN_LINE_PX: f64 = 1.0;
pub const THICK_LINE_PX: f64 = 4.0;
pub const THICK_BORDER_INSET_PX: f64 = 3.0; // drawn inside the cell
