// Grid, playback and pitch constants shared by the core and the web frontend.

// Grid layout
pub const BLOCK_SIZE: f32 = 100.0; // px per cell edge
pub const HALF_BLOCK: f32 = BLOCK_SIZE / 2.0;

// Playback
pub const CASCADE_DELAY_MS: f64 = 500.0; // hop delay between connected blocks
pub const DEFAULT_NOTE_DURATION_SEC: f32 = 0.5;
pub const NOTE_ATTACK_SEC: f64 = 0.005;
pub const NOTE_PEAK_GAIN: f32 = 0.2;

// Pitch range, piano key numbering (49 = A4)
pub const A4_KEY: i32 = 49;
pub const A4_HZ: f32 = 440.0;
pub const LOWEST_KEY: i32 = 16; // C2
pub const HIGHEST_KEY: i32 = 76; // C7
