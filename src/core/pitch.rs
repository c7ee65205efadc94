use super::constants::{A4_HZ, A4_KEY, HIGHEST_KEY, LOWEST_KEY};

const NOTE_NAMES: [&str; 12] = [
    "A", "A#/Bb", "B", "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab",
];

/// Frequency of a piano key (key 49 = A4 = 440 Hz).
pub fn key_to_hz(key: i32) -> f32 {
    A4_HZ * (2.0_f32).powf((key - A4_KEY) as f32 / 12.0)
}

#[inline]
pub fn clamp_key(key: i32) -> i32 {
    key.clamp(LOWEST_KEY, HIGHEST_KEY)
}

#[inline]
pub fn in_range(key: i32) -> bool {
    (LOWEST_KEY..=HIGHEST_KEY).contains(&key)
}

/// Display name such as `C4` or `F#/Gb5`, for keys in the playable range.
pub fn pitch_name(key: i32) -> Option<String> {
    if !in_range(key) {
        return None;
    }
    // Key 1 is A0; octave numbers roll over at C (three keys above A).
    let idx = (key - 1).rem_euclid(12) as usize;
    let octave = (key + 8) / 12;
    Some(format!("{}{}", NOTE_NAMES[idx], octave))
}

/// Closest playable key for a frequency.
pub fn nearest_key(hz: f32) -> i32 {
    if hz.is_nan() || hz <= 0.0 {
        return LOWEST_KEY;
    }
    let k = A4_KEY as f32 + 12.0 * (hz / A4_HZ).log2();
    clamp_key(k.round() as i32)
}
