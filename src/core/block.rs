use super::constants::DEFAULT_NOTE_DURATION_SEC;
use super::grid::Direction;
use super::pitch;
use smallvec::SmallVec;

/// Basic oscillator shape used by the web audio output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Waveform {
    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Saw => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const PINK: Rgb = Rgb(255, 192, 203);
    pub const LIGHT_BLUE: Rgb = Rgb(0xc6, 0xe1, 0xff);
    pub const LIGHT_ORANGE: Rgb = Rgb(0xff, 0xe2, 0x9f);
    pub const LIGHT_GREEN: Rgb = Rgb(186, 255, 184);
    pub const LIGHT_PURPLE: Rgb = Rgb(208, 144, 248);
    pub const LIGHT_PINK: Rgb = Rgb(255, 179, 186);
    pub const LIGHT_TEAL: Rgb = Rgb(178, 236, 225);

    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }

    /// Linear blend towards `other`; `t` is clamped to 0..1.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(
            lerp(self.0, other.0),
            lerp(self.1, other.1),
            lerp(self.2, other.2),
        )
    }
}

/// Sound and look of a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    pub color: Rgb,
    pub waveform: Waveform,
    pub piano_key: i32,
    pub duration_sec: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            color: Rgb::PINK,
            waveform: Waveform::Sine,
            piano_key: 49, // A4
            duration_sec: DEFAULT_NOTE_DURATION_SEC,
        }
    }
}

impl Voice {
    #[inline]
    pub fn frequency_hz(&self) -> f32 {
        pitch::key_to_hz(self.piano_key)
    }

    /// Shift by `semitones`, staying inside the playable key range.
    pub fn transposed(self, semitones: i32) -> Voice {
        Voice {
            piano_key: pitch::clamp_key(self.piano_key + semitones),
            ..self
        }
    }
}

/// Identity of a block instance; never reused after the block is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

/// Directed edge to the neighbor in `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub to: Direction,
    /// Red highlight intensity, 0 when idle and 1 right after a signal left.
    pub flash: f32,
}

#[derive(Clone, Debug)]
pub struct Block {
    pub id: BlockId,
    pub voice: Voice,
    pub connections: SmallVec<[Connection; 4]>,
}

impl Block {
    pub fn new(id: BlockId, voice: Voice) -> Self {
        Self {
            id,
            voice,
            connections: SmallVec::new(),
        }
    }

    pub fn is_connected(&self, dir: Direction) -> bool {
        self.connections.iter().any(|c| c.to == dir)
    }

    /// Add an edge; returns false if one already points that way.
    pub fn add_connection(&mut self, dir: Direction) -> bool {
        if self.is_connected(dir) {
            return false;
        }
        self.connections.push(Connection { to: dir, flash: 0.0 });
        true
    }

    pub fn flash(&mut self, dir: Direction) {
        if let Some(c) = self.connections.iter_mut().find(|c| c.to == dir) {
            c.flash = 1.0;
        }
    }

    pub fn decay_flashes(&mut self, amount: f32) {
        for c in &mut self.connections {
            c.flash = (c.flash - amount).max(0.0);
        }
    }
}
