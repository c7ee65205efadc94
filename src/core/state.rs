//! Interactive sequencer state: the grid, what is selected, what is held down,
//! and what is currently playing.
//!
//! Everything here is platform-agnostic. The web frontend feeds it decoded
//! input (`KeyAction`s and canvas-space cursor positions), calls `step` once
//! per 60 Hz frame, and turns the emitted `NoteEvent`s into sound.

use super::block::{BlockId, Voice};
use super::block_map::{Assigned, BlockMap};
use super::cascade::{Cascade, NoteEvent};
use super::constants::{CASCADE_DELAY_MS, NOTE_PEAK_GAIN};
use super::grid::{canvas_to_block, Camera, Direction, GridPoint, HeldArrows, Viewport};
use crate::constants::{CAMERA_SPEED, FLASH_DECAY_PER_FRAME, MARKER_FADE_PER_FRAME};
use glam::Vec2;
use smallvec::SmallVec;

/// Decoded keyboard input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    /// Create or re-voice the selected block.
    Assign(Voice),
    /// Shift the selected block's pitch by semitones.
    Transpose(i32),
    Play,
    /// Held: clicking a neighbor connects the selection to it.
    ConnectMode,
    /// Held: mouse drags pan the camera.
    DragMode,
    /// Held: pan the camera.
    Pan(Direction),
    ClearAll,
    RemoveSelected,
    CancelCascade,
}

impl KeyAction {
    /// Hold keys stay active until released.
    pub fn is_hold(&self) -> bool {
        matches!(
            self,
            KeyAction::ConnectMode | KeyAction::DragMode | KeyAction::Pan(_)
        )
    }
}

/// Runtime tuning for the sequencer.
///
/// - `camera_speed`: px per frame while an arrow key is held
/// - `cascade_delay_ms`: delay between a block playing and its neighbors playing
/// - `marker_fade_per_frame`: alpha lost by a signal marker each frame
/// - `flash_decay_per_frame`: red highlight lost by a connection each frame
/// - `note_peak_gain`: envelope peak used by the audio output
#[derive(Clone, Debug, PartialEq)]
pub struct SequencerConfig {
    pub camera_speed: f32,
    pub cascade_delay_ms: f64,
    pub marker_fade_per_frame: f32,
    pub flash_decay_per_frame: f32,
    pub note_peak_gain: f32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            camera_speed: CAMERA_SPEED,
            cascade_delay_ms: CASCADE_DELAY_MS,
            marker_fade_per_frame: MARKER_FADE_PER_FRAME,
            flash_decay_per_frame: FLASH_DECAY_PER_FRAME,
            note_peak_gain: NOTE_PEAK_GAIN,
        }
    }
}

/// Fading circle drawn where a signal just played.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub at: GridPoint,
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub hold_point: Vec2,
    pub origin: Camera,
}

/// Snapshot for the info panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Info {
    pub frame: u64,
    pub selected: GridPoint,
    pub connect_mode: bool,
    pub voice: Option<Voice>,
    pub blocks: usize,
    pub pending_signals: usize,
}

pub struct Sequencer {
    pub config: SequencerConfig,
    blocks: BlockMap,
    camera: Camera,
    selected: GridPoint,
    connect_mode: bool,
    drag_held: bool,
    arrows: HeldArrows,
    drag: Option<DragState>,
    frame: u64,
    markers: Vec<Marker>,
    cascade: Cascade,
    killed: Vec<BlockId>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

impl Sequencer {
    pub fn new(config: SequencerConfig) -> Self {
        let cascade = Cascade::new(config.cascade_delay_ms);
        Self {
            config,
            blocks: BlockMap::new(),
            camera: Camera::default(),
            selected: GridPoint::ORIGIN,
            connect_mode: false,
            drag_held: false,
            arrows: HeldArrows::default(),
            drag: None,
            frame: 0,
            markers: Vec::new(),
            cascade,
            killed: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &BlockMap {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut BlockMap {
        &mut self.blocks
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selected(&self) -> GridPoint {
        self.selected
    }

    pub fn select(&mut self, p: GridPoint) {
        self.selected = p;
    }

    pub fn connect_mode(&self) -> bool {
        self.connect_mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn pending_signals(&self) -> usize {
        self.cascade.pending()
    }

    /// Ids killed since the last call; their sound should be muted.
    pub fn take_killed(&mut self) -> Vec<BlockId> {
        std::mem::take(&mut self.killed)
    }

    /// Occupied neighbors of the selection that a click would connect to.
    pub fn connect_candidates(&self) -> SmallVec<[GridPoint; 4]> {
        if self.connect_mode {
            self.blocks.neighbors(self.selected)
        } else {
            SmallVec::new()
        }
    }

    pub fn info(&self) -> Info {
        Info {
            frame: self.frame,
            selected: self.selected,
            connect_mode: self.connect_mode,
            voice: self.blocks.get(self.selected).map(|b| b.voice),
            blocks: self.blocks.len(),
            pending_signals: self.cascade.pending(),
        }
    }

    pub fn key_down(&mut self, action: KeyAction, now_ms: f64, out: &mut Vec<NoteEvent>) {
        match action {
            KeyAction::Assign(voice) => match self.blocks.assign(self.selected, voice) {
                Assigned::Created(id) => {
                    log::info!("[keys] created block {:?} at {}", id, self.selected)
                }
                Assigned::Updated(id) => {
                    log::info!("[keys] re-voiced block {:?} at {}", id, self.selected)
                }
            },
            KeyAction::Transpose(semitones) => {
                if let Some(b) = self.blocks.get_mut(self.selected) {
                    b.voice = b.voice.transposed(semitones);
                }
            }
            KeyAction::Play => {
                if self
                    .cascade
                    .trigger(self.selected, &mut self.blocks, now_ms, out)
                {
                    self.markers.push(Marker {
                        at: self.selected,
                        alpha: 1.0,
                    });
                }
            }
            KeyAction::ConnectMode => self.connect_mode = true,
            KeyAction::DragMode => self.drag_held = true,
            KeyAction::Pan(dir) => self.arrows.set(dir, true),
            KeyAction::ClearAll => {
                let ids = self.blocks.clear();
                log::info!("[keys] cleared {} blocks", ids.len());
                self.killed.extend(ids);
            }
            KeyAction::RemoveSelected => {
                if let Some(b) = self.blocks.remove(self.selected) {
                    log::info!("[keys] removed block {:?} at {}", b.id, self.selected);
                    self.killed.push(b.id);
                }
            }
            KeyAction::CancelCascade => self.cascade.cancel_all(),
        }
    }

    pub fn key_up(&mut self, action: KeyAction) {
        match action {
            KeyAction::ConnectMode => self.connect_mode = false,
            KeyAction::DragMode => self.drag_held = false,
            KeyAction::Pan(dir) => self.arrows.set(dir, false),
            _ => {}
        }
    }

    /// Press at a canvas-space cursor position.
    pub fn mouse_down(&mut self, cursor: Vec2, viewport: &Viewport) {
        if self.drag_held {
            self.drag = Some(DragState {
                hold_point: cursor,
                origin: self.camera,
            });
            return;
        }

        let clicked = canvas_to_block(cursor, &self.camera, viewport);
        if self.connect_mode
            && self.blocks.neighbors(self.selected).contains(&clicked)
            && self.blocks.connect(self.selected, clicked)
        {
            log::info!("[mouse] connected {} -> {}", self.selected, clicked);
        }
        self.selected = clicked;
    }

    pub fn mouse_move(&mut self, cursor: Vec2) {
        if let Some(d) = self.drag {
            self.camera = Camera::dragged(d.origin, d.hold_point, cursor);
        }
    }

    pub fn mouse_up(&mut self) {
        self.drag = None;
    }

    /// Advance one frame: fade visuals, fire due signals, pan the camera.
    pub fn step(&mut self, now_ms: f64, out: &mut Vec<NoteEvent>) {
        self.frame += 1;

        let fade = self.config.marker_fade_per_frame;
        self.markers.retain_mut(|m| {
            m.alpha -= fade;
            m.alpha > 0.0
        });
        self.blocks.decay_flashes(self.config.flash_decay_per_frame);

        for at in self.cascade.tick(&mut self.blocks, now_ms, out) {
            self.markers.push(Marker { at, alpha: 1.0 });
        }

        self.camera.step_held(self.arrows, self.config.camera_speed);
    }
}
