//! Timer-delayed playback cascade.
//!
//! Playing a block emits a note and schedules, one hop delay later, a play on
//! every block its connections point to. Each of those does the same. Nothing
//! is de-duplicated: reconverging paths replay a block once per path, and a
//! cycle keeps replaying until the blocks are cleared or the queue is
//! cancelled.

use super::block::{BlockId, Waveform};
use super::block_map::BlockMap;
use super::grid::{Direction, GridPoint};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// A tone to start now.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteEvent {
    pub block: BlockId,
    pub at: GridPoint,
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub duration_sec: f32,
    /// When the note was due, on the caller's millisecond clock.
    pub due_ms: f64,
}

/// A pending play aimed at one specific block instance.
#[derive(Clone, Copy, Debug)]
struct Signal {
    due_ms: f64,
    at: GridPoint,
    block: BlockId,
}

// A zero delay would let a cycle fire forever inside one tick.
const MIN_DELAY_MS: f64 = 1.0;

pub struct Cascade {
    delay_ms: f64,
    // Sorted by due time; equal due times keep insertion order.
    queue: VecDeque<Signal>,
}

impl Cascade {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(MIN_DELAY_MS),
            queue: VecDeque::new(),
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Number of signals waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.queue.is_empty() {
            log::info!("[cascade] cancelled {} pending signals", self.queue.len());
        }
        self.queue.clear();
    }

    /// Play the block at `origin` right away. Returns false on an empty cell.
    pub fn trigger(
        &mut self,
        origin: GridPoint,
        blocks: &mut BlockMap,
        now_ms: f64,
        out: &mut Vec<NoteEvent>,
    ) -> bool {
        let Some(id) = blocks.get(origin).map(|b| b.id) else {
            log::debug!("[cascade] nothing to play at {}", origin);
            return false;
        };
        self.fire(
            Signal {
                due_ms: now_ms,
                at: origin,
                block: id,
            },
            blocks,
            now_ms,
            out,
        )
    }

    /// Fire every signal due at or before `now_ms`, oldest first.
    ///
    /// Children are always due after `now_ms`, so a stalled clock plays at
    /// most one hop per pending signal rather than replaying the whole gap.
    /// Returns the cells that actually played.
    pub fn tick(
        &mut self,
        blocks: &mut BlockMap,
        now_ms: f64,
        out: &mut Vec<NoteEvent>,
    ) -> Vec<GridPoint> {
        let mut played = Vec::new();
        while let Some(sig) = self.queue.front().copied() {
            if sig.due_ms > now_ms {
                break;
            }
            self.queue.pop_front();
            if self.fire(sig, blocks, now_ms, out) {
                played.push(sig.at);
            }
        }
        played
    }

    fn schedule(&mut self, sig: Signal) {
        let idx = self.queue.partition_point(|s| s.due_ms <= sig.due_ms);
        self.queue.insert(idx, sig);
    }

    fn fire(
        &mut self,
        sig: Signal,
        blocks: &mut BlockMap,
        now_ms: f64,
        out: &mut Vec<NoteEvent>,
    ) -> bool {
        let (voice, dirs) = match blocks.get(sig.at) {
            Some(b) if b.id == sig.block => {
                let dirs: SmallVec<[Direction; 4]> = b.connections.iter().map(|c| c.to).collect();
                (b.voice, dirs)
            }
            // Cleared, removed or replaced since the signal was scheduled.
            _ => return false,
        };

        out.push(NoteEvent {
            block: sig.block,
            at: sig.at,
            frequency_hz: voice.frequency_hz(),
            waveform: voice.waveform,
            duration_sec: voice.duration_sec,
            due_ms: sig.due_ms,
        });

        let child_due = sig.due_ms.max(now_ms) + self.delay_ms;
        for dir in dirs {
            let target = sig.at.offset(dir);
            let Some(target_id) = blocks.get(target).map(|b| b.id) else {
                continue;
            };
            self.schedule(Signal {
                due_ms: child_due,
                at: target,
                block: target_id,
            });
            if let Some(b) = blocks.get_mut(sig.at) {
                b.flash(dir);
            }
        }
        true
    }
}
