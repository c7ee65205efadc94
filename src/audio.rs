use crate::core::{BlockId, NoteEvent, Waveform, NOTE_ATTACK_SEC};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use web_sys as web;

// Extra time after the envelope reaches zero before the oscillator stops.
const STOP_TAIL_SEC: f64 = 0.05;

/// A note that may still be audible.
struct Sounding {
    gain: web::GainNode,
    end_time: f64,
}

/// WebAudio output: one short oscillator per note, tracked per block so a
/// killed block can be muted mid-note.
pub struct AudioOut {
    ctx: web::AudioContext,
    master: web::GainNode,
    sounding: FnvHashMap<BlockId, SmallVec<[Sounding; 2]>>,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

#[inline]
fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

impl AudioOut {
    /// Must run inside a user gesture handler or the context stays suspended.
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new()
            .map_err(|e| anyhow::anyhow!("AudioContext error: {:?}", e))?;
        _ = ctx.resume();
        let master = create_gain(&ctx, 1.0, "Master")?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow::anyhow!("connect master: {:?}", e))?;
        log::info!("[audio] context started at {} Hz", ctx.sample_rate());
        Ok(Self {
            ctx,
            master,
            sounding: FnvHashMap::default(),
        })
    }

    pub fn play(&mut self, ev: &NoteEvent, peak_gain: f32) {
        let src = match web::OscillatorNode::new(&self.ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("OscillatorNode error: {:?}", e);
                return;
            }
        };
        src.set_type(oscillator_type(ev.waveform));
        src.frequency().set_value(ev.frequency_hz);
        let gain = match create_gain(&self.ctx, 0.0, "Note") {
            Ok(g) => g,
            Err(e) => {
                log::error!("{:?}", e);
                return;
            }
        };

        let t0 = self.ctx.current_time();
        let duration = (ev.duration_sec as f64).max(NOTE_ATTACK_SEC * 2.0);
        let end_time = t0 + duration;
        _ = gain.gain().set_value_at_time(0.0, t0);
        _ = gain
            .gain()
            .linear_ramp_to_value_at_time(peak_gain, t0 + NOTE_ATTACK_SEC);
        _ = gain.gain().linear_ramp_to_value_at_time(0.0, end_time);
        _ = src.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&self.master);
        _ = src.start_with_when(t0);
        _ = src.stop_with_when(end_time + STOP_TAIL_SEC);

        self.sounding
            .entry(ev.block)
            .or_default()
            .push(Sounding { gain, end_time });
    }

    /// Cut whatever a block is still playing.
    pub fn silence(&mut self, id: BlockId) {
        let Some(notes) = self.sounding.remove(&id) else {
            return;
        };
        let now = self.ctx.current_time();
        for n in notes {
            _ = n.gain.gain().cancel_scheduled_values(now);
            _ = n.gain.gain().set_value_at_time(0.0, now);
        }
    }

    /// Forget notes whose envelope has finished.
    pub fn prune(&mut self) {
        let now = self.ctx.current_time();
        self.sounding.retain(|_, notes| {
            notes.retain(|n| n.end_time > now);
            !notes.is_empty()
        });
    }

    pub fn resume(&self) {
        _ = self.ctx.resume();
    }
}
