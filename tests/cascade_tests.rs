// Host-side tests for the delayed playback cascade.

use grid_sequencer::core::*;

const DELAY: f64 = 500.0;

fn p(x: i32, y: i32) -> GridPoint {
    GridPoint::new(x, y)
}

/// Blocks at `points`, each connected to the next.
fn chain(points: &[GridPoint]) -> BlockMap {
    let mut blocks = BlockMap::new();
    for (i, pt) in points.iter().enumerate() {
        blocks.assign(
            *pt,
            Voice {
                piano_key: 40 + i as i32,
                ..Voice::default()
            },
        );
    }
    for pair in points.windows(2) {
        assert!(blocks.connect(pair[0], pair[1]));
    }
    blocks
}

fn cells(notes: &[NoteEvent]) -> Vec<GridPoint> {
    notes.iter().map(|n| n.at).collect()
}

#[test]
fn trigger_plays_origin_immediately() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();

    assert!(cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out));
    assert_eq!(out.len(), 1);
    let note = &out[0];
    assert_eq!(note.at, p(0, 0));
    assert_eq!(note.block, blocks.get(p(0, 0)).expect("block").id);
    assert!((note.frequency_hz - 261.63).abs() < 0.01);
    assert_eq!(note.waveform, Waveform::Sine);
    assert_eq!(note.due_ms, 0.0);
    assert_eq!(cascade.pending(), 1);
}

#[test]
fn trigger_on_empty_cell_is_a_no_op() {
    let mut blocks = BlockMap::new();
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    assert!(!cascade.trigger(p(3, 3), &mut blocks, 0.0, &mut out));
    assert!(out.is_empty());
    assert_eq!(cascade.pending(), 0);
}

#[test]
fn each_hop_plays_one_delay_after_its_parent() {
    let mut blocks = chain(&[p(0, 0), p(1, 0), p(2, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 100.0, &mut out);
    out.clear();

    assert!(cascade.tick(&mut blocks, 599.0, &mut out).is_empty());
    assert!(out.is_empty());

    assert_eq!(cascade.tick(&mut blocks, 600.0, &mut out), vec![p(1, 0)]);
    assert_eq!(out[0].due_ms, 600.0);

    // a late tick plays the hop that was due and reports its due time
    out.clear();
    assert_eq!(cascade.tick(&mut blocks, 1_150.0, &mut out), vec![p(2, 0)]);
    assert_eq!(out[0].due_ms, 1_100.0);

    out.clear();
    assert!(cascade.tick(&mut blocks, 10_000.0, &mut out).is_empty());
    assert_eq!(cascade.pending(), 0);
}

#[test]
fn a_late_tick_plays_one_hop_and_reschedules_from_now() {
    let mut blocks = chain(&[p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    out.clear();

    assert_eq!(cascade.tick(&mut blocks, 1_000.0, &mut out), vec![p(1, 0)]);
    assert_eq!(cascade.pending(), 1);

    assert!(cascade.tick(&mut blocks, 1_499.0, &mut out).is_empty());
    assert_eq!(cascade.tick(&mut blocks, 1_500.0, &mut out), vec![p(2, 0)]);
}

#[test]
fn a_stalled_loop_plays_one_hop_per_edge() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    blocks.connect(p(1, 0), p(0, 0));
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    out.clear();

    let played = cascade.tick(&mut blocks, 60_000.0, &mut out);
    assert_eq!(played, vec![p(1, 0)]);
    assert_eq!(out.len(), 1);
    assert_eq!(cascade.pending(), 1);

    out.clear();
    assert!(cascade.tick(&mut blocks, 60_499.0, &mut out).is_empty());
    assert_eq!(cascade.tick(&mut blocks, 60_500.0, &mut out), vec![p(0, 0)]);
}

#[test]
fn a_stalled_fan_out_loop_does_not_burst() {
    // 2x2 square with every edge in both directions
    let square = [p(0, 0), p(1, 0), p(0, 1), p(1, 1)];
    let mut blocks = BlockMap::new();
    for pt in square {
        blocks.assign(pt, Voice::default());
    }
    for a in square {
        for b in square {
            blocks.connect(a, b);
        }
    }

    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    assert_eq!(cascade.pending(), 2);
    out.clear();

    let played = cascade.tick(&mut blocks, 8_000.0, &mut out);
    assert_eq!(played.len(), 2);
    assert_eq!(out.len(), 2);
    assert_eq!(cascade.pending(), 4);
}

#[test]
fn fan_out_plays_every_connected_neighbor() {
    let mut blocks = BlockMap::new();
    for pt in [p(0, 0), p(1, 0), p(0, 1), p(-1, 0)] {
        blocks.assign(pt, Voice::default());
    }
    blocks.connect(p(0, 0), p(1, 0));
    blocks.connect(p(0, 0), p(0, 1));
    blocks.connect(p(0, 0), p(-1, 0));

    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    assert_eq!(cascade.pending(), 3);

    out.clear();
    let mut played = cascade.tick(&mut blocks, DELAY, &mut out);
    played.sort();
    assert_eq!(played, vec![p(-1, 0), p(0, 1), p(1, 0)]);
}

#[test]
fn reconverging_paths_replay_a_block_once_per_path() {
    // (0,1) -> (1,1)
    //   ^        ^
    // (0,0) -> (1,0)
    let mut blocks = BlockMap::new();
    for pt in [p(0, 0), p(1, 0), p(0, 1), p(1, 1)] {
        blocks.assign(pt, Voice::default());
    }
    blocks.connect(p(0, 0), p(1, 0));
    blocks.connect(p(0, 0), p(0, 1));
    blocks.connect(p(1, 0), p(1, 1));
    blocks.connect(p(0, 1), p(1, 1));

    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    cascade.tick(&mut blocks, DELAY, &mut out);
    out.clear();
    let played = cascade.tick(&mut blocks, 2.0 * DELAY, &mut out);
    assert_eq!(played, vec![p(1, 1), p(1, 1)]);
}

#[test]
fn a_cycle_keeps_replaying() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    blocks.connect(p(1, 0), p(0, 0));

    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    for hop in 1..=20 {
        out.clear();
        let played = cascade.tick(&mut blocks, hop as f64 * DELAY, &mut out);
        let expected = if hop % 2 == 1 { p(1, 0) } else { p(0, 0) };
        assert_eq!(played, vec![expected], "hop {hop}");
        assert_eq!(cascade.pending(), 1);
    }
}

#[test]
fn cleared_blocks_do_not_play_even_if_the_cell_is_refilled() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);

    blocks.clear();
    blocks.assign(p(1, 0), Voice::default());

    out.clear();
    assert!(cascade.tick(&mut blocks, DELAY, &mut out).is_empty());
    assert!(out.is_empty());
    assert_eq!(cascade.pending(), 0);
}

#[test]
fn removed_target_ends_that_branch() {
    let mut blocks = chain(&[p(0, 0), p(1, 0), p(2, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    blocks.remove(p(1, 0));

    out.clear();
    assert!(cascade.tick(&mut blocks, 5.0 * DELAY, &mut out).is_empty());
    assert_eq!(cascade.pending(), 0);
}

#[test]
fn revoiced_block_plays_its_new_voice() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);

    blocks.assign(
        p(1, 0),
        Voice {
            waveform: Waveform::Square,
            ..Voice::default()
        },
    );
    out.clear();
    cascade.tick(&mut blocks, DELAY, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].waveform, Waveform::Square);
}

#[test]
fn interleaved_cascades_fire_in_due_order() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    blocks.assign(p(5, 5), Voice::default());
    blocks.assign(p(6, 5), Voice::default());
    blocks.connect(p(5, 5), p(6, 5));

    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(5, 5), &mut blocks, 300.0, &mut out);
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    out.clear();

    cascade.tick(&mut blocks, 1_000.0, &mut out);
    assert_eq!(cells(&out), vec![p(1, 0), p(6, 5)]);
}

#[test]
fn playing_flashes_outgoing_connections() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    let c = blocks.get(p(0, 0)).expect("block").connections[0];
    assert_eq!(c.to, Direction::Right);
    assert_eq!(c.flash, 1.0);
}

#[test]
fn cancel_all_drops_pending_signals() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    blocks.connect(p(1, 0), p(0, 0));
    let mut cascade = Cascade::new(DELAY);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    cascade.cancel_all();
    out.clear();
    assert!(cascade.tick(&mut blocks, 10.0 * DELAY, &mut out).is_empty());
}

#[test]
fn zero_delay_is_clamped_to_a_positive_hop() {
    let mut blocks = chain(&[p(0, 0), p(1, 0)]);
    blocks.connect(p(1, 0), p(0, 0));
    let mut cascade = Cascade::new(0.0);
    assert!(cascade.delay_ms() > 0.0);
    let mut out = Vec::new();
    cascade.trigger(p(0, 0), &mut blocks, 0.0, &mut out);
    assert_eq!(cascade.tick(&mut blocks, 10.0, &mut out).len(), 1);
    assert_eq!(cascade.pending(), 1);
    assert!(cascade.tick(&mut blocks, 10.5, &mut out).is_empty());
    assert_eq!(cascade.tick(&mut blocks, 11.0, &mut out), vec![p(0, 0)]);
}
