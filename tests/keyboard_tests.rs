// Host-side tests for key to action mapping.

use grid_sequencer::core::{Direction, KeyAction, Rgb, Waveform};
use grid_sequencer::input::{action_for_key, pan_direction_for_key, preset_for_key};

#[test]
fn letter_presets_pick_color_waveform_and_pitch() {
    let q = preset_for_key("q").expect("q preset");
    assert_eq!(q.color, Rgb::LIGHT_BLUE);
    assert_eq!(q.waveform, Waveform::Saw);
    assert_eq!(q.piano_key, 37);

    let w = preset_for_key("w").expect("w preset");
    assert_eq!(w.color, Rgb::LIGHT_ORANGE);
    assert_eq!(w.waveform, Waveform::Sine);
    assert_eq!(w.piano_key, 49);

    assert_eq!(preset_for_key("e").map(|v| v.waveform), Some(Waveform::Square));
    assert_eq!(preset_for_key("r").map(|v| v.waveform), Some(Waveform::Triangle));
}

#[test]
fn letters_ignore_case() {
    for k in ["q", "w", "e", "r"] {
        assert_eq!(preset_for_key(k), preset_for_key(&k.to_uppercase()));
    }
    assert_eq!(action_for_key("C"), Some(KeyAction::ConnectMode));
}

#[test]
fn arrows_pan() {
    assert_eq!(pan_direction_for_key("ArrowLeft"), Some(Direction::Left));
    assert_eq!(pan_direction_for_key("ArrowUp"), Some(Direction::Up));
    assert_eq!(pan_direction_for_key("ArrowRight"), Some(Direction::Right));
    assert_eq!(pan_direction_for_key("ArrowDown"), Some(Direction::Down));
    assert_eq!(action_for_key("ArrowUp"), Some(KeyAction::Pan(Direction::Up)));
}

#[test]
fn command_keys() {
    assert_eq!(action_for_key("Enter"), Some(KeyAction::Play));
    assert_eq!(action_for_key(" "), Some(KeyAction::DragMode));
    assert_eq!(action_for_key("Backspace"), Some(KeyAction::ClearAll));
    assert_eq!(action_for_key("Delete"), Some(KeyAction::RemoveSelected));
    assert_eq!(action_for_key("Escape"), Some(KeyAction::CancelCascade));
    assert_eq!(action_for_key("["), Some(KeyAction::Transpose(-1)));
    assert_eq!(action_for_key("]"), Some(KeyAction::Transpose(1)));
}

#[test]
fn unmapped_keys_do_nothing() {
    for k in ["x", "1", "Shift", "Tab", "", "ArrowLeftish"] {
        assert_eq!(action_for_key(k), None, "{k:?}");
    }
}

#[test]
fn only_modes_and_arrows_are_held() {
    assert!(action_for_key("c").expect("c").is_hold());
    assert!(action_for_key(" ").expect("space").is_hold());
    assert!(action_for_key("ArrowDown").expect("arrow").is_hold());
    for k in ["q", "Enter", "Backspace", "Delete", "Escape", "]"] {
        assert!(!action_for_key(k).expect(k).is_hold(), "{k}");
    }
}
