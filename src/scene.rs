//! Backend-agnostic draw list for one frame.
//!
//! `build` walks the sequencer state in painter's order and produces plain
//! commands; the web renderer replays them on a 2D canvas context.

use crate::constants::{
    ARROW_HEAD_PX, FONT_SIZE, LABEL_INSET_PX, MARKER_RADIUS, THICK_BORDER_INSET_PX,
    THICK_LINE_PX, THIN_LINE_PX,
};
use crate::core::{
    block_to_canvas, visible_blocks, Direction, GridPoint, Rgb, Sequencer, Viewport, BLOCK_SIZE,
    HALF_BLOCK,
};
use smallvec::{smallvec, SmallVec};

pub const CONNECTION_FLASH_COLOR: Rgb = Rgb(255, 0, 0);

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
        line_width: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgb,
        alpha: f32,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Rgb,
        line_width: f64,
    },
    Polygon {
        points: SmallVec<[[f64; 2]; 3]>,
        color: Rgb,
    },
}

/// Unit step on the canvas (y down) for a grid direction (y up).
#[inline]
fn canvas_dir(dir: Direction) -> [f64; 2] {
    let (dx, dy) = dir.delta();
    [dx as f64, -(dy as f64)]
}

fn corner(p: GridPoint, seq: &Sequencer, viewport: &Viewport) -> [f64; 2] {
    let c = block_to_canvas(p, seq.camera(), viewport);
    [c.x as f64, c.y as f64]
}

fn thick_border(pos: [f64; 2], color: Rgb) -> DrawCmd {
    let size = BLOCK_SIZE as f64 - 2.0 * THICK_BORDER_INSET_PX;
    DrawCmd::StrokeRect {
        x: pos[0] + THICK_BORDER_INSET_PX,
        y: pos[1] + THICK_BORDER_INSET_PX,
        w: size,
        h: size,
        color,
        line_width: THICK_LINE_PX,
    }
}

/// Line from a block's center to the edge it shares with `dir`'s neighbor,
/// capped with an arrow head.
fn connection(pos: [f64; 2], dir: Direction, flash: f32) -> [DrawCmd; 2] {
    let half = HALF_BLOCK as f64;
    let d = canvas_dir(dir);
    let center = [pos[0] + half, pos[1] + half];
    let tip = [center[0] + d[0] * half, center[1] + d[1] * half];
    let color = Rgb::BLACK.mix(CONNECTION_FLASH_COLOR, flash);

    let back = [tip[0] - d[0] * ARROW_HEAD_PX, tip[1] - d[1] * ARROW_HEAD_PX];
    let perp = [-d[1] * ARROW_HEAD_PX / 2.0, d[0] * ARROW_HEAD_PX / 2.0];
    let points: SmallVec<[[f64; 2]; 3]> = smallvec![
        tip,
        [back[0] + perp[0], back[1] + perp[1]],
        [back[0] - perp[0], back[1] - perp[1]],
    ];
    [
        DrawCmd::Line {
            from: center,
            to: back,
            color,
            line_width: THIN_LINE_PX + flash as f64 * THIN_LINE_PX * 2.0,
        },
        DrawCmd::Polygon { points, color },
    ]
}

pub fn build(seq: &Sequencer, viewport: &Viewport) -> Vec<DrawCmd> {
    let mut cmds = Vec::new();
    let size = BLOCK_SIZE as f64;
    let points = seq.blocks().points();

    // block fills first
    for p in &points {
        if let Some(b) = seq.blocks().get(*p) {
            let [x, y] = corner(*p, seq, viewport);
            cmds.push(DrawCmd::FillRect {
                x,
                y,
                w: size,
                h: size,
                color: b.voice.color,
            });
        }
    }

    // grid borders and coordinate labels
    for p in visible_blocks(seq.camera(), viewport) {
        let [x, y] = corner(p, seq, viewport);
        cmds.push(DrawCmd::StrokeRect {
            x,
            y,
            w: size,
            h: size,
            color: Rgb::BLACK,
            line_width: THIN_LINE_PX,
        });
        cmds.push(DrawCmd::Text {
            x: x + LABEL_INSET_PX,
            y: y + LABEL_INSET_PX + FONT_SIZE as f64,
            text: p.to_string(),
        });
    }

    for m in seq.markers() {
        let [x, y] = corner(m.at, seq, viewport);
        cmds.push(DrawCmd::Circle {
            x: x + size / 2.0,
            y: y + size / 2.0,
            radius: MARKER_RADIUS,
            color: Rgb::BLACK,
            alpha: m.alpha.clamp(0.0, 1.0),
        });
    }

    cmds.push(thick_border(
        corner(seq.selected(), seq, viewport),
        Rgb::LIGHT_GREEN,
    ));
    for n in seq.connect_candidates() {
        cmds.push(thick_border(corner(n, seq, viewport), Rgb::LIGHT_PURPLE));
    }

    // connections last so they sit above everything else
    for p in &points {
        let Some(b) = seq.blocks().get(*p) else {
            continue;
        };
        let pos = corner(*p, seq, viewport);
        for c in &b.connections {
            if seq.blocks().contains(p.offset(c.to)) {
                cmds.extend(connection(pos, c.to, c.flash));
            }
        }
    }

    cmds
}
