//! Grid coordinates and the camera transform.
//!
//! The world is an infinite lattice of `BLOCK_SIZE` cells. World space has +y
//! pointing up and block `(0, 0)` centered on the origin; canvas space has +y
//! pointing down. The camera offset is the world-pixel position shown at the
//! canvas center.

use super::constants::{BLOCK_SIZE, HALF_BLOCK};
use glam::Vec2;

/// Integer cell coordinates. +x is right, +y is up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Cardinal neighbors in the order right, left, up, down.
    pub fn neighbors(self) -> [GridPoint; 4] {
        [
            self.offset(Direction::Right),
            self.offset(Direction::Left),
            self.offset(Direction::Up),
            self.offset(Direction::Down),
        ]
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    /// The direction leading from `from` to `to`, if they are cardinal neighbors.
    pub fn between(from: GridPoint, to: GridPoint) -> Option<Direction> {
        let d = (to.x - from.x, to.y - from.y);
        Direction::ALL.into_iter().find(|dir| dir.delta() == d)
    }
}

/// Arrow keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldArrows {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
}

impl HeldArrows {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Left => self.left = held,
            Direction::Up => self.up = held,
            Direction::Right => self.right = held,
            Direction::Down => self.down = held,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.up || self.right || self.down
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
        }
    }

    #[inline]
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset += Vec2::new(dx, dy);
    }

    /// Move by `speed` px along every held arrow. Opposite arrows cancel out.
    pub fn step_held(&mut self, held: HeldArrows, speed: f32) {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32 * speed;
        self.pan(axis(held.left, held.right), axis(held.down, held.up));
    }

    /// Camera produced by dragging from `hold_point` to `cursor` (canvas px),
    /// starting from `origin`. The grid follows the pointer.
    pub fn dragged(origin: Camera, hold_point: Vec2, cursor: Vec2) -> Camera {
        let diff = Vec2::new(cursor.x - hold_point.x, -(cursor.y - hold_point.y));
        Camera {
            offset: origin.offset - diff,
        }
    }
}

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).round(), (self.height / 2.0).round())
    }

    /// Half-extent of the visible area in whole blocks, per axis.
    ///
    /// Rounds the block count up to an even number so the grid drawn around
    /// the camera block always covers the canvas edges.
    pub fn magnitude(&self) -> (i32, i32) {
        let half = |size: f32| {
            let n = (size / BLOCK_SIZE).ceil() as i32;
            (n + n.rem_euclid(2)) / 2
        };
        (half(self.width), half(self.height))
    }
}

/// Top-left corner of block `p` on the canvas.
pub fn block_to_canvas(p: GridPoint, camera: &Camera, viewport: &Viewport) -> Vec2 {
    let center = viewport.center();
    let vector = Vec2::new(
        BLOCK_SIZE * p.x as f32 - HALF_BLOCK - camera.offset.x,
        BLOCK_SIZE * p.y as f32 + HALF_BLOCK - camera.offset.y,
    );
    Vec2::new(center.x + vector.x, center.y - vector.y)
}

/// Block under a canvas-space cursor.
pub fn canvas_to_block(cursor: Vec2, camera: &Camera, viewport: &Viewport) -> GridPoint {
    let center = viewport.center();
    let corner = Vec2::new(camera.offset.x - center.x, camera.offset.y + center.y);
    let real = Vec2::new(corner.x + cursor.x, corner.y - cursor.y);
    GridPoint::new(
        ((real.x + HALF_BLOCK) / BLOCK_SIZE).floor() as i32,
        ((real.y + HALF_BLOCK) / BLOCK_SIZE).floor() as i32,
    )
}

/// Block at the center of the view.
pub fn camera_block(camera: &Camera) -> GridPoint {
    GridPoint::new(
        ((camera.offset.x + HALF_BLOCK) / BLOCK_SIZE).floor() as i32,
        ((camera.offset.y + HALF_BLOCK) / BLOCK_SIZE).floor() as i32,
    )
}

/// Every block in `camera_block ± magnitude`, column by column.
pub fn visible_blocks(camera: &Camera, viewport: &Viewport) -> impl Iterator<Item = GridPoint> {
    let c = camera_block(camera);
    let (mw, mh) = viewport.magnitude();
    (c.x - mw..=c.x + mw)
        .flat_map(move |x| (c.y - mh..=c.y + mh).map(move |y| GridPoint::new(x, y)))
}
