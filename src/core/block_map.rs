use super::block::{Block, BlockId, Voice};
use super::grid::{Direction, GridPoint};
use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Result of assigning a voice to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assigned {
    Created(BlockId),
    Updated(BlockId),
}

impl Assigned {
    pub fn id(self) -> BlockId {
        match self {
            Assigned::Created(id) | Assigned::Updated(id) => id,
        }
    }
}

/// Blocks keyed by grid position.
#[derive(Debug, Default)]
pub struct BlockMap {
    blocks: FnvHashMap<GridPoint, Block>,
    next_id: u64,
}

impl BlockMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, p: GridPoint) -> Option<&Block> {
        self.blocks.get(&p)
    }

    #[inline]
    pub fn get_mut(&mut self, p: GridPoint) -> Option<&mut Block> {
        self.blocks.get_mut(&p)
    }

    #[inline]
    pub fn contains(&self, p: GridPoint) -> bool {
        self.blocks.contains_key(&p)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Occupied cells, sorted by x then y.
    pub fn points(&self) -> Vec<GridPoint> {
        let mut pts: Vec<GridPoint> = self.blocks.keys().copied().collect();
        pts.sort_unstable();
        pts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridPoint, &Block)> {
        self.blocks.iter()
    }

    /// Create a block on an empty cell, or re-voice the block already there.
    /// Re-voicing keeps the block's id and its connections.
    pub fn assign(&mut self, p: GridPoint, voice: Voice) -> Assigned {
        if let Some(block) = self.blocks.get_mut(&p) {
            block.voice = voice;
            return Assigned::Updated(block.id);
        }
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(p, Block::new(id, voice));
        Assigned::Created(id)
    }

    pub fn remove(&mut self, p: GridPoint) -> Option<Block> {
        self.blocks.remove(&p)
    }

    /// Occupied cardinal neighbors of `p`; empty when `p` itself is empty.
    pub fn neighbors(&self, p: GridPoint) -> SmallVec<[GridPoint; 4]> {
        if !self.contains(p) {
            return SmallVec::new();
        }
        p.neighbors()
            .into_iter()
            .filter(|n| self.contains(*n))
            .collect()
    }

    /// Add the directed edge `from -> to`.
    ///
    /// Returns false (and changes nothing) when either cell is empty, the
    /// cells are not cardinal neighbors, or the edge already exists.
    pub fn connect(&mut self, from: GridPoint, to: GridPoint) -> bool {
        let Some(dir) = Direction::between(from, to) else {
            return false;
        };
        if !self.contains(to) {
            return false;
        }
        match self.blocks.get_mut(&from) {
            Some(block) => block.add_connection(dir),
            None => false,
        }
    }

    /// Kill every block: returns their ids so anything still sounding can be
    /// muted, then discards them.
    pub fn clear(&mut self) -> Vec<BlockId> {
        let mut ids: Vec<BlockId> = self.blocks.values().map(|b| b.id).collect();
        ids.sort_unstable();
        self.blocks.clear();
        ids
    }

    pub fn decay_flashes(&mut self, amount: f32) {
        for block in self.blocks.values_mut() {
            block.decay_flashes(amount);
        }
    }
}
