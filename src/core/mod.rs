pub mod block;
pub mod block_map;
pub mod cascade;
pub mod constants;
pub mod grid;
pub mod pitch;
pub mod state;

pub use block::*;
pub use block_map::*;
pub use cascade::*;
pub use constants::*;
pub use grid::*;
pub use state::*;
