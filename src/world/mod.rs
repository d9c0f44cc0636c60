pub mod block;
pub mod position;
pub mod world;

pub use block::{Block, BlockKind};
pub use position::{DimSize, Direction, Position};
pub use world::{HistoryPolicy, Surroundings, World};
