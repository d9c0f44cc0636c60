use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockKind};
use super::position::{DimSize, Direction, Position};

pub type BlockId = usize;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    // every placement stays enumerable, even after its cell is overwritten
    #[default]
    Keep,
    // only blocks still resident in their cell are enumerated
    Prune,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Surroundings {
    pub left: Option<Block>,
    pub right: Option<Block>,
    pub up: Option<Block>,
    pub down: Option<Block>,
}

impl Surroundings {
    pub fn get(&self, dir: Direction) -> Option<&Block> {
        match dir {
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
            Direction::NonSurrounding | Direction::NoDirection => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Block)> {
        Direction::cardinals().filter_map(move |dir| self.get(dir).map(|block| (dir, block)))
    }
}

#[derive(Clone)]
pub struct World {
    pub size: DimSize,
    history: HistoryPolicy,
    // placement order, doubles as the block arena
    blocks: Vec<Block>,
    // y, x
    map: Vec<Vec<Option<BlockId>>>,
}

impl World {
    pub fn new(size: DimSize, history: HistoryPolicy) -> Self {
        Self {
            size,
            history,
            blocks: Vec::new(),
            map: vec![vec![None; size.0]; size.1],
        }
    }

    fn index(&self, pos: Position) -> Option<(usize, usize)> {
        if !self.size.bound_on(pos) {
            return None;
        }

        Some((pos.0 as usize, pos.1 as usize))
    }

    fn block_id(&self, pos: Position) -> Option<BlockId> {
        let (x, y) = self.index(pos)?;
        self.map[y][x]
    }

    pub fn get(&self, pos: Position) -> Option<&Block> {
        self.block_id(pos).map(|id| &self.blocks[id])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Block> {
        self.block_id(pos).map(|id| &mut self.blocks[id])
    }

    pub fn kind(&self, pos: Position) -> Option<BlockKind> {
        self.get(pos).map(|block| block.kind)
    }

    pub fn is_kind(&self, pos: Position, kind: BlockKind) -> bool {
        self.kind(pos) == Some(kind)
    }

    // returns false, leaving the world untouched, when `pos` lies outside the grid
    pub fn set(&mut self, pos: Position, mut block: Block) -> bool {
        let Some((x, y)) = self.index(pos) else {
            tracing::debug!("ignore out of bound placement: {:?}", pos);
            return false;
        };

        block.position = pos;
        self.blocks.push(block);
        self.map[y][x] = Some(self.blocks.len() - 1);

        true
    }

    pub fn neighbors(&self, pos: Position) -> Surroundings {
        let side = |dir: Direction| pos.walk(dir).and_then(|pos| self.get(pos)).copied();

        Surroundings {
            left: side(Direction::Left),
            right: side(Direction::Right),
            up: side(Direction::Up),
            down: side(Direction::Down),
        }
    }

    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .enumerate()
            .filter(move |(id, block)| match self.history {
                HistoryPolicy::Keep => true,
                HistoryPolicy::Prune => self.block_id(block.position) == Some(*id),
            })
            .map(|(_, block)| block)
    }

    // Whether a source next to `pos` energizes it. Inverters count only when
    // their output side points back at `pos`.
    pub fn is_powered(&self, pos: Position, include_conductor: bool) -> bool {
        pos.cardinal().into_iter().any(|(dir, pos_src)| {
            let Some(block) = self.get(pos_src) else {
                return false;
            };

            match block.kind {
                BlockKind::ConstantSource => true,
                BlockKind::Lever => block.is_powered(),
                BlockKind::Conductor => include_conductor && block.is_powered(),
                BlockKind::Inverter => block.direction == dir.inverse() && block.is_powered(),
                BlockKind::Empty | BlockKind::WiredLamp => false,
            }
        })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(DimSize::default(), HistoryPolicy::default())
    }
}

impl Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.map {
            writeln!(
                f,
                "  {}",
                row.iter()
                    .map(|id| match id.map(|id| self.blocks[id].kind) {
                        None | Some(BlockKind::Empty) => ".",
                        Some(BlockKind::ConstantSource) => "s",
                        Some(BlockKind::WiredLamp) => "l",
                        Some(BlockKind::Conductor) => "w",
                        Some(BlockKind::Lever) => "t",
                        Some(BlockKind::Inverter) => "i",
                    })
                    .collect::<Vec<_>>()
                    .join("")
            )?;
        }

        Ok(())
    }
}
