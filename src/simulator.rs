use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::world::{Block, BlockKind, DimSize, Direction, HistoryPolicy, Position, Surroundings, World};

pub const K_DEFAULT_CASCADE_LIMIT: usize = 10_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub size: DimSize,
    pub history: HistoryPolicy,
    // 한 번의 업데이트에서 회로를 다시 계산할 수 있는 최대 횟수
    pub cascade_limit: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            size: DimSize::default(),
            history: HistoryPolicy::default(),
            cascade_limit: K_DEFAULT_CASCADE_LIMIT,
        }
    }
}

// Maximal set of conductors reachable from a seed, in visiting order.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct Circuit {
    pub powered: bool,
    #[deref]
    pub members: Vec<Position>,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Propagation {
    // circuits (re)computed during the update
    pub settled: usize,
    // the cascade guard stopped the update early
    pub truncated: bool,
}

impl Propagation {
    pub fn merge(&mut self, other: Propagation) {
        self.settled += other.settled;
        self.truncated |= other.truncated;
    }
}

// block handed back by `place`, with the update its commit caused
#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct Placement {
    #[deref]
    pub block: Block,
    pub propagation: Propagation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Toggle {
    // new lever state
    pub powered: bool,
    pub propagation: Propagation,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    world: World,
    config: SimulatorConfig,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            world: World::new(config.size, config.history),
            config,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn size(&self) -> DimSize {
        self.world.size
    }

    pub fn get(&self, pos: Position) -> Option<&Block> {
        self.world.get(pos)
    }

    pub fn neighbors(&self, pos: Position) -> Surroundings {
        self.world.neighbors(pos)
    }

    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.world.all_blocks()
    }

    pub fn is_powered(&self, pos: Position, include_conductor: bool) -> bool {
        self.world.is_powered(pos, include_conductor)
    }

    // the block `place` would create, without touching the world
    pub fn preview(&self, pos: Position, kind: BlockKind, facing: Direction) -> Block {
        let ambient = self.world.is_powered(pos, true);

        // an inverter's flag is its output, even before any propagation
        let powered = if kind.is_inverter() { !ambient } else { ambient };

        Block::new(kind, pos, powered, facing)
    }

    pub fn place(
        &mut self,
        pos: Position,
        kind: BlockKind,
        facing: Direction,
        commit: bool,
    ) -> Placement {
        let block = self.preview(pos, kind, facing);
        let mut propagation = Propagation::default();

        if commit {
            tracing::debug!("place block: {} at {:?}, powered: {}", block.name(), pos, block.powered);

            if self.world.set(pos, block) {
                propagation = self.update_surrounding(pos);
            }
        }

        Placement { block, propagation }
    }

    pub fn try_place(
        &mut self,
        pos: Position,
        kind: BlockKind,
        facing: Direction,
    ) -> eyre::Result<Placement> {
        eyre::ensure!(
            self.world.size.bound_on(pos),
            "Cannot place {kind} at {pos:?}, out of bound {:?}",
            self.world.size
        );

        if kind.is_inverter() {
            eyre::ensure!(
                facing.is_cardinal(),
                "Inverter at {pos:?} must face a cardinal direction, got {facing}"
            );
        }

        Ok(self.place(pos, kind, facing, true))
    }

    // `None` if `pos` holds no lever
    pub fn toggle_lever(&mut self, pos: Position) -> Option<Toggle> {
        let lever = self.world.get_mut(pos).filter(|block| block.kind.is_lever())?;
        let powered = !lever.is_powered();
        lever.set_powered(powered);

        tracing::info!("toggle lever at {:?}: {}", pos, powered);

        let propagation = self.update_surrounding(pos);

        Some(Toggle { powered, propagation })
    }

    // the four neighbors share one worklist, so one budget
    pub fn update_surrounding(&mut self, pos: Position) -> Propagation {
        self.propagate(pos.cardinal().into_iter().map(|(_, pos_src)| pos_src))
    }

    pub fn update_block(&mut self, pos: Position) -> Propagation {
        self.propagate([pos])
    }

    fn propagate(&mut self, seeds: impl IntoIterator<Item = Position>) -> Propagation {
        let mut propagation = Propagation::default();
        let mut queue: VecDeque<Position> = seeds.into_iter().collect();
        let mut driven: HashSet<Position> = HashSet::new();

        while let Some(pos) = queue.pop_front() {
            let Some(circuit) = self.discover_circuit(pos) else {
                continue;
            };

            if propagation.settled >= self.config.cascade_limit {
                tracing::warn!(
                    "cascade limit {} reached at {:?}, feedback loop?",
                    self.config.cascade_limit,
                    pos
                );
                propagation.truncated = true;
                break;
            }

            propagation.settled += 1;
            queue.extend(self.settle(&circuit, &mut driven));
        }

        propagation
    }

    pub fn discover_circuit(&self, seed: Position) -> Option<Circuit> {
        if !self.world.is_kind(seed, BlockKind::Conductor) {
            return None;
        }

        let mut visit: HashSet<Position> = HashSet::from([seed]);
        let mut queue = VecDeque::from([seed]);
        let mut members = Vec::new();
        let mut powered = false;

        while let Some(pos) = queue.pop_front() {
            members.push(pos);
            powered |= self.world.is_powered(pos, false);

            for (_, pos_src) in pos.cardinal() {
                if self.world.is_kind(pos_src, BlockKind::Conductor) && visit.insert(pos_src) {
                    queue.push_back(pos_src);
                }
            }
        }

        tracing::debug!(
            "discover circuit from {:?}: {} members, powered: {}",
            seed,
            members.len(),
            powered
        );

        Some(Circuit { powered, members })
    }

    // Applies a circuit's state to its members and dependents, returning the
    // cells inverters want re-evaluated next.
    fn settle(&mut self, circuit: &Circuit, driven: &mut HashSet<Position>) -> Vec<Position> {
        for &pos in circuit.iter() {
            if let Some(block) = self.world.get_mut(pos) {
                block.set_powered(circuit.powered);
            }
        }

        tracing::info!(
            "settle circuit at {:?}: powered: {}",
            circuit.first(),
            circuit.powered
        );

        let mut cascades = Vec::new();

        for &pos in circuit.iter() {
            for (_, pos_src) in pos.cardinal() {
                let Some(block) = self.world.get(pos_src).copied() else {
                    continue;
                };

                match block.kind {
                    BlockKind::WiredLamp => {
                        let is_on = self.world.is_powered(pos_src, true);

                        if let Some(lamp) = self.world.get_mut(pos_src) {
                            lamp.set_powered(is_on);
                        }
                    }
                    BlockKind::Inverter => {
                        // only a conductor on the input side drives the inverter
                        if pos_src.diff(pos) != block.direction.inverse() {
                            continue;
                        }

                        let output = !circuit.powered;
                        let changed = block.powered != output;

                        if let Some(inverter) = self.world.get_mut(pos_src) {
                            inverter.set_powered(output);
                        }

                        let first_drive = driven.insert(pos_src);
                        if !first_drive && !changed {
                            continue;
                        }

                        if changed {
                            tracing::info!("inverter at {:?} flips: {}", pos_src, output);
                        }

                        if let Some(pos_out) = pos_src
                            .walk(block.direction)
                            .filter(|&pos_out| self.world.get(pos_out).is_some())
                        {
                            tracing::debug!("cascade from inverter {:?} to {:?}", pos_src, pos_out);
                            cascades.push(pos_out);
                        }
                    }
                    BlockKind::Empty
                    | BlockKind::ConstantSource
                    | BlockKind::Conductor
                    | BlockKind::Lever => (),
                }
            }
        }

        cascades
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}
