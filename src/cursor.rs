use crate::simulator::{Placement, Simulator, Toggle};
use crate::world::{Block, BlockKind, DimSize, Direction, Position};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub position: Position,
    pub selected: BlockKind,
    pub direction: Direction,
}

// result of pressing the action key on the cursor cell
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interaction {
    Placed(Placement),
    Toggled(Toggle),
    Nothing,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: Position(0, 0),
            selected: BlockKind::Empty,
            direction: Direction::Right,
        }
    }
}

impl Cursor {
    pub fn move_towards(&mut self, direction: Direction, size: DimSize) {
        if let Some(pos) = self.position.walk(direction).filter(|&pos| size.bound_on(pos)) {
            self.position = pos;
        }
    }

    pub fn select(&mut self, kind: BlockKind) {
        self.selected = kind;
    }

    pub fn face(&mut self, direction: Direction) {
        if direction.is_cardinal() {
            self.direction = direction;
        }
    }

    pub fn reset(&mut self) {
        self.selected = BlockKind::Empty;
    }

    pub fn preview(&self, sim: &Simulator) -> Block {
        sim.preview(self.position, self.selected, self.direction)
    }

    pub fn interact(&self, sim: &mut Simulator) -> Interaction {
        if self.selected == BlockKind::Empty {
            return sim
                .toggle_lever(self.position)
                .map_or(Interaction::Nothing, Interaction::Toggled);
        }

        Interaction::Placed(sim.place(self.position, self.selected, self.direction, true))
    }
}
