use itertools::Itertools;

use crate::cursor::Cursor;
use crate::glyph::{ToGlyph, K_EMPTY_GLYPH};
use crate::simulator::Simulator;
use crate::world::{Block, Position};

struct Frame {
    cells: Vec<Vec<char>>,
}

impl Frame {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![K_EMPTY_GLYPH; width]; height],
        }
    }

    fn draw(&mut self, pos: Position, glyph: char) {
        let (Ok(x), Ok(y)) = (usize::try_from(pos.0), usize::try_from(pos.1)) else {
            return;
        };

        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = glyph;
        }
    }

    fn finish(self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_owned())
            .join("\n")
    }
}

fn glyph_of(sim: &Simulator, block: &Block) -> char {
    block.to_glyph(&sim.neighbors(block.position))
}

// full redraw in placement order, cursor preview on top
pub fn render(sim: &Simulator, cursor: Option<&Cursor>) -> String {
    let size = sim.size();
    let mut frame = Frame::new(size.width(), size.height());

    for block in sim.all_blocks() {
        frame.draw(block.position, glyph_of(sim, block));
    }

    if let Some(cursor) = cursor {
        let preview = cursor.preview(sim);
        frame.draw(cursor.position, glyph_of(sim, &preview));
    }

    tracing::debug!("render frame {}x{}", size.width(), size.height());

    frame.finish()
}

pub fn describe_blocks(sim: &Simulator) -> String {
    sim.all_blocks()
        .map(|block| {
            format!(
                "{} ({}, {}) {}",
                block.name(),
                block.position.x(),
                block.position.y(),
                if block.is_powered() { "on" } else { "off" }
            )
        })
        .join("\n")
}
