use crate::world::{Block, BlockKind, Direction, Surroundings};

pub const K_EMPTY_GLYPH: char = ' ';

pub trait ToGlyph {
    fn to_glyph(&self, surroundings: &Surroundings) -> char;
}

impl ToGlyph for Block {
    fn to_glyph(&self, surroundings: &Surroundings) -> char {
        match self.kind {
            BlockKind::Empty => K_EMPTY_GLYPH,
            BlockKind::ConstantSource => '◆',
            BlockKind::Lever => {
                if self.is_powered() {
                    '⊓'
                } else {
                    '⊔'
                }
            }
            BlockKind::WiredLamp => {
                if self.is_powered() {
                    '■'
                } else {
                    '□'
                }
            }
            BlockKind::Inverter => match self.direction {
                Direction::Left => '◀',
                Direction::Right => '▶',
                Direction::Up => '▲',
                Direction::Down => '▼',
                Direction::NonSurrounding | Direction::NoDirection => K_EMPTY_GLYPH,
            },
            BlockKind::Conductor => conductor_glyph(surroundings),
        }
    }
}

// the neighbor on `side` has to accept a connection coming from us
fn connects(surroundings: &Surroundings, side: Direction) -> bool {
    surroundings
        .get(side)
        .map_or(false, |block| block.connects_from(side.inverse()))
}

fn conductor_glyph(surroundings: &Surroundings) -> char {
    let left = connects(surroundings, Direction::Left);
    let right = connects(surroundings, Direction::Right);
    let up = connects(surroundings, Direction::Up);
    let down = connects(surroundings, Direction::Down);

    match (left, right, up, down) {
        // four sided
        (true, true, true, true) => '╋',
        // three sided
        (true, true, true, false) => '┻',
        (false, true, true, true) => '┣',
        (true, true, false, true) => '┳',
        (true, false, true, true) => '┫',
        // two sided, bent
        (false, true, true, false) => '┗',
        (false, true, false, true) => '┏',
        (true, false, false, true) => '┓',
        (true, false, true, false) => '┛',
        // two sided, straight (or a single stub)
        (_, _, true, _) | (_, _, _, true) => '┃',
        (true, _, _, _) | (_, true, _, _) => '━',
        (false, false, false, false) => '╋',
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::world::Position;

    fn block(kind: BlockKind, powered: bool, facing: Direction) -> Block {
        Block::new(kind, Position::default(), powered, facing)
    }

    fn wire() -> Block {
        block(BlockKind::Conductor, false, Direction::NoDirection)
    }

    fn glyph_with(sides: &[(Direction, Block)]) -> char {
        let mut surroundings = Surroundings::default();

        for &(dir, block) in sides {
            match dir {
                Direction::Left => surroundings.left = Some(block),
                Direction::Right => surroundings.right = Some(block),
                Direction::Up => surroundings.up = Some(block),
                Direction::Down => surroundings.down = Some(block),
                _ => unreachable!(),
            }
        }

        wire().to_glyph(&surroundings)
    }

    #[test]
    fn unittest_glyph_fixed_blocks() {
        let surroundings = Surroundings::default();

        assert_eq!(
            block(BlockKind::ConstantSource, false, Direction::NoDirection).to_glyph(&surroundings),
            '◆'
        );
        assert_eq!(block(BlockKind::Lever, true, Direction::NoDirection).to_glyph(&surroundings), '⊓');
        assert_eq!(block(BlockKind::Lever, false, Direction::NoDirection).to_glyph(&surroundings), '⊔');
        assert_eq!(block(BlockKind::WiredLamp, true, Direction::NoDirection).to_glyph(&surroundings), '■');
        assert_eq!(block(BlockKind::WiredLamp, false, Direction::NoDirection).to_glyph(&surroundings), '□');
        assert_eq!(block(BlockKind::Empty, true, Direction::NoDirection).to_glyph(&surroundings), ' ');

        for (facing, glyph) in [
            (Direction::Left, '◀'),
            (Direction::Right, '▶'),
            (Direction::Up, '▲'),
            (Direction::Down, '▼'),
        ] {
            assert_eq!(block(BlockKind::Inverter, true, facing).to_glyph(&surroundings), glyph);
        }
    }

    #[test]
    fn unittest_glyph_conductor_bent_left_up() {
        let sides = [(Direction::Left, wire()), (Direction::Up, wire())];
        let reversed = [(Direction::Up, wire()), (Direction::Left, wire())];

        assert_eq!(glyph_with(&sides), '┛');
        assert_eq!(glyph_with(&reversed), '┛');
        assert_eq!(glyph_with(&sides), glyph_with(&sides));
    }

    #[test]
    fn unittest_glyph_conductor_table() {
        use Direction::*;

        let cases: [(&[Direction], char); 12] = [
            (&[Left, Right, Up, Down], '╋'),
            (&[Left, Right, Up], '┻'),
            (&[Right, Up, Down], '┣'),
            (&[Left, Right, Down], '┳'),
            (&[Left, Up, Down], '┫'),
            (&[Right, Up], '┗'),
            (&[Right, Down], '┏'),
            (&[Left, Down], '┓'),
            (&[Up, Down], '┃'),
            (&[Left, Right], '━'),
            (&[Down], '┃'),
            (&[], '╋'),
        ];

        for (dirs, glyph) in cases {
            let sides = dirs.iter().map(|&dir| (dir, wire())).collect::<Vec<_>>();
            assert_eq!(glyph_with(&sides), glyph, "sides {dirs:?}");
        }

        assert_eq!(glyph_with(&[(Left, wire())]), '━');
    }

    #[test]
    fn unittest_glyph_conductor_inverter_axis() {
        let horizontal = block(BlockKind::Inverter, true, Direction::Right);
        let vertical = block(BlockKind::Inverter, true, Direction::Up);

        // an inverter facing away on the same axis still connects
        assert_eq!(glyph_with(&[(Direction::Left, horizontal)]), '━');
        assert_eq!(glyph_with(&[(Direction::Left, vertical)]), '╋');
        assert_eq!(
            glyph_with(&[(Direction::Up, vertical), (Direction::Right, horizontal)]),
            '┗'
        );
    }
}
