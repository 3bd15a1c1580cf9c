//! Exit resolution between blocks
//!
//! For each block and each of the eight (direction pointer, codel chooser)
//! combinations this module works out which block the interpreter enters
//! when it leaves in that direction. The rule is the usual Piet one:
//!
//! 1. take the codels furthest along the direction pointer (the edge),
//! 2. of those, take the one furthest to the chooser's side, looking along
//!    the direction of travel,
//! 3. the exit is whatever block owns the codel just beyond it.
//!
//! Exits that leave the grid or land on black resolve to the boundary
//! sentinel.

use crate::grid::Position;
use crate::segmenter::{Block, BlockId, Segmentation};
use log::debug;
use std::fmt;

/// Direction pointer, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    /// Rotate clockwise by `steps` quarter turns (negative turns anticlockwise)
    pub fn rotate(self, steps: i64) -> Direction {
        let turned = (self as i64 + steps.rem_euclid(4)).rem_euclid(4);
        Direction::ALL[turned as usize]
    }

    pub fn clockwise(self) -> Direction {
        self.rotate(1)
    }

    /// Codel one step away, or `None` when that would leave the first quadrant
    pub fn step(self, pos: Position) -> Option<Position> {
        match self {
            Direction::Right => Some(Position::new(pos.x + 1, pos.y)),
            Direction::Down => Some(Position::new(pos.x, pos.y + 1)),
            Direction::Left => pos.x.checked_sub(1).map(|x| Position::new(x, pos.y)),
            Direction::Up => pos.y.checked_sub(1).map(|y| Position::new(pos.x, y)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
        };
        f.pad(name)
    }
}

/// Codel chooser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chooser {
    Left,
    Right,
}

impl Chooser {
    pub const ALL: [Chooser; 2] = [Chooser::Left, Chooser::Right];

    pub fn toggled(self) -> Chooser {
        match self {
            Chooser::Left => Chooser::Right,
            Chooser::Right => Chooser::Left,
        }
    }
}

impl fmt::Display for Chooser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Chooser::Left => "left",
            Chooser::Right => "right",
        })
    }
}

/// Slot of a (direction, chooser) pair in a block's exit array
pub fn exit_slot(dp: Direction, cc: Chooser) -> usize {
    dp as usize * 2 + cc as usize
}

/// Eight exits per block, indexed by [`exit_slot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyTable {
    exits: Vec<[BlockId; 8]>,
}

impl AdjacencyTable {
    /// Block entered when leaving `from`; the boundary for unknown blocks
    pub fn exit(&self, from: BlockId, dp: Direction, cc: Chooser) -> BlockId {
        self.exits
            .get(from.index())
            .map(|slots| slots[exit_slot(dp, cc)])
            .unwrap_or(BlockId::BOUNDARY)
    }

    pub fn exits_of(&self, block: BlockId) -> Option<&[BlockId; 8]> {
        self.exits.get(block.index())
    }

    pub fn len(&self) -> usize {
        self.exits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }
}

/// The edge codel a block is left from for a given (dp, cc)
pub fn exit_codel(block: &Block, dp: Direction, cc: Chooser) -> Option<Position> {
    // Distance along the direction of travel; larger is further
    let along = |p: &Position| -> i64 {
        match dp {
            Direction::Right => p.x as i64,
            Direction::Down => p.y as i64,
            Direction::Left => -(p.x as i64),
            Direction::Up => -(p.y as i64),
        }
    };
    // Distance towards the chooser's side, looking along dp; larger is further.
    // Facing right, "left" is up (smaller y); facing down, "left" is larger x.
    let side = |p: &Position| -> i64 {
        let towards_left = match dp {
            Direction::Right => -(p.y as i64),
            Direction::Down => p.x as i64,
            Direction::Left => p.y as i64,
            Direction::Up => -(p.x as i64),
        };
        match cc {
            Chooser::Left => towards_left,
            Chooser::Right => -towards_left,
        }
    };

    let edge = block.codels.iter().map(|p| along(p)).max()?;
    block
        .codels
        .iter()
        .filter(|p| along(*p) == edge)
        .max_by_key(|p| side(*p))
        .copied()
}

/// Compute the exits of every block in a segmentation
pub fn resolve(segmentation: &Segmentation) -> AdjacencyTable {
    let blocks = &segmentation.blocks;
    let target = |beyond: Option<Position>| -> BlockId {
        match beyond.and_then(|p| segmentation.owner_at(p)) {
            Some(id) if !blocks[id.index()].color.is_black() => id,
            _ => BlockId::BOUNDARY,
        }
    };

    let exits = blocks
        .iter()
        .map(|block| {
            let mut slots = [BlockId::BOUNDARY; 8];
            if block.color.is_black() {
                return slots;
            }
            for dp in Direction::ALL {
                for cc in Chooser::ALL {
                    let beyond = exit_codel(block, dp, cc).and_then(|p| dp.step(p));
                    slots[exit_slot(dp, cc)] = target(beyond);
                }
            }
            slots
        })
        .collect::<Vec<_>>();

    debug!("resolved exits for {} blocks", exits.len());
    AdjacencyTable { exits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Hue, Lightness};
    use crate::grid::Grid;
    use crate::segmenter::segment;
    use test_log::test;

    const R: Color = Color::new(Hue::Red, Lightness::Normal);
    const G: Color = Color::new(Hue::Green, Lightness::Normal);
    const B: Color = Color::new(Hue::Blue, Lightness::Normal);
    const Y: Color = Color::new(Hue::Yellow, Lightness::Normal);
    const C: Color = Color::new(Hue::Cyan, Lightness::Normal);
    const M: Color = Color::new(Hue::Magenta, Lightness::Normal);
    const K: Color = Color::Black;

    fn segmentation(rows: Vec<Vec<Color>>) -> Segmentation {
        segment(&Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn test_rotation() {
        assert_eq!(Direction::Right.clockwise(), Direction::Down);
        assert_eq!(Direction::Up.clockwise(), Direction::Right);
        assert_eq!(Direction::Right.rotate(-1), Direction::Up);
        assert_eq!(Direction::Left.rotate(6), Direction::Right);
        assert_eq!(Direction::Down.rotate(-7), Direction::Left);
        assert_eq!(Direction::Up.rotate(i64::MAX), Direction::Left);
        assert_eq!(Direction::Up.rotate(i64::MIN), Direction::Up);
        assert_eq!(Chooser::Left.toggled(), Chooser::Right);
    }

    #[test]
    fn test_exit_codel_tie_breaks() {
        // 3x3 square: every edge has three candidates
        let seg = segmentation(vec![vec![R; 3]; 3]);
        let block = &seg.blocks[0];
        let at = |x, y| Some(Position::new(x, y));

        assert_eq!(exit_codel(block, Direction::Right, Chooser::Left), at(2, 0));
        assert_eq!(exit_codel(block, Direction::Right, Chooser::Right), at(2, 2));
        assert_eq!(exit_codel(block, Direction::Down, Chooser::Left), at(2, 2));
        assert_eq!(exit_codel(block, Direction::Down, Chooser::Right), at(0, 2));
        assert_eq!(exit_codel(block, Direction::Left, Chooser::Left), at(0, 2));
        assert_eq!(exit_codel(block, Direction::Left, Chooser::Right), at(0, 0));
        assert_eq!(exit_codel(block, Direction::Up, Chooser::Left), at(0, 0));
        assert_eq!(exit_codel(block, Direction::Up, Chooser::Right), at(2, 0));
    }

    #[test]
    fn test_exit_codel_uses_only_the_extreme_edge() {
        // Red L shape: the right edge is the single codel at (2, 1)
        let seg = segmentation(vec![vec![R, K, K], vec![R, R, R]]);
        let red = &seg.blocks[0];
        for cc in Chooser::ALL {
            assert_eq!(
                exit_codel(red, Direction::Right, cc),
                Some(Position::new(2, 1))
            );
        }
        assert_eq!(
            exit_codel(red, Direction::Up, Chooser::Left),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            exit_codel(red, Direction::Up, Chooser::Right),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            exit_codel(red, Direction::Down, Chooser::Right),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn test_all_eight_exits() {
        // Red 2x2 block in the middle, each exit codel leads somewhere different
        let seg = segmentation(vec![
            vec![K, G, Y, K],
            vec![M, R, R, B],
            vec![C, R, R, K],
            vec![K, G, K, K],
        ]);
        let table = resolve(&seg);
        let red = seg.owner_at(Position::new(1, 1)).unwrap();
        let owner = |x, y| seg.owner_at(Position::new(x, y)).unwrap();

        assert_eq!(table.exit(red, Direction::Right, Chooser::Left), owner(3, 1));
        assert_eq!(table.exit(red, Direction::Right, Chooser::Right), BlockId::BOUNDARY);
        assert_eq!(table.exit(red, Direction::Down, Chooser::Left), BlockId::BOUNDARY);
        assert_eq!(table.exit(red, Direction::Down, Chooser::Right), owner(1, 3));
        assert_eq!(table.exit(red, Direction::Left, Chooser::Left), owner(0, 2));
        assert_eq!(table.exit(red, Direction::Left, Chooser::Right), owner(0, 1));
        assert_eq!(table.exit(red, Direction::Up, Chooser::Left), owner(1, 0));
        assert_eq!(table.exit(red, Direction::Up, Chooser::Right), owner(2, 0));
    }

    #[test]
    fn test_off_grid_and_black_are_boundary() {
        let seg = segmentation(vec![vec![R, K]]);
        let table = resolve(&seg);
        let red = BlockId(0);
        for dp in Direction::ALL {
            for cc in Chooser::ALL {
                assert_eq!(table.exit(red, dp, cc), BlockId::BOUNDARY);
            }
        }
        // Black blocks never lead anywhere
        assert_eq!(table.exits_of(BlockId(1)), Some(&[BlockId::BOUNDARY; 8]));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let rows = vec![vec![R, G, G], vec![R, R, B], vec![Y, B, B]];
        let seg = segmentation(rows);
        assert_eq!(resolve(&seg), resolve(&seg));
    }
}
