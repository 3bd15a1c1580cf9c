//! Immutable program graph: the block arena, its exits and the start block

use crate::adjacency::{resolve, AdjacencyTable, Chooser, Direction};
use crate::color::Color;
use crate::error::ConstructionError;
use crate::grid::{ColorGrid, Position, RgbBuffer};
use crate::segmenter::{segment, Block, BlockId};
use log::{debug, warn};

/// A fully constructed program
///
/// Blocks refer to each other only through [`BlockId`]s into this arena,
/// so the cyclic exit graph needs no shared ownership. The boundary
/// sentinel is owned here as well and reached through `BlockId::BOUNDARY`.
#[derive(Debug, Clone)]
pub struct Program {
    width: usize,
    height: usize,
    blocks: Vec<Block>,
    boundary: Block,
    adjacency: AdjacencyTable,
    start: BlockId,
}

impl Program {
    /// Classify, segment and resolve a decoded image
    pub fn from_rgb(buffer: &RgbBuffer, codel_size: u32) -> Result<Program, ConstructionError> {
        let grid = ColorGrid::from_rgb(buffer, codel_size)?;
        Ok(build_program(&grid))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Block where execution begins: the one holding the top-left codel
    pub fn start(&self) -> BlockId {
        self.start
    }

    /// Look up any block, including the boundary sentinel
    pub fn block(&self, id: BlockId) -> &Block {
        self.blocks.get(id.index()).unwrap_or(&self.boundary)
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().enumerate().map(|(i, b)| (BlockId(i), b))
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn exit(&self, from: BlockId, dp: Direction, cc: Chooser) -> BlockId {
        self.adjacency.exit(from, dp, cc)
    }

    pub fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }
}

/// Build a program from an already classified grid
pub fn build_program(grid: &ColorGrid) -> Program {
    let segmentation = segment(grid);
    let adjacency = resolve(&segmentation);
    let start = segmentation
        .owner_at(Position::new(0, 0))
        .unwrap_or(BlockId::BOUNDARY);

    let program = Program {
        width: segmentation.width,
        height: segmentation.height,
        blocks: segmentation.blocks,
        boundary: boundary_block(),
        adjacency,
        start,
    };

    let start_color = program.block(start).color;
    if start_color.is_black() {
        warn!("program starts on a black codel; it will halt immediately");
    }
    debug!(
        "built program: {} blocks, start block {} ({})",
        program.block_count(),
        start,
        start_color
    );
    program
}

fn boundary_block() -> Block {
    Block {
        color: Color::Black,
        codels: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Hue, Lightness};
    use crate::grid::Grid;
    use test_log::test;

    const R: Color = Color::new(Hue::Red, Lightness::Normal);
    const G: Color = Color::new(Hue::Green, Lightness::Normal);

    #[test]
    fn test_build_program() {
        let grid = Grid::from_rows(vec![vec![R, R, G], vec![R, G, G]]).unwrap();
        let program = build_program(&grid);

        assert_eq!(program.block_count(), 2);
        assert_eq!(program.start(), BlockId(0));
        assert_eq!(program.block(program.start()).color, R);
        assert_eq!(program.block(program.start()).size(), 3);
        assert_eq!(
            program.exit(program.start(), Direction::Right, Chooser::Left),
            BlockId(1)
        );
    }

    #[test]
    fn test_boundary_lookup() {
        let grid = Grid::from_rows(vec![vec![R]]).unwrap();
        let program = build_program(&grid);
        let boundary = program.block(BlockId::BOUNDARY);
        assert!(boundary.color.is_black());
        assert_eq!(boundary.size(), 0);
    }
}
