//! Flood-fill segmentation of a colour grid into blocks
//!
//! A block is a maximal 4-connected region of codels with the same colour.
//! White codels are the exception: each one becomes a block of its own, so
//! the engine crosses white areas one codel per step.

use crate::color::Color;
use crate::grid::{ColorGrid, Position};
use bitvec::prelude::*;
use log::debug;
use std::fmt;

/// Handle of a block inside a program's block arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

impl BlockId {
    /// The shared sentinel standing for the image edge and black walls
    pub const BOUNDARY: BlockId = BlockId(usize::MAX);

    pub fn is_boundary(self) -> bool {
        self == BlockId::BOUNDARY
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_boundary() {
            write!(f, "boundary")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A connected region of one colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub color: Color,
    /// Member codels, in discovery order
    pub codels: Vec<Position>,
}

impl Block {
    /// Codel count, the value pushed by `push`
    pub fn size(&self) -> usize {
        self.codels.len()
    }

    /// Inclusive bounding box as (top-left, bottom-right)
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let first = *self.codels.first()?;
        Some(self.codels.iter().fold((first, first), |(lo, hi), p| {
            (
                Position::new(lo.x.min(p.x), lo.y.min(p.y)),
                Position::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

/// Result of segmenting a grid: the blocks plus the owner of every codel
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub width: usize,
    pub height: usize,
    pub blocks: Vec<Block>,
    /// Row-major map from codel to owning block
    pub owners: Vec<BlockId>,
}

impl Segmentation {
    /// Block occupying a position, or `None` when it lies off the grid
    pub fn owner_at(&self, pos: Position) -> Option<BlockId> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.owners[pos.y * self.width + pos.x])
        } else {
            None
        }
    }
}

/// Partition the grid into blocks
pub fn segment(grid: &ColorGrid) -> Segmentation {
    let width = grid.width();
    let height = grid.height();
    let mut visited = bitvec![0; grid.len()];
    let mut owners = vec![BlockId::BOUNDARY; grid.len()];
    let mut blocks = Vec::new();
    let mut pending = Vec::new();

    for start in 0..grid.len() {
        if visited[start] {
            continue;
        }

        let color = grid.cells()[start];
        let id = BlockId(blocks.len());
        let mut codels = Vec::new();

        visited.set(start, true);
        pending.push(start);

        while let Some(index) = pending.pop() {
            owners[index] = id;
            let pos = grid.position_of(index);
            codels.push(pos);

            if color.is_white() {
                continue;
            }

            let neighbours = [
                (pos.x > 0).then(|| index - 1),
                (pos.x + 1 < width).then(|| index + 1),
                (pos.y > 0).then(|| index - width),
                (pos.y + 1 < height).then(|| index + width),
            ];
            for next in neighbours.into_iter().flatten() {
                if !visited[next] && grid.cells()[next] == color {
                    visited.set(next, true);
                    pending.push(next);
                }
            }
        }

        blocks.push(Block { color, codels });
    }

    debug!(
        "segmented {}x{} grid into {} blocks",
        width,
        height,
        blocks.len()
    );

    Segmentation {
        width,
        height,
        blocks,
        owners,
    }
}
