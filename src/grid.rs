//! Rectangular codel grids and sampling of raw pixels into codels

use crate::color::{classify, Color};
use crate::error::ConstructionError;
use log::{debug, warn};
use std::fmt;

/// Column/row coordinate of a single codel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Row-major rectangular grid; never empty once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

pub type ColorGrid = Grid<Color>;

impl<T> Grid<T> {
    /// Build a grid from rows, rejecting empty and ragged input
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ConstructionError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(ConstructionError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(ConstructionError::RaggedRow {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from row-major cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Result<Self, ConstructionError> {
        if width == 0 || height == 0 {
            return Err(ConstructionError::EmptyGrid);
        }
        if cells.len() != width * height {
            return Err(ConstructionError::PixelCountMismatch {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of an in-bounds position
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.position_of(i))
    }
}

/// Decoded image as handed over by the image collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl RgbBuffer {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self, ConstructionError> {
        if width == 0 || height == 0 {
            return Err(ConstructionError::EmptyGrid);
        }
        if pixels.len() != width * height {
            return Err(ConstructionError::PixelCountMismatch {
                expected: width * height,
                found: pixels.len(),
            });
        }
        Ok(RgbBuffer {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

impl ColorGrid {
    /// Classify one representative pixel (the top-left one) per codel
    pub fn from_rgb(buffer: &RgbBuffer, codel_size: u32) -> Result<Self, ConstructionError> {
        let size = codel_size as usize;
        let invalid = ConstructionError::InvalidCodelSize {
            codel_size,
            width: buffer.width,
            height: buffer.height,
        };
        if size == 0 {
            return Err(invalid);
        }

        let width = buffer.width / size;
        let height = buffer.height / size;
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        if buffer.width % size != 0 || buffer.height % size != 0 {
            warn!(
                "{}x{} image is not a multiple of codel size {}; partial codels are ignored",
                buffer.width, buffer.height, codel_size
            );
        }

        let cells: Vec<Color> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x * size, y * size)))
            .filter_map(|(x, y)| buffer.pixel(x, y))
            .map(classify)
            .collect();
        debug!(
            "sampled {}x{} codels from {}x{} pixels (codel size {})",
            width, height, buffer.width, buffer.height, codel_size
        );

        Grid::from_cells(width, height, cells)
    }
}
