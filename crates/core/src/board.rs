//! Board module - manages the game grid
//!
//! The board is a 16x22 grid where each cell is empty or holds a locked [`Block`].
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..15 (left to right), y ranges 0..21 (top to bottom)
//!
//! The board only knows about locked cells. The falling piece is tested against it
//! with [`Board::collides`] and written into it with [`Board::merge`].

use crate::pieces::ShapeMatrix;
use crate::types::{cell_type, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Board contents as cell type ids (0 = empty, 1..=12 = piece kind)
pub type TypeGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 16 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Would the given matrix collide when its origin sits at (x, y)?
    ///
    /// Cells above the top edge (negative y) are still arriving: they never hit
    /// board content but must stay inside the side walls.
    pub fn collides(&self, matrix: &ShapeMatrix, x: i8, y: i8) -> bool {
        matrix.occupied().any(|(dx, dy, _)| {
            let px = x as i16 + dx as i16;
            let py = y as i16 + dy as i16;
            if px < 0 || px >= BOARD_WIDTH as i16 || py >= BOARD_HEIGHT as i16 {
                return true;
            }
            py >= 0 && self.is_occupied(px as i8, py as i8)
        })
    }

    /// Write every occupied cell of the matrix into the board.
    ///
    /// Cells still above the top edge are dropped. Returns how many cells landed.
    pub fn merge(&mut self, matrix: &ShapeMatrix, x: i8, y: i8) -> usize {
        let mut written = 0;
        for (dx, dy, block) in matrix.occupied() {
            let py = y + dy;
            if py < 0 {
                continue;
            }
            if self.set(x + dx, py, Some(block)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row: shift all rows above down and insert an empty row at the top.
    /// Returns the number of rows removed (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        1
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a removal the same index is examined again, since the row that
    /// shifted into it may be full as well. Returns the number of rows removed.
    pub fn clear_completed_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Write the board as type ids into `out`
    pub fn write_type_grid(&self, out: &mut TypeGrid) {
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                out[y][x] = cell_type(*cell);
            }
        }
    }

    pub fn type_grid(&self) -> TypeGrid {
        let mut out = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_type_grid(&mut out);
        out
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
