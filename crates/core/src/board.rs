//! Board module - the 10x20 playfield grid.
//!
//! Each cell is empty or filled with a piece kind (which carries the color).
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) with x in 0..10 left to right, y in 0..20 top to
//! bottom. A piece may hover above the visible board (negative y) while it
//! has not fully entered yet; only rows >= 0 exist in storage.

use blockdrop_types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::shape::Shape;

/// Total number of cells on the board.
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows in flat row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x).
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates.
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board.
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board.
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y). Returns `None` if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a board-space cell is filled. Never mutates; out-of-bounds
    /// positions read as not occupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether the given shape, anchored at (x, y) and translated by
    /// (dx, dy), fits on the board.
    ///
    /// A filled shape cell blocks the placement when it falls outside the
    /// horizontal bounds, at or past the bottom edge, or onto an occupied
    /// cell at a non-negative row. Cells at negative rows (piece still above
    /// the visible board) only fail the horizontal/bottom checks.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8, dx: i8, dy: i8) -> bool {
        let new_x = x + dx;
        let new_y = y + dy;

        for (cx, cy) in shape.cells() {
            let bx = new_x + cx;
            let by = new_y + cy;

            if bx < 0 || bx >= BOARD_WIDTH as i8 {
                return false;
            }
            if by >= BOARD_HEIGHT as i8 {
                return false;
            }
            if by >= 0 && self.is_occupied(bx, by) {
                return false;
            }
        }
        true
    }

    /// Write the piece's kind into every filled shape cell with a resulting
    /// row >= 0. Cells above the top are silently dropped; spawn-collision
    /// checks keep that from happening in normal play.
    pub fn place(&mut self, shape: &Shape, kind: PieceKind, x: i8, y: i8) {
        for (cx, cy) in shape.cells() {
            let by = y + cy;
            if by >= 0 {
                self.set(x + cx, by, Some(kind));
            }
        }
    }

    /// Check if a row is completely filled.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shifting every row above it down by one and inserting
    /// an empty row at the top.
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges safely.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans bottom to top; after removing a row the same index is examined
    /// again, because the rows above have shifted down into it. That is what
    /// makes multiple adjacent full rows clear in a single pass.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
                // Re-examine the same row index.
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board into a dense u8 grid (0 = empty, 1-7 = piece index).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                out[y][x] = match self.cells[y * BOARD_WIDTH as usize + x] {
                    Some(kind) => kind.index(),
                    None => 0,
                };
            }
        }
    }

    /// Clear the entire board.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
