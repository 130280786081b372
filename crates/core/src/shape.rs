//! Piece catalog and matrix rotation.
//!
//! Each tetromino is an immutable square occupancy matrix (side 2-4) plus a
//! kind that carries its color. Rotation produces a new matrix via the
//! clockwise transposition `rotated[i][j] = original[n-1-j][i]`; there are no
//! wall-kick offsets anywhere in the engine.

use blockdrop_types::PieceKind;

use arrayvec::ArrayVec;

/// Largest shape matrix side (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square binary occupancy matrix.
///
/// Rows are stored as bitmasks (bit `c` set = column `c` filled) so the whole
/// shape stays `Copy` and rotation never allocates. Only the low `size` bits
/// of the first `size` rows are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [u8; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from row bitmasks. `size` must be 1..=4.
    pub const fn from_rows(size: u8, rows: [u8; MAX_SHAPE_SIZE]) -> Self {
        Self { size, rows }
    }

    /// Matrix side length.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the matrix cell at (row, col) is filled.
    ///
    /// Out-of-matrix coordinates read as empty.
    pub fn filled(&self, row: u8, col: u8) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        (self.rows[row as usize] >> col) & 1 == 1
    }

    /// Rotate 90 degrees clockwise: `rotated[i][j] = original[n-1-j][i]`.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut rows = [0u8; MAX_SHAPE_SIZE];
        for i in 0..n {
            for j in 0..n {
                if self.filled(n - 1 - j, i) {
                    rows[i as usize] |= 1 << j;
                }
            }
        }
        Self { size: n, rows }
    }

    /// All filled cells as `(dx, dy)` offsets (column, row) from the matrix
    /// top-left. Every catalog template has exactly four.
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.filled(row, col) {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }
}

/// The immutable template for a piece kind.
///
/// Matrices follow the classic spawn orientations: I is a horizontal bar in
/// the second row of a 4x4, O a full 2x2, the rest sit in the top two rows of
/// a 3x3.
pub const fn template(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(4, [0b0000, 0b1111, 0b0000, 0b0000]),
        PieceKind::O => Shape::from_rows(2, [0b11, 0b11, 0, 0]),
        PieceKind::T => Shape::from_rows(3, [0b010, 0b111, 0b000, 0]),
        PieceKind::S => Shape::from_rows(3, [0b110, 0b011, 0b000, 0]),
        PieceKind::Z => Shape::from_rows(3, [0b011, 0b110, 0b000, 0]),
        PieceKind::J => Shape::from_rows(3, [0b001, 0b111, 0b000, 0]),
        PieceKind::L => Shape::from_rows(3, [0b100, 0b111, 0b000, 0]),
    }
}
