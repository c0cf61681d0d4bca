//! Grid module - the 10x22 playfield
//!
//! Each cell is empty or tagged with what filled it (a piece kind or garbage).
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21
//! (top to bottom). Rows 0 and 1 sit above the visible field.

use std::fmt;

use crate::piece::Piece;
use crate::shapes;
use crate::types::{Cell, Tag, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The playfield - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
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

    /// Whether `piece`, shifted by `(dx, dy)`, fits on the grid.
    ///
    /// Only cells the piece's mask marks as filled are checked: blank corners
    /// of the 4x4 box never block, even when they hang outside the grid.
    pub fn fits(&self, piece: &Piece, dx: i8, dy: i8) -> bool {
        let mask = piece.mask();
        let fits = shapes::cells(&mask).all(|(cx, cy)| {
            let x = piece.x + cx + dx;
            let y = piece.y + cy + dy;
            matches!(self.get(x, y), Some(None))
        });
        fits
    }

    /// Write a piece's cells into the grid, tagged with its kind.
    ///
    /// Cells outside the grid are dropped. Returns the number of cells written.
    pub fn lock_piece(&mut self, piece: &Piece) -> usize {
        let tag = Tag::Piece(piece.kind);
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, Some(tag)) {
                written += 1;
            }
        }
        written
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// A row counts as garbage when its first column carries the garbage tag
    pub fn is_garbage_row(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y)[0] == Some(Tag::Garbage)
    }

    /// Whether the bottom row has at least one occupied cell
    pub fn bottom_row_occupied(&self) -> bool {
        self.row(HEIGHT - 1).iter().any(|cell| cell.is_some())
    }

    /// Remove a row and shift all rows above it down by one.
    /// The top row becomes empty.
    pub fn clear_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        for cell in &mut self.cells[..WIDTH] {
            *cell = None;
        }
    }

    /// Clear every full, non-garbage row, scanning top to bottom.
    ///
    /// Returns how many rows were removed. A full row tagged as garbage stays.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..HEIGHT {
            if self.is_row_full(y) && !self.is_garbage_row(y) {
                self.clear_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Shift the whole stack up one row and fill the bottom row with garbage.
    /// Whatever was in the top row is discarded.
    pub fn push_garbage_row(&mut self) {
        self.cells.copy_within(WIDTH.., 0);
        for cell in &mut self.cells[GRID_SIZE - WIDTH..] {
            *cell = Some(Tag::Garbage);
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupancy view, row by row
    pub fn occupancy(&self) -> [[bool; WIDTH]; HEIGHT] {
        let mut out = [[false; WIDTH]; HEIGHT];
        for (y, row) in out.iter_mut().enumerate() {
            for (x, filled) in row.iter_mut().enumerate() {
                *filled = self.cells[y * WIDTH + x].is_some();
            }
        }
        out
    }

    /// Tag view as snapshot codes (0 = empty), row by row
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * WIDTH + x].map_or(0, |tag| tag.code());
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// ASCII dump: the hidden rows, a separator, the visible field and a footer.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(WIDTH);
        for y in 0..HEIGHT {
            if y == HIDDEN_ROWS as usize {
                writeln!(f, "{rule}")?;
            }
            for cell in self.row(y) {
                let glyph = cell.map_or(' ', |tag| tag.glyph());
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{rule}")
    }
}
