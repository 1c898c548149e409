//! Pieces module - the 12-shape catalog, shape matrices and rotation
//!
//! Every catalog entry is a small 0/1 pattern. Instantiating a shape stamps each
//! occupied cell with a freshly drawn glyph, so the matrix of an active piece
//! already holds the exact [`Block`]s that will be merged into the board.
//!
//! Rotation is a plain 90° clockwise turn of the bounding box (transpose, then
//! reverse every row). There is no kick table: a rotation either fits in place
//! or it is rejected.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Block, Cell, PieceKind, BOARD_WIDTH, MAX_SHAPE_SIZE};

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i8, i8);

/// All occupied offsets of one shape
pub type Silhouette = ArrayVec<CellOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH / 2) as i8 - 1, 0);

/// Cosmetic glyphs stamped onto spawned cells
pub const GLYPHS: [char; 16] = [
    '#', '@', '$', '%', '&', '*', '+', '=', '?', '!', '~', '^', '§', '¤', 'Ø', '¥',
];

/// Catalog pattern for a shape, one string per row (`#` = occupied)
pub fn pattern(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::F => &[".##", "##.", ".#."],
        PieceKind::I => &["#", "#", "#", "#", "#"],
        PieceKind::L => &["#.", "#.", "#.", "##"],
        PieceKind::P => &["##", "##", "#."],
        PieceKind::N => &[".#", ".#", "##", "#."],
        PieceKind::T => &["###", ".#.", ".#."],
        PieceKind::U => &["#.#", "###"],
        PieceKind::V => &["#..", "#..", "###"],
        PieceKind::W => &["#..", "##.", ".##"],
        PieceKind::X => &[".#.", "###", ".#."],
        PieceKind::Y => &[".#", "##", ".#", ".#"],
        PieceKind::Z => &["##.", ".#.", ".##"],
    }
}

/// Occupied offsets of the catalog pattern, row-major
pub fn catalog_silhouette(kind: PieceKind) -> Silhouette {
    let mut out = Silhouette::new();
    for (r, row) in pattern(kind).iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            if ch == '#' {
                out.push((c as i8, r as i8));
            }
        }
    }
    out
}

/// Catalog template for a shape, every cell stamped with the plain `#` glyph
pub fn shape(kind: PieceKind) -> ShapeMatrix {
    ShapeMatrix::from_catalog(kind, || '#')
}

/// Rectangular matrix of cells making up a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build the matrix of a catalog shape, asking `glyph` for each occupied cell
    pub fn from_catalog(kind: PieceKind, mut glyph: impl FnMut() -> char) -> Self {
        let rows = pattern(kind);
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut cols = 0u8;
        for (r, row) in rows.iter().enumerate() {
            cols = cols.max(row.chars().count() as u8);
            for (c, ch) in row.chars().enumerate() {
                if ch == '#' {
                    cells[r][c] = Some(Block::new(kind, glyph()));
                }
            }
        }
        Self {
            rows: rows.len() as u8,
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Cell at (row, col); None outside the bounding box
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows as usize || col >= self.cols as usize {
            return None;
        }
        self.cells[row][col]
    }

    /// Occupied cells as (dx, dy, block)
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, Block)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter_map(move |c| self.cells[r][c].map(|b| (c as i8, r as i8, b)))
        })
    }

    /// Occupied offsets, row-major
    pub fn silhouette(&self) -> Silhouette {
        self.occupied().map(|(dx, dy, _)| (dx, dy)).collect()
    }

    pub fn cell_count(&self) -> usize {
        self.occupied().count()
    }

    /// 90° clockwise rotation: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.cols;
        let cols = self.rows;
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for r in 0..rows as usize {
            for c in 0..cols as usize {
                cells[r][c] = self.cells[self.rows as usize - 1 - c][r];
            }
        }
        Self { rows, cols, cells }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Instantiate a catalog shape at the spawn position
    pub fn new(kind: PieceKind, matrix: ShapeMatrix) -> Self {
        Self {
            kind,
            matrix,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Absolute positions of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Block)> + '_ {
        self.matrix
            .occupied()
            .map(move |(dx, dy, b)| (self.x + dx, self.y + dy, b))
    }
}

/// Draw a uniformly random catalog shape with freshly drawn glyphs.
pub fn random_piece(rng: &mut SimpleRng) -> ActivePiece {
    let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
    instantiate(kind, rng)
}

/// Instantiate a specific shape with random glyphs.
pub fn instantiate(kind: PieceKind, rng: &mut SimpleRng) -> ActivePiece {
    let matrix = ShapeMatrix::from_catalog(kind, || rng.pick(&GLYPHS).unwrap_or('#'));
    ActivePiece::new(kind, matrix)
}
