//! 8x8 board of optional piece occupants
//!
//! Pure data: no legality logic lives here. Every write takes a fresh
//! generation stamp from a process-wide counter, which is what piece caches
//! key on.

use crate::ids::IdGenerator;
use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Position};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub const BOARD_SIZE: i8 = 8;

pub type Cell = Option<Piece>;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug)]
pub struct Board {
    cells: [[Cell; 8]; 8],
    generation: u64,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: Default::default(),
            generation: next_generation(),
        }
    }

    /// Classical initial setup, ids drawn from `ids`
    pub fn standard(ids: &mut dyn IdGenerator) -> Self {
        let mut board = Self::empty();
        for (color, back_row, pawn_row) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
            for col in 0..BOARD_SIZE {
                let kind = BACK_RANK[col as usize];
                board.set(
                    Position::new(back_row, col),
                    Some(Piece::new(ids.next_id(), kind, color)),
                );
                board.set(
                    Position::new(pawn_row, col),
                    Some(Piece::new(ids.next_id(), PieceKind::Pawn, color)),
                );
            }
        }
        board
    }

    #[inline]
    pub fn is_on_board(position: Position) -> bool {
        position.is_on_board()
    }

    /// Stamp of the last write
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, position: Position) -> Option<&Piece> {
        if !position.is_on_board() {
            return None;
        }
        self.cells[position.row as usize][position.col as usize].as_ref()
    }

    /// Write a cell and return its previous occupant
    pub fn set(&mut self, position: Position, cell: Cell) -> Cell {
        if !position.is_on_board() {
            tracing::warn!("[BOARD] Ignoring write to off-board position {}", position);
            return None;
        }
        self.generation = next_generation();
        std::mem::replace(&mut self.cells[position.row as usize][position.col as usize], cell)
    }

    /// Detach the occupant of a cell
    pub fn take(&mut self, position: Position) -> Cell {
        self.set(position, None)
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    pub fn color_at(&self, position: Position) -> Option<Color> {
        self.get(position).map(Piece::color)
    }

    /// Occupied cells in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.as_ref()
                    .map(|piece| (Position::new(row as i8, col as i8), piece))
            })
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    pub fn find(&self, id: &PieceId) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.id() == id)
            .map(|(position, _)| position)
    }

    pub fn guarded_positions(&self, color: Color) -> Vec<Position> {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.is_guarded())
            .map(|(position, _)| position)
            .collect()
    }

    /// Clear every piece's memo slots
    pub fn invalidate_caches(&self) {
        for (_, piece) in self.pieces() {
            piece.invalidate_cache();
        }
    }

    /// Row-major rows of cells, rank 1 first
    pub fn rows(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

// A copy is a different board and must not share cache stamps.
impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            generation: next_generation(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

fn symbol(piece: &Piece) -> char {
    let c = match piece.kind() {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.color() {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let c = self.get(Position::new(row, col)).map(symbol).unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
