//! Serializable records of pieces, boards and moves
//!
//! Records are the persisted shape; they carry tags and optional flags rather
//! than live objects. Piece restore goes through a kind dispatch table whose
//! entries load the kind's own custom properties (`moved`/`castled` for kings
//! and rooks, `hasMoved` for pawns).
//!
//! Moves are not rebuilt from records directly. A [`MoveRecord`] is validated,
//! then matched against the candidates generated on the board it is replayed
//! on, so that a record which no longer fits the position is rejected.

use crate::board::{Board, BOARD_SIZE};
use crate::error::{RulesError, RulesResult};
use crate::ids::IdGenerator;
use crate::moves::{Capture, Castling, CastlingInitiator, Move, Promotion, Shift};
use crate::piece::{Piece, PieceFlags};
use crate::types::{Color, PieceId, PieceKind, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PieceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub castled: Option<bool>,
    #[serde(default, rename = "hasMoved", skip_serializing_if = "Option::is_none")]
    pub has_moved: Option<bool>,
}

type PropertyLoader = fn(&PieceRecord) -> PieceFlags;
type PropertySaver = fn(PieceFlags, &mut PieceRecord);

struct KindEntry {
    kind: PieceKind,
    load: PropertyLoader,
    save: PropertySaver,
}

fn load_nothing(_record: &PieceRecord) -> PieceFlags {
    PieceFlags::default()
}

fn save_nothing(_flags: PieceFlags, _record: &mut PieceRecord) {}

fn load_pawn(record: &PieceRecord) -> PieceFlags {
    PieceFlags {
        moved: record.has_moved.unwrap_or(false),
        castled: false,
    }
}

fn save_pawn(flags: PieceFlags, record: &mut PieceRecord) {
    record.has_moved = Some(flags.moved);
}

fn load_castler(record: &PieceRecord) -> PieceFlags {
    PieceFlags {
        moved: record.moved.unwrap_or(false),
        castled: record.castled.unwrap_or(false),
    }
}

fn save_castler(flags: PieceFlags, record: &mut PieceRecord) {
    record.moved = Some(flags.moved);
    record.castled = Some(flags.castled);
}

static KIND_TABLE: [KindEntry; 6] = [
    KindEntry { kind: PieceKind::Pawn, load: load_pawn, save: save_pawn },
    KindEntry { kind: PieceKind::Knight, load: load_nothing, save: save_nothing },
    KindEntry { kind: PieceKind::Bishop, load: load_nothing, save: save_nothing },
    KindEntry { kind: PieceKind::Rook, load: load_castler, save: save_castler },
    KindEntry { kind: PieceKind::Queen, load: load_nothing, save: save_nothing },
    KindEntry { kind: PieceKind::King, load: load_castler, save: save_castler },
];

fn entry(kind: PieceKind) -> &'static KindEntry {
    // The table lists every kind exactly once, in declaration order.
    &KIND_TABLE[kind as usize]
}

impl PieceRecord {
    pub fn from_piece(piece: &Piece) -> Self {
        let mut record = Self {
            kind: piece.kind().tag().to_string(),
            color: piece.color(),
            id: Some(piece.id().clone()),
            moved: None,
            castled: None,
            has_moved: None,
        };
        (entry(piece.kind()).save)(piece.flags(), &mut record);
        record
    }

    /// Rebuild the piece; records without an id get a fresh one
    pub fn to_piece(&self, ids: &mut dyn IdGenerator) -> RulesResult<Piece> {
        let kind = PieceKind::from_tag(&self.kind).ok_or_else(|| RulesError::UnknownPieceKind {
            kind: self.kind.clone(),
        })?;
        let entry = entry(kind);
        debug_assert_eq!(entry.kind, kind);
        let id = match &self.id {
            Some(id) => id.clone(),
            None => ids.next_id(),
        };
        Ok(Piece::new(id, kind, self.color).with_flags((entry.load)(self)))
    }

    /// Whether this snapshot describes `piece`; a missing id matches any id
    pub fn describes(&self, piece: &Piece) -> bool {
        let Some(kind) = PieceKind::from_tag(&self.kind) else {
            return false;
        };
        kind == piece.kind()
            && self.color == piece.color()
            && self.id.as_ref().map_or(true, |id| id == piece.id())
            && (entry(kind).load)(self) == piece.flags()
    }
}

/// Cells skipped while restoring a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub skipped: Vec<(Position, String)>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Eight rows of eight optional pieces, row 0 first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardRecord(pub Vec<Vec<Option<PieceRecord>>>);

impl BoardRecord {
    pub fn from_board(board: &Board) -> Self {
        Self(
            board
                .rows()
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.as_ref().map(PieceRecord::from_piece))
                        .collect()
                })
                .collect(),
        )
    }

    /// Build a board; cells with unknown kinds stay empty and are reported
    pub fn restore(&self, ids: &mut dyn IdGenerator) -> RulesResult<(Board, RestoreReport)> {
        let size = BOARD_SIZE as usize;
        if self.0.len() != size || self.0.iter().any(|row| row.len() != size) {
            return Err(RulesError::MalformedRecord {
                record: "board",
                message: format!("expected {BOARD_SIZE}x{BOARD_SIZE} cells"),
            });
        }
        let mut board = Board::empty();
        let mut report = RestoreReport::default();
        for (row, cells) in self.0.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(record) = cell else { continue };
                let position = Position::new(row as i8, col as i8);
                match record.to_piece(ids) {
                    Ok(piece) => {
                        board.set(position, Some(piece));
                    }
                    Err(err) => {
                        tracing::warn!("[RESTORE] Leaving {} empty: {}", position, err);
                        report.skipped.push((position, record.kind.clone()));
                    }
                }
            }
        }
        Ok((board, report))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub position: Position,
    pub piece: PieceRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MoveRecord {
    Shift {
        color: Color,
        from: Position,
        to: Position,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capture: Option<CaptureRecord>,
    },
    Castling {
        color: Color,
        king_from: Position,
        king_to: Position,
        rook_from: Position,
        rook_to: Position,
        initiator: CastlingInitiator,
    },
    Promotion {
        color: Color,
        from: Position,
        to: Position,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capture: Option<CaptureRecord>,
        transform_options: Vec<String>,
        #[serde(default)]
        revive: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promoted_to: Option<PieceRecord>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pawn: Option<PieceRecord>,
    },
}

fn malformed(message: impl Into<String>) -> RulesError {
    RulesError::MalformedRecord {
        record: "move",
        message: message.into(),
    }
}

fn check_on_board(positions: &[Position]) -> RulesResult<()> {
    match positions.iter().find(|p| !p.is_on_board()) {
        Some(off) => Err(malformed(format!(
            "position ({}, {}) is off the board",
            off.row, off.col
        ))),
        None => Ok(()),
    }
}

impl MoveRecord {
    pub fn color(&self) -> Color {
        match self {
            MoveRecord::Shift { color, .. }
            | MoveRecord::Castling { color, .. }
            | MoveRecord::Promotion { color, .. } => *color,
        }
    }

    /// Square the mover's piece started on
    pub fn origin(&self) -> Position {
        match self {
            MoveRecord::Shift { from, .. } | MoveRecord::Promotion { from, .. } => *from,
            MoveRecord::Castling {
                king_from,
                rook_from,
                initiator,
                ..
            } => match initiator {
                CastlingInitiator::King => *king_from,
                CastlingInitiator::Rook => *rook_from,
            },
        }
    }

    /// Shape checks that do not need a board
    pub fn validate(&self) -> RulesResult<()> {
        match self {
            MoveRecord::Shift { from, to, capture, .. } => {
                check_on_board(&[*from, *to])?;
                if let Some(capture) = capture {
                    check_on_board(&[capture.position])?;
                }
            }
            MoveRecord::Castling {
                king_from,
                king_to,
                rook_from,
                rook_to,
                ..
            } => {
                check_on_board(&[*king_from, *king_to, *rook_from, *rook_to])?;
                let row = king_from.row;
                if [king_to, rook_from, rook_to].iter().any(|p| p.row != row) {
                    return Err(malformed("castling squares must share one row"));
                }
            }
            MoveRecord::Promotion {
                from,
                to,
                capture,
                transform_options,
                promoted_to,
                ..
            } => {
                check_on_board(&[*from, *to])?;
                if let Some(capture) = capture {
                    check_on_board(&[capture.position])?;
                }
                if transform_options.is_empty() {
                    return Err(malformed("promotion without transform options"));
                }
                self.transform_kinds()?;
                if let Some(chosen) = promoted_to {
                    if !transform_options.contains(&chosen.kind) {
                        return Err(malformed(format!(
                            "promoted to '{}' outside the options",
                            chosen.kind
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Parsed transform options of a promotion record; empty otherwise
    pub fn transform_kinds(&self) -> RulesResult<Vec<PieceKind>> {
        let MoveRecord::Promotion { transform_options, .. } = self else {
            return Ok(Vec::new());
        };
        transform_options
            .iter()
            .map(|tag| {
                PieceKind::from_tag(tag)
                    .ok_or_else(|| malformed(format!("unknown transform option '{tag}'")))
            })
            .collect()
    }

    /// Stored promotion choice, if the record has one
    pub fn promotion_choice(&self, ids: &mut dyn IdGenerator) -> RulesResult<Option<Piece>> {
        match self {
            MoveRecord::Promotion {
                promoted_to: Some(chosen),
                ..
            } => chosen.to_piece(ids).map(Some),
            _ => Ok(None),
        }
    }

    /// Does the generated `candidate` describe the same move?
    pub fn matches(&self, candidate: &Move) -> bool {
        match (self, candidate) {
            (
                MoveRecord::Shift {
                    color,
                    from,
                    to,
                    capture,
                },
                Move::Shift(shift),
            ) => {
                shift.color == *color
                    && shift.from == *from
                    && shift.to == *to
                    && capture_agrees(capture.as_ref(), shift.captures.as_ref())
            }
            (
                MoveRecord::Castling {
                    color,
                    king_from,
                    rook_from,
                    initiator,
                    ..
                },
                Move::Castling(castling),
            ) => {
                castling.color == *color
                    && castling.king_from == *king_from
                    && castling.rook_from == *rook_from
                    && castling.initiator == *initiator
            }
            (
                MoveRecord::Promotion {
                    color,
                    from,
                    to,
                    capture,
                    ..
                },
                Move::Promotion(promotion),
            ) => {
                promotion.color == *color
                    && promotion.from == *from
                    && promotion.to == *to
                    && capture_agrees(capture.as_ref(), promotion.captures.as_ref())
            }
            _ => false,
        }
    }
}

/// Recorded and generated captures must both be absent, or take the same piece on the same square
fn capture_agrees(recorded: Option<&CaptureRecord>, generated: Option<&Capture>) -> bool {
    match (recorded, generated) {
        (None, None) => true,
        (Some(recorded), Some(generated)) => {
            recorded.position == generated.position && recorded.piece.describes(&generated.piece)
        }
        _ => false,
    }
}

fn capture_record(capture: Option<&Capture>) -> Option<CaptureRecord> {
    capture.map(|capture| CaptureRecord {
        position: capture.position,
        piece: PieceRecord::from_piece(&capture.piece),
    })
}

impl Shift {
    pub fn to_record(&self) -> MoveRecord {
        MoveRecord::Shift {
            color: self.color,
            from: self.from,
            to: self.to,
            capture: capture_record(self.captures.as_ref()),
        }
    }
}

impl Castling {
    pub fn to_record(&self) -> MoveRecord {
        MoveRecord::Castling {
            color: self.color,
            king_from: self.king_from,
            king_to: self.king_to,
            rook_from: self.rook_from,
            rook_to: self.rook_to,
            initiator: self.initiator,
        }
    }
}

impl Promotion {
    pub fn to_record(&self) -> MoveRecord {
        MoveRecord::Promotion {
            color: self.color,
            from: self.from,
            to: self.to,
            capture: capture_record(self.captures.as_ref()),
            transform_options: self
                .transform_options
                .iter()
                .map(|kind| kind.tag().to_string())
                .collect(),
            revive: self.revive,
            promoted_to: self.chosen.as_ref().map(PieceRecord::from_piece),
            pawn: self.pawn.as_ref().map(PieceRecord::from_piece),
        }
    }
}

impl Move {
    pub fn to_record(&self) -> MoveRecord {
        match self {
            Move::Shift(m) => m.to_record(),
            Move::Castling(m) => m.to_record(),
            Move::Promotion(m) => m.to_record(),
        }
    }

    /// Apply a stored promotion choice before `perform`
    pub fn preset_promotion(&mut self, piece: Piece) -> RulesResult<()> {
        match self {
            Move::Promotion(promotion) => promotion.preset_choice(piece),
            _ => Err(RulesError::NoPendingPromotion),
        }
    }
}
