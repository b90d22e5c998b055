//! Scenario tests through the public rules API

use chess_rules::{
    attack, Board, BoardRecord, CaptureLedger, Color, Move, MoveContext, MoveKind, MoveRecord,
    PerformContext, Performed, Piece, PieceFlags, PieceId, PieceKind, Position, SequentialIds,
    DEFAULT_TRANSFORM_OPTIONS,
};

#[derive(Default)]
struct Pool(Vec<Piece>);

impl CaptureLedger for Pool {
    fn record_loss(&mut self, piece: Piece) {
        self.0.push(piece);
    }

    fn retract_loss(&mut self, color: Color, id: &PieceId) -> Option<Piece> {
        let index = self.0.iter().rposition(|p| p.color() == color && p.id() == id)?;
        Some(self.0.remove(index))
    }

    fn take_lost(&mut self, color: Color, kind: PieceKind) -> Option<Piece> {
        let index = self.0.iter().rposition(|p| p.color() == color && p.kind() == kind)?;
        Some(self.0.remove(index))
    }

    fn lost_kinds(&self, color: Color) -> Vec<PieceKind> {
        let mut kinds: Vec<PieceKind> = Vec::new();
        for piece in self.0.iter().filter(|p| p.color() == color) {
            if !kinds.contains(&piece.kind()) {
                kinds.push(piece.kind());
            }
        }
        kinds
    }
}

fn at(text: &str) -> Position {
    Position::from_algebraic(text).unwrap()
}

fn play(board: &mut Board, pool: &mut Pool, ids: &mut SequentialIds, from: &str, to: &str) -> Move {
    let mover = board.get(at(from)).unwrap().color();
    let mut mv = attack::legal_moves(board, at(from), &MoveContext::default(), true)
        .into_iter()
        .find(|m| m.target() == at(to))
        .unwrap_or_else(|| panic!("{from}-{to} should be legal"));
    assert_eq!(mv.color(), mover);
    let outcome = mv.perform(board, &mut PerformContext { ledger: pool, ids });
    assert_eq!(outcome, Performed::Done);
    mv
}

#[test]
fn test_scholars_mate_leaves_no_legal_reply() {
    //! Four quick moves end the game; the final queen capture gives check and
    //! black has no legal move.

    let mut ids = SequentialIds::default();
    let mut board = Board::standard(&mut ids);
    let mut pool = Pool::default();

    play(&mut board, &mut pool, &mut ids, "e2", "e4");
    play(&mut board, &mut pool, &mut ids, "e7", "e5");
    play(&mut board, &mut pool, &mut ids, "f1", "c4");
    play(&mut board, &mut pool, &mut ids, "b8", "c6");
    play(&mut board, &mut pool, &mut ids, "d1", "h5");
    play(&mut board, &mut pool, &mut ids, "g8", "f6");
    let mut mate = play(&mut board, &mut pool, &mut ids, "h5", "f7");

    assert_eq!(mate.notation(), Some("Qh5xf7+"));
    assert!(!attack::has_any_legal_move(&mut board, Color::Black, &MoveContext::default(), true));
    mate.mark_mate();
    assert_eq!(mate.notation(), Some("Qh5xf7#"));
    assert_eq!(pool.lost_kinds(Color::Black), vec![PieceKind::Pawn]);
}

#[test]
fn test_pawn_loses_double_step_after_moving() {
    let mut ids = SequentialIds::default();
    let mut board = Board::standard(&mut ids);
    let mut pool = Pool::default();

    play(&mut board, &mut pool, &mut ids, "d2", "d3");
    assert!(board.get(at("d3")).unwrap().has_moved());
    let context = MoveContext::default();
    let targets: Vec<Position> = attack::legal_moves(&mut board, at("d3"), &context, true)
        .iter()
        .map(Move::target)
        .collect();
    assert_eq!(targets, vec![at("d4")]);
}

#[test]
fn test_castled_pieces_cannot_castle_again() {
    let mut board = Board::empty();
    let king = Piece::new(PieceId::new("K"), PieceKind::King, Color::White);
    let rook = Piece::new(PieceId::new("R"), PieceKind::Rook, Color::White);
    board.set(at("e1"), Some(king));
    board.set(at("a1"), Some(rook));
    board.set(at("h8"), Some(Piece::new(PieceId::new("k"), PieceKind::King, Color::Black)));

    let mut castling = attack::legal_moves(&mut board, at("a1"), &MoveContext::default(), true)
        .into_iter()
        .find(|m| m.kind() == MoveKind::Castling)
        .unwrap();
    assert_eq!(castling.clickable_positions(), vec![at("e1")]);
    castling.forward(&mut board);
    assert_eq!(
        board.get(at("c1")).unwrap().flags(),
        PieceFlags {
            moved: true,
            castled: true
        }
    );
    assert!(board.get(at("d1")).unwrap().flags().castled);
    let again = attack::legal_moves(&mut board, at("c1"), &MoveContext::default(), true)
        .into_iter()
        .any(|m| m.kind() == MoveKind::Castling);
    assert!(!again);

    castling.reverse(&mut board);
    assert!(board.get(at("e1")).unwrap().can_castle());
    assert!(board.get(at("a1")).unwrap().can_castle());
}

#[test]
fn test_promotion_offers_defaults_regardless_of_captures() {
    let mut board = Board::empty();
    board.set(at("g7"), Some(Piece::new(PieceId::new("P"), PieceKind::Pawn, Color::White)));
    board.set(at("a1"), Some(Piece::new(PieceId::new("K"), PieceKind::King, Color::White)));
    board.set(at("a8"), Some(Piece::new(PieceId::new("k"), PieceKind::King, Color::Black)));

    let moves = attack::legal_moves(&mut board, at("g7"), &MoveContext::default(), true);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].as_promotion().unwrap().transform_options(), &DEFAULT_TRANSFORM_OPTIONS);
}

#[test]
fn test_saved_board_and_moves_survive_json() {
    let mut ids = SequentialIds::default();
    let mut board = Board::standard(&mut ids);
    let initial = BoardRecord::from_board(&board);
    let mut pool = Pool::default();
    let moves = vec![
        play(&mut board, &mut pool, &mut ids, "g1", "f3"),
        play(&mut board, &mut pool, &mut ids, "d7", "d5"),
    ];

    let board_json = serde_json::to_string(&initial).unwrap();
    let records: Vec<MoveRecord> = moves.iter().map(Move::to_record).collect();
    let moves_json = serde_json::to_string(&records).unwrap();

    let (mut replayed, report) = serde_json::from_str::<BoardRecord>(&board_json)
        .unwrap()
        .restore(&mut ids)
        .unwrap();
    assert!(report.is_clean());
    let records: Vec<MoveRecord> = serde_json::from_str(&moves_json).unwrap();
    for record in &records {
        record.validate().unwrap();
        let context = MoveContext::default();
        let mut mv = attack::legal_moves(&mut replayed, record.origin(), &context, true)
            .into_iter()
            .find(|candidate| record.matches(candidate))
            .unwrap();
        mv.perform(
            &mut replayed,
            &mut PerformContext {
                ledger: &mut pool,
                ids: &mut ids,
            },
        );
    }
    assert_eq!(replayed, board);
}
