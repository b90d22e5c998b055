use super::*;
use crate::moves::{CastlingInitiator, MoveKind};
use crate::piece::PieceFlags;
use crate::types::PieceId;

fn at(text: &str) -> Position {
    Position::from_algebraic(text).unwrap()
}

fn place(board: &mut Board, square: &str, kind: PieceKind, color: Color) {
    let id = PieceId::new(format!("{}-{}", kind.tag(), square));
    board.set(at(square), Some(Piece::new(id, kind, color)));
}

fn moves_from(board: &Board, square: &str, context: &MoveContext) -> Vec<Move> {
    let piece = board.get(at(square)).unwrap();
    piece.possible_moves(at(square), board, context)
}

fn targets(moves: &[Move]) -> Vec<Position> {
    let mut squares: Vec<Position> = moves.iter().map(Move::target).collect();
    squares.sort();
    squares
}

#[test]
fn test_knight_from_center_of_empty_board() {
    let mut board = Board::empty();
    board.set(
        Position::new(4, 4),
        Some(Piece::new(PieceId::new("n"), PieceKind::Knight, Color::White)),
    );
    let mut squares =
        capturing_positions(PieceKind::Knight, Color::White, Position::new(4, 4), &board);
    squares.sort();
    let mut expected = vec![
        Position::new(2, 3),
        Position::new(2, 5),
        Position::new(3, 2),
        Position::new(3, 6),
        Position::new(5, 2),
        Position::new(5, 6),
        Position::new(6, 3),
        Position::new(6, 5),
    ];
    expected.sort();
    assert_eq!(squares, expected);
}

#[test]
fn test_knight_in_corner_has_two_squares() {
    let board = Board::empty();
    let squares = capturing_positions(PieceKind::Knight, Color::Black, at("a1"), &board);
    assert_eq!(squares.len(), 2);
}

#[test]
fn test_ray_includes_first_occupant_of_either_colour() {
    let mut board = Board::empty();
    place(&mut board, "a1", PieceKind::Rook, Color::White);
    place(&mut board, "a4", PieceKind::Pawn, Color::White);
    place(&mut board, "d1", PieceKind::Knight, Color::Black);

    let threats = capturing_positions(PieceKind::Rook, Color::White, at("a1"), &board);
    assert!(threats.contains(&at("a4")), "friendly blocker is threatened");
    assert!(!threats.contains(&at("a5")));
    assert!(threats.contains(&at("d1")));
    assert!(!threats.contains(&at("e1")));

    let moves = moves_from(&board, "a1", &MoveContext::default());
    assert_eq!(targets(&moves), vec![at("b1"), at("c1"), at("d1"), at("a2"), at("a3")].tap_sort());
    let capture = moves.iter().find(|m| m.target() == at("d1")).unwrap();
    assert_eq!(capture.captures().unwrap().piece.kind(), PieceKind::Knight);
}

#[test]
fn test_queen_combines_rook_and_bishop_rays() {
    let board = Board::empty();
    let squares = capturing_positions(PieceKind::Queen, Color::White, at("d4"), &board);
    assert_eq!(squares.len(), 27);
}

#[test]
fn test_pawn_threatens_only_diagonals() {
    let board = Board::empty();
    let mut squares = capturing_positions(PieceKind::Pawn, Color::White, at("e2"), &board);
    squares.sort();
    assert_eq!(squares, vec![at("d3"), at("f3")].tap_sort());

    let black = capturing_positions(PieceKind::Pawn, Color::Black, at("a7"), &board);
    assert_eq!(black, vec![at("b6")]);
}

#[test]
fn test_pawn_double_step_gated_by_flag_and_occupancy() {
    let mut board = Board::empty();
    place(&mut board, "e2", PieceKind::Pawn, Color::White);
    let moves = moves_from(&board, "e2", &MoveContext::default());
    assert_eq!(targets(&moves), vec![at("e3"), at("e4")].tap_sort());

    place(&mut board, "e4", PieceKind::Knight, Color::Black);
    let moves = moves_from(&board, "e2", &MoveContext::default());
    assert_eq!(targets(&moves), vec![at("e3")]);

    place(&mut board, "e3", PieceKind::Knight, Color::Black);
    let moves = moves_from(&board, "e2", &MoveContext::default());
    assert!(moves.is_empty(), "blocked pawn cannot jump");

    let mut moved = Board::empty();
    moved.set(
        at("e2"),
        Some(
            Piece::new(PieceId::new("p"), PieceKind::Pawn, Color::White)
                .with_flags(PieceFlags { moved: true, castled: false }),
        ),
    );
    assert_eq!(targets(&moves_from(&moved, "e2", &MoveContext::default())), vec![at("e3")]);
}

#[test]
fn test_pawn_captures_need_enemy() {
    let mut board = Board::empty();
    place(&mut board, "e4", PieceKind::Pawn, Color::White);
    place(&mut board, "d5", PieceKind::Pawn, Color::Black);
    place(&mut board, "f5", PieceKind::Pawn, Color::White);
    let moves = moves_from(&board, "e4", &MoveContext::default());
    assert_eq!(targets(&moves), vec![at("e5"), at("d5")].tap_sort());
}

#[test]
fn test_promotion_offers_all_configured_options() {
    let mut board = Board::empty();
    place(&mut board, "a7", PieceKind::Pawn, Color::White);
    let moves = moves_from(&board, "a7", &MoveContext::default());
    assert_eq!(moves.len(), 1);
    let promotion = moves[0].as_promotion().unwrap();
    assert_eq!(promotion.transform_options(), &DEFAULT_TRANSFORM_OPTIONS);
    assert!(!promotion.is_revive());
}

#[test]
fn test_promotion_without_options_is_a_shift() {
    let mut board = Board::empty();
    place(&mut board, "h2", PieceKind::Pawn, Color::Black);
    let context = MoveContext::reviving(&DEFAULT_TRANSFORM_OPTIONS, &[]);
    let moves = moves_from(&board, "h2", &context);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].kind(), MoveKind::Shift);
    assert_eq!(moves[0].target(), at("h1"));
}

#[test]
fn test_reviving_context_keeps_configured_order() {
    let context = MoveContext::reviving(
        &DEFAULT_TRANSFORM_OPTIONS,
        &[PieceKind::Knight, PieceKind::Pawn, PieceKind::Queen],
    );
    assert_eq!(context.promotion_options, vec![PieceKind::Queen, PieceKind::Knight]);
    assert!(context.revive);
    assert_ne!(context.fingerprint(), MoveContext::default().fingerprint());
}

#[test]
fn test_king_generates_both_castlings() {
    let mut board = Board::empty();
    place(&mut board, "e1", PieceKind::King, Color::White);
    place(&mut board, "a1", PieceKind::Rook, Color::White);
    place(&mut board, "h1", PieceKind::Rook, Color::White);

    let castlings: Vec<Move> = moves_from(&board, "e1", &MoveContext::default())
        .into_iter()
        .filter(|m| m.kind() == MoveKind::Castling)
        .collect();
    assert_eq!(castlings.len(), 2);
    for castling in &castlings {
        let Move::Castling(c) = castling else { unreachable!() };
        assert_eq!(c.initiator(), CastlingInitiator::King);
        if c.rook_from() == at("h1") {
            assert_eq!((c.king_to(), c.rook_to()), (at("g1"), at("f1")));
        } else {
            assert_eq!((c.king_to(), c.rook_to()), (at("c1"), at("d1")));
        }
    }
}

#[test]
fn test_rook_initiated_castling_mirrors_king() {
    let mut board = Board::empty();
    place(&mut board, "e8", PieceKind::King, Color::Black);
    place(&mut board, "h8", PieceKind::Rook, Color::Black);

    let castlings: Vec<Move> = moves_from(&board, "h8", &MoveContext::default())
        .into_iter()
        .filter(|m| m.kind() == MoveKind::Castling)
        .collect();
    assert_eq!(castlings.len(), 1);
    let Move::Castling(c) = &castlings[0] else { unreachable!() };
    assert_eq!(c.initiator(), CastlingInitiator::Rook);
    assert_eq!(c.king_from(), at("e8"));
    assert_eq!(castlings[0].target(), at("f8"));
}

#[test]
fn test_castling_blocked_by_piece_or_history() {
    let mut board = Board::empty();
    place(&mut board, "e1", PieceKind::King, Color::White);
    place(&mut board, "h1", PieceKind::Rook, Color::White);
    place(&mut board, "g1", PieceKind::Knight, Color::White);
    let castling_count = |board: &Board| {
        moves_from(board, "e1", &MoveContext::default())
            .iter()
            .filter(|m| m.kind() == MoveKind::Castling)
            .count()
    };
    assert_eq!(castling_count(&board), 0);

    board.take(at("g1"));
    assert_eq!(castling_count(&board), 1);

    board.set(
        at("h1"),
        Some(
            Piece::new(PieceId::new("r"), PieceKind::Rook, Color::White)
                .with_flags(PieceFlags { moved: true, castled: false }),
        ),
    );
    assert_eq!(castling_count(&board), 0);

    place(&mut board, "h1", PieceKind::Rook, Color::Black);
    assert_eq!(castling_count(&board), 0, "enemy rook never cooperates");
}

#[test]
fn test_moves_never_target_friendly_squares() {
    let mut ids = crate::ids::SequentialIds::default();
    let board = Board::standard(&mut ids);
    for (position, piece) in board.pieces() {
        for candidate in piece.possible_moves(position, &board, &MoveContext::default()) {
            if candidate.kind() == MoveKind::Castling {
                continue;
            }
            assert_ne!(board.color_at(candidate.target()), Some(piece.color()));
        }
    }
}

#[test]
fn test_standard_opening_move_count() {
    let mut ids = crate::ids::SequentialIds::default();
    let board = Board::standard(&mut ids);
    let context = MoveContext::default();
    let total: usize = board
        .pieces_of(Color::White)
        .map(|(position, piece)| piece.possible_moves(position, &board, &context).len())
        .sum();
    assert_eq!(total, 20);
}

trait TapSort {
    fn tap_sort(self) -> Self;
}

impl TapSort for Vec<Position> {
    fn tap_sort(mut self) -> Self {
        self.sort();
        self
    }
}
