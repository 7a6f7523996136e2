use std::collections::HashSet;

use grid_tactics::board::Board;
use grid_tactics::coord::{BoardShape, Pos};
use grid_tactics::rules::{captured_by, legal_destinations};
use grid_tactics::team::Team;
use grid_tactics::unit::{UnitId, UnitKind};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;


fn p(col: i32, row: i32) -> Pos { Pos::new(col, row) }

fn board() -> Board { Board::new(BoardShape::default()) }

fn place(board: &mut Board, kind: UnitKind, team: Team, pos: Pos) -> UnitId {
    board.place(kind, team, pos).unwrap()
}

fn destinations_of(board: &Board, id: UnitId) -> HashSet<Pos> {
    legal_destinations(board, board.unit(id).unwrap())
}

fn positions(items: impl IntoIterator<Item = (i32, i32)>) -> HashSet<Pos> {
    items.into_iter().map(|(col, row)| p(col, row)).collect()
}


#[test]
fn king_in_the_open_offers_all_eight_neighbors() {
    let mut board = board();
    let king = place(&mut board, UnitKind::King, Team::Player1, p(3, 3));
    assert_eq!(
        destinations_of(&board, king),
        positions([(2, 2), (2, 3), (2, 4), (3, 2), (3, 4), (4, 2), (4, 3), (4, 4)])
    );
}

#[test]
fn king_never_steps_onto_a_teammate() {
    let mut board = board();
    let king = place(&mut board, UnitKind::King, Team::Player1, p(3, 3));
    place(&mut board, UnitKind::Pawn, Team::Player1, p(3, 4));
    place(&mut board, UnitKind::Pawn, Team::Player2, p(4, 4));
    let destinations = destinations_of(&board, king);
    assert!(!destinations.contains(&p(3, 4)));
    assert!(destinations.contains(&p(4, 4)));
}

#[test]
fn knight_in_a_corner_keeps_only_in_bounds_offsets() {
    let mut board = board();
    let knight = place(&mut board, UnitKind::Knight, Team::Player1, p(0, 0));
    assert_eq!(destinations_of(&board, knight), positions([(1, 2), (2, 1)]));
}

#[test]
fn knight_in_the_open_offers_all_eight_offsets() {
    let mut board = board();
    let knight = place(&mut board, UnitKind::Knight, Team::Player2, p(4, 4));
    assert_eq!(
        destinations_of(&board, knight),
        positions([(6, 5), (6, 3), (5, 6), (3, 6), (2, 5), (2, 3), (5, 2), (3, 2)])
    );
}

#[test]
fn rook_covers_row_and_column_through_blockers() {
    let mut board = board();
    let rook = place(&mut board, UnitKind::Rook, Team::Player1, p(0, 0));
    place(&mut board, UnitKind::Pawn, Team::Player2, p(0, 3));
    let destinations = destinations_of(&board, rook);
    // Unobstructed movement: the enemy pawn on the file does not cut off the
    // squares behind it, and is itself a capture destination.
    assert!(destinations.contains(&p(0, 3)));
    assert!(destinations.contains(&p(0, 7)));
    assert!(destinations.contains(&p(7, 0)));
    assert!(!destinations.contains(&p(0, 0)));
    assert_eq!(destinations.len(), 14);
}

#[test]
fn rook_excludes_teammates_only() {
    let mut board = board();
    let rook = place(&mut board, UnitKind::Rook, Team::Player1, p(0, 0));
    place(&mut board, UnitKind::Pawn, Team::Player1, p(0, 5));
    let destinations = destinations_of(&board, rook);
    assert!(!destinations.contains(&p(0, 5)));
    assert!(destinations.contains(&p(0, 6)));
}

#[test]
fn bishop_covers_both_diagonals() {
    let mut board = board();
    let bishop = place(&mut board, UnitKind::Bishop, Team::Player1, p(2, 2));
    let destinations = destinations_of(&board, bishop);
    assert!(destinations.contains(&p(0, 0)));
    assert!(destinations.contains(&p(7, 7)));
    assert!(destinations.contains(&p(0, 4)));
    assert!(destinations.contains(&p(4, 0)));
    assert!(!destinations.contains(&p(2, 5)));
    assert!(!destinations.contains(&p(2, 2)));
}

#[test]
fn queen_is_the_union_of_rook_and_bishop() {
    let mut board = board();
    let queen = place(&mut board, UnitKind::Queen, Team::Player1, p(3, 3));
    let destinations = destinations_of(&board, queen);

    let mut lines = board.clone();
    lines.remove(queen).unwrap();
    let rook = place(&mut lines, UnitKind::Rook, Team::Player1, p(3, 3));
    let rook_set = destinations_of(&lines, rook);
    lines.remove(rook).unwrap();
    let bishop = place(&mut lines, UnitKind::Bishop, Team::Player1, p(3, 3));
    let bishop_set = destinations_of(&lines, bishop);

    assert_eq!(destinations, rook_set.union(&bishop_set).copied().collect());
}

#[test]
fn pawn_start_row_offers_single_and_double_step_plus_capture() {
    let mut board = board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player1, p(4, 1));
    place(&mut board, UnitKind::Knight, Team::Player2, p(3, 2));
    assert_eq!(destinations_of(&board, pawn), positions([(4, 2), (4, 3), (3, 2)]));
}

#[test]
fn pawn_double_step_requires_both_squares_clear() {
    // Blocker on the intermediate square kills both steps.
    let mut board = board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player1, p(4, 1));
    place(&mut board, UnitKind::Rook, Team::Player2, p(4, 2));
    assert_eq!(destinations_of(&board, pawn), HashSet::new());

    // Blocker on the landing square still allows the single step.
    let mut board = self::board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player1, p(4, 1));
    place(&mut board, UnitKind::Rook, Team::Player2, p(4, 3));
    assert_eq!(destinations_of(&board, pawn), positions([(4, 2)]));
}

#[test]
fn pawn_off_start_row_has_no_double_step() {
    let mut board = board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player1, p(4, 2));
    assert_eq!(destinations_of(&board, pawn), positions([(4, 3)]));
}

#[test]
fn player2_pawn_marches_down_the_board() {
    let mut board = board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player2, p(4, 6));
    place(&mut board, UnitKind::Knight, Team::Player1, p(5, 5));
    assert_eq!(destinations_of(&board, pawn), positions([(4, 5), (4, 4), (5, 5)]));
}

#[test]
fn pawn_diagonal_is_capture_only() {
    let mut board = board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player1, p(4, 4));
    // Teammate on one diagonal, nothing on the other: neither is offered.
    place(&mut board, UnitKind::Pawn, Team::Player1, p(3, 5));
    assert_eq!(destinations_of(&board, pawn), positions([(4, 5)]));
}

#[test]
fn pawn_on_the_last_row_has_nowhere_to_go() {
    let mut board = board();
    let pawn = place(&mut board, UnitKind::Pawn, Team::Player1, p(4, 7));
    assert_eq!(destinations_of(&board, pawn), HashSet::new());
}

// Every kind, every board position: destinations stay in bounds and never
// land on a teammate.
#[test]
fn destinations_are_in_bounds_and_never_friendly() {
    for kind in UnitKind::iter() {
        for team in Team::iter() {
            let mut board = Board::new(BoardShape::new(5, 5));
            place(&mut board, UnitKind::Pawn, Team::Player1, p(1, 1));
            place(&mut board, UnitKind::Rook, Team::Player1, p(3, 2));
            place(&mut board, UnitKind::Knight, Team::Player2, p(2, 3));
            place(&mut board, UnitKind::Queen, Team::Player2, p(4, 4));
            for pos in board.shape().positions() {
                if board.unit_at(pos).is_some() {
                    continue;
                }
                let mut board = board.clone();
                let id = place(&mut board, kind, team, pos);
                for destination in destinations_of(&board, id) {
                    assert!(board.is_in_bounds(destination), "{kind:?} at {pos:?} -> {destination:?}");
                    assert!(
                        board.unit_at(destination).is_none_or(|other| other.team != team),
                        "{kind:?} at {pos:?} may not land on teammate at {destination:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn capture_happens_only_on_an_enemy_occupied_landing_square() {
    let mut board = board();
    let rook = place(&mut board, UnitKind::Rook, Team::Player1, p(0, 0));
    place(&mut board, UnitKind::Pawn, Team::Player2, p(0, 5));
    let rook_unit = *board.unit(rook).unwrap();
    assert_eq!(captured_by(&board, &rook_unit, p(0, 5)), positions([(0, 5)]));
    assert_eq!(captured_by(&board, &rook_unit, p(0, 4)), HashSet::new());
}
