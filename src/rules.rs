//! Pure move generation and capture resolution. Nothing here mutates the
//! board; the engine applies the results.

use std::collections::HashSet;

use crate::board::Board;
use crate::coord::Pos;
use crate::team::Team;
use crate::unit::{Unit, UnitKind};


const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (1, -2),
    (-1, -2),
];

fn direction_forward(team: Team) -> i32 {
    match team {
        Team::Player1 => 1,
        Team::Player2 => -1,
    }
}

fn pawn_start_row(team: Team, board: &Board) -> i32 {
    match team {
        Team::Player1 => 1,
        Team::Player2 => board.shape().height - 2,
    }
}

// A square a unit may enter: inside the board and not held by a teammate.
// Enemy occupancy is allowed and means capture.
fn enterable(board: &Board, team: Team, pos: Pos) -> bool {
    board.is_in_bounds(pos) && board.unit_at(pos).is_none_or(|other| other.team != team)
}

fn step_moves(board: &Board, unit: &Unit, offsets: &[(i32, i32)]) -> HashSet<Pos> {
    offsets
        .iter()
        .map(|&offset| unit.pos() + offset)
        .filter(|&pos| enterable(board, unit.team, pos))
        .collect()
}

// Sliding pieces reach every square on their lines regardless of what stands
// in between. Intentional: the game this models never blocks line of sight.
fn line_moves(
    board: &Board, unit: &Unit, on_line: impl Fn((i32, i32)) -> bool,
) -> HashSet<Pos> {
    let from = unit.pos();
    board
        .shape()
        .positions()
        .filter(|&to| to != from && on_line(to - from))
        .filter(|&to| enterable(board, unit.team, to))
        .collect()
}

fn pawn_moves(board: &Board, unit: &Unit) -> HashSet<Pos> {
    let from = unit.pos();
    let dir = direction_forward(unit.team);
    let mut destinations = HashSet::new();

    let forward = from + (0, dir);
    if board.is_in_bounds(forward) && board.unit_at(forward).is_none() {
        destinations.insert(forward);

        // Double step from the start row, only when the path is clear all the
        // way through.
        let double = from + (0, dir * 2);
        if from.row == pawn_start_row(unit.team, board)
            && board.is_in_bounds(double)
            && board.unit_at(double).is_none()
        {
            destinations.insert(double);
        }
    }

    // Diagonal forward squares are capture-only.
    for diagonal in [forward + (-1, 0), forward + (1, 0)] {
        if board.is_in_bounds(diagonal)
            && board.unit_at(diagonal).is_some_and(|other| other.team != unit.team)
        {
            destinations.insert(diagonal);
        }
    }
    destinations
}

/// All positions `unit` may move to right now. Never contains out-of-bounds
/// positions or squares held by a teammate; enemy-held entries mean capture.
///
/// The unit is expected to be on the board; results for a detached unit are
/// meaningless.
pub fn legal_destinations(board: &Board, unit: &Unit) -> HashSet<Pos> {
    match unit.kind {
        UnitKind::King => step_moves(board, unit, &KING_OFFSETS),
        UnitKind::Knight => step_moves(board, unit, &KNIGHT_OFFSETS),
        UnitKind::Bishop => line_moves(board, unit, |(d_col, d_row)| d_col.abs() == d_row.abs()),
        UnitKind::Rook => line_moves(board, unit, |(d_col, d_row)| d_col == 0 || d_row == 0),
        UnitKind::Queen => line_moves(board, unit, |(d_col, d_row)| {
            d_col == 0 || d_row == 0 || d_col.abs() == d_row.abs()
        }),
        UnitKind::Pawn => pawn_moves(board, unit),
    }
}

/// Squares struck by moving `unit` to `destination`. Every current kind
/// strikes exactly its landing square; the indirection leaves room for kinds
/// that threaten beyond where they land.
pub fn threatened_positions(unit: &Unit, destination: Pos) -> Vec<Pos> {
    match unit.kind {
        UnitKind::Pawn
        | UnitKind::Knight
        | UnitKind::Bishop
        | UnitKind::Rook
        | UnitKind::Queen
        | UnitKind::King => vec![destination],
    }
}

/// Positions whose occupants are captured when `unit` moves to `destination`:
/// the threatened squares currently held by the enemy.
pub fn captured_by(board: &Board, unit: &Unit, destination: Pos) -> HashSet<Pos> {
    threatened_positions(unit, destination)
        .into_iter()
        .filter(|&pos| board.unit_at(pos).is_some_and(|other| other.team != unit.team))
        .collect()
}
