use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::coord::Pos;
use crate::unit::Unit;


/// Which team's elimination ended the game. The two tags are distinct even
/// though they correlate in a two-team game: an empty board counts as
/// `OnlyPlayer1Remains`, matching the order the conditions are checked in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameEndCondition {
    OnlyPlayer1Remains,
    Player1Eliminated,
}

/// Emitted after a move is fully applied to the board. Observers that query
/// the board from the handler see the post-move state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitMoved {
    /// Post-move snapshot of the moving unit.
    pub unit: Unit,
    pub origin: Pos,
    pub destination: Pos,
    /// Units removed by this move, in removal order.
    pub captured: Vec<Unit>,
}

pub struct UnitSelectionRequest<'a> {
    pub filter: &'a (dyn Fn(&Unit) -> bool + 'a),
}

impl UnitSelectionRequest<'_> {
    pub fn matches(&self, unit: &Unit) -> bool { (self.filter)(unit) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TileSelectionRequest {
    pub valid_positions: HashSet<Pos>,
    /// Advisory only: valid destinations that capture an enemy unit. Not
    /// enforced; pure presentation hint.
    pub danger_highlights: HashSet<Pos>,
}
