use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::Pos;
use crate::team::Team;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum UnitKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl UnitKind {
    pub fn to_letter(self) -> char {
        match self {
            UnitKind::Pawn => 'P',
            UnitKind::Knight => 'N',
            UnitKind::Bishop => 'B',
            UnitKind::Rook => 'R',
            UnitKind::Queen => 'Q',
            UnitKind::King => 'K',
        }
    }
}


// Identity of a unit for its whole lifetime. Two units never compare equal by
// accident of sharing kind, team and position.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub team: Team,
    // Only the board moves units around.
    pos: Pos,
}

impl Unit {
    pub(crate) fn new(id: UnitId, kind: UnitKind, team: Team, pos: Pos) -> Self {
        Unit { id, kind, team, pos }
    }

    pub fn pos(&self) -> Pos { self.pos }

    pub(crate) fn set_pos(&mut self, pos: Pos) { self.pos = pos; }
}
