use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Team {
    Player1,
    Player2,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player1 => Team::Player2,
            Team::Player2 => Team::Player1,
        }
    }
}
