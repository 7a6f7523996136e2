use std::collections::HashSet;

use derive_new::new;
use enum_map::{enum_map, EnumMap};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::coord::{BoardShape, Pos};
use crate::event::{GameEndCondition, TileSelectionRequest, UnitMoved, UnitSelectionRequest};
use crate::port::{PresentationPort, SelectionOutcome};
use crate::rules;
use crate::team::Team;
use crate::unit::{Unit, UnitId, UnitKind};


/// One entry of the initial layout, consumed exactly once at construction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub pos: Pos,
    pub kind: UnitKind,
    pub team: Team,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    /// Engine was created but `start` was not called yet.
    Ready,
    /// The turn loop is running.
    Started,
    /// Game has ended. No more events will be emitted; create a new engine to
    /// play again.
    Ended,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SetupError {
    #[error("layout entry {index}: cannot place {kind:?} for {team:?}: {source}")]
    BadPlacement {
        index: usize,
        kind: UnitKind,
        team: Team,
        source: BoardError,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum StateError {
    #[error("game already started")]
    AlreadyStarted,
    #[error("game already ended")]
    AlreadyEnded,
}

/// Errors a single turn can fail with. None of them are fatal to the game:
/// the loop logs the error and hands the same team a fresh turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum TurnError {
    #[error("selected unit {0:?} is not eligible this turn")]
    InvalidSelection(UnitId),
    #[error("destination {0:?} is not among the offered positions")]
    InvalidMove(Pos),
    #[error("board contract violated: {0}")]
    Board(#[from] BoardError),
}


/// The alternating-turn state machine. Owns the board exclusively; everyone
/// else sees it as a read-only snapshot through `board()` or inside event
/// handlers.
pub struct TurnEngine<P: PresentationPort> {
    board: Board,
    port: P,
    state: GameState,
    active_team: Team,
    selected: Option<UnitId>,
}

impl<P: PresentationPort> TurnEngine<P> {
    pub fn new(shape: BoardShape, layout: &[UnitPlacement], port: P) -> Result<Self, SetupError> {
        let mut board = Board::new(shape);
        for (index, placement) in layout.iter().enumerate() {
            board.place(placement.kind, placement.team, placement.pos).map_err(|source| {
                SetupError::BadPlacement {
                    index,
                    kind: placement.kind,
                    team: placement.team,
                    source,
                }
            })?;
        }
        Ok(TurnEngine {
            board,
            port,
            state: GameState::Ready,
            active_team: Team::Player1,
            selected: None,
        })
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn state(&self) -> GameState { self.state }
    pub fn active_team(&self) -> Team { self.active_team }
    pub fn selected_unit(&self) -> Option<&Unit> {
        self.selected.and_then(|id| self.board.unit(id))
    }

    /// Runs the turn loop until the game ends. Resolves only once the board
    /// holds units of at most one team; a second call is a usage error.
    pub async fn start(&mut self) -> Result<(), StateError> {
        match self.state {
            GameState::Ready => {}
            GameState::Started => return Err(StateError::AlreadyStarted),
            GameState::Ended => return Err(StateError::AlreadyEnded),
        }
        self.state = GameState::Started;
        self.port.on_game_ready(&self.board);
        self.run_loop().await;
        Ok(())
    }

    async fn run_loop(&mut self) {
        while self.state != GameState::Ended {
            debug!("{:?} turn started", self.active_team);
            if let Err(err) = self.play_turn(self.active_team).await {
                // One bad turn must not kill the game: report and hand the
                // same team a fresh turn. Spins if the cause is not transient.
                warn!("{:?} turn failed: {}", self.active_team, err);
                continue;
            }
            debug!("{:?} turn ended", self.active_team);
            if let Some(condition) = self.end_condition() {
                self.state = GameState::Ended;
                self.port.on_game_ended(condition);
                break;
            }
            self.active_team = self.active_team.opponent();
        }
    }

    async fn play_turn(&mut self, team: Team) -> Result<(), TurnError> {
        loop {
            let filter = move |unit: &Unit| unit.team == team;
            let outcome = self
                .port
                .request_unit_selection(UnitSelectionRequest { filter: &filter })
                .await;
            let unit_id = match outcome {
                SelectionOutcome::Chosen(id) => id,
                SelectionOutcome::Cancelled => continue,
            };
            let unit = match self.board.unit(unit_id) {
                Some(unit) if unit.team == team => *unit,
                _ => return Err(TurnError::InvalidSelection(unit_id)),
            };
            self.set_selection(Some(unit_id));

            let destinations = rules::legal_destinations(&self.board, &unit);
            let danger_highlights: HashSet<Pos> = destinations
                .iter()
                .copied()
                .filter(|&pos| self.board.unit_at(pos).is_some())
                .collect();
            let request = TileSelectionRequest {
                valid_positions: destinations.clone(),
                danger_highlights,
            };
            let destination = match self.port.request_tile_selection(request).await {
                SelectionOutcome::Chosen(pos) => pos,
                SelectionOutcome::Cancelled => {
                    self.set_selection(None);
                    continue;
                }
            };

            let result = self.apply_move(unit_id, &destinations, destination);
            self.set_selection(None);
            return result;
        }
    }

    fn apply_move(
        &mut self, unit_id: UnitId, destinations: &HashSet<Pos>, destination: Pos,
    ) -> Result<(), TurnError> {
        // The port is trusted to pick from the offered set; this is a
        // defensive invariant check, not a retry path.
        if !destinations.contains(&destination) {
            return Err(TurnError::InvalidMove(destination));
        }
        let unit = *self.board.unit(unit_id).ok_or(BoardError::NotFound(unit_id))?;
        let origin = unit.pos();

        // Captures are removed first so the mover can land on the square its
        // victim just vacated.
        let mut captured = Vec::new();
        for pos in rules::captured_by(&self.board, &unit, destination) {
            if let Some(victim_id) = self.board.unit_at(pos).map(|victim| victim.id) {
                captured.push(self.board.remove(victim_id)?);
            }
        }
        self.board.relocate(unit_id, destination)?;

        let moved = *self.board.unit(unit_id).ok_or(BoardError::NotFound(unit_id))?;
        debug!("unit {:?} moved from {:?} to {:?}", unit_id, origin, destination);
        self.port.on_unit_moved(&UnitMoved { unit: moved, origin, destination, captured });
        Ok(())
    }

    // No-op transitions stay silent: a cancelled selection attempt produces
    // no SelectionChanged notification.
    fn set_selection(&mut self, selection: Option<UnitId>) {
        if self.selected == selection {
            return;
        }
        let previous = self.selected.and_then(|id| self.board.unit(id).copied());
        self.selected = selection;
        let current = self.selected.and_then(|id| self.board.unit(id).copied());
        self.port.on_selection_changed(current.as_ref(), previous.as_ref());
    }

    fn end_condition(&self) -> Option<GameEndCondition> {
        let mut unit_count: EnumMap<Team, usize> = enum_map! { _ => 0 };
        for unit in self.board.units() {
            unit_count[unit.team] += 1;
        }
        if unit_count[Team::Player2] == 0 {
            Some(GameEndCondition::OnlyPlayer1Remains)
        } else if unit_count[Team::Player1] == 0 {
            Some(GameEndCondition::Player1Eliminated)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::ScriptedPort;

    fn engine_with(layout: &[UnitPlacement]) -> TurnEngine<ScriptedPort> {
        let (port, _) = ScriptedPort::new();
        TurnEngine::new(BoardShape::default(), layout, port).unwrap()
    }

    #[test]
    fn setup_rejects_duplicate_position() {
        let (port, _) = ScriptedPort::new();
        let layout = [
            UnitPlacement::new(Pos::new(2, 2), UnitKind::King, Team::Player1),
            UnitPlacement::new(Pos::new(2, 2), UnitKind::Pawn, Team::Player2),
        ];
        let result = TurnEngine::new(BoardShape::default(), &layout, port);
        assert!(matches!(
            result.err(),
            Some(SetupError::BadPlacement { index: 1, source: BoardError::Occupied(_), .. })
        ));
    }

    #[test]
    fn setup_rejects_out_of_bounds_position() {
        let (port, _) = ScriptedPort::new();
        let layout = [UnitPlacement::new(Pos::new(0, 9), UnitKind::Rook, Team::Player1)];
        let result = TurnEngine::new(BoardShape::default(), &layout, port);
        assert!(matches!(
            result.err(),
            Some(SetupError::BadPlacement { index: 0, source: BoardError::OutOfBounds(_), .. })
        ));
    }

    #[test]
    fn end_condition_tags() {
        let both = engine_with(&[
            UnitPlacement::new(Pos::new(0, 0), UnitKind::King, Team::Player1),
            UnitPlacement::new(Pos::new(7, 7), UnitKind::King, Team::Player2),
        ]);
        assert_eq!(both.end_condition(), None);

        let only_p1 = engine_with(&[UnitPlacement::new(
            Pos::new(0, 0),
            UnitKind::King,
            Team::Player1,
        )]);
        assert_eq!(only_p1.end_condition(), Some(GameEndCondition::OnlyPlayer1Remains));

        let only_p2 = engine_with(&[UnitPlacement::new(
            Pos::new(0, 0),
            UnitKind::King,
            Team::Player2,
        )]);
        assert_eq!(only_p2.end_condition(), Some(GameEndCondition::Player1Eliminated));

        // An empty board satisfies both readings; the first tag wins.
        let empty = engine_with(&[]);
        assert_eq!(empty.end_condition(), Some(GameEndCondition::OnlyPlayer1Remains));
    }
}
