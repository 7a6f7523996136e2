use async_trait::async_trait;

use crate::board::Board;
use crate::coord::Pos;
use crate::event::{GameEndCondition, TileSelectionRequest, UnitMoved, UnitSelectionRequest};
use crate::unit::{Unit, UnitId};


/// Result of a selection request. Cancellation is a value, not an error: the
/// engine reacts by stepping back within the turn cycle and asking again.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectionOutcome<T> {
    Chosen(T),
    Cancelled,
}

/// The capability the engine talks to the outside world through: it supplies
/// unit and tile choices (typically human-driven) and receives lifecycle
/// notifications.
///
/// The selection requests are the engine's only suspension points. No timeout
/// is imposed; a port that never resolves keeps the engine waiting. Everything
/// runs on one logical thread, hence `?Send`. Event handlers may read any
/// board reference they are handed, but only synchronously: the next turn
/// mutates the board without further notice.
///
/// The event sinks default to no-ops, so a headless port only implements the
/// two selection methods.
#[async_trait(?Send)]
pub trait PresentationPort {
    async fn request_unit_selection(
        &mut self, request: UnitSelectionRequest<'_>,
    ) -> SelectionOutcome<UnitId>;

    async fn request_tile_selection(
        &mut self, request: TileSelectionRequest,
    ) -> SelectionOutcome<Pos>;

    fn on_game_ready(&mut self, board: &Board) { let _ = board; }

    fn on_unit_moved(&mut self, event: &UnitMoved) { let _ = event; }

    fn on_selection_changed(&mut self, current: Option<&Unit>, previous: Option<&Unit>) {
        let _ = (current, previous);
    }

    fn on_game_ended(&mut self, condition: GameEndCondition) { let _ = condition; }
}
