//! Test doubles shared between unit and integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::board::Board;
use crate::coord::Pos;
use crate::event::{GameEndCondition, TileSelectionRequest, UnitMoved, UnitSelectionRequest};
use crate::port::{PresentationPort, SelectionOutcome};
use crate::unit::{Unit, UnitId};


/// Flattened record of every notification a `ScriptedPort` receives, in
/// arrival order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PortEvent {
    Ready,
    Moved {
        unit: UnitId,
        origin: Pos,
        destination: Pos,
        captured: Vec<UnitId>,
    },
    Selection {
        current: Option<UnitId>,
        previous: Option<UnitId>,
    },
    Ended(GameEndCondition),
}

#[derive(Default)]
pub struct Script {
    pub unit_replies: VecDeque<SelectionOutcome<UnitId>>,
    pub tile_replies: VecDeque<SelectionOutcome<Pos>>,
    pub events: Vec<PortEvent>,
    /// Every tile request as offered, for asserting on valid sets and danger
    /// highlights.
    pub tile_requests: Vec<TileSelectionRequest>,
}

pub type ScriptHandle = Rc<RefCell<Script>>;

/// Presentation port that replays canned selection outcomes and records
/// everything it is told. The game must end before the script runs dry;
/// an exhausted script panics, failing the test.
pub struct ScriptedPort {
    script: ScriptHandle,
}

impl ScriptedPort {
    pub fn new() -> (Self, ScriptHandle) {
        let script: ScriptHandle = Rc::new(RefCell::new(Script::default()));
        (ScriptedPort { script: Rc::clone(&script) }, script)
    }
}

#[async_trait(?Send)]
impl PresentationPort for ScriptedPort {
    async fn request_unit_selection(
        &mut self, _request: UnitSelectionRequest<'_>,
    ) -> SelectionOutcome<UnitId> {
        self.script
            .borrow_mut()
            .unit_replies
            .pop_front()
            .expect("scripted port ran out of unit selection replies")
    }

    async fn request_tile_selection(
        &mut self, request: TileSelectionRequest,
    ) -> SelectionOutcome<Pos> {
        let mut script = self.script.borrow_mut();
        script.tile_requests.push(request);
        script.tile_replies.pop_front().expect("scripted port ran out of tile selection replies")
    }

    fn on_game_ready(&mut self, _board: &Board) {
        self.script.borrow_mut().events.push(PortEvent::Ready);
    }

    fn on_unit_moved(&mut self, event: &UnitMoved) {
        self.script.borrow_mut().events.push(PortEvent::Moved {
            unit: event.unit.id,
            origin: event.origin,
            destination: event.destination,
            captured: event.captured.iter().map(|unit| unit.id).collect(),
        });
    }

    fn on_selection_changed(&mut self, current: Option<&Unit>, previous: Option<&Unit>) {
        self.script.borrow_mut().events.push(PortEvent::Selection {
            current: current.map(|unit| unit.id),
            previous: previous.map(|unit| unit.id),
        });
    }

    fn on_game_ended(&mut self, condition: GameEndCondition) {
        self.script.borrow_mut().events.push(PortEvent::Ended(condition));
    }
}
