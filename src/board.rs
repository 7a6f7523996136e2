use std::collections::HashMap;
use std::fmt;

use ndarray::{Array, Array2};
use thiserror::Error;

use crate::coord::{BoardShape, Pos};
use crate::team::Team;
use crate::unit::{Unit, UnitId, UnitKind};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum BoardError {
    #[error("position {0:?} is already occupied")]
    Occupied(Pos),
    #[error("unit {0:?} is not on the board")]
    NotFound(UnitId),
    #[error("position {0:?} is out of bounds")]
    OutOfBounds(Pos),
}


/// Fixed-size grid plus the current unit placement.
///
/// Two lookup directions are maintained: a position index answering "which
/// unit stands here" and a unit table answering "where does this unit stand".
/// Every mutator updates both under one `&mut self`, so readers never observe
/// them disagreeing.
#[derive(Clone)]
pub struct Board {
    shape: BoardShape,
    index: Array2<Option<UnitId>>,
    units: HashMap<UnitId, Unit>,
    next_id: u32,
}

impl Board {
    pub fn new(shape: BoardShape) -> Self {
        Board {
            shape,
            index: Array::from_elem((shape.height as usize, shape.width as usize), None),
            units: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn shape(&self) -> BoardShape { self.shape }
    pub fn is_in_bounds(&self, pos: Pos) -> bool { self.shape.contains(pos) }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> { self.units.get(&id) }

    pub fn unit_at(&self, pos: Pos) -> Option<&Unit> {
        if !self.shape.contains(pos) {
            return None;
        }
        self.index[cell_index(pos)].and_then(|id| self.units.get(&id))
    }

    pub fn position_of(&self, id: UnitId) -> Option<Pos> {
        self.units.get(&id).map(|unit| unit.pos())
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> { self.units.values() }

    pub fn unit_count(&self) -> usize { self.units.len() }

    /// Creates a unit at `pos`. Setup-time only: once the game is running the
    /// unit set never grows.
    pub fn place(&mut self, kind: UnitKind, team: Team, pos: Pos) -> Result<UnitId, BoardError> {
        if !self.shape.contains(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if self.index[cell_index(pos)].is_some() {
            return Err(BoardError::Occupied(pos));
        }
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.index[cell_index(pos)] = Some(id);
        self.units.insert(id, Unit::new(id, kind, team, pos));
        Ok(id)
    }

    /// Deletes the unit from both lookup directions and returns its final
    /// snapshot.
    pub fn remove(&mut self, id: UnitId) -> Result<Unit, BoardError> {
        let unit = self.units.remove(&id).ok_or(BoardError::NotFound(id))?;
        self.index[cell_index(unit.pos())] = None;
        Ok(unit)
    }

    /// Moves a unit to `destination`. The destination must be empty or held by
    /// the unit itself; landing on a square an enemy just vacated is fine
    /// because captures are removed before the mover relocates.
    pub fn relocate(&mut self, id: UnitId, destination: Pos) -> Result<(), BoardError> {
        if !self.shape.contains(destination) {
            return Err(BoardError::OutOfBounds(destination));
        }
        let origin = self.position_of(id).ok_or(BoardError::NotFound(id))?;
        match self.index[cell_index(destination)] {
            Some(occupant) if occupant != id => return Err(BoardError::Occupied(destination)),
            _ => {}
        }
        self.index[cell_index(origin)] = None;
        self.index[cell_index(destination)] = Some(id);
        if let Some(unit) = self.units.get_mut(&id) {
            unit.set_pos(destination);
        }
        Ok(())
    }
}

fn cell_index(pos: Pos) -> [usize; 2] {
    [pos.row as usize, pos.col as usize]
}

fn debug_format_unit(unit: &Unit) -> String {
    format!("[{}]-{:?}-{}", unit.id.0, unit.team, unit.kind.to_letter())
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board ")?;
        f.debug_map()
            .entries(
                self.shape
                    .positions()
                    .filter_map(|pos| self.unit_at(pos).map(|unit| (pos, debug_format_unit(unit)))),
            )
            .finish()
    }
}
