//! The assign → cycle → clear machine for building a cross state slot by
//! slot.
//!
//! Clicking an empty slot assigns the first unused edge identity. Clicking
//! an occupied slot cycles it through the remaining unused identities and,
//! past the last one, clears the slot. Clicking an empty slot when all four
//! identities are placed elsewhere is refused. This is the documented
//! interaction contract for multi-valued selection and is preserved exactly.

use cube_core::{CrossEdge, CrossState, EdgeSlot, MalformedState};

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    slots: [Option<(CrossEdge, bool)>; 12],
}

impl SelectionState {
    pub fn new() -> SelectionState {
        SelectionState::default()
    }

    /// Registers a click on `slot`, with `white_on_primary` telling which of
    /// the slot's two facelets was marked white. Returns the identity now
    /// occupying the slot, or `None` when the slot ended up (or stayed)
    /// empty.
    pub fn click(&mut self, slot: EdgeSlot, white_on_primary: bool) -> Option<CrossEdge> {
        let index = slot.index() as usize;
        let current = self.slots[index].map(|(edge, _)| edge);
        match self.next_available(current) {
            Some(edge) => {
                self.slots[index] = Some((edge, white_on_primary));
                Some(edge)
            }
            None => {
                // Either the cycle ran past the last identity (clear the
                // slot) or a fresh click found nothing unused (refuse).
                if current.is_some() {
                    self.slots[index] = None;
                }
                None
            }
        }
    }

    /// The next unused identity after `current` in the fixed cycle order,
    /// where the position past the last identity means "clear".
    fn next_available(&self, current: Option<CrossEdge>) -> Option<CrossEdge> {
        let current = current.map_or(-1, |edge| i8::try_from(edge.index()).unwrap());
        for step in 1..=4 {
            let candidate = (current + step).rem_euclid(5);
            if candidate == 4 {
                return None;
            }
            let edge = CrossEdge::ALL[usize::try_from(candidate).unwrap()];
            let used = self
                .slots
                .iter()
                .flatten()
                .any(|&(assigned, _)| assigned == edge);
            if !used {
                return Some(edge);
            }
        }
        None
    }

    pub fn reset(&mut self) {
        self.slots = [None; 12];
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn assignments(&self) -> impl Iterator<Item = (EdgeSlot, CrossEdge, bool)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, assignment)| {
                assignment.map(|(edge, white_on_primary)| {
                    #[allow(clippy::cast_possible_truncation)]
                    let slot = EdgeSlot::from_index(index as u8).unwrap();
                    (slot, edge, white_on_primary)
                })
            })
    }

    /// Converts the selection into a solver state. The orientation bit is
    /// exactly "white was marked on the primary facelet".
    pub fn try_into_state(&self) -> Result<CrossState, MalformedState> {
        let assignments: Vec<_> = self
            .assignments()
            .map(|(slot, edge, white_on_primary)| (edge, slot, white_on_primary))
            .collect();
        CrossState::try_from_assignments(&assignments)
    }
}
