//! Bounded breadth-first search for the four-edge cross sub-goal.
//!
//! Nodes are (state, path) pairs expanded with the twelve outer-layer
//! quarter turns in a fixed order, so the first path reaching the goal is a
//! shortest one and ties break by enumeration order, never by move taste.
//! Two independent caps bound the search: the path length and the total
//! number of node expansions. Hitting either is a declared scope limit, not
//! an input error.

use std::collections::VecDeque;

use fxhash::FxHashSet;
use log::{debug, info};
use thiserror::Error;

use cube_core::{Alg, BaseMove, CrossState, Modifier, Move};

pub mod selection;

pub use selection::SelectionState;

/// Longest solution the search will report.
pub const MAX_SOLUTION_LENGTH: usize = 8;

/// Most nodes the search will take off the frontier before giving up.
pub const MAX_EXPANSIONS: usize = 200_000;

/// The fixed expansion alphabet and order.
pub const SEARCH_MOVES: [Move; 12] = [
    Move::new(BaseMove::U, Modifier::Clockwise),
    Move::new(BaseMove::U, Modifier::CounterClockwise),
    Move::new(BaseMove::D, Modifier::Clockwise),
    Move::new(BaseMove::D, Modifier::CounterClockwise),
    Move::new(BaseMove::F, Modifier::Clockwise),
    Move::new(BaseMove::F, Modifier::CounterClockwise),
    Move::new(BaseMove::B, Modifier::Clockwise),
    Move::new(BaseMove::B, Modifier::CounterClockwise),
    Move::new(BaseMove::R, Modifier::Clockwise),
    Move::new(BaseMove::R, Modifier::CounterClockwise),
    Move::new(BaseMove::L, Modifier::Clockwise),
    Move::new(BaseMove::L, Modifier::CounterClockwise),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossSolverError {
    #[error(
        "no solution within {} moves and {} node expansions",
        MAX_SOLUTION_LENGTH,
        MAX_EXPANSIONS
    )]
    NotFound,
}

/// Finds a shortest move sequence bringing `initial` to the solved cross,
/// subject to the two search caps.
pub fn solve_cross(initial: &CrossState) -> Result<Alg, CrossSolverError> {
    if initial.is_goal() {
        return Ok(Alg::default());
    }

    let goal_key = CrossState::goal().packed();

    let mut visited = FxHashSet::default();
    visited.insert(initial.packed());

    let mut frontier: VecDeque<(CrossState, Vec<Move>)> = VecDeque::new();
    frontier.push_back((*initial, Vec::new()));

    let mut expansions = 0usize;
    let mut reported_depth = 0usize;

    while let Some((state, path)) = frontier.pop_front() {
        expansions += 1;
        if expansions > MAX_EXPANSIONS {
            debug!("expansion cap of {MAX_EXPANSIONS} hit after depth {reported_depth}");
            return Err(CrossSolverError::NotFound);
        }
        if path.len() >= MAX_SOLUTION_LENGTH {
            continue;
        }
        if path.len() > reported_depth {
            reported_depth = path.len();
            debug!("searching at depth {reported_depth}, {expansions} nodes expanded");
        }

        for mv in SEARCH_MOVES {
            let next = state.apply(mv);
            let key = next.packed();
            if key == goal_key {
                let mut solution = path;
                solution.push(mv);
                info!(
                    "cross solved in {} moves after {expansions} node expansions",
                    solution.len()
                );
                return Ok(Alg::from(solution));
            }
            if visited.insert(key) {
                let mut next_path = path.clone();
                next_path.push(mv);
                frontier.push_back((next, next_path));
            }
        }
    }

    debug!("frontier exhausted after {expansions} node expansions");
    Err(CrossSolverError::NotFound)
}
