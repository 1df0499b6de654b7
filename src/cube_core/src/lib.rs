//! Core cube-state machinery for the cross trainer: the edge data model,
//! the move-token grammar, and the move engine that applies face turns,
//! wide turns, and whole-cube rotations to a four-edge cross state.

pub mod moves;
pub mod state;

pub use moves::{Alg, BaseMove, Modifier, Move, UnknownMove};
pub use state::{CrossEdge, CrossState, EdgeSlot, Face, MalformedState, Placement};
