//! The four-edge cross state and the move engine acting on it.
//!
//! Only the four white cross edges are tracked. Each tracked edge occupies
//! one of the twelve edge slots and carries a single orientation bit: whether
//! its white facelet sits on the slot's *primary* role. Primary is the
//! U/D-facing facelet where one exists, otherwise the L/R-facing one; the
//! other facelet is secondary.
//!
//! Every layer quarter turn is a fixed 4-cycle over slots. Whether a turn
//! also toggles orientation bits is *derived* from the role convention, not
//! assumed: U, D, F and B turns carry each facelet to the same role at the
//! destination slot, while L, R and the three slice layers carry primary to
//! secondary and back. The derivation is checked sticker by sticker in the
//! tests below.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::moves::{Alg, BaseMove, Move};

/// One of the six face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

/// One of the twelve edge slots, named by its two faces. The index order
/// matches the reference data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EdgeSlot {
    UB,
    UL,
    UR,
    UF,
    LB,
    LF,
    RB,
    RF,
    DB,
    DL,
    DR,
    DF,
}

impl EdgeSlot {
    pub const ALL: [EdgeSlot; 12] = [
        EdgeSlot::UB,
        EdgeSlot::UL,
        EdgeSlot::UR,
        EdgeSlot::UF,
        EdgeSlot::LB,
        EdgeSlot::LF,
        EdgeSlot::RB,
        EdgeSlot::RF,
        EdgeSlot::DB,
        EdgeSlot::DL,
        EdgeSlot::DR,
        EdgeSlot::DF,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<EdgeSlot> {
        EdgeSlot::ALL.get(index as usize).copied()
    }

    /// The U/D-facing facelet of this slot, or the L/R-facing one for the
    /// four middle-layer slots.
    pub fn primary_face(self) -> Face {
        match self {
            EdgeSlot::UB | EdgeSlot::UL | EdgeSlot::UR | EdgeSlot::UF => Face::U,
            EdgeSlot::LB | EdgeSlot::LF => Face::L,
            EdgeSlot::RB | EdgeSlot::RF => Face::R,
            EdgeSlot::DB | EdgeSlot::DL | EdgeSlot::DR | EdgeSlot::DF => Face::D,
        }
    }

    pub fn secondary_face(self) -> Face {
        match self {
            EdgeSlot::UB | EdgeSlot::LB | EdgeSlot::RB | EdgeSlot::DB => Face::B,
            EdgeSlot::UL => Face::L,
            EdgeSlot::UR => Face::R,
            EdgeSlot::UF | EdgeSlot::LF | EdgeSlot::RF | EdgeSlot::DF => Face::F,
            EdgeSlot::DL => Face::L,
            EdgeSlot::DR => Face::R,
        }
    }

    fn code(self) -> &'static str {
        match self {
            EdgeSlot::UB => "UB",
            EdgeSlot::UL => "UL",
            EdgeSlot::UR => "UR",
            EdgeSlot::UF => "UF",
            EdgeSlot::LB => "LB",
            EdgeSlot::LF => "LF",
            EdgeSlot::RB => "RB",
            EdgeSlot::RF => "RF",
            EdgeSlot::DB => "DB",
            EdgeSlot::DL => "DL",
            EdgeSlot::DR => "DR",
            EdgeSlot::DF => "DF",
        }
    }
}

impl fmt::Display for EdgeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An unrecognized two-letter slot code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown edge slot `{0}`")]
pub struct UnknownSlot(pub String);

impl FromStr for EdgeSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<EdgeSlot, UnknownSlot> {
        EdgeSlot::ALL
            .into_iter()
            .find(|slot| slot.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSlot(s.to_owned()))
    }
}

/// Identity of a tracked cross edge, by its two permanent colors
/// (F=green, R=orange, B=blue, L=red on this cube).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CrossEdge {
    WhiteGreen,
    WhiteOrange,
    WhiteBlue,
    WhiteRed,
}

impl CrossEdge {
    pub const ALL: [CrossEdge; 4] = [
        CrossEdge::WhiteGreen,
        CrossEdge::WhiteOrange,
        CrossEdge::WhiteBlue,
        CrossEdge::WhiteRed,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Where this edge belongs in the solved cross: under the face center
    /// matching its non-white color.
    pub fn home_slot(self) -> EdgeSlot {
        match self {
            CrossEdge::WhiteGreen => EdgeSlot::DF,
            CrossEdge::WhiteOrange => EdgeSlot::DR,
            CrossEdge::WhiteBlue => EdgeSlot::DB,
            CrossEdge::WhiteRed => EdgeSlot::DL,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            CrossEdge::WhiteGreen => "WG",
            CrossEdge::WhiteOrange => "WO",
            CrossEdge::WhiteBlue => "WB",
            CrossEdge::WhiteRed => "WR",
        }
    }
}

impl fmt::Display for CrossEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An unrecognized cross-edge code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown cross edge `{0}`")]
pub struct UnknownEdge(pub String);

impl FromStr for CrossEdge {
    type Err = UnknownEdge;

    fn from_str(s: &str) -> Result<CrossEdge, UnknownEdge> {
        CrossEdge::ALL
            .into_iter()
            .find(|edge| edge.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEdge(s.to_owned()))
    }
}

/// A cross state that is not a total injective mapping over the four edges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedState {
    #[error("edge {0} is assigned more than once")]
    DuplicateEdge(CrossEdge),
    #[error("edge {0} has no slot assignment")]
    MissingEdge(CrossEdge),
    #[error("slot {0} is assigned to more than one edge")]
    SlotCollision(EdgeSlot),
    #[error("packed encoding contains out-of-range slot index {0}")]
    InvalidSlotIndex(u8),
}

/// Where one tracked edge currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub slot: EdgeSlot,
    /// True when the white facelet occupies the slot's primary role.
    pub oriented: bool,
}

/// A total injective mapping from the four cross edges to slots, with one
/// orientation bit each. Construction validates; `apply` is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossState {
    placements: [Placement; 4],
}

impl CrossState {
    /// Builds a state from explicit assignments, rejecting duplicates,
    /// missing edges, and slot collisions.
    pub fn try_from_assignments(
        assignments: &[(CrossEdge, EdgeSlot, bool)],
    ) -> Result<CrossState, MalformedState> {
        let mut placements: [Option<Placement>; 4] = [None; 4];

        for &(edge, slot, oriented) in assignments {
            if placements[edge.index()].is_some() {
                return Err(MalformedState::DuplicateEdge(edge));
            }
            if placements
                .iter()
                .flatten()
                .any(|placement| placement.slot == slot)
            {
                return Err(MalformedState::SlotCollision(slot));
            }
            placements[edge.index()] = Some(Placement { slot, oriented });
        }

        for edge in CrossEdge::ALL {
            if placements[edge.index()].is_none() {
                return Err(MalformedState::MissingEdge(edge));
            }
        }

        Ok(CrossState {
            placements: placements.map(|placement| placement.unwrap()),
        })
    }

    /// The solved cross: every edge home with white on the primary (D) role.
    pub fn goal() -> CrossState {
        CrossState {
            placements: CrossEdge::ALL.map(|edge| Placement {
                slot: edge.home_slot(),
                oriented: true,
            }),
        }
    }

    pub fn is_goal(&self) -> bool {
        *self == CrossState::goal()
    }

    pub fn placement(&self, edge: CrossEdge) -> Placement {
        self.placements[edge.index()]
    }

    /// Canonical order-independent encoding: five bits per edge, in the
    /// fixed `CrossEdge` order. Distinct states never share an encoding.
    pub fn packed(&self) -> u32 {
        self.placements
            .iter()
            .enumerate()
            .fold(0, |acc, (i, placement)| {
                let bits = u32::from(placement.slot.index()) << 1 | u32::from(placement.oriented);
                acc | bits << (5 * i)
            })
    }

    /// Decodes [`CrossState::packed`], re-validating the mapping.
    pub fn from_packed(packed: u32) -> Result<CrossState, MalformedState> {
        let mut assignments = Vec::with_capacity(4);
        for edge in CrossEdge::ALL {
            let bits = packed >> (5 * edge.index());
            #[allow(clippy::cast_possible_truncation)]
            let index = (bits >> 1 & 0xF) as u8;
            let slot =
                EdgeSlot::from_index(index).ok_or(MalformedState::InvalidSlotIndex(index))?;
            assignments.push((edge, slot, bits & 1 == 1));
        }
        CrossState::try_from_assignments(&assignments)
    }

    /// Applies one move, returning the successor state.
    pub fn apply(&self, mv: Move) -> CrossState {
        let mut next = *self;
        let quarters = mv.modifier.quarter_turns();
        for &(layer, turns) in expansion(mv.base) {
            next.turn_layer(layer, (turns * quarters) % 4);
        }
        next
    }

    /// Replays a move sequence left to right.
    pub fn apply_all(&self, moves: impl IntoIterator<Item = Move>) -> CrossState {
        moves.into_iter().fold(*self, |state, mv| state.apply(mv))
    }

    fn turn_layer(&mut self, layer: Layer, quarters: u8) {
        let cycle = layer.cycle();
        for _ in 0..quarters {
            for placement in &mut self.placements {
                if let Some(at) = cycle.iter().position(|&slot| slot == placement.slot) {
                    placement.slot = cycle[(at + 1) % 4];
                    placement.oriented ^= layer.flips_roles();
                }
            }
        }
    }
}

impl fmt::Display for CrossState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in CrossEdge::ALL.into_iter().enumerate() {
            let placement = self.placement(edge);
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(
                f,
                "{edge}={}{}",
                placement.slot,
                if placement.oriented { '+' } else { '-' }
            )?;
        }
        Ok(())
    }
}

/// One of the nine turnable layers. The slices exist only to give wide moves
/// and whole-cube rotations their compositional definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layer {
    U,
    D,
    L,
    R,
    F,
    B,
    M,
    E,
    S,
}

impl Layer {
    #[cfg(test)]
    pub(crate) const ALL: [Layer; 9] = [
        Layer::U,
        Layer::D,
        Layer::L,
        Layer::R,
        Layer::F,
        Layer::B,
        Layer::M,
        Layer::E,
        Layer::S,
    ];

    /// The 4-cycle a clockwise quarter turn of this layer induces on slots,
    /// listed in visit order: each slot's occupant moves to the next entry.
    pub(crate) fn cycle(self) -> [EdgeSlot; 4] {
        match self {
            Layer::U => [EdgeSlot::UF, EdgeSlot::UL, EdgeSlot::UB, EdgeSlot::UR],
            Layer::D => [EdgeSlot::DF, EdgeSlot::DR, EdgeSlot::DB, EdgeSlot::DL],
            Layer::L => [EdgeSlot::UL, EdgeSlot::LF, EdgeSlot::DL, EdgeSlot::LB],
            Layer::R => [EdgeSlot::UR, EdgeSlot::RB, EdgeSlot::DR, EdgeSlot::RF],
            Layer::F => [EdgeSlot::UF, EdgeSlot::RF, EdgeSlot::DF, EdgeSlot::LF],
            Layer::B => [EdgeSlot::UB, EdgeSlot::LB, EdgeSlot::DB, EdgeSlot::RB],
            Layer::M => [EdgeSlot::UF, EdgeSlot::DF, EdgeSlot::DB, EdgeSlot::UB],
            Layer::E => [EdgeSlot::LF, EdgeSlot::RF, EdgeSlot::RB, EdgeSlot::LB],
            Layer::S => [EdgeSlot::UL, EdgeSlot::UR, EdgeSlot::DR, EdgeSlot::DL],
        }
    }

    /// Whether a quarter turn of this layer swaps primary and secondary
    /// roles at every slot of its cycle. Derived from the role convention;
    /// see the `orientation_rule_re_derived` test.
    pub(crate) fn flips_roles(self) -> bool {
        matches!(
            self,
            Layer::L | Layer::R | Layer::M | Layer::E | Layer::S
        )
    }
}

/// Compositional definition of every base letter as layer turns. Wide moves
/// pair the outer layer with the adjacent slice; a rotation turns the outer
/// layer, the complementary slice, and the opposite outer layer the right
/// number of times. The second element counts clockwise quarter turns of
/// that layer per clockwise application of the base letter.
fn expansion(base: BaseMove) -> &'static [(Layer, u8)] {
    match base {
        BaseMove::U => &[(Layer::U, 1)],
        BaseMove::D => &[(Layer::D, 1)],
        BaseMove::L => &[(Layer::L, 1)],
        BaseMove::R => &[(Layer::R, 1)],
        BaseMove::F => &[(Layer::F, 1)],
        BaseMove::B => &[(Layer::B, 1)],
        BaseMove::WideU => &[(Layer::U, 1), (Layer::E, 3)],
        BaseMove::WideD => &[(Layer::D, 1), (Layer::E, 1)],
        BaseMove::WideL => &[(Layer::L, 1), (Layer::M, 1)],
        BaseMove::WideR => &[(Layer::R, 1), (Layer::M, 3)],
        BaseMove::WideF => &[(Layer::F, 1), (Layer::S, 1)],
        BaseMove::WideB => &[(Layer::B, 1), (Layer::S, 3)],
        BaseMove::X => &[(Layer::R, 1), (Layer::M, 3), (Layer::L, 3)],
        BaseMove::Y => &[(Layer::U, 1), (Layer::E, 3), (Layer::D, 3)],
        BaseMove::Z => &[(Layer::F, 1), (Layer::S, 1), (Layer::B, 3)],
    }
}

/// Replays an algorithm from a state. Convenience for callers holding an
/// [`Alg`] by reference.
pub fn replay(state: &CrossState, alg: &Alg) -> CrossState {
    state.apply_all(alg.iter().copied())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::moves::Modifier;

    use super::*;

    fn scrambled() -> CrossState {
        let alg = Alg::from_str("R U2 F' L D B2").unwrap();
        replay(&CrossState::goal(), &alg)
    }

    /// Image of a face direction under a clockwise quarter turn of a layer,
    /// written out from cube geometry independently of the engine tables.
    fn rotated_face(layer: Layer, face: Face) -> Face {
        let around_u = |face| match face {
            Face::F => Face::L,
            Face::L => Face::B,
            Face::B => Face::R,
            Face::R => Face::F,
            other => other,
        };
        let around_d = |face| match face {
            Face::F => Face::R,
            Face::R => Face::B,
            Face::B => Face::L,
            Face::L => Face::F,
            other => other,
        };
        let around_l = |face| match face {
            Face::U => Face::F,
            Face::F => Face::D,
            Face::D => Face::B,
            Face::B => Face::U,
            other => other,
        };
        let around_r = |face| match face {
            Face::U => Face::B,
            Face::B => Face::D,
            Face::D => Face::F,
            Face::F => Face::U,
            other => other,
        };
        let around_f = |face| match face {
            Face::U => Face::R,
            Face::R => Face::D,
            Face::D => Face::L,
            Face::L => Face::U,
            other => other,
        };
        let around_b = |face| match face {
            Face::U => Face::L,
            Face::L => Face::D,
            Face::D => Face::R,
            Face::R => Face::U,
            other => other,
        };
        match layer {
            Layer::U => around_u(face),
            Layer::D | Layer::E => around_d(face),
            Layer::L | Layer::M => around_l(face),
            Layer::R => around_r(face),
            Layer::F | Layer::S => around_f(face),
            Layer::B => around_b(face),
        }
    }

    /// The re-derivation demanded by the role convention: for every layer
    /// and every sticker of every slot in its cycle, follow the sticker to
    /// its destination face and check which role it lands in. U/D/F/B must
    /// preserve roles; L/R and the slices must swap them.
    #[test]
    fn orientation_rule_re_derived() {
        for layer in Layer::ALL {
            let cycle = layer.cycle();
            for i in 0..4 {
                let from = cycle[i];
                let to = cycle[(i + 1) % 4];
                for primary in [true, false] {
                    let face = if primary {
                        from.primary_face()
                    } else {
                        from.secondary_face()
                    };
                    let landed = rotated_face(layer, face);
                    assert!(
                        landed == to.primary_face() || landed == to.secondary_face(),
                        "{layer:?}: sticker {face:?} of {from} does not land on {to}"
                    );
                    let landed_primary = landed == to.primary_face();
                    assert_eq!(
                        landed_primary,
                        primary ^ layer.flips_roles(),
                        "{layer:?}: role of sticker {face:?} at {from} -> {to}"
                    );
                }
            }
        }
    }

    #[test]
    fn goal_is_goal() {
        assert!(CrossState::goal().is_goal());
        assert!(!scrambled().is_goal());
    }

    #[test]
    fn outer_quarter_turns_have_order_four() {
        for letter in ["U", "D", "L", "R", "F", "B", "u", "l", "x", "y", "z"] {
            let mv = Move::from_str(letter).unwrap();
            let mut state = scrambled();
            for _ in 0..4 {
                state = state.apply(mv);
            }
            assert_eq!(state, scrambled(), "{letter}^4 should be the identity");
        }
    }

    #[test]
    fn half_turns_have_order_two() {
        for letter in ["U2", "D2", "L2", "R2", "F2", "B2", "r2", "z2"] {
            let mv = Move::from_str(letter).unwrap();
            let state = scrambled().apply(mv).apply(mv);
            assert_eq!(state, scrambled(), "{letter}^2 should be the identity");
        }
    }

    #[test]
    fn every_move_cancels_with_its_inverse() {
        for base in BaseMove::ALL {
            for modifier in [
                Modifier::Clockwise,
                Modifier::CounterClockwise,
                Modifier::Half,
            ] {
                let mv = Move::new(base, modifier);
                let state = scrambled().apply(mv).apply(mv.inverse());
                assert_eq!(state, scrambled(), "{mv} then {} should cancel", mv.inverse());
            }
        }
    }

    #[test]
    fn y_rotation_carries_the_cross_around_the_d_face() {
        let state = CrossState::goal().apply(Move::from_str("y").unwrap());
        assert_eq!(
            state.placement(CrossEdge::WhiteGreen),
            Placement {
                slot: EdgeSlot::DL,
                oriented: true
            }
        );
        assert_eq!(
            state.placement(CrossEdge::WhiteOrange).slot,
            EdgeSlot::DF
        );
    }

    #[test]
    fn z2_rotation_lifts_the_cross_onto_the_u_face() {
        let state = CrossState::goal().apply(Move::from_str("z2").unwrap());
        let expect = [
            (CrossEdge::WhiteGreen, EdgeSlot::UF),
            (CrossEdge::WhiteOrange, EdgeSlot::UL),
            (CrossEdge::WhiteBlue, EdgeSlot::UB),
            (CrossEdge::WhiteRed, EdgeSlot::UR),
        ];
        for (edge, slot) in expect {
            assert_eq!(state.placement(edge), Placement { slot, oriented: true });
        }
    }

    #[test]
    fn packed_encoding_round_trips() {
        for state in [CrossState::goal(), scrambled()] {
            assert_eq!(CrossState::from_packed(state.packed()), Ok(state));
        }
    }

    #[test]
    fn packed_encoding_separates_orientation() {
        let flipped = CrossState::try_from_assignments(&[
            (CrossEdge::WhiteGreen, EdgeSlot::DF, false),
            (CrossEdge::WhiteOrange, EdgeSlot::DR, true),
            (CrossEdge::WhiteBlue, EdgeSlot::DB, true),
            (CrossEdge::WhiteRed, EdgeSlot::DL, true),
        ])
        .unwrap();
        assert_ne!(flipped.packed(), CrossState::goal().packed());
    }

    #[test]
    fn rejects_duplicate_edges() {
        let err = CrossState::try_from_assignments(&[
            (CrossEdge::WhiteGreen, EdgeSlot::UF, true),
            (CrossEdge::WhiteGreen, EdgeSlot::UB, true),
            (CrossEdge::WhiteBlue, EdgeSlot::DB, true),
            (CrossEdge::WhiteRed, EdgeSlot::DL, true),
        ])
        .unwrap_err();
        assert_eq!(err, MalformedState::DuplicateEdge(CrossEdge::WhiteGreen));
    }

    #[test]
    fn rejects_slot_collisions() {
        let err = CrossState::try_from_assignments(&[
            (CrossEdge::WhiteGreen, EdgeSlot::UF, true),
            (CrossEdge::WhiteOrange, EdgeSlot::UF, false),
            (CrossEdge::WhiteBlue, EdgeSlot::DB, true),
            (CrossEdge::WhiteRed, EdgeSlot::DL, true),
        ])
        .unwrap_err();
        assert_eq!(err, MalformedState::SlotCollision(EdgeSlot::UF));
    }

    #[test]
    fn rejects_partial_mappings() {
        // Only three distinct identities supplied.
        let err = CrossState::try_from_assignments(&[
            (CrossEdge::WhiteGreen, EdgeSlot::UF, true),
            (CrossEdge::WhiteOrange, EdgeSlot::UB, true),
            (CrossEdge::WhiteBlue, EdgeSlot::DB, true),
        ])
        .unwrap_err();
        assert_eq!(err, MalformedState::MissingEdge(CrossEdge::WhiteRed));
    }

    #[test]
    fn l_and_r_quarter_turns_toggle_orientation() {
        // WG at UL oriented (white on U); an L turn carries it to LF with
        // white now on F, the secondary role there.
        let state = CrossState::try_from_assignments(&[
            (CrossEdge::WhiteGreen, EdgeSlot::UL, true),
            (CrossEdge::WhiteOrange, EdgeSlot::DR, true),
            (CrossEdge::WhiteBlue, EdgeSlot::DB, true),
            (CrossEdge::WhiteRed, EdgeSlot::UF, true),
        ])
        .unwrap();
        let turned = state.apply(Move::from_str("L").unwrap());
        assert_eq!(
            turned.placement(CrossEdge::WhiteGreen),
            Placement {
                slot: EdgeSlot::LF,
                oriented: false
            }
        );
        // F turns preserve the role instead.
        let turned = state.apply(Move::from_str("F").unwrap());
        assert_eq!(
            turned.placement(CrossEdge::WhiteRed),
            Placement {
                slot: EdgeSlot::RF,
                oriented: true
            }
        );
    }
}
