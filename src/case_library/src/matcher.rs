//! Recognition against the case libraries: rotation-invariant exact
//! matching for OLL, exact attribute lookup for F2L. First hit wins in
//! library order; there is no partial credit.

use cube_core::{BaseMove, Modifier, Move};

use crate::cases::{CornerPos, EdgePos, F2lCase, OllCase};
use crate::pattern::OllPattern;

/// A recognized OLL case and the number of clockwise quarter turns its
/// canonical pattern was rotated by to match.
#[derive(Debug, Clone, Copy)]
pub struct OllMatch<'a> {
    pub case: &'a OllCase,
    pub rotation: u8,
}

impl OllMatch<'_> {
    /// The whole-cube `y` rotation that realigns the solver's grip with the
    /// case's canonical orientation, if any is needed.
    pub fn realign(&self) -> Option<Move> {
        match self.rotation {
            1 => Some(Move::new(BaseMove::Y, Modifier::CounterClockwise)),
            2 => Some(Move::new(BaseMove::Y, Modifier::Half)),
            3 => Some(Move::new(BaseMove::Y, Modifier::Clockwise)),
            _ => None,
        }
    }
}

/// Finds the first case whose canonical pattern, rotated by 0, 1, 2 or 3
/// quarter turns (tried in that order), equals `pattern` exactly.
pub fn match_oll<'a>(pattern: &OllPattern, cases: &'a [OllCase]) -> Option<OllMatch<'a>> {
    for case in cases {
        for rotation in 0..4 {
            if case.pattern.rotated(rotation) == *pattern {
                return Some(OllMatch { case, rotation });
            }
        }
    }
    None
}

/// The four discrete attributes identifying an F2L situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F2lQuery {
    pub corner_pos: CornerPos,
    pub corner_ori: u8,
    pub edge_pos: EdgePos,
    pub edge_ori: u8,
}

/// Exact structured match against the library, no rotation dimension.
pub fn lookup_f2l<'a>(query: &F2lQuery, cases: &'a [F2lCase]) -> Option<&'a F2lCase> {
    cases.iter().find(|case| {
        case.corner_pos == query.corner_pos
            && case.corner_ori == query.corner_ori
            && case.edge_pos == query.edge_pos
            && case.edge_ori == query.edge_ori
    })
}

#[cfg(test)]
mod tests {
    use crate::cases::{builtin_f2l_cases, builtin_oll_cases, oll_cases_from_json};

    use super::*;

    #[test]
    fn matching_is_rotation_invariant() {
        let cases = builtin_oll_cases().unwrap();
        // The sune pattern has no rotational self-symmetry, so each rotated
        // view must come back with exactly the rotation that produced it.
        let sune = cases.iter().find(|case| case.id == "OLL-27").unwrap();
        let library = std::slice::from_ref(sune);
        for rotation in 0..4 {
            let seen = sune.pattern.rotated(rotation);
            let found = match_oll(&seen, library).unwrap();
            assert_eq!(found.case.id, "OLL-27");
            assert_eq!(found.rotation, rotation);
        }
    }

    #[test]
    fn realign_tokens_follow_the_detected_rotation() {
        let cases = builtin_oll_cases().unwrap();
        let sune = cases.iter().find(|case| case.id == "OLL-27").unwrap();
        let library = std::slice::from_ref(sune);
        let expect = [None, Some("y'"), Some("y2"), Some("y")];
        for (rotation, token) in (0u8..4).zip(expect) {
            let found = match_oll(&sune.pattern.rotated(rotation), library).unwrap();
            assert_eq!(found.realign().map(|mv| mv.to_string()), token.map(str::to_owned));
        }
    }

    #[test]
    fn double_flipped_edges_case_matches_itself_and_its_half_turn() {
        // This pattern is symmetric under a half turn, so the 180°-rotated
        // view is bit-identical and the earliest rotation wins.
        let json = r#"[{ "id": "OLL-57", "topPattern": "10100101",
                         "ringPattern": "010000000010",
                         "solution": "R U R' U' r R' U R U' r'" }]"#;
        let cases = oll_cases_from_json(json).unwrap();
        let pattern = cases[0].pattern;

        let found = match_oll(&pattern, &cases).unwrap();
        assert_eq!(found.rotation, 0);

        let half_turned = pattern.rotated(2);
        assert_eq!(half_turned, pattern);
        assert_eq!(match_oll(&half_turned, &cases).unwrap().rotation, 0);

        // A quarter-turned view is a different grid and reports rotation 1.
        assert_eq!(match_oll(&pattern.rotated(1), &cases).unwrap().rotation, 1);
    }

    #[test]
    fn unknown_patterns_are_not_guessed() {
        let cases = builtin_oll_cases().unwrap();
        let nothing_oriented =
            OllPattern::from_strings("00000000", "000000000000").unwrap();
        assert!(match_oll(&nothing_oriented, &cases).is_none());
    }

    #[test]
    fn f2l_lookup_is_exact_and_first_hit() {
        let cases = builtin_f2l_cases().unwrap();
        let solved_pair = F2lQuery {
            corner_pos: CornerPos::FrSlot,
            corner_ori: 0,
            edge_pos: EdgePos::Fr,
            edge_ori: 0,
        };
        let case = lookup_f2l(&solved_pair, &cases).unwrap();
        assert!(case.solution.is_empty());

        let missing = F2lQuery {
            corner_pos: CornerPos::Ubl,
            corner_ori: 2,
            edge_pos: EdgePos::Ub,
            edge_ori: 1,
        };
        assert!(lookup_f2l(&missing, &cases).is_none());
    }
}
