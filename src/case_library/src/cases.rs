//! The JSON-shaped case records and their validated in-memory forms.
//!
//! Record fields are camelCase on the wire. Solutions are parsed into move
//! sequences at load time so a malformed case file surfaces as a
//! [`LoadError`] instead of a latent failure inside a recognizer.

use std::{fmt, path::Path, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use cube_core::{Alg, UnknownMove};

use crate::pattern::{OllPattern, PatternParseError};

/// Case-library fetch or parse failure. Never retried automatically; a
/// fresh explicit load call is the retry.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read case file")]
    Io(#[from] std::io::Error),
    #[error("case file is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("case {id}: bad pattern")]
    Pattern {
        id: String,
        #[source]
        source: PatternParseError,
    },
    #[error("case {id}: bad solution")]
    Solution {
        id: String,
        #[source]
        source: UnknownMove,
    },
    #[error("case {id}: {field} {value} is out of range")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: u8,
    },
}

/// An orientation-of-last-layer case in its canonical orientation.
#[derive(Debug, Clone)]
pub struct OllCase {
    pub id: String,
    pub name: Option<String>,
    pub pattern: OllPattern,
    pub solution: Alg,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOllCase {
    id: String,
    top_pattern: String,
    ring_pattern: String,
    solution: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawOllCase> for OllCase {
    type Error = LoadError;

    fn try_from(raw: RawOllCase) -> Result<OllCase, LoadError> {
        let pattern = OllPattern::from_strings(&raw.top_pattern, &raw.ring_pattern)
            .map_err(|source| LoadError::Pattern {
                id: raw.id.clone(),
                source,
            })?;
        let solution = raw
            .solution
            .parse::<Alg>()
            .map_err(|source| LoadError::Solution {
                id: raw.id.clone(),
                source,
            })?;
        Ok(OllCase {
            id: raw.id,
            name: raw.name,
            pattern,
            solution,
        })
    }
}

/// Where the tracked F2L corner sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CornerPos {
    #[serde(rename = "UFR")]
    Ufr,
    #[serde(rename = "UBR")]
    Ubr,
    #[serde(rename = "UBL")]
    Ubl,
    #[serde(rename = "UFL")]
    Ufl,
    #[serde(rename = "FR_SLOT")]
    FrSlot,
}

impl CornerPos {
    pub const ALL: [CornerPos; 5] = [
        CornerPos::Ufr,
        CornerPos::Ubr,
        CornerPos::Ubl,
        CornerPos::Ufl,
        CornerPos::FrSlot,
    ];

    fn code(self) -> &'static str {
        match self {
            CornerPos::Ufr => "UFR",
            CornerPos::Ubr => "UBR",
            CornerPos::Ubl => "UBL",
            CornerPos::Ufl => "UFL",
            CornerPos::FrSlot => "FR_SLOT",
        }
    }
}

impl fmt::Display for CornerPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An unrecognized position code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown position `{0}`")]
pub struct UnknownPos(pub String);

impl FromStr for CornerPos {
    type Err = UnknownPos;

    fn from_str(s: &str) -> Result<CornerPos, UnknownPos> {
        CornerPos::ALL
            .into_iter()
            .find(|pos| pos.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPos(s.to_owned()))
    }
}

/// Where the tracked F2L edge sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EdgePos {
    #[serde(rename = "UR")]
    Ur,
    #[serde(rename = "UF")]
    Uf,
    #[serde(rename = "UL")]
    Ul,
    #[serde(rename = "UB")]
    Ub,
    #[serde(rename = "FR")]
    Fr,
}

impl EdgePos {
    pub const ALL: [EdgePos; 5] = [
        EdgePos::Ur,
        EdgePos::Uf,
        EdgePos::Ul,
        EdgePos::Ub,
        EdgePos::Fr,
    ];

    fn code(self) -> &'static str {
        match self {
            EdgePos::Ur => "UR",
            EdgePos::Uf => "UF",
            EdgePos::Ul => "UL",
            EdgePos::Ub => "UB",
            EdgePos::Fr => "FR",
        }
    }
}

impl fmt::Display for EdgePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EdgePos {
    type Err = UnknownPos;

    fn from_str(s: &str) -> Result<EdgePos, UnknownPos> {
        EdgePos::ALL
            .into_iter()
            .find(|pos| pos.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPos(s.to_owned()))
    }
}

/// A first-two-layers case: four discrete attributes and a solution.
#[derive(Debug, Clone)]
pub struct F2lCase {
    pub id: String,
    pub name: Option<String>,
    pub corner_pos: CornerPos,
    /// 0 white up, 1 white right, 2 white front.
    pub corner_ori: u8,
    pub edge_pos: EdgePos,
    /// 0 unflipped, 1 flipped.
    pub edge_ori: u8,
    pub solution: Alg,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawF2lCase {
    id: String,
    corner_pos: CornerPos,
    corner_ori: u8,
    edge_pos: EdgePos,
    edge_ori: u8,
    solution: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawF2lCase> for F2lCase {
    type Error = LoadError;

    fn try_from(raw: RawF2lCase) -> Result<F2lCase, LoadError> {
        if raw.corner_ori > 2 {
            return Err(LoadError::OutOfRange {
                id: raw.id,
                field: "cornerOri",
                value: raw.corner_ori,
            });
        }
        if raw.edge_ori > 1 {
            return Err(LoadError::OutOfRange {
                id: raw.id,
                field: "edgeOri",
                value: raw.edge_ori,
            });
        }
        let solution = raw
            .solution
            .parse::<Alg>()
            .map_err(|source| LoadError::Solution {
                id: raw.id.clone(),
                source,
            })?;
        Ok(F2lCase {
            id: raw.id,
            name: raw.name,
            corner_pos: raw.corner_pos,
            corner_ori: raw.corner_ori,
            edge_pos: raw.edge_pos,
            edge_ori: raw.edge_ori,
            solution,
        })
    }
}

pub fn oll_cases_from_json(json: &str) -> Result<Vec<OllCase>, LoadError> {
    let raw: Vec<RawOllCase> = serde_json::from_str(json)?;
    raw.into_iter().map(OllCase::try_from).collect()
}

pub fn oll_cases_from_path(path: &Path) -> Result<Vec<OllCase>, LoadError> {
    oll_cases_from_json(&std::fs::read_to_string(path)?)
}

pub fn f2l_cases_from_json(json: &str) -> Result<Vec<F2lCase>, LoadError> {
    let raw: Vec<RawF2lCase> = serde_json::from_str(json)?;
    raw.into_iter().map(F2lCase::try_from).collect()
}

pub fn f2l_cases_from_path(path: &Path) -> Result<Vec<F2lCase>, LoadError> {
    f2l_cases_from_json(&std::fs::read_to_string(path)?)
}

/// The case set shipped with the repository.
pub fn builtin_oll_cases() -> Result<Vec<OllCase>, LoadError> {
    oll_cases_from_json(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../data/oll_cases.json"
    )))
}

pub fn builtin_f2l_cases() -> Result<Vec<F2lCase>, LoadError> {
    f2l_cases_from_json(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../data/f2l_cases.json"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_oll_cases_parse_and_stay_ordered() {
        let cases = builtin_oll_cases().unwrap();
        assert_eq!(cases.len(), 9);
        assert_eq!(cases[0].id, "OLL-21");
        assert_eq!(cases[0].name.as_deref(), Some("H"));
        assert!(!cases[0].solution.is_empty());
    }

    #[test]
    fn builtin_f2l_cases_parse() {
        let cases = builtin_f2l_cases().unwrap();
        assert!(cases.len() >= 6);
        assert!(
            cases
                .iter()
                .any(|case| case.corner_pos == CornerPos::FrSlot)
        );
    }

    #[test]
    fn bad_json_is_a_load_error() {
        assert!(matches!(
            oll_cases_from_json("not json"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn bad_pattern_bits_are_reported_with_the_case_id() {
        let json = r#"[{ "id": "X-1", "topPattern": "10x00101",
                         "ringPattern": "010000000010", "solution": "R U" }]"#;
        match oll_cases_from_json(json) {
            Err(LoadError::Pattern { id, .. }) => assert_eq!(id, "X-1"),
            other => panic!("expected a pattern error, got {other:?}"),
        }
    }

    #[test]
    fn bad_solution_tokens_are_reported_with_the_case_id() {
        let json = r#"[{ "id": "X-2", "topPattern": "10100101",
                         "ringPattern": "010000000010", "solution": "R W" }]"#;
        match oll_cases_from_json(json) {
            Err(LoadError::Solution { id, source }) => {
                assert_eq!(id, "X-2");
                assert_eq!(source, UnknownMove("W".to_owned()));
            }
            other => panic!("expected a solution error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_orientations_are_rejected() {
        let json = r#"[{ "id": "X-3", "cornerPos": "UFR", "cornerOri": 3,
                         "edgePos": "UF", "edgeOri": 0, "solution": "R U R'" }]"#;
        match f2l_cases_from_json(json) {
            Err(LoadError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "cornerOri");
                assert_eq!(value, 3);
            }
            other => panic!("expected an out-of-range error, got {other:?}"),
        }
    }

    #[test]
    fn empty_solutions_are_allowed() {
        let json = r#"[{ "id": "X-4", "cornerPos": "FR_SLOT", "cornerOri": 0,
                         "edgePos": "FR", "edgeOri": 0, "solution": "" }]"#;
        let cases = f2l_cases_from_json(json).unwrap();
        assert!(cases[0].solution.is_empty());
    }
}
