//! Reference case libraries and the recognizers that consume them: the
//! rotation-invariant OLL pattern matcher and the exact-attribute F2L
//! lookup. Libraries are external read-only JSON, loaded at most once per
//! session and shared immutably afterwards.

pub mod cases;
pub mod loader;
pub mod matcher;
pub mod pattern;

pub use cases::{
    CornerPos, EdgePos, F2lCase, LoadError, OllCase, UnknownPos, builtin_f2l_cases,
    builtin_oll_cases, f2l_cases_from_json, f2l_cases_from_path,
    oll_cases_from_json, oll_cases_from_path,
};
pub use loader::LazyLibrary;
pub use matcher::{F2lQuery, OllMatch, lookup_f2l, match_oll};
pub use pattern::{OllPattern, PatternParseError};
