//! Move tokens and algorithms.
//!
//! The move alphabet is the six outer layer turns `U D L R F B`, their wide
//! two-layer variants `u d l r f b`, and the whole-cube rotations `x y z`.
//! A token is a base letter optionally suffixed with `'` (counterclockwise)
//! or `2` (half turn); no suffix means a clockwise quarter turn.

use std::{fmt, ops::Deref, str::FromStr};

use itertools::Itertools;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "./moves.pest"]
struct MoveParser;

/// A token outside the move grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown move token `{0}`")]
pub struct UnknownMove(pub String);

/// The base letter of a move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseMove {
    U,
    D,
    L,
    R,
    F,
    B,
    WideU,
    WideD,
    WideL,
    WideR,
    WideF,
    WideB,
    X,
    Y,
    Z,
}

impl BaseMove {
    pub const ALL: [BaseMove; 15] = [
        BaseMove::U,
        BaseMove::D,
        BaseMove::L,
        BaseMove::R,
        BaseMove::F,
        BaseMove::B,
        BaseMove::WideU,
        BaseMove::WideD,
        BaseMove::WideL,
        BaseMove::WideR,
        BaseMove::WideF,
        BaseMove::WideB,
        BaseMove::X,
        BaseMove::Y,
        BaseMove::Z,
    ];

    fn letter(self) -> char {
        match self {
            BaseMove::U => 'U',
            BaseMove::D => 'D',
            BaseMove::L => 'L',
            BaseMove::R => 'R',
            BaseMove::F => 'F',
            BaseMove::B => 'B',
            BaseMove::WideU => 'u',
            BaseMove::WideD => 'd',
            BaseMove::WideL => 'l',
            BaseMove::WideR => 'r',
            BaseMove::WideF => 'f',
            BaseMove::WideB => 'b',
            BaseMove::X => 'x',
            BaseMove::Y => 'y',
            BaseMove::Z => 'z',
        }
    }

    fn from_letter(letter: &str) -> Option<BaseMove> {
        Some(match letter {
            "U" => BaseMove::U,
            "D" => BaseMove::D,
            "L" => BaseMove::L,
            "R" => BaseMove::R,
            "F" => BaseMove::F,
            "B" => BaseMove::B,
            "u" => BaseMove::WideU,
            "d" => BaseMove::WideD,
            "l" => BaseMove::WideL,
            "r" => BaseMove::WideR,
            "f" => BaseMove::WideF,
            "b" => BaseMove::WideB,
            "x" => BaseMove::X,
            "y" => BaseMove::Y,
            "z" => BaseMove::Z,
            _ => return None,
        })
    }
}

/// The suffix of a move token, normalized to clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Modifier {
    /// How many clockwise quarter turns this modifier stands for.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Modifier::Clockwise => 1,
            Modifier::CounterClockwise => 3,
            Modifier::Half => 2,
        }
    }

    pub fn inverse(self) -> Modifier {
        match self {
            Modifier::Clockwise => Modifier::CounterClockwise,
            Modifier::CounterClockwise => Modifier::Clockwise,
            Modifier::Half => Modifier::Half,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Modifier::Clockwise => "",
            Modifier::CounterClockwise => "'",
            Modifier::Half => "2",
        }
    }
}

/// A single move of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub base: BaseMove,
    pub modifier: Modifier,
}

impl Move {
    pub const fn new(base: BaseMove, modifier: Modifier) -> Move {
        Move { base, modifier }
    }

    /// The move undoing this one: same base letter, toggled modifier.
    pub fn inverse(self) -> Move {
        Move {
            base: self.base,
            modifier: self.modifier.inverse(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base.letter(), self.modifier.suffix())
    }
}

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Move, UnknownMove> {
        let unknown = || UnknownMove(s.to_owned());

        let mut pairs = MoveParser::parse(Rule::token, s)
            .map_err(|_| unknown())?
            .next()
            .ok_or_else(unknown)?
            .into_inner();

        let base_pair = pairs.next().ok_or_else(unknown)?;
        let base = BaseMove::from_letter(base_pair.as_str()).ok_or_else(unknown)?;

        let modifier = match pairs.next().filter(|p| p.as_rule() == Rule::suffix) {
            None => Modifier::Clockwise,
            Some(p) if p.as_str() == "'" => Modifier::CounterClockwise,
            Some(_) => Modifier::Half,
        };

        Ok(Move { base, modifier })
    }
}

/// A whitespace-separated sequence of moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alg(Vec<Move>);

impl Alg {
    pub fn new(moves: Vec<Move>) -> Alg {
        Alg(moves)
    }

    /// The algorithm undoing this one: each move inverted, in reverse order.
    pub fn inverse(&self) -> Alg {
        Alg(self.0.iter().rev().map(|mv| mv.inverse()).collect())
    }
}

impl Deref for Alg {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl From<Vec<Move>> for Alg {
    fn from(moves: Vec<Move>) -> Alg {
        Alg(moves)
    }
}

impl FromIterator<Move> for Alg {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Alg {
        Alg(iter.into_iter().collect())
    }
}

impl fmt::Display for Alg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for Alg {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Alg, UnknownMove> {
        s.split_whitespace().map(Move::from_str).collect()
    }
}
