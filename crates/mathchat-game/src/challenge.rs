//! Arithmetic challenges.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Range of the left operand of a generated challenge.
pub const LHS_RANGE: Range<i64> = 0..100;

/// Range of the right operand. Starts at 1 so division is always defined.
pub const RHS_RANGE: Range<i64> = 1..100;

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// One of the four operators a challenge can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    /// Integer division, truncating toward zero.
    Divide,
}

impl Operator {
    /// Every operator, in the order generation picks from.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The character used on the wire.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Inverse of [`symbol`](Self::symbol).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Applies the operator. `None` on overflow or division by zero.
    pub fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Subtract => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => lhs.checked_div(rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Challenge
// ---------------------------------------------------------------------------

/// An `lhs <op> rhs` problem with a precomputed answer.
///
/// Always well-defined: construction rejects division by zero and overflow,
/// so [`result`](Self::result) is infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    lhs: i64,
    op: Operator,
    rhs: i64,
    result: i64,
}

impl Challenge {
    /// Builds a challenge from explicit operands.
    ///
    /// # Errors
    /// [`GameError::InvalidChallenge`] if the operation is undefined
    /// (division by zero) or overflows `i64`.
    pub fn new(lhs: i64, op: Operator, rhs: i64) -> Result<Self, GameError> {
        let result = op.apply(lhs, rhs).ok_or_else(|| {
            GameError::InvalidChallenge(format!("{lhs}{op}{rhs} has no result"))
        })?;
        Ok(Self {
            lhs,
            op,
            rhs,
            result,
        })
    }

    /// Draws a uniformly random operator and operands from
    /// [`LHS_RANGE`] and [`RHS_RANGE`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let op = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
        let lhs = rng.random_range(LHS_RANGE);
        let rhs = rng.random_range(RHS_RANGE);
        // Operands are < 100, so no operator can overflow or divide by zero.
        let result = match op {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        };
        Self {
            lhs,
            op,
            rhs,
            result,
        }
    }

    pub fn lhs(&self) -> i64 {
        self.lhs
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// The unique correct answer.
    pub fn result(&self) -> i64 {
        self.result
    }

    /// The human-readable prompt, e.g. `42+7`.
    pub fn expression(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}

/// Parses an expression such as `42+7` or `-3*5` (the form
/// [`Display`](fmt::Display) produces).
impl FromStr for Challenge {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GameError::InvalidChallenge(format!("cannot parse {s:?}"));

        // Skip the first char so a leading minus sign belongs to lhs.
        let (index, op) = s
            .char_indices()
            .skip(1)
            .find_map(|(i, c)| Operator::from_symbol(c).map(|op| (i, op)))
            .ok_or_else(invalid)?;

        let lhs = s[..index].parse().map_err(|_| invalid())?;
        let rhs = s[index + 1..].parse().map_err(|_| invalid())?;
        Self::new(lhs, op, rhs)
    }
}
