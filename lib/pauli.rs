//! Signed *N*-qubit Pauli operators, as read out of tableau rows.
//!
//! A tableau row stores one bit of X-part and one bit of Z-part per qubit, so
//! each qubit carries one of the four single-qubit Paulis:
//!
//! | *x* | *z* | Pauli |
//! | :-: | :-: | :---: |
//! | 0   | 0   | *I*   |
//! | 1   | 0   | *X*   |
//! | 1   | 1   | *Y*   |
//! | 0   | 1   | *Z*   |
//!
//! Stabilizer generators are Hermitian, so the overall phase of a row is
//! always real and is stored as a single [`Sign`].

use std::{ fmt, str::FromStr };
use crate::error::{ TabResult, TableauError };

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    /// Decode from the (X-part, Z-part) bit pair of a tableau entry.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (true,  true ) => Self::Y,
            (false, true ) => Self::Z,
        }
    }

    /// Encode as the (X-part, Z-part) bit pair of a tableau entry.
    pub fn to_bits(self) -> (bool, bool) {
        match self {
            Self::I => (false, false),
            Self::X => (true,  false),
            Self::Y => (true,  true ),
            Self::Z => (false, true ),
        }
    }

    /// Return `true` if `self` and `other` commute.
    pub fn commutes_with(self, other: Self) -> bool {
        match (self, other) {
            (_, Self::I) => true,
            (Self::I, _) => true,
            (a, b) => a == b,
        }
    }

    fn from_char(c: char) -> TabResult<Self> {
        match c {
            'I' | '.' => Ok(Self::I),
            'X' => Ok(Self::X),
            'Y' => Ok(Self::Y),
            'Z' => Ok(Self::Z),
            _ => Err(TableauError::InvalidPauli(c)),
        }
    }
}

/// Overall sign of a Hermitian Pauli operator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    /// +1
    #[default]
    Plus,
    /// -1
    Minus,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

impl Sign {
    /// Decode from a tableau phase bit (`true` means negated).
    pub fn from_bit(r: bool) -> Self { if r { Self::Minus } else { Self::Plus } }

    /// Encode as a tableau phase bit.
    pub fn to_bit(self) -> bool { matches!(self, Self::Minus) }

    /// Convert to ±1.
    pub fn to_int(self) -> i8 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }
}

/// A single *N*-qubit Pauli operator with a sign.
///
/// Displays as the sign followed by one letter per qubit, e.g. `+XZI`; the
/// alternate (`#`) formatter prints identities as `.`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PauliString {
    pub sign: Sign,
    pub ops: Vec<Pauli>,
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.sign, f)?;
        self.ops.iter()
            .try_for_each(|p| fmt::Display::fmt(p, f))
    }
}

impl FromStr for PauliString {
    type Err = TableauError;

    fn from_str(s: &str) -> TabResult<Self> {
        let s = s.trim();
        let (sign, body)
            = match s.chars().next() {
                Some('+') => (Sign::Plus, &s[1..]),
                Some('-') => (Sign::Minus, &s[1..]),
                _ => (Sign::Plus, s),
            };
        let ops: Vec<Pauli>
            = body.chars()
            .filter(|c| !c.is_whitespace())
            .map(Pauli::from_char)
            .collect::<TabResult<_>>()?;
        Ok(Self { sign, ops })
    }
}

impl PauliString {
    /// Create a new Pauli string.
    pub fn new(sign: Sign, ops: Vec<Pauli>) -> Self { Self { sign, ops } }

    /// The identity on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self { sign: Sign::Plus, ops: vec![Pauli::I; n] }
    }

    /// Number of qubits acted on.
    pub fn len(&self) -> usize { self.ops.len() }

    /// Return `true` if the string acts on no qubits.
    pub fn is_empty(&self) -> bool { self.ops.is_empty() }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.iter().filter(|p| **p != Pauli::I).count()
    }

    /// Return `true` if `self` and `other` commute, i.e. they anticommute on
    /// an even number of qubits. Positions past the end of the shorter string
    /// are treated as identities.
    pub fn commutes_with(&self, other: &Self) -> bool {
        self.ops.iter().zip(&other.ops)
            .filter(|(a, b)| !a.commutes_with(**b))
            .count() % 2 == 0
    }
}

/// The complete stabilizer/destabilizer generator sets of a state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generators {
    pub stab: Vec<PauliString>,
    pub destab: Vec<PauliString>,
}

impl fmt::Display for Generators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.stab.len();
        for (k, (stab, destab)) in
            self.stab.iter().zip(&self.destab).enumerate()
        {
            fmt::Display::fmt(stab, f)?;
            write!(f, " | ")?;
            fmt::Display::fmt(destab, f)?;
            if k + 1 < n { writeln!(f)?; }
        }
        Ok(())
    }
}
