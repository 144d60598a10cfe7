//! Projective Z-basis measurement of a single qubit.
//!
//! The outcome is deterministic when every stabilizer commutes with
//! *Z*<sub>*q*</sub>, in which case the state is left untouched and the
//! outcome is read off a product of stabilizers accumulated in the private
//! scratch row. Otherwise the outcome is a fair coin flip drawn from the
//! caller's RNG and the anticommuting stabilizer is replaced by
//! ±*Z*<sub>*q*</sub>.

use log::trace;
use rand::Rng;
use crate::{
    error::TabResult,
    tableau::Tableau,
};

/// The result of a measurement, generated by [`Tableau::measure`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A deterministic outcome resulting in ∣0⟩
    Det0,
    /// A deterministic outcome resulting in ∣1⟩
    Det1,
    /// A random outcome resulting in ∣0⟩
    Rand0,
    /// A random outcome resulting in ∣1⟩
    Rand1,
}

impl Outcome {
    fn deterministic(b: bool) -> Self { if b { Self::Det1 } else { Self::Det0 } }

    fn random(b: bool) -> Self { if b { Self::Rand1 } else { Self::Rand0 } }

    /// Return `true` if `self` is `Det0` or `Rand0`.
    pub fn is_0(&self) -> bool { matches!(self, Self::Det0 | Self::Rand0) }

    /// Return `true` if `self` is `Det1` or `Rand1`.
    pub fn is_1(&self) -> bool { matches!(self, Self::Det1 | Self::Rand1) }

    /// Return `true` if `self` is `Det0` or `Det1`.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Det0 | Self::Det1)
    }

    /// The classical bit, 0 or 1.
    pub fn bit(&self) -> u8 { u8::from(self.is_1()) }
}

impl Tableau {
    // first stabilizer row anticommuting with Z_q
    fn pivot(&self, q: usize) -> Option<usize> {
        (self.n..2 * self.n).find(|&p| self.xs[(p, q)])
    }

    /// Return `true` if measuring qubit `q` would give a deterministic
    /// outcome. Does not change the state.
    pub fn is_deterministic(&self, q: usize) -> TabResult<bool> {
        self.check_qubit(q)?;
        Ok(self.pivot(q).is_none())
    }

    /// Perform a projective measurement on qubit `q` in the Z-basis,
    /// returning the outcome of the measurement.
    ///
    /// The RNG is only consulted (for exactly one `bool`) when the outcome is
    /// random. Fails if `q` is out of bounds, in which case the state is left
    /// unchanged.
    pub fn measure<R>(&mut self, q: usize, rng: &mut R) -> TabResult<Outcome>
    where R: Rng + ?Sized
    {
        self.check_qubit(q)?;
        let n = self.n;
        match self.pivot(q) {
            None => {
                self.scratch.reset();
                for i in 0..n {
                    if self.xs[(i, q)] { self.scratch_mul(n + i); }
                }
                trace!("measure q{}: deterministic, r = {}", q, self.scratch.r);
                Ok(Outcome::deterministic(self.scratch.r))
            },
            Some(p) => {
                for i in 0..2 * n {
                    if i != p && self.xs[(i, q)] { self.rowsum_unchecked(i, p); }
                }
                self.row_copy_unchecked(p, p - n);
                self.xs.fill_row(p, false);
                self.zs.fill_row(p, false);
                self.zs[(p, q)] = true;
                let b: bool = rng.gen();
                self.rs[p] = b;
                trace!("measure q{}: random, pivot row {}, r = {}", q, p, b);
                Ok(Outcome::random(b))
            },
        }
    }
}
