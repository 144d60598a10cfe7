//! Human-readable dumps of a [`Tableau`].
//!
//! `Display` gives the compact form, one stabilizer per line:
//! ```text
//! + Z Z
//! + X X
//! ```
//! while [`Tableau::full`] interleaves each stabilizer with its destabilizer
//! and tags every non-identity letter with its qubit index:
//! ```text
//! stable | destable
//! -------+----------
//! + Z0   | + X0
//! ```
//! The compact form puts a space before each letter but none after the last
//! one, so lines carry no trailing whitespace (`"+ Z I"` rather than
//! `"+ Z I "`). The full form pads its columns and keeps its trailing spaces.
//! Neither is meant to be parsed back; use [`crate::record`] for that.

use std::fmt;
use crate::{ pauli::Pauli, tableau::Tableau };

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, stab) in self.stabilizers().iter().enumerate() {
            fmt::Display::fmt(&stab.sign, f)?;
            stab.ops.iter()
                .try_for_each(|p| write!(f, " {}", p))?;
            if k + 1 < self.n { writeln!(f)?; }
        }
        Ok(())
    }
}

/// Side-by-side stabilizer/destabilizer table, created by [`Tableau::full`].
#[derive(Copy, Clone, Debug)]
pub struct FullDisplay<'a>(&'a Tableau);

impl Tableau {
    /// Render all generators, each stabilizer next to its destabilizer.
    pub fn full(&self) -> FullDisplay<'_> { FullDisplay(self) }
}

impl fmt::Display for FullDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tab = self.0;
        let n = tab.n;
        writeln!(
            f, "stable{}| destable", " ".repeat((2 * n).saturating_sub(3).max(1)))?;
        writeln!(
            f, "{}+{}", "-".repeat((2 * n + 3).max(7)), "-".repeat((2 * n + 4).max(10)))?;
        for j in 0..n {
            for i in [j + n, j] {
                let row = tab.row_to_pauli_unchecked(i);
                write!(f, "{} ", row.sign)?;
                for (k, op) in row.ops.iter().enumerate() {
                    match op {
                        Pauli::I => write!(f, "  ")?,
                        p => write!(f, "{}{}", p, k)?,
                    }
                }
                if i == j + n {
                    write!(f, "{} | ", " ".repeat(4_usize.saturating_sub(2 * n)))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
