//! *N*-qubit stabilizer states in the Aaronson-Gottesman tableau
//! representation.
//!
//! A state is identified by *N* stabilizer generators and *N* complementary
//! "destabilizer" generators, which together generate the full *N*-qubit
//! Pauli group[^1]. Each generator is one row of a pair of binary matrices
//! (the X- and Z-parts, one column per qubit) plus a sign bit, giving
//! *O*(*N*<sup>2</sup>) storage instead of the *O*(2<sup>*N*</sup>) of a
//! state vector.
//!
//! Rows `0..N` are destabilizers and rows `N..2N` are stabilizers. Gate
//! application lives outside this module: callers update rows through the
//! primitives here ([`Tableau::rowsum`], [`Tableau::row_copy`],
//! [`Tableau::row_swap`], sign updates, or wholesale matrix replacement).
//!
//! [^1]: Aaronson and Gottesman also keep one extra row as scratch space for
//! deterministic measurements. Here it is a separate private field so that it
//! can never leak into the public matrices.
//!
//! See [arXiv:quant-ph/0406196][tableau].
//!
//! [tableau]: https://arxiv.org/abs/quant-ph/0406196

use std::fmt;
use itertools::izip;
use log::debug;
use nalgebra as na;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ TabResult, TableauError },
    pauli::{ Generators, Pauli, PauliString, Sign },
    record::TableauRecord,
};

// PHASE_EXP[s][t] is the power of i picked up on one qubit when a source
// Pauli s is composed into a target Pauli t, reduced mod 4. Both indices are
// `pauli_code(x, z)`, so the order is I, Z, X, Y.
const PHASE_EXP: [[u8; 4]; 4] = [
    // I  Z  X  Y   <- target
    [0, 0, 0, 0], // I
    [0, 0, 1, 3], // Z
    [0, 3, 0, 1], // X
    [0, 1, 3, 0], // Y
];

#[inline]
fn pauli_code(x: bool, z: bool) -> usize {
    (usize::from(x) << 1) | usize::from(z)
}

// phase contribution (mod 4) of a single qubit
#[inline]
pub(crate) fn phase_exp(x_src: bool, z_src: bool, x_tgt: bool, z_tgt: bool)
    -> u8
{
    PHASE_EXP[pauli_code(x_src, z_src)][pauli_code(x_tgt, z_tgt)]
}

// sign bit of the product of two rows, given their sign bits and an iterator
// over per-qubit (x_src, z_src, x_tgt, z_tgt)
//
// any nonzero residue mod 4 sets the bit; products of stabilizer generators
// only ever carry a real phase
fn product_sign<I>(r_tgt: bool, r_src: bool, qubits: I) -> bool
where I: IntoIterator<Item = (bool, bool, bool, bool)>
{
    let e: u8
        = qubits.into_iter()
        .fold(
            2 * u8::from(r_tgt) + 2 * u8::from(r_src),
            |acc, (xs, zs, xt, zt)| (acc + phase_exp(xs, zs, xt, zt)) & 3,
        );
    e & 3 != 0
}

// big-endian bit `i` of an `n`-bit integer
fn big_endian_bit(state: u64, n: usize, i: usize) -> bool {
    u32::try_from(n - 1 - i).ok()
        .and_then(|shift| state.checked_shr(shift))
        .is_some_and(|v| v & 1 == 1)
}

fn check_shape(field: &'static str, expected: &[usize], found: &[usize])
    -> TabResult<()>
{
    if expected == found {
        Ok(())
    } else {
        Err(TableauError::ShapeMismatch {
            field,
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Scratch {
    pub(crate) x: na::DVector<bool>,
    pub(crate) z: na::DVector<bool>,
    pub(crate) r: bool,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            x: na::DVector::from_element(n, false),
            z: na::DVector::from_element(n, false),
            r: false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.x.fill(false);
        self.z.fill(false);
        self.r = false;
    }
}

/// A stabilizer state of a finite register of qubits, identified by its
/// stabilizer and destabilizer generators.
///
/// Equality, cloning, and serialization only ever see the `2n` generator
/// rows.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "TableauRecord", try_from = "TableauRecord")]
pub struct Tableau {
    pub(crate) n: usize,
    pub(crate) xs: na::DMatrix<bool>, // Pauli-X bits; size 2n × n
    pub(crate) zs: na::DMatrix<bool>, // Pauli-Z bits; size 2n × n
    pub(crate) rs: na::DVector<bool>, // sign bits (true for -1); size 2n
    pub(crate) scratch: Scratch,
}

impl PartialEq for Tableau {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
            && self.rs == other.rs
            && self.xs == other.xs
            && self.zs == other.zs
    }
}

impl Eq for Tableau { }

impl fmt::Debug for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |ps: Vec<PauliString>| -> Vec<String> {
            ps.iter().map(|p| p.to_string()).collect()
        };
        f.debug_struct("Tableau")
            .field("n", &self.n)
            .field("stabilizers", &show(self.stabilizers()))
            .field("destabilizers", &show(self.destabilizers()))
            .finish()
    }
}

impl Tableau {
    /// Create a new `n`-qubit tableau in the computational basis state given
    /// by `initial_state`, read as a big-endian `n`-bit integer (qubit 0 is
    /// the most significant bit).
    ///
    /// Fails if `n == 0`, if a `2n × n` matrix cannot be indexed, or if
    /// `initial_state` needs more than `n` bits.
    pub fn new(n: usize, initial_state: u64) -> TabResult<Self> {
        if n == 0 { return Err(TableauError::NoQubits); }
        let rows = n.checked_mul(2)
            .filter(|rows| rows.checked_mul(n).is_some())
            .ok_or(TableauError::TooManyQubits { n })?;
        if n < 64 && initial_state >> n != 0 {
            return Err(
                TableauError::InvalidInitialState { state: initial_state, n });
        }
        let mut xs: na::DMatrix<bool> = na::DMatrix::from_element(rows, n, false);
        let mut zs: na::DMatrix<bool> = na::DMatrix::from_element(rows, n, false);
        let mut rs: na::DVector<bool> = na::DVector::from_element(rows, false);
        for i in 0..n {
            xs[(i, i)] = true;
            zs[(n + i, i)] = true;
            rs[n + i] = big_endian_bit(initial_state, n, i);
        }
        debug!("new {}-qubit tableau in basis state {}", n, initial_state);
        Ok(Self { n, xs, zs, rs, scratch: Scratch::new(n) })
    }

    /// Create a new `n`-qubit tableau initialized to ∣0...0⟩.
    pub fn zero(n: usize) -> TabResult<Self> { Self::new(n, 0) }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// X-parts of all `2n` generator rows.
    pub fn xs(&self) -> &na::DMatrix<bool> { &self.xs }

    /// Z-parts of all `2n` generator rows.
    pub fn zs(&self) -> &na::DMatrix<bool> { &self.zs }

    /// Sign bits of all `2n` generator rows.
    pub fn rs(&self) -> &na::DVector<bool> { &self.rs }

    /// Replace all X-parts. `xs` must be exactly `2n × n`.
    pub fn set_xs(&mut self, xs: na::DMatrix<bool>) -> TabResult<()> {
        check_shape("xs", &[2 * self.n, self.n], &[xs.nrows(), xs.ncols()])?;
        self.xs = xs;
        Ok(())
    }

    /// Replace all Z-parts. `zs` must be exactly `2n × n`.
    pub fn set_zs(&mut self, zs: na::DMatrix<bool>) -> TabResult<()> {
        check_shape("zs", &[2 * self.n, self.n], &[zs.nrows(), zs.ncols()])?;
        self.zs = zs;
        Ok(())
    }

    /// Replace all sign bits. `rs` must have length exactly `2n`.
    pub fn set_rs(&mut self, rs: na::DVector<bool>) -> TabResult<()> {
        check_shape("rs", &[2 * self.n], &[rs.len()])?;
        self.rs = rs;
        Ok(())
    }

    pub(crate) fn check_row(&self, row: usize) -> TabResult<()> {
        if row < 2 * self.n {
            Ok(())
        } else {
            Err(TableauError::RowOutOfBounds { row, rows: 2 * self.n })
        }
    }

    pub(crate) fn check_qubit(&self, qubit: usize) -> TabResult<()> {
        if qubit < self.n {
            Ok(())
        } else {
            Err(TableauError::QubitOutOfBounds { qubit, n: self.n })
        }
    }

    /// Left-multiply row `target` by row `source`, i.e. overwrite it with
    /// *P*<sub>target</sub> *P*<sub>source</sub>.
    ///
    /// The X- and Z-parts are XORed together. The sign bit is set if the
    /// accumulated phase exponent is nonzero mod 4. Applying this twice with
    /// the same `source` restores the Pauli part of `target` but not
    /// necessarily its sign.
    pub fn rowsum(&mut self, target: usize, source: usize)
        -> TabResult<&mut Self>
    {
        self.check_row(target)?;
        self.check_row(source)?;
        Ok(self.rowsum_unchecked(target, source))
    }

    pub(crate) fn rowsum_unchecked(&mut self, target: usize, source: usize)
        -> &mut Self
    {
        let r: bool
            = product_sign(
                self.rs[target],
                self.rs[source],
                izip!(
                    self.xs.row(source).iter(),
                    self.zs.row(source).iter(),
                    self.xs.row(target).iter(),
                    self.zs.row(target).iter(),
                )
                .map(|(&xs, &zs, &xt, &zt)| (xs, zs, xt, zt)),
            );
        self.rs[target] = r;
        for (mut x_k, mut z_k) in
            self.xs.column_iter_mut()
                .zip(self.zs.column_iter_mut())
        {
            let (xs, zs) = (x_k[source], z_k[source]);
            x_k[target] ^= xs;
            z_k[target] ^= zs;
        }
        self
    }

    // left-multiply the scratch row by row `source`
    pub(crate) fn scratch_mul(&mut self, source: usize) -> &mut Self {
        let r: bool
            = product_sign(
                self.scratch.r,
                self.rs[source],
                izip!(
                    self.xs.row(source).iter(),
                    self.zs.row(source).iter(),
                    self.scratch.x.iter(),
                    self.scratch.z.iter(),
                )
                .map(|(&xs, &zs, &xt, &zt)| (xs, zs, xt, zt)),
            );
        self.scratch.r = r;
        for ((x_k, z_k), (&xs, &zs)) in
            self.scratch.x.iter_mut()
                .zip(self.scratch.z.iter_mut())
                .zip(self.xs.row(source).iter().zip(self.zs.row(source).iter()))
        {
            *x_k ^= xs;
            *z_k ^= zs;
        }
        self
    }

    /// Set row `dst` equal to row `src`.
    pub fn row_copy(&mut self, src: usize, dst: usize) -> TabResult<&mut Self> {
        self.check_row(src)?;
        self.check_row(dst)?;
        Ok(self.row_copy_unchecked(src, dst))
    }

    pub(crate) fn row_copy_unchecked(&mut self, src: usize, dst: usize)
        -> &mut Self
    {
        for (mut x_k, mut z_k) in
            self.xs.column_iter_mut()
                .zip(self.zs.column_iter_mut())
        {
            x_k[dst] = x_k[src];
            z_k[dst] = z_k[src];
        }
        self.rs[dst] = self.rs[src];
        self
    }

    /// Swap rows `a` and `b`.
    pub fn row_swap(&mut self, a: usize, b: usize) -> TabResult<&mut Self> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.xs.swap_rows(a, b);
        self.zs.swap_rows(a, b);
        self.rs.swap_rows(a, b);
        Ok(self)
    }

    /// Set the sign bit of row `row` (`true` for -1).
    pub fn set_sign(&mut self, row: usize, r: bool) -> TabResult<&mut Self> {
        self.check_row(row)?;
        self.rs[row] = r;
        Ok(self)
    }

    /// Negate row `row`.
    pub fn flip_sign(&mut self, row: usize) -> TabResult<&mut Self> {
        self.check_row(row)?;
        self.rs[row] ^= true;
        Ok(self)
    }

    /// Overwrite row `row` with an explicit Pauli string acting on all `n`
    /// qubits.
    pub fn set_row(&mut self, row: usize, pauli: &PauliString)
        -> TabResult<&mut Self>
    {
        self.check_row(row)?;
        check_shape("row", &[self.n], &[pauli.len()])?;
        for (k, op) in pauli.ops.iter().enumerate() {
            let (x, z) = op.to_bits();
            self.xs[(row, k)] = x;
            self.zs[(row, k)] = z;
        }
        self.rs[row] = pauli.sign.to_bit();
        Ok(self)
    }

    /// Read row `i` out as a signed Pauli string.
    pub fn row_to_pauli(&self, i: usize) -> TabResult<PauliString> {
        self.check_row(i)?;
        Ok(self.row_to_pauli_unchecked(i))
    }

    pub(crate) fn row_to_pauli_unchecked(&self, i: usize) -> PauliString {
        let ops: Vec<Pauli>
            = self.xs.row(i).iter()
            .zip(self.zs.row(i).iter())
            .map(|(&x, &z)| Pauli::from_bits(x, z))
            .collect();
        PauliString { sign: Sign::from_bit(self.rs[i]), ops }
    }

    /// The stabilizer generators *S*<sub>*k*</sub>, which satisfy
    /// *S*<sub>*k*</sub>∣ψ⟩ = ∣ψ⟩.
    pub fn stabilizers(&self) -> Vec<PauliString> {
        (self.n..2 * self.n).map(|i| self.row_to_pauli_unchecked(i)).collect()
    }

    /// The destabilizer generators, which together with the stabilizers
    /// generate the full *n*-qubit Pauli group.
    pub fn destabilizers(&self) -> Vec<PauliString> {
        (0..self.n).map(|i| self.row_to_pauli_unchecked(i)).collect()
    }

    /// Both generator sets at once.
    pub fn as_group(&self) -> Generators {
        Generators { stab: self.stabilizers(), destab: self.destabilizers() }
    }

    /// Check that the generator rows satisfy the symplectic condition
    /// *T*<sup>T</sup> *J* *T* = *J* (mod 2), where *T* = \[xs | zs\] and *J*
    /// swaps the X and Z blocks.
    ///
    /// This is a debugging aid; nothing calls it automatically.
    pub fn validate(&self) -> bool {
        let n = self.n;
        let table: na::DMatrix<u32>
            = na::DMatrix::from_fn(2 * n, 2 * n, |i, j| {
                if j < n {
                    u32::from(self.xs[(i, j)])
                } else {
                    u32::from(self.zs[(i, j - n)])
                }
            });
        let skew: na::DMatrix<u32>
            = na::DMatrix::from_fn(2 * n, 2 * n, |i, j| {
                u32::from(j == (i + n) % (2 * n))
            });
        let prod: na::DMatrix<u32>
            = (table.transpose() * &skew * &table).map(|v| v % 2);
        prod == skew
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pauli(s: &str) -> PauliString { s.parse().unwrap() }

    #[test]
    fn phase_table_matches_closed_form() {
        // g(x1, z1, x2, z2) with the source operand first
        fn g(x1: bool, z1: bool, x2: bool, z2: bool) -> i32 {
            let (x2, z2) = (i32::from(x2), i32::from(z2));
            match (x1, z1) {
                (false, false) => 0,
                (true,  true ) => z2 - x2,
                (true,  false) => z2 * (2 * x2 - 1),
                (false, true ) => x2 * (1 - 2 * z2),
            }
        }
        let bits = [false, true];
        for &x1 in &bits { for &z1 in &bits {
            for &x2 in &bits { for &z2 in &bits {
                assert_eq!(
                    i32::from(phase_exp(x1, z1, x2, z2)),
                    g(x1, z1, x2, z2).rem_euclid(4),
                    "g({x1}, {z1}, {x2}, {z2})",
                );
            }}
        }}
    }

    #[test]
    fn initial_layout() {
        let tab = Tableau::zero(3).unwrap();
        assert_eq!(tab.num_qubits(), 3);
        assert_eq!(tab.xs().shape(), (6, 3));
        assert_eq!(tab.zs().shape(), (6, 3));
        assert_eq!(tab.rs().len(), 6);
        for i in 0..3 {
            for k in 0..3 {
                assert_eq!(tab.xs()[(i, k)], i == k);
                assert!(!tab.zs()[(i, k)]);
                assert!(!tab.xs()[(3 + i, k)]);
                assert_eq!(tab.zs()[(3 + i, k)], i == k);
            }
        }
        assert!(tab.rs().iter().all(|r| !r));
        assert_eq!(tab.stabilizers(), vec![pauli("+ZII"), pauli("+IZI"), pauli("+IIZ")]);
        assert_eq!(tab.destabilizers(), vec![pauli("+XII"), pauli("+IXI"), pauli("+IIX")]);
    }

    #[test]
    fn initial_state_is_big_endian() {
        let tab = Tableau::new(3, 0b110).unwrap();
        let signs: Vec<bool> = tab.rs().iter().copied().collect();
        assert_eq!(signs, vec![false, false, false, true, true, false]);
        assert_eq!(tab.stabilizers()[0], pauli("-ZII"));
        assert_eq!(tab.stabilizers()[2], pauli("+IIZ"));
    }

    #[test]
    fn initial_state_must_fit() {
        assert!(Tableau::new(2, 3).is_ok());
        assert_eq!(
            Tableau::new(2, 4),
            Err(TableauError::InvalidInitialState { state: 4, n: 2 }),
        );
        assert_eq!(Tableau::new(0, 0), Err(TableauError::NoQubits));
        let wide = Tableau::new(64, u64::MAX).unwrap();
        assert!(wide.rs().iter().skip(64).all(|r| *r));
        let wider = Tableau::new(70, 1).unwrap();
        assert!(wider.rs()[2 * 70 - 1]);
        assert_eq!(wider.rs().iter().filter(|r| **r).count(), 1);
    }

    #[test]
    fn qubit_count_must_be_addressable() {
        for n in [usize::MAX, usize::MAX / 2 + 1, usize::MAX / 3] {
            assert_eq!(Tableau::new(n, 0), Err(TableauError::TooManyQubits { n }));
        }
    }

    #[test]
    fn setters_reject_wrong_shapes() {
        let mut tab = Tableau::zero(2).unwrap();
        let err = tab.set_xs(na::DMatrix::from_element(3, 2, false)).unwrap_err();
        assert_eq!(
            err,
            TableauError::ShapeMismatch {
                field: "xs",
                expected: vec![4, 2],
                found: vec![3, 2],
            },
        );
        assert!(tab.set_zs(na::DMatrix::from_element(4, 3, false)).is_err());
        assert!(tab.set_rs(na::DVector::from_element(5, false)).is_err());
        assert_eq!(tab, Tableau::zero(2).unwrap());

        let mut rs = tab.rs().clone();
        rs[3] = true;
        tab.set_rs(rs).unwrap();
        assert_eq!(tab, Tableau::new(2, 1).unwrap());
    }

    #[test]
    fn rowsum_multiplies_stabilizers() {
        let mut tab = Tableau::zero(2).unwrap();
        tab.rowsum(2, 3).unwrap();
        assert_eq!(tab.row_to_pauli(2).unwrap(), pauli("+ZZ"));

        let mut tab = Tableau::new(2, 0b01).unwrap();
        tab.rowsum(2, 3).unwrap();
        assert_eq!(tab.row_to_pauli(2).unwrap(), pauli("-ZZ"));
        tab.rowsum(2, 3).unwrap();
        assert_eq!(tab.row_to_pauli(2).unwrap(), pauli("+ZI"));
    }

    #[test]
    fn rowsum_twice_restores_paulis_but_not_sign() {
        let mut tab = Tableau::zero(1).unwrap();
        tab.rowsum(0, 1).unwrap();
        assert_eq!(tab.row_to_pauli(0).unwrap(), pauli("-Y"));
        tab.rowsum(0, 1).unwrap();
        let row = tab.row_to_pauli(0).unwrap();
        assert_eq!(row.ops, vec![Pauli::X]);
        assert_eq!(row.sign, Sign::Minus);
        assert_eq!(tab.row_to_pauli(1).unwrap(), pauli("+Z"));
    }

    #[test]
    fn rowsum_with_itself_gives_identity() {
        let mut tab = Tableau::new(2, 0b11).unwrap();
        tab.rowsum(3, 3).unwrap();
        assert_eq!(tab.row_to_pauli(3).unwrap(), pauli("+II"));
    }

    #[test]
    fn rows_are_bounds_checked() {
        let mut tab = Tableau::zero(2).unwrap();
        assert_eq!(
            tab.rowsum(4, 0).unwrap_err(),
            TableauError::RowOutOfBounds { row: 4, rows: 4 },
        );
        assert!(tab.rowsum(0, 4).is_err());
        assert!(tab.row_copy(0, 4).is_err());
        assert!(tab.row_swap(5, 0).is_err());
        assert!(tab.flip_sign(4).is_err());
        assert!(tab.row_to_pauli(4).is_err());
        assert!(tab.set_row(1, &pauli("+XYZ")).is_err());
        assert_eq!(tab, Tableau::zero(2).unwrap());
    }

    #[test]
    fn row_mutators() {
        let mut tab = Tableau::zero(2).unwrap();
        tab.row_swap(0, 2).unwrap();
        assert_eq!(tab.row_to_pauli(0).unwrap(), pauli("+ZI"));
        assert_eq!(tab.row_to_pauli(2).unwrap(), pauli("+XI"));
        assert!(tab.validate());

        tab.flip_sign(3).unwrap();
        assert_eq!(tab.row_to_pauli(3).unwrap(), pauli("-IZ"));
        tab.set_sign(3, false).unwrap();
        assert_eq!(tab.row_to_pauli(3).unwrap(), pauli("+IZ"));

        tab.set_row(1, &pauli("-YX")).unwrap();
        assert_eq!(tab.row_to_pauli(1).unwrap(), pauli("-YX"));
        tab.row_copy(1, 0).unwrap();
        assert_eq!(tab.row_to_pauli(0).unwrap(), pauli("-YX"));
    }

    #[test]
    fn validate_detects_broken_commutation() {
        let mut tab = Tableau::new(3, 5).unwrap();
        assert!(tab.validate());
        // Z0 Z1 as a stabilizer now anticommutes with destabilizer X1
        tab.set_row(3, &pauli("+ZZI")).unwrap();
        assert!(!tab.validate());
    }

    #[test]
    fn clone_is_independent() {
        let tab = Tableau::zero(2).unwrap();
        let mut copy = tab.clone();
        assert_eq!(copy, tab);
        copy.flip_sign(2).unwrap();
        assert_ne!(copy, tab);
        assert_eq!(tab.row_to_pauli(2).unwrap(), pauli("+ZI"));
    }

    #[test]
    fn debug_lists_generators() {
        let tab = Tableau::new(1, 1).unwrap();
        assert_eq!(
            format!("{:?}", tab),
            r#"Tableau { n: 1, stabilizers: ["-Z"], destabilizers: ["+X"] }"#,
        );
    }
}
