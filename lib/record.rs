//! Canonical serialized form of a [`Tableau`].
//!
//! A record holds the qubit count and the three generator arrays in the field
//! order `n`, `rs`, `xs`, `zs`, with matrices stored row-major. The scratch
//! row is not part of a record. `Tableau` (de)serializes through this type, so
//! any `serde` format works.

use log::debug;
use nalgebra as na;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ TabResult, TableauError },
    tableau::Tableau,
};

/// Plain-data dump of a tableau's generator rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableauRecord {
    pub n: usize,
    pub rs: Vec<bool>,
    pub xs: Vec<Vec<bool>>,
    pub zs: Vec<Vec<bool>>,
}

fn matrix_rows(m: &na::DMatrix<bool>) -> Vec<Vec<bool>> {
    m.row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

fn matrix_from_rows(
    field: &'static str,
    rows: &[Vec<bool>],
    nrows: usize,
    ncols: usize,
) -> TabResult<na::DMatrix<bool>>
{
    let mismatch = |found: Vec<usize>| TableauError::ShapeMismatch {
        field,
        expected: vec![nrows, ncols],
        found,
    };
    if rows.len() != nrows {
        let width = rows.first().map_or(0, Vec::len);
        return Err(mismatch(vec![rows.len(), width]));
    }
    if let Some(bad) = rows.iter().find(|row| row.len() != ncols) {
        return Err(mismatch(vec![nrows, bad.len()]));
    }
    Ok(na::DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

impl Tableau {
    /// Dump the generator rows to a [`TableauRecord`].
    pub fn to_record(&self) -> TableauRecord {
        TableauRecord {
            n: self.n,
            rs: self.rs.iter().copied().collect(),
            xs: matrix_rows(&self.xs),
            zs: matrix_rows(&self.zs),
        }
    }

    /// Rebuild a tableau from a [`TableauRecord`], checking every shape.
    ///
    /// All shapes are checked against `n` before anything is allocated, so a
    /// record claiming more qubits than its arrays hold fails cleanly.
    pub fn from_record(record: TableauRecord) -> TabResult<Self> {
        let n = record.n;
        if n == 0 { return Err(TableauError::NoQubits); }
        let rows = n.checked_mul(2)
            .filter(|rows| *rows == record.rs.len())
            .ok_or_else(|| TableauError::ShapeMismatch {
                field: "rs",
                expected: vec![n.saturating_mul(2)],
                found: vec![record.rs.len()],
            })?;
        let xs = matrix_from_rows("xs", &record.xs, rows, n)?;
        let zs = matrix_from_rows("zs", &record.zs, rows, n)?;
        let mut tab = Self::zero(n)?;
        tab.set_rs(na::DVector::from_vec(record.rs))?;
        tab.set_xs(xs)?;
        tab.set_zs(zs)?;
        debug!("rebuilt {}-qubit tableau from record", n);
        Ok(tab)
    }
}

impl From<&Tableau> for TableauRecord {
    fn from(tab: &Tableau) -> Self { tab.to_record() }
}

impl From<Tableau> for TableauRecord {
    fn from(tab: Tableau) -> Self { tab.to_record() }
}

impl TryFrom<TableauRecord> for Tableau {
    type Error = TableauError;

    fn try_from(record: TableauRecord) -> TabResult<Self> {
        Self::from_record(record)
    }
}
