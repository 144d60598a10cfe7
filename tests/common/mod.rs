//! Caller-side Clifford updates, written only against the public tableau
//! accessors the way an external circuit simulator would.

#![allow(dead_code)]

use clifford_tableau::tableau::Tableau;
use rand::Rng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// apply `f(x, z, r)` to the (x, z) entries of qubit `k` on every row
fn update_column<F>(tab: &mut Tableau, k: usize, mut f: F)
where F: FnMut(&mut bool, &mut bool, &mut bool)
{
    let mut xs = tab.xs().clone();
    let mut zs = tab.zs().clone();
    let mut rs = tab.rs().clone();
    for i in 0..2 * tab.num_qubits() {
        let (mut x, mut z, mut r) = (xs[(i, k)], zs[(i, k)], rs[i]);
        f(&mut x, &mut z, &mut r);
        xs[(i, k)] = x;
        zs[(i, k)] = z;
        rs[i] = r;
    }
    tab.set_xs(xs).unwrap();
    tab.set_zs(zs).unwrap();
    tab.set_rs(rs).unwrap();
}

pub fn h(tab: &mut Tableau, k: usize) {
    update_column(tab, k, |x, z, r| {
        *r ^= *x && *z;
        std::mem::swap(x, z);
    });
}

pub fn s(tab: &mut Tableau, k: usize) {
    update_column(tab, k, |x, z, r| {
        *r ^= *x && *z;
        *z ^= *x;
    });
}

// Pauli X as plain sign flips on every row with a Z-part on qubit `k`
pub fn x(tab: &mut Tableau, k: usize) {
    for i in 0..2 * tab.num_qubits() {
        if tab.zs()[(i, k)] { tab.flip_sign(i).unwrap(); }
    }
}

pub fn cnot(tab: &mut Tableau, a: usize, b: usize) {
    let mut xs = tab.xs().clone();
    let mut zs = tab.zs().clone();
    let mut rs = tab.rs().clone();
    for i in 0..2 * tab.num_qubits() {
        let (xa, za) = (xs[(i, a)], zs[(i, a)]);
        let (xb, zb) = (xs[(i, b)], zs[(i, b)]);
        rs[i] ^= xa && zb && (xb == za);
        xs[(i, b)] = xb ^ xa;
        zs[(i, a)] = za ^ zb;
    }
    tab.set_xs(xs).unwrap();
    tab.set_zs(zs).unwrap();
    tab.set_rs(rs).unwrap();
}

/// Apply `depth` random gates from {H, S, X, CNOT}.
pub fn random_clifford<R>(tab: &mut Tableau, depth: usize, rng: &mut R)
where R: Rng + ?Sized
{
    let n = tab.num_qubits();
    for _ in 0..depth {
        let a = rng.gen_range(0..n);
        match rng.gen_range(0..4) {
            0 => h(tab, a),
            1 => s(tab, a),
            2 => x(tab, a),
            _ if n > 1 => {
                let b = (a + rng.gen_range(1..n)) % n;
                cnot(tab, a, b);
            },
            _ => h(tab, a),
        }
    }
}
