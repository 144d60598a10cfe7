//! Stabilizer states of qubit registers in the Aaronson-Gottesman tableau
//! representation, with single-qubit projective measurements.
//!
//! Only the tableau itself lives here: gate-level operations are the caller's
//! business, expressed through the row primitives on [`tableau::Tableau`].
//!
//! # Example
//! ```
//! use clifford_tableau::tableau::Tableau;
//! use rand::{ rngs::StdRng, SeedableRng };
//!
//! let mut rng = StdRng::seed_from_u64(10546);
//!
//! // ∣01⟩, big-endian
//! let mut tab = Tableau::new(2, 0b01).unwrap();
//! println!("{}", tab.as_group());
//! // +ZI | +XI
//! // -IZ | +IX
//!
//! // a Hadamard on qubit 0, as a row update done by the caller
//! tab.row_swap(0, 2).unwrap();
//! assert!(tab.validate());
//!
//! let outcome = tab.measure(0, &mut rng).unwrap();
//! assert!(!outcome.is_deterministic());
//! assert_eq!(tab.measure(1, &mut rng).unwrap().bit(), 1);
//! ```

pub mod error;
pub mod pauli;
pub mod tableau;
pub mod measure;
pub mod record;
pub mod render;
