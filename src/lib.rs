//! Online maintenance of active-set Gram-matrix inverses.
//!
//! Active-set and homotopy-style sparse recovery solvers (LASSO-homotopy,
//! basis-pursuit path methods) add or remove one column of a fixed
//! reference matrix per iteration, and need the inverse of the Gram matrix
//! of the currently-active columns to solve a small linear system at every
//! step. Recomputing that inverse from scratch is cubic in the active-set
//! size; [`crate::gram_inverse::GramInverse`] instead maintains it with
//! rank-1 bordering updates and downdates, keeping the active columns
//! sorted by their original column index throughout.
//!
//! The supporting in-place data movement (row/column rotation, growing and
//! shrinking of flat square buffers) lives in [`crate::square_utils`].

#![allow(dead_code)]
#![allow(non_snake_case)]
#![allow(unused_imports)]
#![allow(unused_parens)]

#[macro_use] extern crate log;
pub mod params;
pub mod linalg_utils;
pub mod square_utils;
pub mod gram_inverse;
pub mod test_utils;
