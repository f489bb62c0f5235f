extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use ndarray_linalg::*;
use num_traits::{Float, Zero};

///Computes the outer product `ab^T` of vectors `a` and `b`.
pub fn outer<F : NdFloat>(a : ArrayView1<F>, b : ArrayView1<F>) -> Array2<F> {
    let a_column = into_col(a.to_owned());
    let b_row = into_row(b.to_owned());
    a_column.dot(&b_row)
}

///Computes the Frobenius inner product of two matrices, which
///is the same as computing the dot product of the vectorized matrices.
pub fn frob_inner<F : NdFloat>(a : ArrayView2<F>, b : ArrayView2<F>) -> F {
    let mut result = F::zero();
    for (x, y) in a.iter().zip(b.iter()) {
        result += *x * *y;
    }
    result
}

///Computes the Frobenius distance between two matrices.
pub fn frob_dist<F : NdFloat>(a : ArrayView2<F>, b : ArrayView2<F>) -> F {
    let diff = &a - &b;
    frob_inner(diff.view(), diff.view()).sqrt()
}
