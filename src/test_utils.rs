extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use crate::linalg_utils::*;

pub fn assert_equal_matrices<F : NdFloat>(one : ArrayView2<F>, two : ArrayView2<F>,
                                          thresh : F) {
    let dist = frob_dist(one, two);
    if (dist > thresh) {
        panic!("matrices differ by frobenius distance {}", dist);
    }
}

pub fn random_matrix(t : usize, s : usize) -> Array2<f32> {
    Array::random((t, s), StandardNormal)
}
