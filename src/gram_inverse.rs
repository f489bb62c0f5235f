extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use num_traits::{Float, One, Zero};
use crate::params::*;
use crate::linalg_utils::*;
use crate::square_utils::*;

///Maintains the inverse of the Gram matrix `A_gamma^T A_gamma` formed by
///an active subset `gamma` of the columns of a fixed reference matrix `A`,
///updating it incrementally as single columns enter and leave the subset.
///
///The rows and columns of the maintained inverse are always ordered by
///ascending original column index, no matter the order of insertion, so
///callers address every operation by the column's index in `A`. A new
///column is first bordered onto the trailing row and column of the
///inverse with a Schur-complement rank-1 update, then rotated into its
///sorted position in place; removal mirrors this with a rank-1 downdate.
///
///The active columns of `A` are also cached row-wise (transposed) so
///updates never re-extract columns from the reference matrix.
pub struct GramInverse<'a, F : NdFloat> {
    ///Reference matrix
    a : ArrayView2<'a, F>,
    ///The active columns of `a`, each stored as a contiguous row
    a_sub_t : Vec<F>,
    ///The inverse of the Gram matrix of the active columns
    inv : Vec<F>,
    ///Number of active columns
    n_active : usize,
    ///Column membership flags, one per column of `a`
    indices : Vec<bool>
}

impl <'a, F : NdFloat> GramInverse<'a, F> {
    pub fn new(a : ArrayView2<'a, F>) -> GramInverse<'a, F> {
        let m = a.shape()[0];
        let n = a.shape()[1];
        GramInverse {
            a,
            a_sub_t : Vec::with_capacity(ACTIVE_RESERVE_COLUMNS * m),
            inv : Vec::with_capacity(ACTIVE_RESERVE_COLUMNS * ACTIVE_RESERVE_COLUMNS),
            n_active : 0,
            indices : vec![false; n]
        }
    }

    ///Inserts a column of the reference matrix into the maintained
    ///inverse. No-op if the column is already active. Returns a view
    ///of the updated inverse.
    pub fn insert(&mut self, col : usize) -> ArrayView2<F> {
        debug_assert!(col < self.indices.len());

        if (self.indices[col]) {
            return self.inverse();
        }

        if (self.n_active == 0) {
            //A single active column makes the Gram matrix a scalar,
            //its squared norm
            let v = self.a.column(col);
            let sq_norm = v.dot(&v);
            self.inv.push(F::one() / sq_norm);
            self.cache_column(col, 0);
        } else {
            let k = self.n_active;
            let v = self.a.column(col);

            //Gram products of the incoming column against the active
            //subset, through the old inverse
            let u1 = self.subset_transposed().dot(&v);
            let b = ArrayView::from_shape((k, k), &self.inv[..]).unwrap();
            let u2 = b.dot(&u1);

            //Schur complement of the bordered Gram matrix; becomes the
            //diagonal corner of the expanded inverse. Vanishes when the
            //incoming column is linearly dependent on the active span,
            //in which case the update is garbage
            let denom = v.dot(&v) - u1.dot(&u2);
            if (!denom.is_normal() || denom <= F::zero()) {
                warn!("Degenerate gram update for column {} (schur complement {})",
                      col, denom);
            }
            let d = F::one() / denom;

            //Grow the storage, then border the inverse with the new
            //column in the trailing position
            append_row_col(&mut self.inv, k, F::zero());
            let new_k = k + 1;
            for i in 0..k {
                let row_update = d * u2[[i,]];
                for j in 0..k {
                    self.inv[i * new_k + j] += row_update * u2[[j,]];
                }
                self.inv[i * new_k + k] = -row_update;
                self.inv[k * new_k + i] = -row_update;
            }
            self.inv[k * new_k + k] = d;

            //Rotate the new column into its sorted position
            let idx = self.insertion_index(col);
            shift_row_col(&mut self.inv, new_k, k, idx);
            self.cache_column(col, idx);
        }

        self.indices[col] = true;
        self.n_active += 1;

        self.inverse()
    }

    ///Removes a column of the reference matrix from the maintained
    ///inverse. No-op if the column is not active. Returns a view of
    ///the updated inverse.
    pub fn remove(&mut self, col : usize) -> ArrayView2<F> {
        debug_assert!(self.n_active > 0);
        debug_assert!(col < self.indices.len());

        if (!self.indices[col]) {
            return self.inverse();
        }

        if (self.n_active == 1) {
            self.inv.clear();
            self.a_sub_t.clear();
        } else {
            let k = self.n_active;
            let new_k = k - 1;
            let m = self.a.shape()[0];

            //Evict the cached column and rotate the departing column
            //out to the trailing border position
            let idx = self.insertion_index(col);
            self.a_sub_t.drain((idx * m)..((idx + 1) * m));
            shift_row_col(&mut self.inv, k, idx, new_k);

            let (d, u2) = {
                let inv_view = ArrayView::from_shape((k, k), &self.inv[..]).unwrap();
                let d = inv_view[[new_k, new_k]];

                //Recover the border of the bordered-inverse form from
                //the trailing column
                let scale = -(F::one() / d);
                let mut u2 : Array1<F> = Array::zeros((new_k,));
                for i in 0..new_k {
                    u2[[i,]] = scale * inv_view[[i, new_k]];
                }
                (d, u2)
            };

            //Shrink the storage, then apply the rank-1 downdate to the
            //surviving block
            drop_last_row_col(&mut self.inv, k);
            let mut inv_view = ArrayViewMut::from_shape((new_k, new_k),
                                                        self.inv.as_mut_slice()).unwrap();
            inv_view -= &(outer(u2.view(), u2.view()) * d);
        }

        self.indices[col] = false;
        self.n_active -= 1;

        self.inverse()
    }

    ///Inverts the membership of the given column of the reference
    ///matrix. Returns a view of the updated inverse.
    pub fn flip(&mut self, col : usize) -> ArrayView2<F> {
        debug_assert!(col < self.indices.len());
        if (self.indices[col]) {
            self.remove(col)
        } else {
            self.insert(col)
        }
    }

    ///Column membership flags, one per column of the reference matrix.
    pub fn indices(&self) -> &[bool] {
        &self.indices
    }

    ///Number of currently-active columns.
    pub fn active_count(&self) -> usize {
        self.n_active
    }

    ///Returns a view of the maintained inverse, with rows and columns
    ///ordered by ascending original column index of the active columns.
    ///Valid until the next insert/remove/flip.
    pub fn inverse(&self) -> ArrayView2<F> {
        ArrayView::from_shape((self.n_active, self.n_active), &self.inv[..]).unwrap()
    }

    ///View of the cached active columns, one column per row.
    fn subset_transposed(&self) -> ArrayView2<F> {
        let m = self.a.shape()[0];
        ArrayView::from_shape((self.n_active, m), &self.a_sub_t[..]).unwrap()
    }

    ///Position within the sorted active order that the given column
    ///of the reference matrix occupies (or would occupy on insertion).
    fn insertion_index(&self, col : usize) -> usize {
        debug_assert!(col < self.indices.len());

        let mut idx = 0;
        for i in 0..col {
            if (self.indices[i]) {
                idx += 1;
            }
        }
        idx
    }

    ///Copies column `col` of the reference matrix into the transposed
    ///subset cache at row `dest_row`, shifting later rows down.
    fn cache_column(&mut self, col : usize, dest_row : usize) {
        let m = self.a.shape()[0];
        let v = self.a.column(col);
        let at = dest_row * m;
        self.a_sub_t.splice(at..at, v.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_linalg::*;
    use ndarray_linalg::solveh::*;
    use rand::seq::SliceRandom;
    use crate::params::*;
    use crate::test_utils::*;

    fn direct_gram_inverse(a : &Array2<f32>, indices : &[bool]) -> Array2<f32> {
        let m = a.shape()[0];
        let active : Vec<usize> = (0..indices.len()).filter(|i| indices[*i]).collect();

        let mut a_gamma : Array2<f32> = Array::zeros((m, active.len()));
        for (pos, col) in active.iter().enumerate() {
            a_gamma.column_mut(pos).assign(&a.column(*col));
        }
        let gram = a_gamma.t().dot(&a_gamma);
        gram.invh().unwrap()
    }

    fn assert_matches_direct(gram : &GramInverse<f32>, a : &Array2<f32>) {
        let expected = direct_gram_inverse(a, gram.indices());
        let scale = 1.0f32 + frob_inner(expected.view(), expected.view()).sqrt();
        assert_equal_matrices(gram.inverse(), expected.view(), DEFAULT_TEST_THRESH * scale);
    }

    #[test]
    fn single_column_matches_squared_norm() {
        let a = random_matrix(8, 5);
        let mut gram = GramInverse::new(a.view());

        gram.insert(2);

        let v = a.column(2);
        let expected = 1.0f32 / v.dot(&v);
        let inv = gram.inverse();
        assert_eq!(inv.shape(), &[1, 1]);
        assert!((inv[[0, 0]] - expected).abs() < DEFAULT_TEST_THRESH);
    }

    #[test]
    fn insert_matches_direct_inverse() {
        let a = random_matrix(20, 6);
        let mut gram = GramInverse::new(a.view());

        for col in [3, 0, 5, 2].iter() {
            gram.insert(*col);
            assert_matches_direct(&gram, &a);
        }
        assert_eq!(gram.active_count(), 4);
    }

    #[test]
    fn remove_matches_direct_inverse() {
        let a = random_matrix(20, 6);
        let mut gram = GramInverse::new(a.view());

        for col in 0..5 {
            gram.insert(col);
        }
        gram.remove(2);
        assert_matches_direct(&gram, &a);

        gram.remove(4);
        assert_matches_direct(&gram, &a);
        assert_eq!(gram.active_count(), 3);
    }

    #[test]
    fn insert_then_remove_round_trips() {
        let a = random_matrix(20, 6);
        let mut gram = GramInverse::new(a.view());

        gram.insert(1);
        gram.insert(4);

        let inv_before = gram.inverse().to_owned();
        let indices_before = gram.indices().to_vec();

        gram.insert(2);
        gram.remove(2);

        assert_eq!(gram.active_count(), 2);
        assert_eq!(gram.indices(), &indices_before[..]);
        assert_equal_matrices(gram.inverse(), inv_before.view(), DEFAULT_TEST_THRESH);
    }

    #[test]
    fn insertion_order_is_irrelevant() {
        let a = random_matrix(20, 4);
        let orders = [[2, 0, 1], [0, 1, 2], [1, 2, 0],
                      [2, 1, 0], [0, 2, 1], [1, 0, 2]];

        for order in orders.iter() {
            let mut gram = GramInverse::new(a.view());
            for col in order.iter() {
                gram.insert(*col);
            }
            assert_matches_direct(&gram, &a);
        }
    }

    #[test]
    fn redundant_operations_leave_state_untouched() {
        let a = random_matrix(8, 5);
        let mut gram = GramInverse::new(a.view());

        gram.insert(3);
        gram.insert(1);

        let inv_snapshot = gram.inv.clone();
        let subset_snapshot = gram.a_sub_t.clone();

        gram.insert(3);
        assert_eq!(gram.inv, inv_snapshot);
        assert_eq!(gram.a_sub_t, subset_snapshot);
        assert_eq!(gram.active_count(), 2);

        gram.remove(0);
        assert_eq!(gram.inv, inv_snapshot);
        assert_eq!(gram.a_sub_t, subset_snapshot);
        assert_eq!(gram.active_count(), 2);
    }

    #[test]
    fn removing_last_column_empties_the_inverse() {
        let a = random_matrix(8, 5);
        let mut gram = GramInverse::new(a.view());

        gram.insert(4);
        gram.remove(4);

        assert_eq!(gram.active_count(), 0);
        assert_eq!(gram.inverse().shape(), &[0, 0]);
        assert_eq!(gram.indices(), &[false; 5][..]);
    }

    #[test]
    fn random_flip_walk_matches_direct_inverse() {
        let mut rng = rand::thread_rng();
        let a = random_matrix(16, 8);
        let mut gram = GramInverse::new(a.view());

        let mut cols : Vec<usize> = (0..8).collect();
        for _ in 0..4 {
            cols.shuffle(&mut rng);
            for col in cols.iter().take(5) {
                gram.flip(*col);
            }
            if (gram.active_count() > 0) {
                assert_matches_direct(&gram, &a);
            }
        }
    }

    #[test]
    fn double_precision_updates_match_direct_inverse() {
        let a : Array2<f64> = arr2(&[[2.0, 0.0, 1.0],
                                     [0.0, 3.0, 1.0],
                                     [0.0, 0.0, 1.0],
                                     [1.0, 1.0, 1.0]]);
        let mut gram = GramInverse::new(a.view());

        gram.insert(2);
        gram.insert(0);
        gram.insert(1);
        gram.remove(2);

        let mut a_gamma : Array2<f64> = Array::zeros((4, 2));
        a_gamma.column_mut(0).assign(&a.column(0));
        a_gamma.column_mut(1).assign(&a.column(1));
        let expected = a_gamma.t().dot(&a_gamma).invh().unwrap();

        assert_equal_matrices(gram.inverse(), expected.view(),
                              DEFAULT_TEST_THRESH_F64);
    }
}
