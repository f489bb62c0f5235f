//! In-place manipulation of square matrices held in flat, row-major
//! buffers. These are the data-movement kernels behind the online
//! Gram-inverse updates: rotating a row/column pair to a new position,
//! and growing or shrinking a buffer by one trailing row and column.

///Rotates row `src` and column `src` of the `n x n` matrix in `buf`
///to position `dest`, shifting every row and column strictly between
///the two positions by one slot in the opposite direction. Equivalent
///to deleting row/column `src` and re-inserting it at `dest`. Row and
///column movement is interleaved in a single pass over the buffer,
///with no scratch allocation. Applying with `(src, dest)` and then
///`(dest, src)` restores the buffer exactly.
pub fn shift_row_col<F : Copy>(buf : &mut [F], n : usize, src : usize, dest : usize) {
    debug_assert!(buf.len() >= n * n);
    debug_assert!(src < n);
    debug_assert!(dest < n);

    if (n == 1 || src == dest) {
        return;
    }

    if (dest > src) {
        //Traverse forwards
        let mut i = 0;
        for m in 0..n {
            //Row rotation
            if (m >= src && m < dest) {
                for j in i..(i + n) {
                    buf.swap(j, j + n);
                }
            }

            //Move to the src column
            i += src;

            //Column rotation
            for _ in src..dest {
                buf.swap(i, i + 1);
                i += 1;
            }

            //Move to the next row
            i += n - dest;
        }
    } else {
        //Traverse backwards; cursor arithmetic is signed since the
        //cursor lands on -1 after the final row
        let n_i = n as isize;
        let mut i = n_i * n_i - 1;
        for m in (0..n).rev() {
            //Row rotation
            if (m <= src && m > dest) {
                let row_start = i - n_i + 1;
                let mut j = i;
                while (j >= row_start) {
                    buf.swap(j as usize, (j - n_i) as usize);
                    j -= 1;
                }
            }

            //Move to the src column
            i -= (n_i - 1) - (src as isize);

            //Column rotation
            for _ in dest..src {
                buf.swap(i as usize, (i - 1) as usize);
                i -= 1;
            }

            //Move to the next row
            i -= (dest as isize) + 1;
        }
    }
}

///Grows the `n x n` matrix in `buf` to `(n + 1) x (n + 1)` in place,
///preserving the existing matrix as the top-left block and filling the
///new trailing row and column with `fill`.
pub fn append_row_col<F : Copy>(buf : &mut Vec<F>, n : usize, fill : F) {
    debug_assert!(buf.len() == n * n);

    let new_n = n + 1;
    buf.resize(new_n * new_n, fill);

    //Shift rows into their widened positions, last row first so that
    //unmoved rows are never clobbered
    for r in (1..n).rev() {
        buf.copy_within((r * n)..(r * n + n), r * new_n);
    }

    //The resize already filled the trailing row; the trailing column
    //entries still hold stale row remnants
    for r in 0..n {
        buf[r * new_n + n] = fill;
    }
}

///Shrinks the `n x n` matrix in `buf` to `(n - 1) x (n - 1)` in place,
///keeping the top-left block and discarding the trailing row and column.
pub fn drop_last_row_col<F : Copy>(buf : &mut Vec<F>, n : usize) {
    debug_assert!(n > 0);
    debug_assert!(buf.len() == n * n);

    let new_n = n - 1;
    for r in 1..new_n {
        buf.copy_within((r * n)..(r * n + new_n), r * new_n);
    }
    buf.truncate(new_n * new_n);
}
