use super::{FloatT, MatrixError};

// checks shared by all matvec implementations.  `b` is the output
// and must have length nrows, `x` the input with length ncols.
pub(crate) fn check_matvec_dims<T: FloatT>(
    b: &[T],
    x: &[T],
    nrows: usize,
    ncols: usize,
) -> Result<(), MatrixError> {
    if x.len() != ncols {
        return Err(MatrixError::SizeMismatch {
            expected: ncols,
            found: x.len(),
        });
    }
    if b.len() != nrows {
        return Err(MatrixError::SizeMismatch {
            expected: nrows,
            found: b.len(),
        });
    }
    Ok(())
}

// Allocate a vector of `len` copies of `fill`, reporting failure
// rather than aborting.  `limit` caps the number of entries that
// any single packed array may request.
pub(crate) fn try_alloc<V: Clone>(len: usize, fill: V, limit: usize) -> Result<Vec<V>, MatrixError> {
    if len > limit {
        return Err(MatrixError::AllocationFailure { requested: len });
    }
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| MatrixError::AllocationFailure { requested: len })?;
    v.resize(len, fill);
    Ok(v)
}

// running sum in place, e.g. [0,2,1,3] -> [0,2,3,6].
// Used for building row and diagonal pointers from counts.
pub(crate) fn cumsum(v: &mut [usize]) {
    let mut acc = 0;
    for x in v.iter_mut() {
        acc += *x;
        *x = acc;
    }
}
