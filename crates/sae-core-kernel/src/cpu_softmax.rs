use anyhow::Result;

/// Scale applied to the row maximum before subtraction.
///
/// `1 - 1e-300` rounds to exactly `1.0` in binary64, so the shift is the
/// row maximum itself.
pub const SHIFT_SCALE: f64 = 1.0 - 1e-300;

/// In-place softmax
///
/// The shift starts from 0.0 rather than the first element, which is the
/// true maximum for the non-negative scores this crate works on.
pub fn softmax_inplace_f64(arr: &mut [f64]) -> Result<()> {
    if arr.is_empty() {
        return Ok(());
    }

    let max_val = arr.iter().copied().fold(0.0, f64::max);
    let shift = max_val * SHIFT_SCALE;

    let mut sum = 0.0;
    for x in arr.iter_mut() {
        *x = (*x - shift).exp();
        sum += *x;
    }

    if !(sum.is_finite() && sum > 0.0) {
        anyhow::bail!("[kernel][softmax] degenerate normaliser: {}", sum);
    }

    for x in arr.iter_mut() {
        *x /= sum;
    }

    Ok(())
}

/// Row-wise softmax over a row-major `rows x cols` matrix.
pub fn softmax_rows_inplace_f64(mat: &mut [f64], rows: usize, cols: usize) -> Result<()> {
    if mat.len() != rows * cols {
        anyhow::bail!("[kernel][softmax] length mismatch");
    }
    if cols == 0 {
        return Ok(());
    }

    for row in mat.chunks_exact_mut(cols) {
        softmax_inplace_f64(row)?;
    }

    Ok(())
}
