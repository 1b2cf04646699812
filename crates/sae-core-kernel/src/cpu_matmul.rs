/// Naive CPU matmul on raw slices (f64), assumes row-major layout.
/// A: m x k, B: k x n, Output: m x n
pub fn matmul_arr_f64(
    a: &[f64],
    b: &[f64],
    out: &mut [f64],
    m: usize,
    k: usize,
    n: usize,
) -> anyhow::Result<()> {
    if a.len() != m * k || b.len() != k * n || out.len() != m * n {
        anyhow::bail!("Input/output length mismatch");
    }

    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a[i * k + p] * b[p * n + j];
            }
            out[i * n + j] = sum;
        }
    }

    Ok(())
}
