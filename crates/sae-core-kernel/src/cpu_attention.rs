use crate::cpu_gram::gram_arr_f64;
use crate::cpu_inspect::{entropy, l2_norm};
use crate::cpu_matmul::matmul_arr_f64;
use crate::cpu_softmax::softmax_rows_inplace_f64;
use log::trace;

/// Everything one unscaled self-attention pass produces.
/// All buffers are row-major.
#[derive(Debug, Clone)]
pub struct SelfAttention {
    pub n: usize,
    pub d: usize,
    /// G = V · Vᵀ, `n x n`
    pub gram: Vec<f64>,
    /// A = softmax_rows(G), `n x n`
    pub weights: Vec<f64>,
    /// X = A · V, `n x d`
    pub output: Vec<f64>,
}

impl SelfAttention {
    pub fn weight_row(&self, r: usize) -> &[f64] {
        &self.weights[r * self.n..(r + 1) * self.n]
    }

    /// Column `c` of X, one value per sample.
    pub fn output_column(&self, c: usize) -> Vec<f64> {
        self.output.iter().skip(c).step_by(self.d).copied().collect()
    }
}

/// Self-attention with the vector set acting as its own queries, keys and
/// values: no projections, no 1/sqrt(d) scaling.
// 1. V ⋅ Vᵀ → scores (Gram)
// 2. softmax each row
// 3. weights ⋅ V → output
///
/// Inputs are expected to be non-negative; that is not checked here.
pub fn self_attention_forward(v: &[f64], n: usize, d: usize) -> anyhow::Result<SelfAttention> {
    if v.len() != n * d {
        anyhow::bail!(
            "[kernel][attention] vector set has {} values, expected {} x {}",
            v.len(),
            n,
            d
        );
    }

    // Step 1: Gram matrix
    let mut gram = vec![0.0; n * n];
    gram_arr_f64(v, &mut gram, n, d)?;

    // Step 2: row-wise softmax on a copy; the eigen pass needs G untouched
    let mut weights = gram.clone();
    softmax_rows_inplace_f64(&mut weights, n, n)?;

    // Step 3: weighted sum of the vectors
    let mut output = vec![0.0; n * d];
    matmul_arr_f64(&weights, v, &mut output, n, n, d)?;

    Ok(SelfAttention {
        n,
        d,
        gram,
        weights,
        output,
    })
}

/*
 * [TRACE] attention mean row entropy = 0.0421 (uniform = 5.0106)
 * [TRACE] attention output norm = 112.3120
 *
 * entropy ≈ 0 → each sample attends almost only to the largest-norm samples
 * entropy ≈ ln(n) → scores are flat, output collapses to the mean vector
 **/
pub fn attention_diagnostics(attn: &SelfAttention) {
    if attn.n == 0 {
        return;
    }

    let mean_entropy =
        (0..attn.n).map(|r| entropy(attn.weight_row(r))).sum::<f64>() / attn.n as f64;

    trace!(
        "[TRACE] attention mean row entropy = {:.4} (uniform = {:.4})",
        mean_entropy,
        (attn.n as f64).ln()
    );
    trace!("[TRACE] attention output norm = {:.4}", l2_norm(&attn.output));
}
