// 1. Softmax Entropy
// If attention rows are too peaky -> every sample attends to one neighbour
// If entropy ≈ ln(n) -> row is uniform, similarity structure carries no signal
pub fn entropy(p: &[f64]) -> f64 {
    p.iter()
        .copied()
        .filter(|&x| x > 0.0)
        .map(|x| -x * x.ln())
        .sum()
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum::<f64>()
}

// 2. Norms
// Use on attention output columns and eigenvector magnitudes
pub fn l2_norm(vec: &[f64]) -> f64 {
    dot(vec, vec).sqrt()
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either side has zero squared norm; this is a defined
/// result, not an error. Lengths must match (checked in debug builds only,
/// extra trailing elements of the longer slice are ignored otherwise).
pub fn cosine_sim(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "cosine_sim: length mismatch");

    let ab = dot(a, b);
    let aa = dot(a, a);
    let bb = dot(b, b);
    if aa <= 0.0 || bb <= 0.0 {
        return 0.0;
    }

    // rounding can push |ab| a hair past sqrt(aa * bb)
    (ab / (aa.sqrt() * bb.sqrt())).clamp(-1.0, 1.0)
}
