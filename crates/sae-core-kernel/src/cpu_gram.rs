/// Gram matrix G = V · Vᵀ of a row-major `n x d` vector set.
///
/// Only the upper triangle is computed; the lower triangle is mirrored so
/// that `G[i][j] == G[j][i]` holds bit-for-bit.
pub fn gram_arr_f64(v: &[f64], out: &mut [f64], n: usize, d: usize) -> anyhow::Result<()> {
    if v.len() != n * d || out.len() != n * n {
        anyhow::bail!(
            "[kernel][gram] length mismatch: v={} (want {}), out={} (want {})",
            v.len(),
            n * d,
            out.len(),
            n * n
        );
    }

    for i in 0..n {
        let vi = &v[i * d..(i + 1) * d];
        for j in i..n {
            let vj = &v[j * d..(j + 1) * d];
            let mut sum = 0.0;
            for c in 0..d {
                sum += vi[c] * vj[c];
            }
            out[i * n + j] = sum;
            out[j * n + i] = sum;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_matmul::matmul_arr_f64;
    use proptest::prelude::*;

    #[test]
    fn test_gram_matches_matmul_with_transpose() {
        // 3 vectors of dim 2
        let v = [1.0, 2.0, 0.0, 3.0, 4.0, 1.0];
        let vt = [1.0, 0.0, 4.0, 2.0, 3.0, 1.0];

        let mut g = vec![0.0; 9];
        gram_arr_f64(&v, &mut g, 3, 2).unwrap();

        let mut expected = vec![0.0; 9];
        matmul_arr_f64(&v, &vt, &mut expected, 3, 2, 3).unwrap();

        assert_eq!(g, expected);
        assert_eq!(g[0], 5.0);
        assert_eq!(g[5], 3.0); // G[1][2]
    }

    #[test]
    fn test_gram_length_mismatch() {
        let v = [1.0, 2.0, 3.0];
        let mut g = vec![0.0; 4];
        assert!(gram_arr_f64(&v, &mut g, 2, 2).is_err());
    }

    proptest! {
        #[test]
        fn prop_gram_symmetric_nonneg_diagonal(
            (n, d, v) in (1usize..12, 1usize..6).prop_flat_map(|(n, d)| {
                (Just(n), Just(d), prop::collection::vec(0.0f64..10.0, n * d))
            })
        ) {
            let mut g = vec![0.0; n * n];
            gram_arr_f64(&v, &mut g, n, d).unwrap();
            for i in 0..n {
                prop_assert!(g[i * n + i] >= 0.0);
                for j in 0..n {
                    prop_assert_eq!(g[i * n + j], g[j * n + i]);
                }
            }
        }
    }
}
