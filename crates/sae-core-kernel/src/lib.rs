//! Raw-slice `f64` kernels for unscaled self-attention over a vector set and
//! for the eigen-analysis of its Gram matrix. Matrices are row-major with
//! their dimensions passed alongside.

pub mod cpu_attention;
pub mod cpu_eigen;
pub mod cpu_gram;
pub mod cpu_inspect;
pub mod cpu_matmul;
pub mod cpu_softmax;

pub use cpu_attention::{SelfAttention, attention_diagnostics, self_attention_forward};
pub use cpu_eigen::{EigenError, Principal, SymmetricEigen, principal_eigenvector_magnitudes};
pub use cpu_inspect::cosine_sim;
