//! The gadget toolbox: modular matrix/vector primitives over Z_q.
//!
//! `BitDecomp`, `BitDecompInverse`, `Powerof2` and `Flatten` are the
//! bit-decomposition machinery that underpins GSW; `build_gadget`
//! constructs the block-diagonal gadget matrix G. The general
//! dot/matrix-vector/matrix-matrix helpers below them are the shared
//! linear algebra every other component (`keys`, `gsw`) is built on.

use crate::error::GswError;
use crate::modular::mod_q;
use crate::params::Params;

/// `dec_to_bin(x, len)`: little-endian (LSB-first) binary expansion of
/// `x mod 2^len`, as a length-`len` vector of 0/1 values.
pub fn dec_to_bin(x: u64, len: usize) -> Vec<u64> {
    (0..len).map(|i| (x >> i) & 1).collect()
}

/// `BitDecomp`: concatenate `dec_to_bin(v_i mod q, l)` for each `v_i`,
/// producing a vector of length `v.len() * l`.
pub fn bit_decomp(v: &[u64], params: &Params) -> Vec<u64> {
    let mut out = Vec::with_capacity(v.len() * params.l);
    for &vi in v {
        out.extend(dec_to_bin(vi % params.q, params.l));
    }
    out
}

/// `BitDecompInverse`: reconstruct a length-`u.len()/l` vector from a
/// bit-decomposed vector by summing `bit_j * 2^j` over each length-`l`
/// block, reduced mod q.
///
/// Requires `u.len()` to be a multiple of `l`; otherwise returns
/// `ShapeMismatch` rather than panicking.
pub fn bit_decomp_inverse(u: &[u64], params: &Params) -> Result<Vec<u64>, GswError> {
    let l = params.l;
    if u.len() % l != 0 {
        return Err(GswError::ShapeMismatch(format!(
            "BitDecompInverse input length {} is not a multiple of l = {l}",
            u.len()
        )));
    }
    Ok(u.chunks(l)
        .map(|block| {
            let sum: i128 = block
                .iter()
                .enumerate()
                .map(|(j, &bit)| (bit as i128) * (1i128 << j))
                .sum();
            mod_q(sum, params.q)
        })
        .collect())
}

/// `Powerof2`: expand each `v_i` into `(v_i, 2*v_i, ..., 2^(l-1)*v_i) mod q`.
pub fn powers_of_2(v: &[u64], params: &Params) -> Vec<u64> {
    let mut out = Vec::with_capacity(v.len() * params.l);
    for &vi in v {
        for j in 0..params.l {
            out.push(mod_q((vi as i128) << j, params.q));
        }
    }
    out
}

/// `Flatten = BitDecomp ∘ BitDecompInverse`: reduces a bit-shaped vector
/// back to canonical {0,1} form.
pub fn flatten(u: &[u64], params: &Params) -> Result<Vec<u64>, GswError> {
    Ok(bit_decomp(&bit_decomp_inverse(u, params)?, params))
}

/// Row-wise `BitDecomp` over a matrix.
pub fn bit_decomp_matrix(matrix: &[Vec<u64>], params: &Params) -> Vec<Vec<u64>> {
    matrix.iter().map(|row| bit_decomp(row, params)).collect()
}

/// Row-wise `BitDecompInverse` over a matrix.
pub fn bit_decomp_inverse_matrix(
    matrix: &[Vec<u64>],
    params: &Params,
) -> Result<Vec<Vec<u64>>, GswError> {
    matrix
        .iter()
        .map(|row| bit_decomp_inverse(row, params))
        .collect()
}

/// Row-wise `Flatten` over a matrix.
pub fn flatten_matrix(matrix: &[Vec<u64>], params: &Params) -> Result<Vec<Vec<u64>>, GswError> {
    matrix.iter().map(|row| flatten(row, params)).collect()
}

/// `build_gadget`: the n×N block-diagonal gadget matrix G, with n copies
/// of the row vector `g = (1, 2, 4, ..., 2^(l-1))` placed along the
/// diagonal and zero elsewhere.
pub fn build_gadget(params: &Params) -> Vec<Vec<u64>> {
    let mut g = vec![vec![0u64; params.capital_n]; params.n];
    for (i, row) in g.iter_mut().enumerate() {
        for j in 0..params.l {
            row[i * params.l + j] = 1u64 << j;
        }
    }
    g
}

/// Dot product of two equal-length vectors, reduced mod q.
pub fn dot(a: &[u64], b: &[u64], q: u64) -> u64 {
    assert_eq!(a.len(), b.len(), "dot: length mismatch");
    let sum: i128 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| x as i128 * y as i128)
        .sum();
    mod_q(sum, q)
}

/// Row-vector × matrix: `s · M`, where `s` has length `M.len()` (the
/// matrix's row count) and the result has length `M[0].len()`.
pub fn vec_mat_mul(s: &[u64], m: &[Vec<u64>], q: u64) -> Vec<u64> {
    assert_eq!(s.len(), m.len(), "vec_mat_mul: dimension mismatch");
    let cols = m.first().map_or(0, |row| row.len());
    (0..cols)
        .map(|j| {
            let sum: i128 = s
                .iter()
                .zip(m)
                .map(|(&si, row)| si as i128 * row[j] as i128)
                .sum();
            mod_q(sum, q)
        })
        .collect()
}

/// Matrix × matrix: `A * B`, both reduced mod q.
pub fn mat_mul(a: &[Vec<u64>], b: &[Vec<u64>], q: u64) -> Vec<Vec<u64>> {
    let inner = b.len();
    let cols = b.first().map_or(0, |row| row.len());
    a.iter()
        .map(|row_a| {
            assert_eq!(row_a.len(), inner, "mat_mul: dimension mismatch");
            (0..cols)
                .map(|j| {
                    let sum: i128 = (0..inner)
                        .map(|k| row_a[k] as i128 * b[k][j] as i128)
                        .sum();
                    mod_q(sum, q)
                })
                .collect()
        })
        .collect()
}

/// Elementwise matrix addition mod q.
pub fn mat_add(a: &[Vec<u64>], b: &[Vec<u64>], q: u64) -> Vec<Vec<u64>> {
    assert_eq!(a.len(), b.len(), "mat_add: row count mismatch");
    a.iter()
        .zip(b)
        .map(|(row_a, row_b)| {
            assert_eq!(row_a.len(), row_b.len(), "mat_add: column count mismatch");
            row_a
                .iter()
                .zip(row_b)
                .map(|(&x, &y)| mod_q(x as i128 + y as i128, q))
                .collect()
        })
        .collect()
}

/// Scalar × matrix, reduced mod q.
pub fn mat_scalar_mul(a: &[Vec<u64>], k: u64, q: u64) -> Vec<Vec<u64>> {
    a.iter()
        .map(|row| {
            row.iter()
                .map(|&x| mod_q(x as i128 * k as i128, q))
                .collect()
        })
        .collect()
}
