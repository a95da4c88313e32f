//! GSW parameter derivation.
//!
//! Parameters are derived deterministically from a security parameter λ,
//! except for the safe prime `q`, which is sampled. In production, use a
//! lattice estimator for proper security parameter selection; λ here
//! chiefly controls the lattice dimension `n = 2^λ` and the bit length of
//! `q` (`2λ` bits), in keeping with the reference construction.

use rand::Rng;

use crate::error::GswError;
use crate::primes::generate_safe_prime;

/// Default homomorphic-depth hint, carried verbatim and not otherwise
/// consumed by the core operations.
pub const DEFAULT_DEPTH_HINT: u32 = 10;

/// Largest λ for which full-residue dot products of length `n` fit in an
/// `i128` accumulator without overflow.
///
/// `gen_public_key`'s `b_row` sum and `decrypt`'s `s · C` both accumulate
/// up to `n` terms, each a product of two full residues `< q`. With `q` a
/// `2λ`-bit prime and `n = 2^λ`, the worst-case running sum is bounded by
/// `n * q^2 < 2^λ * 2^(4λ) = 2^(5λ)`. `i128` holds magnitudes up to
/// `2^127`, so `5λ` must leave headroom under 127 for the running sum
/// (plus the discrete-Gaussian error term) to never overflow; `λ = 24`
/// gives `2^120`, a comfortable margin. This is distinct from (and
/// tighter than) the residues themselves, which are `u64` and fit any λ
/// up to 32; the limiting factor is the accumulator used to sum them, not
/// the residue width.
const MAX_LAMBDA: u32 = 24;

/// Immutable GSW/LWE parameter bundle derived from a security parameter λ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Lattice dimension, `n = 2^λ`.
    pub n: usize,
    /// Modulus: an odd safe prime of `2λ` bits.
    pub q: u64,
    /// Discrete Gaussian error scale, fixed-point in thousandths (1000 == 1.0).
    pub chi_scale_milli: u32,
    /// Ciphertext/public-key column count, `m = n * (floor(log2 q) + 1)`.
    pub m: usize,
    /// Gadget row length, `l = ceil(log2 q)`.
    pub l: usize,
    /// Expanded gadget dimension, `N = n * l`.
    pub capital_n: usize,
    /// Homomorphic depth hint, retained verbatim; not used by core operations.
    pub capital_l: u32,
}

impl Params {
    /// `chi_scale` as a float, for Gaussian error sampling.
    pub fn chi_scale(&self) -> f64 {
        self.chi_scale_milli as f64 / 1000.0
    }
}

/// `Setup(λ, L=10)`: derive the parameter bundle for security level λ.
///
/// `n = 2^λ`; `q` is a freshly sampled odd safe prime of `2λ` bits;
/// `chi_scale ≈ 1.0`; `l = ceil(log2 q)`; `m = n * (floor(log2 q) + 1)`;
/// `N = n * l`. `L` defaults to 10 and is retained verbatim.
///
/// This is the canonical `setup_params`: the source's hard-coded-λ=8
/// duplicate definition is not carried over (see DESIGN.md).
pub fn setup_params<R: Rng>(
    rng: &mut R,
    lambda: u32,
    capital_l: Option<u32>,
) -> Result<Params, GswError> {
    if lambda == 0 {
        return Err(GswError::InvalidParameter(
            "lambda must be positive".to_string(),
        ));
    }
    if lambda > MAX_LAMBDA {
        return Err(GswError::InvalidParameter(format!(
            "lambda too large for i128 dot-product accumulators: {lambda} (max {MAX_LAMBDA})"
        )));
    }
    let capital_l = capital_l.unwrap_or(DEFAULT_DEPTH_HINT);
    if capital_l == 0 {
        return Err(GswError::InvalidParameter(
            "L must be positive".to_string(),
        ));
    }

    let n = 1usize << lambda;
    let q = generate_safe_prime(rng, 2 * lambda);

    let floor_log2_q = (63 - q.leading_zeros()) as usize;
    let ceil_log2_q = if q.is_power_of_two() {
        floor_log2_q
    } else {
        floor_log2_q + 1
    };
    let l = ceil_log2_q;
    let m = n * (floor_log2_q + 1);
    let capital_n = n * l;

    if m != capital_n {
        return Err(GswError::InvalidParameter(format!(
            "m ({m}) and N ({capital_n}) disagree for q = {q}; expected equal for an odd prime q"
        )));
    }

    Ok(Params {
        n,
        q,
        chi_scale_milli: 1000,
        m,
        l,
        capital_n,
        capital_l,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn setup_lambda_seven_shapes() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let params = setup_params(&mut rng, 7, None).unwrap();
        assert_eq!(params.n, 128);
        assert_eq!(params.m, params.capital_n);
        assert_eq!(params.l, params.m / params.n);
        assert!(params.q % 2 == 1);
        assert_eq!(params.capital_l, DEFAULT_DEPTH_HINT);
    }

    #[test]
    fn rejects_zero_lambda() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(matches!(
            setup_params(&mut rng, 0, None),
            Err(GswError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_zero_depth_hint() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(matches!(
            setup_params(&mut rng, 4, Some(0)),
            Err(GswError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_lambda_beyond_accumulator_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(matches!(
            setup_params(&mut rng, MAX_LAMBDA + 1, None),
            Err(GswError::InvalidParameter(_))
        ));
    }
}
