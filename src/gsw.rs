//! Cipher: encryption, decryption, and the homomorphic operations.

use indexmap::IndexMap;
use rand::Rng;

use crate::error::GswError;
use crate::gadget::{build_gadget, mat_add, mat_mul, mat_scalar_mul, powers_of_2, vec_mat_mul};
use crate::keys::{PublicKey, SecretKey};
use crate::modular::{centered_magnitude, mod_q};
use crate::params::Params;

/// A GSW ciphertext: an n×m matrix over Z_q, semantically encrypting a
/// single plaintext integer under one `(Params, PublicKey)` pair.
pub type Ciphertext = Vec<Vec<u64>>;

fn check_ciphertext_shape(c: &Ciphertext, params: &Params) -> Result<(), GswError> {
    if c.len() != params.n || c.iter().any(|row| row.len() != params.m) {
        return Err(GswError::ShapeMismatch(format!(
            "ciphertext must be {}x{}",
            params.n, params.m
        )));
    }
    Ok(())
}

/// `Encrypt(params, pk, μ)`: sample a random binary m×m matrix R, and
/// return `C = (μ·G + A·R) mod q`, where G is the gadget matrix.
///
/// Plaintexts must satisfy `0 <= μ <= 2n` (the documented tolerance
/// range); values above that are rejected with `DomainViolation` rather
/// than silently wrapping.
pub fn encrypt<R: Rng>(
    rng: &mut R,
    params: &Params,
    pk: &PublicKey,
    mu: u64,
) -> Result<Ciphertext, GswError> {
    if mu > 2 * params.n as u64 {
        return Err(GswError::DomainViolation(format!(
            "plaintext {mu} exceeds the 2n = {} tolerance range",
            2 * params.n
        )));
    }
    if pk.a.len() != params.n || pk.a.iter().any(|row| row.len() != params.m) {
        return Err(GswError::ShapeMismatch(format!(
            "public key must be {}x{}",
            params.n, params.m
        )));
    }

    let r: Vec<Vec<u64>> = (0..params.m)
        .map(|_| (0..params.m).map(|_| rng.gen_range(0u64..=1)).collect())
        .collect();

    let g = build_gadget(params);
    let scaled_g = mat_scalar_mul(&g, mu, params.q);
    let a_r = mat_mul(&pk.a, &r, params.q);

    Ok(mat_add(&scaled_g, &a_r, params.q))
}

/// `Decrypt(params, sk, C)`: recover the plaintext via a mode-then-
/// minimum-distance estimator.
///
/// 1. `w = s · C mod q`.
/// 2. `g = Powerof2(s) mod q` (recomputed; equals `sk.v`).
/// 3. `d_i = round(w_i / g_i)` for each `i` (real-valued rounding; entries
///    with `g_i == 0` are excluded from the tally but still contribute to
///    the distance computation below).
/// 4. Tally unique values of `d` by descending frequency, ties broken by
///    first-appearance order.
/// 5. For each candidate μ in that order, compute the centered squared
///    distance `D(μ) = Σ min(r_i, q - r_i)^2` where `r = (w - μ·g) mod q`;
///    keep the μ with smallest `D`, ties won by the earlier (higher
///    frequency) candidate.
///
/// Never raises on noise: always returns a best-effort integer, which may
/// be wrong if noise exceeds the scheme's tolerance. Returns `i64` (not
/// `u64`) since, under heavy noise, the estimator can settle on a negative
/// candidate (see DESIGN.md).
///
/// A malformed `ct` (wrong shape for `params`) is a precondition
/// violation, not noise; since this signature matches spec.md §6's plain
/// `int` return rather than `Result`, that case panics with a clear
/// message instead of reaching the bare `assert_eq!` inside
/// `vec_mat_mul`, keeping the defensive posture consistent with
/// `add`/`const_mult`.
pub fn decrypt(params: &Params, sk: &SecretKey, ct: &Ciphertext) -> i64 {
    if let Err(err) = check_ciphertext_shape(ct, params) {
        panic!("decrypt: {err}");
    }
    let w = vec_mat_mul(&sk.s, ct, params.q);
    let g = powers_of_2(&sk.s, params);

    let mut tally: IndexMap<i64, usize> = IndexMap::new();
    for (&wi, &gi) in w.iter().zip(&g) {
        if gi == 0 {
            continue;
        }
        let d = (wi as f64 / gi as f64).round() as i64;
        *tally.entry(d).or_insert(0) += 1;
    }

    let mut candidates: Vec<(i64, usize)> = tally.into_iter().collect();
    candidates.sort_by_key(|&(_, count)| std::cmp::Reverse(count));

    let mut best_mu = 0i64;
    let mut best_dist: u128 = u128::MAX;
    for (mu, _) in candidates {
        let dist: u128 = w
            .iter()
            .zip(&g)
            .map(|(&wi, &gi)| {
                let r = mod_q(wi as i128 - mu as i128 * gi as i128, params.q);
                let m = centered_magnitude(r, params.q) as u128;
                m * m
            })
            .sum();
        if dist < best_dist {
            best_dist = dist;
            best_mu = mu;
        }
    }
    best_mu
}

/// `Add(params, C1, C2)`: `(C1 + C2) mod q`. Both operands must be n×m
/// matrices under the same `Params`/`PublicKey`; the resulting plaintext
/// equals the sum of the two plaintexts modulo q (correctness requires the
/// true sum to stay within the scheme's noise tolerance).
pub fn add(params: &Params, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext, GswError> {
    check_ciphertext_shape(c1, params)?;
    check_ciphertext_shape(c2, params)?;
    Ok(mat_add(c1, c2, params.q))
}

/// `ConstMult(params, C, k)`: `(k · C) mod q`. Implemented as direct
/// scalar multiplication, equivalent to but faster than the source's
/// repeated addition (see DESIGN.md).
pub fn const_mult(params: &Params, c: &Ciphertext, k: u64) -> Result<Ciphertext, GswError> {
    check_ciphertext_shape(c, params)?;
    Ok(mat_scalar_mul(c, k, params.q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{gen_public_key, gen_secret_key};
    use crate::params::setup_params;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn keygen(seed: u64, lambda: u32) -> (Params, SecretKey, PublicKey, ChaCha20Rng) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let params = setup_params(&mut rng, lambda, None).unwrap();
        let sk = gen_secret_key(&mut rng, &params).unwrap();
        let pk = gen_public_key(&mut rng, &params, &sk).unwrap();
        (params, sk, pk, rng)
    }

    /// P5 / concrete scenario 2: round-trip recovers exact plaintexts.
    #[test]
    fn encrypt_decrypt_round_trip() {
        let (params, sk, pk, mut rng) = keygen(42, 7);
        for mu in [0u64, 1, 100, 2 * params.n as u64] {
            let ct = encrypt(&mut rng, &params, &pk, mu).unwrap();
            assert_eq!(decrypt(&params, &sk, &ct), mu as i64, "mu = {mu}");
        }
    }

    /// P6 / concrete scenario 3: additive homomorphism, 37 + 58 = 95.
    #[test]
    fn additive_homomorphism() {
        let (params, sk, pk, mut rng) = keygen(1, 7);
        let c_a = encrypt(&mut rng, &params, &pk, 37).unwrap();
        let c_b = encrypt(&mut rng, &params, &pk, 58).unwrap();
        let sum = add(&params, &c_a, &c_b).unwrap();
        assert_eq!(decrypt(&params, &sk, &sum), 95);
    }

    /// P7 / concrete scenario 4: scalar multiplication, 12 * 7 = 84.
    #[test]
    fn scalar_multiplication() {
        let (params, sk, pk, mut rng) = keygen(2, 7);
        let c = encrypt(&mut rng, &params, &pk, 12).unwrap();
        let scaled = const_mult(&params, &c, 7).unwrap();
        assert_eq!(decrypt(&params, &sk, &scaled), 84);
    }

    /// P8: add/const_mult do not mutate their ciphertext inputs.
    #[test]
    fn homomorphic_ops_are_immutable() {
        let (params, sk, pk, mut rng) = keygen(3, 7);
        let c = encrypt(&mut rng, &params, &pk, 10).unwrap();
        let before = c.clone();
        let _ = add(&params, &c, &c).unwrap();
        let _ = const_mult(&params, &c, 3).unwrap();
        assert_eq!(c, before);
        assert_eq!(decrypt(&params, &sk, &c), 10);
    }

    #[test]
    fn rejects_out_of_domain_plaintext() {
        let (params, _sk, pk, mut rng) = keygen(4, 7);
        let result = encrypt(&mut rng, &params, &pk, 2 * params.n as u64 + 1);
        assert!(matches!(result, Err(GswError::DomainViolation(_))));
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let (params, _sk, _pk, _rng) = keygen(5, 7);
        let bad = vec![vec![0u64; params.m]; params.n - 1];
        assert!(matches!(
            add(&params, &bad, &bad),
            Err(GswError::ShapeMismatch(_))
        ));
    }

    #[test]
    #[should_panic(expected = "decrypt: shape mismatch")]
    fn decrypt_panics_on_malformed_ciphertext() {
        let (params, sk, _pk, _rng) = keygen(6, 7);
        let bad = vec![vec![0u64; params.m]; params.n - 1];
        decrypt(&params, &sk, &bad);
    }
}
