//! Secret-key and public-key generation.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::GswError;
use crate::gadget::powers_of_2;
use crate::modular::mod_q;
use crate::params::Params;

/// `SecretKeyGen` output: `t` is the raw secret, `s = t ‖ 1` is the active
/// secret used by `decrypt`, and `v = Powerof2(s) mod q` is the evaluation
/// vector, retained for protocol extensions but not consumed here (see
/// DESIGN.md).
#[derive(Clone, Debug)]
pub struct SecretKey {
    /// Length-`(n-1)` secret vector.
    pub t: Vec<u64>,
    /// Length-`n` bonded secret, `s = t ‖ 1`.
    pub s: Vec<u64>,
    /// Length-`N` evaluation vector, `Powerof2(s) mod q`.
    pub v: Vec<u64>,
}

/// `PublicKeyGen` output: `A` is the n×m public matrix, `e` is the
/// discrete-Gaussian error vector used to build it.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// n×m public matrix, satisfying `s · A ≡ e (mod q)`.
    pub a: Vec<Vec<u64>>,
    /// Length-m error vector (small, signed).
    pub e: Vec<i64>,
}

/// `SecretKeyGen(params)`: sample `t` uniformly in `Z_q^{n-1}`, form
/// `s = t ‖ 1`, and derive `v = Powerof2(s) mod q`.
pub fn gen_secret_key<R: Rng>(rng: &mut R, params: &Params) -> Result<SecretKey, GswError> {
    if params.n == 0 {
        return Err(GswError::InvalidParameter("n must be positive".to_string()));
    }
    let t: Vec<u64> = (0..params.n - 1).map(|_| rng.gen_range(0..params.q)).collect();
    let mut s = t.clone();
    s.push(1);
    let v = powers_of_2(&s, params);
    Ok(SecretKey { t, s, v })
}

/// `PublicKeyGen(params, sk)`: sample `B` uniformly in `Z_q^{(n-1) x m}`
/// and a discrete-Gaussian error `e` of scale `chi_scale`; form
/// `b = t · B + e (mod q)` and stack `A = (-B; b)`.
///
/// Correctness invariant: `s · A ≡ e (mod q)`, since
/// `s · A = -t·B + b = -t·B + (t·B + e) = e`.
pub fn gen_public_key<R: Rng>(
    rng: &mut R,
    params: &Params,
    sk: &SecretKey,
) -> Result<PublicKey, GswError> {
    if sk.t.len() != params.n - 1 {
        return Err(GswError::ShapeMismatch(format!(
            "secret key length {} does not match n-1 = {}",
            sk.t.len(),
            params.n - 1
        )));
    }

    let b_mat: Vec<Vec<u64>> = (0..params.n - 1)
        .map(|_| (0..params.m).map(|_| rng.gen_range(0..params.q)).collect())
        .collect();

    let normal = Normal::new(0.0, params.chi_scale())
        .map_err(|e| GswError::InvalidParameter(format!("invalid chi_scale: {e}")))?;
    let e: Vec<i64> = (0..params.m)
        .map(|_| normal.sample(rng).round() as i64)
        .collect();

    let mut b_row = vec![0u64; params.m];
    for j in 0..params.m {
        let mut sum: i128 = e[j] as i128;
        for i in 0..params.n - 1 {
            sum += sk.t[i] as i128 * b_mat[i][j] as i128;
        }
        b_row[j] = mod_q(sum, params.q);
    }

    let mut a = Vec::with_capacity(params.n);
    for row in &b_mat {
        a.push(row.iter().map(|&x| mod_q(-(x as i128), params.q)).collect());
    }
    a.push(b_row);

    Ok(PublicKey { a, e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gadget::vec_mat_mul;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// P4: s · A ≡ e (mod q) for every freshly generated (sk, pk) pair.
    #[test]
    fn public_key_satisfies_correctness_invariant() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let params = crate::params::setup_params(&mut rng, 5, None).unwrap();
        let sk = gen_secret_key(&mut rng, &params).unwrap();
        let pk = gen_public_key(&mut rng, &params, &sk).unwrap();

        let s_a = vec_mat_mul(&sk.s, &pk.a, params.q);
        let e_mod_q: Vec<u64> = pk
            .e
            .iter()
            .map(|&ei| mod_q(ei as i128, params.q))
            .collect();
        assert_eq!(s_a, e_mod_q);
    }

    #[test]
    fn secret_key_shapes() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let params = crate::params::setup_params(&mut rng, 5, None).unwrap();
        let sk = gen_secret_key(&mut rng, &params).unwrap();
        assert_eq!(sk.t.len(), params.n - 1);
        assert_eq!(sk.s.len(), params.n);
        assert_eq!(*sk.s.last().unwrap(), 1);
        assert_eq!(sk.v.len(), params.capital_n);
        assert_eq!(sk.v, crate::gadget::powers_of_2(&sk.s, &params));
    }
}
