//! GSW (Gentry-Sahai-Waters) leveled fully homomorphic encryption over LWE.
//!
//! This crate implements:
//! - parameter derivation from a security parameter λ (`params`)
//! - safe-prime generation (`primes`)
//! - the bit-decomposition / gadget matrix toolbox (`gadget`)
//! - secret/public key generation (`keys`)
//! - integer encryption and decryption, plus ciphertext addition and
//!   scalar multiplication by a plaintext constant (`gsw`)
//!
//! Ciphertext × ciphertext multiplication is explicitly out of scope: the
//! reference source ships a version that does not work, and a correct one
//! would need to be derived from the GSW paper rather than this crate (see
//! DESIGN.md).
//!
//! # Example
//!
//! ```
//! use gsw::{GswKeys, encrypt, decrypt, add, const_mult};
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let keys = GswKeys::generate(&mut rng, 4, None).unwrap();
//!
//! let ct_a = encrypt(&mut rng, &keys.params, &keys.public_key, 3).unwrap();
//! let ct_b = encrypt(&mut rng, &keys.params, &keys.public_key, 5).unwrap();
//!
//! let sum = add(&keys.params, &ct_a, &ct_b).unwrap();
//! assert_eq!(decrypt(&keys.params, &keys.secret_key, &sum), 8);
//!
//! let doubled = const_mult(&keys.params, &ct_a, 2).unwrap();
//! assert_eq!(decrypt(&keys.params, &keys.secret_key, &doubled), 6);
//! ```

pub mod error;
pub mod gadget;
pub mod gsw;
pub mod keys;
pub mod params;
pub mod primes;

mod modular;

pub use error::GswError;
pub use gadget::{
    bit_decomp, bit_decomp_inverse, bit_decomp_inverse_matrix, bit_decomp_matrix, build_gadget,
    dec_to_bin, flatten, flatten_matrix, powers_of_2,
};
pub use gsw::{add, const_mult, decrypt, encrypt, Ciphertext};
pub use keys::{gen_public_key, gen_secret_key, PublicKey, SecretKey};
pub use params::{setup_params, Params};
pub use primes::{generate_safe_prime, is_probable_prime};

use rand::Rng;

/// Convenience bundle producing `(Params, SecretKey, PublicKey)` from a
/// single security parameter λ, mirroring the reference source's `GSWKeys`
/// helper.
#[derive(Clone, Debug)]
pub struct GswKeys {
    pub params: Params,
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl GswKeys {
    /// Run `Setup`, `SecretKeyGen`, and `PublicKeyGen` in sequence.
    pub fn generate<R: Rng>(
        rng: &mut R,
        lambda: u32,
        capital_l: Option<u32>,
    ) -> Result<Self, GswError> {
        let params = setup_params(rng, lambda, capital_l)?;
        let secret_key = gen_secret_key(rng, &params)?;
        let public_key = gen_public_key(rng, &params, &secret_key)?;
        Ok(GswKeys {
            params,
            secret_key,
            public_key,
        })
    }
}
