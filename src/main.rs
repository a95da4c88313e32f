//! Demo: GSW integer FHE end to end.
//!
//! Accepts an optional security parameter λ as its first argument
//! (defaulting to a small toy value); everything else is fixed. This is
//! demo glue only — the library itself takes no CLI/environment input.

use std::time::Instant;

use gsw::{add, const_mult, decrypt, encrypt, GswKeys};
use rand::thread_rng;

/// Prints `msg` alongside the elapsed time since `start`, mirroring the
/// reference source's `status()` helper.
fn status(start: &Instant, msg: &str) {
    println!("\n{:.4}  {}\n", start.elapsed().as_secs_f64(), msg);
}

fn main() {
    let lambda: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);

    println!("GSW Leveled FHE Implementation - Demo\n");

    let start = Instant::now();
    let mut rng = thread_rng();

    status(&start, "Setup GSW parameters");
    status(&start, "Generating GSW Secret key and Public key");
    let keys = GswKeys::generate(&mut rng, lambda, None).expect("valid lambda");
    println!(
        "Parameters: n={}, q={}, l={}, m={}, N={}",
        keys.params.n, keys.params.q, keys.params.l, keys.params.m, keys.params.capital_n
    );

    status(&start, "Encrypting message");
    let message = 100u64.min(keys.params.n as u64);
    let ct = encrypt(&mut rng, &keys.params, &keys.public_key, message).unwrap();

    status(&start, "Decrypting message");
    let recovered = decrypt(&keys.params, &keys.secret_key, &ct);
    println!(
        "Encrypt({message}) -> Decrypt -> {recovered} {}",
        if recovered == message as i64 { "✓" } else { "✗" }
    );

    println!("\n--- Homomorphic Operations ---");
    let a = message.min(keys.params.n as u64 / 4);
    let b = a;
    let ct_a = encrypt(&mut rng, &keys.params, &keys.public_key, a).unwrap();
    let ct_b = encrypt(&mut rng, &keys.params, &keys.public_key, b).unwrap();

    let ct_sum = add(&keys.params, &ct_a, &ct_b).unwrap();
    let sum = decrypt(&keys.params, &keys.secret_key, &ct_sum);
    println!(
        "{a} + {b} = {sum} (expected {}) {}",
        a + b,
        if sum == (a + b) as i64 { "✓" } else { "✗" }
    );

    let k = 3u64;
    let ct_scaled = const_mult(&keys.params, &ct_a, k).unwrap();
    let scaled = decrypt(&keys.params, &keys.secret_key, &ct_scaled);
    println!(
        "{a} * {k} = {scaled} (expected {}) {}",
        a * k,
        if scaled == (a * k) as i64 { "✓" } else { "✗" }
    );

    println!("\n--- Summary ---");
    println!("GSW leveled FHE implementation complete with:");
    println!("  - safe-prime parameter generation");
    println!("  - secret/public key generation");
    println!("  - integer encryption/decryption");
    println!("  - homomorphic addition and scalar multiplication");
}
