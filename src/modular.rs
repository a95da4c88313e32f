//! Modular arithmetic utilities for Z_q.
//!
//! Accumulations use `i128` rather than the teacher crate's `i64`: this
//! scheme's `q` and matrix dimensions scale with the security parameter
//! rather than being fixed toy constants, so dot products need headroom
//! for `m * q^2`-sized partial sums (see DESIGN.md).

/// Reduce value to range [0, q) for unsigned modulus.
#[inline]
pub fn mod_q(val: i128, q: u64) -> u64 {
    let q = q as i128;
    let mut r = val % q;
    if r < 0 {
        r += q;
    }
    r as u64
}

/// Reduce value to range (-q/2, q/2] for centered modulus.
#[inline]
pub fn mod_q_centered(val: i128, q: u64) -> i128 {
    let q = q as i128;
    let mut r = val % q;
    if r > q / 2 {
        r -= q;
    } else if r <= -q / 2 {
        r += q;
    }
    r
}

/// Centered magnitude of a residue `r` already in `[0, q)`: `min(r, q - r)`.
#[inline]
pub fn centered_magnitude(r: u64, q: u64) -> u64 {
    r.min(q - r)
}
