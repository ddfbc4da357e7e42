/// Seeds are always below this bound.
pub const SEED_MODULUS: u64 = 100;

/// Map a domain to its seed: the sum of its character codes modulo 100.
///
/// The empty string maps to 0.
pub fn derive_seed(domain: &str) -> u32 {
    let sum: u64 = domain.chars().map(|c| u64::from(u32::from(c))).sum();
    (sum % SEED_MODULUS) as u32
}
