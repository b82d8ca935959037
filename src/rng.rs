use rand::SeedableRng;
use rand_pcg::Pcg64;

pub type GameRng = Pcg64;

/// Deterministic RNG factory for a given (seed, round) pair.
///
/// - Derives the generator seed as `seed ^ round.rotate_left(32)`.
/// - Uses the PCG 64-bit generator for reproducible sequences.
#[inline]
pub fn rng_for_game(seed: u64, round: u32) -> GameRng {
    let derived: u64 = seed ^ u64::from(round).rotate_left(32);
    Pcg64::seed_from_u64(derived)
}

/// Seed from OS entropy, for runs where the caller did not fix one.
#[inline]
pub fn fresh_seed() -> u64 {
    rand::random()
}
