//! Deterministic random number generation for delta production.
//!
//! Dice are rolled exactly once, by the turn-action authority, and the
//! resolved outcome is embedded into the emitted deltas. Replay never rolls.
//! Given the same battle seed and the same action sequence, the authority
//! therefore produces byte-identical delta logs.

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Stateless in this usage:
/// every call derives its output from an explicit seed, so the generator
/// itself carries no hidden replay-relevant state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one LCG step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generate a random u32 from a seed.
    pub fn next_u32(seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }

    /// Generate a random value in `[0, bound)`. Returns 0 for a zero bound.
    pub fn bounded(seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        Self::next_u32(seed) % bound
    }
}

/// Compute a deterministic seed from battle state components.
///
/// # Arguments
///
/// * `battle_seed` - Base seed fixed at battle creation
/// * `head` - Delta log length at production time (advances every action)
/// * `actor` - Unit or player performing the action
/// * `context` - Distinguishes multiple independent rolls within one action
pub fn compute_seed(battle_seed: u64, head: u64, actor: u32, context: u32) -> u64 {
    // SplitMix64-style mixing; constants shared with the fmix64 finalizer.
    let mut hash = battle_seed;
    hash ^= head.wrapping_mul(0x9E3779B97F4A7C15);
    hash = hash.rotate_left(31);
    hash ^= (actor as u64).wrapping_mul(0xBF58476D1CE4E5B9);
    hash = hash.rotate_left(27);
    hash ^= (context as u64).wrapping_mul(0x94D049BB133111EB);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xFF51AFD7ED558CCD);
    hash ^= hash >> 33;
    hash
}
