//! Seeded xorshift PRNG.
//!
//! The generator keeps four 32-bit words of state, seeded from a string with
//! a hash in the style of Java's `String.hashCode` spread over the four words.
//! Every operation is carried out on `i32` with wrapping semantics so the
//! output sequence is bit-identical to the JavaScript blockies generator on
//! every platform. This is not a cryptographic generator.

/// Divisor mapping a non-negative 32-bit word onto `[0, 1)`.
const UNIT_DIVISOR: f64 = 2_147_483_648.0;

/// Four-word xorshift generator seeded from a string.
///
/// A fresh instance is created for every icon; instances are never shared
/// between render calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeededRandom {
    state: [i32; 4],
}

impl SeededRandom {
    /// Create a generator already seeded with `seed`.
    pub fn new(seed: &str) -> Self {
        let mut rng = Self::default();
        rng.seed(seed);
        rng
    }

    /// Reset the state and fold every UTF-16 code unit of `seed` into it.
    ///
    /// Code unit `i` updates word `i % 4` as `word * 31 + unit`, wrapping at
    /// 32 bits after every step.
    pub fn seed(&mut self, seed: &str) {
        self.state = [0; 4];
        for (i, unit) in seed.encode_utf16().enumerate() {
            let word = &mut self.state[i % 4];
            *word = (*word << 5).wrapping_sub(*word).wrapping_add(i32::from(unit));
        }
        log::trace!("seeded prng from {} code units", seed.encode_utf16().count());
    }

    /// Advance the state and return the new `w` word.
    ///
    /// The right shifts are arithmetic. The sign bit of `w` cancels out in
    /// the final xor, so the returned word is never negative.
    pub fn next_word(&mut self) -> i32 {
        let [x, y, z, w] = self.state;
        let t = x ^ (x << 11);
        let next = w ^ (w >> 19) ^ t ^ (t >> 8);
        self.state = [y, z, w, next];
        next
    }

    /// Draw a float in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        f64::from(self.next_word() as u32) / UNIT_DIVISOR
    }

    /// Current state words, in `x, y, z, w` order.
    pub fn state(&self) -> [i32; 4] {
        self.state
    }
}
