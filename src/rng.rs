use crate::symbol::Symbol;
use crate::value::{TypeMarker, Value};

/// Upper bound (exclusive) for randomly generated integers.
pub const RANDOM_INT_BOUND: u64 = 1_000_000_000;

/// Length of randomly generated strings and symbol spellings.
pub const RANDOM_TOKEN_LEN: usize = 10;

const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Source of randomness for generated return values.
///
/// Injected into `build` so tests can substitute a seeded source and get
/// reproducible "random" values.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform-ish value in `[0, bound)`. The modulo bias is negligible for
    /// the bounds used here.
    fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound.max(1)
    }
}

/// Produce the random value requested by a type marker. Dispatch guarantees
/// this is only reached for recognized markers.
pub(crate) fn random_value(marker: TypeMarker, src: &mut dyn RandomSource) -> Value {
    match marker {
        TypeMarker::Int => Value::Int(src.next_below(RANDOM_INT_BOUND) as i64),
        TypeMarker::Str => Value::Str(random_alnum(src)),
        TypeMarker::Sym => Value::Sym(Symbol::intern(&random_alnum(src))),
    }
}

fn random_alnum(src: &mut dyn RandomSource) -> String {
    (0..RANDOM_TOKEN_LEN)
        .map(|_| ALNUM[src.next_below(ALNUM.len() as u64) as usize] as char)
        .collect()
}

/// xoshiro256** generator, the default random source.
pub struct Xoshiro256StarStar {
    s: [u64; 4],
}

impl Xoshiro256StarStar {
    /// Expand a single seed into full state with splitmix64.
    pub fn from_seed(seed: u64) -> Self {
        let mut state = seed;
        let mut s = [0u64; 4];
        for slot in &mut s {
            state = state.wrapping_add(0x9e3779b97f4a7c15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
            *slot = z ^ (z >> 31);
            if *slot == 0 {
                *slot = 1;
            }
        }
        Self { s }
    }

    /// Seed from the wall clock and current thread, for ambient use.
    pub fn from_time() -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut h = DefaultHasher::new();
        std::time::SystemTime::now().hash(&mut h);
        std::thread::current().id().hash(&mut h);
        Self::from_seed(h.finish())
    }
}

impl RandomSource for Xoshiro256StarStar {
    fn next_u64(&mut self) -> u64 {
        let result = (self.s[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        result
    }
}
