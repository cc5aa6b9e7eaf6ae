use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, SeedableRng, distr::Alphanumeric, rngs::StdRng};
use rand_distr::StandardNormal;
use sha2::{Digest, Sha256};

/// Minimum number of seconds left between the preview start and the end of
/// the episode.
pub const DEFAULT_MIN_TAIL_SECS: u32 = 45;

/// Source of randomness for podcast selection and preview offsets.
///
/// Everything that draws a random number goes through this trait so tests can
/// pin the outcome.
pub trait Randomness: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// Returns one sample of the standard normal distribution.
    fn gaussian(&mut self) -> f64;
}

/// [`Randomness`] backed by a [`StdRng`].
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Randomness for SeededRandom {
    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Picks a uniformly random element, or `None` when `items` is empty.
///
/// An index past the end returned by `random` wraps around, so a non-empty
/// slice always yields an element.
pub fn pick_random<'a, T>(items: &'a [T], random: &mut dyn Randomness) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.index(items.len()) % items.len())
}

/// Computes where the preview clip of an episode starts.
///
/// The start is centered on the middle of the episode with a standard
/// deviation of a third of its length, and always leaves at least
/// `min_tail_sec` seconds before the end. Episodes shorter than the tail start
/// at zero.
pub fn compute_preview_start(
    audio_length_sec: u32,
    min_tail_sec: u32,
    random: &mut dyn Randomness,
) -> u32 {
    if audio_length_sec < min_tail_sec {
        return 0;
    }

    let half_way = f64::from(audio_length_sec / 2);
    let spread = f64::from(audio_length_sec / 3);
    // round half up
    let offset = (random.gaussian() * spread + 0.5).floor();
    let ceiling = f64::from(audio_length_sec - min_tail_sec);

    // clamped in f64 so infinite draws saturate; NaN casts to 0
    (half_way + offset).clamp(0.0, ceiling) as u32
}

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque random identifier used for OAuth `state` values and session ids.
pub fn generate_opaque_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
