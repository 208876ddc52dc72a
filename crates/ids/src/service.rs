//! Internal implementation of the auto-ID generator.

use crate::{IdError, IdResult};
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::{LazyLock, Mutex, PoisonError};
use std::{fmt, str::FromStr};

/// Number of characters in a generated auto-ID.
pub const AUTO_ID_LENGTH: usize = 20;

/// Symbols an auto-ID is drawn from, indexed by the accepted 6-bit values.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Bytes drawn from the random source per refill.
const BUFFER_LEN: usize = 30;

const SIX_BIT_MASK: u8 = 0x3f;

static DEFAULT_GENERATOR: LazyLock<IdGenerator> = LazyLock::new(IdGenerator::new);

/// Generates an auto-ID from the process-wide generator backed by the OS random source.
///
/// # Errors
///
/// Returns [`IdError::RandomSource`] if the operating system cannot supply random bytes.
pub fn generate_id() -> IdResult<AutoId> {
    DEFAULT_GENERATOR.generate()
}

struct GeneratorState<R> {
    rng: R,
    buffer: [u8; BUFFER_LEN],
}

/// Thread-safe auto-ID generator.
///
/// The random source and its scratch buffer live behind one mutex, so concurrent callers
/// never interleave reads and writes of the same buffer. Holding the lock for the whole of
/// [`IdGenerator::generate`] keeps each ID built from one contiguous run of random bytes.
///
/// # Construction
/// - [`IdGenerator::new`] reads from the operating system's cryptographic source.
/// - [`IdGenerator::from_rng`] accepts any [`RngCore`], which makes seeded, reproducible
///   sequences possible in tests.
pub struct IdGenerator<R = OsRng> {
    state: Mutex<GeneratorState<R>>,
}

impl IdGenerator<OsRng> {
    /// Creates a generator reading from the operating system's random source.
    pub fn new() -> Self {
        Self::from_rng(OsRng)
    }
}

impl Default for IdGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> IdGenerator<R> {
    /// Creates a generator over the given random source.
    pub fn from_rng(rng: R) -> Self {
        Self {
            state: Mutex::new(GeneratorState {
                rng,
                buffer: [0; BUFFER_LEN],
            }),
        }
    }

    /// Generates a new auto-ID.
    ///
    /// The scratch buffer is refilled from the random source until 20 accepted values have
    /// been collected. Bytes left over from the final refill are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::RandomSource`] if the random source fails to fill the buffer.
    pub fn generate(&self) -> IdResult<AutoId> {
        let mut chars = [0u8; AUTO_ID_LENGTH];
        let mut filled = 0;
        let mut refills = 0u32;

        {
            // The buffer is overwritten before every read, so a panic in another holder
            // leaves nothing to repair.
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let state = &mut *guard;

            while filled < AUTO_ID_LENGTH {
                state
                    .rng
                    .try_fill_bytes(&mut state.buffer)
                    .map_err(IdError::RandomSource)?;
                refills += 1;

                for &byte in &state.buffer {
                    if filled == AUTO_ID_LENGTH {
                        break;
                    }
                    let six_bits = usize::from(byte & SIX_BIT_MASK);
                    if let Some(&symbol) = ALPHABET.get(six_bits) {
                        chars[filled] = symbol;
                        filled += 1;
                    }
                }
            }
        }

        tracing::trace!(refills, "generated auto-ID");
        Ok(AutoId(chars.iter().map(|&b| char::from(b)).collect()))
    }
}

impl<R> fmt::Debug for IdGenerator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}

/// A generated document identifier in canonical auto-ID form.
///
/// Once constructed, the contained string is guaranteed to be exactly [`AUTO_ID_LENGTH`]
/// characters from [`ALPHABET`], which also makes it a valid single path segment.
///
/// # Construction
/// - [`AutoId::generate`] draws a fresh ID from the process-wide generator.
/// - [`IdGenerator::generate`] draws one from a specific generator.
/// - [`AutoId::parse`] validates an externally supplied string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AutoId(String);

impl AutoId {
    /// Generates a new auto-ID from the process-wide generator.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::RandomSource`] if the operating system cannot supply random bytes.
    pub fn generate() -> IdResult<Self> {
        generate_id()
    }

    /// Validates and wraps a string that must already be in canonical auto-ID form.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> IdResult<Self> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(IdError::InvalidInput(format!(
            "auto-ID must be {} characters from a-z, A-Z, 0-9, got: '{}'",
            AUTO_ID_LENGTH, input
        )))
    }

    /// Returns true if `input` is in canonical auto-ID form.
    ///
    /// This is a purely syntactic check: exactly 20 bytes, each an ASCII letter or digit.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == AUTO_ID_LENGTH && input.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AutoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AutoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for AutoId {
    type Err = IdError;

    /// Equivalent to [`AutoId::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AutoId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AutoId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AutoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AutoId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Replays a fixed byte script, cycling when it runs out.
    struct ScriptedRng {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl ScriptedRng {
        fn new(bytes: Vec<u8>) -> Self {
            Self { bytes, pos: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let mut b = [0u8; 4];
            self.fill_bytes(&mut b);
            u32::from_le_bytes(b)
        }

        fn next_u64(&mut self) -> u64 {
            let mut b = [0u8; 8];
            self.fill_bytes(&mut b);
            u64::from_le_bytes(b)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for slot in dest.iter_mut() {
                *slot = self.bytes[self.pos % self.bytes.len()];
                self.pos += 1;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            panic!("not used")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("not used")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("not used")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy unavailable"))
        }
    }

    #[test]
    fn test_alphabet_is_62_unique_alphanumerics() {
        let unique: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
        assert_eq!(ALPHABET[0], b'a');
        assert_eq!(ALPHABET[26], b'A');
        assert_eq!(ALPHABET[52], b'0');
        assert_eq!(ALPHABET[61], b'9');
    }

    #[test]
    fn test_generate_produces_canonical_id() {
        let id = IdGenerator::new().generate().unwrap();

        assert_eq!(id.as_str().len(), AUTO_ID_LENGTH);
        assert!(AutoId::is_canonical(id.as_str()));
    }

    #[test]
    fn test_process_wide_generator() {
        let a = generate_id().unwrap();
        let b = AutoId::generate().unwrap();

        assert!(AutoId::is_canonical(a.as_str()));
        assert!(AutoId::is_canonical(b.as_str()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_rejects_values_62_and_63() {
        // Ten rejected bytes (low 6 bits are 62 or 63), then twenty accepted ones with
        // high bits set to show only the low 6 bits are used.
        let mut script = vec![0x3e, 0x3f, 0x7e, 0x7f, 0xbe, 0xbf, 0xfe, 0xff, 0x3e, 0x3f];
        script.extend((0u8..20).map(|i| i | 0x40));
        assert_eq!(script.len(), BUFFER_LEN);

        let generator = IdGenerator::from_rng(ScriptedRng::new(script));
        let id = generator.generate().unwrap();

        assert_eq!(id.as_str(), "abcdefghijklmnopqrst");
    }

    #[test]
    fn test_generate_refills_when_buffer_exhausted() {
        // Only the last ten bytes of each refill are accepted: "0".."9".
        let mut script = vec![0xff; 20];
        script.extend(52u8..62);
        assert_eq!(script.len(), BUFFER_LEN);

        let generator = IdGenerator::from_rng(ScriptedRng::new(script));
        let id = generator.generate().unwrap();

        assert_eq!(id.as_str(), "01234567890123456789");
    }

    #[test]
    fn test_generate_discards_leftover_bytes() {
        let script: Vec<u8> = (0u8..30).collect();
        let generator = IdGenerator::from_rng(ScriptedRng::new(script));

        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();

        // Each call refills from the start of the 30-byte cycle.
        assert_eq!(first.as_str(), "abcdefghijklmnopqrst");
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_reports_random_source_failure() {
        let generator = IdGenerator::from_rng(FailingRng);
        let result = generator.generate();

        match result {
            Err(IdError::RandomSource(e)) => assert!(e.to_string().contains("entropy")),
            _ => panic!("Expected RandomSource error"),
        }
    }

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let a = IdGenerator::from_rng(StdRng::seed_from_u64(7));
        let b = IdGenerator::from_rng(StdRng::seed_from_u64(7));

        for _ in 0..50 {
            assert_eq!(a.generate().unwrap(), b.generate().unwrap());
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let generator = IdGenerator::new();
        let ids: HashSet<AutoId> = (0..1_000).map(|_| generator.generate().unwrap()).collect();

        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_concurrent_generation_is_well_formed() {
        let generator = IdGenerator::new();

        let ids: Vec<AutoId> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..500)
                            .map(|_| generator.generate().unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(ids.len(), 4_000);
        assert!(ids.iter().all(|id| AutoId::is_canonical(id.as_str())));

        let unique: HashSet<&AutoId> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_character_distribution_is_uniform_per_position() {
        const SAMPLES: usize = 100_000;
        // Chi-square critical value for 61 degrees of freedom at p < 1e-6.
        const CRITICAL: f64 = 130.0;

        let generator = IdGenerator::from_rng(StdRng::seed_from_u64(0x5eed));
        let mut counts = [[0u32; 62]; AUTO_ID_LENGTH];

        for _ in 0..SAMPLES {
            let id = generator.generate().unwrap();
            for (position, b) in id.as_str().bytes().enumerate() {
                let symbol = ALPHABET.iter().position(|&a| a == b).unwrap();
                counts[position][symbol] += 1;
            }
        }

        let expected = SAMPLES as f64 / 62.0;
        for (position, row) in counts.iter().enumerate() {
            let chi_square: f64 = row
                .iter()
                .map(|&observed| {
                    let diff = f64::from(observed) - expected;
                    diff * diff / expected
                })
                .sum();
            assert!(
                chi_square < CRITICAL,
                "position {position} chi-square {chi_square} exceeds {CRITICAL}"
            );
        }
    }

    #[test]
    fn test_parse_valid_auto_id() {
        let input = "k3Hd9QzPq0aXbL7mN2rT";
        let result = AutoId::parse(input);

        assert!(result.is_ok());
        assert_eq!(result.unwrap().to_string(), input);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(AutoId::parse("k3Hd9QzPq0aXbL7mN2r").is_err());
        assert!(AutoId::parse("k3Hd9QzPq0aXbL7mN2rTx").is_err());
        assert!(AutoId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        let result = AutoId::parse("k3Hd9QzPq0aXbL7mN2r/");

        match result {
            Err(IdError::InvalidInput(msg)) => {
                assert!(msg.contains("20 characters"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
        assert!(AutoId::parse("k3Hd9QzPq0aXbL7mN2r-").is_err());
        assert!(AutoId::parse("k3Hd9QzPq0aXbL7mN2ré").is_err());
    }

    #[test]
    fn test_from_str() {
        let parsed: Result<AutoId, _> = "abcdefghijklmnopqrst".parse();
        assert!(parsed.is_ok());

        let invalid: Result<AutoId, _> = "short".parse();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_round_trip_generate_to_string_to_parse() {
        let original = AutoId::generate().unwrap();
        let parsed = AutoId::parse(&original.to_string()).unwrap();

        assert_eq!(original, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_on_deserialize() {
        let id = AutoId::parse("abcdefghijklmnopqrst").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abcdefghijklmnopqrst\"");

        let back: AutoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<AutoId>("\"not-an-auto-id\"").is_err());
    }
}
