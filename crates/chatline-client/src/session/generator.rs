//! Identifier generators for new session ids.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chatline_common::SessionId;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use tracing::warn;

/// Produces version-4 UUID session ids.
pub trait IdentifierGenerator: Send {
    fn generate(&mut self) -> SessionId;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Turn 16 random bytes into a v4 UUID (version and variant bits are set).
fn id_from_bytes(bytes: [u8; 16]) -> SessionId {
    uuid::Builder::from_random_bytes(bytes).into_uuid().into()
}

/// Backed by the operating system's secure random source.
#[derive(Debug, Clone, Copy)]
pub struct SecureGenerator(());

impl SecureGenerator {
    /// Returns `None` when the OS random source cannot be read.
    pub fn probe() -> Option<Self> {
        let mut bytes = [0u8; 16];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => Some(Self(())),
            Err(e) => {
                warn!(error = %e, "secure random source unavailable");
                None
            }
        }
    }
}

impl IdentifierGenerator for SecureGenerator {
    fn generate(&mut self) -> SessionId {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        id_from_bytes(bytes)
    }

    fn name(&self) -> &'static str {
        "secure"
    }
}

static INSTANCES: AtomicU64 = AtomicU64::new(0);

/// Clock, process id and a per-process counter folded into one word.
fn run_entropy() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let instance = INSTANCES.fetch_add(1, Ordering::Relaxed);
    nanos ^ (u64::from(std::process::id()) << 32) ^ instance.wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Seeded pseudo-random generator. The same seed yields the same sequence.
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    rng: StdRng,
}

impl FallbackGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the wall clock and process id.
    pub fn from_clock() -> Self {
        Self::seeded(run_entropy())
    }

    /// Configured seed mixed with per-run entropy, so restarts never
    /// replay an earlier sequence.
    pub fn salted(seed: u64) -> Self {
        Self::seeded(seed ^ run_entropy())
    }
}

impl IdentifierGenerator for FallbackGenerator {
    fn generate(&mut self) -> SessionId {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        id_from_bytes(bytes)
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

/// Which generator the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorChoice {
    #[default]
    Auto,
    Secure,
    Fallback,
}

/// Pick a generator once, at construction time.
///
/// `Secure` and `Auto` both probe the OS source; when it is unavailable the
/// seeded fallback is used instead (with a warning for `Secure`).
pub fn select_generator(
    choice: GeneratorChoice,
    seed: Option<u64>,
) -> Box<dyn IdentifierGenerator> {
    let fallback = || match seed {
        Some(seed) => FallbackGenerator::salted(seed),
        None => FallbackGenerator::from_clock(),
    };

    match choice {
        GeneratorChoice::Fallback => Box::new(fallback()),
        GeneratorChoice::Auto => match SecureGenerator::probe() {
            Some(secure) => Box::new(secure),
            None => Box::new(fallback()),
        },
        GeneratorChoice::Secure => match SecureGenerator::probe() {
            Some(secure) => Box::new(secure),
            None => {
                warn!("secure id generator requested but unavailable, using fallback");
                Box::new(fallback())
            }
        },
    }
}
