//! API credential pool and per-call rotation strategies.
//!
//! A failing credential is never marked or skipped; the next call simply
//! selects again, possibly landing on the same key.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FetchError;

/// An opaque API token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([redacted])")
    }
}

/// A fixed, non-empty set of credentials configured at process start.
#[derive(Debug, Clone)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    /// Builds a pool from raw tokens.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EmptyCredentialPool`] when `tokens` is empty.
    pub fn new<I, S>(tokens: I) -> Result<Self, FetchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credentials: Vec<Credential> = tokens.into_iter().map(Credential::new).collect();
        if credentials.is_empty() {
            return Err(FetchError::EmptyCredentialPool);
        }
        Ok(Self { credentials })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

/// Picks one credential uniformly at random.
#[must_use]
pub fn select_random<'a, R: Rng>(pool: &'a CredentialPool, rng: &mut R) -> &'a Credential {
    let index = rng.random_range(0..pool.credentials.len());
    &pool.credentials[index]
}

/// Strategy for choosing a credential before every outbound call.
pub trait RotationStrategy {
    fn select<'a>(&mut self, pool: &'a CredentialPool) -> &'a Credential;
}

/// Uniform random choice per call.
#[derive(Debug)]
pub struct RandomRotation<R = StdRng> {
    rng: R,
}

impl RandomRotation<StdRng> {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence, for tests and reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RotationStrategy for RandomRotation<R> {
    fn select<'a>(&mut self, pool: &'a CredentialPool) -> &'a Credential {
        select_random(pool, &mut self.rng)
    }
}

/// Cycles through the pool in order, wrapping around.
#[derive(Debug, Default)]
pub struct RoundRobinRotation {
    next: usize,
}

impl RoundRobinRotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RotationStrategy for RoundRobinRotation {
    fn select<'a>(&mut self, pool: &'a CredentialPool) -> &'a Credential {
        let index = self.next % pool.credentials.len();
        self.next = index + 1;
        &pool.credentials[index]
    }
}

impl<T: RotationStrategy + ?Sized> RotationStrategy for Box<T> {
    fn select<'a>(&mut self, pool: &'a CredentialPool) -> &'a Credential {
        (**self).select(pool)
    }
}
