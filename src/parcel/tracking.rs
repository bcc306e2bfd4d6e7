//! Tracking-code generation
//!
//! Codes are a three-letter prefix plus a fixed number of digits. A
//! [`TrackingRegistry`] remembers every code it has issued and never hands one
//! out twice. A station owns one registry; tests create their own so they can
//! seed the generator and start from an empty set.

use crate::identity::TrackingCode;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Letter prefixes a tracking code may start with
pub const TRACKING_PREFIXES: [&str; 8] = ["ABC", "XYZ", "TRK", "PKG", "BOX", "SHP", "DLV", "POS"];

/// Number of digits after the prefix
pub const TRACKING_DIGITS: usize = 10;

struct RegistryState {
    issued: HashSet<TrackingCode>,
    rng: Box<dyn RngCore + Send>,
}

/// Issues unique tracking codes
///
/// Generation and reservation happen under one lock, so concurrent callers
/// sharing a registry (e.g. through `Arc`) can never receive the same code.
pub struct TrackingRegistry {
    state: Mutex<RegistryState>,
}

impl TrackingRegistry {
    /// Registry backed by an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Registry with a deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Registry drawing randomness from `rng`
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                issued: HashSet::new(),
                rng: Box::new(rng),
            }),
        }
    }

    /// Generate a code that has never been issued by this registry and reserve it
    pub fn generate(&self) -> TrackingCode {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            let candidate = random_code(state.rng.as_mut());
            if !state.issued.contains(&candidate) {
                state.issued.insert(candidate.clone());
                tracing::trace!(code = %candidate, "Tracking code issued");
                return candidate;
            }
            tracing::debug!(code = %candidate, "Tracking code collision, retrying");
        }
    }

    /// Whether `code` was issued by this registry
    pub fn contains(&self, code: &TrackingCode) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .issued
            .contains(code)
    }

    /// Number of codes issued so far
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .issued
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TrackingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingRegistry")
            .field("issued", &self.len())
            .finish()
    }
}

fn random_code(rng: &mut dyn RngCore) -> TrackingCode {
    let prefix = TRACKING_PREFIXES.choose(&mut *rng).copied().unwrap_or(TRACKING_PREFIXES[0]);
    let digits: String = (0..TRACKING_DIGITS)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    TrackingCode::new(format!("{}{}", prefix, digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_format(code: &TrackingCode) -> bool {
        let prefix_ok = code
            .prefix()
            .is_some_and(|prefix| TRACKING_PREFIXES.contains(&prefix));
        let digits_ok = code
            .digits()
            .is_some_and(|d| d.len() == TRACKING_DIGITS && d.bytes().all(|b| b.is_ascii_digit()));
        prefix_ok && digits_ok
    }

    #[test]
    fn test_generated_codes_are_unique_and_well_formed() {
        let registry = TrackingRegistry::seeded(42);
        let codes: HashSet<TrackingCode> = (0..200).map(|_| registry.generate()).collect();

        assert_eq!(codes.len(), 200);
        assert_eq!(registry.len(), 200);
        assert!(codes.iter().all(matches_format));
        assert!(codes
            .iter()
            .all(|c| postomat_validator::validate_tracking(c.as_str())));
    }

    #[test]
    fn test_seeded_registries_are_reproducible() {
        let a = TrackingRegistry::seeded(7);
        let b = TrackingRegistry::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_independent_registries() {
        let a = TrackingRegistry::seeded(1);
        let b = TrackingRegistry::seeded(2);
        let code = a.generate();
        assert!(a.contains(&code));
        assert!(!b.contains(&code));
        assert!(b.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;

        let registry = Arc::new(TrackingRegistry::seeded(9));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || (0..50).map(|_| registry.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for code in handle.join().unwrap() {
                assert!(all.insert(code));
            }
        }
        assert_eq!(all.len(), 200);
    }
}
