//! Circuit breaker registry.
//!
//! Keyed expiry map: token id → pause-until timestamp. State is process
//! memory only and is lost on restart; the decision logic assumes a single
//! logical decision-maker per token.

use chrono::{DateTime, Duration, Utc};
use merit_core::{Clock, TokenId};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::info;

/// Time-boxed trading pauses, evicted lazily on read.
///
/// Activation always sets the expiry to `now + duration`, overwriting any
/// existing entry; with a fixed pause duration, re-activation at a later
/// instant always extends the pause, never shortens it.
pub struct BreakerRegistry {
    clock: Arc<dyn Clock>,
    active: Mutex<HashMap<TokenId, DateTime<Utc>>>,
}

impl BreakerRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Whether trading on `id` is currently paused.
    ///
    /// An entry whose expiry has passed is evicted on this read.
    pub fn is_active(&self, id: TokenId) -> bool {
        let now = self.clock.now();
        let mut active = self.active.lock();
        match active.get(&id) {
            Some(expiry) if now >= *expiry => {
                active.remove(&id);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Pause trading on `id` for `duration` starting now. Returns the expiry.
    pub fn activate(&self, id: TokenId, duration: Duration) -> DateTime<Utc> {
        let expiry = self.clock.now() + duration;
        self.active.lock().insert(id, expiry);
        info!(token_id = %id, expires_at = %expiry, "Circuit breaker activated");
        expiry
    }

    /// Expiry of an active pause, if any. Expired entries are evicted.
    pub fn expiry(&self, id: TokenId) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        let mut active = self.active.lock();
        match active.get(&id) {
            Some(expiry) if now >= *expiry => {
                active.remove(&id);
                None
            }
            Some(expiry) => Some(*expiry),
            None => None,
        }
    }

    /// All currently active pauses. Evicts every expired entry first.
    pub fn list_active(&self) -> BTreeMap<TokenId, DateTime<Utc>> {
        let now = self.clock.now();
        let mut active = self.active.lock();
        active.retain(|_, expiry| now < *expiry);
        active.iter().map(|(id, expiry)| (*id, *expiry)).collect()
    }

    /// Number of entries currently held, without evicting.
    pub fn entry_count(&self) -> usize {
        self.active.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::ManualClock;

    fn registry_with_clock() -> (BreakerRegistry, ManualClock) {
        let clock = ManualClock::start_now();
        let registry = BreakerRegistry::new(Arc::new(clock.clone()));
        (registry, clock)
    }

    #[test]
    fn test_activate_then_active_until_expiry() {
        let (registry, clock) = registry_with_clock();
        let token = TokenId::generate();

        assert!(!registry.is_active(token));

        let expiry = registry.activate(token, Duration::minutes(15));
        assert_eq!(expiry, clock.now() + Duration::minutes(15));
        assert!(registry.is_active(token));

        clock.advance(Duration::minutes(14));
        assert!(registry.is_active(token));
    }

    #[test]
    fn test_expired_entry_evicted_on_read() {
        let (registry, clock) = registry_with_clock();
        let token = TokenId::generate();

        registry.activate(token, Duration::minutes(15));
        clock.advance(Duration::minutes(15));

        // Expiry boundary itself counts as expired.
        assert!(!registry.is_active(token));
        assert_eq!(registry.entry_count(), 0);
    }

    #[test]
    fn test_reactivation_extends_pause() {
        let (registry, clock) = registry_with_clock();
        let token = TokenId::generate();

        let first = registry.activate(token, Duration::minutes(15));
        clock.advance(Duration::minutes(10));
        let second = registry.activate(token, Duration::minutes(15));

        assert!(second > first);
        clock.advance(Duration::minutes(14));
        assert!(registry.is_active(token));
    }

    #[test]
    fn test_list_active_evicts_expired() {
        let (registry, clock) = registry_with_clock();
        let short = TokenId::generate();
        let long = TokenId::generate();

        registry.activate(short, Duration::minutes(5));
        registry.activate(long, Duration::minutes(30));
        clock.advance(Duration::minutes(10));

        let active = registry.list_active();
        assert_eq!(active.len(), 1);
        assert!(active.contains_key(&long));
        assert_eq!(registry.entry_count(), 1);
    }

    #[test]
    fn test_expiry_reports_active_pause_only() {
        let (registry, clock) = registry_with_clock();
        let token = TokenId::generate();

        assert!(registry.expiry(token).is_none());
        let expires = registry.activate(token, Duration::minutes(15));
        assert_eq!(registry.expiry(token), Some(expires));

        clock.advance(Duration::minutes(16));
        assert!(registry.expiry(token).is_none());
    }
}
