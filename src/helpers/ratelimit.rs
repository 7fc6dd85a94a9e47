use lazy_static::lazy_static;
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Per-service rate-limit state
struct ServiceLimit {
    /// Minimum interval between two requests
    min_interval: Duration,
    /// When the service may be used again
    next_allowed: Option<Instant>,
}

lazy_static! {
    static ref SERVICES: Mutex<HashMap<String, ServiceLimit>> = Mutex::new(HashMap::new());
}

/// Register a service with a minimum interval between requests in milliseconds
///
/// An interval of 0 disables throttling for that service. Re-registering a
/// service replaces its interval but keeps the request history.
pub fn register_service(name: &str, min_interval_ms: u64) {
    let mut services = match SERVICES.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    debug!(
        "Registering rate limit for service '{}': {} ms",
        name, min_interval_ms
    );

    services
        .entry(name.to_string())
        .and_modify(|limit| limit.min_interval = Duration::from_millis(min_interval_ms))
        .or_insert(ServiceLimit {
            min_interval: Duration::from_millis(min_interval_ms),
            next_allowed: None,
        });
}

/// Block until the registered interval since the previous request has elapsed
///
/// Records the current request slot before sleeping, so interleaved callers
/// each get their own slot. Unregistered services are not throttled.
pub fn acquire(name: &str) {
    let wait = {
        let mut services = match SERVICES.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let limit = match services.get_mut(name) {
            Some(limit) => limit,
            None => return,
        };

        if limit.min_interval.is_zero() {
            return;
        }

        let now = Instant::now();
        let start = match limit.next_allowed {
            Some(next) if next > now => next,
            _ => now,
        };
        limit.next_allowed = Some(start + limit.min_interval);
        start.saturating_duration_since(now)
    };

    if !wait.is_zero() {
        debug!("Rate limit for '{}': waiting {:?}", name, wait);
        thread::sleep(wait);
    }
}
