//! Configuration validation — one-shot and debounced.
//!
//! [`Validator`] runs a provider's validation hook and reports a uniform
//! [`ValidationOutcome`]. [`DebouncedValidator`] adds the interactive
//! contract: rapid edits coalesce to one validation after a quiet period,
//! an integer in-flight counter models overlapping calls, and a
//! minimum-duration floor keeps the "validating" indicator from flickering
//! when a check resolves faster than the quiet period.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use switchboard_core::{CredentialStore, RegistryError, ValidationOutcome};

use crate::table::DescriptorTable;

/// Credential store shared across the registry's components.
pub type SharedStore = Arc<RwLock<CredentialStore>>;

/// Default quiet period for interactive re-validation.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

// ─────────────────────────────────────────────
// One-shot validator
// ─────────────────────────────────────────────

/// Runs a provider's validation hook against its stored configuration.
#[derive(Clone)]
pub struct Validator {
    table: Arc<DescriptorTable>,
    store: SharedStore,
}

impl Validator {
    pub fn new(table: Arc<DescriptorTable>, store: SharedStore) -> Self {
        Self { table, store }
    }

    /// Validate `id`'s stored configuration.
    ///
    /// Fails only when the descriptor or the stored config is missing; the
    /// validation hook itself always resolves to an outcome — adapters
    /// convert their own network failures into `valid: false`.
    pub async fn validate(&self, id: &str) -> Result<ValidationOutcome, RegistryError> {
        let descriptor = self
            .table
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
        let config = {
            let store = self.store.read().unwrap();
            store
                .get(id)
                .cloned()
                .ok_or_else(|| RegistryError::MissingConfig(id.to_string()))?
        };

        let outcome = descriptor.adapter.validate(&config).await;
        debug!(provider = id, valid = outcome.valid, "validation resolved");
        Ok(outcome)
    }
}

// ─────────────────────────────────────────────
// Debounced validator
// ─────────────────────────────────────────────

#[derive(Default)]
struct DebounceShared {
    /// Monotonic per-id generation; a queued validation only fires if its
    /// generation is still current when the quiet period elapses.
    generations: Mutex<HashMap<String, u64>>,
    /// Integer in-flight counter per id. Deliberately not a boolean: an
    /// outcome from an older overlapping call must not clear the indicator
    /// while a newer call is still pending.
    in_flight: Mutex<HashMap<String, u32>>,
    /// Most recently completed outcome per id (last-write-wins).
    outcomes: Mutex<HashMap<String, ValidationOutcome>>,
}

/// Debounced wrapper around [`Validator`] for interactive use.
#[derive(Clone)]
pub struct DebouncedValidator {
    validator: Validator,
    quiet_period: Duration,
    shared: Arc<DebounceShared>,
}

impl DebouncedValidator {
    pub fn new(validator: Validator, quiet_period: Duration) -> Self {
        Self {
            validator,
            quiet_period,
            shared: Arc::new(DebounceShared::default()),
        }
    }

    /// Request a validation of `id` after the quiet period.
    ///
    /// Rapid successive requests collapse into one validation that reads the
    /// configuration current at fire time — the final value, not the
    /// intermediate ones. Returns the task handle so callers can await
    /// settlement if they need to.
    pub fn request(&self, id: &str) -> tokio::task::JoinHandle<()> {
        let generation = {
            let mut generations = self.shared.generations.lock().unwrap();
            let slot = generations.entry(id.to_string()).or_insert(0);
            *slot += 1;
            *slot
        };

        let this = self.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(this.quiet_period).await;
            let current = {
                let generations = this.shared.generations.lock().unwrap();
                generations.get(&id).copied()
            };
            if current != Some(generation) {
                // superseded by a newer edit
                return;
            }
            this.run(&id).await;
        })
    }

    /// Run one validation, bookkeeping the in-flight counter and applying the
    /// minimum-duration floor.
    async fn run(&self, id: &str) {
        {
            let mut in_flight = self.shared.in_flight.lock().unwrap();
            *in_flight.entry(id.to_string()).or_insert(0) += 1;
        }

        let started = Instant::now();
        let outcome = match self.validator.validate(id).await {
            Ok(outcome) => outcome,
            Err(e) => ValidationOutcome::fail(e.to_string()),
        };

        // Floor: a check that resolved faster than the quiet period holds the
        // "validating" state for the remainder. A slower check adds no delay.
        let elapsed = started.elapsed();
        if elapsed < self.quiet_period {
            tokio::time::sleep(self.quiet_period - elapsed).await;
        }

        let mut outcomes = self.shared.outcomes.lock().unwrap();
        outcomes.insert(id.to_string(), outcome);
        drop(outcomes);

        let mut in_flight = self.shared.in_flight.lock().unwrap();
        if let Some(count) = in_flight.get_mut(id) {
            *count = count.saturating_sub(1);
        }
    }

    /// Validate immediately, still counted as in-flight but without the
    /// debounce delay or the floor.
    pub async fn validate_now(&self, id: &str) -> Result<ValidationOutcome, RegistryError> {
        {
            let mut in_flight = self.shared.in_flight.lock().unwrap();
            *in_flight.entry(id.to_string()).or_insert(0) += 1;
        }

        let result = self.validator.validate(id).await;

        if let Ok(outcome) = &result {
            let mut outcomes = self.shared.outcomes.lock().unwrap();
            outcomes.insert(id.to_string(), outcome.clone());
        }
        let mut in_flight = self.shared.in_flight.lock().unwrap();
        if let Some(count) = in_flight.get_mut(id) {
            *count = count.saturating_sub(1);
        }

        result
    }

    /// Number of validations currently in flight for `id`.
    pub fn in_flight(&self, id: &str) -> u32 {
        self.shared
            .in_flight
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    /// Whether any validation is in flight for `id`.
    pub fn is_validating(&self, id: &str) -> bool {
        self.in_flight(id) > 0
    }

    /// The most recently recorded outcome for `id`.
    pub fn last_outcome(&self, id: &str) -> Option<ValidationOutcome> {
        self.shared.outcomes.lock().unwrap().get(id).cloned()
    }

    /// Drop cached validation state for `id` and cancel pending requests.
    /// Used when a provider is reset to defaults.
    pub fn clear(&self, id: &str) {
        {
            // bumping the generation invalidates queued (not-yet-fired) requests
            let mut generations = self.shared.generations.lock().unwrap();
            if let Some(slot) = generations.get_mut(id) {
                *slot += 1;
            }
        }
        self.shared.outcomes.lock().unwrap().remove(id);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
