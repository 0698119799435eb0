//! Gauge primitives.
//!
//! Explicitly constructed handles owned by the engine — there is no
//! process-global registry. A [`Gauge`] holds one value; a [`GaugeVec`]
//! holds one value per label combination. Both are last-write-wins with no
//! history.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// A named gauge holding a single `f64` observation.
///
/// Reads as `0.0` until first set. Writes are atomic (the value is stored
/// as its bit pattern), so concurrent render never observes a torn value.
pub struct Gauge {
    name: &'static str,
    help: &'static str,
    bits: AtomicU64,
}

impl Gauge {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Overwrite the current value.
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// The current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }
}

/// A family of gauges indexed by a single label.
///
/// Entries are kept in a sorted map so exposition order is deterministic.
pub struct GaugeVec {
    name: &'static str,
    help: &'static str,
    label: &'static str,
    values: RwLock<BTreeMap<String, f64>>,
}

impl GaugeVec {
    pub fn new(name: &'static str, help: &'static str, label: &'static str) -> Self {
        Self {
            name,
            help,
            label,
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Overwrite the value for one label combination, creating it if absent.
    pub fn set(&self, label_value: &str, value: f64) {
        let mut values = match self.values.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(label_value.to_string(), value);
    }

    /// The current value for one label combination, if it exists.
    pub fn get(&self, label_value: &str) -> Option<f64> {
        let values = match self.values.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.get(label_value).copied()
    }

    /// All entries, sorted by label value.
    pub fn snapshot(&self) -> Vec<(String, f64)> {
        let values = match self.values.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
