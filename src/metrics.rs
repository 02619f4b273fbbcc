//! Lightweight global metrics for RecordKit.
//!
//! Process-wide relaxed atomic counters for the cursor engine:
//! - cursor lifecycle (created / halted)
//! - steps yielded
//! - early stops (explicit `stop()` or a consumer break)
//! - anomalies (unresolved keys skipped, zero-step halts)

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Cursor lifecycle -----
static CURSORS_CREATED: AtomicU64 = AtomicU64::new(0);
static CURSORS_HALTED: AtomicU64 = AtomicU64::new(0);

// ----- Steps -----
static STEPS_YIELDED: AtomicU64 = AtomicU64::new(0);
static EARLY_STOPS: AtomicU64 = AtomicU64::new(0);

// ----- Anomalies -----
static MISSING_KEYS_SKIPPED: AtomicU64 = AtomicU64::new(0);
static ZERO_STEP_HALTS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub cursors_created: u64,
    pub cursors_halted: u64,

    pub steps_yielded: u64,
    pub early_stops: u64,

    pub missing_keys_skipped: u64,
    pub zero_step_halts: u64,
}

impl MetricsSnapshot {
    pub fn avg_steps_per_cursor(&self) -> f64 {
        if self.cursors_created == 0 {
            0.0
        } else {
            self.steps_yielded as f64 / self.cursors_created as f64
        }
    }
}

pub fn record_cursor_created() {
    CURSORS_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cursor_halted() {
    CURSORS_HALTED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_step_yielded() {
    STEPS_YIELDED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_early_stop() {
    EARLY_STOPS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_missing_key_skipped() {
    MISSING_KEYS_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_zero_step_halt() {
    ZERO_STEP_HALTS.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        cursors_created: CURSORS_CREATED.load(Ordering::Relaxed),
        cursors_halted: CURSORS_HALTED.load(Ordering::Relaxed),

        steps_yielded: STEPS_YIELDED.load(Ordering::Relaxed),
        early_stops: EARLY_STOPS.load(Ordering::Relaxed),

        missing_keys_skipped: MISSING_KEYS_SKIPPED.load(Ordering::Relaxed),
        zero_step_halts: ZERO_STEP_HALTS.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    CURSORS_CREATED.store(0, Ordering::Relaxed);
    CURSORS_HALTED.store(0, Ordering::Relaxed);

    STEPS_YIELDED.store(0, Ordering::Relaxed);
    EARLY_STOPS.store(0, Ordering::Relaxed);

    MISSING_KEYS_SKIPPED.store(0, Ordering::Relaxed);
    ZERO_STEP_HALTS.store(0, Ordering::Relaxed);
}
