//! Basic metrics instrumentation for contact operations.
//!
//! Provides counters for writes, searches, exports and failures.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector shared by the service layer.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Contacts successfully created
    contacts_created_total: Arc<AtomicU64>,

    /// Contacts successfully updated
    contacts_updated_total: Arc<AtomicU64>,

    /// Contacts successfully deleted
    contacts_deleted_total: Arc<AtomicU64>,

    /// Writes rejected by validation
    validation_rejections_total: Arc<AtomicU64>,

    /// List/search calls served
    searches_total: Arc<AtomicU64>,

    /// CSV exports produced
    exports_total: Arc<AtomicU64>,

    /// Calls that failed because the store was unavailable
    storage_errors_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            contacts_created_total: Arc::new(AtomicU64::new(0)),
            contacts_updated_total: Arc::new(AtomicU64::new(0)),
            contacts_deleted_total: Arc::new(AtomicU64::new(0)),
            validation_rejections_total: Arc::new(AtomicU64::new(0)),
            searches_total: Arc::new(AtomicU64::new(0)),
            exports_total: Arc::new(AtomicU64::new(0)),
            storage_errors_total: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_contact_created(&self) {
        self.contacts_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_updated(&self) {
        self.contacts_updated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_deleted(&self) {
        self.contacts_deleted_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_search(&self) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_export(&self) {
        self.exports_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_error(&self) {
        self.storage_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            contacts_created_total: self.contacts_created_total.load(Ordering::Relaxed),
            contacts_updated_total: self.contacts_updated_total.load(Ordering::Relaxed),
            contacts_deleted_total: self.contacts_deleted_total.load(Ordering::Relaxed),
            validation_rejections_total: self.validation_rejections_total.load(Ordering::Relaxed),
            searches_total: self.searches_total.load(Ordering::Relaxed),
            exports_total: self.exports_total.load(Ordering::Relaxed),
            storage_errors_total: self.storage_errors_total.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        for counter in [
            &self.contacts_created_total,
            &self.contacts_updated_total,
            &self.contacts_deleted_total,
            &self.validation_rejections_total,
            &self.searches_total,
            &self.exports_total,
            &self.storage_errors_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSummary {
    pub contacts_created_total: u64,
    pub contacts_updated_total: u64,
    pub contacts_deleted_total: u64,
    pub validation_rejections_total: u64,
    pub searches_total: u64,
    pub exports_total: u64,
    pub storage_errors_total: u64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created={} updated={} deleted={} rejected={} searches={} exports={} storage_errors={}",
            self.contacts_created_total,
            self.contacts_updated_total,
            self.contacts_deleted_total,
            self.validation_rejections_total,
            self.searches_total,
            self.exports_total,
            self.storage_errors_total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.summary(), MetricsSummary::default());
    }

    #[test]
    fn test_record_and_summarize() {
        let metrics = Metrics::new();
        metrics.record_contact_created();
        metrics.record_contact_created();
        metrics.record_validation_rejection();
        metrics.record_export();

        let summary = metrics.summary();
        assert_eq!(summary.contacts_created_total, 2);
        assert_eq!(summary.validation_rejections_total, 1);
        assert_eq!(summary.exports_total, 1);
        assert_eq!(summary.contacts_deleted_total, 0);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_search();
        metrics.record_storage_error();
        metrics.reset();
        assert_eq!(metrics.summary(), MetricsSummary::default());
    }

    #[test]
    fn test_summary_display() {
        let metrics = Metrics::new();
        metrics.record_contact_updated();
        assert_eq!(
            metrics.summary().to_string(),
            "created=0 updated=1 deleted=0 rejected=0 searches=0 exports=0 storage_errors=0"
        );
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let metrics1 = metrics.clone();
        let metrics2 = metrics.clone();

        let handle1 = thread::spawn(move || {
            for _ in 0..100 {
                metrics1.record_search();
            }
        });

        let handle2 = thread::spawn(move || {
            for _ in 0..100 {
                metrics2.record_search();
            }
        });

        handle1.join().unwrap();
        handle2.join().unwrap();

        assert_eq!(metrics.summary().searches_total, 200);
    }
}
