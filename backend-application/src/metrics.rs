use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    cycles_completed: AtomicU64,
    cycles_skipped: AtomicU64,
    cycle_errors: AtomicU64,
    events_folded: AtomicU64,
    lines_unrecognized: AtomicU64,
    notifications_delivered: AtomicU64,
    notification_failures: AtomicU64,
}

impl Metrics {
    pub fn record_cycle(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cycle_skipped(&self) {
        self.cycles_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cycle_error(&self) {
        self.cycle_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_folded(&self, count: u64) {
        self.events_folded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_unrecognized(&self, count: u64) {
        self.lines_unrecognized.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_notification(&self) {
        self.notifications_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification_failure(&self) {
        self.notification_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let completed = self.cycles_completed.load(Ordering::Relaxed);
        let skipped = self.cycles_skipped.load(Ordering::Relaxed);
        let errors = self.cycle_errors.load(Ordering::Relaxed);
        let folded = self.events_folded.load(Ordering::Relaxed);
        let unrecognized = self.lines_unrecognized.load(Ordering::Relaxed);
        let delivered = self.notifications_delivered.load(Ordering::Relaxed);
        let failures = self.notification_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE palisade_cycles_completed_total counter\n\
palisade_cycles_completed_total {}\n\
# TYPE palisade_cycles_skipped_total counter\n\
palisade_cycles_skipped_total {}\n\
# TYPE palisade_cycle_errors_total counter\n\
palisade_cycle_errors_total {}\n\
# TYPE palisade_events_folded_total counter\n\
palisade_events_folded_total {}\n\
# TYPE palisade_lines_unrecognized_total counter\n\
palisade_lines_unrecognized_total {}\n\
# TYPE palisade_notifications_delivered_total counter\n\
palisade_notifications_delivered_total {}\n\
# TYPE palisade_notification_failures_total counter\n\
palisade_notification_failures_total {}\n",
            completed, skipped, errors, folded, unrecognized, delivered, failures
        )
    }
}
