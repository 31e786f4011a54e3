use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    sync_runs: AtomicU64,
    remote_requests: AtomicU64,
    empty_responses: AtomicU64,
    records_fetched: AtomicU64,
    records_added: AtomicU64,
    import_rows_skipped: AtomicU64,
    snapshot_errors: AtomicU64,
}

impl Metrics {
    pub fn record_sync_run(&self) {
        self.sync_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self, record_count: usize) {
        self.remote_requests.fetch_add(1, Ordering::Relaxed);
        if record_count == 0 {
            self.empty_responses.fetch_add(1, Ordering::Relaxed);
        }
        self.records_fetched
            .fetch_add(record_count as u64, Ordering::Relaxed);
    }

    pub fn record_added(&self, count: usize) {
        self.records_added.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_import_skipped(&self, count: usize) {
        self.import_rows_skipped
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_snapshot_error(&self) {
        self.snapshot_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn remote_requests(&self) -> u64 {
        self.remote_requests.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let runs = self.sync_runs.load(Ordering::Relaxed);
        let requests = self.remote_requests.load(Ordering::Relaxed);
        let empty = self.empty_responses.load(Ordering::Relaxed);
        let fetched = self.records_fetched.load(Ordering::Relaxed);
        let added = self.records_added.load(Ordering::Relaxed);
        let skipped = self.import_rows_skipped.load(Ordering::Relaxed);
        let snapshot_errors = self.snapshot_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE lottery_sync_runs_total counter\n\
lottery_sync_runs_total {}\n\
# TYPE lottery_remote_requests_total counter\n\
lottery_remote_requests_total {}\n\
# TYPE lottery_empty_responses_total counter\n\
lottery_empty_responses_total {}\n\
# TYPE lottery_records_fetched_total counter\n\
lottery_records_fetched_total {}\n\
# TYPE lottery_records_added_total counter\n\
lottery_records_added_total {}\n\
# TYPE lottery_import_rows_skipped_total counter\n\
lottery_import_rows_skipped_total {}\n\
# TYPE lottery_snapshot_errors_total counter\n\
lottery_snapshot_errors_total {}\n",
            runs, requests, empty, fetched, added, skipped, snapshot_errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fetch_counts_as_request_and_empty_response() {
        let metrics = Metrics::default();
        metrics.record_fetch(0);
        metrics.record_fetch(12);
        let text = metrics.render_prometheus();
        assert!(text.contains("lottery_remote_requests_total 2\n"));
        assert!(text.contains("lottery_empty_responses_total 1\n"));
        assert!(text.contains("lottery_records_fetched_total 12\n"));
    }
}
