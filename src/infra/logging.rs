pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// Log a metric line and record it through the `metrics` facade.
/// `*_total` names are counters, everything else is a histogram sample.
/// Without an installed recorder the facade call is a no-op.
pub fn log_metric(tool: &str, metric: &str, value: f64) {
    tracing::info!(tool = tool, metric = metric, value = value, "metric");
    let name = format!("{tool}.{metric}");
    if metric.ends_with("_total") {
        metrics::counter!(name).increment(value.max(0.0) as u64);
    } else {
        metrics::histogram!(name).record(value);
    }
}

#[cfg(test)]
mod tests {
    use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
    use std::sync::Mutex;

    /// Remembers which kind of metric each name was registered as.
    #[derive(Default)]
    struct KindRecorder(Mutex<Vec<(String, &'static str)>>);

    impl KindRecorder {
        fn push(&self, key: &Key, kind: &'static str) {
            self.0.lock().unwrap().push((key.name().to_string(), kind));
        }
    }

    impl Recorder for KindRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.push(key, "counter");
            Counter::noop()
        }
        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.push(key, "gauge");
            Gauge::noop()
        }
        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.push(key, "histogram");
            Histogram::noop()
        }
    }

    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }

    #[test]
    fn log_metric_without_recorder_is_harmless() {
        super::log_metric("classify", "card_total", 1.0);
    }

    #[test]
    fn totals_are_counters_and_latency_is_a_histogram() {
        let recorder = KindRecorder::default();
        metrics::with_local_recorder(&recorder, || {
            super::log_metric("classify", "card_total", 1.0);
            super::log_metric("classify", "miss_total", 1.0);
            super::log_metric("classify", "remote_error_total", 1.0);
            super::log_metric("classify", "remote_latency_ms", 12.0);
        });
        let seen = recorder.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ("classify.card_total".to_string(), "counter"),
                ("classify.miss_total".to_string(), "counter"),
                ("classify.remote_error_total".to_string(), "counter"),
                ("classify.remote_latency_ms".to_string(), "histogram"),
            ]
        );
    }
}
