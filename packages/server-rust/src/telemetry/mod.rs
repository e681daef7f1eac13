//! Request, error, and calculation counters plus process gauges.
//!
//! [`Telemetry`] owns a private Prometheus recorder (never installed as the
//! global `metrics` recorder), so each server instance, and each test, gets
//! independent counters. Handlers reach it through `AppState`.

pub mod memory;

use std::time::{Duration, Instant};

use metrics::{Counter, Gauge, Key, Label, Level, Metadata, Recorder};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

pub use memory::{MemorySampler, MemoryUsage};

/// Total HTTP requests received.
pub const REQUESTS_TOTAL: &str = "http_requests_total";
/// Requests rejected by validation.
pub const ERRORS_TOTAL: &str = "http_errors_total";
/// Calculations completed.
pub const CALCULATIONS_TOTAL: &str = "calculations_total";
/// Process memory, labelled by `type`. Series name kept for dashboard compatibility.
pub const MEMORY_USAGE_BYTES: &str = "nodejs_memory_usage_bytes";
/// Seconds since the server started. Series name kept for dashboard compatibility.
pub const UPTIME_SECONDS: &str = "nodejs_uptime_seconds";

struct MemoryGauges {
    resident: Gauge,
    virtual_size: Gauge,
}

/// Process-lifetime telemetry for the calculator server.
pub struct Telemetry {
    handle: PrometheusHandle,
    requests: Counter,
    errors: Counter,
    calculations: Counter,
    memory: MemoryGauges,
    sampler: MemorySampler,
    uptime: Gauge,
    started: Instant,
}

impl Telemetry {
    /// Registers all series on a fresh recorder. Counters start at zero.
    #[must_use]
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();

        describe(&recorder, REQUESTS_TOTAL, "Total number of HTTP requests");
        describe(&recorder, ERRORS_TOTAL, "Total number of HTTP errors");
        describe(&recorder, CALCULATIONS_TOTAL, "Total number of calculations performed");
        describe_gauge(&recorder, MEMORY_USAGE_BYTES, "Memory usage in bytes");
        describe_gauge(&recorder, UPTIME_SECONDS, "Uptime in seconds");

        let memory_gauge = |kind: &'static str| {
            let labels = vec![Label::new("type", kind)];
            gauge(&recorder, Key::from_parts(MEMORY_USAGE_BYTES, labels))
        };

        Self {
            requests: counter(&recorder, REQUESTS_TOTAL),
            errors: counter(&recorder, ERRORS_TOTAL),
            calculations: counter(&recorder, CALCULATIONS_TOTAL),
            memory: MemoryGauges {
                resident: memory_gauge("rss"),
                virtual_size: memory_gauge("virtual"),
            },
            sampler: MemorySampler::new(),
            uptime: gauge(&recorder, Key::from_name(UPTIME_SECONDS)),
            handle: recorder.handle(),
            started: Instant::now(),
        }
    }

    /// Counts one incoming HTTP request.
    pub fn record_request(&self) {
        self.requests.increment(1);
    }

    /// Counts one request rejected by validation.
    pub fn record_error(&self) {
        self.errors.increment(1);
    }

    /// Counts one completed calculation.
    pub fn record_calculation(&self) {
        self.calculations.increment(1);
    }

    /// Time since this telemetry object was created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Refreshes the process gauges and renders every series in the
    /// Prometheus text exposition format.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self) -> String {
        let usage = self.sampler.sample();
        self.memory.resident.set(usage.resident as f64);
        self.memory.virtual_size.set(usage.virtual_size as f64);
        self.uptime.set(self.uptime().as_secs_f64());

        self.handle.render()
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

fn metadata() -> Metadata<'static> {
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()))
}

fn describe(recorder: &PrometheusRecorder, name: &'static str, help: &'static str) {
    recorder.describe_counter(name.into(), None, help.into());
}

fn describe_gauge(recorder: &PrometheusRecorder, name: &'static str, help: &'static str) {
    recorder.describe_gauge(name.into(), None, help.into());
}

fn counter(recorder: &PrometheusRecorder, name: &'static str) -> Counter {
    recorder.register_counter(&Key::from_name(name), &metadata())
}

fn gauge(recorder: &PrometheusRecorder, key: Key) -> Gauge {
    recorder.register_gauge(&key, &metadata())
}
