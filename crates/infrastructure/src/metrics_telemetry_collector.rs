use std::time::Duration;

use metrics::{counter, histogram};
use roster_application::TelemetryCollector;
use roster_domain::RoleType;

const ROLE_ASSIGNMENTS_TOTAL: &str = "roster_role_assignments_total";
const ROLE_ASSIGNMENT_DURATION_SECONDS: &str = "roster_role_assignment_duration_seconds";
const WORK_ASSIGNMENT_DURATION_SECONDS: &str = "roster_work_assignment_duration_seconds";
const ROLE_ASSIGNMENT_RETRIES_TOTAL: &str = "roster_role_assignment_retries_total";

/// Telemetry collector that forwards measurements to the `metrics` facade.
///
/// Nothing is exported until the host process installs a recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsTelemetryCollector;

impl MetricsTelemetryCollector {
    /// Creates a new collector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TelemetryCollector for MetricsTelemetryCollector {
    fn record_role_assignment(&self, role_type: RoleType, succeeded: bool, duration: Duration) {
        let outcome = if succeeded { "succeeded" } else { "failed" };
        counter!(
            ROLE_ASSIGNMENTS_TOTAL,
            "role_type" => role_type.as_str(),
            "outcome" => outcome
        )
        .increment(1);
        histogram!(
            ROLE_ASSIGNMENT_DURATION_SECONDS,
            "role_type" => role_type.as_str()
        )
        .record(duration.as_secs_f64());
    }

    fn record_work_assignment(&self, duration: Duration) {
        histogram!(WORK_ASSIGNMENT_DURATION_SECONDS).record(duration.as_secs_f64());
    }

    fn record_retry(&self, role_type: RoleType, attempt: u32) {
        counter!(
            ROLE_ASSIGNMENT_RETRIES_TOTAL,
            "role_type" => role_type.as_str(),
            "attempt" => attempt.to_string()
        )
        .increment(1);
    }
}
