use std::time::Duration;

use roster_domain::RoleType;

/// Metrics sink for assignment workflows. Implementations must not block.
pub trait TelemetryCollector: Send + Sync {
    /// Records the outcome and duration of one role.
    fn record_role_assignment(&self, role_type: RoleType, succeeded: bool, duration: Duration);

    /// Records the duration of one work-assignment write.
    fn record_work_assignment(&self, duration: Duration);

    /// Records that a role attempt is being retried.
    fn record_retry(&self, role_type: RoleType, attempt: u32);
}

/// Telemetry collector that drops every measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetryCollector;

impl TelemetryCollector for NoopTelemetryCollector {
    fn record_role_assignment(&self, _role_type: RoleType, _succeeded: bool, _duration: Duration) {}

    fn record_work_assignment(&self, _duration: Duration) {}

    fn record_retry(&self, _role_type: RoleType, _attempt: u32) {}
}
