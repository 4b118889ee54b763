mod backoff;
mod catalog;
mod events;
mod repositories;
mod supervisors;
mod telemetry;
mod transactions;

pub use backoff::{BackoffTimer, TokioBackoffTimer};
pub use catalog::RoleCatalog;
pub use events::{AssignmentEvent, AssignmentEventSink};
pub use repositories::{UserRoleRepository, WorkAssignmentRepository};
pub use supervisors::SupervisorResolver;
pub use telemetry::{NoopTelemetryCollector, TelemetryCollector};
pub use transactions::{Transaction, TransactionManager};
