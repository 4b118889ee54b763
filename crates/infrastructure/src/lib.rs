//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_transaction_manager;
mod in_memory_user_role_repository;
mod in_memory_work_assignment_repository;
mod metrics_telemetry_collector;
mod static_supervisor_resolver;
mod tracing_assignment_event_sink;

pub use in_memory_transaction_manager::{InMemoryTransactionManager, TransactionStats};
pub use in_memory_user_role_repository::InMemoryUserRoleRepository;
pub use in_memory_work_assignment_repository::InMemoryWorkAssignmentRepository;
pub use metrics_telemetry_collector::MetricsTelemetryCollector;
pub use static_supervisor_resolver::StaticSupervisorResolver;
pub use tracing_assignment_event_sink::TracingAssignmentEventSink;
