//! Application services and ports.

#![forbid(unsafe_code)]

mod role_assignment_ports;
mod role_assignment_service;

pub use role_assignment_ports::{
    AssignmentEvent, AssignmentEventSink, BackoffTimer, NoopTelemetryCollector, RoleCatalog,
    SupervisorResolver, TelemetryCollector, TokioBackoffTimer, Transaction, TransactionManager,
    UserRoleRepository, WorkAssignmentRepository,
};
pub use role_assignment_service::{
    EmptyCatalogPolicy, RoleAssignmentOptions, RoleAssignmentService, StandardRoleCatalog,
};
