//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod command;
mod identifiers;
mod outcome;
mod role;

pub use command::{CreateUserRoleCommand, WorkAssignmentCommand};
pub use identifiers::{DepartmentId, RoleId, SupervisorId, UserId};
pub use outcome::{
    AssignmentStatus, FailureReason, RoleAssignmentFailure, RoleAssignmentResult,
    RoleAssignmentSuccess,
};
pub use role::{ResourceType, RoleAssignment, RoleType, RoleTypeMetadata, WorkRoleCode};
