//! Roster command-line runner for standard role assignment.

#![forbid(unsafe_code)]

mod cli_config;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use roster_application::RoleAssignmentService;
use roster_core::{AppError, AppResult};
use roster_domain::{DepartmentId, RoleAssignmentResult, RoleType, SupervisorId, UserId};
use roster_infrastructure::{
    InMemoryTransactionManager, InMemoryUserRoleRepository, InMemoryWorkAssignmentRepository,
    MetricsTelemetryCollector, StaticSupervisorResolver, TracingAssignmentEventSink,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli_config::CliConfig;

const SEEDED_USERS: [(&str, &str); 4] = [
    ("u-1001", "special-dept"),
    ("u-1002", "it-dept"),
    ("u-1003", "it-dept"),
    ("u-1004", "hr-dept"),
];

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = CliConfig::load()?;
    let supervisor_resolver = Arc::new(seed_supervisors()?);
    let user_role_repository = Arc::new(seed_user_roles()?);
    let work_assignment_repository = Arc::new(InMemoryWorkAssignmentRepository::new());
    let transaction_manager = Arc::new(InMemoryTransactionManager::new());
    let service = RoleAssignmentService::new_standard(
        user_role_repository.clone(),
        work_assignment_repository.clone(),
        supervisor_resolver,
        Arc::new(TracingAssignmentEventSink::new()),
        config.options.clone(),
    )?
    .with_telemetry(Arc::new(MetricsTelemetryCollector::new()))
    .with_transaction_manager(transaction_manager.clone());

    info!(
        max_retry_attempts = config.options.max_retry_attempts(),
        allow_partial_failures = config.options.allow_partial_failures(),
        special_departments = config.options.special_departments().len(),
        "roster runner starting"
    );

    for (user, department) in SEEDED_USERS {
        let user_id = UserId::new(user)?;
        let department_id = DepartmentId::new(department)?;

        match service
            .assign_standard_roles(&user_id, &department_id, Utc::now())
            .await
        {
            Ok(result) => {
                report(&user_id, &result)?;
                let roles = user_role_repository.roles_for(&user_id).await;
                let work = work_assignment_repository.assignments_for(&user_id).await;
                info!(
                    user_id = %user_id,
                    stored_roles = roles.len(),
                    stored_work_assignments = work.len(),
                    "stored records"
                );
            }
            Err(error) => warn!(
                user_id = %user_id,
                department_id = %department_id,
                error = %error,
                "role assignment could not run"
            ),
        }
    }

    let stats = transaction_manager.stats();
    info!(
        begun = stats.begun,
        committed = stats.committed,
        rolled_back = stats.rolled_back,
        "roster runner finished"
    );

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn seed_supervisors() -> AppResult<StaticSupervisorResolver> {
    Ok(StaticSupervisorResolver::new()
        .with_department(
            DepartmentId::new("special-dept")?,
            SupervisorId::new("sup-special-manager")?,
            SupervisorId::new("sup-special-coordinator")?,
        )
        .with_department(
            DepartmentId::new("it-dept")?,
            SupervisorId::new("sup-it-manager")?,
            SupervisorId::new("sup-it-coordinator")?,
        ))
}

fn seed_user_roles() -> AppResult<InMemoryUserRoleRepository> {
    Ok(InMemoryUserRoleRepository::with_existing_roles(
        HashMap::from([(
            UserId::new("u-1003")?,
            HashSet::from([RoleType::DepartmentManager]),
        )]),
    ))
}

fn report(user_id: &UserId, result: &RoleAssignmentResult) -> AppResult<()> {
    let body = serde_json::to_string_pretty(result).map_err(|error| {
        AppError::Internal(format!("failed to serialize assignment result: {error}"))
    })?;

    if result.is_success() {
        info!(user_id = %user_id, status = ?result.status(), "roles assigned");
    } else {
        for message in result.failure_messages() {
            warn!(user_id = %user_id, failure = %message, "role not assigned");
        }
    }

    println!("{body}");
    Ok(())
}
