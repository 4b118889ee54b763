use std::env;
use std::time::Duration;

use roster_application::{EmptyCatalogPolicy, RoleAssignmentOptions};
use roster_core::{AppError, AppResult};
use roster_domain::DepartmentId;

const DEFAULT_SPECIAL_DEPARTMENTS: &str = "special-dept";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub options: RoleAssignmentOptions,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = RoleAssignmentOptions::default();

        let special_departments = lookup("ROSTER_SPECIAL_DEPARTMENTS")
            .unwrap_or_else(|| DEFAULT_SPECIAL_DEPARTMENTS.to_owned());
        let special_departments = parse_department_list(
            "ROSTER_SPECIAL_DEPARTMENTS",
            special_departments.as_str(),
        )?;

        let workflow_timeout = lookup("ROSTER_WORKFLOW_TIMEOUT_MS")
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_u64("ROSTER_WORKFLOW_TIMEOUT_MS", value.as_str()))
            .transpose()?
            .map(Duration::from_millis);

        let empty_catalog_policy = match lookup("ROSTER_EMPTY_CATALOG_POLICY") {
            Some(value) => parse_empty_catalog_policy(value.as_str())?,
            None => defaults.empty_catalog_policy(),
        };

        let options = RoleAssignmentOptions::new()
            .with_validate_existing_roles(parse_bool_or(
                &lookup,
                "ROSTER_VALIDATE_EXISTING_ROLES",
                defaults.validate_existing_roles(),
            )?)
            .with_validate_supervisors(parse_bool_or(
                &lookup,
                "ROSTER_VALIDATE_SUPERVISORS",
                defaults.validate_supervisors(),
            )?)
            .with_allow_partial_failures(parse_bool_or(
                &lookup,
                "ROSTER_ALLOW_PARTIAL_FAILURES",
                defaults.allow_partial_failures(),
            )?)
            .with_max_retry_attempts(match lookup("ROSTER_MAX_RETRY_ATTEMPTS") {
                Some(value) => parse_u32("ROSTER_MAX_RETRY_ATTEMPTS", value.as_str())?,
                None => defaults.max_retry_attempts(),
            })
            .with_retry_delay(match lookup("ROSTER_RETRY_DELAY_MS") {
                Some(value) => {
                    Duration::from_millis(parse_u64("ROSTER_RETRY_DELAY_MS", value.as_str())?)
                }
                None => defaults.retry_delay(),
            })
            .with_special_departments(special_departments)
            .with_transaction_timeout(match lookup("ROSTER_TRANSACTION_TIMEOUT_MS") {
                Some(value) => Duration::from_millis(parse_u64(
                    "ROSTER_TRANSACTION_TIMEOUT_MS",
                    value.as_str(),
                )?),
                None => defaults.transaction_timeout(),
            })
            .with_workflow_timeout(workflow_timeout)
            .with_empty_catalog_policy(empty_catalog_policy);

        options.validate()?;

        Ok(Self { options })
    }
}

fn parse_bool_or(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> AppResult<bool> {
    let Some(value) = lookup(name) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "invalid {name} value '{value}': expected true or false"
        ))),
    }
}

fn parse_u32(name: &str, value: &str) -> AppResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|error| AppError::Validation(format!("invalid {name} value '{value}': {error}")))
}

fn parse_u64(name: &str, value: &str) -> AppResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|error| AppError::Validation(format!("invalid {name} value '{value}': {error}")))
}

fn parse_department_list(name: &str, value: &str) -> AppResult<Vec<DepartmentId>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            DepartmentId::new(entry).map_err(|error| {
                AppError::Validation(format!("invalid {name} entry '{entry}': {error}"))
            })
        })
        .collect()
}

fn parse_empty_catalog_policy(value: &str) -> AppResult<EmptyCatalogPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "succeed" => Ok(EmptyCatalogPolicy::Succeed),
        "fail" => Ok(EmptyCatalogPolicy::Fail),
        _ => Err(AppError::Validation(format!(
            "invalid ROSTER_EMPTY_CATALOG_POLICY value '{value}': expected succeed or fail"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use roster_application::{EmptyCatalogPolicy, RoleAssignmentOptions};
    use roster_core::AppError;
    use roster_domain::DepartmentId;

    use super::CliConfig;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        CliConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn unset_environment_keeps_option_defaults() {
        let config = load(&[]).unwrap_or_else(|_| unreachable!());
        let defaults = RoleAssignmentOptions::default();

        assert_eq!(config.options.max_retry_attempts(), defaults.max_retry_attempts());
        assert_eq!(config.options.retry_delay(), defaults.retry_delay());
        assert_eq!(config.options.workflow_timeout(), None);
        assert_eq!(config.options.empty_catalog_policy(), EmptyCatalogPolicy::Fail);
        assert!(
            config
                .options
                .special_departments()
                .contains(&DepartmentId::new("SPECIAL-DEPT").unwrap_or_else(|_| unreachable!()))
        );
    }

    #[test]
    fn reads_every_recognized_variable() {
        let config = load(&[
            ("ROSTER_VALIDATE_EXISTING_ROLES", "false"),
            ("ROSTER_VALIDATE_SUPERVISORS", "FALSE"),
            ("ROSTER_ALLOW_PARTIAL_FAILURES", "true"),
            ("ROSTER_MAX_RETRY_ATTEMPTS", "5"),
            ("ROSTER_RETRY_DELAY_MS", "250"),
            ("ROSTER_SPECIAL_DEPARTMENTS", "finance, ops ,"),
            ("ROSTER_TRANSACTION_TIMEOUT_MS", "1000"),
            ("ROSTER_WORKFLOW_TIMEOUT_MS", "5000"),
            ("ROSTER_EMPTY_CATALOG_POLICY", "succeed"),
        ])
        .unwrap_or_else(|_| unreachable!());
        let options = config.options;

        assert!(!options.validate_existing_roles());
        assert!(!options.validate_supervisors());
        assert!(options.allow_partial_failures());
        assert_eq!(options.max_retry_attempts(), 5);
        assert_eq!(options.retry_delay(), Duration::from_millis(250));
        assert_eq!(options.special_departments().len(), 2);
        assert_eq!(options.transaction_timeout(), Duration::from_secs(1));
        assert_eq!(options.workflow_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(options.empty_catalog_policy(), EmptyCatalogPolicy::Succeed);
    }

    #[test]
    fn malformed_values_name_the_variable() {
        for (name, value) in [
            ("ROSTER_MAX_RETRY_ATTEMPTS", "-1"),
            ("ROSTER_ALLOW_PARTIAL_FAILURES", "sometimes"),
            ("ROSTER_RETRY_DELAY_MS", "fast"),
            ("ROSTER_EMPTY_CATALOG_POLICY", "ignore"),
        ] {
            let error = load(&[(name, value)]);

            match error {
                Err(AppError::Validation(message)) => assert!(message.contains(name)),
                other => panic!("expected validation error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_transaction_timeout_is_rejected() {
        let config = load(&[("ROSTER_TRANSACTION_TIMEOUT_MS", "0")]);

        assert!(matches!(config, Err(AppError::Validation(_))));
    }
}
