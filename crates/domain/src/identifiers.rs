//! Identifier value types used at the workflow boundary.
//!
//! Text identifiers are validated once at construction and never mutated.
//! [`DepartmentId`] compares and hashes on a lowercase key so that
//! `"IT-Dept"` and `"it-dept"` name the same department.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use roster_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn trimmed_text(kind: &str, value: impl Into<String>) -> AppResult<String> {
    let value = NonEmptyString::new(value)
        .map_err(|_| AppError::Validation(format!("{kind} must not be empty or whitespace")))?;

    Ok(value.as_str().trim().to_owned())
}

/// Identifier of the user receiving role grants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        trimmed_text("user id", value).map(Self)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for UserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Department identifier with case-insensitive equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentId {
    value: String,
    normalized: String,
}

impl DepartmentId {
    /// Creates a validated department identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = trimmed_text("department id", value)?;
        let normalized = value.to_lowercase();

        Ok(Self { value, normalized })
    }

    /// Returns the identifier as supplied by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Returns the lowercase key used for comparison.
    #[must_use]
    pub fn normalized(&self) -> &str {
        self.normalized.as_str()
    }
}

impl PartialEq for DepartmentId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for DepartmentId {}

impl Hash for DepartmentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl TryFrom<String> for DepartmentId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DepartmentId> for String {
    fn from(value: DepartmentId) -> Self {
        value.value
    }
}

impl Display for DepartmentId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identifier of a supervising user resolved for a department.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SupervisorId(String);

impl SupervisorId {
    /// Creates a validated supervisor identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        trimmed_text("supervisor id", value).map(Self)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SupervisorId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SupervisorId> for String {
    fn from(value: SupervisorId) -> Self {
        value.0
    }
}

impl Display for SupervisorId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identifier of a created user-role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    use proptest::prelude::*;

    use super::{DepartmentId, RoleId, SupervisorId, UserId};

    fn hash_of(value: &DepartmentId) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(UserId::new("").is_err());
        assert!(DepartmentId::new("  \t").is_err());
        assert!(SupervisorId::new("\n").is_err());
    }

    #[test]
    fn department_id_keeps_caller_spelling() {
        let department = DepartmentId::new(" Special-Dept ");
        assert!(department.is_ok());

        let department = department.unwrap_or_else(|_| unreachable!());
        assert_eq!(department.as_str(), "Special-Dept");
        assert_eq!(department.normalized(), "special-dept");
        assert_eq!(department.to_string(), "Special-Dept");
    }

    #[test]
    fn role_ids_are_unique() {
        assert_ne!(RoleId::new(), RoleId::new());
    }

    #[test]
    fn department_id_deserializes_with_validation() {
        let parsed = serde_json::from_str::<DepartmentId>("\"it-dept\"");
        assert!(parsed.is_ok());

        let rejected = serde_json::from_str::<DepartmentId>("\"   \"");
        assert!(rejected.is_err());
    }

    proptest! {
        #[test]
        fn department_equality_ignores_case(raw in "[A-Za-z][A-Za-z0-9-]{0,15}") {
            let lower = DepartmentId::new(raw.to_lowercase()).unwrap_or_else(|_| unreachable!());
            let upper = DepartmentId::new(raw.to_uppercase()).unwrap_or_else(|_| unreachable!());
            let original = DepartmentId::new(raw.clone()).unwrap_or_else(|_| unreachable!());

            prop_assert_eq!(&lower, &upper);
            prop_assert_eq!(&lower, &original);
            prop_assert_eq!(hash_of(&lower), hash_of(&upper));
        }

        #[test]
        fn special_set_membership_ignores_case(raw in "[A-Za-z][A-Za-z0-9-]{0,15}") {
            let special: HashSet<DepartmentId> =
                HashSet::from([DepartmentId::new(raw.to_uppercase()).unwrap_or_else(|_| unreachable!())]);
            let probe = DepartmentId::new(raw.to_lowercase()).unwrap_or_else(|_| unreachable!());

            prop_assert!(special.contains(&probe));
        }
    }
}
