//! Role identifiers and role requirements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};
use crate::naming;

/// A role identifier in canonical lower-case form.
///
/// Two roles are equal when their canonical forms are equal, so
/// `"Administrator"` and `"administrator"` name the same role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Parse a role identifier, normalizing it to canonical form.
    ///
    /// Fails when the identifier is blank.
    pub fn parse(raw: &str) -> AccessResult<Self> {
        let canonical = canonicalize(raw);
        if canonical.is_empty() {
            return Err(AccessError::Configuration(format!(
                "role identifier {raw:?} is blank"
            )));
        }
        Ok(Self(canonical))
    }

    /// The canonical identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label, e.g. `"store_manager"` becomes `"Store manager"`.
    pub fn human_name(&self) -> String {
        naming::humanize(&self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical form used for both registration and lookups.
pub(crate) fn canonicalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The roles a registration applies to: a single identifier or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRequirement {
    One(String),
    Many(Vec<String>),
}

impl RoleRequirement {
    /// Normalize into a non-empty, duplicate-free list of roles.
    ///
    /// Declaration order is preserved.
    pub fn into_roles(self) -> AccessResult<Vec<Role>> {
        let raw = match self {
            RoleRequirement::One(role) => vec![role],
            RoleRequirement::Many(roles) => roles,
        };

        let mut roles: Vec<Role> = Vec::with_capacity(raw.len());
        for identifier in &raw {
            let role = Role::parse(identifier)?;
            if !roles.contains(&role) {
                roles.push(role);
            }
        }

        if roles.is_empty() {
            return Err(AccessError::Configuration(
                "role requirement names no roles".to_string(),
            ));
        }

        Ok(roles)
    }
}

impl From<&str> for RoleRequirement {
    fn from(role: &str) -> Self {
        RoleRequirement::One(role.to_string())
    }
}

impl From<String> for RoleRequirement {
    fn from(role: String) -> Self {
        RoleRequirement::One(role)
    }
}

impl From<Vec<String>> for RoleRequirement {
    fn from(roles: Vec<String>) -> Self {
        RoleRequirement::Many(roles)
    }
}

impl From<Vec<&str>> for RoleRequirement {
    fn from(roles: Vec<&str>) -> Self {
        RoleRequirement::Many(roles.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for RoleRequirement {
    fn from(roles: &[&str]) -> Self {
        RoleRequirement::Many(roles.iter().map(|r| r.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RoleRequirement {
    fn from(roles: [&str; N]) -> Self {
        RoleRequirement::Many(roles.iter().map(|r| r.to_string()).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn role_is_lowercased_and_trimmed() {
        let role = Role::parse("  Administrator ").unwrap();
        assert_eq!(role.as_str(), "administrator");
        assert_eq!(role, Role::parse("ADMINISTRATOR").unwrap());
    }

    #[test]
    fn blank_role_is_rejected() {
        assert!(matches!(
            Role::parse("   "),
            Err(AccessError::Configuration(_))
        ));
    }

    #[test]
    fn role_human_name() {
        assert_eq!(
            Role::parse("store_manager").unwrap().human_name(),
            "Store manager"
        );
    }

    #[test]
    fn single_requirement() {
        let roles = RoleRequirement::from("Customer").into_roles().unwrap();
        assert_eq!(roles, vec![Role::parse("customer").unwrap()]);
    }

    #[test]
    fn list_requirement_dedupes_in_order() {
        let roles = RoleRequirement::from(["manager", "Administrator", "MANAGER"])
            .into_roles()
            .unwrap();
        let names: Vec<_> = roles.iter().map(Role::as_str).collect();
        assert_eq!(names, vec!["manager", "administrator"]);
    }

    #[test]
    fn empty_requirement_is_rejected() {
        let result = RoleRequirement::from(Vec::<String>::new()).into_roles();
        assert!(matches!(result, Err(AccessError::Configuration(_))));
    }

    #[test]
    fn requirement_with_blank_entry_is_rejected() {
        let result = RoleRequirement::from(vec!["admin", ""]).into_roles();
        assert!(matches!(result, Err(AccessError::Configuration(_))));
    }

    #[test]
    fn requirement_deserializes_from_string_or_list() {
        let one: RoleRequirement = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(one, RoleRequirement::One("admin".to_string()));

        let many: RoleRequirement = serde_json::from_str(r#"["admin", "manager"]"#).unwrap();
        assert_eq!(
            many,
            RoleRequirement::Many(vec!["admin".to_string(), "manager".to_string()])
        );
    }
}
