//! The access decision: role membership with an opt-in self-access path

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Decide whether a caller may perform an operation.
///
/// Allows when `required_roles` contains `caller_role`. Otherwise allows
/// only when self-access is enabled and both ids are present, non-empty
/// and equal. [`Role::Unrecognized`] never satisfies membership, even if
/// it appears in `required_roles`. An empty `required_roles` reduces to
/// the self-access branch alone.
pub fn decide(
    caller_role: Role,
    required_roles: &[Role],
    allow_self_access: bool,
    caller_id: Option<&str>,
    resource_owner_id: Option<&str>,
) -> bool {
    if caller_role.is_recognized() && required_roles.contains(&caller_role) {
        return true;
    }
    allow_self_access && is_self(caller_id, resource_owner_id)
}

fn is_self(caller_id: Option<&str>, resource_owner_id: Option<&str>) -> bool {
    match (caller_id, resource_owner_id) {
        (Some(c), Some(o)) => !c.is_empty() && !o.is_empty() && c == o,
        _ => false,
    }
}

/// Parameters of one authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    #[serde(default)]
    pub caller_role: Role,
    #[serde(default)]
    pub required_roles: Vec<Role>,
    #[serde(default)]
    pub allow_self_access: bool,
    #[serde(default)]
    pub caller_id: Option<String>,
    #[serde(default)]
    pub resource_owner_id: Option<String>,
}

impl AccessRequest {
    pub fn new(caller_role: Role, required_roles: impl Into<Vec<Role>>) -> Self {
        Self {
            caller_role,
            required_roles: required_roles.into(),
            allow_self_access: false,
            caller_id: None,
            resource_owner_id: None,
        }
    }

    /// Enable the self-access path for `caller_id` acting on a resource
    /// owned by `resource_owner_id`.
    pub fn self_access(mut self, caller_id: impl Into<String>, resource_owner_id: impl Into<String>) -> Self {
        self.allow_self_access = true;
        self.caller_id = Some(caller_id.into());
        self.resource_owner_id = Some(resource_owner_id.into());
        self
    }

    pub fn decide(&self) -> bool {
        decide(
            self.caller_role,
            &self.required_roles,
            self.allow_self_access,
            self.caller_id.as_deref(),
            self.resource_owner_id.as_deref(),
        )
    }
}
