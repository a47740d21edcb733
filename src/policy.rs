//! Per-operation access policies
//!
//! A [`Policy`] pairs a role requirement with the self-access flag. The
//! requirement distinguishes "any authenticated caller" from "one of these
//! roles" explicitly, so an empty role list is never a stand-in for either.

use crate::access::decide;
use crate::caps::Capability;
use crate::role::Role;

/// Which callers satisfy the role part of a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Every authenticated caller, whatever its role.
    AnyAuthenticated,
    /// Caller's role must be one of these. An empty list admits no role,
    /// leaving only the self-access path.
    OneOf(Vec<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub requirement: RoleRequirement,
    pub allow_self_access: bool,
}

impl Policy {
    pub fn any_authenticated() -> Self {
        Self { requirement: RoleRequirement::AnyAuthenticated, allow_self_access: false }
    }

    pub fn one_of(roles: impl Into<Vec<Role>>) -> Self {
        Self { requirement: RoleRequirement::OneOf(roles.into()), allow_self_access: false }
    }

    pub fn admin_only() -> Self {
        Self::one_of([Role::Admin])
    }

    pub fn with_self_access(mut self) -> Self {
        self.allow_self_access = true;
        self
    }

    /// Evaluate for an already authenticated caller.
    pub fn permits(&self, role: Role, caller_id: &str, resource_owner_id: Option<&str>) -> bool {
        match &self.requirement {
            RoleRequirement::AnyAuthenticated => true,
            RoleRequirement::OneOf(roles) => {
                decide(role, roles, self.allow_self_access, Some(caller_id), resource_owner_id)
            }
        }
    }
}

/// Operations exposed by the ledger application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    UpdateUser,
    /// Admin-only, widened so a user may also read their own record.
    ViewUser,
    ListMovements,
    CreateMovement,
    ViewReports,
    ViewOwnProfile,
    UpdateOwnProfile,
}

const OPERATIONS: &[(Operation, &str)] = &[
    (Operation::ListUsers, "users.list"),
    (Operation::UpdateUser, "users.update"),
    (Operation::ViewUser, "users.view"),
    (Operation::ListMovements, "movements.list"),
    (Operation::CreateMovement, "movements.create"),
    (Operation::ViewReports, "reports.view"),
    (Operation::ViewOwnProfile, "profile.view"),
    (Operation::UpdateOwnProfile, "profile.update"),
];

impl Operation {
    pub fn all() -> impl Iterator<Item = Operation> {
        OPERATIONS.iter().map(|(op, _)| *op)
    }

    pub fn name(&self) -> &'static str {
        OPERATIONS
            .iter()
            .find(|(op, _)| op == self)
            .map(|(_, n)| *n)
            .unwrap_or("unknown")
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        OPERATIONS.iter().find(|(_, n)| *n == name).map(|(op, _)| *op)
    }

    pub fn policy(&self) -> Policy {
        match self {
            Operation::ListUsers | Operation::UpdateUser => Policy::admin_only(),
            Operation::ViewUser => Policy::admin_only().with_self_access(),
            Operation::ListMovements => Policy::any_authenticated(),
            Operation::CreateMovement => Policy::admin_only(),
            Operation::ViewReports => Policy::admin_only(),
            Operation::ViewOwnProfile | Operation::UpdateOwnProfile => Policy::any_authenticated(),
        }
    }

    /// Capability a UI shows this operation under.
    pub fn capability(&self) -> Capability {
        match self {
            Operation::ListUsers | Operation::UpdateUser | Operation::ViewUser => Capability::CanManageUsers,
            Operation::ListMovements => Capability::CanViewMovements,
            Operation::CreateMovement => Capability::CanCreateMovements,
            Operation::ViewReports => Capability::CanViewReports,
            Operation::ViewOwnProfile | Operation::UpdateOwnProfile => Capability::CanManageOwnProfile,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
