//! Authorization protocol around the access decision
//!
//! Callers resolve a session through their identity provider, decode it
//! into an [`Identity`], and pass it here with the policy of the operation
//! they are about to run. A missing identity is always
//! [`AuthError::Unauthenticated`]; a denied decision is always
//! [`AuthError::Forbidden`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::caps::{project, CapabilityRequirement, CapabilitySet};
use crate::error::{AuthError, Result};
use crate::policy::{Operation, Policy};
use crate::role::Role;

/// Raw, untrusted claims handed over by the session provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: Option<String>,
    pub role: Option<String>,
}

/// An authenticated principal with a decoded role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self { user_id: user_id.into(), role }
    }

    /// Decode session claims. No user id means no session; a missing or
    /// unknown role decodes to [`Role::Unrecognized`].
    pub fn from_claims(claims: &SessionClaims) -> Option<Identity> {
        let user_id = claims.user_id.as_deref().filter(|id| !id.is_empty())?;
        Some(Identity::new(user_id, Role::from_claim(claims.role.as_deref())))
    }

    pub fn capabilities(&self) -> CapabilitySet {
        project(self.role)
    }
}

fn forbidden(identity: &Identity, action: &str) -> AuthError {
    warn!(user_id = %identity.user_id, role = %identity.role, action, "access denied");
    AuthError::Forbidden {
        user_id: identity.user_id.clone(),
        role: identity.role.to_string(),
        action: action.to_string(),
    }
}

fn authenticated(identity: Option<&Identity>) -> Result<&Identity> {
    identity.ok_or_else(|| {
        debug!("rejecting request without session");
        AuthError::Unauthenticated
    })
}

/// Check `policy` for the caller. `resource_owner_id` feeds the
/// self-access path when the policy enables it.
pub fn authorize<'a>(
    identity: Option<&'a Identity>,
    policy: &Policy,
    resource_owner_id: Option<&str>,
) -> Result<&'a Identity> {
    authorize_as(identity, policy, resource_owner_id, "perform this operation")
}

/// [`authorize`] with the policy of a named operation.
pub fn authorize_operation<'a>(
    identity: Option<&'a Identity>,
    operation: Operation,
    resource_owner_id: Option<&str>,
) -> Result<&'a Identity> {
    authorize_as(identity, &operation.policy(), resource_owner_id, operation.name())
}

fn authorize_as<'a>(
    identity: Option<&'a Identity>,
    policy: &Policy,
    resource_owner_id: Option<&str>,
    action: &str,
) -> Result<&'a Identity> {
    let identity = authenticated(identity)?;
    if !policy.permits(identity.role, &identity.user_id, resource_owner_id) {
        return Err(forbidden(identity, action));
    }
    debug!(user_id = %identity.user_id, role = %identity.role, action, "access granted");
    Ok(identity)
}

/// Check fine-grained capabilities of the caller's role. The role itself
/// is not gated here; use [`require_access`] when both must hold.
pub fn require_capabilities<'a>(
    identity: Option<&'a Identity>,
    requirement: &CapabilityRequirement,
) -> Result<&'a Identity> {
    let identity = authenticated(identity)?;
    if !identity.capabilities().satisfies(requirement) {
        let wanted: Vec<_> = requirement.entries().iter().map(|(c, v)| format!("{c}={v}")).collect();
        return Err(forbidden(identity, &wanted.join(",")));
    }
    Ok(identity)
}

/// Gate on `policy` first, then on `requirement`. Both must hold.
pub fn require_access<'a>(
    identity: Option<&'a Identity>,
    policy: &Policy,
    resource_owner_id: Option<&str>,
    requirement: &CapabilityRequirement,
) -> Result<&'a Identity> {
    let identity = authorize(identity, policy, resource_owner_id)?;
    require_capabilities(Some(identity), requirement)
}
