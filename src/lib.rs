//! rolegate - role-based access control for the movements ledger
//!
//! Two pure functions form the core:
//!
//! - [`project`] maps a [`Role`] to its fixed [`CapabilitySet`]
//! - [`decide`] gates an operation on role membership, with an opt-in
//!   self-access path for resources the caller owns
//!
//! [`guard`] wraps them in the authorization protocol that keeps
//! "no session" and "not permitted" apart, and [`policy`] names the
//! requirement of every ledger operation.

pub mod access;
pub mod caps;
pub mod config;
pub mod error;
pub mod guard;
pub mod policy;
pub mod role;

#[cfg(feature = "server")]
pub mod server;

pub use access::{decide, AccessRequest};
pub use caps::{names_to_mask, project, project_str, CapBit, Capability, CapabilityRequirement, CapabilitySet};
pub use error::{AuthError, ConfigError, Result};
pub use guard::{authorize, authorize_operation, require_access, require_capabilities, Identity, SessionClaims};
pub use policy::{Operation, Policy, RoleRequirement};
pub use role::Role;
