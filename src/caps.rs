//! Capability flags and the role → capability projection

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Capability bits for the compact mask form of a [`CapabilitySet`]
#[allow(non_snake_case)]
pub mod CapBit {
    pub const MANAGE_USERS: u8 = 0x01;
    pub const CREATE_MOVEMENTS: u8 = 0x02;
    pub const VIEW_REPORTS: u8 = 0x04;
    pub const VIEW_MOVEMENTS: u8 = 0x08;
    pub const MANAGE_OWN_PROFILE: u8 = 0x10;

    // Composites
    pub const NONE: u8 = 0x00;
    pub const USER: u8 = VIEW_MOVEMENTS | MANAGE_OWN_PROFILE;
    pub const ALL: u8 = 0x1F;
}

/// One named permission flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CanManageUsers,
    CanCreateMovements,
    CanViewReports,
    CanViewMovements,
    CanManageOwnProfile,
}

const CAPS: &[(Capability, &str, u8)] = &[
    (Capability::CanManageUsers, "canManageUsers", CapBit::MANAGE_USERS),
    (Capability::CanCreateMovements, "canCreateMovements", CapBit::CREATE_MOVEMENTS),
    (Capability::CanViewReports, "canViewReports", CapBit::VIEW_REPORTS),
    (Capability::CanViewMovements, "canViewMovements", CapBit::VIEW_MOVEMENTS),
    (Capability::CanManageOwnProfile, "canManageOwnProfile", CapBit::MANAGE_OWN_PROFILE),
];

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::CanManageUsers,
        Capability::CanCreateMovements,
        Capability::CanViewReports,
        Capability::CanViewMovements,
        Capability::CanManageOwnProfile,
    ];

    fn entry(&self) -> &'static (Capability, &'static str, u8) {
        // CAPS lists every variant in declaration order
        &CAPS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    pub fn bit(&self) -> u8 {
        self.entry().2
    }

    pub fn from_name(name: &str) -> Option<Capability> {
        CAPS.iter().find(|(_, n, _)| *n == name).map(|(c, _, _)| *c)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Five independent permission flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySet {
    pub can_manage_users: bool,
    pub can_create_movements: bool,
    pub can_view_reports: bool,
    pub can_view_movements: bool,
    pub can_manage_own_profile: bool,
}

impl CapabilitySet {
    pub const NONE: CapabilitySet = CapabilitySet {
        can_manage_users: false,
        can_create_movements: false,
        can_view_reports: false,
        can_view_movements: false,
        can_manage_own_profile: false,
    };

    pub const ALL: CapabilitySet = CapabilitySet {
        can_manage_users: true,
        can_create_movements: true,
        can_view_reports: true,
        can_view_movements: true,
        can_manage_own_profile: true,
    };

    pub fn get(&self, cap: Capability) -> bool {
        match cap {
            Capability::CanManageUsers => self.can_manage_users,
            Capability::CanCreateMovements => self.can_create_movements,
            Capability::CanViewReports => self.can_view_reports,
            Capability::CanViewMovements => self.can_view_movements,
            Capability::CanManageOwnProfile => self.can_manage_own_profile,
        }
    }

    pub fn to_mask(&self) -> u8 {
        Capability::ALL
            .iter()
            .filter(|c| self.get(**c))
            .fold(0, |m, c| m | c.bit())
    }

    /// Bits outside [`CapBit::ALL`] are ignored.
    pub fn from_mask(mask: u8) -> CapabilitySet {
        let has = |bit: u8| mask & bit == bit;
        CapabilitySet {
            can_manage_users: has(CapBit::MANAGE_USERS),
            can_create_movements: has(CapBit::CREATE_MOVEMENTS),
            can_view_reports: has(CapBit::VIEW_REPORTS),
            can_view_movements: has(CapBit::VIEW_MOVEMENTS),
            can_manage_own_profile: has(CapBit::MANAGE_OWN_PROFILE),
        }
    }

    /// Names of the granted capabilities, in declaration order
    pub fn names(&self) -> Vec<&'static str> {
        Capability::ALL
            .iter()
            .filter(|c| self.get(**c))
            .map(|c| c.name())
            .collect()
    }

    pub fn satisfies(&self, req: &CapabilityRequirement) -> bool {
        req.entries().iter().all(|(cap, expected)| self.get(*cap) == *expected)
    }
}

/// Convert a list of capability names to a mask. Unknown names are skipped.
pub fn names_to_mask(names: &[&str]) -> u8 {
    names
        .iter()
        .filter_map(|n| Capability::from_name(n))
        .fold(0, |m, c| m | c.bit())
}

/// Partial capability expectation. Listed capabilities must equal the
/// expected value; unlisted ones are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityRequirement {
    entries: Vec<(Capability, bool)>,
}

impl CapabilityRequirement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `cap` to be granted.
    pub fn require(self, cap: Capability) -> Self {
        self.expect(cap, true)
    }

    /// Expect `cap` to have exactly `value`. A later call for the same
    /// capability replaces the earlier one.
    pub fn expect(mut self, cap: Capability, value: bool) -> Self {
        self.entries.retain(|(c, _)| *c != cap);
        self.entries.push((cap, value));
        self
    }

    pub fn entries(&self) -> &[(Capability, bool)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capability set for a role. Total; unrecognized roles get nothing.
pub fn project(role: Role) -> CapabilitySet {
    match role {
        Role::Admin => CapabilitySet::ALL,
        Role::User => CapabilitySet {
            can_view_movements: true,
            can_manage_own_profile: true,
            ..CapabilitySet::NONE
        },
        Role::Unrecognized => CapabilitySet::NONE,
    }
}

/// Decode `role` by exact match and project it.
pub fn project_str(role: &str) -> CapabilitySet {
    project(Role::parse(role))
}
