//! Capability projection tests
//!
//! Covers the role → capability table and the mask/name helpers.

use rolegate::*;

// ============================================================================
// Projection table
// ============================================================================

#[test]
fn admin_gets_every_capability() {
    let caps = project(Role::Admin);
    assert_eq!(caps, CapabilitySet::ALL);
    assert!(caps.can_manage_users);
    assert!(caps.can_create_movements);
    assert!(caps.can_view_reports);
    assert!(caps.can_view_movements);
    assert!(caps.can_manage_own_profile);
}

#[test]
fn user_can_view_movements_and_manage_own_profile_only() {
    let caps = project(Role::User);
    assert_eq!(
        caps,
        CapabilitySet {
            can_manage_users: false,
            can_create_movements: false,
            can_view_reports: false,
            can_view_movements: true,
            can_manage_own_profile: true,
        }
    );
}

#[test]
fn unrecognized_role_gets_nothing() {
    assert_eq!(project(Role::Unrecognized), CapabilitySet::NONE);
}

#[test]
fn unrecognized_strings_project_to_nothing() {
    for s in ["", "admin", "User", " ADMIN", "ADMIN ", "SUPERADMIN", "INVALID", "UNRECOGNIZED", "ADMIN\0"] {
        assert_eq!(project_str(s), CapabilitySet::NONE, "role {s:?}");
    }
}

#[test]
fn exact_strings_project_to_defined_roles() {
    assert_eq!(project_str("ADMIN"), CapabilitySet::ALL);
    assert_eq!(project_str("USER"), project(Role::User));
}

// ============================================================================
// Mask and names
// ============================================================================

#[test]
fn masks_match_composites() {
    assert_eq!(project(Role::Admin).to_mask(), CapBit::ALL);
    assert_eq!(project(Role::User).to_mask(), CapBit::USER);
    assert_eq!(project(Role::Unrecognized).to_mask(), CapBit::NONE);
}

#[test]
fn mask_conversion_is_lossless_for_valid_bits() {
    for mask in 0..=CapBit::ALL {
        assert_eq!(CapabilitySet::from_mask(mask).to_mask(), mask);
    }
}

#[test]
fn from_mask_ignores_unknown_bits() {
    assert_eq!(CapabilitySet::from_mask(0xE0), CapabilitySet::NONE);
    assert_eq!(CapabilitySet::from_mask(0xFF), CapabilitySet::ALL);
}

#[test]
fn flags_are_independent() {
    let only_reports = CapabilitySet::from_mask(CapBit::VIEW_REPORTS);
    assert!(only_reports.can_view_reports);
    assert!(!only_reports.can_view_movements);
    assert!(!only_reports.can_manage_users);
}

#[test]
fn names_follow_declaration_order() {
    assert_eq!(project(Role::User).names(), vec!["canViewMovements", "canManageOwnProfile"]);
    assert_eq!(project(Role::Admin).names().len(), 5);
    assert!(project(Role::Unrecognized).names().is_empty());
}

#[test]
fn names_to_mask_skips_unknown_names() {
    assert_eq!(names_to_mask(&["canViewMovements", "canManageOwnProfile"]), CapBit::USER);
    assert_eq!(names_to_mask(&["canViewReports", "canFly", "CANVIEWREPORTS"]), CapBit::VIEW_REPORTS);
    assert_eq!(names_to_mask(&[]), 0);
}

#[test]
fn capability_names_round_trip() {
    for cap in Capability::ALL {
        assert_eq!(Capability::from_name(cap.name()), Some(cap));
    }
    assert_eq!(Capability::from_name("canmanageusers"), None);
}

#[test]
fn capability_set_serializes_camel_case() {
    let json = serde_json::to_value(project(Role::User)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "canManageUsers": false,
            "canCreateMovements": false,
            "canViewReports": false,
            "canViewMovements": true,
            "canManageOwnProfile": true,
        })
    );
}

// ============================================================================
// Capability requirements
// ============================================================================

#[test]
fn empty_requirement_is_always_satisfied() {
    let req = CapabilityRequirement::new();
    assert!(req.is_empty());
    assert!(CapabilitySet::NONE.satisfies(&req));
    assert!(CapabilitySet::ALL.satisfies(&req));
}

#[test]
fn requirement_checks_listed_capabilities_only() {
    let req = CapabilityRequirement::new().require(Capability::CanViewMovements);
    assert!(project(Role::User).satisfies(&req));
    assert!(project(Role::Admin).satisfies(&req));
    assert!(!project(Role::Unrecognized).satisfies(&req));
}

#[test]
fn requirement_can_expect_a_missing_capability() {
    let non_admin = CapabilityRequirement::new().expect(Capability::CanManageUsers, false);
    assert!(project(Role::User).satisfies(&non_admin));
    assert!(!project(Role::Admin).satisfies(&non_admin));
}

#[test]
fn later_expectation_replaces_earlier() {
    let req = CapabilityRequirement::new()
        .require(Capability::CanViewReports)
        .expect(Capability::CanViewReports, false);
    assert_eq!(req.entries(), &[(Capability::CanViewReports, false)]);
    assert!(project(Role::User).satisfies(&req));
}
