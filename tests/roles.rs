//! Role decoding tests

use rolegate::Role;

#[test]
fn parse_is_exact() {
    assert_eq!(Role::parse("ADMIN"), Role::Admin);
    assert_eq!(Role::parse("USER"), Role::User);
    assert_eq!(Role::parse("admin"), Role::Unrecognized);
    assert_eq!(Role::parse("Admin"), Role::Unrecognized);
    assert_eq!(Role::parse(" USER"), Role::Unrecognized);
    assert_eq!(Role::parse(""), Role::Unrecognized);
}

#[test]
fn missing_claim_is_least_privileged() {
    assert_eq!(Role::from_claim(None), Role::Unrecognized);
    assert_eq!(Role::from_claim(Some("")), Role::Unrecognized);
    assert_eq!(Role::from_claim(Some("ADMIN")), Role::Admin);
}

#[test]
fn display_uses_canonical_names() {
    assert_eq!(Role::Admin.to_string(), "ADMIN");
    assert_eq!(Role::User.to_string(), "USER");
    assert_eq!(Role::Unrecognized.to_string(), "UNRECOGNIZED");
}

#[test]
fn only_defined_roles_are_recognized() {
    assert!(Role::Admin.is_recognized());
    assert!(Role::User.is_recognized());
    assert!(!Role::Unrecognized.is_recognized());
}

#[test]
fn serde_uses_strings() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    assert_eq!(serde_json::from_str::<Role>("\"USER\"").unwrap(), Role::User);
    assert_eq!(serde_json::from_str::<Role>("\"root\"").unwrap(), Role::Unrecognized);
}

#[test]
fn unrecognized_round_trips_as_unrecognized() {
    let s = serde_json::to_string(&Role::Unrecognized).unwrap();
    assert_eq!(serde_json::from_str::<Role>(&s).unwrap(), Role::Unrecognized);
}

#[test]
fn null_and_default_are_unrecognized() {
    assert_eq!(serde_json::from_str::<Role>("null").unwrap(), Role::Unrecognized);
    assert_eq!(Role::default(), Role::Unrecognized);
}
