use super::*;

#[test]
fn role_wire_spelling_round_trips() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    assert_eq!(
        serde_json::from_str::<Role>("\"PROFESSIONAL\"").unwrap(),
        Role::Professional
    );
    assert_eq!(Role::parse("INACTIVE"), Some(Role::Inactive));
    assert_eq!(Role::parse("professional"), None);
}

#[test]
fn profile_status_parse_is_exact() {
    assert_eq!(ProfileStatus::parse("ACTIVE"), Some(ProfileStatus::Active));
    assert_eq!(ProfileStatus::parse("INACTIVE"), Some(ProfileStatus::Inactive));
    assert_eq!(ProfileStatus::parse("active"), None);
}

#[test]
fn profile_apply_overwrites_only_present_fields() {
    let mut profile = UserProfile {
        status: ProfileStatus::Active,
        phone: "123".to_owned(),
        specialty: "Fonoaudiología".to_owned(),
        ..UserProfile::default()
    };

    profile.apply(&ProfilePatch {
        specialty: Some("Kinesiología".to_owned()),
        ..ProfilePatch::default()
    });

    assert_eq!(profile.status, ProfileStatus::Active);
    assert_eq!(profile.phone, "123");
    assert_eq!(profile.specialty, "Kinesiología");
}

#[test]
fn profile_patch_serializes_only_set_fields() {
    let patch = ProfilePatch {
        phone: Some("+56 9 1234 5678".to_owned()),
        ..ProfilePatch::default()
    };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({ "phone": "+56 9 1234 5678" }));
}
