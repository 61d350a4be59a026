use appcenter::{Release, ReleaseOptions, SymbolType};
use serde_json::json;

#[test]
fn release_options_omit_unset_fields() {
    let options = ReleaseOptions {
        build_version: Some("1.2.3".into()),
        ..Default::default()
    };
    let v = serde_json::to_value(&options).unwrap();
    assert_eq!(v, json!({"build_version": "1.2.3"}));

    let empty = serde_json::to_value(ReleaseOptions::default()).unwrap();
    assert_eq!(empty, json!({}));
}

#[test]
fn symbol_types_use_service_names() {
    assert_eq!(serde_json::to_value(SymbolType::Apple).unwrap(), json!("Apple"));
    assert_eq!(
        serde_json::to_value(SymbolType::AndroidProguard).unwrap(),
        json!("AndroidProguard")
    );
    assert_eq!(
        serde_json::to_value(SymbolType::Breakpad).unwrap(),
        json!("Breakpad")
    );
    assert_eq!(
        serde_json::to_value(SymbolType::JavaScript).unwrap(),
        json!("JavaScript")
    );
    assert_eq!(serde_json::to_value(SymbolType::Uwp).unwrap(), json!("UWP"));
}

#[test]
fn release_decodes_with_missing_fields() {
    let release: Release = serde_json::from_value(json!({"id": 7})).unwrap();
    assert_eq!(release.id, 7);
    assert_eq!(release.version, "");
    assert!(!release.enabled);
    assert!(release.distribution_groups.is_empty());
    assert_eq!(release.build.branch_name, "");
}

#[test]
fn release_decodes_the_full_record() {
    let release: Release = serde_json::from_value(json!({
        "id": 42,
        "version": "1.0",
        "origin": "appcenter",
        "short_version": "1.0.0",
        "enabled": true,
        "uploaded_at": "2024-05-01T10:00:00Z",
        "destination_type": "group",
        "distribution_groups": [
            {"id": "g1", "name": "Beta", "is_latest": true}
        ],
        "distribution_stores": [
            {"id": "s1", "name": "Play", "type": "googleplay", "publishing_status": "published"}
        ],
        "destinations": [
            {"id": "g1", "name": "Beta", "type": "group", "destination_type": "group"}
        ],
        "build": {
            "branch_name": "main",
            "commit_hash": "abc123",
            "commit_message": "release 1.0"
        },
        "is_external_build": false
    }))
    .unwrap();

    assert_eq!(release.id, 42);
    assert_eq!(release.origin, "appcenter");
    assert!(release.enabled);
    assert_eq!(release.distribution_groups[0].id, "g1");
    assert!(release.distribution_groups[0].is_latest);
    assert_eq!(release.distribution_stores[0].store_type, "googleplay");
    assert_eq!(release.destinations[0].kind, "group");
    assert_eq!(release.build.commit_message, "release 1.0");
    assert!(!release.is_external_build);
}
