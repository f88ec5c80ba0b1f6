use serde_json::json;
use std::sync::Arc;
use takeoff::projects::road;
use takeoff::*;

#[test]
fn test_builtin_types() {
    let registry = ProjectRegistry::with_builtin_types();
    assert_eq!(
        registry.project_types(),
        vec!["bridges", "energy", "other", "railways", "roads"]
    );
}

#[test]
fn test_from_type_is_case_insensitive() {
    let registry = ProjectRegistry::with_builtin_types();
    let upper = registry.from_type("Bridges").unwrap().unwrap();
    let lower = registry.from_type("bridges").unwrap().unwrap();
    assert_eq!(upper.to_json(), lower.to_json());
    assert_eq!(upper.project_type(), "bridges");
}

#[test]
fn test_from_type_valid_sectors() {
    let registry = ProjectRegistry::with_builtin_types();
    for name in ["Energy", "Roads", "Bridges", "Railways", "Other"] {
        let project = registry.from_type(name).unwrap();
        assert!(project.is_some(), "{} should be constructible", name);
    }
}

#[test]
fn test_from_type_unknown() {
    let registry = ProjectRegistry::with_builtin_types();
    for name in ["Spaceport", "Buildings", "Waterworks", "Transport", "Hospitals", "Communications"] {
        assert!(registry.from_type(name).unwrap().is_none(), "{} should be unknown", name);
    }
}

#[test]
fn test_from_json() {
    let registry = ProjectRegistry::with_builtin_types();
    let project = registry
        .from_json(&json!({"project_type": "Bridges", "length": 100, "lanes": 2}))
        .unwrap();
    assert_eq!(project.to_json()["surface_area"], 4800);
}

#[test]
fn test_from_json_unknown_type() {
    let registry = ProjectRegistry::with_builtin_types();
    for name in ["Buildings", "Waterworks", "Transport", "Hospitals", "Communications"] {
        let err = registry
            .from_json(&json!({"project_type": name, "length": 100}))
            .unwrap_err();
        assert!(matches!(err, TakeoffError::UnknownProjectType(_)));
        assert!(err.is_input_error());
    }
}

#[test]
fn test_from_json_missing_type_lists_valid_types() {
    let registry = ProjectRegistry::with_builtin_types();
    let err = registry.from_json(&json!({"length": 100})).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("project_type"));
    for name in registry.project_types() {
        assert!(message.contains(name), "{} missing from {}", name, message);
    }

    let err = registry.from_json(&json!({"project_type": 3})).unwrap_err();
    assert!(matches!(err, TakeoffError::UnknownProjectType(_)));
}

#[test]
fn test_from_json_validation_is_delegated() {
    let registry = ProjectRegistry::with_builtin_types();
    let err = registry
        .from_json(&json!({"project_type": "bridges", "length": 100}))
        .unwrap_err();
    assert_eq!(
        err.messages(),
        vec!["'lanes' required for bridges. Add lanes in lanes.".to_string()]
    );
}

#[test]
fn test_last_registration_wins() {
    let mut registry = ProjectRegistry::with_builtin_types();
    registry.register("Bridges", road::declaration);
    let project = registry.from_type("bridges").unwrap().unwrap();
    assert_eq!(project.project_type(), "bridges");
    assert!(project.get_param("surface_type").is_some());
    assert_eq!(registry.project_types().len(), 5);
}

#[test]
fn test_register_custom_type() {
    let mut registry = ProjectRegistry::new();
    assert!(registry.project_types().is_empty());
    registry.register("Culverts", || {
        ProjectDeclaration::new(Sector::Waterworks)
            .require("length", "feet")
            .calculate("tons_concrete", "tons")
            .fact("length", 40)
            .rule("tons_concrete = length * 2")
    });
    assert!(registry.contains("culverts"));
    let project = registry.from_type("CULVERTS").unwrap().unwrap();
    assert_eq!(project.to_json()["tons_concrete"], 80);
}

#[test]
fn test_extractor_is_attached() {
    let registry = ProjectRegistry::with_builtin_types().with_extractor(Arc::new(MeasurementExtractor));
    let project = registry.from_type("roads").unwrap().unwrap();
    assert!(project.has_extractor());

    let project = registry
        .from_json(&json!({"project_type": "energy", "power_generated": 5, "energy_type": "wind"}))
        .unwrap();
    assert!(project.has_extractor());

    let bare = ProjectRegistry::with_builtin_types();
    assert!(!bare.from_type("roads").unwrap().unwrap().has_extractor());
}

#[test]
fn test_registry_limits_reach_projects() {
    let limits = ResourceLimits {
        max_chain_depth: 2,
        ..ResourceLimits::default()
    };
    let registry = ProjectRegistry::with_builtin_types().with_limits(limits);
    assert!(matches!(
        registry.from_type("railways"),
        Err(TakeoffError::ResourceLimitExceeded { .. })
    ));
    assert!(registry.from_type("energy").unwrap().is_some());
}

fn culverts() -> ProjectDeclaration {
    ProjectDeclaration::new(Sector::Waterworks)
        .require("length", "feet")
        .calculate("tons_concrete", "tons")
        .fact("length", 40)
        .rule("tons_concrete = length * 2")
}

#[test]
fn test_custom_type_round_trips_through_json() {
    let mut registry = ProjectRegistry::new();
    registry.register("Culverts", culverts);

    let project = registry.from_type("culverts").unwrap().unwrap();
    let payload = project.to_json();
    assert_eq!(payload["project_type"], "culverts");
    assert_eq!(project.declaration().sector(), Sector::Waterworks);

    let rebuilt = registry.from_json(&payload).unwrap();
    assert_eq!(rebuilt.to_json(), payload);

    let err = registry.from_json(&json!({"project_type": "culverts"})).unwrap_err();
    assert_eq!(
        err.messages(),
        vec!["'length' required for culverts. Add length in feet.".to_string()]
    );
}
