use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use takeoff::projects::railway;
use takeoff::{Project, Value};
use rust_decimal::Decimal;

fn approx(project: &Project, name: &str, expected: &str) {
    let value = match project.get_param_value(name) {
        Some(Value::Number(n)) => *n,
        other => panic!("Expected number for {}, got {:?}", name, other),
    };
    let expected = Decimal::from_str(expected).unwrap();
    assert!(
        (value - expected).abs() < Decimal::from_str("0.01").unwrap(),
        "{}: expected about {}, got {}",
        name,
        expected,
        value
    );
}

#[test]
fn test_railway_defaults() {
    let project = Project::new(Arc::new(railway::declaration())).unwrap();
    approx(&project, "length", "1000");
    approx(&project, "tons_steel", "33.60");
    approx(&project, "tons_concrete", "150");
    approx(&project, "tons_ballast", "13.83");
    approx(&project, "tons_timber", "62.5");
}

#[test]
fn test_railway_scales_with_length() {
    let project = Project::from_json(Arc::new(railway::declaration()), &json!({"length": 5200})).unwrap();
    approx(&project, "tons_concrete", "780");
    approx(&project, "tons_timber", "325");
    approx(&project, "tons_steel", "174.70");
}

#[test]
fn test_railway_forced_output() {
    let payload = json!({"length": 5200, "tons_concrete": 1});
    let project = Project::from_json(Arc::new(railway::declaration()), &payload).unwrap();
    approx(&project, "tons_concrete", "1");
    approx(&project, "tons_timber", "325");
}
