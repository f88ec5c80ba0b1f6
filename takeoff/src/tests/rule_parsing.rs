use crate::ast::{ArithmeticOperation, ExpressionKind};
use crate::parser::{parse_rule, parse_rules};
use crate::{DerivationRule, ResourceLimits, TakeoffError};
use rust_decimal::Decimal;
use std::str::FromStr;

fn parse(text: &str) -> Result<DerivationRule, TakeoffError> {
    parse_rule(text, &ResourceLimits::default())
}

#[test]
fn test_simple_product() {
    let rule = parse("width = lanes * bridge_lane_width").unwrap();
    assert_eq!(rule.target, "width");
    assert_eq!(rule.expression.references(), vec!["lanes", "bridge_lane_width"]);
    match &rule.expression.kind {
        ExpressionKind::Arithmetic(_, op, _) => assert_eq!(*op, ArithmeticOperation::Multiply),
        other => panic!("Expected arithmetic, got {:?}", other),
    }
}

#[test]
fn test_whitespace_is_insignificant() {
    let spaced = parse("  volume   =  surface_area*thickness ").unwrap();
    let tight = parse("volume=surface_area * thickness").unwrap();
    assert_eq!(spaced.target, tight.target);
    assert_eq!(spaced.to_string(), tight.to_string());
}

#[test]
fn test_precedence_and_associativity() {
    let rule = parse("x = a + b * c").unwrap();
    assert_eq!(rule.to_string(), "x = a + b * c");

    let rule = parse("x = (a + b) * c").unwrap();
    assert_eq!(rule.to_string(), "x = (a + b) * c");

    // left-associative: a - b - c is (a - b) - c
    let rule = parse("x = a - b - c").unwrap();
    match &rule.expression.kind {
        ExpressionKind::Arithmetic(left, ArithmeticOperation::Subtract, right) => {
            assert!(matches!(left.kind, ExpressionKind::Arithmetic(_, ArithmeticOperation::Subtract, _)));
            assert_eq!(right.kind, ExpressionKind::Reference("c".to_string()));
        }
        other => panic!("Expected subtraction, got {:?}", other),
    }

    let rule = parse("x = a / (b / c)").unwrap();
    assert_eq!(rule.to_string(), "x = a / (b / c)");
}

#[test]
fn test_number_literals() {
    let rule = parse("track_length = length * 2").unwrap();
    match &rule.expression.kind {
        ExpressionKind::Arithmetic(_, _, right) => {
            assert_eq!(right.kind, ExpressionKind::Literal(Decimal::from(2)));
        }
        other => panic!("Expected arithmetic, got {:?}", other),
    }

    let rule = parse("thickness = 18.0 / 12").unwrap();
    assert_eq!(rule.expression.references(), Vec::<&str>::new());

    let rule = parse("length = 1_000").unwrap();
    assert_eq!(
        rule.expression.kind,
        ExpressionKind::Literal(Decimal::from_str("1000").unwrap())
    );
}

#[test]
fn test_unary_minus() {
    let rule = parse("delta = -offset").unwrap();
    match &rule.expression.kind {
        ExpressionKind::Arithmetic(left, ArithmeticOperation::Subtract, right) => {
            assert_eq!(left.kind, ExpressionKind::Literal(Decimal::ZERO));
            assert_eq!(right.kind, ExpressionKind::Reference("offset".to_string()));
        }
        other => panic!("Expected 0 - offset, got {:?}", other),
    }
}

#[test]
fn test_references_are_deduplicated() {
    let rule = parse("area = side * side + trim").unwrap();
    assert_eq!(rule.expression.references(), vec!["side", "trim"]);
}

#[test]
fn test_source_is_kept() {
    let rule = parse("co2 = co2_concrete + co2_diesel").unwrap();
    assert_eq!(rule.source, "co2 = co2_concrete + co2_diesel");
}

#[test]
fn test_from_str() {
    let rule: DerivationRule = "tons = pounds / 2000".parse().unwrap();
    assert_eq!(rule.target, "tons");
}

#[test]
fn test_invalid_rules() {
    let cases = vec![
        "",
        "width",
        "= lanes * 2",
        "width = ",
        "width = lanes *",
        "width = (lanes * 2",
        "width = lanes ** 2",
        "2width = lanes",
        "width = lanes = 2",
        "width = lanes % 2",
    ];
    for text in cases {
        let result = parse(text);
        assert!(
            matches!(result, Err(TakeoffError::Parse(_))),
            "Expected parse error for {:?}, got {:?}",
            text,
            result
        );
    }
}

#[test]
fn test_parse_error_has_location() {
    let err = parse("width = lanes * * 2").unwrap_err();
    match err {
        TakeoffError::Parse(details) => {
            assert_eq!(details.span.line, 1);
            assert!(details.span.col > 1);
            assert!(details.suggestion.is_some());
            assert_eq!(&*details.source_text, "width = lanes * * 2");
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_rule_size_limit() {
    let limits = ResourceLimits {
        max_rule_bytes: 16,
        ..ResourceLimits::default()
    };
    let result = parse_rule("surface_area = length * width", &limits);
    match result {
        Err(TakeoffError::ResourceLimitExceeded { limit_name, .. }) => {
            assert_eq!(limit_name, "max_rule_bytes")
        }
        other => panic!("Expected limit error, got {:?}", other),
    }
}

#[test]
fn test_expression_depth_limit() {
    let limits = ResourceLimits {
        max_expression_depth: 5,
        ..ResourceLimits::default()
    };
    let mut expr = String::from("1");
    for _ in 0..10 {
        expr = format!("({} + 1)", expr);
    }
    let result = parse_rule(&format!("x = {}", expr), &limits);
    match result {
        Err(TakeoffError::ResourceLimitExceeded { limit_name, .. }) => {
            assert_eq!(limit_name, "max_expression_depth")
        }
        other => panic!("Expected limit error, got {:?}", other),
    }

    assert!(parse_rule("x = ((1 + 1))", &limits).is_ok());
}

#[test]
fn test_parse_rules_stops_at_first_error() {
    let limits = ResourceLimits::default();
    let rules = parse_rules(&["a = 1", "b = a * 2"], &limits).unwrap();
    assert_eq!(rules.len(), 2);

    assert!(parse_rules(&["a = 1", "b = a *"], &limits).is_err());
}
