use crate::ast::Span;
use crate::error::TakeoffError;
use crate::resource_limits::ResourceLimits;
use crate::semantic::DerivationRule;
use crate::TakeoffResult;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod expressions;

#[derive(Parser)]
#[grammar = "src/parser/rule.pest"]
pub struct RuleParser;

/// Parse a single `target = expression` rule
pub fn parse_rule(content: &str, limits: &ResourceLimits) -> TakeoffResult<DerivationRule> {
    if content.len() > limits.max_rule_bytes {
        return Err(TakeoffError::ResourceLimitExceeded {
            limit_name: "max_rule_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_rule_bytes),
            actual_value: format!("{} bytes", content.len()),
            suggestion: "Split the rule into smaller intermediate rules".to_string(),
        });
    }

    let source: Arc<str> = Arc::from(content);
    let mut pairs = RuleParser::parse(Rule::rule_definition, content)
        .map_err(|e| pest_error(e, Arc::clone(&source)))?;

    let definition = pairs.next().ok_or_else(|| {
        TakeoffError::parse("Empty rule", empty_span(), Arc::clone(&source))
    })?;

    let mut target = None;
    let mut expression = None;
    let mut depth = expressions::DepthGuard::new(limits.max_expression_depth);

    for inner in definition.into_inner() {
        match inner.as_rule() {
            Rule::target => target = Some(inner.as_str().trim().to_string()),
            Rule::expression => {
                expression = Some(expressions::parse_expression(inner, &mut depth)?);
            }
            _ => {}
        }
    }

    match (target, expression) {
        (Some(target), Some(expression)) => Ok(DerivationRule {
            target,
            expression,
            source: content.trim().to_string(),
        }),
        _ => Err(TakeoffError::parse_with_suggestion(
            "Rule must have the form 'target = expression'",
            empty_span(),
            source,
            "Write the rule as e.g. 'width = lanes * lane_width'",
        )),
    }
}

/// Parse several rules, stopping at the first failure
pub fn parse_rules(contents: &[&str], limits: &ResourceLimits) -> TakeoffResult<Vec<DerivationRule>> {
    contents
        .iter()
        .map(|content| parse_rule(content, limits))
        .collect()
}

fn pest_error(e: pest::error::Error<Rule>, source: Arc<str>) -> TakeoffError {
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((start_line, start_col), (_, _)) => {
            (start_line, start_col)
        }
    };
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let span = Span {
        start,
        end,
        line,
        col,
    };

    let suggestion = if source.contains('=') {
        "Expressions may use numbers, identifiers, + - * / and parentheses"
    } else {
        "A rule needs a target and an expression separated by '='"
    };

    TakeoffError::parse_with_suggestion(
        format!("Invalid rule: {}", e.variant.message()),
        span,
        source,
        suggestion,
    )
}

fn empty_span() -> Span {
    Span {
        start: 0,
        end: 0,
        line: 1,
        col: 1,
    }
}
