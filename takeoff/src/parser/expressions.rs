use crate::ast::{ArithmeticOperation, Expression, ExpressionKind, Span};
use crate::error::TakeoffError;
use crate::parser::Rule;
use crate::TakeoffResult;
use pest::iterators::Pair;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Tracks nesting while the expression tree is built
pub(crate) struct DepthGuard {
    depth: usize,
    max_depth: usize,
}

impl DepthGuard {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    fn push(&mut self) -> TakeoffResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(TakeoffError::ResourceLimitExceeded {
                limit_name: "max_expression_depth".to_string(),
                limit_value: self.max_depth.to_string(),
                actual_value: self.depth.to_string(),
                suggestion: "Simplify nested expressions to reduce depth".to_string(),
            });
        }
        Ok(())
    }

    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

// Helper to create an Expression carrying its source span
fn traceable_expr(kind: ExpressionKind, pair: &Pair<Rule>) -> Expression {
    Expression::new(kind, Some(Span::from_pest_span(pair.as_span())))
}

fn engine_error(message: &str, pair: &Pair<Rule>) -> TakeoffError {
    TakeoffError::parse(
        message,
        Span::from_pest_span(pair.as_span()),
        pair.get_input().into(),
    )
}

pub(crate) fn parse_expression(pair: Pair<Rule>, depth: &mut DepthGuard) -> TakeoffResult<Expression> {
    depth.push()?;
    let result = parse_arithmetic_expression(pair, depth);
    depth.pop();
    result
}

fn parse_arithmetic_expression(pair: Pair<Rule>, depth: &mut DepthGuard) -> TakeoffResult<Expression> {
    // expression = { term ~ ((add_plus | add_minus) ~ term)* }
    let whole = pair.clone();
    let mut pairs = pair.into_inner();
    let first = pairs
        .next()
        .ok_or_else(|| engine_error("Empty arithmetic expression", &whole))?;
    let mut result = parse_term(first, depth)?;

    while let Some(op_pair) = pairs.next() {
        let operation = match op_pair.as_rule() {
            Rule::add_plus => ArithmeticOperation::Add,
            Rule::add_minus => ArithmeticOperation::Subtract,
            _ => return Err(engine_error("Unexpected operator in expression", &op_pair)),
        };
        let right = pairs
            .next()
            .ok_or_else(|| engine_error("Missing term after operator", &op_pair))?;
        let right = parse_term(right, depth)?;
        result = traceable_expr(
            ExpressionKind::Arithmetic(Box::new(result), operation, Box::new(right)),
            &whole,
        );
    }

    Ok(result)
}

fn parse_term(pair: Pair<Rule>, depth: &mut DepthGuard) -> TakeoffResult<Expression> {
    // term = { factor ~ ((mul_star | mul_slash) ~ factor)* }
    let whole = pair.clone();
    let mut pairs = pair.into_inner();
    let first = pairs
        .next()
        .ok_or_else(|| engine_error("Empty term", &whole))?;
    let mut result = parse_factor(first, depth)?;

    while let Some(op_pair) = pairs.next() {
        let operation = match op_pair.as_rule() {
            Rule::mul_star => ArithmeticOperation::Multiply,
            Rule::mul_slash => ArithmeticOperation::Divide,
            _ => return Err(engine_error("Unexpected operator in term", &op_pair)),
        };
        let right = pairs
            .next()
            .ok_or_else(|| engine_error("Missing factor after operator", &op_pair))?;
        let right = parse_factor(right, depth)?;
        result = traceable_expr(
            ExpressionKind::Arithmetic(Box::new(result), operation, Box::new(right)),
            &whole,
        );
    }

    Ok(result)
}

fn parse_factor(pair: Pair<Rule>, depth: &mut DepthGuard) -> TakeoffResult<Expression> {
    // factor = { unary_minus? ~ primary }
    let whole = pair.clone();
    let mut negate = false;
    let mut primary = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::unary_minus => negate = true,
            Rule::primary => primary = Some(parse_primary(inner, depth)?),
            _ => {}
        }
    }

    let expr = primary.ok_or_else(|| engine_error("Empty factor", &whole))?;
    if negate {
        // -x is represented as 0 - x
        let zero = traceable_expr(ExpressionKind::Literal(Decimal::ZERO), &whole);
        return Ok(traceable_expr(
            ExpressionKind::Arithmetic(Box::new(zero), ArithmeticOperation::Subtract, Box::new(expr)),
            &whole,
        ));
    }
    Ok(expr)
}

fn parse_primary(pair: Pair<Rule>, depth: &mut DepthGuard) -> TakeoffResult<Expression> {
    // primary = { number_literal | reference | "(" ~ expression ~ ")" }
    let whole = pair.clone();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number_literal => return parse_number_literal(inner),
            Rule::reference => {
                let name = inner.as_str().trim().to_string();
                return Ok(traceable_expr(ExpressionKind::Reference(name), &inner));
            }
            Rule::expression => return parse_expression(inner, depth),
            _ => {}
        }
    }
    Err(engine_error("Empty primary expression", &whole))
}

fn parse_number_literal(pair: Pair<Rule>) -> TakeoffResult<Expression> {
    let clean = pair.as_str().replace('_', "");
    let value = Decimal::from_str(&clean).map_err(|_| {
        TakeoffError::parse_with_suggestion(
            format!("Invalid number: '{}'", pair.as_str()),
            Span::from_pest_span(pair.as_span()),
            pair.get_input().into(),
            "Numbers must fit in 28 significant digits",
        )
    })?;
    Ok(traceable_expr(ExpressionKind::Literal(value), &pair))
}
