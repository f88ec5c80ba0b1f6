//! Evaluation of parsed rule expressions against resolved bindings

pub mod operations;

use crate::ast::{Expression, ExpressionKind};
use crate::semantic::Value;
use crate::{TakeoffError, TakeoffResult};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Identifier values resolved before evaluation
pub type Bindings = HashMap<String, Value>;

/// Evaluate `expr` using only the given bindings.
///
/// `target` names the rule being evaluated and is carried into errors.
pub fn evaluate_expression(
    expr: &Expression,
    bindings: &Bindings,
    target: &str,
) -> TakeoffResult<Decimal> {
    match &expr.kind {
        ExpressionKind::Literal(value) => Ok(*value),
        ExpressionKind::Reference(name) => match bindings.get(name) {
            Some(Value::Number(n)) => Ok(*n),
            Some(other) => Err(TakeoffError::NotANumber {
                name: name.clone(),
                value: other.to_string(),
            }),
            None => Err(TakeoffError::UndefinedVariable {
                name: name.clone(),
                target: target.to_string(),
            }),
        },
        ExpressionKind::Arithmetic(left, op, right) => {
            let l = evaluate_expression(left, bindings, target)?;
            let r = evaluate_expression(right, bindings, target)?;
            operations::number_arithmetic(l, *op, r, target)
        }
    }
}
