//! Checked decimal arithmetic
//!
//! Every operation either yields an exact decimal or an explicit error; there
//! is no silent infinity or wrap-around.

use crate::{ArithmeticOperation, TakeoffError, TakeoffResult};
use rust_decimal::Decimal;

/// Apply `op` to two decimals on behalf of the rule for `target`.
///
/// # Examples
/// ```text
/// 96000 * 1.5 = 144000
/// 21600000 / 2000 = 10800
/// 1 / 0 -> DivisionByZero
/// ```
pub fn number_arithmetic(
    left: Decimal,
    op: ArithmeticOperation,
    right: Decimal,
    target: &str,
) -> TakeoffResult<Decimal> {
    let result = match op {
        ArithmeticOperation::Add => left.checked_add(right),
        ArithmeticOperation::Subtract => left.checked_sub(right),
        ArithmeticOperation::Multiply => left.checked_mul(right),
        ArithmeticOperation::Divide => {
            if right.is_zero() {
                return Err(TakeoffError::DivisionByZero {
                    target: target.to_string(),
                });
            }
            left.checked_div(right)
        }
    };

    result.ok_or_else(|| TakeoffError::Overflow {
        target: target.to_string(),
    })
}
