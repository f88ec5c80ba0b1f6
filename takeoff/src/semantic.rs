use crate::ast::Expression;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Relation used for numeric quantities: `has_value(subject) = value`
pub const HAS_VALUE: &str = "has_value";

/// Value carried by a fact or a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Number(Decimal),
    Text(String),
    Null,
}

impl Value {
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert a JSON scalar; booleans, arrays and objects have no counterpart
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            serde_json::Value::Number(n) => {
                let text = n.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .ok()
                    .map(Value::Number)
            }
            _ => None,
        }
    }

    /// Integral numbers become JSON integers, other numbers JSON floats
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => {
                let n = n.normalize();
                if n.fract().is_zero() {
                    if let Some(i) = n.to_i64() {
                        return serde_json::Value::from(i);
                    }
                }
                n.to_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n.normalize()),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Decimal::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Decimal::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A `(relation, subject, value)` triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    pub relation: String,
    pub subject: String,
    pub value: Value,
}

impl Fact {
    pub fn new(relation: impl Into<String>, subject: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            relation: relation.into(),
            subject: subject.into(),
            value: value.into(),
        }
    }

    pub fn has_value(subject: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(HAS_VALUE, subject, value)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) = {}", self.relation, self.subject, self.value)
    }
}

/// A derivation `target = expression`, parsed once from its text
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationRule {
    pub target: String,
    pub expression: Expression,
    pub source: String,
}

impl DerivationRule {
    pub fn parse(rule_text: &str) -> crate::TakeoffResult<Self> {
        crate::parser::parse_rule(rule_text, &crate::ResourceLimits::default())
    }
}

impl FromStr for DerivationRule {
    type Err = crate::TakeoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.expression)
    }
}
