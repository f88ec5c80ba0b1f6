//! AST types for rule expressions
//!
//! This module contains the expression tree produced by the parser and
//! consumed by the evaluator:
//! - `Span` for tracking source locations inside rule text
//! - `Expression` / `ExpressionKind` for the typed tree
//! - `ArithmeticOperation` for the four binary operators

use rust_decimal::Decimal;
use std::fmt;

/// Span representing a location in rule text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOperation {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOperation::Add => "+",
            ArithmeticOperation::Subtract => "-",
            ArithmeticOperation::Multiply => "*",
            ArithmeticOperation::Divide => "/",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            ArithmeticOperation::Add | ArithmeticOperation::Subtract => 1,
            ArithmeticOperation::Multiply | ArithmeticOperation::Divide => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(Decimal),
    /// Name of a fact or of another rule's target
    Reference(String),
    Arithmetic(Box<Expression>, ArithmeticOperation, Box<Expression>),
}

/// A node of the expression tree, with the span it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Option<Span>,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    pub fn literal(value: Decimal) -> Self {
        Self::new(ExpressionKind::Literal(value), None)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(ExpressionKind::Reference(name.into()), None)
    }

    pub fn arithmetic(left: Expression, op: ArithmeticOperation, right: Expression) -> Self {
        Self::new(
            ExpressionKind::Arithmetic(Box::new(left), op, Box::new(right)),
            None,
        )
    }

    /// Names referenced by this expression, in first-appearance order, without duplicates
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match &self.kind {
            ExpressionKind::Literal(_) => {}
            ExpressionKind::Reference(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
            ExpressionKind::Arithmetic(left, _, right) => {
                left.collect_references(names);
                right.collect_references(names);
            }
        }
    }

    fn fmt_with_parent(&self, f: &mut fmt::Formatter<'_>, parent: u8, right_side: bool) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Literal(value) => write!(f, "{}", value.normalize()),
            ExpressionKind::Reference(name) => write!(f, "{}", name),
            ExpressionKind::Arithmetic(left, op, right) => {
                let own = op.precedence();
                let wrap = own < parent || (right_side && own == parent);
                if wrap {
                    write!(f, "(")?;
                }
                left.fmt_with_parent(f, own, false)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_with_parent(f, own, true)?;
                if wrap {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_parent(f, 0, false)
    }
}
