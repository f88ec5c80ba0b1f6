use crate::ast::Span;
use std::sync::Arc;
use thiserror::Error;

/// Detailed error information with source location
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for the takeoff system
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TakeoffError {
    /// Rule text could not be parsed
    #[error("Parse error: {}", describe(.0))]
    Parse(Box<ErrorDetails>),

    /// An identifier in a rule resolved to no fact and no rule
    #[error("Undefined variable '{name}' in rule for '{target}'")]
    UndefinedVariable { name: String, target: String },

    /// An identifier resolved to a value that cannot take part in arithmetic
    #[error("Expected a number for '{name}', got {value}")]
    NotANumber { name: String, value: String },

    #[error("Division by zero in rule for '{target}'")]
    DivisionByZero { target: String },

    #[error("Arithmetic overflow in rule for '{target}'")]
    Overflow { target: String },

    /// A query re-entered a subject it was already resolving
    #[error("Cyclic derivation: {}", .0.join(" -> "))]
    CyclicDerivation(Vec<String>),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// A declared parameter has neither a fact nor a rule
    #[error("Parameter '{name}' of {project_type} could not be resolved")]
    UnresolvedParameter { name: String, project_type: String },

    #[error("Unknown parameter '{name}' for {project_type}")]
    UnknownParameter { name: String, project_type: String },

    /// JSON payload failed schema validation, one message per problem
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("{0}")]
    UnknownProjectType(String),

    #[error("{0}")]
    ExtractorMissing(String),
}

fn describe(details: &ErrorDetails) -> String {
    let mut text = details.message.clone();
    if let Some(suggestion) = &details.suggestion {
        text.push_str(&format!(" (suggestion: {})", suggestion));
    }
    format!("{} at {}:{}", text, details.span.line, details.span.col)
}

impl TakeoffError {
    /// Create a parse error with source information
    pub fn parse(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// True for errors caused by caller input rather than by a broken declaration.
    ///
    /// Input errors are meant to be mapped to user-facing responses; everything
    /// else indicates an internally inconsistent rule set.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TakeoffError::Validation(_)
                | TakeoffError::UnknownProjectType(_)
                | TakeoffError::ExtractorMissing(_)
                | TakeoffError::UnknownParameter { .. }
        )
    }

    /// User-facing messages, one per problem
    pub fn messages(&self) -> Vec<String> {
        match self {
            TakeoffError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
