//! # Takeoff Engine
//!
//! **Material takeoff for infrastructure projects**
//!
//! Takeoff estimates physical material quantities (concrete, steel, asphalt,
//! ballast, timber) for bridges, roads, railways and other projects from a
//! handful of known measurements, and converts them into CO2 estimates.
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff::{ProjectRegistry, TakeoffResult};
//!
//! fn main() -> TakeoffResult<()> {
//!     let registry = ProjectRegistry::with_builtin_types();
//!
//!     let payload = serde_json::json!({
//!         "project_type": "bridges",
//!         "length": 100,
//!         "lanes": 2,
//!     });
//!     let bridge = registry.from_json(&payload)?;
//!
//!     assert_eq!(bridge.to_json()["surface_area"], 4800);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Facts
//! Facts are `(relation, subject, value)` triples. Text values chain: a
//! query follows a text value as the subject of further facts.
//!
//! ### Rules
//! Rules have the form `target = expression` over numbers, identifiers and
//! `+ - * /`. Identifiers resolve through nested queries; results are
//! memoized as new facts.
//!
//! ### Projects
//! A project declares required and calculated parameters. Caller supplied
//! values are *forced* and always win over defaults and derivations.

pub mod ast;
pub mod emissions;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod project;
pub mod projects;
pub mod registry;
pub mod resource_limits;
pub mod sector;
pub mod semantic;
pub mod units;

pub use ast::{ArithmeticOperation, Expression, ExpressionKind, Span};
pub use emissions::Co2Estimator;
pub use engine::InferenceEngine;
pub use error::{ErrorDetails, TakeoffError};
pub use parser::{parse_rule, parse_rules};
pub use project::{
    DescriptionExtractor, Descriptor, MeasurementExtractor, Parameter, Project, ProjectDeclaration,
};
pub use registry::ProjectRegistry;
pub use resource_limits::ResourceLimits;
pub use sector::Sector;
pub use semantic::{DerivationRule, Fact, Value, HAS_VALUE};

/// Result type for takeoff operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

#[cfg(test)]
mod tests;
