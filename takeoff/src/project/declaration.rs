use crate::parser::parse_rule;
use crate::sector::Sector;
use crate::semantic::{DerivationRule, Value};
use crate::{ResourceLimits, TakeoffResult};
use std::sync::Arc;

/// Name and units of a declared parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub units: String,
}

/// Static schema of one project type: its parameter slots, default facts
/// and derivation rules, all in declaration order.
///
/// The project type defaults to the sector name; a registry stamps it with
/// the key it registers the declaration under.
///
/// ```
/// use takeoff::{ProjectDeclaration, Sector};
///
/// let declaration = ProjectDeclaration::new(Sector::Bridges)
///     .require("length", "feet")
///     .calculate("tons_steel", "tons")
///     .fact("length", 1000)
///     .fact("tons_per_foot_steel", 123)
///     .rule("tons_steel = tons_per_foot_steel * length");
///
/// assert_eq!(declaration.project_type(), "bridges");
/// assert_eq!(declaration.rules().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDeclaration {
    sector: Sector,
    project_type: String,
    required: Vec<Descriptor>,
    calculated: Vec<Descriptor>,
    default_facts: Vec<(String, Value)>,
    rules: Vec<String>,
}

impl ProjectDeclaration {
    pub fn new(sector: Sector) -> Self {
        Self {
            sector,
            project_type: sector.as_str().to_string(),
            required: Vec::new(),
            calculated: Vec::new(),
            default_facts: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Replace the project type tag carried in JSON and messages
    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = project_type.into();
        self
    }

    pub fn require(mut self, name: impl Into<String>, units: impl Into<String>) -> Self {
        self.required.push(Descriptor {
            name: name.into(),
            units: units.into(),
        });
        self
    }

    pub fn calculate(mut self, name: impl Into<String>, units: impl Into<String>) -> Self {
        self.calculated.push(Descriptor {
            name: name.into(),
            units: units.into(),
        });
        self
    }

    pub fn fact(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_facts.push((name.into(), value.into()));
        self
    }

    pub fn rule(mut self, rule_text: impl Into<String>) -> Self {
        self.rules.push(rule_text.into());
        self
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    pub fn required(&self) -> &[Descriptor] {
        &self.required
    }

    pub fn calculated(&self) -> &[Descriptor] {
        &self.calculated
    }

    pub fn default_facts(&self) -> &[(String, Value)] {
        &self.default_facts
    }

    pub fn default_fact(&self, name: &str) -> Option<&Value> {
        self.default_facts
            .iter()
            .find(|(fact_name, _)| fact_name == name)
            .map(|(_, value)| value)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|d| d.name == name)
    }

    pub fn is_calculated(&self, name: &str) -> bool {
        self.calculated.iter().any(|d| d.name == name)
    }

    pub(crate) fn compile_rules(&self, limits: &ResourceLimits) -> TakeoffResult<Vec<Arc<DerivationRule>>> {
        self.rules
            .iter()
            .map(|text| parse_rule(text, limits).map(Arc::new))
            .collect()
    }
}
