use crate::evaluator::{evaluate_expression, Bindings};
use crate::semantic::{DerivationRule, Fact, Value, HAS_VALUE};
use crate::{ResourceLimits, TakeoffError, TakeoffResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Forward-chaining fact and rule store.
///
/// Facts are scanned before rules, so a fact seeded for a subject always
/// comes first in query results. Rule results are memoized as new
/// `has_value` facts for the lifetime of the engine.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    facts: Vec<Fact>,
    rules: Vec<Arc<DerivationRule>>,
    default_value: Value,
    replace_nulls: bool,
    derived: HashSet<String>,
    in_progress: Vec<(String, String)>,
    limits: ResourceLimits,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::with_limits(ResourceLimits::default())
    }
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            facts: Vec::new(),
            rules: Vec::new(),
            default_value: Value::Null,
            replace_nulls: false,
            derived: HashSet::new(),
            in_progress: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Append a fact. Null values are replaced by the default value when the
    /// replace-null policy is active.
    pub fn add_fact(&mut self, mut fact: Fact) {
        if self.replace_nulls && fact.value.is_null() {
            fact.value = self.default_value.clone();
        }
        self.facts.push(fact);
    }

    pub fn add_rule(&mut self, rule: impl Into<Arc<DerivationRule>>) {
        self.rules.push(rule.into());
    }

    /// Parse `rule_text` with this engine's limits and append it
    pub fn add_rule_text(&mut self, rule_text: &str) -> TakeoffResult<()> {
        let rule = crate::parser::parse_rule(rule_text, &self.limits)?;
        self.add_rule(rule);
        Ok(())
    }

    pub fn set_default_behavior(&mut self, value: impl Into<Value>, replace_nulls: bool) {
        self.default_value = value.into();
        self.replace_nulls = replace_nulls;
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Resolve every value of `relation` for `subject`.
    ///
    /// Text values are chained: each one is queried as a subject in turn and
    /// its results follow it. For `has_value`, the first rule targeting
    /// `subject` is evaluated once and its result memoized.
    pub fn query(&mut self, relation: &str, subject: &str) -> TakeoffResult<Vec<Value>> {
        self.enter(relation, subject)?;
        let result = self.query_inner(relation, subject);
        self.in_progress.pop();
        result
    }

    fn query_inner(&mut self, relation: &str, subject: &str) -> TakeoffResult<Vec<Value>> {
        let mut results = Vec::new();

        let matches: Vec<Value> = self
            .facts
            .iter()
            .filter(|fact| fact.relation == relation && fact.subject == subject)
            .map(|fact| fact.value.clone())
            .collect();

        for value in matches {
            let chained = match &value {
                Value::Text(next) => Some(next.clone()),
                _ => None,
            };
            results.push(value);
            if let Some(next) = chained {
                results.extend(self.query(relation, &next)?);
            }
        }

        if relation == HAS_VALUE && !self.derived.contains(subject) {
            let rule = self.rules.iter().find(|rule| rule.target == subject).cloned();
            if let Some(rule) = rule {
                let value = self.evaluate_rule(&rule)?;
                trace!(subject, value = %value, "memoized derived fact");
                self.derived.insert(subject.to_string());
                self.facts.push(Fact::has_value(subject, value.clone()));
                results.push(value);
            }
        }

        Ok(results)
    }

    fn evaluate_rule(&mut self, rule: &DerivationRule) -> TakeoffResult<Value> {
        trace!(rule = %rule, "evaluating rule");
        let mut bindings = Bindings::new();
        for name in rule.expression.references() {
            if let Some(value) = self.query(HAS_VALUE, name)?.into_iter().next() {
                bindings.insert(name.to_string(), value);
            }
        }
        let number = evaluate_expression(&rule.expression, &bindings, &rule.target)?;
        Ok(Value::Number(number))
    }

    fn enter(&mut self, relation: &str, subject: &str) -> TakeoffResult<()> {
        let on_stack = self
            .in_progress
            .iter()
            .any(|(r, s)| r == relation && s == subject);
        if on_stack {
            let mut chain: Vec<String> = self
                .in_progress
                .iter()
                .filter(|(r, _)| r == relation)
                .map(|(_, s)| s.clone())
                .skip_while(|s| s != subject)
                .collect();
            chain.push(subject.to_string());
            return Err(TakeoffError::CyclicDerivation(chain));
        }
        if self.in_progress.len() >= self.limits.max_chain_depth {
            return Err(TakeoffError::ResourceLimitExceeded {
                limit_name: "max_chain_depth".to_string(),
                limit_value: self.limits.max_chain_depth.to_string(),
                actual_value: (self.in_progress.len() + 1).to_string(),
                suggestion: "Shorten the chain of facts and rules feeding this subject".to_string(),
            });
        }
        self.in_progress.push((relation.to_string(), subject.to_string()));
        Ok(())
    }

    /// Backward resolution: subjects whose value is `object`, each followed
    /// by the subjects chaining into it.
    pub fn query_post(&self, relation: &str, object: &str) -> TakeoffResult<Vec<String>> {
        let mut path = Vec::new();
        self.query_post_inner(relation, object, &mut path)
    }

    fn query_post_inner(
        &self,
        relation: &str,
        object: &str,
        path: &mut Vec<String>,
    ) -> TakeoffResult<Vec<String>> {
        if path.iter().any(|seen| seen == object) {
            let mut chain: Vec<String> = path.iter().skip_while(|s| *s != object).cloned().collect();
            chain.push(object.to_string());
            return Err(TakeoffError::CyclicDerivation(chain));
        }
        if path.len() >= self.limits.max_chain_depth {
            return Err(TakeoffError::ResourceLimitExceeded {
                limit_name: "max_chain_depth".to_string(),
                limit_value: self.limits.max_chain_depth.to_string(),
                actual_value: (path.len() + 1).to_string(),
                suggestion: "Shorten the chain of facts feeding this object".to_string(),
            });
        }
        path.push(object.to_string());

        let subjects: Vec<&str> = self
            .facts
            .iter()
            .filter(|fact| fact.relation == relation && value_matches(&fact.value, object))
            .map(|fact| fact.subject.as_str())
            .collect();

        let mut results = Vec::new();
        for subject in subjects {
            results.push(subject.to_string());
            results.extend(self.query_post_inner(relation, subject, path)?);
        }

        path.pop();
        Ok(results)
    }
}

fn value_matches(value: &Value, object: &str) -> bool {
    match value {
        Value::Text(text) => text == object,
        Value::Number(n) => n.normalize().to_string() == object,
        Value::Null => false,
    }
}
