//! Parameterized projects on top of the inference engine
//!
//! A project owns required and calculated parameter slots. Every mutation
//! rebuilds a fresh engine from the declaration's default facts (or forced
//! values in their place) and rules, then re-resolves every slot. Mutations
//! work on a copy of the slots and are committed only when that succeeds.

pub mod declaration;
pub mod extractor;
pub mod parameter;

pub use declaration::{Descriptor, ProjectDeclaration};
pub use extractor::{DescriptionExtractor, MeasurementExtractor};
pub use parameter::Parameter;

use crate::engine::InferenceEngine;
use crate::semantic::{DerivationRule, Fact, Value, HAS_VALUE};
use crate::{ResourceLimits, TakeoffError, TakeoffResult};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Key under which JSON payloads carry the project type
pub const PROJECT_TYPE_KEY: &str = "project_type";

#[derive(Clone)]
pub struct Project {
    declaration: Arc<ProjectDeclaration>,
    rules: Vec<Arc<DerivationRule>>,
    required: Vec<Parameter>,
    calculated: Vec<Parameter>,
    limits: ResourceLimits,
    extractor: Option<Arc<dyn DescriptionExtractor>>,
}

impl Project {
    /// Create a project with every slot resolved from the declared defaults
    pub fn new(declaration: Arc<ProjectDeclaration>) -> TakeoffResult<Self> {
        Self::with_limits(declaration, ResourceLimits::default())
    }

    pub fn with_limits(declaration: Arc<ProjectDeclaration>, limits: ResourceLimits) -> TakeoffResult<Self> {
        let rules = declaration.compile_rules(&limits)?;
        let required = declaration
            .required()
            .iter()
            .map(|d| Parameter::new(&d.name, &d.units))
            .collect();
        let calculated = declaration
            .calculated()
            .iter()
            .map(|d| Parameter::new(&d.name, &d.units))
            .collect();

        let mut project = Self {
            declaration,
            rules,
            required,
            calculated,
            limits,
            extractor: None,
        };
        project.recompute()?;
        Ok(project)
    }

    /// Build a project from a JSON payload.
    ///
    /// Every required parameter must be present; required and present
    /// calculated parameters become forced.
    pub fn from_json(declaration: Arc<ProjectDeclaration>, payload: &serde_json::Value) -> TakeoffResult<Self> {
        Self::from_json_with_limits(declaration, payload, ResourceLimits::default())
    }

    pub fn from_json_with_limits(
        declaration: Arc<ProjectDeclaration>,
        payload: &serde_json::Value,
        limits: ResourceLimits,
    ) -> TakeoffResult<Self> {
        let mut project = Self::with_limits(declaration, limits)?;
        project.import_json(payload)?;
        Ok(project)
    }

    /// Apply a JSON payload to this project, leaving it unchanged on failure
    pub fn import_json(&mut self, payload: &serde_json::Value) -> TakeoffResult<()> {
        let object = payload.as_object().ok_or_else(|| {
            TakeoffError::Validation(vec![format!(
                "Payload for {} must be a JSON object.",
                self.project_type()
            )])
        })?;

        let mut messages = Vec::new();
        let mut required = self.required.clone();
        let mut calculated = self.calculated.clone();

        for param in required.iter_mut() {
            match object.get(&param.name) {
                None => messages.push(format!(
                    "'{}' required for {}. Add {} in {}.",
                    param.name,
                    self.project_type(),
                    param.name,
                    param.units
                )),
                Some(json) => match self.payload_value(param, json) {
                    Ok(value) => param.force(value),
                    Err(message) => messages.push(message),
                },
            }
        }

        for param in calculated.iter_mut() {
            if let Some(json) = object.get(&param.name) {
                match self.payload_value(param, json) {
                    Ok(value) => param.force(value),
                    Err(message) => messages.push(message),
                }
            }
        }

        if !messages.is_empty() {
            warn!(
                project_type = self.project_type(),
                problems = messages.len(),
                "rejected JSON payload"
            );
            return Err(TakeoffError::Validation(messages));
        }

        self.commit(required, calculated)
    }

    /// Force the value of a required or calculated parameter and recompute
    pub fn force_param(&mut self, name: &str, value: impl Into<Value>) -> TakeoffResult<()> {
        let mut required = self.required.clone();
        let mut calculated = self.calculated.clone();

        let param = required
            .iter_mut()
            .chain(calculated.iter_mut())
            .find(|p| p.name == name)
            .ok_or_else(|| TakeoffError::UnknownParameter {
                name: name.to_string(),
                project_type: self.project_type().to_string(),
            })?;
        let value = value.into();
        if let Some(message) = self.text_mismatch(param, &value) {
            return Err(TakeoffError::Validation(vec![message]));
        }
        param.force(value);

        self.commit(required, calculated)
    }

    /// Ask the attached extractor for every required parameter described in
    /// `text`. Returns how many parameters were extracted; recompute runs
    /// even when none were.
    pub fn params_from_description(&mut self, text: &str) -> TakeoffResult<usize> {
        let Some(extractor) = self.extractor.clone() else {
            let message = "Description extractor not set, cannot parse descriptions";
            error!(project_type = self.project_type(), "{}", message);
            return Err(TakeoffError::ExtractorMissing(message.to_string()));
        };

        let mut required = self.required.clone();
        let calculated = self.calculated.clone();
        let mut extracted = 0;

        for param in required.iter_mut() {
            if let Some(value) = extractor.get_param(&param.name, text) {
                param.force(Value::Number(value));
                extracted += 1;
            }
        }

        self.commit(required, calculated)?;
        Ok(extracted)
    }

    /// Rebuild the engine from current forced values and defaults and
    /// re-resolve every parameter
    pub fn recompute(&mut self) -> TakeoffResult<()> {
        let required = self.required.clone();
        let calculated = self.calculated.clone();
        self.commit(required, calculated)
    }

    fn commit(&mut self, mut required: Vec<Parameter>, mut calculated: Vec<Parameter>) -> TakeoffResult<()> {
        self.resolve(&mut required, &mut calculated)?;
        self.required = required;
        self.calculated = calculated;
        Ok(())
    }

    fn resolve(&self, required: &mut [Parameter], calculated: &mut [Parameter]) -> TakeoffResult<()> {
        debug!(project_type = self.project_type(), "recomputing project");

        let forced: HashMap<&str, Value> = required
            .iter()
            .chain(calculated.iter())
            .filter(|p| p.forced)
            .map(|p| (p.name.as_str(), p.value.clone()))
            .collect();
        let mut seeded = HashSet::new();

        let mut engine = InferenceEngine::with_limits(self.limits.clone());
        for (name, default) in self.declaration.default_facts() {
            let value = forced.get(name.as_str()).unwrap_or(default).clone();
            engine.add_fact(Fact::has_value(name, value));
            seeded.insert(name.as_str());
        }
        for rule in &self.rules {
            if let Some(value) = forced.get(rule.target.as_str()) {
                engine.add_fact(Fact::has_value(&rule.target, value.clone()));
                seeded.insert(rule.target.as_str());
            }
            engine.add_rule(Arc::clone(rule));
        }
        for (name, value) in &forced {
            if !seeded.contains(name) {
                engine.add_fact(Fact::has_value(*name, value.clone()));
            }
        }

        let mut values = Vec::with_capacity(required.len() + calculated.len());
        for param in required.iter().chain(calculated.iter()) {
            let value = engine
                .query(HAS_VALUE, &param.name)?
                .into_iter()
                .next()
                .ok_or_else(|| TakeoffError::UnresolvedParameter {
                    name: param.name.clone(),
                    project_type: self.project_type().to_string(),
                })?;
            values.push(value);
        }

        for (param, value) in required.iter_mut().chain(calculated.iter_mut()).zip(values) {
            param.value = value;
        }
        Ok(())
    }

    fn payload_value(&self, param: &Parameter, json: &serde_json::Value) -> Result<Value, String> {
        let value = match Value::from_json(json) {
            Some(value) => value,
            None if json.is_number() => {
                return Err(format!(
                    "'{}' is out of range, got {}. Add {} in {}.",
                    param.name, json, param.name, param.units
                ))
            }
            None => {
                return Err(format!(
                    "'{}' must be a number, string or null, got {}. Add {} in {}.",
                    param.name, json, param.name, param.units
                ))
            }
        };
        match self.text_mismatch(param, &value) {
            Some(message) => Err(message),
            None => Ok(value),
        }
    }

    /// Text is accepted only where the declared default is text, or for a
    /// required slot without a default. Calculated slots are rule outputs
    /// and always numeric.
    fn text_mismatch(&self, param: &Parameter, value: &Value) -> Option<String> {
        let Value::Text(text) = value else {
            return None;
        };
        let accepts_text = match self.declaration.default_fact(&param.name) {
            Some(default) => matches!(default, Value::Text(_)),
            None => self.declaration.is_required(&param.name),
        };
        if accepts_text {
            return None;
        }
        Some(format!(
            "'{}' must be a number, got \"{}\". Add {} in {}.",
            param.name, text, param.name, param.units
        ))
    }

    /// Flat JSON object of every parameter value plus the project type
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for param in self.parameters() {
            object.insert(param.name.clone(), param.value.to_json());
        }
        object.insert(
            PROJECT_TYPE_KEY.to_string(),
            serde_json::Value::String(self.project_type().to_string()),
        );
        serde_json::Value::Object(object)
    }

    pub fn project_type(&self) -> &str {
        self.declaration.project_type()
    }

    pub fn declaration(&self) -> &ProjectDeclaration {
        &self.declaration
    }

    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.parameters().find(|p| p.name == name)
    }

    pub fn get_param_value(&self, name: &str) -> Option<&Value> {
        self.get_param(name).map(|p| &p.value)
    }

    /// Required parameters first, then calculated ones, in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.required.iter().chain(self.calculated.iter())
    }

    pub fn required_parameters(&self) -> &[Parameter] {
        &self.required
    }

    pub fn calculated_parameters(&self) -> &[Parameter] {
        &self.calculated
    }

    pub fn set_extractor(&mut self, extractor: Arc<dyn DescriptionExtractor>) {
        self.extractor = Some(extractor);
    }

    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }
}


impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("project_type", &self.project_type())
            .field("required", &self.required)
            .field("calculated", &self.calculated)
            .field("has_extractor", &self.extractor.is_some())
            .finish()
    }
}
