use crate::project::{DescriptionExtractor, Project, ProjectDeclaration, PROJECT_TYPE_KEY};
use crate::projects;
use crate::{ResourceLimits, TakeoffError, TakeoffResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a declaration for one project type
pub type DeclarationFn = fn() -> ProjectDeclaration;

/// Table of constructible project types.
///
/// Registration takes `&mut self`, so the table is complete before a
/// registry is shared; lookups afterwards are read-only.
#[derive(Clone, Default)]
pub struct ProjectRegistry {
    declarations: HashMap<String, Arc<ProjectDeclaration>>,
    extractor: Option<Arc<dyn DescriptionExtractor>>,
    limits: ResourceLimits,
}

impl ProjectRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with bridges, roads, railways, energy and other projects
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_types();
        registry
    }

    pub fn register_builtin_types(&mut self) {
        self.register_declaration(projects::bridge::declaration);
        self.register_declaration(projects::road::declaration);
        self.register_declaration(projects::energy::declaration);
        self.register_declaration(projects::generic::declaration);
        self.register_declaration(projects::railway::declaration);
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DescriptionExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Register `constructor` under `type_name`; a later registration for the
    /// same name replaces the earlier one
    pub fn register(&mut self, type_name: &str, constructor: DeclarationFn) {
        let key = type_name.trim().to_lowercase();
        debug!(project_type = %key, "registering project type");
        let declaration = constructor().with_project_type(key.clone());
        self.declarations.insert(key, Arc::new(declaration));
    }

    /// Register under the declaration's own project type
    pub fn register_declaration(&mut self, constructor: DeclarationFn) {
        let declaration = constructor();
        let key = declaration.project_type().trim().to_lowercase();
        let declaration = declaration.with_project_type(key.clone());
        debug!(project_type = %key, "registering project type");
        self.declarations.insert(key, Arc::new(declaration));
    }

    /// Registered type names, sorted
    pub fn project_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.declarations.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.declarations.contains_key(&type_name.trim().to_lowercase())
    }

    pub fn declaration(&self, type_name: &str) -> Option<&ProjectDeclaration> {
        self.declarations
            .get(&type_name.trim().to_lowercase())
            .map(|d| d.as_ref())
    }

    /// A fresh project with declared defaults, or `None` for an unknown type
    pub fn from_type(&self, type_name: &str) -> TakeoffResult<Option<Project>> {
        let Some(declaration) = self.declarations.get(&type_name.trim().to_lowercase()) else {
            return Ok(None);
        };
        let project = Project::with_limits(Arc::clone(declaration), self.limits.clone())?;
        Ok(Some(self.attach(project)))
    }

    /// Build a project from a payload carrying `"project_type"`
    pub fn from_json(&self, payload: &serde_json::Value) -> TakeoffResult<Project> {
        let requested = payload
            .get(PROJECT_TYPE_KEY)
            .and_then(|value| value.as_str())
            .map(|name| name.trim().to_lowercase());

        let declaration = match requested.as_deref().and_then(|name| self.declarations.get(name)) {
            Some(declaration) => Arc::clone(declaration),
            None => {
                return Err(TakeoffError::UnknownProjectType(format!(
                    "'{}' required and must be one of {}",
                    PROJECT_TYPE_KEY,
                    self.project_types().join(", ")
                )))
            }
        };

        let project = Project::from_json_with_limits(declaration, payload, self.limits.clone())?;
        Ok(self.attach(project))
    }

    fn attach(&self, mut project: Project) -> Project {
        if let Some(extractor) = &self.extractor {
            project.set_extractor(Arc::clone(extractor));
        }
        project
    }
}

impl fmt::Debug for ProjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectRegistry")
            .field("project_types", &self.project_types())
            .field("has_extractor", &self.extractor.is_some())
            .field("limits", &self.limits)
            .finish()
    }
}
