use crate::semantic::Value;
use serde::Serialize;
use std::fmt;

/// A named, unit-tagged slot of a project.
///
/// `forced` marks a caller-supplied value; recompute seeds it in place of
/// the declared default and never overwrites it with a derived value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub units: String,
    pub forced: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Null,
            units: units.into(),
            forced: false,
        }
    }

    pub fn force(&mut self, value: Value) {
        self.value = value;
        self.forced = true;
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} {}", self.name, self.value, self.units)?;
        if self.forced {
            write!(f, " (forced)")?;
        }
        Ok(())
    }
}
