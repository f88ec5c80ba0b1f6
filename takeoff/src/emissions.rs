//! CO2 estimation from project material quantities
//!
//! Concrete and diesel are converted with averaged published emission
//! factors. Parameters a project does not declare count as zero.

use crate::engine::InferenceEngine;
use crate::project::Project;
use crate::projects::{GALLONS_DIESEL, TONS_CONCRETE};
use crate::semantic::{Fact, Value, HAS_VALUE};
use crate::units::{KG_PER_TONNE, POUNDS_PER_TON};
use crate::{ResourceLimits, TakeoffError, TakeoffResult};
use rust_decimal::Decimal;
use tracing::debug;

pub const CO2: &str = "co2";

const RULES: [&str; 3] = [
    "co2_concrete = tons_concrete * tons_co2_per_ton_concrete",
    "co2_diesel = gallons_diesel * tons_co2_per_gallon_diesel",
    "co2 = co2_concrete + co2_diesel",
];

/// Tons of CO2 per ton of concrete, averaged over three published figures:
/// US production (9.8 Mt CO2 for 76 Mt concrete, about 0.13), world cement
/// production in 2016 (2200 Mt CO2 for 4200 Mt) and 72.2 kg CO2 per tonne of
/// UK concrete.
pub fn tons_co2_per_ton_concrete() -> Decimal {
    let us_production = Decimal::new(13, 2);
    let world_cement = Decimal::from(2200) / Decimal::from(4200);
    let uk_concrete = Decimal::new(722, 1) / KG_PER_TONNE;
    (us_production + world_cement + uk_concrete) / Decimal::from(3)
}

/// Tons of CO2 per gallon of diesel burned (22.4 lb)
pub fn tons_co2_per_gallon_diesel() -> Decimal {
    Decimal::new(224, 1) / POUNDS_PER_TON
}

/// Estimates CO2 from concrete and diesel quantities
#[derive(Debug, Clone, Default)]
pub struct Co2Estimator {
    limits: ResourceLimits,
}

impl Co2Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self { limits }
    }

    /// Tons of CO2 for the project's `tons_concrete` and `gallons_diesel`
    pub fn estimate(&self, project: &Project) -> TakeoffResult<Decimal> {
        debug!(project_type = project.project_type(), "estimating co2");
        let concrete = project.get_param_value(TONS_CONCRETE).cloned().unwrap_or(Value::Null);
        let diesel = project.get_param_value(GALLONS_DIESEL).cloned().unwrap_or(Value::Null);
        self.estimate_quantities(concrete, diesel)
    }

    /// Tons of CO2 for raw quantities; `Null` counts as zero
    pub fn estimate_quantities(
        &self,
        tons_concrete: impl Into<Value>,
        gallons_diesel: impl Into<Value>,
    ) -> TakeoffResult<Decimal> {
        let mut engine = self.engine()?;
        engine.add_fact(Fact::has_value(TONS_CONCRETE, tons_concrete));
        engine.add_fact(Fact::has_value(GALLONS_DIESEL, gallons_diesel));

        let result = engine.query(HAS_VALUE, CO2)?.into_iter().next();
        match result {
            Some(Value::Number(co2)) => Ok(co2),
            Some(other) => Err(TakeoffError::NotANumber {
                name: CO2.to_string(),
                value: other.to_string(),
            }),
            None => Err(TakeoffError::UnresolvedParameter {
                name: CO2.to_string(),
                project_type: "co2 estimate".to_string(),
            }),
        }
    }

    fn engine(&self) -> TakeoffResult<InferenceEngine> {
        let mut engine = InferenceEngine::with_limits(self.limits.clone());
        engine.add_fact(Fact::has_value("tons_co2_per_ton_concrete", tons_co2_per_ton_concrete()));
        engine.add_fact(Fact::has_value("tons_co2_per_gallon_diesel", tons_co2_per_gallon_diesel()));
        for rule in RULES {
            engine.add_rule_text(rule)?;
        }
        engine.set_default_behavior(Decimal::ZERO, true);
        Ok(engine)
    }
}
