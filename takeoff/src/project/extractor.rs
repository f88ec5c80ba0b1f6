use crate::projects::{LANES, LENGTH, POWER_GENERATED};
use crate::units::{self, FEET, MEGAWATTS};
use rust_decimal::Decimal;

/// Pulls a numeric parameter value out of free text.
///
/// Implementations must be shareable across threads since one extractor is
/// attached to every project a registry builds.
pub trait DescriptionExtractor: Send + Sync {
    /// Value of parameter `name` described in `text`, if any
    fn get_param(&self, name: &str, text: &str) -> Option<Decimal>;
}

/// Extracts lengths, lane counts and power output from `number unit` pairs.
///
/// Lengths are converted to feet and power to megawatts. The first quantity
/// whose unit converts wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementExtractor;

impl MeasurementExtractor {
    pub fn new() -> Self {
        Self
    }

    fn target_unit(name: &str) -> Option<&'static str> {
        match name {
            LENGTH => Some(FEET),
            LANES => Some(units::LANES),
            POWER_GENERATED => Some(MEGAWATTS),
            _ => None,
        }
    }
}

impl DescriptionExtractor for MeasurementExtractor {
    fn get_param(&self, name: &str, text: &str) -> Option<Decimal> {
        let target = Self::target_unit(name)?;
        units::find_quantities(text)
            .into_iter()
            .find_map(|(value, unit)| units::convert_units(value, unit, target))
    }
}
