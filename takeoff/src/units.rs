//! Unit labels, conversion constants and quantity parsing
//!
//! Length quantities are normalized to feet and power quantities to
//! megawatts, the units the project declarations are written in.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

pub const FEET: &str = "feet";
pub const SQUARE_FEET: &str = "square_feet";
pub const TONS: &str = "tons";
pub const GALLONS: &str = "gallons";
pub const MEGAWATTS: &str = "megawatts";
pub const LANES: &str = "lanes";
pub const METERS: &str = "meters";
pub const MILES: &str = "miles";
pub const KILOMETERS: &str = "kilometers";
pub const KILOWATTS: &str = "kilowatts";

pub const FT_PER_YARD: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
pub const FT_PER_METER: Decimal = Decimal::from_parts(3281, 0, 0, false, 3);
pub const FT_PER_MILE: Decimal = Decimal::from_parts(5280, 0, 0, false, 0);
pub const METER_PER_KILOMETER: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
pub const KILOWATT_PER_MEGAWATT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
pub const POUNDS_PER_TON: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);
pub const KG_PER_POUND: Decimal = Decimal::from_parts(453592, 0, 0, false, 6);
pub const KG_PER_TONNE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
pub const CONCRETE_POUNDS_PER_CUBIC_FOOT: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Map a unit spelling to its canonical label, or `None` if unknown
pub fn canonical_unit(unit: &str) -> Option<&'static str> {
    let unit = unit.trim().to_lowercase();
    let canonical = match unit.as_str() {
        "ft" | "foot" | "feet" => FEET,
        "m" | "meter" | "meters" | "metre" | "metres" => METERS,
        "mi" | "mile" | "miles" => MILES,
        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => KILOMETERS,
        "mw" | "megawatt" | "megawatts" => MEGAWATTS,
        "kw" | "kilowatt" | "kilowatts" => KILOWATTS,
        "lane" | "lanes" => LANES,
        "ton" | "tons" => TONS,
        "gal" | "gallon" | "gallons" => GALLONS,
        "sqft" | "square_feet" => SQUARE_FEET,
        _ => return None,
    };
    Some(canonical)
}

/// Convert `value` between two units.
///
/// Identical units always convert. Otherwise only length to feet and power
/// to megawatts are supported.
pub fn convert_units(value: Decimal, from: &str, to: &str) -> Option<Decimal> {
    let from = canonical_unit(from)?;
    let to = canonical_unit(to)?;
    if from == to {
        return Some(value);
    }
    match (from, to) {
        (METERS, FEET) => value.checked_mul(FT_PER_METER),
        (MILES, FEET) => value.checked_mul(FT_PER_MILE),
        (KILOMETERS, FEET) => value
            .checked_mul(METER_PER_KILOMETER)?
            .checked_mul(FT_PER_METER),
        (KILOWATTS, MEGAWATTS) => value.checked_div(KILOWATT_PER_MEGAWATT),
        _ => None,
    }
}

fn quantity_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(\d[\d,_]*(?:\.\d+)?)\s*-?\s*([a-z]+)").ok())
        .as_ref()
}

/// Every `number unit` pair in `text` whose unit is recognised, in order.
///
/// Numbers may use `,` or `_` as thousands separators; units are returned in
/// canonical form.
pub fn find_quantities(text: &str) -> Vec<(Decimal, &'static str)> {
    let Some(pattern) = quantity_pattern() else {
        return Vec::new();
    };
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str().replace([',', '_'], "");
            let unit = canonical_unit(caps.get(2)?.as_str())?;
            let value = Decimal::from_str(&number).ok()?;
            Some((value, unit))
        })
        .collect()
}

/// Parse a single quantity such as `"7 mile"` or `"250kW"`
pub fn parse_quantity(text: &str) -> Option<(Decimal, &'static str)> {
    find_quantities(text).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(canonical_unit("Ft"), Some(FEET));
        assert_eq!(canonical_unit("kilometres"), Some(KILOMETERS));
        assert_eq!(canonical_unit("kw"), Some(KILOWATTS));
        assert_eq!(canonical_unit("furlong"), None);
    }

    #[test]
    fn test_quantity_with_separator() {
        assert_eq!(
            parse_quantity("a 1,200 foot span"),
            Some((Decimal::from(1200), FEET))
        );
        assert_eq!(
            parse_quantity("250kW array"),
            Some((Decimal::from(250), KILOWATTS))
        );
    }
}
