use super::{LENGTH, TONS_BALLAST, TONS_CONCRETE, TONS_STEEL, TONS_TIMBER};
use crate::project::ProjectDeclaration;
use crate::sector::Sector;
use crate::units::{FEET, FT_PER_METER, FT_PER_MILE, FT_PER_YARD, KG_PER_POUND, POUNDS_PER_TON, TONS};
use rust_decimal::Decimal;

/// Standard gauge double-rail track on concrete crossties.
///
/// Rail weighs about 50 kg/m, crossties are laid at 2640 per mile, and the
/// bed uses second class ballast at 41.5 lb/yd. Timber is estimated for the
/// same crosstie count at 250 lb each.
pub fn declaration() -> ProjectDeclaration {
    ProjectDeclaration::new(Sector::Railways)
        .require(LENGTH, FEET)
        .calculate(TONS_STEEL, TONS)
        .calculate(TONS_CONCRETE, TONS)
        .calculate(TONS_BALLAST, TONS)
        .calculate(TONS_TIMBER, TONS)
        .fact(LENGTH, 1000)
        .fact("track_weight", 50)
        .fact("concrete_weight_for_per_crosstie", 600)
        .fact("wood_weight_for_crosstie", 250)
        .fact("crosstie_per_mile", 2640)
        .fact("ballast_pound_per_yard", Decimal::new(415, 1))
        .fact("ft_per_meter", FT_PER_METER)
        .fact("ft_per_mile", FT_PER_MILE)
        .fact("kg_per_pound", KG_PER_POUND)
        .fact("ft_per_yard", FT_PER_YARD)
        .fact("pounds_per_ton", POUNDS_PER_TON)
        .rule("track_length = length * 2")
        .rule("kg_per_foot_steel = track_weight / ft_per_meter")
        .rule("pound_per_foot_steel = kg_per_foot_steel / kg_per_pound")
        .rule("tons_per_foot_steel = pound_per_foot_steel / pounds_per_ton")
        .rule("tons_steel = tons_per_foot_steel * track_length")
        .rule("length_in_miles = length / ft_per_mile")
        .rule("number_of_crosstie = length_in_miles * crosstie_per_mile")
        .rule("concrete_weight = number_of_crosstie * concrete_weight_for_per_crosstie")
        .rule("track_length_yard = track_length / ft_per_yard")
        .rule("ballast_pounds = track_length_yard * ballast_pound_per_yard")
        .rule("ballast_ton = ballast_pounds / pounds_per_ton")
        .rule("tons_concrete = concrete_weight / pounds_per_ton")
        .rule("tons_ballast = ballast_ton")
        .rule("tons_timber = number_of_crosstie * wood_weight_for_crosstie / pounds_per_ton")
}
