use super::{LANES, LENGTH, SURFACE_AREA, SURFACE_TYPE, TONS_ASPHALT, TONS_CONCRETE, WIDTH};
use crate::project::ProjectDeclaration;
use crate::sector::Sector;
use crate::units::{self, CONCRETE_POUNDS_PER_CUBIC_FOOT, FEET, FT_PER_MILE, POUNDS_PER_TON, SQUARE_FEET, TONS};
use rust_decimal::Decimal;

/// A typical two-lane road, twenty miles long with a 12-inch surface
pub fn declaration() -> ProjectDeclaration {
    ProjectDeclaration::new(Sector::Roads)
        .require(LENGTH, FEET)
        .require(LANES, units::LANES)
        .require(SURFACE_TYPE, SURFACE_TYPE)
        .calculate(WIDTH, FEET)
        .calculate(SURFACE_AREA, SQUARE_FEET)
        .calculate(TONS_CONCRETE, TONS)
        .calculate(TONS_ASPHALT, TONS)
        .fact(LENGTH, Decimal::from(20) * FT_PER_MILE)
        .fact(LANES, 2)
        .fact(SURFACE_TYPE, "asphalt")
        .fact("road_lane_width", 18)
        .fact("road_asphalt_thickness", 1)
        .fact("concrete_weight", CONCRETE_POUNDS_PER_CUBIC_FOOT)
        .fact("asphalt_weight", 123)
        .fact("pounds_per_ton", POUNDS_PER_TON)
        .rule("width = lanes * road_lane_width")
        .rule("surface_area = length * width")
        .rule("volume = surface_area * road_asphalt_thickness")
        .rule("pounds_concrete = volume * concrete_weight")
        .rule("pounds_asphalt = volume * asphalt_weight")
        .rule("tons_concrete = pounds_concrete / pounds_per_ton")
        .rule("tons_asphalt = pounds_asphalt / pounds_per_ton")
}
