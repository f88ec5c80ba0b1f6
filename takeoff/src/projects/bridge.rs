use super::{LANES, LENGTH, SURFACE_AREA, TONS_CONCRETE, TONS_STEEL, WIDTH};
use crate::project::ProjectDeclaration;
use crate::sector::Sector;
use crate::units::{self, CONCRETE_POUNDS_PER_CUBIC_FOOT, FEET, POUNDS_PER_TON, SQUARE_FEET, TONS};
use rust_decimal::Decimal;

/// A typical highway bridge: 1000 feet, four 24-foot lanes, 18-inch deck
pub fn declaration() -> ProjectDeclaration {
    ProjectDeclaration::new(Sector::Bridges)
        .require(LENGTH, FEET)
        .require(LANES, units::LANES)
        .calculate(WIDTH, FEET)
        .calculate(SURFACE_AREA, SQUARE_FEET)
        .calculate(TONS_CONCRETE, TONS)
        .calculate(TONS_STEEL, TONS)
        .fact(LENGTH, 1000)
        .fact(LANES, 4)
        .fact("bridge_thickness", Decimal::new(15, 1))
        .fact("bridge_lane_width", 24)
        .fact("concrete_weight", CONCRETE_POUNDS_PER_CUBIC_FOOT)
        .fact("pounds_per_ton", POUNDS_PER_TON)
        .fact("tons_per_foot_steel", 123)
        .rule("width = lanes * bridge_lane_width")
        .rule("surface_area = length * width")
        .rule("volume = surface_area * bridge_thickness")
        .rule("pounds_concrete = volume * concrete_weight")
        .rule("tons_concrete = pounds_concrete / pounds_per_ton")
        .rule("tons_steel = tons_per_foot_steel * length")
}
