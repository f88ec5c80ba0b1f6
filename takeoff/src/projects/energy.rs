use super::{ENERGY_TYPE, POWER_GENERATED};
use crate::project::ProjectDeclaration;
use crate::sector::Sector;
use crate::units::MEGAWATTS;

/// Power generation facility; nothing is derived
pub fn declaration() -> ProjectDeclaration {
    ProjectDeclaration::new(Sector::Energy)
        .require(POWER_GENERATED, MEGAWATTS)
        .require(ENERGY_TYPE, ENERGY_TYPE)
        .fact(POWER_GENERATED, 100)
        .fact(ENERGY_TYPE, "solar")
}
