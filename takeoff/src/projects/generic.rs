use super::{GALLONS_DIESEL, TONS_CONCRETE};
use crate::project::ProjectDeclaration;
use crate::sector::Sector;
use crate::units::{GALLONS, TONS};

/// Catch-all project described directly by its material quantities
pub fn declaration() -> ProjectDeclaration {
    ProjectDeclaration::new(Sector::Other)
        .require(GALLONS_DIESEL, GALLONS)
        .require(TONS_CONCRETE, TONS)
        .fact(GALLONS_DIESEL, 1000)
        .fact(TONS_CONCRETE, 100)
}
