//! Built-in project declarations
//!
//! Each submodule exposes a `declaration()` constructor that the registry
//! stores by project type.

pub mod bridge;
pub mod energy;
pub mod generic;
pub mod railway;
pub mod road;

// Required parameters
pub const LENGTH: &str = "length";
pub const LANES: &str = "lanes";
pub const SURFACE_TYPE: &str = "surface_type";
pub const POWER_GENERATED: &str = "power_generated";
pub const ENERGY_TYPE: &str = "energy_type";

// Calculated parameters
pub const WIDTH: &str = "width";
pub const SURFACE_AREA: &str = "surface_area";
pub const TONS_CONCRETE: &str = "tons_concrete";
pub const TONS_BALLAST: &str = "tons_ballast";
pub const TONS_STEEL: &str = "tons_steel";
pub const TONS_TIMBER: &str = "tons_timber";
pub const TONS_ASPHALT: &str = "tons_asphalt";
pub const GALLONS_DIESEL: &str = "gallons_diesel";
