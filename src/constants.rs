/// Minor units per major currency unit (cents per dollar, etc.).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest amount accepted on any single expense, in minor units.
pub const MAX_AMOUNT_MINOR: i64 = 100_000_000;

pub const MAX_DESCRIPTION_LEN: usize = 255;
pub const MAX_NAME_LEN: usize = 100;

pub const DEFAULT_CURRENCY: &str = "USD";
