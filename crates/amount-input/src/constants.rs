/// Fraction digits used until a currency is configured.
pub const DEFAULT_FRACTION_DIGITS: u32 = 2;

/// Largest scale a `Decimal` can carry.
pub const MAX_FRACTION_DIGITS: u32 = 28;

/// Current schema version of the persisted control state.
pub const PERSISTED_STATE_VERSION: u32 = 1;
