use rust_decimal::Decimal;

/// Number of payment periods the nominal annual rate is divided into (biweekly cycle).
pub const PERIODS_PER_YEAR: u32 = 24;

const PERCENT: u32 = 100;

/// `100 × PERIODS_PER_YEAR`: turns a percentage annual rate into a per-period fraction
/// with a single division.
pub const PERIODIC_RATE_DIVISOR: Decimal =
    Decimal::from_parts(PERCENT * PERIODS_PER_YEAR, 0, 0, false, 0);

/// Decimal places used when rounding money for display or persistence.
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Default payment frequency descriptor for new loans.
pub const DEFAULT_PAYMENT_FREQUENCY: &str = "15 dias";

/// Default arrears condition descriptor for new loans.
pub const DEFAULT_ARREARS_CONDITIONS: &str = "Default mora conditions";

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
