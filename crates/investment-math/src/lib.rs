pub mod format;
pub mod gain;
pub mod interval;
pub mod summary;
pub mod validation;

pub use format::{format_currency, format_gain, format_holding_length, format_percentage};
pub use gain::{gain, opening_cash_flow, round_cents, settle_all, settlement_contribution};
pub use interval::percentage_for_interval;
pub use summary::{threshold_offset, GameSummary};
pub use validation::{is_valid_amount, parse_amount};
