use std::str::FromStr;

use game_model::InvestmentType;
use rust_decimal::Decimal;

/// Parses form text into an amount. Plain and scientific notation are accepted;
/// anything that is not a finite number is `None`.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    // `Decimal` tolerates `_` digit separators; form input does not.
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub fn is_valid_amount(raw: &str, balance: Decimal, investment_type: InvestmentType) -> bool {
    if investment_type.is_skip() {
        return true;
    }

    parse_amount(raw).is_some_and(|amount| amount > Decimal::ZERO && amount <= balance)
}
