use game_model::{Investment, MONTH_COEFFICIENT};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::gain::{gain, round_cents};

pub fn format_currency(value: Decimal) -> String {
    let rounded = round_cents(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}${:.2}", rounded.abs())
}

pub fn format_percentage(value: Decimal) -> String {
    let whole = (value * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    format!("{whole}%")
}

pub fn format_holding_length(ticks: u32) -> String {
    let months = ticks * MONTH_COEFFICIENT;
    let unit = if months == 1 { "month" } else { "months" };

    format!("{months} {unit}")
}

pub fn format_gain(position: &Investment) -> Option<String> {
    gain(position).map(format_currency)
}
