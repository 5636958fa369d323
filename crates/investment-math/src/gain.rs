use game_model::{Investment, InvestmentType};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Profit or loss of a position, in cents. A Short profits when the event's return is
/// negative. `None` when the product does not fit in a `Decimal`.
pub fn gain(position: &Investment) -> Option<Decimal> {
    if position.investment_type.is_skip() {
        return Some(Decimal::ZERO);
    }
    let rounded = round_cents(
        position
            .investment_amount
            .checked_mul(position.percent_change)?,
    );

    match position.investment_type {
        InvestmentType::Short => Some(-rounded),
        _ => Some(rounded),
    }
}

/// Cash that moves when a position is opened.
pub fn opening_cash_flow(position: &Investment) -> Decimal {
    match position.investment_type {
        InvestmentType::Invest => -position.investment_amount,
        InvestmentType::Short => position.investment_amount,
        InvestmentType::Skip => Decimal::ZERO,
    }
}

/// Cash that moves when a position is closed, whether it matured or was cashed out.
pub fn settlement_contribution(position: &Investment) -> Option<Decimal> {
    match position.investment_type {
        InvestmentType::Skip => Some(Decimal::ZERO),
        InvestmentType::Short => (-position.investment_amount).checked_add(gain(position)?),
        InvestmentType::Invest => position.investment_amount.checked_add(gain(position)?),
    }
}

/// Total settlement of a batch, or `None` on overflow.
pub fn settle_all<'a, I>(positions: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Investment>,
{
    positions
        .into_iter()
        .try_fold(Decimal::ZERO, |total, position| {
            total.checked_add(settlement_contribution(position)?)
        })
}
