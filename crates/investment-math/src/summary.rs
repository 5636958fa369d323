use game_model::{HistoryEntry, Investment, InvestmentType};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub final_balance: Decimal,
    pub net_change: Decimal,
    pub total_decisions: usize,
    pub invested: usize,
    pub shorted: usize,
    pub skipped: usize,
}

impl GameSummary {
    /// Counts every decision, whether it matured naturally or was still open at the end.
    pub fn from_positions(
        starting_balance: Decimal,
        final_balance: Decimal,
        completed: &[Investment],
        live: &[Investment],
    ) -> Self {
        let count = |investment_type: InvestmentType| {
            completed
                .iter()
                .chain(live)
                .filter(|position| position.investment_type == investment_type)
                .count()
        };

        Self {
            final_balance,
            net_change: final_balance.saturating_sub(starting_balance),
            total_decisions: completed.len() + live.len(),
            invested: count(InvestmentType::Invest),
            shorted: count(InvestmentType::Short),
            skipped: count(InvestmentType::Skip),
        }
    }
}

/// Fraction of the balance range, measured down from the maximum, at which the
/// chart's threshold line sits. 0 when every sample is at or below the threshold,
/// 1 when every sample is at or above it.
pub fn threshold_offset(history: &[HistoryEntry], threshold: Decimal) -> Decimal {
    let mut balances = history.iter().map(|entry| entry.balance);
    let Some(first) = balances.next() else {
        return Decimal::ZERO;
    };
    let (min, max) = balances.fold((first, first), |(min, max), balance| {
        (min.min(balance), max.max(balance))
    });

    if max <= threshold {
        return Decimal::ZERO;
    }
    if min >= threshold {
        return Decimal::ONE;
    }

    match (max.checked_sub(threshold), max.checked_sub(min)) {
        (Some(above), Some(range)) => above / range,
        // Quartered operands cannot overflow when subtracted.
        _ => {
            let quarter = |value: Decimal| value / Decimal::from(4);
            (quarter(max) - quarter(threshold)) / (quarter(max) - quarter(min))
        }
    }
}
