use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::NOMINAL_TICKS, interval::TimeInterval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    Invest,
    Short,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown investment type: {0:?}")]
pub struct ParseInvestmentTypeError(pub String);

impl InvestmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invest => "Invest",
            Self::Short => "Short",
            Self::Skip => "Skip",
        }
    }

    pub fn is_skip(self) -> bool {
        self == Self::Skip
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = ParseInvestmentTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Invest" => Ok(Self::Invest),
            "Short" => Ok(Self::Short),
            "Skip" => Ok(Self::Skip),
            other => Err(ParseInvestmentTypeError(other.to_string())),
        }
    }
}

/// A player's position opened against one market event.
///
/// `percent_change` is sampled from the triggering event when the position opens
/// and never changes afterwards. `time_remaining` counts down one tick per turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub description: String,
    pub investment_amount: Decimal,
    pub time_interval: u32,
    pub time_remaining: u32,
    pub percent_change: Decimal,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
}

impl Investment {
    /// Opens a position. Skip positions carry no amount and no return, and like
    /// positions without an interval they live for [`NOMINAL_TICKS`].
    pub fn open(
        description: impl Into<String>,
        investment_type: InvestmentType,
        investment_amount: Decimal,
        interval: TimeInterval,
        percent_change: Decimal,
    ) -> Self {
        let ticks = if investment_type.is_skip() || !interval.is_set() {
            NOMINAL_TICKS
        } else {
            interval.ticks()
        };
        let (investment_amount, percent_change) = if investment_type.is_skip() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (investment_amount, percent_change)
        };

        Self {
            description: description.into(),
            investment_amount,
            time_interval: ticks,
            time_remaining: ticks,
            percent_change,
            investment_type,
        }
    }

    pub fn skip(description: impl Into<String>) -> Self {
        Self::open(
            description,
            InvestmentType::Skip,
            Decimal::ZERO,
            TimeInterval::Unset,
            Decimal::ZERO,
        )
    }

    pub fn elapse_tick(&mut self) {
        self.time_remaining = self.time_remaining.saturating_sub(1);
    }

    pub fn is_matured(&self) -> bool {
        self.time_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{Investment, InvestmentType};
    use crate::interval::TimeInterval;

    #[test]
    fn open_uses_interval_ticks_for_both_counters() {
        let position = Investment::open(
            "Rate cut",
            InvestmentType::Invest,
            dec!(250),
            TimeInterval::OneYear,
            dec!(0.12),
        );

        assert_eq!(position.time_interval, 4);
        assert_eq!(position.time_remaining, 4);
        assert_eq!(position.investment_amount, dec!(250));
        assert_eq!(position.percent_change, dec!(0.12));
    }

    #[test]
    fn skip_is_economically_inert_with_one_tick_of_life() {
        let position = Investment::open(
            "Rate cut",
            InvestmentType::Skip,
            dec!(250),
            TimeInterval::FiveYears,
            dec!(0.12),
        );

        assert_eq!(position.time_interval, 1);
        assert_eq!(position.time_remaining, 1);
        assert_eq!(position.investment_amount, Decimal::ZERO);
        assert_eq!(position.percent_change, Decimal::ZERO);
        assert_eq!(position, Investment::skip("Rate cut"));
    }

    #[test]
    fn elapse_tick_counts_down_to_maturity_and_stops() {
        let mut position = Investment::open(
            "Rate cut",
            InvestmentType::Short,
            dec!(100),
            TimeInterval::SixMonths,
            dec!(-0.1),
        );

        position.elapse_tick();
        assert!(!position.is_matured());
        position.elapse_tick();
        assert!(position.is_matured());
        position.elapse_tick();
        assert_eq!(position.time_remaining, 0);
    }

    #[test]
    fn serializes_type_field_under_wire_name() {
        let json = serde_json::to_value(Investment::skip("Quiet quarter")).unwrap();

        assert_eq!(json["type"], "Skip");
        assert_eq!(json["time_interval"], 1);
    }

    #[test]
    fn investment_type_parses_display_names() {
        assert_eq!("Short".parse::<InvestmentType>().unwrap(), InvestmentType::Short);
        assert!("Hold".parse::<InvestmentType>().is_err());
    }
}
