use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MONTH_COEFFICIENT;

/// Holding period chosen for a position.
///
/// The label is what the player sees; the tick count is how many engine turns the
/// position stays open. One tick stands for [`MONTH_COEFFICIENT`] months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInterval {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "3 months")]
    ThreeMonths,
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "5 years")]
    FiveYears,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time interval: {0:?}")]
pub struct ParseIntervalError(pub String);

impl TimeInterval {
    pub const CHOICES: [TimeInterval; 4] = [
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
    ];

    pub fn ticks(self) -> u32 {
        match self {
            Self::Unset => 0,
            Self::ThreeMonths => 1,
            Self::SixMonths => 2,
            Self::OneYear => 4,
            Self::FiveYears => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::ThreeMonths => "3 months",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
            Self::FiveYears => "5 years",
        }
    }

    pub fn is_set(self) -> bool {
        self != Self::Unset
    }

    pub fn display_months(self) -> u32 {
        self.ticks() * MONTH_COEFFICIENT
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeInterval {
    type Err = ParseIntervalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Ok(Self::Unset),
            "3 months" => Ok(Self::ThreeMonths),
            "6 months" => Ok(Self::SixMonths),
            "1 year" => Ok(Self::OneYear),
            "5 years" => Ok(Self::FiveYears),
            other => Err(ParseIntervalError(other.to_string())),
        }
    }
}
