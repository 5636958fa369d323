use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One market scenario with its forward returns at the four holding horizons.
///
/// Returns are fractions: `0.10` is a 10% rise, `-0.2` a 20% fall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    #[serde(default)]
    pub event_type: String,
    pub description: String,
    pub percent_3months: Decimal,
    pub percent_6months: Decimal,
    pub percent_1year: Decimal,
    pub percent_5years: Decimal,
}

impl MarketEvent {
    pub fn new(
        description: impl Into<String>,
        percent_3months: Decimal,
        percent_6months: Decimal,
        percent_1year: Decimal,
        percent_5years: Decimal,
    ) -> Self {
        Self {
            event_type: String::new(),
            description: description.into(),
            percent_3months,
            percent_6months,
            percent_1year,
            percent_5years,
        }
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }
}
