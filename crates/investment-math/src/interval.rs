use game_model::{MarketEvent, TimeInterval};
use rust_decimal::Decimal;

pub fn percentage_for_interval(interval: TimeInterval, event: &MarketEvent) -> Decimal {
    match interval {
        TimeInterval::ThreeMonths => event.percent_3months,
        TimeInterval::SixMonths => event.percent_6months,
        TimeInterval::OneYear => event.percent_1year,
        TimeInterval::FiveYears => event.percent_5years,
        TimeInterval::Unset => Decimal::ZERO,
    }
}
