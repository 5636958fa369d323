mod calendar;
mod config;
mod event;
mod history;
mod interval;
mod investment;

pub use calendar::Calendar;
pub use config::{
    GameConfig, BALANCE_THRESHOLD, DEFAULT_ROUNDS, MONTH_COEFFICIENT, NOMINAL_TICKS,
    ROUND_OPTIONS, STARTING_BALANCE,
};
pub use event::MarketEvent;
pub use history::{BalanceHistory, HistoryEntry};
pub use interval::{ParseIntervalError, TimeInterval};
pub use investment::{Investment, InvestmentType, ParseInvestmentTypeError};
