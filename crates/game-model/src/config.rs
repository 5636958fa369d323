use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const STARTING_BALANCE: Decimal = dec!(10000);

/// Real months represented by one engine turn.
pub const MONTH_COEFFICIENT: u32 = 3;

/// Reference line the balance chart is shaded against.
pub const BALANCE_THRESHOLD: Decimal = dec!(10000);

pub const DEFAULT_ROUNDS: usize = 5;

pub const ROUND_OPTIONS: [usize; 4] = [3, 5, 10, 20];

/// Lifetime in ticks given to a Skip, or to any position opened without an interval.
pub const NOMINAL_TICKS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub starting_balance: Decimal,
    pub balance_threshold: Decimal,
    pub default_rounds: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            balance_threshold: BALANCE_THRESHOLD,
            default_rounds: DEFAULT_ROUNDS,
        }
    }
}
