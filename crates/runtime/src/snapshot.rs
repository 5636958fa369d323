use game_model::{BalanceHistory, Investment, InvestmentType, MarketEvent, TimeInterval};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{GameEngine, GamePhase};

/// Read-only view of the engine handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub events: Vec<MarketEvent>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_event: Option<MarketEvent>,
    pub is_game_over: bool,
    pub investment_amount: String,
    pub selected_interval: TimeInterval,
    pub selected_type: Option<InvestmentType>,
    pub can_submit: bool,
    pub current_year: u32,
    pub current_quarter: u8,
    pub balance: Decimal,
    pub balance_history: BalanceHistory,
    pub completed_investments: Vec<Investment>,
    pub recently_completed_investments: Vec<Investment>,
    pub live_investments: Vec<Investment>,
    pub finalized: bool,
    pub rounds_to_play: usize,
}

impl From<&GameEngine> for GameSnapshot {
    fn from(engine: &GameEngine) -> Self {
        let form = engine.form();
        let calendar = engine.calendar();

        Self {
            phase: engine.phase(),
            events: engine.events().to_vec(),
            loading: engine.is_loading(),
            error: engine.error().map(str::to_owned),
            current_event: engine.current_event().cloned(),
            is_game_over: engine.is_game_over(),
            investment_amount: form.investment_amount.clone(),
            selected_interval: form.selected_interval,
            selected_type: form.selected_type,
            can_submit: engine.can_submit(),
            current_year: calendar.year(),
            current_quarter: calendar.quarter(),
            balance: engine.balance(),
            balance_history: engine.history().clone(),
            completed_investments: engine.completed_investments().to_vec(),
            recently_completed_investments: engine.recently_completed_investments().to_vec(),
            live_investments: engine.live_investments().to_vec(),
            finalized: engine.is_finalized(),
            rounds_to_play: engine.rounds_to_play(),
        }
    }
}

impl GameEngine {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}
