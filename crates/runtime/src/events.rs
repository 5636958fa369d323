use game_model::InvestmentType;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::SubmitOutcome;

/// Journal entry for one engine transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    StartRequested {
        rounds: usize,
    },
    GameStarted {
        rounds: usize,
        events_loaded: usize,
    },
    StartFailed {
        message: String,
    },
    PositionOpened {
        turn: String,
        investment_type: InvestmentType,
        amount: Decimal,
        ticks: u32,
    },
    SubmissionRejected {
        outcome: SubmitOutcome,
    },
    TurnAdvanced {
        turn: String,
        cursor: usize,
    },
    PositionsMatured {
        turn: String,
        count: usize,
        settlement: Decimal,
    },
    BalanceRecorded {
        turn: String,
        balance: Decimal,
    },
    GameFinalized {
        balance: Decimal,
        cashed_out: usize,
    },
}

impl RuntimeEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StartRequested { .. } => "start_requested",
            Self::GameStarted { .. } => "game_started",
            Self::StartFailed { .. } => "start_failed",
            Self::PositionOpened { .. } => "position_opened",
            Self::SubmissionRejected { .. } => "submission_rejected",
            Self::TurnAdvanced { .. } => "turn_advanced",
            Self::PositionsMatured { .. } => "positions_matured",
            Self::BalanceRecorded { .. } => "balance_recorded",
            Self::GameFinalized { .. } => "game_finalized",
        }
    }
}
