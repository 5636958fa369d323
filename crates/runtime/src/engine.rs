use game_model::{
    BalanceHistory, Calendar, GameConfig, Investment, InvestmentType, MarketEvent, TimeInterval,
};
use investment_math::{
    opening_cash_flow, parse_amount, percentage_for_interval, settle_all, GameSummary,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    event_source::{EventSource, EventSourceError},
    events::RuntimeEvent,
    logging::RunLogWriter,
};

pub const NO_EVENTS_MESSAGE: &str = "No events were returned from the server";
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to load events";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Loading,
    Error,
    InProgress,
    GameOver,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Accepted,
    /// Amount, interval or type missing on a non-Skip submission.
    RejectedIncomplete,
    /// Amount unparsable, not positive, or above the balance.
    RejectedInvalidAmount,
    /// No game in progress, or no current event.
    NotAccepting,
}

impl SubmitOutcome {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Handle for one `start` request. Only the most recently issued ticket can
/// complete; results for older tickets are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PendingForm {
    pub investment_amount: String,
    pub selected_interval: TimeInterval,
    pub selected_type: Option<InvestmentType>,
}

struct TurnCash {
    opened_balance: Decimal,
    settlement: Decimal,
    settled_balance: Decimal,
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    events: Vec<MarketEvent>,
    loading: bool,
    error: Option<String>,
    rounds_to_play: usize,
    cursor: usize,
    calendar: Calendar,
    balance: Decimal,
    history: BalanceHistory,
    live: Vec<Investment>,
    completed: Vec<Investment>,
    recently_completed: Vec<Investment>,
    form: PendingForm,
    finalized: bool,
    latest_ticket: u64,
    journal: Vec<RuntimeEvent>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            loading: false,
            error: None,
            rounds_to_play: config.default_rounds,
            cursor: 0,
            calendar: Calendar::default(),
            balance: config.starting_balance,
            history: BalanceHistory::starting_at(
                Calendar::default().turn_label(),
                config.starting_balance,
            ),
            live: Vec::new(),
            completed: Vec::new(),
            recently_completed: Vec::new(),
            form: PendingForm::default(),
            finalized: false,
            latest_ticket: 0,
            journal: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        if self.loading {
            GamePhase::Loading
        } else if self.error.is_some() {
            GamePhase::Error
        } else if self.events.is_empty() {
            GamePhase::NotStarted
        } else if self.finalized {
            GamePhase::Finalized
        } else if self.is_game_over() {
            GamePhase::GameOver
        } else {
            GamePhase::InProgress
        }
    }

    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_event(&self) -> Option<&MarketEvent> {
        self.events.get(self.cursor)
    }

    pub fn is_game_over(&self) -> bool {
        self.cursor >= self.events.len()
    }

    pub fn rounds_to_play(&self) -> usize {
        self.rounds_to_play
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &BalanceHistory {
        &self.history
    }

    pub fn live_investments(&self) -> &[Investment] {
        &self.live
    }

    pub fn completed_investments(&self) -> &[Investment] {
        &self.completed
    }

    pub fn recently_completed_investments(&self) -> &[Investment] {
        &self.recently_completed
    }

    pub fn form(&self) -> &PendingForm {
        &self.form
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Whether `submit` would accept the pending form right now.
    pub fn can_submit(&self) -> bool {
        self.phase() == GamePhase::InProgress && self.validated_amount().is_ok()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_positions(
            self.config.starting_balance,
            self.balance,
            &self.completed,
            &self.live,
        )
    }

    pub fn set_investment_amount(&mut self, amount: impl Into<String>) {
        if !self.finalized {
            self.form.investment_amount = amount.into();
        }
    }

    pub fn set_selected_interval(&mut self, interval: TimeInterval) {
        if !self.finalized {
            self.form.selected_interval = interval;
        }
    }

    pub fn set_selected_type(&mut self, investment_type: Option<InvestmentType>) {
        if !self.finalized {
            self.form.selected_type = investment_type;
        }
    }

    /// Enters the loading phase and wipes the previous game. The returned ticket must
    /// be handed to [`GameEngine::complete_start`] with the fetch result.
    pub fn begin_start(&mut self, rounds: usize) -> StartTicket {
        self.reset_game(Vec::new());
        self.rounds_to_play = rounds;
        self.loading = true;
        self.error = None;
        self.latest_ticket += 1;
        self.journal.push(RuntimeEvent::StartRequested { rounds });

        StartTicket(self.latest_ticket)
    }

    /// Applies a fetch result. Returns `false` when the ticket has been superseded by a
    /// later `begin_start` or already completed, in which case nothing changes.
    pub fn complete_start(
        &mut self,
        ticket: StartTicket,
        result: Result<Vec<MarketEvent>, EventSourceError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket || !self.loading {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "dropping stale event fetch"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(events) if events.is_empty() => self.fail_start(NO_EVENTS_MESSAGE.to_string()),
            Ok(events) => {
                let events_loaded = events.len();
                self.reset_game(events);
                tracing::info!(
                    rounds = self.rounds_to_play,
                    events_loaded,
                    "game started"
                );
                self.journal.push(RuntimeEvent::GameStarted {
                    rounds: self.rounds_to_play,
                    events_loaded,
                });
            }
            Err(err) => {
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    FETCH_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                };
                self.fail_start(message);
            }
        }

        true
    }

    pub async fn start(&mut self, source: &dyn EventSource, rounds: usize) {
        let ticket = self.begin_start(rounds);
        let result = source.fetch_events(rounds).await;
        self.complete_start(ticket, result);
    }

    pub async fn retry(&mut self, source: &dyn EventSource) {
        self.start(source, self.rounds_to_play).await;
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.phase() != GamePhase::InProgress {
            return self.reject(SubmitOutcome::NotAccepting);
        }
        let Some(event) = self.current_event() else {
            return self.reject(SubmitOutcome::NotAccepting);
        };
        let amount = match self.validated_amount() {
            Ok(amount) => amount,
            Err(outcome) => return self.reject(outcome),
        };

        let interval = self.form.selected_interval;
        let position = match self.form.selected_type {
            Some(investment_type @ (InvestmentType::Invest | InvestmentType::Short)) => {
                Investment::open(
                    event.description.clone(),
                    investment_type,
                    amount,
                    interval,
                    percentage_for_interval(interval, event),
                )
            }
            Some(InvestmentType::Skip) | None => Investment::skip(event.description.clone()),
        };

        let Some(cash) = self.project_turn(&position) else {
            tracing::warn!(
                turn = %self.calendar,
                amount = %position.investment_amount,
                "submission would overflow the balance"
            );
            return self.reject(SubmitOutcome::RejectedInvalidAmount);
        };

        self.balance = cash.opened_balance;
        self.journal.push(RuntimeEvent::PositionOpened {
            turn: self.calendar.turn_label(),
            investment_type: position.investment_type,
            amount: position.investment_amount,
            ticks: position.time_interval,
        });
        tracing::debug!(
            turn = %self.calendar,
            investment_type = %position.investment_type,
            amount = %position.investment_amount,
            ticks = position.time_interval,
            "position opened"
        );
        self.live.push(position);
        self.form = PendingForm::default();

        self.advance_turn();
        self.mature_positions(&cash);
        self.record_balance();

        SubmitOutcome::Accepted
    }

    /// Cashes out every live position at its frozen return and locks the game.
    /// Cashed-out positions stay in the live collection.
    pub fn finalize(&mut self) -> bool {
        if self.finalized || self.events.is_empty() || self.loading {
            return false;
        }

        let Some(balance) = settle_all(&self.live)
            .and_then(|settlement| self.balance.checked_add(settlement))
        else {
            tracing::warn!(balance = %self.balance, "cash-out would overflow the balance");
            return false;
        };
        self.balance = balance;
        self.record_balance();
        self.finalized = true;

        tracing::info!(
            balance = %self.balance,
            cashed_out = self.live.len(),
            "game finalized"
        );
        self.journal.push(RuntimeEvent::GameFinalized {
            balance: self.balance,
            cashed_out: self.live.len(),
        });

        true
    }

    pub fn drain_events(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.journal)
    }

    pub fn drain_events_into(&mut self, writer: &mut dyn RunLogWriter) {
        for event in self.journal.drain(..) {
            writer.write(event);
        }
    }

    fn validated_amount(&self) -> Result<Decimal, SubmitOutcome> {
        if self.form.selected_type == Some(InvestmentType::Skip) {
            return Ok(Decimal::ZERO);
        }
        if self.form.investment_amount.is_empty()
            || !self.form.selected_interval.is_set()
            || self.form.selected_type.is_none()
        {
            return Err(SubmitOutcome::RejectedIncomplete);
        }

        match parse_amount(&self.form.investment_amount) {
            Some(amount) if amount > Decimal::ZERO && amount <= self.balance => Ok(amount),
            _ => Err(SubmitOutcome::RejectedInvalidAmount),
        }
    }

    fn reject(&mut self, outcome: SubmitOutcome) -> SubmitOutcome {
        tracing::debug!(?outcome, "submission rejected");
        self.journal.push(RuntimeEvent::SubmissionRejected { outcome });
        outcome
    }

    fn advance_turn(&mut self) {
        self.cursor += 1;
        self.calendar.advance();
        self.journal.push(RuntimeEvent::TurnAdvanced {
            turn: self.calendar.turn_label(),
            cursor: self.cursor,
        });
    }

    /// Checks every balance change `position` would cause this turn, including a later
    /// cash-out of what stays live, so the turn can be applied without overflow.
    fn project_turn(&self, position: &Investment) -> Option<TurnCash> {
        let opened_balance = self.balance.checked_add(opening_cash_flow(position))?;
        let (maturing, remaining): (Vec<&Investment>, Vec<&Investment>) = self
            .live
            .iter()
            .chain(std::iter::once(position))
            .partition(|candidate| candidate.time_remaining <= 1);
        let settlement = settle_all(maturing)?;
        let settled_balance = opened_balance.checked_add(settlement)?;
        settled_balance.checked_add(settle_all(remaining)?)?;

        Some(TurnCash {
            opened_balance,
            settlement,
            settled_balance,
        })
    }

    fn mature_positions(&mut self, cash: &TurnCash) {
        for position in &mut self.live {
            position.elapse_tick();
        }

        let (matured, live): (Vec<Investment>, Vec<Investment>) = std::mem::take(&mut self.live)
            .into_iter()
            .partition(Investment::is_matured);
        self.live = live;

        if matured.is_empty() {
            return;
        }

        self.balance = cash.settled_balance;
        self.journal.push(RuntimeEvent::PositionsMatured {
            turn: self.calendar.turn_label(),
            count: matured.len(),
            settlement: cash.settlement,
        });
        self.completed.extend(matured.iter().cloned());
        self.recently_completed = matured;
    }

    fn record_balance(&mut self) {
        let turn = self.calendar.turn_label();
        if self.history.record(turn.clone(), self.balance) {
            self.journal.push(RuntimeEvent::BalanceRecorded {
                turn,
                balance: self.balance,
            });
        }
    }

    fn fail_start(&mut self, message: String) {
        tracing::warn!(%message, rounds = self.rounds_to_play, "game failed to start");
        self.journal.push(RuntimeEvent::StartFailed {
            message: message.clone(),
        });
        self.error = Some(message);
    }

    fn reset_game(&mut self, events: Vec<MarketEvent>) {
        self.events = events;
        self.error = None;
        self.cursor = 0;
        self.calendar = Calendar::default();
        self.balance = self.config.starting_balance;
        self.history =
            BalanceHistory::starting_at(self.calendar.turn_label(), self.config.starting_balance);
        self.live.clear();
        self.completed.clear();
        self.recently_completed.clear();
        self.form = PendingForm::default();
        self.finalized = false;
    }
}
