use std::{path::PathBuf, sync::Arc};

use game_model::{InvestmentType, ParseInvestmentTypeError, TimeInterval};
use runtime::{
    history_csv::HistoryCsvWriter,
    logging::{RunLogWriter, TracingRunLogWriter},
    EventSource, GameEngine, GameSnapshot, RuntimeEvent, SubmitOutcome,
};
use serde::Deserialize;
use tokio::sync::{broadcast, Mutex};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StartGameError {
    InvalidRoundCount,
}

/// Partial update of the pending form. Absent fields are left alone; an empty
/// `selected_type` clears the type.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FormUpdate {
    pub investment_amount: Option<String>,
    pub selected_interval: Option<TimeInterval>,
    pub selected_type: Option<String>,
}

impl FormUpdate {
    fn apply(self, engine: &mut GameEngine) -> Result<(), ParseInvestmentTypeError> {
        let selected_type = match self.selected_type.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(raw) => Some(Some(raw.parse::<InvestmentType>()?)),
        };

        if let Some(amount) = self.investment_amount {
            engine.set_investment_amount(amount);
        }
        if let Some(interval) = self.selected_interval {
            engine.set_selected_interval(interval);
        }
        if let Some(investment_type) = selected_type {
            engine.set_selected_type(investment_type);
        }
        Ok(())
    }
}

/// Broadcasts drained journal entries and mirrors them into `tracing`.
struct EventPublisher<'a> {
    events_tx: &'a broadcast::Sender<RuntimeEvent>,
    tracing: TracingRunLogWriter,
}

impl RunLogWriter for EventPublisher<'_> {
    fn write(&mut self, event: RuntimeEvent) {
        self.tracing.write(event.clone());
        // No subscribers is not an error.
        let _ = self.events_tx.send(event);
    }
}

#[derive(Clone)]
pub struct AppState {
    engine: Arc<Mutex<GameEngine>>,
    source: Arc<dyn EventSource>,
    events_tx: broadcast::Sender<RuntimeEvent>,
    history_output: Option<PathBuf>,
}

impl AppState {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self::with_engine(source, GameEngine::default())
    }

    pub fn with_engine(source: Arc<dyn EventSource>, engine: GameEngine) -> Self {
        let (events_tx, _) = broadcast::channel(256);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            source,
            events_tx,
            history_output: None,
        }
    }

    pub fn with_history_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_output = Some(path.into());
        self
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.events_tx.subscribe()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.engine.lock().await.snapshot()
    }

    /// The engine lock is released while the event source is being queried, so a
    /// later start can supersede this one.
    pub async fn start_game(&self, rounds: usize) -> Result<GameSnapshot, StartGameError> {
        if rounds == 0 {
            return Err(StartGameError::InvalidRoundCount);
        }

        let ticket = {
            let mut engine = self.engine.lock().await;
            let ticket = engine.begin_start(rounds);
            self.publish(&mut engine);
            ticket
        };

        let result = self.source.fetch_events(rounds).await;

        let mut engine = self.engine.lock().await;
        engine.complete_start(ticket, result);
        self.publish(&mut engine);
        Ok(engine.snapshot())
    }

    pub async fn retry(&self) -> Result<GameSnapshot, StartGameError> {
        let rounds = self.engine.lock().await.rounds_to_play();
        self.start_game(rounds).await
    }

    pub async fn update_form(
        &self,
        update: FormUpdate,
    ) -> Result<GameSnapshot, ParseInvestmentTypeError> {
        let mut engine = self.engine.lock().await;
        update.apply(&mut engine)?;
        Ok(engine.snapshot())
    }

    pub async fn submit(&self) -> (SubmitOutcome, GameSnapshot) {
        let mut engine = self.engine.lock().await;
        let outcome = engine.submit();
        self.publish(&mut engine);
        (outcome, engine.snapshot())
    }

    pub async fn finalize(&self) -> GameSnapshot {
        let (snapshot, export) = {
            let mut engine = self.engine.lock().await;
            let transitioned = engine.finalize();
            self.publish(&mut engine);
            let export = match (&self.history_output, transitioned) {
                (Some(path), true) => Some((path.clone(), history_csv(&engine))),
                _ => None,
            };
            (engine.snapshot(), export)
        };

        if let Some((path, csv)) = export {
            match tokio::fs::write(&path, csv).await {
                Ok(()) => tracing::info!(path = %path.display(), "balance history written"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "failed to write balance history")
                }
            }
        }

        snapshot
    }

    pub async fn summary(&self) -> (investment_math::GameSummary, rust_decimal::Decimal) {
        let engine = self.engine.lock().await;
        let offset = investment_math::threshold_offset(
            engine.history().entries(),
            engine.config().balance_threshold,
        );
        (engine.summary(), offset)
    }

    pub async fn history_csv(&self) -> String {
        history_csv(&*self.engine.lock().await)
    }

    fn publish(&self, engine: &mut GameEngine) {
        let mut publisher = EventPublisher {
            events_tx: &self.events_tx,
            tracing: TracingRunLogWriter,
        };
        engine.drain_events_into(&mut publisher);
    }
}

fn history_csv(engine: &GameEngine) -> String {
    let mut writer = HistoryCsvWriter::new(Vec::new());
    // Writing into a Vec cannot fail.
    let _ = writer.write_history(engine.history());
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}
