use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub turn: String,
    pub balance: Decimal,
}

/// Balance samples keyed by turn label. A label is only ever recorded once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BalanceHistory {
    entries: Vec<HistoryEntry>,
}

impl BalanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(turn: impl Into<String>, balance: Decimal) -> Self {
        let mut history = Self::new();
        history.record(turn, balance);
        history
    }

    /// Returns `false` without touching the history when `turn` is already present.
    pub fn record(&mut self, turn: impl Into<String>, balance: Decimal) -> bool {
        let turn = turn.into();
        if self.contains(&turn) {
            return false;
        }
        self.entries.push(HistoryEntry { turn, balance });
        true
    }

    pub fn contains(&self, turn: &str) -> bool {
        self.entries.iter().any(|entry| entry.turn == turn)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
