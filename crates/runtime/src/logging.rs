use crate::events::RuntimeEvent;

pub trait RunLogWriter {
    fn write(&mut self, event: RuntimeEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RuntimeEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RuntimeEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.iter().map(RuntimeEvent::kind).collect()
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RuntimeEvent) {
        self.events.push(event);
    }
}

/// Forwards journal entries to `tracing` under the `game_journal` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRunLogWriter;

impl RunLogWriter for TracingRunLogWriter {
    fn write(&mut self, event: RuntimeEvent) {
        match &event {
            RuntimeEvent::StartFailed { message } => {
                tracing::warn!(target: "game_journal", kind = event.kind(), %message);
            }
            RuntimeEvent::GameStarted { .. } | RuntimeEvent::GameFinalized { .. } => {
                tracing::info!(target: "game_journal", kind = event.kind(), ?event);
            }
            _ => {
                tracing::debug!(target: "game_journal", kind = event.kind(), ?event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRunLogWriter, RunLogWriter};
    use crate::events::RuntimeEvent;

    #[test]
    fn in_memory_writer_keeps_insertion_order() {
        let mut writer = InMemoryRunLogWriter::new();

        writer.write(RuntimeEvent::StartRequested { rounds: 3 });
        writer.write(RuntimeEvent::StartFailed {
            message: "boom".to_string(),
        });

        assert_eq!(writer.kinds(), vec!["start_requested", "start_failed"]);
    }
}
