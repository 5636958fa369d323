pub mod engine;
pub mod event_source;
pub mod events;
pub mod history_csv;
pub mod logging;
pub mod snapshot;

pub use engine::{GameEngine, GamePhase, PendingForm, StartTicket, SubmitOutcome};
pub use event_source::{EventSource, EventSourceError, HttpEventSource, StaticEventSource};
pub use events::RuntimeEvent;
pub use snapshot::GameSnapshot;
