mod logging_surface;
mod run;
mod session_event;

pub use logging_surface::{LoggingMap, LoggingPage};
pub use run::{parse_layer_data, replay_events, run_replay, OfflineFeed, ReplaySummary};
pub use session_event::{SessionEvent, TimedEvent};
