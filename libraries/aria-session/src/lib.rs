//! Aria Session
//!
//! Control-path orchestration for the player. The session owns all mutable
//! state (queue engine, favorites, the live library snapshot) on a single
//! path; scans, waveform decodes and cover analysis run as background tasks
//! that post tagged [`TaskResult`]s back over a channel. Results whose tag
//! no longer matches the live target are discarded, which is the whole
//! cancellation story: last load wins.

mod analyzer;
mod error;
mod session;
mod settings;
mod tasks;

pub use analyzer::{AnalyzerJob, AnalyzerQueue, CoverAnalyzer};
pub use error::{Result, SessionError};
pub use session::{PlayerSession, PositionTicker};
pub use settings::SettingsStore;
pub use tasks::{spawn_scan, spawn_waveform, TaskResult};
