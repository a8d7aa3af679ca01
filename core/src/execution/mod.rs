//! Recorded run history and playback

pub mod history;

pub use self::history::{FlowHistory, FlowSnapshot, HistoryError, StepCursor};
