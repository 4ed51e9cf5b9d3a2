//! NeuroBridge Games - interaction sessions for the focus and calm-down mini-games
//!
//! Core modules:
//! - `sim`: Deterministic session engine (lifecycle, timers, scoring, feedback)
//! - `generate`: Rule, problem, deck and scenario generators
//! - `games`: The individual games, each a `sim::Rules` implementation
//! - `audio`: Sound cues and the owned playback handle
//! - `view`: Host-facing game view tying a session to audio and feedback observers
//! - `settings`: Player preferences (audio, accessibility, difficulty)

pub mod audio;
pub mod games;
pub mod generate;
pub mod settings;
pub mod sim;
pub mod view;

pub use games::GameKind;
pub use settings::{Settings, SettingsError};
pub use sim::{Rules, Session, SessionEvent, SessionPhase, Snapshot};
pub use view::GameView;

/// Engine constants
pub mod consts {
    /// Session clock interval (countdown / elapsed time resolution)
    pub const TICK_MS: u32 = 1000;

    /// How long a feedback message stays up
    pub const DEFAULT_FEEDBACK_MS: u32 = 1500;
    pub const MIN_FEEDBACK_MS: u32 = 1000;
    pub const MAX_FEEDBACK_MS: u32 = 2000;

    /// Play area bounds in percent, with a margin for entities entering from an edge
    pub const VIEW_MIN: f32 = -10.0;
    pub const VIEW_MAX: f32 = 110.0;
}
