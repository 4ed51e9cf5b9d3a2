//! Deterministic session engine
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Host-driven integer millisecond clock only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio output or platform dependencies

pub mod attr;
pub mod feedback;
pub mod schedule;
pub mod score;
pub mod session;
pub mod state;
pub mod tick;

pub use attr::{Attribute, Attributes, Category, Color, Fill, Picture, Sense, Shape};
pub use feedback::{FeedbackChannel, FeedbackEvent, FeedbackKind};
pub use schedule::{Fired, Scheduler, TimerId, TimerKind};
pub use score::{Outcome, ScoreState, ScoringPolicy, Verdict};
pub use session::{RunContext, Rules, Session, SessionConfig};
pub use state::{
    Board, Entity, EntityId, FinishReason, RngState, RunId, SessionEvent, SessionPhase, Snapshot,
    Summary,
};
