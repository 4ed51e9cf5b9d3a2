//! Focus Forest
//!
//! A quiet focus timer. The player picks a session length; five trees grow as the
//! session runs. If the player goes quiet for half a minute a gentle nudge
//! suggests a break. When the time is up the forest is grown and the run completes.

use glam::Vec2;

use crate::audio::SoundCue;
use crate::generate::scatter;
use crate::sim::{Attributes, Board, FeedbackKind, Outcome, RunContext, Rules, ScoreState, SessionConfig};

pub const TREES: usize = 5;
/// Session length per difficulty step
pub const MINUTES_PER_STEP: u32 = 5;
/// Seconds without activity before a nudge, repeated while idle
pub const IDLE_WARNING_SECS: u32 = 30;
pub const PULSE_MS: u32 = 1000;

pub const IDLE_MESSAGE: &str = "I notice you've been inactive. Would you like to take a break?";

/// Mouse, key or click activity reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity;

#[derive(Debug, Clone, Default)]
pub struct FocusForest {
    length_secs: u32,
    focused_secs: u32,
    idle_secs: u32,
    warnings: u32,
    done: bool,
}

impl FocusForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session minutes at a difficulty (5, 10, .. 25)
    pub fn minutes(difficulty: u8) -> u32 {
        difficulty.clamp(1, 5) as u32 * MINUTES_PER_STEP
    }

    pub fn secs_left(&self) -> u32 {
        self.length_secs.saturating_sub(self.focused_secs)
    }

    /// Tree growth in percent
    pub fn growth(&self) -> f32 {
        if self.length_secs == 0 {
            return 0.0;
        }
        (self.focused_secs as f32 / self.length_secs as f32 * 100.0).min(100.0)
    }

    /// The idle nudge is showing
    pub fn is_idle(&self) -> bool {
        self.idle_secs >= IDLE_WARNING_SECS
    }

    pub fn warnings(&self) -> u32 {
        self.warnings
    }
}

impl Rules for FocusForest {
    /// Activity never scores; it only resets the idle timer
    type Action = Activity;

    fn name(&self) -> &'static str {
        "focus_forest"
    }

    /// Difficulty picks the session length
    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=5
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed().with_spawn_interval(PULSE_MS)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.length_secs = Self::minutes(ctx.difficulty()) * 60;
        self.focused_secs = 0;
        self.idle_secs = 0;
        self.warnings = 0;
        self.done = false;
        for _ in 0..TREES {
            let pos = scatter(10.0, 90.0, ctx.rng());
            ctx.spawn(pos, Vec2::ZERO, Attributes::new());
        }
        ctx.announce(
            FeedbackKind::Info,
            format!("Focus for {} minutes", self.length_secs / 60),
        );
    }

    fn on_spawn_tick(&mut self, ctx: &mut RunContext<'_>) {
        self.focused_secs += 1;
        if self.focused_secs >= self.length_secs {
            self.done = true;
            ctx.announce(FeedbackKind::Correct, "Your forest is grown. Time for a break!");
            return;
        }

        self.idle_secs += 1;
        if self.idle_secs % IDLE_WARNING_SECS == 0 {
            self.warnings += 1;
            log::debug!("focus_forest: idle for {}s", self.idle_secs);
            ctx.announce(FeedbackKind::Encourage, IDLE_MESSAGE);
            ctx.cue(SoundCue::TimeWarning);
        }
    }

    fn evaluate(&mut self, _activity: &Activity, _ctx: &mut RunContext<'_>) -> Option<Outcome> {
        self.idle_secs = 0;
        None
    }

    fn is_complete(&self, _board: &Board, _score: &ScoreState) -> bool {
        self.done
    }
}
