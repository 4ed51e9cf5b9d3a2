//! Focus Frenzy
//!
//! Three targets are always on screen; clicking one scores a point and a new
//! target appears somewhere else. Clicks that miss every target cost nothing.

use glam::Vec2;
use rand::Rng;

use crate::generate::scatter;
use crate::sim::{
    Attribute, Attributes, Color, EntityId, Outcome, RunContext, Rules, ScoringPolicy,
    SessionConfig,
};

pub const ROUND_SECS: u32 = 60;
pub const TARGETS: usize = 3;
/// Points per level
pub const LEVEL_EVERY: u32 = 5;

#[derive(Debug, Clone, Default)]
pub struct FocusFrenzy;

impl FocusFrenzy {
    pub fn new() -> Self {
        Self
    }

    fn refill(ctx: &mut RunContext<'_>) {
        while ctx.board().live_count() < TARGETS {
            let pos = scatter(10.0, 90.0, ctx.rng());
            let color = Color::ALL[ctx.rng().random_range(0..Color::ALL.len())];
            ctx.spawn(pos, Vec2::ZERO, Attributes::new().with(Attribute::Color(color)));
        }
    }
}

impl Rules for FocusFrenzy {
    type Action = EntityId;

    fn name(&self) -> &'static str {
        "focus_frenzy"
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::timed(ROUND_SECS).with_scoring(ScoringPolicy::default())
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        Self::refill(ctx);
    }

    fn evaluate(&mut self, target: &EntityId, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        ctx.board().get(*target).filter(|t| !t.consumed)?;
        ctx.consume(*target);
        ctx.despawn(*target);
        Self::refill(ctx);

        let points = ctx.score().score + 1;
        let outcome = Outcome::correct(format!("+1 ({})", points));
        if points % LEVEL_EVERY == 0 {
            Some(outcome.with_level_up())
        } else {
            Some(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Session, SessionPhase, Verdict};

    #[test]
    fn test_always_three_targets() {
        let mut session = Session::new(FocusFrenzy::new(), 12);
        let run = session.start();
        assert_eq!(session.board().live_count(), TARGETS);
        for _ in 0..7 {
            let target = session.board().live().next().unwrap().id;
            assert_eq!(session.act(run, &target), Some(Verdict::Correct));
            assert_eq!(session.board().live_count(), TARGETS);
            assert!(session.board().get(target).is_none());
        }
        assert_eq!(session.score().score, 7);
        assert_eq!(session.score().level, 2);
    }

    #[test]
    fn test_missed_click_is_free() {
        let mut session = Session::new(FocusFrenzy::new(), 12);
        let run = session.start();
        assert_eq!(session.act(run, &EntityId(9999)), None);
        assert_eq!(session.score().accuracy, 100);
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_runs_for_a_minute() {
        let mut session = Session::new(FocusFrenzy::new(), 1);
        session.start();
        session.advance(ROUND_SECS * 1000 - 1);
        assert_eq!(session.phase(), SessionPhase::Active);
        session.advance(1);
        assert_eq!(session.phase(), SessionPhase::Finished);
    }
}
