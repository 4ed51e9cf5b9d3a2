//! Focus Flow
//!
//! A single target of random size jumps around the play area. Every click on it
//! scores and records how long the player took to react.

use glam::Vec2;
use rand::Rng;

use crate::generate::scatter;
use crate::sim::{Attribute, Attributes, Color, EntityId, Outcome, RunContext, Rules, SessionConfig};

pub const ROUND_SECS: u32 = 30;
pub const MIN_TARGET_SIZE: f32 = 30.0;
pub const MAX_TARGET_SIZE: f32 = 60.0;

#[derive(Debug, Clone, Default)]
pub struct FocusFlow {
    target: Option<EntityId>,
    target_size: f32,
    shown_at_ms: u64,
    reaction_times: Vec<u64>,
}

impl FocusFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Diameter of the current target, in pixels at the reference play-area size
    pub fn target_size(&self) -> f32 {
        self.target_size
    }

    pub fn reaction_times(&self) -> &[u64] {
        &self.reaction_times
    }

    /// Rounded mean reaction time of this run
    pub fn average_reaction_ms(&self) -> Option<u64> {
        if self.reaction_times.is_empty() {
            return None;
        }
        let total: u64 = self.reaction_times.iter().sum();
        let n = self.reaction_times.len() as u64;
        Some((total + n / 2) / n)
    }

    fn show_target(&mut self, ctx: &mut RunContext<'_>) {
        let pos = scatter(10.0, 90.0, ctx.rng());
        self.target_size = ctx.rng().random_range(MIN_TARGET_SIZE..MAX_TARGET_SIZE);
        self.shown_at_ms = ctx.now_ms();
        let id = ctx.spawn(pos, Vec2::ZERO, Attributes::new().with(Attribute::Color(Color::Blue)));
        self.target = Some(id);
    }
}

impl Rules for FocusFlow {
    type Action = EntityId;

    fn name(&self) -> &'static str {
        "focus_flow"
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::timed(ROUND_SECS)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.reaction_times.clear();
        self.show_target(ctx);
    }

    fn evaluate(&mut self, target: &EntityId, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        if self.target != Some(*target) {
            return None;
        }
        ctx.consume(*target);
        ctx.despawn(*target);

        let reaction = ctx.now_ms().saturating_sub(self.shown_at_ms);
        self.reaction_times.push(reaction);
        self.show_target(ctx);
        Some(Outcome::correct(format!("{} ms", reaction)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Session, SessionPhase, Verdict};

    fn click(session: &mut Session<FocusFlow>) -> Option<Verdict> {
        let run = session.run();
        let target = session.rules().target().unwrap();
        session.act(run, &target)
    }

    #[test]
    fn test_one_target_of_bounded_size() {
        let mut session = Session::new(FocusFlow::new(), 1);
        session.start();
        assert_eq!(session.board().live_count(), 1);
        let size = session.rules().target_size();
        assert!((MIN_TARGET_SIZE..MAX_TARGET_SIZE).contains(&size));
    }

    #[test]
    fn test_click_records_reaction_and_moves_target() {
        let mut session = Session::new(FocusFlow::new(), 2);
        session.start();
        let first = session.rules().target().unwrap();

        session.advance(400);
        assert_eq!(click(&mut session), Some(Verdict::Correct));
        assert_eq!(session.feedback().unwrap().message, "400 ms");
        assert!(session.board().get(first).is_none());
        assert_ne!(session.rules().target(), Some(first));
        assert_eq!(session.board().live_count(), 1);

        session.advance(250);
        click(&mut session);
        assert_eq!(session.rules().reaction_times(), &[400, 250]);
        assert_eq!(session.rules().average_reaction_ms(), Some(325));
        assert_eq!(session.score().score, 2);
    }

    #[test]
    fn test_old_target_is_ignored() {
        let mut session = Session::new(FocusFlow::new(), 3);
        let run = session.start();
        let first = session.rules().target().unwrap();
        click(&mut session);
        assert_eq!(session.act(run, &first), None);
        assert_eq!(session.score().score, 1);
    }

    #[test]
    fn test_round_lasts_thirty_seconds_and_restart_resets_times() {
        let mut session = Session::new(FocusFlow::new(), 4);
        session.start();
        click(&mut session);
        session.advance(ROUND_SECS * 1000);
        assert_eq!(session.phase(), SessionPhase::Finished);

        session.start();
        assert!(session.rules().reaction_times().is_empty());
        assert_eq!(session.rules().average_reaction_ms(), None);
    }
}
