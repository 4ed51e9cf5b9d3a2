//! Bubble Focus Pop
//!
//! Bubbles rise from the bottom of the play area. A rule names one attribute
//! ("only the red ones"); popping a matching bubble scores, popping a decoy costs
//! points and accuracy.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;

use crate::generate::rule::{MatchRule, bubble_attributes};
use crate::sim::{
    EntityId, FeedbackKind, FinishReason, Outcome, RunContext, Rules, ScoreState,
    ScoringPolicy, SessionConfig,
};

pub const ROUND_SECS: u32 = 30;
/// Spawn interval at difficulty 1; divided by the difficulty
pub const BASE_SPAWN_MS: u32 = 2000;
/// Bubbles enter just below the visible area
pub const SPAWN_Y: f32 = 110.0;

pub const SCORING: ScoringPolicy = ScoringPolicy {
    correct_reward: 10,
    miss_penalty: 5,
    accuracy_penalty: 5,
    time_penalty_secs: 0,
    terminal_on_miss: false,
};

#[derive(Debug, Clone, Default)]
pub struct BubblePop {
    rule: Option<MatchRule>,
    /// Use this rule every run instead of rolling one
    fixed_rule: Option<MatchRule>,
}

impl BubblePop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(rule: MatchRule) -> Self {
        Self {
            rule: None,
            fixed_rule: Some(rule),
        }
    }

    /// Rule of the current run
    pub fn rule(&self) -> Option<MatchRule> {
        self.rule
    }

    fn rise_speed(difficulty: u8) -> f32 {
        0.5 + difficulty as f32 * 0.1
    }

    fn target_chance(difficulty: u8) -> f64 {
        (0.4 + difficulty as f64 * 0.1).min(1.0)
    }
}

impl Rules for BubblePop {
    type Action = EntityId;

    fn name(&self) -> &'static str {
        "bubble_pop"
    }

    fn difficulty_range(&self) -> RangeInclusive<u8> {
        1..=5
    }

    fn config(&self, difficulty: u8) -> SessionConfig {
        SessionConfig::timed(ROUND_SECS)
            .with_spawn_interval(BASE_SPAWN_MS / difficulty.max(1) as u32)
            .with_scoring(SCORING)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        let rule = match self.fixed_rule {
            Some(rule) => rule,
            None => MatchRule::random(ctx.rng()),
        };
        self.rule = Some(rule);
        ctx.announce(FeedbackKind::Info, rule.description());
    }

    fn on_spawn_tick(&mut self, ctx: &mut RunContext<'_>) {
        let Some(rule) = self.rule else {
            return;
        };
        ctx.drift();

        let difficulty = ctx.difficulty();
        let is_target = ctx.rng().random_bool(Self::target_chance(difficulty));
        let x = ctx.rng().random_range(5.0..95.0);
        let attrs = bubble_attributes(&rule, is_target, ctx.rng());
        let id = ctx.spawn(
            Vec2::new(x, SPAWN_Y),
            Vec2::new(0.0, -Self::rise_speed(difficulty)),
            attrs,
        );
        log::debug!("bubble {} spawned (target: {})", id, is_target);
    }

    fn evaluate(&mut self, action: &EntityId, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        let rule = self.rule?;
        let bubble = ctx.board().get(*action).filter(|b| !b.consumed)?;
        let hit = rule.matches(&bubble.attrs);
        ctx.consume(*action);

        Some(if hit {
            Outcome::correct("Great focus!")
        } else {
            Outcome::incorrect("Oops! That one doesn't match.")
        })
    }

    fn adapt_difficulty(&self, difficulty: u8, score: &ScoreState, _reason: FinishReason) -> u8 {
        if score.accuracy > 90 && score.score > 50 {
            difficulty.saturating_add(1)
        } else if score.accuracy < 70 || score.score < 20 {
            difficulty.saturating_sub(1)
        } else {
            difficulty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Color, Session, SessionPhase, Verdict};

    fn find_live(session: &Session<BubblePop>, want_match: bool) -> Option<EntityId> {
        let rule = session.rules().rule()?;
        session
            .board()
            .live()
            .find(|b| rule.matches(&b.attrs) == want_match)
            .map(|b| b.id)
    }

    fn advance_until(session: &mut Session<BubblePop>, want_match: bool) -> EntityId {
        for _ in 0..14 {
            if let Some(id) = find_live(session, want_match) {
                return id;
            }
            session.advance(BASE_SPAWN_MS);
        }
        panic!("no bubble with match={} spawned", want_match);
    }

    #[test]
    fn test_red_rule_pop_scores_without_accuracy_loss() {
        let mut session = Session::new(BubblePop::with_rule(MatchRule::Color(Color::Red)), 11);
        let run = session.start();
        let red = advance_until(&mut session, true);
        assert_eq!(session.board().get(red).and_then(|b| b.attrs.color()), Some(Color::Red));

        assert_eq!(session.act(run, &red), Some(Verdict::Correct));
        assert_eq!(session.score().score, 10);
        assert_eq!(session.score().accuracy, 100);
        assert!(session.board().get(red).is_none_or(|b| b.consumed));
    }

    #[test]
    fn test_decoy_costs_points_and_accuracy() {
        let mut session = Session::new(BubblePop::with_rule(MatchRule::Color(Color::Red)), 5);
        let run = session.start();
        let red = advance_until(&mut session, true);
        session.act(run, &red);
        let decoy = advance_until(&mut session, false);

        assert_eq!(session.act(run, &decoy), Some(Verdict::Incorrect));
        assert_eq!(session.score().score, 5);
        assert_eq!(session.score().accuracy, 95);
    }

    #[test]
    fn test_popped_bubble_cannot_score_twice() {
        let mut session = Session::new(BubblePop::with_rule(MatchRule::Color(Color::Red)), 3);
        let run = session.start();
        let red = advance_until(&mut session, true);
        session.act(run, &red);
        assert_eq!(session.act(run, &red), None);
        assert_eq!(session.score().score, 10);
    }

    #[test]
    fn test_spawn_interval_scales_with_difficulty() {
        let game = BubblePop::new();
        assert_eq!(game.config(1).spawn_interval_ms, Some(2000));
        assert_eq!(game.config(4).spawn_interval_ms, Some(500));
        assert_eq!(game.config(5).duration_secs, Some(ROUND_SECS));
    }

    #[test]
    fn test_bubbles_rise_from_the_bottom() {
        let mut session = Session::new(BubblePop::new(), 9).with_difficulty(3);
        session.start();
        session.advance(BASE_SPAWN_MS / 3);
        let first = session.board().entities()[0].clone();
        assert_eq!(first.pos.y, SPAWN_Y);
        assert!((first.vel.y + 0.8).abs() < 1e-6);

        session.advance(BASE_SPAWN_MS / 3);
        let moved = session.board().get(first.id).unwrap();
        assert!(moved.pos.y < SPAWN_Y);
    }

    #[test]
    fn test_adaptive_difficulty() {
        let game = BubblePop::new();
        let strong = ScoreState {
            score: 60,
            accuracy: 95,
            ..Default::default()
        };
        let weak = ScoreState {
            score: 10,
            accuracy: 100,
            ..Default::default()
        };
        let middling = ScoreState {
            score: 30,
            accuracy: 80,
            ..Default::default()
        };
        assert_eq!(game.adapt_difficulty(2, &strong, FinishReason::TimeUp), 3);
        assert_eq!(game.adapt_difficulty(2, &weak, FinishReason::TimeUp), 1);
        assert_eq!(game.adapt_difficulty(2, &middling, FinishReason::TimeUp), 2);
    }

    #[test]
    fn test_next_run_uses_adapted_difficulty() {
        let mut session = Session::new(BubblePop::new(), 1).with_difficulty(3);
        session.start();
        session.advance(ROUND_SECS * 1000);
        assert_eq!(session.phase(), SessionPhase::Finished);
        // no pops: score 0 < 20
        assert_eq!(session.next_difficulty(), 2);
        session.start();
        assert_eq!(session.difficulty(), 2);
    }
}
