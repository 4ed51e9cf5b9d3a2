//! Math Galaxy Rescue
//!
//! Aliens float in the play area, each holding an arithmetic problem. Answering a
//! problem correctly rescues the alien; a wrong answer costs time but the alien
//! stays for another try. Rescue enough aliens before the clock runs out to clear
//! the level.

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::generate::{Operation, Problem, scatter};
use crate::sim::{
    Attribute, Attributes, EntityId, FeedbackKind, FinishReason, Outcome, RunContext, Rules,
    ScoreState, ScoringPolicy, SessionConfig,
};

/// Extra aliens spawned beyond the number needed
pub const SPARE_ALIENS: u32 = 2;
/// Seconds lost per wrong answer
pub const WRONG_ANSWER_SECS: u32 = 5;

pub const SCORING: ScoringPolicy = ScoringPolicy {
    correct_reward: 1,
    miss_penalty: 0,
    accuracy_penalty: 0,
    time_penalty_secs: WRONG_ANSWER_SECS,
    terminal_on_miss: false,
};

/// One row of the level table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathLevel {
    pub id: u8,
    pub op: Operation,
    /// Operand magnitude, 1..=3
    pub tier: u8,
    pub time_limit_secs: u32,
    pub aliens_needed: u32,
}

impl MathLevel {
    /// Levels cycle through the four operations, raising the tier every full cycle
    pub fn for_difficulty(difficulty: u8) -> Self {
        let idx = difficulty.max(1) - 1;
        let op = Operation::ALL[idx as usize % Operation::ALL.len()];
        let tier = idx / Operation::ALL.len() as u8 + 1;
        let (time_limit_secs, base_needed) = match op {
            Operation::Addition | Operation::Subtraction => (120, 5),
            Operation::Multiplication | Operation::Division => (150, 6),
        };
        Self {
            id: difficulty,
            op,
            tier,
            time_limit_secs,
            aliens_needed: base_needed + (tier as u32 - 1),
        }
    }

    pub fn option_count(&self) -> usize {
        3 + self.tier as usize
    }
}

/// Pick `value` for the problem carried by `alien`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub alien: EntityId,
    pub value: i64,
}

#[derive(Debug, Clone, Default)]
pub struct MathRescue {
    /// Operands used, in order, for the first aliens of every run
    preset: Vec<(i64, i64)>,
}

impl MathRescue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigned problems come first; the rest of the board is generated
    pub fn with_preset(preset: &[(i64, i64)]) -> Self {
        Self {
            preset: preset.to_vec(),
        }
    }

    fn problem(&self, index: usize, level: &MathLevel, ctx: &mut RunContext<'_>) -> Problem {
        match self.preset.get(index) {
            Some(&(lhs, rhs)) => {
                let answer = match level.op {
                    Operation::Addition => lhs + rhs,
                    Operation::Subtraction => lhs - rhs,
                    Operation::Multiplication => lhs * rhs,
                    Operation::Division if rhs != 0 => lhs / rhs,
                    Operation::Division => 0,
                };
                Problem::with_operands(lhs, rhs, level.op, answer, level.option_count(), ctx.rng())
            }
            None => Problem::generate(level.op, level.tier, level.option_count(), ctx.rng()),
        }
    }
}

impl Rules for MathRescue {
    type Action = Answer;

    fn name(&self) -> &'static str {
        "math_rescue"
    }

    fn difficulty_range(&self) -> RangeInclusive<u8> {
        1..=12
    }

    fn config(&self, difficulty: u8) -> SessionConfig {
        let level = MathLevel::for_difficulty(difficulty);
        SessionConfig::timed(level.time_limit_secs)
            .with_goal(level.aliens_needed)
            .with_scoring(SCORING)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        let level = MathLevel::for_difficulty(ctx.difficulty());
        for i in 0..(level.aliens_needed + SPARE_ALIENS) as usize {
            let problem = self.problem(i, &level, ctx);
            let pos = scatter(10.0, 90.0, ctx.rng());
            ctx.spawn(pos, Vec2::ZERO, Attributes::new().with(Attribute::Numeric(problem)));
        }
        ctx.announce(
            FeedbackKind::Info,
            format!("Rescue {} aliens!", level.aliens_needed),
        );
    }

    fn evaluate(&mut self, action: &Answer, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        let alien = ctx.board().get(action.alien).filter(|a| !a.consumed)?;
        let problem = alien.attrs.problem()?;
        if !problem.options.contains(&action.value) {
            return None;
        }

        if problem.is_correct(action.value) {
            ctx.consume(action.alien);
            let level = MathLevel::for_difficulty(ctx.difficulty());
            let outcome = Outcome::correct("Alien rescued!");
            if ctx.score().correct + 1 >= level.aliens_needed {
                Some(outcome.with_level_up())
            } else {
                Some(outcome)
            }
        } else {
            Some(Outcome::incorrect(format!(
                "Not quite! Try again (-{}s)",
                WRONG_ANSWER_SECS
            )))
        }
    }

    fn adapt_difficulty(&self, difficulty: u8, _score: &ScoreState, reason: FinishReason) -> u8 {
        match reason {
            FinishReason::GoalReached => difficulty.saturating_add(1),
            _ => difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Session, SessionEvent, SessionPhase, Verdict};
    use proptest::prelude::*;

    fn first_alien(session: &Session<MathRescue>) -> (EntityId, Problem) {
        let alien = session.board().live().next().unwrap();
        (alien.id, alien.attrs.problem().unwrap().clone())
    }

    #[test]
    fn test_level_table() {
        let first = MathLevel::for_difficulty(1);
        assert_eq!(first.op, Operation::Addition);
        assert_eq!((first.tier, first.time_limit_secs, first.aliens_needed), (1, 120, 5));

        let mul = MathLevel::for_difficulty(3);
        assert_eq!(mul.op, Operation::Multiplication);
        assert_eq!((mul.tier, mul.time_limit_secs, mul.aliens_needed), (1, 150, 6));

        let hard = MathLevel::for_difficulty(9);
        assert_eq!(hard.op, Operation::Addition);
        assert_eq!((hard.tier, hard.aliens_needed, hard.option_count()), (3, 7, 6));
    }

    #[test]
    fn test_preset_three_plus_four_rescue() {
        let mut session = Session::new(MathRescue::with_preset(&[(3, 4)]), 21);
        let run = session.start();
        assert_eq!(session.board().live_count(), 7);

        let (alien, problem) = first_alien(&session);
        assert_eq!(problem.text(), "3 + 4");
        assert_eq!(problem.options.len(), 4);
        assert!(problem.options.contains(&7));
        let mut unique = problem.options.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 4);

        assert_eq!(session.act(run, &Answer { alien, value: 7 }), Some(Verdict::Correct));
        assert!(session.board().get(alien).unwrap().consumed);
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn test_wrong_answer_costs_five_seconds_and_allows_retry() {
        let mut session = Session::new(MathRescue::with_preset(&[(3, 4)]), 8);
        let run = session.start();
        session.advance(10_000);
        assert_eq!(session.remaining_secs(), Some(110));

        let (alien, problem) = first_alien(&session);
        let wrong = *problem.options.iter().find(|v| **v != problem.answer).unwrap();
        assert_eq!(session.act(run, &Answer { alien, value: wrong }), Some(Verdict::Incorrect));
        assert_eq!(session.remaining_secs(), Some(105));
        assert!(!session.board().get(alien).unwrap().consumed);

        assert_eq!(session.act(run, &Answer { alien, value: 7 }), Some(Verdict::Correct));
    }

    #[test]
    fn test_value_not_offered_is_ignored() {
        let mut session = Session::new(MathRescue::new(), 2);
        let run = session.start();
        let (alien, problem) = first_alien(&session);
        let absent = problem.options.iter().max().unwrap() + 100;
        assert_eq!(session.act(run, &Answer { alien, value: absent }), None);
        assert_eq!(session.remaining_secs(), Some(120));
    }

    #[test]
    fn test_goal_finishes_and_advances_level() {
        let mut session = Session::new(MathRescue::new(), 4);
        let run = session.start();
        for _ in 0..5 {
            let (alien, problem) = first_alien(&session);
            session.act(run, &Answer { alien, value: problem.answer });
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        let summary = session.last_summary().unwrap();
        assert_eq!(summary.reason, FinishReason::GoalReached);
        assert_eq!(summary.score.level, 2);
        assert_eq!(session.next_difficulty(), 2);
        assert_eq!(session.board().live_count(), 2);

        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::LevelChanged { level: 2 }));
        assert_eq!(session.live_timers(), 0);
    }

    proptest! {
        #[test]
        fn prop_every_alien_has_one_correct_option(seed in any::<u64>(), difficulty in 1u8..=12) {
            let mut session = Session::new(MathRescue::new(), seed).with_difficulty(difficulty);
            session.start();
            let level = MathLevel::for_difficulty(difficulty);
            for alien in session.board().live() {
                let problem = alien.attrs.problem().unwrap();
                prop_assert_eq!(problem.options.len(), level.option_count());
                prop_assert_eq!(problem.options.iter().filter(|v| **v == problem.answer).count(), 1);
                prop_assert_eq!(problem.op, level.op);
            }
        }
    }
}
