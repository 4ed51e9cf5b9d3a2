//! Time advance
//!
//! The host feeds elapsed wall time; due timers are dispatched in order. Score is
//! never touched here, only the clock, spawns and game delays.

use super::schedule::{Fired, TimerKind};
use super::session::{Rules, Session};
use super::state::{FinishReason, SessionEvent, SessionPhase};
use crate::audio::SoundCue;

/// Seconds left at which the countdown starts warning
pub const COUNTDOWN_WARNING_SECS: u32 = 3;

impl<R: Rules> Session<R> {
    /// Advance the session clock by `dt_ms` and fire every timer that came due.
    /// Outside Active only feedback expiry runs.
    pub fn advance(&mut self, dt_ms: u32) {
        self.clock_ms += dt_ms as u64;

        if let Some(expired) = self.expire_feedback() {
            self.events.push(SessionEvent::FeedbackCleared { seq: expired });
        }

        while self.phase() == SessionPhase::Active {
            let Some(fired) = self.scheduler.pop_due(self.clock_ms) else {
                break;
            };
            self.dispatch(fired);
        }
    }

    fn dispatch(&mut self, fired: Fired) {
        match fired.kind {
            TimerKind::Countdown => self.on_clock(),
            TimerKind::Spawn => {
                let (rules, mut ctx) = self.split(fired.at_ms);
                rules.on_spawn_tick(&mut ctx);
                self.check_complete();
            }
            TimerKind::Delay(tag) => {
                let (rules, mut ctx) = self.split(fired.at_ms);
                rules.on_delay(tag, &mut ctx);
                self.check_complete();
            }
        }
    }

    fn on_clock(&mut self) {
        self.elapsed_secs += 1;
        let Some(remaining) = self.remaining_secs.as_mut() else {
            return;
        };
        *remaining = remaining.saturating_sub(1);
        let remaining = *remaining;
        self.events.push(SessionEvent::Countdown { remaining_secs: remaining });

        if remaining == 0 {
            self.finish(FinishReason::TimeUp);
        } else if remaining <= COUNTDOWN_WARNING_SECS {
            self.events.push(SessionEvent::Cue(SoundCue::TimeWarning));
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use crate::sim::attr::{Attribute, Attributes, Color};
    use crate::sim::score::{Outcome, ScoringPolicy, Verdict};
    use crate::sim::session::{RunContext, SessionConfig};
    use crate::sim::state::{EntityId, FinishReason, SessionEvent, SessionPhase};
    use crate::sim::{Rules, Session};

    /// Minimal game: one red target per spawn tick, red is correct
    #[derive(Debug, Default)]
    struct Tapper {
        setups: u32,
        duration: u32,
    }

    impl Rules for Tapper {
        type Action = EntityId;

        fn name(&self) -> &'static str {
            "tapper"
        }

        fn config(&self, _difficulty: u8) -> SessionConfig {
            SessionConfig::timed(self.duration.max(1))
                .with_spawn_interval(500)
                .with_scoring(ScoringPolicy {
                    correct_reward: 10,
                    miss_penalty: 5,
                    time_penalty_secs: 2,
                    ..Default::default()
                })
        }

        fn setup(&mut self, _ctx: &mut RunContext<'_>) {
            self.setups += 1;
        }

        fn on_spawn_tick(&mut self, ctx: &mut RunContext<'_>) {
            let color = if ctx.board().entities().len() % 2 == 0 { Color::Red } else { Color::Blue };
            ctx.spawn(
                Vec2::new(50.0, 50.0),
                Vec2::ZERO,
                Attributes::new().with(Attribute::Color(color)),
            );
        }

        fn evaluate(&mut self, id: &EntityId, ctx: &mut RunContext<'_>) -> Option<Outcome> {
            let color = ctx.board().get(*id).filter(|e| !e.consumed)?.attrs.color()?;
            ctx.consume(*id);
            if color == Color::Red {
                Some(Outcome::correct("Nice!"))
            } else {
                Some(Outcome::incorrect("Try again!"))
            }
        }
    }

    fn tapper(secs: u32) -> Session<Tapper> {
        Session::new(Tapper { setups: 0, duration: secs }, 9)
    }

    #[test]
    fn test_countdown_without_input_finishes_at_zero() {
        let mut s = tapper(30);
        s.start();
        for _ in 0..29 {
            s.advance(1000);
            assert_eq!(s.phase(), SessionPhase::Active);
        }
        s.advance(1000);
        assert_eq!(s.phase(), SessionPhase::Finished);
        assert_eq!(s.remaining_secs(), Some(0));
        assert_eq!(s.score().score, 0);
        assert_eq!(s.live_timers(), 0);
        assert_eq!(s.last_summary().map(|x| x.reason), Some(FinishReason::TimeUp));
    }

    #[test]
    fn test_single_large_step_finishes_once() {
        let mut s = tapper(5);
        s.start();
        s.drain_events();
        s.advance(60_000);
        let finishes = s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Finished(_)))
            .count();
        assert_eq!(finishes, 1);
        assert_eq!(s.elapsed_secs(), 5);
    }

    #[test]
    fn test_pause_stops_clock_and_rejects_input() {
        let mut s = tapper(10);
        let run = s.start();
        s.advance(500);
        let id = s.board().entities()[0].id;
        assert!(s.pause());
        assert_eq!(s.live_timers(), 0);
        s.advance(20_000);
        assert_eq!(s.remaining_secs(), Some(10));
        assert_eq!(s.act(run, &id), None);
        assert!(s.resume());
        s.advance(1000);
        assert_eq!(s.remaining_secs(), Some(9));
        assert_eq!(s.act(run, &id), Some(Verdict::Correct));
    }

    #[test]
    fn test_restart_clears_board_timers_and_score() {
        let mut s = tapper(10);
        let first = s.start();
        s.advance(1000);
        let id = s.board().entities()[0].id;
        s.act(first, &id);
        assert_eq!(s.score().score, 10);

        let second = s.start();
        assert_ne!(first, second);
        assert_eq!(s.score().score, 0);
        assert!(s.board().entities().is_empty());
        // countdown + spawn
        assert_eq!(s.live_timers(), 2);
        assert_eq!(s.rules().setups, 2);

        // actions tagged with the old run are ignored
        s.advance(500);
        let fresh = s.board().entities()[0].id;
        assert_eq!(s.act(first, &fresh), None);
        assert_eq!(s.act(second, &fresh), Some(Verdict::Correct));
    }

    #[test]
    fn test_consumed_target_is_ignored() {
        let mut s = tapper(10);
        let run = s.start();
        s.advance(500);
        let id = s.board().entities()[0].id;
        assert_eq!(s.act(run, &id), Some(Verdict::Correct));
        let before = *s.score();
        assert_eq!(s.act(run, &id), None);
        assert_eq!(*s.score(), before);
    }

    #[test]
    fn test_time_penalty_can_finish_run() {
        let mut s = tapper(2);
        let run = s.start();
        s.advance(1000);
        // second spawn is blue
        let blue = s.board().entities()[1].id;
        assert_eq!(s.act(run, &blue), Some(Verdict::Incorrect));
        assert_eq!(s.phase(), SessionPhase::Finished);
        assert_eq!(s.remaining_secs(), Some(0));
    }

    #[test]
    fn test_teardown_returns_to_idle() {
        let mut s = tapper(10);
        s.start();
        s.advance(1200);
        s.teardown();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.live_timers(), 0);
        assert!(s.board().entities().is_empty());
    }

    #[test]
    fn test_exactly_one_feedback_per_evaluated_action() {
        let mut s = tapper(10);
        let run = s.start();
        s.advance(1000);
        s.drain_events();
        let id = s.board().entities()[0].id;
        s.act(run, &id);
        s.act(run, &id);
        let feedback = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SessionEvent::Feedback(_)))
            .count();
        assert_eq!(feedback, 1);

        s.advance(1500);
        assert!(s.feedback().is_none());
    }

    #[test]
    fn test_feedback_lifetime_clamped_to_one_to_two_seconds() {
        let mut s = tapper(10).with_feedback_ms(50);
        let run = s.start();
        s.advance(500);
        let id = s.board().entities()[0].id;
        s.act(run, &id);
        s.advance(999);
        assert!(s.feedback().is_some());
        s.advance(1);
        assert!(s.feedback().is_none());

        let mut s = tapper(10).with_feedback_ms(60_000);
        let run = s.start();
        s.advance(500);
        let id = s.board().entities()[0].id;
        s.act(run, &id);
        s.advance(1999);
        assert!(s.feedback().is_some());
        s.advance(1);
        assert!(s.feedback().is_none());
    }

    proptest! {
        #[test]
        fn prop_remaining_non_increasing_single_finish(
            secs in 1u32..40,
            steps in proptest::collection::vec(1u32..2_500, 1..80),
        ) {
            let mut s = tapper(secs);
            s.start();
            let mut last = s.remaining_secs().unwrap_or(0);
            let mut finishes = 0;
            for dt in steps {
                s.advance(dt);
                let now = s.remaining_secs().unwrap_or(0);
                prop_assert!(now <= last);
                last = now;
                finishes += s
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, SessionEvent::Finished(_)))
                    .count();
                if now == 0 {
                    prop_assert_eq!(s.phase(), SessionPhase::Finished);
                    prop_assert_eq!(s.live_timers(), 0);
                }
            }
            prop_assert!(finishes <= 1);
            prop_assert_eq!(finishes == 1, last == 0);
        }

        #[test]
        fn prop_input_outside_active_is_noop(ids in proptest::collection::vec(0u32..20, 0..20)) {
            let mut s = tapper(3);
            let run = s.run();
            for id in &ids {
                prop_assert_eq!(s.act(run, &EntityId(*id)), None);
            }
            let run = s.start();
            s.advance(10_000);
            let before = *s.score();
            for id in &ids {
                prop_assert_eq!(s.act(run, &EntityId(*id)), None);
            }
            prop_assert_eq!(*s.score(), before);
        }
    }
}
