//! Generic session engine
//!
//! One [`Session`] drives one play-through of one game. The game itself is a
//! [`Rules`] implementation: it says how long a run lasts, how fast entities spawn,
//! how actions are judged and when the run is complete. The session owns the
//! lifecycle, the timers, the score and the feedback channel.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand_pcg::Pcg32;

use super::attr::Attributes;
use super::feedback::{FeedbackChannel, FeedbackKind};
use super::schedule::{Scheduler, TimerId, TimerKind};
use super::score::{Outcome, ScoreState, ScoringPolicy, Verdict};
use super::state::{
    Board, EntityId, FinishReason, RngState, RunId, SessionEvent, SessionPhase, Snapshot, Summary,
};
use crate::audio::SoundCue;
use crate::consts::{DEFAULT_FEEDBACK_MS, MAX_FEEDBACK_MS, MIN_FEEDBACK_MS, TICK_MS};

/// Per-run configuration, resolved from the game for the current difficulty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Countdown length; None counts elapsed time up instead
    pub duration_secs: Option<u32>,
    /// Session clock interval
    pub tick_ms: u32,
    /// Spawn/movement interval, if the game has one
    pub spawn_interval_ms: Option<u32>,
    /// Finish once this many correct answers are in
    pub goal: Option<u32>,
    pub scoring: ScoringPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: None,
            tick_ms: TICK_MS,
            spawn_interval_ms: None,
            goal: None,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn timed(secs: u32) -> Self {
        Self {
            duration_secs: Some(secs),
            ..Default::default()
        }
    }

    pub fn untimed() -> Self {
        Self::default()
    }

    pub fn with_spawn_interval(mut self, ms: u32) -> Self {
        self.spawn_interval_ms = Some(ms);
        self
    }

    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }
}

/// Game-specific behavior plugged into a [`Session`]
pub trait Rules {
    /// Discrete player input (entity selection, chosen option, ...)
    type Action: std::fmt::Debug;

    fn name(&self) -> &'static str;

    fn difficulty_range(&self) -> RangeInclusive<u8> {
        1..=5
    }

    fn config(&self, difficulty: u8) -> SessionConfig;

    /// Build the initial board for a new run. Game state from a previous run must be reset here.
    fn setup(&mut self, ctx: &mut RunContext<'_>);

    fn on_spawn_tick(&mut self, _ctx: &mut RunContext<'_>) {}

    fn on_delay(&mut self, _tag: u32, _ctx: &mut RunContext<'_>) {}

    /// Judge an action. `None` means the action is not legal right now and is ignored.
    /// Feedback for the action is posted by the session, not here.
    fn evaluate(&mut self, action: &Self::Action, ctx: &mut RunContext<'_>) -> Option<Outcome>;

    fn is_complete(&self, _board: &Board, _score: &ScoreState) -> bool {
        false
    }

    /// Difficulty for the next run
    fn adapt_difficulty(&self, difficulty: u8, _score: &ScoreState, _reason: FinishReason) -> u8 {
        difficulty
    }
}

/// Mutable access to a run, handed to [`Rules`] hooks
pub struct RunContext<'a> {
    board: &'a mut Board,
    scheduler: &'a mut Scheduler,
    feedback: &'a mut FeedbackChannel,
    events: &'a mut Vec<SessionEvent>,
    score: &'a ScoreState,
    now_ms: u64,
    difficulty: u8,
    feedback_ms: u32,
}

impl RunContext<'_> {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn score(&self) -> &ScoreState {
        self.score
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        self.board.rng()
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, attrs: Attributes) -> EntityId {
        let id = self.board.spawn(pos, vel, attrs);
        self.events.push(SessionEvent::Spawned(id));
        id
    }

    pub fn consume(&mut self, id: EntityId) -> bool {
        let consumed = self.board.consume(id);
        if consumed {
            self.events.push(SessionEvent::Consumed(id));
        }
        consumed
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let removed = self.board.remove(id).is_some();
        if removed {
            self.events.push(SessionEvent::Despawned(id));
        }
        removed
    }

    /// Remove every entity, consumed or not
    pub fn clear_board(&mut self) {
        let ids: Vec<EntityId> = self.board.entities().iter().map(|e| e.id).collect();
        self.board.clear();
        self.events.extend(ids.into_iter().map(SessionEvent::Despawned));
    }

    /// Apply drift; entities that leave the view are dropped without penalty
    pub fn drift(&mut self) {
        let escaped = self.board.drift_all();
        self.events.extend(escaped.into_iter().map(SessionEvent::Despawned));
    }

    /// Schedule a one-shot `Rules::on_delay(tag)`
    pub fn delay(&mut self, tag: u32, delay_ms: u32) -> TimerId {
        self.scheduler.after(TimerKind::Delay(tag), delay_ms, self.now_ms)
    }

    pub fn cancel_delay(&mut self, tag: u32) -> usize {
        self.scheduler.cancel_kind(TimerKind::Delay(tag))
    }

    pub fn is_delayed(&self, tag: u32) -> bool {
        self.scheduler.is_scheduled(TimerKind::Delay(tag))
    }

    /// Post an announcement that is not tied to an action (instructions, phase names)
    pub fn announce(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        let event = self.feedback.post(kind, message, self.now_ms, self.feedback_ms);
        self.events.push(SessionEvent::Feedback(event));
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.events.push(SessionEvent::Cue(cue));
    }
}

/// One play-through state machine for a single game view
#[derive(Debug)]
pub struct Session<R: Rules> {
    rules: R,
    phase: SessionPhase,
    run: RunId,
    rng: RngState,
    config: SessionConfig,
    difficulty: u8,
    next_difficulty: u8,
    pub(super) clock_ms: u64,
    started_at_ms: u64,
    pub(super) remaining_secs: Option<u32>,
    pub(super) elapsed_secs: u32,
    board: Board,
    score: ScoreState,
    feedback: FeedbackChannel,
    pub(super) scheduler: Scheduler,
    pub(super) events: Vec<SessionEvent>,
    feedback_ms: u32,
    last_summary: Option<Summary>,
}

impl<R: Rules> Session<R> {
    pub fn new(rules: R, seed: u64) -> Self {
        let difficulty = *rules.difficulty_range().start();
        let config = rules.config(difficulty);
        let rng = RngState::new(seed);
        Self {
            rules,
            phase: SessionPhase::Idle,
            run: RunId::default(),
            rng,
            remaining_secs: config.duration_secs,
            config,
            difficulty,
            next_difficulty: difficulty,
            clock_ms: 0,
            started_at_ms: 0,
            elapsed_secs: 0,
            board: Board::new(rng),
            score: ScoreState::new(),
            feedback: FeedbackChannel::new(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            feedback_ms: DEFAULT_FEEDBACK_MS,
            last_summary: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.set_difficulty(difficulty);
        self
    }

    /// Feedback display lifetime, clamped to 1-2 s
    pub fn with_feedback_ms(mut self, ms: u32) -> Self {
        self.feedback_ms = ms.clamp(MIN_FEEDBACK_MS, MAX_FEEDBACK_MS);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Game rules, only reachable between runs
    pub fn rules_mut(&mut self) -> Option<&mut R> {
        match self.phase {
            SessionPhase::Active | SessionPhase::Paused => None,
            _ => Some(&mut self.rules),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Difficulty the next `start` will use
    pub fn next_difficulty(&self) -> u8 {
        self.next_difficulty
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Milliseconds since the current run started
    pub fn run_time_ms(&self) -> u64 {
        self.clock_ms.saturating_sub(self.started_at_ms)
    }

    pub fn feedback(&self) -> Option<&super::feedback::FeedbackEvent> {
        self.feedback.current()
    }

    pub fn last_summary(&self) -> Option<&Summary> {
        self.last_summary.as_ref()
    }

    /// Timers that can still fire
    pub fn live_timers(&self) -> usize {
        self.scheduler.live()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            run: self.run,
            score: self.score,
            remaining_secs: self.remaining_secs,
            elapsed_secs: self.elapsed_secs,
            difficulty: self.difficulty,
            live_entities: self.board.live_count(),
            feedback: self.feedback.current().cloned(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Set the difficulty of the next run. Ignored while a run is in progress.
    pub fn set_difficulty(&mut self, difficulty: u8) -> bool {
        if matches!(self.phase, SessionPhase::Active | SessionPhase::Paused) {
            return false;
        }
        self.next_difficulty = self.clamp_difficulty(difficulty);
        true
    }

    fn clamp_difficulty(&self, difficulty: u8) -> u8 {
        let range = self.rules.difficulty_range();
        difficulty.clamp(*range.start(), *range.end())
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            self.events.push(SessionEvent::PhaseChanged { from, to });
        }
    }

    pub(super) fn split(&mut self, now_ms: u64) -> (&mut R, RunContext<'_>) {
        let ctx = RunContext {
            board: &mut self.board,
            scheduler: &mut self.scheduler,
            feedback: &mut self.feedback,
            events: &mut self.events,
            score: &self.score,
            now_ms,
            difficulty: self.difficulty,
            feedback_ms: self.feedback_ms,
        };
        (&mut self.rules, ctx)
    }

    /// Start a new run (also "play again" and restart). Every timer and entity of the
    /// previous run is dropped before the new run is armed.
    pub fn start(&mut self) -> RunId {
        let dropped = self.scheduler.reset();
        if dropped > 0 {
            log::debug!("{}: dropped {} timers from run {:?}", self.rules.name(), dropped, self.run);
        }

        self.run = self.run.next();
        self.difficulty = self.next_difficulty;
        self.config = self.rules.config(self.difficulty);
        self.board.reset(self.rng.for_run(self.run));
        self.score = ScoreState::new();
        self.feedback.clear();
        self.remaining_secs = self.config.duration_secs;
        self.elapsed_secs = 0;
        self.started_at_ms = self.clock_ms;
        self.last_summary = None;
        self.set_phase(SessionPhase::Active);

        let now = self.clock_ms;
        self.scheduler.every(TimerKind::Countdown, self.config.tick_ms, now);
        if let Some(every) = self.config.spawn_interval_ms {
            self.scheduler.every(TimerKind::Spawn, every, now);
        }

        let (rules, mut ctx) = self.split(now);
        rules.setup(&mut ctx);
        ctx.cue(SoundCue::Start);

        log::info!(
            "{}: run {} started (difficulty {}, {:?}s)",
            self.rules.name(),
            self.run.0,
            self.difficulty,
            self.remaining_secs
        );
        self.run
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.scheduler.park(self.clock_ms);
        self.set_phase(SessionPhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.scheduler.unpark(self.clock_ms);
        self.set_phase(SessionPhase::Active);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            SessionPhase::Active => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Player ended the run early
    pub fn end(&mut self) -> bool {
        if self.phase == SessionPhase::Paused {
            self.scheduler.unpark(self.clock_ms);
            self.set_phase(SessionPhase::Active);
        }
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.finish(FinishReason::Stopped);
        true
    }

    /// Leave the view: drop the run entirely and return to Idle
    pub fn teardown(&mut self) {
        self.scheduler.reset();
        self.board.clear();
        self.feedback.clear();
        self.score = ScoreState::new();
        self.remaining_secs = self.config.duration_secs;
        self.elapsed_secs = 0;
        self.set_phase(SessionPhase::Idle);
    }

    /// Feed one player action into the current run. Returns the verdict, or `None`
    /// when the action was ignored (not Active, stale run, illegal target).
    pub fn act(&mut self, run: RunId, action: &R::Action) -> Option<Verdict> {
        if self.phase != SessionPhase::Active || run != self.run {
            log::trace!("{}: ignoring {:?} ({:?}, run {:?})", self.rules.name(), action, self.phase, run);
            return None;
        }

        let now = self.clock_ms;
        let outcome = {
            let (rules, mut ctx) = self.split(now);
            rules.evaluate(action, &mut ctx)?
        };
        log::debug!("{}: {:?} -> {:?}", self.rules.name(), action, outcome.verdict);

        let applied = self.score.apply(&self.config.scoring, &outcome);

        let (kind, cue) = match outcome.verdict {
            Verdict::Correct => (FeedbackKind::Correct, SoundCue::Correct),
            Verdict::Incorrect => (FeedbackKind::TryAgain, SoundCue::Miss),
            Verdict::Progress => (FeedbackKind::Info, SoundCue::Tap),
        };
        let event = self.feedback.post(kind, outcome.message.clone(), now, self.feedback_ms);
        self.events.push(SessionEvent::Feedback(event));
        self.events.push(SessionEvent::Cue(cue));

        if let Some(level) = applied.level_changed {
            log::info!("{}: level {}", self.rules.name(), level);
            self.events.push(SessionEvent::LevelChanged { level });
            self.events.push(SessionEvent::Cue(SoundCue::LevelUp));
        }

        if applied.time_penalty_secs > 0 {
            if let Some(remaining) = self.remaining_secs.as_mut() {
                *remaining = remaining.saturating_sub(applied.time_penalty_secs);
                let remaining = *remaining;
                self.events.push(SessionEvent::Countdown { remaining_secs: remaining });
                if remaining == 0 {
                    self.finish(FinishReason::TimeUp);
                }
            }
        }

        if applied.terminal {
            self.finish(FinishReason::Mistake);
        }

        self.check_complete();
        Some(outcome.verdict)
    }

    /// Clear an expired feedback message, returning its sequence number
    pub(super) fn expire_feedback(&mut self) -> Option<u64> {
        self.feedback.expire(self.clock_ms).map(|f| f.seq)
    }

    pub(super) fn check_complete(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        if self.config.goal.is_some_and(|goal| self.score.correct >= goal) {
            self.finish(FinishReason::GoalReached);
        } else if self.rules.is_complete(&self.board, &self.score) {
            self.finish(FinishReason::Completed);
        }
    }

    /// Active -> Finished. Drops every timer; no-op outside Active.
    pub(super) fn finish(&mut self, reason: FinishReason) {
        if self.phase != SessionPhase::Active {
            return;
        }
        self.scheduler.reset();

        let adapted = self.rules.adapt_difficulty(self.difficulty, &self.score, reason);
        self.next_difficulty = self.clamp_difficulty(adapted);

        let summary = Summary {
            reason,
            score: self.score,
            difficulty: self.difficulty,
            next_difficulty: self.next_difficulty,
            elapsed_secs: self.elapsed_secs,
        };
        log::info!(
            "{}: run {} finished ({:?}) score={} accuracy={} next difficulty={}",
            self.rules.name(),
            self.run.0,
            reason,
            self.score.score,
            self.score.accuracy,
            self.next_difficulty
        );

        self.set_phase(SessionPhase::Finished);
        let cue = match reason {
            FinishReason::Mistake => SoundCue::GameOver,
            FinishReason::TimeUp if self.score.score == 0 => SoundCue::GameOver,
            _ => SoundCue::Complete,
        };
        self.events.push(SessionEvent::Cue(cue));
        self.events.push(SessionEvent::Finished(summary.clone()));
        self.last_summary = Some(summary);
    }
}
