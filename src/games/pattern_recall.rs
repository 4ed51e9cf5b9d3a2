//! Pattern Puzzle
//!
//! A color sequence is shown briefly, then hidden; the player repeats it one
//! color at a time. Each level adds a color. One wrong color ends the game.

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::generate::deck::color_sequence;
use crate::generate::grid;
use crate::sim::{
    Attribute, Attributes, Color, EntityId, FeedbackKind, Outcome, RunContext, Rules,
    ScoringPolicy, SessionConfig,
};

pub const FINAL_LEVEL: u32 = 5;
pub const REVEAL_MS: u32 = 2000;
pub const NEXT_LEVEL_MS: u32 = 1000;
pub const POINTS_PER_LEVEL: u32 = 10;

const HIDE: u32 = 1;
const NEXT_LEVEL: u32 = 2;

pub const SCORING: ScoringPolicy = ScoringPolicy {
    correct_reward: POINTS_PER_LEVEL,
    miss_penalty: 0,
    accuracy_penalty: 0,
    time_penalty_secs: 0,
    terminal_on_miss: true,
};

#[derive(Debug, Clone, Default)]
pub struct PatternRecall {
    level: u32,
    sequence: Vec<Color>,
    slots: Vec<EntityId>,
    cursor: usize,
    showing: bool,
    accepting: bool,
}

impl PatternRecall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// The sequence, only while it is being shown
    pub fn revealed(&self) -> Option<&[Color]> {
        self.showing.then_some(self.sequence.as_slice())
    }

    /// Colors entered so far in this round
    pub fn entered(&self) -> &[Color] {
        &self.sequence[..self.cursor]
    }

    pub fn accepting(&self) -> bool {
        self.accepting
    }

    fn deal(&mut self, ctx: &mut RunContext<'_>) {
        ctx.clear_board();
        let len = self.level as usize + 2;
        self.sequence = color_sequence(len, ctx.rng());
        self.slots = grid(len, len)
            .into_iter()
            .zip(self.sequence.iter())
            .map(|(pos, color)| {
                let pos = Vec2::new(pos.x, 50.0);
                ctx.spawn(pos, Vec2::ZERO, Attributes::new().with(Attribute::Color(*color)))
            })
            .collect();
        self.cursor = 0;
        self.showing = true;
        self.accepting = false;
        ctx.announce(FeedbackKind::Info, format!("Level {}: watch carefully", self.level));
        ctx.delay(HIDE, REVEAL_MS);
    }
}

impl Rules for PatternRecall {
    type Action = Color;

    fn name(&self) -> &'static str {
        "pattern_recall"
    }

    /// Difficulty is the starting level
    fn difficulty_range(&self) -> RangeInclusive<u8> {
        1..=FINAL_LEVEL as u8
    }

    fn config(&self, difficulty: u8) -> SessionConfig {
        SessionConfig::untimed()
            .with_goal((FINAL_LEVEL + 1).saturating_sub(difficulty as u32).max(1))
            .with_scoring(SCORING)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.level = ctx.difficulty() as u32;
        self.deal(ctx);
    }

    fn on_delay(&mut self, tag: u32, ctx: &mut RunContext<'_>) {
        match tag {
            HIDE => {
                self.showing = false;
                self.accepting = true;
                ctx.announce(FeedbackKind::Info, "Your turn!");
            }
            NEXT_LEVEL => {
                self.level += 1;
                self.deal(ctx);
            }
            _ => {}
        }
    }

    fn evaluate(&mut self, color: &Color, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        if !self.accepting {
            return None;
        }
        let expected = *self.sequence.get(self.cursor)?;
        if *color != expected {
            self.accepting = false;
            return Some(Outcome::incorrect("Oops! That's not the pattern."));
        }

        ctx.consume(self.slots[self.cursor]);
        self.cursor += 1;
        if self.cursor < self.sequence.len() {
            return Some(Outcome::progress("Keep going!"));
        }

        self.accepting = false;
        let outcome = Outcome::correct(format!("Level {} complete!", self.level))
            .with_reward(self.level * POINTS_PER_LEVEL);
        if self.level < FINAL_LEVEL {
            ctx.delay(NEXT_LEVEL, NEXT_LEVEL_MS);
            Some(outcome.with_level_up())
        } else {
            Some(outcome)
        }
    }
}
