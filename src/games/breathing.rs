//! Breathe With Me
//!
//! Untimed breathing pacer. A one-second pulse counts down the current phase and
//! moves on to the next one, announcing its instruction with a soft chime. There
//! is nothing to score; the run ends when the player stops it.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::sim::{FeedbackKind, Outcome, RunContext, Rules, SessionConfig};

pub const PULSE_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BreathPattern {
    /// 4-4-4-4
    #[default]
    Box,
    /// 4-8
    Relax,
    /// 6-2-4
    Energize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breath {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathStep {
    pub breath: Breath,
    pub secs: u32,
    pub instruction: &'static str,
}

const fn step(breath: Breath, secs: u32, instruction: &'static str) -> BreathStep {
    BreathStep {
        breath,
        secs,
        instruction,
    }
}

const BOX: [BreathStep; 4] = [
    step(Breath::Inhale, 4, "Breathe in slowly"),
    step(Breath::Hold, 4, "Hold your breath"),
    step(Breath::Exhale, 4, "Breathe out slowly"),
    step(Breath::Hold, 4, "Hold your breath"),
];

const RELAX: [BreathStep; 2] = [
    step(Breath::Inhale, 4, "Breathe in deeply"),
    step(Breath::Exhale, 8, "Breathe out slowly"),
];

const ENERGIZE: [BreathStep; 3] = [
    step(Breath::Inhale, 6, "Breathe in deeply"),
    step(Breath::Hold, 2, "Hold briefly"),
    step(Breath::Exhale, 4, "Breathe out"),
];

impl BreathPattern {
    pub const ALL: [BreathPattern; 3] = [BreathPattern::Box, BreathPattern::Relax, BreathPattern::Energize];

    pub fn steps(&self) -> &'static [BreathStep] {
        match self {
            BreathPattern::Box => &BOX,
            BreathPattern::Relax => &RELAX,
            BreathPattern::Energize => &ENERGIZE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreathPattern::Box => "Box Breathing",
            BreathPattern::Relax => "Relaxing Breath",
            BreathPattern::Energize => "Energizing Breath",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Breathing {
    pattern: BreathPattern,
    step: usize,
    secs_left: u32,
    cycles: u32,
}

impl Breathing {
    pub fn new(pattern: BreathPattern) -> Self {
        Self {
            pattern,
            ..Default::default()
        }
    }

    pub fn pattern(&self) -> BreathPattern {
        self.pattern
    }

    /// Switch patterns. Takes effect at the next start.
    pub fn set_pattern(&mut self, pattern: BreathPattern) {
        self.pattern = pattern;
    }

    pub fn current(&self) -> &'static BreathStep {
        let steps = self.pattern.steps();
        &steps[self.step % steps.len()]
    }

    pub fn secs_left(&self) -> u32 {
        self.secs_left
    }

    /// Completed passes through the pattern
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Guide circle scale: grows 1.0 -> 1.5 while inhaling, shrinks back while exhaling
    pub fn circle_scale(&self) -> f32 {
        let step = self.current();
        let done = 1.0 - self.secs_left as f32 / step.secs.max(1) as f32;
        match step.breath {
            Breath::Inhale => 1.0 + done * 0.5,
            Breath::Exhale => 1.5 - done * 0.5,
            Breath::Hold => {
                let steps = self.pattern.steps();
                let prev = steps[(self.step + steps.len() - 1) % steps.len()];
                if prev.breath == Breath::Exhale { 1.0 } else { 1.5 }
            }
        }
    }

    fn enter(&mut self, step: usize, ctx: &mut RunContext<'_>) {
        self.step = step;
        let current = self.current();
        self.secs_left = current.secs;
        ctx.announce(FeedbackKind::Info, current.instruction);
        ctx.cue(SoundCue::Chime);
    }
}

impl Rules for Breathing {
    type Action = Infallible;

    fn name(&self) -> &'static str {
        "breathing"
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed().with_spawn_interval(PULSE_MS)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.cycles = 0;
        log::info!("breathing: {}", self.pattern.label());
        self.enter(0, ctx);
    }

    fn on_spawn_tick(&mut self, ctx: &mut RunContext<'_>) {
        self.secs_left = self.secs_left.saturating_sub(1);
        if self.secs_left > 0 {
            return;
        }
        let next = (self.step + 1) % self.pattern.steps().len();
        if next == 0 {
            self.cycles += 1;
        }
        self.enter(next, ctx);
    }

    fn evaluate(&mut self, action: &Infallible, _ctx: &mut RunContext<'_>) -> Option<Outcome> {
        match *action {}
    }
}
