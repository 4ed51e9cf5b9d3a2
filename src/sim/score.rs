//! Input-to-score reducer
//!
//! Games judge an action and return an [`Outcome`]; the reducer turns it into a
//! score mutation using the game's own [`ScoringPolicy`]. The clock never touches
//! the score.

use serde::{Deserialize, Serialize};

/// Per-game reward/penalty constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Points for a correct action
    pub correct_reward: u32,
    /// Points removed for a wrong action (score never drops below zero)
    pub miss_penalty: u32,
    /// Accuracy percentage points removed for a wrong action
    pub accuracy_penalty: u8,
    /// Seconds removed from the countdown for a wrong action
    pub time_penalty_secs: u32,
    /// A wrong action ends the run
    pub terminal_on_miss: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            correct_reward: 1,
            miss_penalty: 0,
            accuracy_penalty: 0,
            time_penalty_secs: 0,
            terminal_on_miss: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// A legal step that neither scores nor penalizes
    Progress,
}

/// Result of judging one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub message: String,
    /// Overrides `ScoringPolicy::correct_reward`
    pub reward: Option<u32>,
    pub level_up: bool,
}

impl Outcome {
    pub fn correct(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Correct,
            message: message.into(),
            reward: None,
            level_up: false,
        }
    }

    pub fn incorrect(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Incorrect,
            message: message.into(),
            reward: None,
            level_up: false,
        }
    }

    pub fn progress(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Progress,
            message: message.into(),
            reward: None,
            level_up: false,
        }
    }

    pub fn with_reward(mut self, reward: u32) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn with_level_up(mut self) -> Self {
        self.level_up = true;
        self
    }
}

/// Running score of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    /// Percent, starts at 100
    pub accuracy: u8,
    pub correct: u32,
    pub incorrect: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub level: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            accuracy: 100,
            correct: 0,
            incorrect: 0,
            streak: 0,
            best_streak: 0,
            level: 1,
        }
    }
}

/// Side effects of a reduced outcome the session must carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    pub time_penalty_secs: u32,
    pub terminal: bool,
    pub level_changed: Option<u32>,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judged attempts (card pairs turned, answers submitted)
    pub fn moves(&self) -> u32 {
        self.correct + self.incorrect
    }

    pub fn apply(&mut self, policy: &ScoringPolicy, outcome: &Outcome) -> Applied {
        let mut applied = Applied::default();
        match outcome.verdict {
            Verdict::Correct => {
                self.score += outcome.reward.unwrap_or(policy.correct_reward);
                self.correct += 1;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
            }
            Verdict::Incorrect => {
                self.score = self.score.saturating_sub(policy.miss_penalty);
                self.accuracy = self.accuracy.saturating_sub(policy.accuracy_penalty);
                self.incorrect += 1;
                self.streak = 0;
                applied.time_penalty_secs = policy.time_penalty_secs;
                applied.terminal = policy.terminal_on_miss;
            }
            Verdict::Progress => {}
        }
        if outcome.level_up {
            self.level += 1;
            applied.level_changed = Some(self.level);
        }
        applied
    }
}
