//! Time Turtle
//!
//! Time-estimation practice. For each everyday task the player predicts how many
//! minutes it takes, runs a stopwatch while doing it, and then earns up to ten
//! points for how close the prediction was to the task's typical duration.

use rand::Rng;

use crate::sim::{Board, FeedbackKind, Outcome, RunContext, Rules, ScoreState, SessionConfig};

pub const PULSE_MS: u32 = 1000;
pub const MAX_PREDICTION_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCategory {
    Homework,
    Chores,
    Activities,
    SelfCare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub name: &'static str,
    pub description: &'static str,
    /// Typical duration the prediction is scored against
    pub actual_secs: u32,
    pub category: TaskCategory,
}

pub static TASKS: [Task; 5] = [
    Task {
        name: "Pack Your Backpack",
        description: "Get your books, notebooks, and supplies ready for school",
        actual_secs: 180,
        category: TaskCategory::SelfCare,
    },
    Task {
        name: "Quick Math Practice",
        description: "Complete 5 basic math problems",
        actual_secs: 300,
        category: TaskCategory::Homework,
    },
    Task {
        name: "Clean Your Desk",
        description: "Organize your workspace and put things away",
        actual_secs: 240,
        category: TaskCategory::Chores,
    },
    Task {
        name: "Reading Time",
        description: "Read a short story or chapter",
        actual_secs: 360,
        category: TaskCategory::Homework,
    },
    Task {
        name: "Exercise Break",
        description: "Do some stretches or simple exercises",
        actual_secs: 180,
        category: TaskCategory::Activities,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurtleAction {
    Predict { minutes: u32 },
    StartTimer,
    PauseTimer,
    Done,
    NextTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurtlePhase {
    #[default]
    Prediction,
    Execution,
    Review,
}

/// Accuracy percent (0-100) and points (0-10) for a prediction
pub fn prediction_score(predicted_secs: u32, actual_secs: u32) -> (f64, u32) {
    let actual = actual_secs.max(1) as f64;
    let diff = (actual - predicted_secs as f64).abs();
    let accuracy = (100.0 - diff / actual * 100.0).max(0.0);
    (accuracy, (accuracy / 10.0).floor() as u32)
}

#[derive(Debug, Clone, Default)]
pub struct TimeTurtle {
    remaining: Vec<usize>,
    current: Option<usize>,
    phase: TurtlePhase,
    predicted_secs: Option<u32>,
    elapsed_secs: u32,
    running: bool,
    last_accuracy: Option<f64>,
}

impl TimeTurtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(&self) -> Option<&'static Task> {
        TASKS.get(self.current?)
    }

    pub fn phase(&self) -> TurtlePhase {
        self.phase
    }

    pub fn predicted_secs(&self) -> Option<u32> {
        self.predicted_secs
    }

    /// Stopwatch for the current task
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tasks not yet completed (the current one included until it is done)
    pub fn tasks_left(&self) -> usize {
        self.remaining.len()
    }

    pub fn last_accuracy(&self) -> Option<f64> {
        self.last_accuracy
    }

    fn pick_task(&mut self, ctx: &mut RunContext<'_>) -> Option<&'static Task> {
        if self.remaining.is_empty() {
            return None;
        }
        let slot = ctx.rng().random_range(0..self.remaining.len());
        self.current = Some(self.remaining[slot]);
        self.phase = TurtlePhase::Prediction;
        self.predicted_secs = None;
        self.elapsed_secs = 0;
        self.running = false;
        self.task()
    }
}

impl Rules for TimeTurtle {
    type Action = TurtleAction;

    fn name(&self) -> &'static str {
        "time_turtle"
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed().with_spawn_interval(PULSE_MS)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.remaining = (0..TASKS.len()).collect();
        self.last_accuracy = None;
        if let Some(task) = self.pick_task(ctx) {
            ctx.announce(FeedbackKind::Info, format!("How long will this take? {}", task.name));
        }
    }

    fn on_spawn_tick(&mut self, _ctx: &mut RunContext<'_>) {
        if self.running {
            self.elapsed_secs += 1;
        }
    }

    fn evaluate(&mut self, action: &TurtleAction, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        match (*action, self.phase) {
            (TurtleAction::Predict { minutes }, TurtlePhase::Prediction) => {
                if !(1..=MAX_PREDICTION_MINUTES).contains(&minutes) {
                    return None;
                }
                self.predicted_secs = Some(minutes * 60);
                self.phase = TurtlePhase::Execution;
                let plural = if minutes > 1 { "s" } else { "" };
                Some(Outcome::progress(format!("You predicted {} minute{}", minutes, plural)))
            }
            (TurtleAction::StartTimer, TurtlePhase::Execution) if !self.running => {
                self.running = true;
                Some(Outcome::progress("Timer started"))
            }
            (TurtleAction::PauseTimer, TurtlePhase::Execution) if self.running => {
                self.running = false;
                Some(Outcome::progress("Timer paused"))
            }
            (TurtleAction::Done, TurtlePhase::Execution) => {
                let task = self.task()?;
                let predicted = self.predicted_secs?;
                let (accuracy, points) = prediction_score(predicted, task.actual_secs);
                let current = self.current;
                self.remaining.retain(|t| Some(*t) != current);
                self.running = false;
                self.phase = TurtlePhase::Review;
                self.last_accuracy = Some(accuracy);
                log::debug!(
                    "time_turtle: {} predicted {}s actual {}s took {}s",
                    task.name,
                    predicted,
                    task.actual_secs,
                    self.elapsed_secs
                );
                Some(
                    Outcome::correct(format!("Task complete! Accuracy {}%", accuracy.round()))
                        .with_reward(points),
                )
            }
            (TurtleAction::NextTask, TurtlePhase::Review) => {
                let task = self.pick_task(ctx)?;
                Some(Outcome::progress(format!("How long will this take? {}", task.name)))
            }
            _ => None,
        }
    }

    fn is_complete(&self, _board: &Board, _score: &ScoreState) -> bool {
        self.phase == TurtlePhase::Review && self.remaining.is_empty()
    }
}
