//! Game catalogue
//!
//! Each game is a [`Rules`](crate::sim::Rules) implementation plugged into the
//! shared session engine. Scoring constants live with the game that uses them.

pub mod breathing;
pub mod bubble_pop;
pub mod focus_flow;
pub mod focus_forest;
pub mod focus_frenzy;
pub mod math_rescue;
pub mod memory_match;
pub mod pattern_recall;
pub mod scenario_quiz;
pub mod sensory_sort;
pub mod story_builder;
pub mod time_turtle;
pub mod word_builder;

use serde::{Deserialize, Serialize};

pub use breathing::{BreathPattern, Breathing};
pub use bubble_pop::BubblePop;
pub use focus_flow::FocusFlow;
pub use focus_forest::{Activity, FocusForest};
pub use focus_frenzy::FocusFrenzy;
pub use math_rescue::{Answer, MathRescue};
pub use memory_match::MemoryMatch;
pub use pattern_recall::PatternRecall;
pub use scenario_quiz::{QuizDeck, ScenarioQuiz};
pub use sensory_sort::{SensoryAction, SensorySort};
pub use story_builder::{StoryAction, StoryBuilder};
pub use time_turtle::{TimeTurtle, TurtleAction, TurtlePhase};
pub use word_builder::WordBuilder;

/// Identifies a game, e.g. for per-game settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameKind {
    BubblePop,
    MathRescue,
    PatternRecall,
    WordBuilder,
    FocusFrenzy,
    MemoryMatch,
    SensorySort,
    Breathing,
    FocusFlow,
    FocusForest,
    TimeTurtle,
    EmotionExplorer,
    ConversationQuest,
    StoryBuilder,
}

impl GameKind {
    pub const ALL: [GameKind; 14] = [
        GameKind::BubblePop,
        GameKind::MathRescue,
        GameKind::PatternRecall,
        GameKind::WordBuilder,
        GameKind::FocusFrenzy,
        GameKind::MemoryMatch,
        GameKind::SensorySort,
        GameKind::Breathing,
        GameKind::FocusFlow,
        GameKind::FocusForest,
        GameKind::TimeTurtle,
        GameKind::EmotionExplorer,
        GameKind::ConversationQuest,
        GameKind::StoryBuilder,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::BubblePop => "Bubble Focus Pop",
            GameKind::MathRescue => "Math Galaxy Rescue",
            GameKind::PatternRecall => "Pattern Puzzle",
            GameKind::WordBuilder => "Word Builder Island",
            GameKind::FocusFrenzy => "Focus Frenzy",
            GameKind::MemoryMatch => "Memory Match",
            GameKind::SensorySort => "Sensory Match",
            GameKind::Breathing => "Breathe With Me",
            GameKind::FocusFlow => "Focus Flow",
            GameKind::FocusForest => "Focus Forest",
            GameKind::TimeTurtle => "Time Turtle",
            GameKind::EmotionExplorer => "Emotion Explorer",
            GameKind::ConversationQuest => "Conversation Quest",
            GameKind::StoryBuilder => "Social Story Builder",
        }
    }

    /// Lookup by command-line style name (`bubble-pop`, `math`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "bubble" | "bubble-pop" => GameKind::BubblePop,
            "math" | "math-rescue" => GameKind::MathRescue,
            "pattern" | "pattern-recall" => GameKind::PatternRecall,
            "word" | "word-builder" => GameKind::WordBuilder,
            "frenzy" | "focus-frenzy" => GameKind::FocusFrenzy,
            "memory" | "memory-match" => GameKind::MemoryMatch,
            "sensory" | "sensory-sort" => GameKind::SensorySort,
            "breathe" | "breathing" => GameKind::Breathing,
            "flow" | "focus-flow" => GameKind::FocusFlow,
            "forest" | "focus-forest" => GameKind::FocusForest,
            "turtle" | "time-turtle" => GameKind::TimeTurtle,
            "emotion" | "emotion-explorer" => GameKind::EmotionExplorer,
            "conversation" | "conversation-quest" => GameKind::ConversationQuest,
            "story" | "story-builder" => GameKind::StoryBuilder,
            _ => return None,
        };
        Some(kind)
    }
}
