//! Social Story Builder
//!
//! The player picks up to four story pieces (who, what they did, how they felt,
//! where) and finishes the story once it has at least a character and an action.

use serde::{Deserialize, Serialize};

use crate::sim::{Board, Outcome, RunContext, Rules, ScoreState, SessionConfig};

pub const MAX_PIECES: usize = 4;
pub const MIN_PIECES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryPart {
    Character,
    Action,
    Emotion,
    Setting,
}

impl StoryPart {
    pub fn label(&self) -> &'static str {
        match self {
            StoryPart::Character => "Characters",
            StoryPart::Action => "Actions",
            StoryPart::Emotion => "Emotions",
            StoryPart::Setting => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryPiece {
    pub part: StoryPart,
    pub text: &'static str,
}

const fn piece(part: StoryPart, text: &'static str) -> StoryPiece {
    StoryPiece { part, text }
}

pub static PIECES: [StoryPiece; 14] = [
    piece(StoryPart::Character, "Alex"),
    piece(StoryPart::Character, "Sam"),
    piece(StoryPart::Character, "Teacher"),
    piece(StoryPart::Action, "shared toys"),
    piece(StoryPart::Action, "helped clean up"),
    piece(StoryPart::Action, "took turns"),
    piece(StoryPart::Action, "said hello"),
    piece(StoryPart::Emotion, "happy"),
    piece(StoryPart::Emotion, "excited"),
    piece(StoryPart::Emotion, "proud"),
    piece(StoryPart::Emotion, "friendly"),
    piece(StoryPart::Setting, "playground"),
    piece(StoryPart::Setting, "classroom"),
    piece(StoryPart::Setting, "park"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAction {
    /// Index into [`PIECES`]
    Add(usize),
    Remove(usize),
    Finish,
}

#[derive(Debug, Clone, Default)]
pub struct StoryBuilder {
    chosen: Vec<usize>,
    done: bool,
}

impl StoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chosen(&self) -> impl Iterator<Item = &'static StoryPiece> + '_ {
        self.chosen.iter().filter_map(|i| PIECES.get(*i))
    }

    fn first(&self, part: StoryPart) -> Option<&'static str> {
        self.chosen().find(|p| p.part == part).map(|p| p.text)
    }

    /// "Alex felt happy and shared toys at the park."
    pub fn story(&self) -> String {
        let mut story = format!("{} ", self.first(StoryPart::Character).unwrap_or_default());
        if let Some(emotion) = self.first(StoryPart::Emotion) {
            story.push_str(&format!("felt {} ", emotion));
        }
        if let Some(action) = self.first(StoryPart::Action) {
            story.push_str(&format!("and {} ", action));
        }
        match self.first(StoryPart::Setting) {
            Some(setting) => story.push_str(&format!("at the {}.", setting)),
            None => story.truncate(story.trim_end().len()),
        }
        story
    }
}

impl Rules for StoryBuilder {
    type Action = StoryAction;

    fn name(&self) -> &'static str {
        "story_builder"
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed()
    }

    fn setup(&mut self, _ctx: &mut RunContext<'_>) {
        self.chosen.clear();
        self.done = false;
    }

    fn evaluate(&mut self, action: &StoryAction, _ctx: &mut RunContext<'_>) -> Option<Outcome> {
        match *action {
            StoryAction::Add(idx) => {
                let piece = PIECES.get(idx)?;
                if self.chosen.contains(&idx) {
                    return None;
                }
                if self.chosen.len() >= MAX_PIECES {
                    return Some(Outcome::incorrect("You've reached the maximum number of elements!"));
                }
                self.chosen.push(idx);
                Some(Outcome::progress(format!("Added {}", piece.text)))
            }
            StoryAction::Remove(idx) => {
                let pos = self.chosen.iter().position(|c| *c == idx)?;
                self.chosen.remove(pos);
                let text = PIECES.get(idx).map(|p| p.text).unwrap_or_default();
                Some(Outcome::progress(format!("Removed {}", text)))
            }
            StoryAction::Finish => {
                if self.chosen.len() < MIN_PIECES {
                    return Some(Outcome::incorrect("Please add at least 2 elements to your story!"));
                }
                if self.first(StoryPart::Character).is_none() || self.first(StoryPart::Action).is_none() {
                    return Some(Outcome::incorrect(
                        "Your story needs at least one character and one action!",
                    ));
                }
                self.done = true;
                Some(Outcome::correct(self.story()))
            }
        }
    }

    fn is_complete(&self, _board: &Board, _score: &ScoreState) -> bool {
        self.done
    }
}
