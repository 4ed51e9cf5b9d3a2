//! Emotion Explorer and Conversation Quest
//!
//! Both read a short social scenario and ask the player to pick an answer. Emotion
//! Explorer asks how the person would feel and lets the player retry until they
//! find it. Conversation Quest asks what to say, explains every choice, and moves
//! on whether the answer was kind or not. The run completes after the last
//! scenario.

use serde::{Deserialize, Serialize};

use crate::generate::scenario::{CONVERSATION_SCENARIOS, EMOTION_SCENARIOS, Scenario, shuffled_order};
use crate::sim::{Board, FeedbackKind, Outcome, RunContext, Rules, ScoreState, SessionConfig};

const NEXT_SCENARIO: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuizDeck {
    #[default]
    Emotions,
    Conversation,
}

impl QuizDeck {
    pub fn scenarios(&self) -> &'static [Scenario] {
        match self {
            QuizDeck::Emotions => &EMOTION_SCENARIOS,
            QuizDeck::Conversation => &CONVERSATION_SCENARIOS,
        }
    }

    /// Pause on the answer before the next scenario
    pub fn next_delay_ms(&self) -> u32 {
        match self {
            QuizDeck::Emotions => 1000,
            QuizDeck::Conversation => 2000,
        }
    }

    fn moves_on_after_miss(&self) -> bool {
        matches!(self, QuizDeck::Conversation)
    }

    fn shuffled(&self) -> bool {
        matches!(self, QuizDeck::Emotions)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioQuiz {
    deck: QuizDeck,
    order: Vec<usize>,
    index: usize,
    locked: bool,
    done: bool,
}

impl ScenarioQuiz {
    pub fn new(deck: QuizDeck) -> Self {
        Self {
            deck,
            ..Default::default()
        }
    }

    pub fn emotions() -> Self {
        Self::new(QuizDeck::Emotions)
    }

    pub fn conversation() -> Self {
        Self::new(QuizDeck::Conversation)
    }

    pub fn deck(&self) -> QuizDeck {
        self.deck
    }

    /// Scenario on screen, None before the first start and after the last one
    pub fn scenario(&self) -> Option<&'static Scenario> {
        if self.done {
            return None;
        }
        let idx = *self.order.get(self.index)?;
        self.deck.scenarios().get(idx)
    }

    /// Zero-based position in the run
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.deck.scenarios().len()
    }

    /// Answers are shown and the next scenario is on its way
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn show(&mut self, ctx: &mut RunContext<'_>) {
        self.locked = false;
        if let Some(scenario) = self.scenario() {
            ctx.announce(FeedbackKind::Info, scenario.prompt);
        }
    }
}

impl Rules for ScenarioQuiz {
    /// Index into the current scenario's choices
    type Action = usize;

    fn name(&self) -> &'static str {
        match self.deck {
            QuizDeck::Emotions => "emotion_explorer",
            QuizDeck::Conversation => "conversation_quest",
        }
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed()
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        let n = self.deck.scenarios().len();
        self.order = if self.deck.shuffled() {
            shuffled_order(n, ctx.rng())
        } else {
            (0..n).collect()
        };
        self.index = 0;
        self.done = false;
        self.show(ctx);
    }

    fn on_delay(&mut self, tag: u32, ctx: &mut RunContext<'_>) {
        if tag != NEXT_SCENARIO {
            return;
        }
        self.index += 1;
        if self.index >= self.order.len() {
            self.done = true;
            return;
        }
        self.show(ctx);
    }

    fn evaluate(&mut self, choice: &usize, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        if self.locked {
            return None;
        }
        let choice = self.scenario()?.choices.get(*choice)?;

        if choice.correct {
            self.locked = true;
            ctx.delay(NEXT_SCENARIO, self.deck.next_delay_ms());
            return Some(Outcome::correct(choice.feedback.unwrap_or("Correct!")));
        }
        if self.deck.moves_on_after_miss() {
            self.locked = true;
            ctx.delay(NEXT_SCENARIO, self.deck.next_delay_ms());
        }
        Some(Outcome::incorrect(choice.feedback.unwrap_or("Try again!")))
    }

    fn is_complete(&self, _board: &Board, _score: &ScoreState) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FinishReason, Session, SessionPhase, Verdict};

    fn answer(session: &Session<ScenarioQuiz>) -> usize {
        session.rules().scenario().and_then(|s| s.correct_choice()).unwrap()
    }

    fn wrong(session: &Session<ScenarioQuiz>) -> usize {
        let scenario = session.rules().scenario().unwrap();
        scenario.choices.iter().position(|c| !c.correct).unwrap()
    }

    #[test]
    fn test_correct_emotion_moves_on_after_a_second() {
        let mut session = Session::new(ScenarioQuiz::emotions(), 1);
        let run = session.start();
        let first = session.rules().scenario().unwrap().prompt;
        assert_eq!(session.feedback().unwrap().message, first);

        assert_eq!(session.act(run, &answer(&session)), Some(Verdict::Correct));
        assert_eq!(session.feedback().unwrap().message, "Correct!");
        assert!(session.rules().is_locked());
        assert_eq!(session.act(run, &0), None);

        session.advance(999);
        assert_eq!(session.rules().position(), 0);
        session.advance(1);
        assert_eq!(session.rules().position(), 1);
        assert_ne!(session.rules().scenario().unwrap().prompt, first);
    }

    #[test]
    fn test_wrong_emotion_can_be_retried() {
        let mut session = Session::new(ScenarioQuiz::emotions(), 2);
        let run = session.start();
        assert_eq!(session.act(run, &wrong(&session)), Some(Verdict::Incorrect));
        assert_eq!(session.feedback().unwrap().message, "Try again!");
        assert!(!session.rules().is_locked());
        assert_eq!(session.act(run, &answer(&session)), Some(Verdict::Correct));
        assert_eq!(session.score().score, 1);
    }

    #[test]
    fn test_choice_out_of_range_is_ignored() {
        let mut session = Session::new(ScenarioQuiz::emotions(), 3);
        let run = session.start();
        assert_eq!(session.act(run, &9), None);
        assert_eq!(session.score().moves(), 0);
    }

    #[test]
    fn test_every_emotion_scenario_once_then_complete() {
        let mut session = Session::new(ScenarioQuiz::emotions(), 4);
        let run = session.start();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(session.rules().scenario().unwrap().prompt);
            session.act(run, &answer(&session));
            assert_eq!(session.phase(), SessionPhase::Active);
            session.advance(QuizDeck::Emotions.next_delay_ms());
        }
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.last_summary().unwrap().reason, FinishReason::Completed);
        assert_eq!(session.score().score, 5);
    }

    #[test]
    fn test_conversation_explains_and_moves_on_after_miss() {
        let mut session = Session::new(ScenarioQuiz::conversation(), 5);
        let run = session.start();
        assert_eq!(
            session.rules().scenario().unwrap().prompt,
            "Your friend is showing you their new toy. What should you say?"
        );

        assert_eq!(session.act(run, &1), Some(Verdict::Incorrect));
        assert_eq!(
            session.feedback().unwrap().message,
            "That might hurt your friend's feelings. Try being supportive instead!"
        );
        assert_eq!(session.act(run, &0), None);

        session.advance(2000);
        assert_eq!(session.rules().position(), 1);
        assert_eq!(session.act(run, &0), Some(Verdict::Correct));
        assert_eq!(session.score().score, 1);
        assert_eq!(session.score().incorrect, 1);
    }

    #[test]
    fn test_conversation_completes_after_last_step() {
        let mut session = Session::new(ScenarioQuiz::conversation(), 6);
        let run = session.start();
        for _ in 0..5 {
            session.act(run, &wrong(&session));
            session.advance(2000);
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.last_summary().unwrap().reason, FinishReason::Completed);
        assert_eq!(session.score().score, 0);
    }
}
