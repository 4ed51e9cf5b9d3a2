//! Word Builder Island
//!
//! The letters of a word are dealt as shuffled tiles. The player places tiles one
//! by one; once every tile is placed the word is checked. Words come from phonics
//! lists that are worked through in order.

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::generate::grid;
use crate::generate::word::{WORD_LISTS, WordEntry, WordList, shuffled_letters};
use crate::sim::{
    Attribute, Attributes, Board, EntityId, Outcome, RunContext, Rules, ScoreState,
    ScoringPolicy, SessionConfig,
};

pub const NEXT_WORD_MS: u32 = 2000;
pub const RESHUFFLE_MS: u32 = 1500;
pub const TILE_Y: f32 = 70.0;

const NEXT_WORD: u32 = 1;
const RESHUFFLE: u32 = 2;

pub const SCORING: ScoringPolicy = ScoringPolicy {
    correct_reward: 10,
    miss_penalty: 0,
    accuracy_penalty: 0,
    time_penalty_secs: 0,
    terminal_on_miss: false,
};

#[derive(Debug, Clone, Default)]
pub struct WordBuilder {
    list: usize,
    word: usize,
    built: String,
    locked: bool,
    done: bool,
}

impl WordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &'static WordList {
        &WORD_LISTS[self.list.min(WORD_LISTS.len() - 1)]
    }

    pub fn current(&self) -> &'static WordEntry {
        let words = self.list().words;
        &words[self.word.min(words.len() - 1)]
    }

    pub fn hint(&self) -> &'static str {
        self.current().hint
    }

    pub fn definition(&self) -> &'static str {
        self.current().definition
    }

    /// Letters placed so far
    pub fn built(&self) -> &str {
        &self.built
    }

    fn is_last_in_list(&self) -> bool {
        self.word + 1 >= self.list().words.len()
    }

    fn deal(&mut self, ctx: &mut RunContext<'_>) {
        ctx.clear_board();
        let letters = shuffled_letters(self.current().word, ctx.rng());
        let slots = grid(letters.len(), letters.len());
        for (letter, pos) in letters.into_iter().zip(slots) {
            ctx.spawn(
                Vec2::new(pos.x, TILE_Y),
                Vec2::ZERO,
                Attributes::new().with(Attribute::Lexical(letter.to_string())),
            );
        }
        self.built.clear();
        self.locked = false;
    }

    fn next_word(&mut self, ctx: &mut RunContext<'_>) {
        if self.is_last_in_list() {
            if self.list + 1 >= WORD_LISTS.len() {
                self.done = true;
                return;
            }
            self.list += 1;
            self.word = 0;
            log::info!("word_builder: moving on to {}", self.list().name);
        } else {
            self.word += 1;
        }
        self.deal(ctx);
    }
}

impl Rules for WordBuilder {
    type Action = EntityId;

    fn name(&self) -> &'static str {
        "word_builder"
    }

    /// Difficulty picks the starting word list
    fn difficulty_range(&self) -> RangeInclusive<u8> {
        1..=WORD_LISTS.len() as u8
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed().with_scoring(SCORING)
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.list = ctx.difficulty().saturating_sub(1) as usize;
        self.word = 0;
        self.done = false;
        self.deal(ctx);
    }

    fn on_delay(&mut self, tag: u32, ctx: &mut RunContext<'_>) {
        match tag {
            NEXT_WORD => self.next_word(ctx),
            RESHUFFLE => self.deal(ctx),
            _ => {}
        }
    }

    fn evaluate(&mut self, tile: &EntityId, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        if self.locked {
            return None;
        }
        let letter = ctx.board().get(*tile).filter(|t| !t.consumed)?.attrs.lexical()?.to_string();
        ctx.consume(*tile);
        self.built.push_str(&letter);

        let target = self.current().word.to_uppercase();
        if self.built.chars().count() < target.chars().count() {
            return Some(Outcome::progress(format!("Placed {}", letter)));
        }

        self.locked = true;
        if self.built == target {
            ctx.delay(NEXT_WORD, NEXT_WORD_MS);
            let outcome = Outcome::correct("Correct! Great job!");
            if self.is_last_in_list() && self.list + 1 < WORD_LISTS.len() {
                Some(outcome.with_level_up())
            } else {
                Some(outcome)
            }
        } else {
            ctx.delay(RESHUFFLE, RESHUFFLE_MS);
            Some(Outcome::incorrect("Not quite right. Try again!"))
        }
    }

    fn is_complete(&self, _board: &Board, _score: &ScoreState) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FinishReason, Session, SessionPhase, Verdict};

    /// Tile ids in the order that spells the current word
    fn spelling(session: &Session<WordBuilder>) -> Vec<EntityId> {
        let mut tiles: Vec<(EntityId, String)> = session
            .board()
            .live()
            .map(|t| (t.id, t.attrs.lexical().unwrap_or_default().to_string()))
            .collect();
        let mut order = Vec::new();
        for ch in session.rules().current().word.to_uppercase().chars() {
            let idx = tiles.iter().position(|(_, l)| l.starts_with(ch)).unwrap();
            order.push(tiles.remove(idx).0);
        }
        order
    }

    fn spell(session: &mut Session<WordBuilder>) -> Option<Verdict> {
        let run = session.run();
        let mut last = None;
        for id in spelling(session) {
            last = session.act(run, &id);
        }
        last
    }

    #[test]
    fn test_first_word_dealt_as_tiles() {
        let mut session = Session::new(WordBuilder::new(), 1);
        session.start();
        assert_eq!(session.rules().current().word, "cat");
        assert_eq!(session.rules().hint(), "It purrs and has whiskers");
        assert_eq!(session.board().live_count(), 3);
    }

    #[test]
    fn test_correct_word_scores_then_moves_on() {
        let mut session = Session::new(WordBuilder::new(), 2);
        let run = session.start();
        assert_eq!(spell(&mut session), Some(Verdict::Correct));
        assert_eq!(session.score().score, 10);
        assert_eq!(session.rules().built(), "CAT");

        // locked until the next word is dealt
        let spare = session.board().entities()[0].id;
        assert_eq!(session.act(run, &spare), None);

        session.advance(NEXT_WORD_MS);
        assert_eq!(session.rules().current().word, "dog");
        assert_eq!(session.rules().built(), "");
        assert_eq!(session.board().live_count(), 3);
    }

    #[test]
    fn test_wrong_word_reshuffles_same_word() {
        let mut session = Session::new(WordBuilder::new(), 3);
        let run = session.start();
        let mut order = spelling(&session);
        order.reverse();
        let mut last = None;
        for id in order {
            last = session.act(run, &id);
        }
        // "TAC" is not "CAT"
        assert_eq!(last, Some(Verdict::Incorrect));
        assert_eq!(session.score().score, 0);

        session.advance(RESHUFFLE_MS);
        assert_eq!(session.rules().current().word, "cat");
        assert_eq!(session.board().live_count(), 3);
    }

    #[test]
    fn test_last_word_of_last_list_completes() {
        let mut session = Session::new(WordBuilder::new(), 4).with_difficulty(3);
        session.start();
        for _ in 0..3 {
            assert_eq!(spell(&mut session), Some(Verdict::Correct));
            session.advance(NEXT_WORD_MS);
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.last_summary().unwrap().reason, FinishReason::Completed);
        assert_eq!(session.score().score, 30);
    }

    #[test]
    fn test_finishing_a_list_levels_up() {
        let mut session = Session::new(WordBuilder::new(), 5);
        session.start();
        for _ in 0..3 {
            spell(&mut session);
            session.advance(NEXT_WORD_MS);
        }
        assert_eq!(session.score().level, 2);
        assert_eq!(session.rules().list().name, "Silent E");
        assert_eq!(session.rules().current().word, "cake");
    }
}
