//! Memory Match
//!
//! Face-down cards in pairs. Flip two; a matching pair stays solved, otherwise
//! both flip back after a short look.

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::generate::deck::pair_deck;
use crate::generate::grid;
use crate::sim::{
    Attribute, Attributes, Board, EntityId, Outcome, RunContext, Rules, ScoreState,
    ScoringPolicy, SessionConfig,
};

pub const FLIP_BACK_MS: u32 = 1000;
pub const COLUMNS: usize = 4;

const FLIP_BACK: u32 = 1;

#[derive(Debug, Clone, Default)]
pub struct MemoryMatch {
    face_up: Vec<EntityId>,
    locked: bool,
}

impl MemoryMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(difficulty: u8) -> usize {
        if difficulty >= 2 { 8 } else { 6 }
    }

    /// Cards currently shown (unmatched)
    pub fn face_up(&self) -> &[EntityId] {
        &self.face_up
    }

    pub fn is_face_up(&self, card: EntityId) -> bool {
        self.face_up.contains(&card)
    }
}

impl Rules for MemoryMatch {
    type Action = EntityId;

    fn name(&self) -> &'static str {
        "memory_match"
    }

    fn difficulty_range(&self) -> RangeInclusive<u8> {
        1..=2
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed().with_scoring(ScoringPolicy::default())
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.face_up.clear();
        self.locked = false;
        let deck = pair_deck(Self::pairs(ctx.difficulty()), ctx.rng());
        let slots = grid(deck.len(), COLUMNS);
        for (picture, pos) in deck.into_iter().zip(slots) {
            ctx.spawn(pos, Vec2::ZERO, Attributes::new().with(Attribute::Picture(picture)));
        }
    }

    fn on_delay(&mut self, tag: u32, _ctx: &mut RunContext<'_>) {
        if tag == FLIP_BACK {
            self.face_up.clear();
            self.locked = false;
        }
    }

    fn evaluate(&mut self, card: &EntityId, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        if self.locked || self.is_face_up(*card) {
            return None;
        }
        let picture = ctx.board().get(*card).filter(|c| !c.consumed)?.attrs.picture()?;

        let Some(&first) = self.face_up.first() else {
            self.face_up.push(*card);
            return Some(Outcome::progress("Find its match!"));
        };

        let first_picture = ctx.board().get(first).and_then(|c| c.attrs.picture());
        if first_picture == Some(picture) {
            ctx.consume(first);
            ctx.consume(*card);
            self.face_up.clear();
            Some(Outcome::correct("It's a match!"))
        } else {
            self.face_up.push(*card);
            self.locked = true;
            ctx.delay(FLIP_BACK, FLIP_BACK_MS);
            Some(Outcome::incorrect("Not a match. Try again!"))
        }
    }

    fn is_complete(&self, board: &Board, _score: &ScoreState) -> bool {
        !board.entities().is_empty() && board.live_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FinishReason, Picture, Session, SessionPhase, Verdict};

    fn cards_of(session: &Session<MemoryMatch>, picture: Picture) -> Vec<EntityId> {
        session
            .board()
            .live()
            .filter(|c| c.attrs.picture() == Some(picture))
            .map(|c| c.id)
            .collect()
    }

    fn mismatched_pair(session: &Session<MemoryMatch>) -> (EntityId, EntityId) {
        let first = session.board().live().next().unwrap();
        let other = session
            .board()
            .live()
            .find(|c| c.attrs.picture() != first.attrs.picture())
            .unwrap();
        (first.id, other.id)
    }

    #[test]
    fn test_deck_size_by_difficulty() {
        let mut session = Session::new(MemoryMatch::new(), 1);
        session.start();
        assert_eq!(session.board().live_count(), 12);

        let mut session = Session::new(MemoryMatch::new(), 1).with_difficulty(2);
        session.start();
        assert_eq!(session.board().live_count(), 16);
    }

    #[test]
    fn test_match_consumes_both() {
        let mut session = Session::new(MemoryMatch::new(), 2);
        let run = session.start();
        let pair = cards_of(&session, Picture::Dog);
        assert_eq!(session.act(run, &pair[0]), Some(Verdict::Progress));
        // the same card twice is not a pair
        assert_eq!(session.act(run, &pair[0]), None);
        assert_eq!(session.act(run, &pair[1]), Some(Verdict::Correct));
        assert!(cards_of(&session, Picture::Dog).is_empty());
        assert_eq!(session.score().moves(), 1);
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut session = Session::new(MemoryMatch::new(), 3);
        let run = session.start();
        let (a, b) = mismatched_pair(&session);
        session.act(run, &a);
        assert_eq!(session.act(run, &b), Some(Verdict::Incorrect));
        assert_eq!(session.rules().face_up().len(), 2);

        let c = session.board().live().find(|x| x.id != a && x.id != b).unwrap().id;
        assert_eq!(session.act(run, &c), None, "input locked while cards are shown");

        session.advance(FLIP_BACK_MS);
        assert!(session.rules().face_up().is_empty());
        assert_eq!(session.act(run, &a), Some(Verdict::Progress));
        assert_eq!(session.board().live_count(), 12);
    }

    #[test]
    fn test_all_pairs_complete() {
        let mut session = Session::new(MemoryMatch::new(), 4);
        let run = session.start();
        for picture in &Picture::ALL[..6] {
            let pair = cards_of(&session, *picture);
            session.act(run, &pair[0]);
            session.act(run, &pair[1]);
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.last_summary().unwrap().reason, FinishReason::Completed);
        assert_eq!(session.score().moves(), 6);
        assert_eq!(session.score().accuracy, 100);
    }
}
