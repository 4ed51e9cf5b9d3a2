//! Sensory Match
//!
//! Fifteen everyday things, three for each sense. The player picks a sense and
//! then something that belongs to it.

use glam::Vec2;

use crate::generate::deck::sensory_deck;
use crate::generate::grid;
use crate::sim::{
    Attribute, Attributes, Board, EntityId, Outcome, RunContext, Rules, ScoreState,
    ScoringPolicy, Sense, SessionConfig,
};

pub const COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensoryAction {
    ChooseSense(Sense),
    Pick(EntityId),
}

#[derive(Debug, Clone, Default)]
pub struct SensorySort {
    selected: Option<Sense>,
}

impl SensorySort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Sense> {
        self.selected
    }
}

impl Rules for SensorySort {
    type Action = SensoryAction;

    fn name(&self) -> &'static str {
        "sensory_sort"
    }

    fn difficulty_range(&self) -> std::ops::RangeInclusive<u8> {
        1..=1
    }

    fn config(&self, _difficulty: u8) -> SessionConfig {
        SessionConfig::untimed().with_scoring(ScoringPolicy::default())
    }

    fn setup(&mut self, ctx: &mut RunContext<'_>) {
        self.selected = None;
        let deck = sensory_deck(ctx.rng());
        let slots = grid(deck.len(), COLUMNS);
        for (item, pos) in deck.into_iter().zip(slots) {
            let attrs = Attributes::new()
                .with(Attribute::Lexical(item.name.to_string()))
                .with(Attribute::Sense(item.sense));
            ctx.spawn(pos, Vec2::ZERO, attrs);
        }
    }

    fn evaluate(&mut self, action: &SensoryAction, ctx: &mut RunContext<'_>) -> Option<Outcome> {
        match *action {
            SensoryAction::ChooseSense(sense) => {
                if self.selected == Some(sense) {
                    return None;
                }
                self.selected = Some(sense);
                Some(Outcome::progress(format!(
                    "Find something for {}",
                    sense.label()
                )))
            }
            SensoryAction::Pick(item) => {
                let selected = self.selected?;
                let entity = ctx.board().get(item).filter(|e| !e.consumed)?;
                let sense = entity.attrs.sense()?;
                let name = entity.attrs.lexical().unwrap_or_default().to_string();
                if sense == selected {
                    ctx.consume(item);
                    Some(Outcome::correct(format!("Correct! {} goes with {}", name, sense.label())))
                } else {
                    Some(Outcome::incorrect("Try again!"))
                }
            }
        }
    }

    fn is_complete(&self, board: &Board, _score: &ScoreState) -> bool {
        !board.entities().is_empty() && board.live_count() == 0
    }
}
