//! Session state and core simulation types
//!
//! Everything a host needs to render a session lives here: phase, entities and
//! the event stream. None of it is persisted; a session lives as long as its view.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::attr::Attributes;
use super::feedback::FeedbackEvent;
use super::score::ScoreState;
use crate::audio::SoundCue;
use crate::consts::{VIEW_MAX, VIEW_MIN};

/// Lifecycle phase of one play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the player to press start
    #[default]
    Idle,
    /// Clock running, input accepted
    Active,
    /// Clock stopped, input rejected
    Paused,
    /// Run ended, score frozen
    Finished,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Countdown reached zero
    TimeUp,
    /// Configured number of correct answers reached
    GoalReached,
    /// Game-specific completion (all pairs matched, all words built, ...)
    Completed,
    /// Terminal mistake in a game that ends on the first miss
    Mistake,
    /// Player ended the run
    Stopped,
}

/// Generation token for one run. Bumped on every `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RunId(pub u32);

impl RunId {
    pub fn next(self) -> Self {
        RunId(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A consumable on-screen object (bubble, alien, card, letter tile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Position in percent of the play area
    pub pos: Vec2,
    /// Drift applied on every spawn tick (percent)
    pub vel: Vec2,
    pub attrs: Attributes,
    /// Popped / rescued / matched
    pub consumed: bool,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, attrs: Attributes) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            attrs,
            consumed: false,
        }
    }

    pub fn drift(&mut self) {
        self.pos += self.vel;
    }

    /// Inside the visible area (with margin for entities entering from an edge)
    pub fn in_view(&self) -> bool {
        self.pos.x > VIEW_MIN && self.pos.x <= VIEW_MAX && self.pos.y > VIEW_MIN && self.pos.y <= VIEW_MAX
    }
}

/// RNG seed material for a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Stream for a given run, so replays of a seeded session stay reproducible
    pub fn for_run(&self, run: RunId) -> Self {
        Self {
            seed: self.seed,
            stream: run.0 as u64,
        }
    }

    pub fn to_rng(&self) -> Pcg32 {
        if self.stream == 0 {
            Pcg32::seed_from_u64(self.seed)
        } else {
            Pcg32::new(self.seed, self.stream)
        }
    }
}

/// Entities of the current run plus the RNG and id allocator that produce them
#[derive(Debug, Clone)]
pub struct Board {
    entities: Vec<Entity>,
    next_id: u32,
    rng: Pcg32,
}

impl Board {
    pub fn new(rng: RngState) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            rng: rng.to_rng(),
        }
    }

    /// Drop all entities and reseed. Ids keep counting up so they are never reused.
    pub fn reset(&mut self, rng: RngState) {
        self.entities.clear();
        self.rng = rng.to_rng();
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, attrs: Attributes) -> EntityId {
        let id = self.next_entity_id();
        let mut entity = Entity::new(id, pos, attrs);
        entity.vel = vel;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// All entities, sorted by id
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities not yet consumed
    pub fn live(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.consumed)
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Mark an entity consumed. False if it does not exist or was already consumed.
    pub fn consume(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(e) if !e.consumed => {
                e.consumed = true;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Move every entity by its drift and discard consumed or out-of-view ones.
    /// Returns ids that left the view unconsumed.
    pub fn drift_all(&mut self) -> Vec<EntityId> {
        let mut escaped = Vec::new();
        for entity in &mut self.entities {
            entity.drift();
        }
        self.entities.retain(|e| {
            if e.consumed {
                return false;
            }
            if !e.in_view() {
                escaped.push(e.id);
                return false;
            }
            true
        });
        escaped
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub reason: FinishReason,
    pub score: ScoreState,
    pub difficulty: u8,
    pub next_difficulty: u8,
    pub elapsed_secs: u32,
}

/// Events emitted to the host, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    PhaseChanged { from: SessionPhase, to: SessionPhase },
    Spawned(EntityId),
    Consumed(EntityId),
    /// Left the play area or was cleared by the game
    Despawned(EntityId),
    Countdown { remaining_secs: u32 },
    Feedback(FeedbackEvent),
    FeedbackCleared { seq: u64 },
    LevelChanged { level: u32 },
    Cue(SoundCue),
    Finished(Summary),
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub run: RunId,
    pub score: ScoreState,
    /// None for untimed games
    pub remaining_secs: Option<u32>,
    pub elapsed_secs: u32,
    pub difficulty: u8,
    pub live_entities: usize,
    pub feedback: Option<FeedbackEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::attr::{Attribute, Color};

    fn red() -> Attributes {
        Attributes::new().with(Attribute::Color(Color::Red))
    }

    #[test]
    fn test_ids_unique_across_reset() {
        let mut board = Board::new(RngState::new(7));
        let a = board.spawn(Vec2::new(50.0, 50.0), Vec2::ZERO, red());
        board.reset(RngState::new(7).for_run(RunId(2)));
        let b = board.spawn(Vec2::new(50.0, 50.0), Vec2::ZERO, red());
        assert_ne!(a, b);
        assert_eq!(board.entities().len(), 1);
    }

    #[test]
    fn test_consume_once() {
        let mut board = Board::new(RngState::new(1));
        let id = board.spawn(Vec2::new(10.0, 10.0), Vec2::ZERO, red());
        assert!(board.consume(id));
        assert!(!board.consume(id));
        assert!(!board.consume(EntityId(999)));
        assert_eq!(board.live_count(), 0);
    }

    #[test]
    fn test_drift_discards_escaped_and_consumed() {
        let mut board = Board::new(RngState::new(1));
        let rising = board.spawn(Vec2::new(50.0, -9.5), Vec2::new(0.0, -1.0), red());
        let popped = board.spawn(Vec2::new(50.0, 50.0), Vec2::new(0.0, -1.0), red());
        let stays = board.spawn(Vec2::new(50.0, 110.0), Vec2::new(0.0, -0.5), red());
        board.consume(popped);

        let escaped = board.drift_all();
        assert_eq!(escaped, vec![rising]);
        assert_eq!(board.entities().len(), 1);
        assert_eq!(board.entities()[0].id, stays);
        assert!((board.entities()[0].pos.y - 109.5).abs() < 1e-5);
    }

    #[test]
    fn test_rng_streams_differ_per_run() {
        use rand::Rng;
        let base = RngState::new(42);
        let mut a = base.for_run(RunId(1)).to_rng();
        let mut b = base.for_run(RunId(2)).to_rng();
        let xs: Vec<u32> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);

        let mut again = base.for_run(RunId(1)).to_rng();
        let zs: Vec<u32> = (0..4).map(|_| again.random()).collect();
        assert_eq!(xs, zs);
    }
}
