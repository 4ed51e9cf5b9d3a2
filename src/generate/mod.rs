//! Rule, problem and scenario generators
//!
//! Everything here is a pure function of an RNG, so a seeded session reproduces
//! the same targets, problems and decks.

pub mod arithmetic;
pub mod deck;
pub mod rule;
pub mod scenario;
pub mod word;

use glam::Vec2;
use rand::Rng;

pub use arithmetic::{Operation, Problem};
pub use rule::MatchRule;

/// Random position inside `[lo, hi)` percent on both axes
pub fn scatter<R: Rng + ?Sized>(lo: f32, hi: f32, rng: &mut R) -> Vec2 {
    Vec2::new(rng.random_range(lo..hi), rng.random_range(lo..hi))
}

/// Slot positions for `n` items laid out on a grid of `columns`, centered in the play area
pub fn grid(n: usize, columns: usize) -> Vec<Vec2> {
    let columns = columns.max(1);
    let rows = n.div_ceil(columns).max(1);
    (0..n)
        .map(|i| {
            let col = (i % columns) as f32;
            let row = (i / columns) as f32;
            Vec2::new(
                (col + 0.5) * 100.0 / columns as f32,
                (row + 0.5) * 100.0 / rows as f32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_inside_area() {
        let cells = grid(12, 4);
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|p| p.x > 0.0 && p.x < 100.0 && p.y > 0.0 && p.y < 100.0));
        assert_eq!(cells[0], Vec2::new(12.5, 100.0 / 6.0));
    }
}
