//! Matching rules for the bubble game
//!
//! A rule names one attribute value; targets carry it, decoys never do.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::sim::attr::{Attribute, Attributes, Color, Fill, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchRule {
    Color(Color),
    Shape(Shape),
    Fill(Fill),
}

impl MatchRule {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => MatchRule::Color(pick(&Color::BUBBLE, rng)),
            1 => MatchRule::Shape(pick(&Shape::ALL, rng)),
            _ => MatchRule::Fill(pick(&Fill::ALL, rng)),
        }
    }

    pub fn matches(&self, attrs: &Attributes) -> bool {
        match self {
            MatchRule::Color(c) => attrs.color() == Some(*c),
            MatchRule::Shape(s) => attrs.shape() == Some(*s),
            MatchRule::Fill(f) => attrs.fill() == Some(*f),
        }
    }

    pub fn description(&self) -> String {
        match self {
            MatchRule::Color(c) => format!("Pop only the {} bubbles", c.as_str()),
            MatchRule::Shape(s) => format!("Pop only the {} bubbles", s.as_str()),
            MatchRule::Fill(f) => format!("Pop only the {} bubbles", f.as_str()),
        }
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(values: &[T], rng: &mut R) -> T {
    // palettes are non-empty constants
    values[rng.random_range(0..values.len())]
}

/// Pick any value except `avoid`
fn pick_other<T: Copy + PartialEq, R: Rng + ?Sized>(values: &[T], avoid: T, rng: &mut R) -> T {
    let others: Vec<T> = values.iter().copied().filter(|v| *v != avoid).collect();
    others.choose(rng).copied().unwrap_or(avoid)
}

/// Attributes for a new bubble. Targets are forced onto the rule; decoys that
/// happen to satisfy it get the conflicting attribute re-rolled.
pub fn bubble_attributes<R: Rng + ?Sized>(rule: &MatchRule, is_target: bool, rng: &mut R) -> Attributes {
    let mut color = pick(&Color::BUBBLE, rng);
    let mut shape = pick(&Shape::ALL, rng);
    let mut fill = pick(&Fill::ALL, rng);

    match (*rule, is_target) {
        (MatchRule::Color(c), true) => color = c,
        (MatchRule::Shape(s), true) => shape = s,
        (MatchRule::Fill(f), true) => fill = f,
        (MatchRule::Color(c), false) if color == c => color = pick_other(&Color::BUBBLE, c, rng),
        (MatchRule::Shape(s), false) if shape == s => shape = pick_other(&Shape::ALL, s, rng),
        (MatchRule::Fill(f), false) if fill == f => fill = pick_other(&Fill::ALL, f, rng),
        _ => {}
    }

    Attributes::new()
        .with(Attribute::Color(color))
        .with(Attribute::Shape(shape))
        .with(Attribute::Fill(fill))
}
