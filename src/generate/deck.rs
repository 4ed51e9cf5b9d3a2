//! Shuffled decks: memory card pairs, sensory items and color sequences

use rand::Rng;
use rand::seq::SliceRandom;

use crate::sim::attr::{Color, Picture, Sense};

/// Every picture of `pairs` twice, shuffled. `pairs` is capped at the picture count.
pub fn pair_deck<R: Rng + ?Sized>(pairs: usize, rng: &mut R) -> Vec<Picture> {
    let faces = &Picture::ALL[..pairs.min(Picture::ALL.len())];
    let mut deck: Vec<Picture> = faces.iter().chain(faces.iter()).copied().collect();
    deck.shuffle(rng);
    deck
}

/// Random color sequence (repeats allowed)
pub fn color_sequence<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<Color> {
    (0..len)
        .map(|_| Color::ALL[rng.random_range(0..Color::ALL.len())])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensoryItem {
    pub name: &'static str,
    pub sense: Sense,
    pub description: &'static str,
}

pub const SENSORY_ITEMS: &[SensoryItem] = &[
    SensoryItem { name: "Rainbow", sense: Sense::Sight, description: "A colorful arc in the sky" },
    SensoryItem { name: "Stars", sense: Sense::Sight, description: "Twinkling lights in the night sky" },
    SensoryItem { name: "Sunset", sense: Sense::Sight, description: "Beautiful colors as the sun sets" },
    SensoryItem { name: "Rain", sense: Sense::Sound, description: "Gentle drops falling from the sky" },
    SensoryItem { name: "Birds", sense: Sense::Sound, description: "Sweet chirping in the morning" },
    SensoryItem { name: "Wind", sense: Sense::Sound, description: "Soft breeze through the trees" },
    SensoryItem { name: "Sand", sense: Sense::Touch, description: "Grainy texture between fingers" },
    SensoryItem { name: "Cotton", sense: Sense::Touch, description: "Soft and fluffy material" },
    SensoryItem { name: "Water", sense: Sense::Touch, description: "Cool and wet sensation" },
    SensoryItem { name: "Flowers", sense: Sense::Smell, description: "Sweet and fresh fragrance" },
    SensoryItem { name: "Bread", sense: Sense::Smell, description: "Warm and comforting aroma" },
    SensoryItem { name: "Ocean", sense: Sense::Smell, description: "Fresh and salty air" },
    SensoryItem { name: "Apple", sense: Sense::Taste, description: "Sweet and crunchy fruit" },
    SensoryItem { name: "Lemon", sense: Sense::Taste, description: "Sour citrus fruit" },
    SensoryItem { name: "Chocolate", sense: Sense::Taste, description: "Sweet and smooth treat" },
];

pub fn sensory_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<SensoryItem> {
    let mut deck = SENSORY_ITEMS.to_vec();
    deck.shuffle(rng);
    deck
}
