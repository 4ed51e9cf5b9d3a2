//! Phonics word lists and letter shuffling

use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    pub word: &'static str,
    pub definition: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordList {
    pub name: &'static str,
    pub phonics_rule: &'static str,
    pub words: &'static [WordEntry],
}

pub const WORD_LISTS: &[WordList] = &[
    WordList {
        name: "CVC Words",
        phonics_rule: "Consonant-Vowel-Consonant",
        words: &[
            WordEntry { word: "cat", definition: "A small furry animal that says meow", hint: "It purrs and has whiskers" },
            WordEntry { word: "dog", definition: "A friendly pet that barks", hint: "Man's best friend" },
            WordEntry { word: "pig", definition: "A farm animal that says oink", hint: "Pink and curly-tailed" },
        ],
    },
    WordList {
        name: "Silent E",
        phonics_rule: "Magic E makes the vowel say its name",
        words: &[
            WordEntry { word: "cake", definition: "A sweet dessert for birthdays", hint: "Blow out the candles!" },
            WordEntry { word: "bike", definition: "A two-wheeled vehicle you pedal", hint: "Ride it with a helmet" },
            WordEntry { word: "home", definition: "Where you live", hint: "Where your family stays" },
        ],
    },
    WordList {
        name: "Blends",
        phonics_rule: "Two consonants blend together",
        words: &[
            WordEntry { word: "stop", definition: "To cease moving", hint: "Red traffic light means..." },
            WordEntry { word: "frog", definition: "A green jumping amphibian", hint: "Hops and says ribbit" },
            WordEntry { word: "swim", definition: "To move through water", hint: "What fish do" },
        ],
    },
];

/// Upper-case letters of `word` in an order different from the word itself
/// (unless every letter is the same)
pub fn shuffled_letters<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Vec<char> {
    let original: Vec<char> = word.chars().flat_map(char::to_uppercase).collect();
    let mut letters = original.clone();
    letters.shuffle(rng);
    if letters == original {
        letters.rotate_left(1);
    }
    letters
}
