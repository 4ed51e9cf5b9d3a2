//! Entity attributes
//!
//! Every on-screen object carries a small map of category -> value. The set of
//! categories is closed so rules can be checked exhaustively at compile time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::generate::arithmetic::Problem;

/// Color palette shared by bubbles and pattern tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    White,
    Black,
    Orange,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::White,
        Color::Black,
        Color::Orange,
    ];

    /// The four colors bubbles are drawn from
    pub const BUBBLE: [Color; 4] = [Color::Blue, Color::Green, Color::Yellow, Color::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::White => "white",
            Color::Black => "black",
            Color::Orange => "orange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
        }
    }
}

/// Surface pattern of a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Fill {
    Solid,
    Striped,
}

impl Fill {
    pub const ALL: [Fill; 2] = [Fill::Solid, Fill::Striped];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fill::Solid => "solid",
            Fill::Striped => "striped",
        }
    }
}

/// Memory card faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Picture {
    Dog,
    Cat,
    Rabbit,
    Fox,
    Panda,
    Lion,
    Frog,
    Owl,
}

impl Picture {
    pub const ALL: [Picture; 8] = [
        Picture::Dog,
        Picture::Cat,
        Picture::Rabbit,
        Picture::Fox,
        Picture::Panda,
        Picture::Lion,
        Picture::Frog,
        Picture::Owl,
    ];
}

/// The five senses used by the sensory sorting game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sense {
    Sight,
    Sound,
    Touch,
    Smell,
    Taste,
}

impl Sense {
    pub const ALL: [Sense; 5] = [Sense::Sight, Sense::Sound, Sense::Touch, Sense::Smell, Sense::Taste];

    pub fn label(&self) -> &'static str {
        match self {
            Sense::Sight => "Sight",
            Sense::Sound => "Sound",
            Sense::Touch => "Touch",
            Sense::Smell => "Smell",
            Sense::Taste => "Taste",
        }
    }
}

/// Attribute category (map key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Color,
    Shape,
    Fill,
    Numeric,
    Lexical,
    Picture,
    Sense,
}

/// A single typed attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Color(Color),
    Shape(Shape),
    Fill(Fill),
    /// Arithmetic problem carried by an alien
    Numeric(Problem),
    /// A letter tile or a word/name label
    Lexical(String),
    Picture(Picture),
    Sense(Sense),
}

impl Attribute {
    pub fn category(&self) -> Category {
        match self {
            Attribute::Color(_) => Category::Color,
            Attribute::Shape(_) => Category::Shape,
            Attribute::Fill(_) => Category::Fill,
            Attribute::Numeric(_) => Category::Numeric,
            Attribute::Lexical(_) => Category::Lexical,
            Attribute::Picture(_) => Category::Picture,
            Attribute::Sense(_) => Category::Sense,
        }
    }
}

/// Category -> value map. Inserting a value replaces any previous value of the same category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(BTreeMap<Category, Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, attr: Attribute) -> Self {
        self.insert(attr);
        self
    }

    pub fn insert(&mut self, attr: Attribute) -> Option<Attribute> {
        self.0.insert(attr.category(), attr)
    }

    pub fn get(&self, category: Category) -> Option<&Attribute> {
        self.0.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.values()
    }

    pub fn color(&self) -> Option<Color> {
        match self.get(Category::Color) {
            Some(Attribute::Color(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn shape(&self) -> Option<Shape> {
        match self.get(Category::Shape) {
            Some(Attribute::Shape(s)) => Some(*s),
            _ => None,
        }
    }

    pub fn fill(&self) -> Option<Fill> {
        match self.get(Category::Fill) {
            Some(Attribute::Fill(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn problem(&self) -> Option<&Problem> {
        match self.get(Category::Numeric) {
            Some(Attribute::Numeric(p)) => Some(p),
            _ => None,
        }
    }

    pub fn lexical(&self) -> Option<&str> {
        match self.get(Category::Lexical) {
            Some(Attribute::Lexical(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn picture(&self) -> Option<Picture> {
        match self.get(Category::Picture) {
            Some(Attribute::Picture(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn sense(&self) -> Option<Sense> {
        match self.get(Category::Sense) {
            Some(Attribute::Sense(s)) => Some(*s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_category() {
        let mut attrs = Attributes::new().with(Attribute::Color(Color::Red));
        let old = attrs.insert(Attribute::Color(Color::Blue));
        assert_eq!(old, Some(Attribute::Color(Color::Red)));
        assert_eq!(attrs.color(), Some(Color::Blue));
        assert_eq!(attrs.iter().count(), 1);
    }

    #[test]
    fn test_typed_accessors() {
        let attrs = Attributes::new()
            .with(Attribute::Shape(Shape::Triangle))
            .with(Attribute::Fill(Fill::Striped))
            .with(Attribute::Lexical("A".into()));
        assert_eq!(attrs.shape(), Some(Shape::Triangle));
        assert_eq!(attrs.fill(), Some(Fill::Striped));
        assert_eq!(attrs.lexical(), Some("A"));
        assert_eq!(attrs.color(), None);
        assert!(attrs.problem().is_none());
    }
}
