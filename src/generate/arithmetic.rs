//! Arithmetic problems with multiple-choice options
//!
//! Options are drawn without replacement from a fixed window around the answer,
//! so a valid set always exists and no retry loop is needed.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

/// Distractors lie within this distance of the answer
pub const DISTRACTOR_SPREAD: i64 = 5;
/// Largest option set the distractor window can always fill (answer + one side of the window)
pub const MAX_OPTIONS: usize = DISTRACTOR_SPREAD as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn symbol(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub lhs: i64,
    pub rhs: i64,
    pub op: Operation,
    pub answer: i64,
    /// Shuffled choices, answer included exactly once
    pub options: Vec<i64>,
}

impl Problem {
    /// Random problem for `op` with operands scaled by `tier` (1 = easiest)
    pub fn generate<R: Rng + ?Sized>(op: Operation, tier: u8, option_count: usize, rng: &mut R) -> Self {
        let tier = tier.max(1) as i64;
        let (lhs, rhs, answer) = match op {
            Operation::Addition => {
                let a = rng.random_range(1..=tier * 10);
                let b = rng.random_range(1..=tier * 10);
                (a, b, a + b)
            }
            Operation::Subtraction => {
                let a = rng.random_range(tier * 10..tier * 20);
                let b = rng.random_range(1..=a);
                (a, b, a - b)
            }
            Operation::Multiplication => {
                let a = rng.random_range(1..=tier * 5);
                let b = rng.random_range(1..=tier * 5);
                (a, b, a * b)
            }
            Operation::Division => {
                let divisor = rng.random_range(1..=tier * 5);
                let quotient = rng.random_range(1..=tier * 5);
                (divisor * quotient, divisor, quotient)
            }
        };
        Self::with_operands(lhs, rhs, op, answer, option_count, rng)
    }

    /// Problem with fixed operands; only the options are random
    pub fn with_operands<R: Rng + ?Sized>(
        lhs: i64,
        rhs: i64,
        op: Operation,
        answer: i64,
        option_count: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            lhs,
            rhs,
            op,
            answer,
            options: options(answer, option_count, rng),
        }
    }

    pub fn text(&self) -> String {
        format!("{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }

    pub fn is_correct(&self, value: i64) -> bool {
        value == self.answer
    }
}

/// `count` distinct non-negative choices containing `answer` exactly once, shuffled.
/// `count` is clamped to `1..=MAX_OPTIONS`.
pub fn options<R: Rng + ?Sized>(answer: i64, count: usize, rng: &mut R) -> Vec<i64> {
    let count = count.clamp(1, MAX_OPTIONS);
    let pool: Vec<i64> = (answer - DISTRACTOR_SPREAD..=answer + DISTRACTOR_SPREAD)
        .filter(|v| *v != answer && *v >= 0)
        .collect();

    let mut out: Vec<i64> = pool.choose_multiple(rng, count - 1).copied().collect();
    out.push(answer);
    out.shuffle(rng);
    out
}
