//! Social-emotional scenario content: "how would you feel" and "what would you say"

use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emotion {
    pub id: &'static str,
    pub emoji: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub static EMOTIONS: [Emotion; 6] = [
    Emotion { id: "happy", emoji: "😊", name: "Happy", description: "Feeling joy or pleasure" },
    Emotion { id: "sad", emoji: "😢", name: "Sad", description: "Feeling down or unhappy" },
    Emotion { id: "angry", emoji: "😠", name: "Angry", description: "Feeling mad or upset" },
    Emotion { id: "scared", emoji: "😨", name: "Scared", description: "Feeling afraid or worried" },
    Emotion { id: "surprised", emoji: "😮", name: "Surprised", description: "Feeling shocked or amazed" },
    Emotion { id: "excited", emoji: "🎉", name: "Excited", description: "Feeling enthusiastic or thrilled" },
];

pub fn emotion(id: &str) -> Option<&'static Emotion> {
    EMOTIONS.iter().find(|e| e.id == id)
}

/// One answer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub correct: bool,
    /// Replaces the generic "Correct!" / "Try again!" message
    pub feedback: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub prompt: &'static str,
    pub choices: &'static [Choice],
}

impl Scenario {
    pub fn correct_choice(&self) -> Option<usize> {
        self.choices.iter().position(|c| c.correct)
    }
}

const fn feel(id: &'static str, correct: bool) -> Choice {
    Choice {
        label: id,
        correct,
        feedback: None,
    }
}

const fn say(label: &'static str, correct: bool, feedback: &'static str) -> Choice {
    Choice {
        label,
        correct,
        feedback: Some(feedback),
    }
}

/// Choice labels are emotion ids, see [`emotion`]
pub static EMOTION_SCENARIOS: [Scenario; 5] = [
    Scenario {
        prompt: "You just won a prize in a competition!",
        choices: &[feel("happy", true), feel("sad", false), feel("angry", false), feel("scared", false)],
    },
    Scenario {
        prompt: "Your favorite toy broke.",
        choices: &[feel("happy", false), feel("sad", true), feel("excited", false), feel("surprised", false)],
    },
    Scenario {
        prompt: "Someone took your turn in line.",
        choices: &[feel("happy", false), feel("sad", false), feel("angry", true), feel("scared", false)],
    },
    Scenario {
        prompt: "You see a big spider crawling towards you.",
        choices: &[feel("happy", false), feel("sad", false), feel("angry", false), feel("scared", true)],
    },
    Scenario {
        prompt: "Your friend gave you a surprise gift!",
        choices: &[feel("happy", false), feel("sad", false), feel("surprised", true), feel("angry", false)],
    },
];

pub static CONVERSATION_SCENARIOS: [Scenario; 5] = [
    Scenario {
        prompt: "Your friend is showing you their new toy. What should you say?",
        choices: &[
            say(
                "That's cool! Can you tell me more about it?",
                true,
                "Great job! Showing interest in others' interests is a good way to make friends!",
            ),
            say(
                "I have a better toy.",
                false,
                "That might hurt your friend's feelings. Try being supportive instead!",
            ),
            say(
                "I don't care.",
                false,
                "That's not very friendly. Try showing interest in what your friend is sharing!",
            ),
        ],
    },
    Scenario {
        prompt: "Someone accidentally bumped into you. What should you say?",
        choices: &[
            say(
                "It's okay, no worries!",
                true,
                "That's very kind! Being understanding helps maintain good relationships.",
            ),
            say(
                "Watch where you're going!",
                false,
                "Getting angry might make the situation worse. Try being understanding!",
            ),
            say(
                "You're so clumsy!",
                false,
                "That's not very nice. Try being more understanding of accidents!",
            ),
        ],
    },
    Scenario {
        prompt: "Your friend is feeling sad. What should you say?",
        choices: &[
            say(
                "I'm here for you. Would you like to talk about it?",
                true,
                "That's very supportive! Being there for friends is important.",
            ),
            say("Just get over it.", false, "That's not very helpful. Try being more supportive!"),
            say(
                "I don't have time for this.",
                false,
                "That might make your friend feel worse. Try being more caring!",
            ),
        ],
    },
    Scenario {
        prompt: "You want to join a game that others are playing. What should you say?",
        choices: &[
            say(
                "Can I join the game?",
                true,
                "That's polite! Asking nicely is a good way to join activities.",
            ),
            say("Let me play!", false, "That might sound demanding. Try asking politely!"),
            say("I want to play too!", false, "That might sound too demanding. Try asking nicely!"),
        ],
    },
    Scenario {
        prompt: "Someone is talking to you but you're busy. What should you say?",
        choices: &[
            say(
                "I'm busy right now, but I'll talk to you in a few minutes.",
                true,
                "That's respectful! Being honest while staying friendly is important.",
            ),
            say("Go away!", false, "That's not very nice. Try being more polite!"),
            say(
                "I don't want to talk to you.",
                false,
                "That might hurt their feelings. Try being more polite!",
            ),
        ],
    },
];

/// Indices `0..n` in random order
pub fn shuffled_order<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_every_scenario_has_one_correct_choice() {
        for scenario in EMOTION_SCENARIOS.iter().chain(CONVERSATION_SCENARIOS.iter()) {
            assert_eq!(scenario.choices.iter().filter(|c| c.correct).count(), 1, "{}", scenario.prompt);
        }
    }

    #[test]
    fn test_emotion_choices_are_known_emotions() {
        for scenario in &EMOTION_SCENARIOS {
            for choice in scenario.choices {
                assert!(emotion(choice.label).is_some(), "{}", choice.label);
            }
        }
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut order = shuffled_order(5, &mut rng);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
