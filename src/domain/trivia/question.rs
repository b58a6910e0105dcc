//! Trivia value objects: questions, difficulty levels and categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A single fetched question. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl TriviaQuestion {
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
        }
    }

    /// Incorrect answers followed by the correct one, before shuffling.
    pub fn options(&self) -> Vec<String> {
        let mut options = self.incorrect_answers.clone();
        options.push(self.correct_answer.clone());
        options
    }
}

/// Difficulty level requested from the question source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    /// Parses a player's answer; surrounding whitespace and case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "" => Err(ValidationError::empty_field("difficulty")),
            other => Err(ValidationError::invalid_format(
                "difficulty",
                format!("'{}' is not one of easy, medium, hard", other),
            )),
        }
    }
}

/// Question category, identified by its OpenTDB category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    GeneralKnowledge,
    ScienceComputers,
    History,
    Geography,
    Music,
}

impl Category {
    /// Menu order shown to the player.
    pub const ALL: [Category; 5] = [
        Category::GeneralKnowledge,
        Category::ScienceComputers,
        Category::History,
        Category::Geography,
        Category::Music,
    ];

    pub fn id(&self) -> u32 {
        match self {
            Category::GeneralKnowledge => 9,
            Category::ScienceComputers => 18,
            Category::History => 23,
            Category::Geography => 22,
            Category::Music => 12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::GeneralKnowledge => "General Knowledge",
            Category::ScienceComputers => "Science: Computers",
            Category::History => "History",
            Category::Geography => "Geography",
            Category::Music => "Music",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// One `"{id}: {name}"` line per category.
    pub fn menu() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("{}: {}", c.id(), c.name()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
