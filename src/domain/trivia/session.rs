//! Trivia Session Entity
//!
//! Tracks one playthrough from configuration to the final score. Each call
//! to [`TriviaSession::advance`] consumes exactly one player input.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::{Category, Difficulty, TriviaError, TriviaQuestion};

/// Number of questions requested per playthrough.
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

const DIFFICULTY_PROMPT: &str = "Choose a difficulty level: easy, medium, or hard.";
const CATEGORY_PROMPT: &str = "Choose a category (type a number):";

/// Lifecycle phase of a trivia session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriviaPhase {
    ChoosingDifficulty,
    ChoosingCategory,
    /// Waiting for the caller to fetch questions.
    Fetching,
    Asking,
    Finished,
}

impl StateMachine for TriviaPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TriviaPhase::*;
        matches!(
            (self, target),
            (ChoosingDifficulty, ChoosingCategory)
                | (ChoosingCategory, Fetching)
                | (Fetching, Asking)
                | (Fetching, Finished)
                | (Asking, Asking)
                | (Asking, Finished)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TriviaPhase::*;
        match self {
            ChoosingDifficulty => vec![ChoosingCategory],
            ChoosingCategory => vec![Fetching],
            Fetching => vec![Asking, Finished],
            Asking => vec![Asking, Finished],
            Finished => vec![],
        }
    }
}

/// Parameters for the single question fetch a session performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaRequest {
    pub amount: u32,
    pub category: Category,
    pub difficulty: Difficulty,
}

/// What the caller must do after feeding the session one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaStep {
    /// Show the text; the session keeps control of the conversation.
    Continue(String),
    /// Show `notice`, fetch questions for `request`, then call `begin`.
    Fetch {
        notice: String,
        request: TriviaRequest,
    },
    /// Show the text; the session is over and should be discarded.
    Finished(String),
}

/// A question together with its options in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PresentedQuestion {
    question: TriviaQuestion,
    options: Vec<String>,
}

impl PresentedQuestion {
    fn shuffled<R: Rng + ?Sized>(question: TriviaQuestion, rng: &mut R) -> Self {
        let mut options = question.options();
        options.shuffle(rng);
        Self { question, options }
    }

    fn render(&self, number: usize) -> String {
        let mut lines = vec![format!("Question {}: {}", number, self.question.prompt)];
        lines.extend(
            self.options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("{}. {}", i + 1, option)),
        );
        let choices = (1..=self.options.len())
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("/");
        lines.push(format!("Your answer ({}):", choices));
        lines.join("\n")
    }

    /// Maps a 1-based choice to the option it names.
    fn option(&self, input: &str) -> Option<&str> {
        let choice: usize = input.trim().parse().ok()?;
        let index = choice.checked_sub(1)?;
        self.options.get(index).map(String::as_str)
    }
}

/// One trivia playthrough.
///
/// Invariants: `current_index <= questions.len()` and
/// `score <= questions.len()`. Questions are fetched once, in the
/// `Fetching` phase, and never refetched.
#[derive(Debug, Clone)]
pub struct TriviaSession {
    phase: TriviaPhase,
    amount: u32,
    difficulty: Difficulty,
    category: Category,
    questions: Vec<PresentedQuestion>,
    current_index: usize,
    score: usize,
}

impl TriviaSession {
    /// Creates a session that will request `amount` questions (at least one)
    /// and returns the opening prompt.
    pub fn start(amount: u32) -> (Self, String) {
        let session = Self {
            phase: TriviaPhase::ChoosingDifficulty,
            amount: amount.max(1),
            difficulty: Difficulty::default(),
            category: Category::default(),
            questions: Vec::new(),
            current_index: 0,
            score: 0,
        };
        (session, DIFFICULTY_PROMPT.to_string())
    }

    pub fn phase(&self) -> TriviaPhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Feeds one player input to the session.
    pub fn advance(&mut self, input: &str) -> Result<TriviaStep, TriviaError> {
        match self.phase {
            TriviaPhase::ChoosingDifficulty => self.choose_difficulty(input),
            TriviaPhase::ChoosingCategory => self.choose_category(input),
            TriviaPhase::Asking => self.answer(input),
            phase @ (TriviaPhase::Fetching | TriviaPhase::Finished) => {
                Err(TriviaError::UnexpectedInput(phase))
            }
        }
    }

    /// Supplies the fetched questions and returns the first one rendered.
    ///
    /// An empty batch finishes the session with [`TriviaError::NoQuestions`].
    pub fn begin<R: Rng + ?Sized>(
        &mut self,
        questions: Vec<TriviaQuestion>,
        rng: &mut R,
    ) -> Result<String, TriviaError> {
        if self.phase != TriviaPhase::Fetching {
            return Err(TriviaError::UnexpectedInput(self.phase));
        }
        self.questions = questions
            .into_iter()
            .take(self.amount as usize)
            .map(|q| PresentedQuestion::shuffled(q, rng))
            .collect();
        self.current_index = 0;

        let Some(first) = self.questions.first() else {
            self.phase = self.phase.transition_to(TriviaPhase::Finished)?;
            return Err(TriviaError::NoQuestions);
        };
        let rendered = first.render(1);
        self.phase = self.phase.transition_to(TriviaPhase::Asking)?;

        Ok(rendered)
    }

    fn choose_difficulty(&mut self, input: &str) -> Result<TriviaStep, TriviaError> {
        let mut lines = Vec::new();
        self.difficulty = match input.parse::<Difficulty>() {
            Ok(difficulty) => difficulty,
            Err(_) => {
                lines.push("Invalid choice, defaulting to 'medium'.".to_string());
                Difficulty::Medium
            }
        };
        lines.push(CATEGORY_PROMPT.to_string());
        lines.push(Category::menu());

        self.phase = self.phase.transition_to(TriviaPhase::ChoosingCategory)?;
        Ok(TriviaStep::Continue(lines.join("\n")))
    }

    fn choose_category(&mut self, input: &str) -> Result<TriviaStep, TriviaError> {
        let (category, notice) = match input.trim().parse::<u32>() {
            Ok(id) => match Category::from_id(id) {
                Some(category) => (category, String::new()),
                None => (
                    Category::GeneralKnowledge,
                    "Invalid choice, defaulting to General Knowledge.".to_string(),
                ),
            },
            Err(_) => (
                Category::GeneralKnowledge,
                "Invalid input, defaulting to General Knowledge.".to_string(),
            ),
        };
        self.category = category;
        self.phase = self.phase.transition_to(TriviaPhase::Fetching)?;

        Ok(TriviaStep::Fetch {
            notice,
            request: TriviaRequest {
                amount: self.amount,
                category: self.category,
                difficulty: self.difficulty,
            },
        })
    }

    fn answer(&mut self, input: &str) -> Result<TriviaStep, TriviaError> {
        let current = &self.questions[self.current_index];
        let feedback = match current.option(input) {
            Some(option) if option == current.question.correct_answer => {
                self.score += 1;
                "Correct! 🎉".to_string()
            }
            Some(_) => format!(
                "Incorrect. The correct answer was: {}",
                current.question.correct_answer
            ),
            None => "Invalid input. Moving to the next question.".to_string(),
        };
        self.current_index += 1;

        if self.current_index < self.questions.len() {
            self.phase = self.phase.transition_to(TriviaPhase::Asking)?;
            let next = self.questions[self.current_index].render(self.current_index + 1);
            return Ok(TriviaStep::Continue(format!("{}\n\n{}", feedback, next)));
        }

        self.phase = self.phase.transition_to(TriviaPhase::Finished)?;
        Ok(TriviaStep::Finished(format!(
            "{}\n\nYour final score is {}/{}! Thanks for playing.",
            feedback,
            self.score,
            self.questions.len()
        )))
    }
}
