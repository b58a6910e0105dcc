//! Keyword-based intent classification.
//!
//! Rules are checked in a fixed order and the first match wins. Matching
//! runs against a lower-cased copy of the input; captured values (the
//! user's name) keep their original casing.

use serde::{Deserialize, Serialize};

use crate::domain::memory::{MemoryStore, NAME_KEY};

const INTRODUCTION_PREFIX: &str = "my name is";

/// Character index at which an introduced name starts.
const NAME_OFFSET: usize = 11;

/// Which rule set the dispatcher applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Interactive line mode: jokes match on exact phrases only.
    #[default]
    Console,
    /// Request/response mode: jokes match anywhere and the weather and
    /// news intents are enabled.
    Web,
}

/// A recognized category of user utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Exit,
    /// `name` is trimmed and may be empty.
    Introduce { name: String },
    Greet { name: String },
    StartTrivia,
    Joke,
    Weather { city: String },
    News,
    /// No rule matched; hand the input to the reply generator.
    Chat,
}

impl Intent {
    /// Short label for logs; never includes captured user text.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::Exit => "exit",
            Intent::Introduce { .. } => "introduce",
            Intent::Greet { .. } => "greet",
            Intent::StartTrivia => "start_trivia",
            Intent::Joke => "joke",
            Intent::Weather { .. } => "weather",
            Intent::News => "news",
            Intent::Chat => "chat",
        }
    }
}

/// Classifies a trimmed, non-empty utterance.
pub fn classify(input: &str, mode: DispatchMode, memory: &MemoryStore) -> Intent {
    let lowered = input.to_lowercase();

    if lowered == "bye" {
        return Intent::Exit;
    }

    if lowered.starts_with(INTRODUCTION_PREFIX) {
        let name: String = input.chars().skip(NAME_OFFSET).collect();
        return Intent::Introduce {
            name: name.trim().to_string(),
        };
    }

    if lowered == "hello" || lowered == "hi" {
        if let Some(name) = memory.get(NAME_KEY) {
            return Intent::Greet {
                name: name.to_string(),
            };
        }
    }

    if lowered == "let's play trivia" {
        return Intent::StartTrivia;
    }

    let wants_joke = match mode {
        DispatchMode::Console => lowered == "tell me a joke" || lowered == "joke",
        DispatchMode::Web => lowered.contains("joke"),
    };
    if wants_joke {
        return Intent::Joke;
    }

    if mode == DispatchMode::Web {
        if lowered.contains("weather") {
            return Intent::Weather {
                city: city_after_last_in(&lowered),
            };
        }
        if lowered.contains("news") {
            return Intent::News;
        }
    }

    Intent::Chat
}

/// Text after the last occurrence of the substring `"in"`, trimmed.
///
/// Known limitation: the substring also matches inside words, so
/// "weather in berlin" yields an empty city.
fn city_after_last_in(lowered: &str) -> String {
    lowered.rsplit("in").next().unwrap_or("").trim().to_string()
}
