//! Dispatcher - routes one utterance to the behaviour it asks for.
//!
//! The dispatcher owns no conversation state. Callers pass the conversation's
//! [`ConversationState`] in and get it back mutated, which keeps concurrent
//! conversations fully isolated from each other.

use std::sync::Arc;

use crate::domain::dispatch::{classify, ConversationState, Intent};
use crate::domain::memory::NAME_KEY;
use crate::domain::trivia::{TriviaSession, TriviaStep, DEFAULT_QUESTION_COUNT};
use crate::ports::{JokeService, NewsService, ReplyGenerator, TriviaQuestionSource, WeatherService};

/// Reply to blank input.
pub const EMPTY_INPUT_REPLY: &str = "Please provide input text.";

/// Reply when a trivia session cannot get its questions.
pub const TRIVIA_UNAVAILABLE: &str = "I couldn't fetch trivia questions. Please try again later!";

const GOODBYE: &str = "Goodbye!";
const NAME_NOT_CAUGHT: &str = "I didn't catch your name. Please repeat it.";
const DEFAULT_NEWS_COUNT: usize = 5;

/// What to show the user after one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The user asked to leave; the conversation is over.
    pub ended: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ended: false,
        }
    }

    fn farewell() -> Self {
        Self {
            text: GOODBYE.to_string(),
            ended: true,
        }
    }
}

/// Intent dispatcher wired to its outbound ports.
pub struct Dispatcher {
    jokes: Arc<dyn JokeService>,
    weather: Arc<dyn WeatherService>,
    news: Arc<dyn NewsService>,
    trivia_source: Arc<dyn TriviaQuestionSource>,
    generator: Arc<dyn ReplyGenerator>,
    news_count: usize,
    trivia_amount: u32,
}

impl Dispatcher {
    pub fn new(
        jokes: Arc<dyn JokeService>,
        weather: Arc<dyn WeatherService>,
        news: Arc<dyn NewsService>,
        trivia_source: Arc<dyn TriviaQuestionSource>,
        generator: Arc<dyn ReplyGenerator>,
    ) -> Self {
        Self {
            jokes,
            weather,
            news,
            trivia_source,
            generator,
            news_count: DEFAULT_NEWS_COUNT,
            trivia_amount: DEFAULT_QUESTION_COUNT,
        }
    }

    /// Sets how many headlines a news reply lists.
    pub fn with_news_count(mut self, count: usize) -> Self {
        self.news_count = count;
        self
    }

    /// Sets how many questions a trivia session asks.
    pub fn with_trivia_amount(mut self, amount: u32) -> Self {
        self.trivia_amount = amount;
        self
    }

    /// Handles one line of user input against `state`.
    ///
    /// Blank input is answered without touching `state`. While a trivia
    /// session is active it receives every other input.
    pub async fn handle(&self, state: &mut ConversationState, raw_input: &str) -> Reply {
        let input = raw_input.trim();
        if input.is_empty() {
            return Reply::say(EMPTY_INPUT_REPLY);
        }
        state.turn_count += 1;

        if let Some(session) = state.trivia.take() {
            return self.continue_trivia(state, session, input).await;
        }

        let intent = classify(input, state.mode, &state.memory);
        tracing::debug!(conversation_id = %state.id, intent = intent.kind(), "intent matched");

        match intent {
            Intent::Exit => {
                state.end();
                tracing::info!(conversation_id = %state.id, turns = state.turn_count, "conversation ended");
                Reply::farewell()
            }
            Intent::Introduce { name } if name.is_empty() => Reply::say(NAME_NOT_CAUGHT),
            Intent::Introduce { name } => {
                let reply = format!("Nice to meet you, {}!", name);
                state.memory.set(NAME_KEY, name);
                Reply::say(reply)
            }
            Intent::Greet { name } => {
                Reply::say(format!("Hello, {}! How can I assist you today?", name))
            }
            Intent::StartTrivia => {
                let (session, prompt) = TriviaSession::start(self.trivia_amount);
                state.trivia = Some(session);
                tracing::info!(conversation_id = %state.id, "trivia session started");
                Reply::say(prompt)
            }
            Intent::Joke => Reply::say(self.jokes.fetch_joke().await),
            Intent::Weather { city } => Reply::say(self.weather.fetch_weather(&city).await),
            Intent::News => Reply::say(self.news.fetch_top_news(self.news_count).await),
            Intent::Chat => {
                let generated = self.generator.generate_reply(&state.history, input).await;
                state.history = generated.history;
                Reply::say(generated.text)
            }
        }
    }

    /// Feeds `input` to the active session and puts it back unless it ended.
    async fn continue_trivia(
        &self,
        state: &mut ConversationState,
        mut session: TriviaSession,
        input: &str,
    ) -> Reply {
        let step = match session.advance(input) {
            Ok(step) => step,
            Err(err) => {
                tracing::warn!(conversation_id = %state.id, error = %err, "trivia session aborted");
                return Reply::say(TRIVIA_UNAVAILABLE);
            }
        };

        match step {
            TriviaStep::Continue(text) => {
                state.trivia = Some(session);
                Reply::say(text)
            }
            TriviaStep::Finished(text) => {
                tracing::info!(
                    conversation_id = %state.id,
                    score = session.score(),
                    total = session.total_questions(),
                    "trivia session finished"
                );
                Reply::say(text)
            }
            TriviaStep::Fetch { notice, request } => {
                let started = match self.trivia_source.fetch_questions(request).await {
                    Ok(questions) => session
                        .begin(questions, &mut rand::thread_rng())
                        .map_err(|err| err.to_string()),
                    Err(err) => Err(err.to_string()),
                };

                let text = match started {
                    Ok(first_question) => {
                        state.trivia = Some(session);
                        first_question
                    }
                    Err(reason) => {
                        tracing::warn!(conversation_id = %state.id, %reason, "trivia fetch failed");
                        TRIVIA_UNAVAILABLE.to_string()
                    }
                };
                Reply::say(join_nonempty(&notice, &text))
            }
        }
    }
}

fn join_nonempty(first: &str, second: &str) -> String {
    if first.is_empty() {
        second.to_string()
    } else {
        format!("{}\n{}", first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockReplyGenerator, GENERATOR_UNAVAILABLE};
    use crate::adapters::services::{
        MockJokeService, MockNewsService, MockTriviaSource, MockWeatherService,
    };
    use crate::domain::dispatch::DispatchMode;
    use crate::domain::foundation::ConversationId;
    use crate::domain::trivia::{Category, Difficulty, TriviaQuestion};
    use crate::ports::ServiceError;

    struct Harness {
        dispatcher: Dispatcher,
        jokes: MockJokeService,
        weather: MockWeatherService,
        news: MockNewsService,
        trivia: MockTriviaSource,
        generator: MockReplyGenerator,
    }

    impl Harness {
        fn new() -> Self {
            Self::with(
                MockJokeService::new(),
                MockWeatherService::new(),
                MockNewsService::new(),
                MockTriviaSource::new(),
                MockReplyGenerator::new(),
            )
        }

        fn with(
            jokes: MockJokeService,
            weather: MockWeatherService,
            news: MockNewsService,
            trivia: MockTriviaSource,
            generator: MockReplyGenerator,
        ) -> Self {
            let dispatcher = Dispatcher::new(
                Arc::new(jokes.clone()),
                Arc::new(weather.clone()),
                Arc::new(news.clone()),
                Arc::new(trivia.clone()),
                Arc::new(generator.clone()),
            );
            Self {
                dispatcher,
                jokes,
                weather,
                news,
                trivia,
                generator,
            }
        }
    }

    fn console_state() -> ConversationState {
        ConversationState::new(ConversationId::new(), DispatchMode::Console)
    }

    fn web_state() -> ConversationState {
        ConversationState::new(ConversationId::new(), DispatchMode::Web)
    }

    fn questions(n: usize) -> Vec<TriviaQuestion> {
        (1..=n)
            .map(|i| {
                TriviaQuestion::new(
                    format!("Question text {}", i),
                    format!("right{}", i),
                    vec![
                        format!("wrong{}a", i),
                        format!("wrong{}b", i),
                        format!("wrong{}c", i),
                    ],
                )
            })
            .collect()
    }

    /// Finds the option number showing `answer` in a rendered question.
    fn choice_for(rendered: &str, answer: &str) -> String {
        rendered
            .lines()
            .find_map(|line| {
                let (number, option) = line.split_once(". ")?;
                (option == answer).then(|| number.to_string())
            })
            .unwrap()
    }

    // ─────────────────────────────────────────────────────────────
    // Simple intents
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn blank_input_leaves_state_untouched() {
        let h = Harness::new();
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "   ").await;

        assert_eq!(reply.text, EMPTY_INPUT_REPLY);
        assert!(!reply.ended);
        assert_eq!(state.turn_count, 0);
        assert_eq!(h.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn bye_ends_conversation() {
        let h = Harness::new();
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "Bye").await;

        assert_eq!(reply.text, "Goodbye!");
        assert!(reply.ended);
        assert!(state.is_ended());
    }

    #[tokio::test]
    async fn introduction_is_remembered_for_greeting() {
        let h = Harness::new();
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "my name is Ada").await;
        assert_eq!(reply.text, "Nice to meet you, Ada!");
        assert_eq!(state.memory.get(NAME_KEY), Some("Ada"));

        let reply = h.dispatcher.handle(&mut state, "hello").await;
        assert_eq!(reply.text, "Hello, Ada! How can I assist you today?");
    }

    #[tokio::test]
    async fn blank_name_is_not_stored() {
        let h = Harness::new();
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "my name is   ").await;

        assert_eq!(reply.text, NAME_NOT_CAUGHT);
        assert!(state.memory.is_empty());
    }

    #[tokio::test]
    async fn reintroduction_overwrites_name() {
        let h = Harness::new();
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "my name is Ada").await;
        h.dispatcher.handle(&mut state, "my name is Grace").await;

        let reply = h.dispatcher.handle(&mut state, "hi").await;
        assert_eq!(reply.text, "Hello, Grace! How can I assist you today?");
    }

    #[tokio::test]
    async fn greeting_without_name_falls_back_to_generator() {
        let h = Harness::new();
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "hello").await;

        assert_eq!(reply.text, "You said: hello");
        assert_eq!(h.generator.call_count(), 1);
    }

    #[tokio::test]
    async fn joke_uses_joke_service() {
        let h = Harness::with(
            MockJokeService::new().with_response("Why? - Because."),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new(),
            MockReplyGenerator::new(),
        );
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "tell me a joke").await;

        assert_eq!(reply.text, "Why? - Because.");
        assert_eq!(h.jokes.call_count(), 1);
    }

    #[tokio::test]
    async fn console_mode_ignores_weather_and_news() {
        let h = Harness::new();
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "weather in paris").await;
        h.dispatcher.handle(&mut state, "news").await;

        assert!(h.weather.requested_cities().is_empty());
        assert!(h.news.requested_counts().is_empty());
        assert_eq!(h.generator.call_count(), 2);
    }

    #[tokio::test]
    async fn web_mode_routes_weather_and_news() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new().with_response("Sunny."),
            MockNewsService::new().with_response("- Headline"),
            MockTriviaSource::new(),
            MockReplyGenerator::new(),
        );
        let dispatcher = h.dispatcher.with_news_count(3);
        let mut state = web_state();

        let weather = dispatcher.handle(&mut state, "What's the weather in Paris").await;
        let news = dispatcher.handle(&mut state, "any news today?").await;

        assert_eq!(weather.text, "Sunny.");
        assert_eq!(news.text, "- Headline");
        assert_eq!(h.weather.requested_cities(), vec!["paris"]);
        assert_eq!(h.news.requested_counts(), vec![3]);
    }

    // ─────────────────────────────────────────────────────────────
    // Fallback generation
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn fallback_replaces_history_and_keeps_original_casing() {
        let h = Harness::new();
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "What Is Rust?").await;

        assert_eq!(state.history.len(), 2);
        assert_eq!(h.generator.calls()[0].utterance, "What Is Rust?");
    }

    #[tokio::test]
    async fn generator_failure_keeps_history() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new(),
            MockReplyGenerator::new().with_response("first").with_failure(),
        );
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "one").await;
        let reply = h.dispatcher.handle(&mut state, "two").await;

        assert_eq!(reply.text, GENERATOR_UNAVAILABLE);
        assert_eq!(state.history.len(), 2);
    }

    #[tokio::test]
    async fn trivia_trigger_superset_goes_to_generator() {
        let h = Harness::new();
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "let's play trivia now").await;

        assert!(!state.in_trivia());
        assert_eq!(h.generator.call_count(), 1);
    }

    // ─────────────────────────────────────────────────────────────
    // Trivia
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn trivia_session_plays_to_completion() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_questions(questions(5)),
            MockReplyGenerator::new(),
        );
        let mut state = console_state();

        let reply = h.dispatcher.handle(&mut state, "let's play trivia").await;
        assert_eq!(reply.text, "Choose a difficulty level: easy, medium, or hard.");
        assert!(state.in_trivia());

        let reply = h.dispatcher.handle(&mut state, "hard").await;
        assert!(reply.text.contains("18: Science: Computers"));

        let mut rendered = h.dispatcher.handle(&mut state, "23").await.text;
        assert!(rendered.starts_with("Question 1: Question text 1"));

        // Right, wrong, out of range, right, bye (bye is just a wrong answer here)
        let right = choice_for(&rendered, "right1");
        rendered = h.dispatcher.handle(&mut state, &right).await.text;
        assert!(rendered.starts_with("Correct! 🎉"));

        let wrong = choice_for(&rendered, "wrong2a");
        rendered = h.dispatcher.handle(&mut state, &wrong).await.text;
        assert!(rendered.starts_with("Incorrect. The correct answer was: right2"));

        rendered = h.dispatcher.handle(&mut state, "7").await.text;
        assert!(rendered.starts_with("Invalid input. Moving to the next question."));

        let right = choice_for(&rendered, "right4");
        h.dispatcher.handle(&mut state, &right).await;

        let last = h.dispatcher.handle(&mut state, "bye").await;
        assert!(!last.ended);
        assert!(last
            .text
            .ends_with("Your final score is 2/5! Thanks for playing."));
        assert!(!state.in_trivia());

        let requests = h.trivia.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].category, Category::History);
        assert_eq!(requests[0].difficulty, Difficulty::Hard);
        assert_eq!(requests[0].amount, 5);
        assert_eq!(h.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_category_defaults_with_notice() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_questions(questions(5)),
            MockReplyGenerator::new(),
        );
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "let's play trivia").await;
        h.dispatcher.handle(&mut state, "extreme").await;
        let reply = h.dispatcher.handle(&mut state, "99").await;

        assert!(reply
            .text
            .starts_with("Invalid choice, defaulting to General Knowledge.\nQuestion 1:"));
        let request = h.trivia.requests()[0];
        assert_eq!(request.category, Category::GeneralKnowledge);
        assert_eq!(request.difficulty, Difficulty::Medium);
    }

    #[tokio::test]
    async fn trivia_fetch_failure_discards_session() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_error(ServiceError::Timeout { timeout_secs: 10 }),
            MockReplyGenerator::new(),
        );
        let mut state = console_state();
        state.memory.set(NAME_KEY, "Ada");

        h.dispatcher.handle(&mut state, "let's play trivia").await;
        h.dispatcher.handle(&mut state, "easy").await;
        let reply = h.dispatcher.handle(&mut state, "9").await;

        assert_eq!(reply.text, TRIVIA_UNAVAILABLE);
        assert!(!state.in_trivia());
        assert_eq!(state.memory.get(NAME_KEY), Some("Ada"));
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn zero_questions_is_a_fetch_failure() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_questions(Vec::new()),
            MockReplyGenerator::new(),
        );
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "let's play trivia").await;
        h.dispatcher.handle(&mut state, "easy").await;
        let reply = h.dispatcher.handle(&mut state, "abc").await;

        assert_eq!(
            reply.text,
            "Invalid input, defaulting to General Knowledge.\nI couldn't fetch trivia questions. Please try again later!"
        );
        assert!(!state.in_trivia());
    }

    #[tokio::test]
    async fn trivia_amount_is_configurable() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_questions(questions(3)),
            MockReplyGenerator::new(),
        );
        let dispatcher = h.dispatcher.with_trivia_amount(3);
        let mut state = console_state();

        dispatcher.handle(&mut state, "let's play trivia").await;
        dispatcher.handle(&mut state, "medium").await;
        dispatcher.handle(&mut state, "12").await;
        dispatcher.handle(&mut state, "x").await;
        dispatcher.handle(&mut state, "x").await;
        let last = dispatcher.handle(&mut state, "x").await;

        assert!(last.text.ends_with("Your final score is 0/3! Thanks for playing."));
        assert_eq!(h.trivia.requests()[0].amount, 3);
    }

    #[tokio::test]
    async fn zero_trivia_amount_asks_one_question() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_questions(questions(5)),
            MockReplyGenerator::new(),
        );
        let dispatcher = h.dispatcher.with_trivia_amount(0);
        let mut state = console_state();

        dispatcher.handle(&mut state, "let's play trivia").await;
        dispatcher.handle(&mut state, "easy").await;
        let first = dispatcher.handle(&mut state, "9").await;
        assert!(first.text.starts_with("Question 1: Question text 1"));

        let last = dispatcher.handle(&mut state, "x").await;
        assert!(last.text.ends_with("Your final score is 0/1! Thanks for playing."));
        assert!(!state.in_trivia());
        assert_eq!(h.trivia.requests()[0].amount, 1);
    }

    #[tokio::test]
    async fn blank_answer_mid_trivia_keeps_current_question() {
        let h = Harness::with(
            MockJokeService::new(),
            MockWeatherService::new(),
            MockNewsService::new(),
            MockTriviaSource::new().with_questions(questions(5)),
            MockReplyGenerator::new(),
        );
        let mut state = console_state();

        h.dispatcher.handle(&mut state, "let's play trivia").await;
        h.dispatcher.handle(&mut state, "easy").await;
        let rendered = h.dispatcher.handle(&mut state, "9").await.text;
        let turns = state.turn_count;

        let reply = h.dispatcher.handle(&mut state, "   ").await;

        assert_eq!(reply.text, EMPTY_INPUT_REPLY);
        assert_eq!(state.turn_count, turns);
        let session = state.trivia.as_ref().unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);

        // The same question still takes the answer
        let right = choice_for(&rendered, "right1");
        let reply = h.dispatcher.handle(&mut state, &right).await;
        assert!(reply.text.starts_with("Correct! 🎉\n\nQuestion 2:"));
        assert_eq!(state.trivia.as_ref().unwrap().score(), 1);
    }
}
