//! Content Service Adapters
//!
//! Reqwest-backed implementations of the joke, weather, news and trivia
//! ports, plus configurable mocks for tests.
//!
//! ## Available Adapters
//!
//! - `JokeApiClient` - official-joke-api random joke
//! - `OpenWeatherClient` - OpenWeatherMap current weather
//! - `NewsApiClient` - NewsAPI top headlines
//! - `OpenTriviaDbClient` - Open Trivia DB question batches
//! - `MockJokeService`, `MockWeatherService`, `MockNewsService`,
//!   `MockTriviaSource` - canned responses with call recording

mod http_client;
mod joke_api;
mod mock;
mod news_api;
mod open_trivia_db;
mod weather_api;

pub(crate) use http_client::transport_error;
pub use joke_api::{JokeApiClient, JOKE_UNAVAILABLE};
pub use mock::{MockJokeService, MockNewsService, MockTriviaSource, MockWeatherService};
pub use news_api::{NewsApiClient, NEWS_UNAVAILABLE};
pub use open_trivia_db::OpenTriviaDbClient;
pub use weather_api::{OpenWeatherClient, WEATHER_UNAVAILABLE};
