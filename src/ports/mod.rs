//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Content Ports
//!
//! - `JokeService` - Random joke look-up
//! - `WeatherService` - Current weather for a city
//! - `NewsService` - Top headlines
//! - `TriviaQuestionSource` - Multiple-choice question batches
//!
//! ## Conversation Ports
//!
//! - `ReplyGenerator` - Fallback text generation with a running history
//! - `ConversationStore` - Per-conversation state keyed by id

mod content_services;
mod conversation_store;
mod reply_generator;
mod service_error;
mod trivia_source;

pub use content_services::{JokeService, NewsService, WeatherService};
pub use conversation_store::{ConversationStore, StorageError};
pub use reply_generator::{GeneratedReply, ReplyGenerator};
pub use service_error::ServiceError;
pub use trivia_source::TriviaQuestionSource;
