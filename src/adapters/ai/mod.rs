//! Reply Generator Adapters.
//!
//! Implementations of the ReplyGenerator port.
//!
//! ## Available Adapters
//!
//! - `MockReplyGenerator` - Configurable mock for testing
//! - `OpenAIReplyGenerator` - OpenAI-compatible chat completions endpoint

mod mock_reply_generator;
mod openai_reply_generator;

pub use mock_reply_generator::{MockReplyGenerator, RecordedCall};
pub use openai_reply_generator::{OpenAIConfig, OpenAIReplyGenerator, GENERATOR_UNAVAILABLE};
