//! Intent Chat - keyword-routed conversational dispatcher
//!
//! Routes each user utterance to one of a few canned behaviours: a trivia
//! quiz, name recall, joke/weather/news look-ups, or a fallback reply from a
//! language model. Runs either as an interactive console or as a JSON
//! request/response service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
