//! Text-generation integration
//!
//! This module provides the message model and a client for an
//! OpenAI-compatible chat-completions endpoint.

pub mod client;
pub mod message;

pub use client::{ChatClient, GenerationError, Generator};
pub use message::{ChatMessage, Role};
