//! Agent module for turning requests into shell commands
//!
//! This module provides the session loop core that orchestrates:
//! - Input classification (directives, `!` chat queries, task requests)
//! - Prompt layering over the durable conversation
//! - The generate → confirm → execute → retry cycle for tasks
//!
//! # Architecture
//!
//! ```text
//! User input → AgentController::handle
//!                  ↓
//!            classify(input)
//!                  ↓
//!   Chat: Generator (once) → append Q/A
//!   Task: Generator → clean_command → Operator::confirm
//!                  ↓
//!         CommandExecutor::execute
//!                  ↓
//!   ok → summary → append record     fail → feedback → Generator (again)
//! ```

pub mod classify;
pub mod command;
pub mod controller;
pub mod conversation;
pub mod prompts;

pub use classify::{classify, Directive, Input};
pub use command::clean_command;
pub use controller::{
    Activity, AgentController, AgentOptions, ControlOutcome, Operator, TaskOutcome, TurnOutcome,
};
pub use conversation::Conversation;
