//! shellmind - natural-language shell agent
//!
//! Turns requests typed at an interactive prompt into shell commands,
//! runs them (after confirmation), retries with the failure output fed back
//! to the model, and reports a short summary of the result.
//!
//! # Modules
//!
//! - `agent` - Turn classification, conversation memory, the task retry loop
//! - `llm` - Chat-completions client and message model
//! - `shell` - Host command execution and environment facts
//! - `ui` - Console rendering, confirmation prompt, progress spinner
//! - `repl` - The read-eval loop tying input, agent and display together
//! - `config` - Environment-sourced session settings
//! - `telemetry` - Logging and optional OTLP export
//!
//! # Quick Start
//!
//! ```ignore
//! use shellmind::{AgentController, AgentOptions, ChatClient, HostEnvironment, HostShell};
//!
//! let client = ChatClient::new(url, "gpt-4o-mini", Some(token), timeout)?;
//! let mut agent = AgentController::new(
//!     client,
//!     HostShell::new(),
//!     &HostEnvironment::capture(),
//!     AgentOptions::default(),
//! );
//! let outcome = agent.handle("list files", &mut console).await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod repl;
pub mod shell;
pub mod telemetry;
pub mod ui;

// Re-export commonly used types at crate root for convenience
pub use agent::{AgentController, AgentOptions, TaskOutcome, TurnOutcome};
pub use config::{ConfigError, SessionConfig};
pub use llm::{ChatClient, ChatMessage, GenerationError, Generator};
pub use shell::{CommandExecutor, HostEnvironment, HostShell};
