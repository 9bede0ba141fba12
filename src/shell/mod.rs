//! Host shell integration
//!
//! - `executor` - runs a command string, returns combined output and success
//! - `environment` - OS/shell/user/cwd facts for the model's system context

pub mod environment;
pub mod executor;

pub use environment::HostEnvironment;
pub use executor::{CommandExecutor, ExecutionOutput, HostShell, ShellKind};
