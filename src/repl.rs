//! Interactive read-eval loop
//!
//! Reads one line, hands it to the controller, renders the outcome, and
//! goes back for the next line until `/exit` or end of input.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::{AgentController, Operator, TurnOutcome};
use crate::llm::Generator;
use crate::shell::CommandExecutor;

/// Everything the loop needs from a user interface
#[async_trait]
pub trait Frontend: Operator {
    /// Shown once before the first prompt
    fn greet(&mut self);

    /// Next trimmed line; `Ok(None)` at end of input
    async fn next_input(&mut self) -> std::io::Result<Option<String>>;

    fn show(&mut self, outcome: &TurnOutcome);

    fn show_error(&mut self, message: &str);
}

/// Run the session until the user exits. Returns the number of turns handled.
pub async fn run<G, E, F>(agent: &mut AgentController<G, E>, frontend: &mut F) -> usize
where
    G: Generator,
    E: CommandExecutor,
    F: Frontend,
{
    frontend.greet();
    let mut turns = 0;

    loop {
        let input = match frontend.next_input().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!(turns, "End of input, leaving session");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                frontend.show_error(&format!("Error reading input: {}", e));
                continue;
            }
        };

        let outcome = agent.handle(&input, frontend).await;
        turns += 1;
        frontend.show(&outcome);

        if outcome.is_exit() {
            info!(turns, "Session ended by user");
            break;
        }
    }

    turns
}
