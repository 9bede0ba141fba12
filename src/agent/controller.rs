//! Agent Controller - turn handling for chat queries and shell tasks
//!
//! Every line of input becomes exactly one turn:
//!
//! ```text
//! input ─► classify ─┬─ directive ─► mutate mode / history, no model call
//!                    ├─ !query ────► one model call ─► append Q/A on success
//!                    └─ task ──────► Generating ─► (Confirming) ─► Executing
//!                                        ▲                           │
//!                                        └──── failed, feed output ──┤
//!                                                                    ├─► Succeeded (summary, append)
//!                                                                    └─► Exhausted (analysis, no append)
//! ```
//!
//! Retry context grows only inside the task that produced it. Conversation
//! history receives one summarized exchange per successful task.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{SessionConfig, DEFAULT_RETRY_DELAY};
use crate::llm::{ChatMessage, GenerationError, Generator};
use crate::shell::{CommandExecutor, HostEnvironment};
use crate::ui::Spinner;

use super::classify::{classify, Directive, Input};
use super::command::clean_command;
use super::conversation::Conversation;
use super::prompts;

/// Behaviour knobs for the controller
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Generate/execute cycles allowed per task
    pub max_retries: usize,
    /// Pause between a failed execution and the next generation
    pub retry_delay: Duration,
    /// Run generated commands without asking
    pub auto_confirm: bool,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: DEFAULT_RETRY_DELAY,
            auto_confirm: false,
        }
    }
}

impl From<&SessionConfig> for AgentOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            auto_confirm: false,
        }
    }
}

/// A blocking step the user waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Thinking,
    GeneratingCommand,
    Executing,
    Summarizing,
    AnalyzingError,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Thinking => "Thinking...",
            Activity::GeneratingCommand => "Command generation...",
            Activity::Executing => "Command execution...",
            Activity::Summarizing => "Generating summary...",
            Activity::AnalyzingError => "Generating error analysis...",
        }
    }
}

/// The human side of a turn: approvals and progress display
#[async_trait]
pub trait Operator: Send {
    /// Ask whether `command` may run; only an explicit yes returns true
    async fn confirm(&mut self, command: &str) -> bool;

    /// Indicator shown for the duration of `activity`
    fn progress(&self, activity: Activity) -> Spinner;
}

/// Result of a control directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    Exit,
    HistoryCleared,
    AutoConfirm(bool),
}

/// Terminal state of a task request
#[derive(Debug)]
pub enum TaskOutcome {
    Succeeded {
        command: String,
        output: String,
        summary: String,
        attempts: usize,
    },
    /// The command ran but the summary call failed; nothing was recorded
    SummaryFailed {
        command: String,
        output: String,
        error: GenerationError,
    },
    /// The user declined `command`
    Cancelled { command: String },
    /// The generation service failed; the task stopped without retrying
    GenerationFailed {
        attempt: usize,
        error: GenerationError,
    },
    /// Every attempt failed. `analysis` is `None` when explaining it failed too.
    Exhausted {
        attempts: usize,
        last_error: String,
        analysis: Option<String>,
    },
}

/// What one turn produced, for the presentation layer
#[derive(Debug)]
pub enum TurnOutcome {
    Control(ControlOutcome),
    Chat(Result<String, GenerationError>),
    Task(TaskOutcome),
}

impl TurnOutcome {
    pub fn is_exit(&self) -> bool {
        matches!(self, TurnOutcome::Control(ControlOutcome::Exit))
    }
}

/// Agent Controller orchestrating the model and the shell.
///
/// Owns the session's conversation and confirmation mode. Methods take
/// `&mut self`, so turns are strictly sequential; share a controller
/// between tasks only behind your own lock and never run two turns at once.
pub struct AgentController<G, E> {
    generator: G,
    executor: E,
    /// Host facts the conversation is seeded from, again on every `/clear`
    environment: HostEnvironment,
    conversation: Conversation,
    options: AgentOptions,
}

impl<G: Generator, E: CommandExecutor> AgentController<G, E> {
    /// Create a new agent controller
    ///
    /// # Arguments
    /// * `generator` - Text generation backend
    /// * `executor` - Runs the commands the model proposes
    /// * `environment` - Host facts for the conversation's seed message
    /// * `options` - Retry budget, delay and initial confirmation mode
    pub fn new(
        generator: G,
        executor: E,
        environment: &HostEnvironment,
        options: AgentOptions,
    ) -> Self {
        Self {
            generator,
            executor,
            environment: environment.clone(),
            conversation: Conversation::new(environment),
            options,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn auto_confirm(&self) -> bool {
        self.options.auto_confirm
    }

    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Handle one line of user input to completion
    pub async fn handle(&mut self, raw_input: &str, operator: &mut dyn Operator) -> TurnOutcome {
        let input = raw_input.trim();
        let turn_id = Uuid::now_v7().to_string();

        let span = info_span!(
            "turn",
            turn_id = %turn_id,
            session = %self.conversation.id(),
        );

        async {
            match classify(input) {
                Input::Control(directive) => TurnOutcome::Control(self.apply(directive)),
                Input::Chat { original, query } => {
                    TurnOutcome::Chat(self.chat(original, query, operator).await)
                }
                Input::Task(request) => TurnOutcome::Task(self.run_task(request, operator).await),
            }
        }
        .instrument(span)
        .await
    }

    fn apply(&mut self, directive: Directive) -> ControlOutcome {
        info!(directive = directive.as_str(), "Control directive");
        match directive {
            Directive::Exit => ControlOutcome::Exit,
            Directive::Clear => {
                self.conversation.seed(&self.environment);
                ControlOutcome::HistoryCleared
            }
            Directive::AutoConfirmOn => {
                self.options.auto_confirm = true;
                ControlOutcome::AutoConfirm(true)
            }
            Directive::AutoConfirmOff => {
                self.options.auto_confirm = false;
                ControlOutcome::AutoConfirm(false)
            }
        }
    }

    /// Directive + history snapshot + current input
    fn ephemeral_prompt(&self, directive: &str, input: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.conversation.len() + 2);
        messages.push(ChatMessage::system(directive));
        messages.extend(self.conversation.snapshot());
        messages.push(ChatMessage::user(input));
        messages
    }

    async fn generate(
        &self,
        messages: &[ChatMessage],
        activity: Activity,
        operator: &dyn Operator,
    ) -> Result<String, GenerationError> {
        operator
            .progress(activity)
            .wrap(self.generator.generate(messages))
            .await
    }

    async fn chat(
        &mut self,
        original: &str,
        query: &str,
        operator: &mut dyn Operator,
    ) -> Result<String, GenerationError> {
        info!(query_len = query.len(), "Chat query");
        let prompt = self.ephemeral_prompt(prompts::CHAT_DIRECTIVE, query);

        match self.generate(&prompt, Activity::Thinking, operator).await {
            Ok(reply) => {
                self.conversation.append(original, reply.clone());
                Ok(reply)
            }
            Err(error) => {
                warn!(error = %error, "Chat query failed");
                Err(error)
            }
        }
    }

    async fn run_task(&mut self, request: &str, operator: &mut dyn Operator) -> TaskOutcome {
        info!(max_retries = self.options.max_retries, "Task request");

        let mut attempt_context = self.ephemeral_prompt(prompts::COMMAND_DIRECTIVE, request);
        let mut last_error = String::new();
        let max_attempts = self.options.max_retries;

        for attempt in 1..=max_attempts {
            let raw = match self
                .generate(&attempt_context, Activity::GeneratingCommand, operator)
                .await
            {
                Ok(raw) => raw,
                Err(error) => {
                    warn!(attempt, error = %error, "Command generation failed, aborting task");
                    return TaskOutcome::GenerationFailed { attempt, error };
                }
            };

            let command = clean_command(&raw);
            info!(attempt, command = %command, "Generated command");

            if !self.options.auto_confirm && !operator.confirm(&command).await {
                info!(attempt, "Command declined");
                return TaskOutcome::Cancelled { command };
            }

            attempt_context.push(ChatMessage::assistant(raw.clone()));

            let output = operator
                .progress(Activity::Executing)
                .wrap(self.executor.execute(&command))
                .await;

            if output.succeeded {
                info!(attempt, "Command succeeded");
                return self
                    .summarize(request, &raw, command, output.combined, attempt, operator)
                    .await;
            }

            warn!(attempt, output_len = output.combined.len(), "Command failed");
            attempt_context.push(ChatMessage::user(prompts::retry_feedback(&output.combined)));
            last_error = output.combined;

            if attempt < max_attempts && !self.options.retry_delay.is_zero() {
                tokio::time::sleep(self.options.retry_delay).await;
            }
        }

        self.exhausted(request, last_error, operator).await
    }

    async fn summarize(
        &mut self,
        request: &str,
        raw: &str,
        command: String,
        output: String,
        attempts: usize,
        operator: &mut dyn Operator,
    ) -> TaskOutcome {
        let prompt = [
            ChatMessage::system(prompts::REPORT_DIRECTIVE),
            ChatMessage::user(prompts::summary_request(request, &output)),
        ];

        match self.generate(&prompt, Activity::Summarizing, operator).await {
            Ok(summary) => {
                self.conversation
                    .append(request, prompts::task_record(raw, &summary));
                TaskOutcome::Succeeded {
                    command,
                    output,
                    summary,
                    attempts,
                }
            }
            Err(error) => {
                warn!(error = %error, "Summary generation failed");
                TaskOutcome::SummaryFailed {
                    command,
                    output,
                    error,
                }
            }
        }
    }

    async fn exhausted(
        &self,
        request: &str,
        last_error: String,
        operator: &mut dyn Operator,
    ) -> TaskOutcome {
        let attempts = self.options.max_retries;
        warn!(attempts, "Task attempts exhausted");

        let prompt = [
            ChatMessage::system(prompts::REPORT_DIRECTIVE),
            ChatMessage::user(prompts::error_analysis_request(request, &last_error)),
        ];

        let analysis = match self.generate(&prompt, Activity::AnalyzingError, operator).await {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(error = %error, "Error analysis failed");
                None
            }
        };

        TaskOutcome::Exhausted {
            attempts,
            last_error,
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::shell::ExecutionOutput;

    struct Echo;

    #[async_trait]
    impl Generator for Echo {
        async fn generate(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
            Ok(messages.last().map(|m| m.content().to_string()).unwrap_or_default())
        }
    }

    struct NoShell;

    #[async_trait]
    impl CommandExecutor for NoShell {
        async fn execute(&self, _command: &str) -> ExecutionOutput {
            ExecutionOutput::failure("not available")
        }
    }

    fn env() -> HostEnvironment {
        HostEnvironment {
            os: "linux".into(),
            shell: "bash".into(),
            user: "dev".into(),
            cwd: "/tmp".into(),
        }
    }

    #[test]
    fn test_ephemeral_prompt_layers_directive_history_input() {
        let mut agent = AgentController::new(Echo, NoShell, &env(), AgentOptions::default());
        agent.conversation.append("!q", "a");

        let prompt = agent.ephemeral_prompt("DIRECTIVE", "now");
        let roles: Vec<Role> = prompt.iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(prompt[0].content(), "DIRECTIVE");
        assert_eq!(prompt[4].content(), "now");
        // building a prompt never touches history
        assert_eq!(agent.conversation().len(), 3);
    }

    #[test]
    fn test_options_from_config() {
        let config = SessionConfig {
            model: "m".into(),
            api_url: "http://x".into(),
            api_token: String::new(),
            timeout: Duration::from_secs(5),
            max_retries: 7,
            retry_delay: Duration::from_millis(10),
            otlp_endpoint: None,
        };
        let options = AgentOptions::from(&config);
        assert_eq!(options.max_retries, 7);
        assert_eq!(options.retry_delay, Duration::from_millis(10));
        assert!(!options.auto_confirm);
    }

    #[test]
    fn test_activity_labels() {
        assert_eq!(Activity::GeneratingCommand.label(), "Command generation...");
        assert_eq!(Activity::AnalyzingError.label(), "Generating error analysis...");
    }
}
