//! Scripted collaborators for driving the agent without a network or shell

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use shellmind::agent::{Activity, Operator, TaskOutcome, TurnOutcome};
use shellmind::llm::{ChatMessage, GenerationError, Generator};
use shellmind::repl::Frontend;
use shellmind::shell::{CommandExecutor, ExecutionOutput, HostEnvironment};
use shellmind::ui::Spinner;

pub fn test_environment() -> HostEnvironment {
    HostEnvironment {
        os: "linux".into(),
        shell: "bash".into(),
        user: "tester".into(),
        cwd: "/work".into(),
    }
}

pub fn ok(text: &str) -> Result<String, GenerationError> {
    Ok(text.to_string())
}

pub fn unavailable() -> Result<String, GenerationError> {
    Err(GenerationError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    })
}

/// Replies in order; records every prompt it was given
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyContent))
    }
}

/// Returns canned results in order; records every command it ran
pub struct ScriptedExecutor {
    results: Mutex<VecDeque<ExecutionOutput>>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new(results: Vec<ExecutionOutput>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &str) -> ExecutionOutput {
        self.commands.lock().unwrap().push(command.to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ExecutionOutput::failure("no scripted result"))
    }
}

/// Answers confirmations from a script; records prompts and activities
#[derive(Default)]
pub struct ScriptedOperator {
    answers: VecDeque<bool>,
    pub confirmations: Vec<String>,
    activities: Mutex<Vec<Activity>>,
}

impl ScriptedOperator {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: answers.into(),
            ..Default::default()
        }
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.activities.lock().unwrap().clone()
    }
}

#[async_trait]
impl Operator for ScriptedOperator {
    async fn confirm(&mut self, command: &str) -> bool {
        self.confirmations.push(command.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn progress(&self, activity: Activity) -> Spinner {
        self.activities.lock().unwrap().push(activity);
        Spinner::disabled()
    }
}

/// Feeds lines to the read-eval loop and remembers what it was shown
pub struct ScriptedFrontend {
    inputs: VecDeque<std::io::Result<Option<String>>>,
    pub operator: ScriptedOperator,
    pub greeted: bool,
    pub shown: Vec<&'static str>,
    pub errors: Vec<String>,
}

impl ScriptedFrontend {
    pub fn new(lines: &[&str]) -> Self {
        Self::with_reads(lines.iter().map(|l| Ok(Some(l.to_string()))).collect())
    }

    pub fn with_reads(reads: Vec<std::io::Result<Option<String>>>) -> Self {
        Self {
            inputs: reads.into(),
            operator: ScriptedOperator::default(),
            greeted: false,
            shown: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn unread(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Operator for ScriptedFrontend {
    async fn confirm(&mut self, command: &str) -> bool {
        self.operator.confirm(command).await
    }

    fn progress(&self, activity: Activity) -> Spinner {
        self.operator.progress(activity)
    }
}

#[async_trait]
impl Frontend for ScriptedFrontend {
    fn greet(&mut self) {
        self.greeted = true;
    }

    async fn next_input(&mut self) -> std::io::Result<Option<String>> {
        self.inputs.pop_front().unwrap_or(Ok(None))
    }

    fn show(&mut self, outcome: &TurnOutcome) {
        self.shown.push(outcome_kind(outcome));
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Short name of an outcome for assertions
pub fn outcome_kind(outcome: &TurnOutcome) -> &'static str {
    use shellmind::agent::ControlOutcome;
    match outcome {
        TurnOutcome::Control(ControlOutcome::Exit) => "exit",
        TurnOutcome::Control(ControlOutcome::HistoryCleared) => "cleared",
        TurnOutcome::Control(ControlOutcome::AutoConfirm(_)) => "auto",
        TurnOutcome::Chat(Ok(_)) => "chat",
        TurnOutcome::Chat(Err(_)) => "chat-failed",
        TurnOutcome::Task(TaskOutcome::Succeeded { .. }) => "succeeded",
        TurnOutcome::Task(TaskOutcome::SummaryFailed { .. }) => "summary-failed",
        TurnOutcome::Task(TaskOutcome::Cancelled { .. }) => "cancelled",
        TurnOutcome::Task(TaskOutcome::GenerationFailed { .. }) => "generation-failed",
        TurnOutcome::Task(TaskOutcome::Exhausted { .. }) => "exhausted",
    }
}
