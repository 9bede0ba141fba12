//! Terminal front end: banner, input prompt, confirmation and result boxes

use std::io::Write;

use async_trait::async_trait;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::agent::{Activity, ControlOutcome, Operator, TaskOutcome, TurnOutcome};
use crate::repl::Frontend;

use super::spinner::Spinner;

const BOX_WIDTH: usize = 80;

const BANNER: &[&str] = &[
    r"   ____  _          _ _           _           _ ",
    r"  / ___|| |__   ___| | |_ __ ___ (_)_ __   __| |",
    r"  \___ \| '_ \ / _ \ | | '_ ` _ \| | '_ \ / _` |",
    r"   ___) | | | |  __/ | | | | | | | | | | | (_| |",
    r"  |____/|_| |_|\___|_|_|_| |_| |_|_|_| |_|\__,_|",
];

const BANNER_COLORS: &[Color] = &[
    Color::Cyan,
    Color::DarkCyan,
    Color::Blue,
    Color::DarkBlue,
    Color::Magenta,
    Color::DarkMagenta,
];

/// Interactive console bound to the process's stdin/stdout
pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print the banner and usage hints
    pub fn print_header(&self) {
        for line in BANNER {
            let step = BANNER_COLORS.len() as f64 / line.chars().count().max(1) as f64;
            let painted: String = line
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    let idx = ((i as f64 * step) as usize).min(BANNER_COLORS.len() - 1);
                    c.to_string().with(BANNER_COLORS[idx]).to_string()
                })
                .collect();
            println!("{}", painted);
        }

        println!("\n{}", "Information:".cyan().bold());
        println!(" • Put \"!\" before a question to just get an answer. Example: !How do I create a folder?");
        println!(" • Type a request without \"!\" and the agent will run commands and report the result.");
        println!(" • /auto-true runs commands without asking, /auto-false asks again, /clear forgets history, /exit quits.");
        println!("{}", "─".repeat(70));
    }

    /// Prompt for the next query; `None` at end of input
    pub async fn read_input(&mut self) -> std::io::Result<Option<String>> {
        println!("╭─{}", "─".repeat(66));
        print!("{}", "│ > Enter your query: ".white());
        std::io::stdout().flush()?;

        let line = self.lines.next_line().await;
        println!("{}", format!("╰{}", "─".repeat(65)).white());
        Ok(line?.map(|l| l.trim().to_string()))
    }

    /// Print whatever a turn produced
    pub fn render(&self, outcome: &TurnOutcome) {
        print!("{}", format_outcome(outcome));
        let _ = std::io::stdout().flush();
    }

    pub fn report_error(&self, message: &str) {
        println!("{}", message.red().bold());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operator for Console {
    async fn confirm(&mut self, command: &str) -> bool {
        print!("Confirm command? [y/n]: {}\n> ", command.cyan().bold());
        let _ = std::io::stdout().flush();

        let answer = self.lines.next_line().await.ok().flatten().unwrap_or_default();

        let mut out = std::io::stdout();
        let _ = out
            .queue(MoveUp(2))
            .and_then(|o| o.queue(MoveToColumn(0)))
            .and_then(|o| o.queue(Clear(ClearType::FromCursorDown)));
        let _ = out.flush();

        is_affirmative(&answer)
    }

    fn progress(&self, activity: Activity) -> Spinner {
        Spinner::start(activity.label())
    }
}

#[async_trait]
impl Frontend for Console {
    fn greet(&mut self) {
        self.print_header();
    }

    async fn next_input(&mut self) -> std::io::Result<Option<String>> {
        self.read_input().await
    }

    fn show(&mut self, outcome: &TurnOutcome) {
        self.render(outcome);
    }

    fn show_error(&mut self, message: &str) {
        self.report_error(message);
    }
}

/// `y` or `yes`, any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Render a turn outcome to text
pub fn format_outcome(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Control(control) => {
            let line = match control {
                ControlOutcome::Exit => return format!("{}\n", "exit".cyan().bold()),
                ControlOutcome::HistoryCleared => "History cleared",
                ControlOutcome::AutoConfirm(true) => "Auto-confirm enabled",
                ControlOutcome::AutoConfirm(false) => "Auto-confirm disabled",
            };
            format!("{}\n", line.green().bold())
        }
        TurnOutcome::Chat(Ok(reply)) => result_box("Response:", reply, None),
        TurnOutcome::Chat(Err(error)) => format!("{}\n", error.to_string().red().bold()),
        TurnOutcome::Task(task) => format_task(task),
    }
}

fn format_task(task: &TaskOutcome) -> String {
    match task {
        TaskOutcome::Succeeded {
            output, summary, ..
        } => result_box("Command output:", output, Some(summary)),
        TaskOutcome::SummaryFailed { output, error, .. } => {
            let mut text = result_box("Command output:", output, None);
            text.push_str(&error_box(&format!("Summary generation error:\n{}", error), None));
            text
        }
        TaskOutcome::Cancelled { .. } => {
            format!("{}\n", "Command cancelled by user.".cyan().bold())
        }
        TaskOutcome::GenerationFailed { error, .. } => {
            error_box(&format!("Command generation error:\n{}", error), None)
        }
        TaskOutcome::Exhausted {
            attempts, analysis, ..
        } => error_box(
            &format!("Failed to execute task after {} attempts.", attempts),
            analysis.as_deref(),
        ),
    }
}

/// Green box with the output and an optional AI summary
pub fn result_box(label: &str, output: &str, summary: Option<&str>) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        " {}\n",
        format!("╭─[ Result ]{}", "─".repeat(BOX_WIDTH - 16)).green().bold()
    ));
    text.push_str(&format!(" {} {}\n", bar(), label.white().bold()));
    for line in output.trim().lines() {
        text.push_str(&format!(" {}   {}\n", bar(), line));
    }
    if let Some(summary) = summary {
        push_summary(&mut text, summary);
    }
    text.push_str(&format!(
        " {}\n",
        format!("╰{}", "─".repeat(BOX_WIDTH - 2)).green().bold()
    ));
    text
}

/// Red box with an error log and an optional AI analysis
pub fn error_box(log: &str, analysis: Option<&str>) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        " {}\n",
        format!("╭─[ Error ]{}", "─".repeat(BOX_WIDTH - 16)).red().bold()
    ));
    text.push_str(&format!(" {} {}\n", bar(), "Error log:".white().bold()));
    for line in log.trim().lines() {
        text.push_str(&format!(" {}   {}\n", bar(), line.red().bold()));
    }
    if let Some(analysis) = analysis {
        push_summary(&mut text, analysis);
    }
    text.push_str(&format!(
        " {}\n",
        format!("╰{}", "─".repeat(BOX_WIDTH - 2)).red().bold()
    ));
    text
}

fn push_summary(text: &mut String, summary: &str) {
    text.push_str(&format!(" {} {}\n", bar(), "·".repeat(BOX_WIDTH - 4).bold()));
    text.push_str(&format!(" {} {}\n", bar(), "AI summary:".cyan().bold()));
    for line in summary.trim().lines() {
        text.push_str(&format!(" {}   {}\n", bar(), line.cyan().bold()));
    }
}

fn bar() -> String {
    "│".bold().to_string()
}
