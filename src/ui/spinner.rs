//! Progress indicator shown while the agent waits on the network or a command
//!
//! The spinner runs as its own tokio task. [`Spinner::finish`] signals it
//! and waits for the task to erase its line, so nothing the caller prints
//! afterwards can be overwritten by a late frame.

use std::future::Future;
use std::io::{IsTerminal, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to a running (or disabled) progress indicator
pub struct Spinner {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start animating `label` on stdout.
    ///
    /// Falls back to [`Spinner::disabled`] when stdout is not a terminal.
    pub fn start(label: impl Into<String>) -> Self {
        if !std::io::stdout().is_terminal() {
            return Self::disabled();
        }

        let label = label.into();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FRAME_INTERVAL);
            let mut frame = 0usize;
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        draw(&label, FRAMES[frame % FRAMES.len()]);
                        frame += 1;
                    }
                }
            }
            clear_line();
        });

        Self {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    /// A spinner that draws nothing
    pub fn disabled() -> Self {
        Self {
            stop: None,
            task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Stop the animation and wait until its line is cleared
    pub async fn finish(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Run `future` with this spinner active, stopping it on completion
    pub async fn wrap<F: Future>(self, future: F) -> F::Output {
        let output = future.await;
        self.finish().await;
        output
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // Only reached when the owning future was dropped mid-await.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn draw(label: &str, frame: &str) {
    let mut out = std::io::stdout();
    let _ = out
        .queue(MoveToColumn(0))
        .and_then(|o| o.queue(Clear(ClearType::CurrentLine)))
        .and_then(|o| o.queue(Print(format!("{} ", label))))
        .and_then(|o| o.queue(PrintStyledContent(frame.cyan().bold())));
    let _ = out.flush();
}

fn clear_line() {
    let mut out = std::io::stdout();
    let _ = out
        .queue(MoveToColumn(0))
        .and_then(|o| o.queue(Clear(ClearType::CurrentLine)));
    let _ = out.flush();
}
