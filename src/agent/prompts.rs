//! Fixed directives and templates sent to the model

/// Prefix of the seed system message; host facts follow it
pub const SYSTEM_CONTEXT_HEADER: &str = "System Context:\n";

/// Directive for `!`-prefixed questions
pub const CHAT_DIRECTIVE: &str =
    "You are an AI agent. Answer the user's question based on the information available. NEVER USE SMILEYS.";

/// Directive for turning a request into one shell command
pub const COMMAND_DIRECTIVE: &str = "You are an AI agent. Your task is to generate commands based on the user's query. \
Answer only with the command, without extra words, explanations, and markdown formatting. Only raw command. \
Never use smileys. Try to generate commands that do not produce very long logs";

/// Directive shared by the summary and error-analysis calls
pub const REPORT_DIRECTIVE: &str = "You are an AI agent who short explain the result of executing the command, \
based on the original user query. NEVER USE SMILEYS.";

pub fn summary_request(query: &str, output: &str) -> String {
    format!(
        "Briefly explain the result of executing the command, based on the original user query. \
         Original query: '{}'. Command output: '{}'",
        query, output
    )
}

pub fn error_analysis_request(query: &str, error: &str) -> String {
    format!(
        "Analyze the error execution of command and explain simply what went wrong. \
         Original query: '{}'. Error: '{}'",
        query, error
    )
}

/// User turn appended to the attempt context after a failed execution
pub fn retry_feedback(output: &str) -> String {
    format!(
        "This command did not work. Output was:\n{}\nTry another command.",
        output
    )
}

/// Assistant record committed to history after a successful task
pub fn task_record(command: &str, summary: &str) -> String {
    format!("Command: `{}`\nSummary: {}", command, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_embeds_output() {
        let text = retry_feedback("ls: cannot access 'x'");
        assert!(text.starts_with("This command did not work."));
        assert!(text.contains("\nls: cannot access 'x'\n"));
    }

    #[test]
    fn test_task_record_format() {
        assert_eq!(task_record("ls", "Two files."), "Command: `ls`\nSummary: Two files.");
    }
}
