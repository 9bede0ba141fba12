//! Normalization of model replies into runnable command text
//!
//! Models asked for "only the raw command" still wrap it now and then.
//! Each recognized wrapping is listed here; anything else passes through
//! untouched apart from surrounding whitespace.

/// Fence openers, checked in order; the first match is removed
const FENCE_OPENERS: &[&str] = &["```powershell", "```bash", "```"];
const FENCE_CLOSER: &str = "```";
const COMMAND_LABEL: &str = "Command: ";
/// `powershell -Command "..."`; compared lowercase
const POWERSHELL_WRAPPER: &str = "powershell -command ";

/// Strip markdown fences, a `Command: ` label and a quoted PowerShell
/// wrapper from a generated reply.
///
/// Each wrapping is stripped once, in that order, so a clean command comes
/// back unchanged. A label nested inside a fence survives the first pass.
pub fn clean_command(raw: &str) -> String {
    let mut text = raw;

    if let Some(opener) = FENCE_OPENERS.iter().find(|o| text.starts_with(*o)) {
        text = &text[opener.len()..];
    }
    text = text.strip_suffix(FENCE_CLOSER).unwrap_or(text);
    text = text.strip_prefix(COMMAND_LABEL).unwrap_or(text);

    if text.to_lowercase().starts_with(POWERSHELL_WRAPPER) {
        text = unquote_outer(text);
    }

    text.trim().to_string()
}

/// Text between the first and last double quote, if there are two
fn unquote_outer(text: &str) -> &str {
    match (text.find('"'), text.rfind('"')) {
        (Some(first), Some(last)) if last > first => &text[first + 1..last],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bash_fence() {
        assert_eq!(clean_command("```bash\nls -la\n```"), "ls -la");
    }

    #[test]
    fn test_strips_bare_fence() {
        assert_eq!(clean_command("```\ndf -h\n```"), "df -h");
    }

    #[test]
    fn test_strips_powershell_fence() {
        assert_eq!(clean_command("```powershell\nGet-ChildItem\n```"), "Get-ChildItem");
    }

    #[test]
    fn test_strips_command_label() {
        assert_eq!(clean_command("Command: whoami"), "whoami");
    }

    #[test]
    fn test_extracts_powershell_inner_command() {
        assert_eq!(
            clean_command(r#"powershell -Command "Get-Process | Select-Object -First 5""#),
            "Get-Process | Select-Object -First 5"
        );
        assert_eq!(
            clean_command(r#"PowerShell -command "Write-Output "hi"""#),
            r#"Write-Output "hi""#
        );
    }

    #[test]
    fn test_powershell_without_quotes_kept() {
        assert_eq!(
            clean_command("powershell -Command Get-Date"),
            "powershell -Command Get-Date"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(clean_command("  uname -a \n"), "uname -a");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(clean_command(" \n\t"), "");
    }

    #[test]
    fn test_clean_input_unchanged() {
        for cmd in [
            "ls -la",
            "grep -r \"TODO\" src",
            "echo 'Command: x'",
            "find . -name '*.rs' | wc -l",
        ] {
            assert_eq!(clean_command(cmd), cmd);
        }
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "```bash\nls -la\n```",
            "Command: pwd",
            r#"powershell -Command "dir C:\""#,
            "```\n```",
            "   ",
            "plain",
        ] {
            let once = clean_command(raw);
            assert_eq!(clean_command(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_label_inside_fence_is_kept() {
        // the fence's newline sits between the opener and the label
        let once = clean_command("```\nCommand: ls\n```");
        assert_eq!(once, "Command: ls");
        assert_eq!(clean_command(&once), "ls");
    }
}
