//! Facts about the host that the model needs to write runnable commands

use super::executor::ShellKind;

const UNKNOWN: &str = "unknown";

/// OS, shell, user and working directory, captured once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    pub os: String,
    pub shell: String,
    pub user: String,
    pub cwd: String,
}

impl HostEnvironment {
    /// Capture the current process environment
    pub fn capture() -> Self {
        let user = account_name()
            .or_else(|| {
                ["USER", "USERNAME"]
                    .iter()
                    .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
            })
            .unwrap_or_else(|| UNKNOWN.to_string());

        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| UNKNOWN.to_string());

        Self {
            os: std::env::consts::OS.to_string(),
            shell: ShellKind::host().display_name().to_string(),
            user,
            cwd,
        }
    }

    /// Bullet list used in the seed system message
    pub fn describe(&self) -> String {
        format!(
            "\n- OS: {}\n- Shell: {}\n- User: {}\n- CWD: {}\n",
            self.os, self.shell, self.user, self.cwd
        )
    }
}

/// Name of the effective user from the account database
#[cfg(unix)]
fn account_name() -> Option<String> {
    nix::unistd::User::from_uid(nix::unistd::Uid::effective())
        .ok()
        .flatten()
        .map(|user| user.name)
        .filter(|name| !name.is_empty())
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}
