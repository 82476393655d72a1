//! Shell export formatting for certificate trust variables
//!
//! Renders the environment variables of a resolved spec as statements a
//! shell can `eval`, so the bundle can be tried outside a container.

pub mod bash;
pub mod fish;
pub mod pwsh;
pub mod zsh;

use catrust_core::{EnvironmentVariables, Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use bash::BashShell;
pub use fish::FishShell;
pub use pwsh::PwshShell;
pub use zsh::ZshShell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

pub trait Shell {
    fn export(&self, key: &str, value: &str) -> String;

    fn unset(&self, key: &str) -> String;

    fn escape(&self, s: &str) -> String;

    /// Export every variable in `env`, then unset each name in `unset`.
    /// One statement per line, in key order.
    fn render(&self, env: &EnvironmentVariables, unset: &[&str]) -> String {
        env.iter()
            .map(|(k, v)| self.export(k, v))
            .chain(unset.iter().map(|k| self.unset(k)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ShellType {
    pub const ALL: [ShellType; 4] = [
        ShellType::Bash,
        ShellType::Zsh,
        ShellType::Fish,
        ShellType::PowerShell,
    ];

    /// Shell named by `argv[0]` or `$SHELL`, e.g. `-zsh` or `/usr/bin/fish`
    pub fn detect_from_arg(arg0: &str) -> Option<Self> {
        let shell_name = Path::new(arg0)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(arg0);

        let shell_name = shell_name.strip_prefix('-').unwrap_or(shell_name);

        Self::from_name(shell_name)
    }

    /// Shell of the current user from `$SHELL`, falling back to bash
    pub fn detect() -> Self {
        std::env::var("SHELL")
            .ok()
            .and_then(|shell| Self::detect_from_arg(&shell))
            .unwrap_or(ShellType::Bash)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bash" | "sh" => Some(ShellType::Bash),
            "zsh" => Some(ShellType::Zsh),
            "fish" => Some(ShellType::Fish),
            "pwsh" | "powershell" => Some(ShellType::PowerShell),
            _ => None,
        }
    }

    pub fn as_shell(&self) -> Box<dyn Shell> {
        match self {
            ShellType::Bash => Box::new(BashShell),
            ShellType::Zsh => Box::new(ZshShell),
            ShellType::Fish => Box::new(FishShell),
            ShellType::PowerShell => Box::new(PwshShell),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::PowerShell => "pwsh",
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            Error::unsupported(
                "shell",
                format!("'{s}' is not supported; expected one of bash, zsh, fish, pwsh"),
            )
        })
    }
}

/// POSIX single-quote escaping shared by bash and zsh
pub fn escape_bash_like(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }

    if s.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '=' | '/' | '.' | '-'))
    {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + 10);
    result.push('\'');

    for c in s.chars() {
        if c == '\'' {
            result.push_str("'\"'\"'");
        } else {
            result.push(c);
        }
    }

    result.push('\'');
    result
}
