use crate::collectors::ToolchainEntry;
use crate::config::ToolchainConfig;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;
use tracing::debug;

/// How a version is cut out of a tool's trimmed `--version` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionRule {
    /// `Python 3.11.4` -> `3.11.4`
    SecondToken,
    /// `v18.16.0` -> `18.16.0`
    StripV,
    /// `openjdk version "17.0.2" 2022-01-18` -> `17.0.2`
    QuotedOnVersionLine,
    /// `1.2.3 extra` -> `1.2.3`
    FirstToken,
    /// `go version go1.21.0 linux/amd64` -> `1.21.0`
    GoVersion,
}

impl VersionRule {
    pub fn extract(self, output: &str) -> Option<String> {
        let output = output.trim();
        let version = match self {
            Self::SecondToken => output.split_whitespace().nth(1),
            Self::FirstToken => output.split_whitespace().next(),
            Self::StripV => output
                .split_whitespace()
                .next()
                .map(|t| t.strip_prefix('v').unwrap_or(t)),
            Self::QuotedOnVersionLine => output
                .lines()
                .filter(|line| line.contains("version"))
                .find_map(|line| line.split('"').nth(1)),
            Self::GoVersion => output
                .split_whitespace()
                .nth(2)
                .and_then(|t| t.strip_prefix("go")),
        };

        version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("не удалось запустить {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("{command} не ответил за {timeout_ms} мс")]
    Timeout { command: String, timeout_ms: u128 },
    #[error("{command} завершился с кодом {code:?}")]
    Failed { command: String, code: Option<i32> },
}

pub trait CommandRunner {
    /// Runs `command args` and returns stdout followed by stderr.
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<String, ProbeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<String, ProbeError> {
        let mut cmd = platform_command(command, args);
        cmd.stdin(Stdio::null()).kill_on_drop(true);

        let output = match time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ProbeError::Spawn {
                    command: command.to_string(),
                    source,
                })
            }
            Err(_elapsed) => {
                return Err(ProbeError::Timeout {
                    command: command.to_string(),
                    timeout_ms: timeout.as_millis(),
                })
            }
        };

        if !output.status.success() {
            return Err(ProbeError::Failed {
                command: command.to_string(),
                code: output.status.code(),
            });
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

#[cfg(target_os = "windows")]
fn platform_command(command: &str, args: &[String]) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command).args(args);
    cmd
}

#[cfg(not(target_os = "windows"))]
fn platform_command(command: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(command);
    cmd.args(args);
    cmd
}

/// Probes every configured tool in order, one at a time. Misses are dropped.
pub async fn detect_toolchains<R: CommandRunner>(
    runner: &R,
    tools: &[ToolchainConfig],
    timeout: Duration,
) -> Vec<ToolchainEntry> {
    let mut found = Vec::with_capacity(tools.len());
    for tool in tools {
        let output = match runner.run(&tool.command, &tool.args, timeout).await {
            Ok(output) => output,
            Err(err) => {
                debug!(tool = %tool.name, error = %err, "тулчейн не обнаружен");
                continue;
            }
        };

        match tool.rule.extract(&output) {
            Some(version) => found.push(ToolchainEntry {
                name: tool.name.clone(),
                icon: tool.icon.clone(),
                version,
            }),
            None => {
                debug!(tool = %tool.name, output = %output.trim(), "не удалось извлечь версию");
            }
        }
    }
    found
}
