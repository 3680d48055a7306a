//! External command execution.
//!
//! Every process the pipeline starts (`npm install -g`, `npm root -g`,
//! `node`) goes through a [`CommandRunner`], so tests can swap in a stub
//! and count invocations instead of spawning real processes.

use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;

use crate::error::CommandError;

/// A program invocation: argv only, never passed through a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    /// Discard stdout instead of capturing it.
    pub quiet: bool,
}

impl CommandLine {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            quiet: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What a finished command left behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a nonzero exit into a [`CommandError::Status`].
    pub fn check(self, program: &str) -> Result<CommandOutput, CommandError> {
        if self.success() {
            Ok(self)
        } else {
            Err(CommandError::Status {
                program: program.to_string(),
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs external commands to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` and wait for it. Only a failure to start is an
    /// error here; exit status is reported in the output.
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput, CommandError>;
}

/// Spawns real processes through tokio.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command = %command, "running");

        let stdout = if command.quiet {
            Stdio::null()
        } else {
            Stdio::piped()
        };
        let spawn_error = |source| CommandError::Spawn {
            program: command.program.clone(),
            source,
        };
        let child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;
        let output = child.wait_with_output().await.map_err(spawn_error)?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        })
    }
}
