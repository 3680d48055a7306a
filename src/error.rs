use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::specifier::ParseError;

/// Failure of an external command (installer, root query, node).
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    Status {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Failure of the module loader to import an entry point.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("loader produced invalid JSON: {0}")]
    Output(#[from] serde_json::Error),

    #[error("loader output is not an export map")]
    NotAnExportMap,

    #[error("loader finished without reporting exports")]
    MissingExports,
}

/// Any failure of the install-and-load pipeline.
#[derive(Debug, Error)]
pub enum UseError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to install {package} globally")]
    Install {
        package: String,
        #[source]
        source: CommandError,
    },

    #[error("failed to query the global install root")]
    GlobalRoot {
        #[source]
        source: CommandError,
    },

    #[error("{package} has no loadable entry point at '{}'", .path.display())]
    Resolution { package: String, path: PathBuf },

    #[error(
        "failed to import {package} from '{}' resolved as '{}'",
        .path.display(),
        .resolved.display()
    )]
    Load {
        package: String,
        path: PathBuf,
        resolved: PathBuf,
        #[source]
        source: LoadFailure,
    },

    #[error("cannot inspect '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UseError {
    /// Messages of this error and every chained cause, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            messages.push(err.to_string());
            cause = err.source();
        }
        messages
    }
}
